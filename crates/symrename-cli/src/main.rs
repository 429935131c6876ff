//! symrename CLI - apply batch rename lists to a program model.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod spinner;

/// symrename - semantic batch renames for types and members
#[derive(Parser)]
#[command(name = "symrename")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a rename list to a project
    Apply {
        /// Project file (JSON)
        project: PathBuf,
        /// Rename list (`T:Old.Name;New` / `P:Type.Member;New` lines)
        renames: PathBuf,
        /// Output file (default: overwrite the project file)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Apply renames without writing the result
        #[arg(long)]
        dry_run: bool,
        /// Type name that marks a property backing field (repeatable)
        #[arg(long = "backing-type", value_name = "TYPE")]
        backing_types: Vec<String>,
        /// Suffix of a property backing field name
        #[arg(long, value_name = "SUFFIX")]
        backing_suffix: Option<String>,
    },

    /// Check rename lists for invalid entries
    Check {
        /// Rename list(s)
        files: Vec<PathBuf>,
    },

    /// Resolve a qualified name against a project
    Resolve {
        /// Project file (JSON)
        project: PathBuf,
        /// Qualified type name, or `Type.Member` with --member
        name: String,
        /// Resolve a member instead of a type
        #[arg(long)]
        member: bool,
    },

    /// List every type and member of a project
    Symbols {
        /// Project file (JSON)
        project: PathBuf,
    },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    match cli.command {
        Commands::Apply {
            project,
            renames,
            output,
            dry_run,
            backing_types,
            backing_suffix,
        } => {
            let options = commands::apply::ApplyOptions {
                output,
                dry_run,
                backing_types,
                backing_suffix,
                progress: !cli.verbose,
            };
            let runtime = tokio::runtime::Runtime::new()
                .map_err(|e| miette::miette!("Failed to start async runtime: {}", e))?;
            runtime.block_on(commands::apply::run(&project, &renames, options))
        }
        Commands::Check { files } => commands::check::run(&files),
        Commands::Resolve {
            project,
            name,
            member,
        } => commands::resolve::run(&project, &name, member),
        Commands::Symbols { project } => commands::symbols::run(&project),
    }
}
