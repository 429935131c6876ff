//! Check command - report invalid entries in rename lists.

use std::path::{Path, PathBuf};
use symrename_directive::read_file;

pub fn run(files: &[PathBuf]) -> miette::Result<()> {
    if files.is_empty() {
        return Err(miette::miette!("No files specified"));
    }

    let mut total_entries = 0;
    let mut total_invalid = 0;

    for file in files {
        let (entries, invalid) = check_file(file)?;
        total_entries += entries;
        total_invalid += invalid;
    }

    println!();
    if total_invalid > 0 {
        println!(
            "Check complete: {} invalid of {} entries",
            total_invalid, total_entries
        );
        Err(miette::miette!("{} invalid entries found", total_invalid))
    } else {
        println!("Check complete: {} entries, no issues found", total_entries);
        Ok(())
    }
}

fn check_file(file: &Path) -> miette::Result<(usize, usize)> {
    let lines = read_file(file)
        .map_err(|e| miette::miette!("Failed to read {}: {}", file.display(), e))?;

    println!("Checking: {}", file.display());

    let mut invalid = 0;
    for line in &lines {
        if let Err(err) = &line.parsed {
            println!("  error: {}", err);
            println!("   --> {}:{}", file.display(), line.number);
            println!("    |");
            println!("{:4} | {}", line.number, line.raw);
            println!("    |");
            invalid += 1;
        }
    }

    if invalid == 0 {
        println!("  ok");
    }

    Ok((lines.len(), invalid))
}
