//! Apply command - run a rename list against a project and commit the result.

use crate::spinner::SpinnerModel;
use std::path::{Path, PathBuf};
use symrename_directive::read_file;
use symrename_engine::{CommitStatus, EngineConfig, RenameEngine, RunReport};
use symrename_model::{InMemoryModel, JsonStore};

/// Options for `symrename apply`.
#[derive(Debug, Default)]
pub struct ApplyOptions {
    pub output: Option<PathBuf>,
    pub dry_run: bool,
    pub backing_types: Vec<String>,
    pub backing_suffix: Option<String>,
    pub progress: bool,
}

impl ApplyOptions {
    /// Environment config with command-line overrides applied.
    fn engine_config(&self) -> EngineConfig {
        let mut builder = EngineConfig::builder();
        let env = EngineConfig::from_env();
        builder = builder
            .backing_field_types(&env.backing_field_types)
            .backing_field_suffix(&env.backing_field_suffix);

        if !self.backing_types.is_empty() {
            builder = builder.backing_field_types(&self.backing_types);
        }
        if let Some(suffix) = &self.backing_suffix {
            builder = builder.backing_field_suffix(suffix);
        }
        builder.build()
    }
}

pub(crate) async fn run(project: &Path, renames: &Path, options: ApplyOptions) -> miette::Result<()> {
    let report = apply(project, renames, &options).await?;

    let summary = report.summary();
    println!();
    println!(
        "Applied {} rename(s) ({} backing field(s)), skipped {}",
        summary.applied,
        summary.cascaded,
        summary.skipped()
    );

    match &report.commit {
        CommitStatus::Committed => {
            let target = options.output.as_deref().unwrap_or(project);
            println!("Wrote {}", target.display());
            Ok(())
        }
        CommitStatus::NotAttempted => {
            println!("Dry run: no changes written");
            Ok(())
        }
        CommitStatus::Failed(reason) => Err(miette::miette!("Failed to save changes: {}", reason)),
    }
}

async fn apply(project: &Path, renames: &Path, options: &ApplyOptions) -> miette::Result<RunReport> {
    let lines = read_file(renames)
        .map_err(|e| miette::miette!("Failed to read {}: {}", renames.display(), e))?;
    let model = InMemoryModel::from_path(project)
        .map_err(|e| miette::miette!("Failed to load {}: {}", project.display(), e))?;

    let model = SpinnerModel::new(model, options.progress);
    let mut engine = RenameEngine::start(model, options.engine_config())
        .await
        .map_err(|e| miette::miette!("{}", e))?;

    println!("Applying: {}", renames.display());
    for line in &lines {
        let outcome = engine.apply_line(line).await;
        println!("{:4} | {}", line.number, outcome);
    }

    let report = if options.dry_run {
        engine.finish_without_commit()
    } else {
        let target = options.output.as_deref().unwrap_or(project);
        engine.finish(JsonStore::new(target))
    };
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const PROJECT: &str = r#"{
        "name": "App",
        "namespaces": [
            { "name": "App", "types": [
                { "name": "Widget", "members": [
                    { "name": "Color", "kind": "property", "type": "string" },
                    { "name": "ColorProperty", "kind": "field", "type": "Xamarin.Forms.BindableProperty" }
                ] }
            ] }
        ]
    }"#;

    fn workspace(renames: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("project.json"), PROJECT).unwrap();
        fs::write(dir.path().join("renames.txt"), renames).unwrap();
        dir
    }

    fn load(path: &Path) -> symrename_model::Project {
        InMemoryModel::from_path(path).unwrap().project().clone()
    }

    #[tokio::test]
    async fn test_apply_writes_output() {
        let dir = workspace("T:App.Widget;Panel\nP:App.Widget.Color;Tint\n");
        let output = dir.path().join("out.json");
        let options = ApplyOptions {
            output: Some(output.clone()),
            ..Default::default()
        };

        let report = apply(
            &dir.path().join("project.json"),
            &dir.path().join("renames.txt"),
            &options,
        )
        .await
        .unwrap();
        assert!(report.committed());

        let written = load(&output);
        let panel = &written.namespaces[0].types[0];
        assert_eq!(panel.name, "Panel");
        assert_eq!(panel.members[0].name, "Tint");
        assert_eq!(panel.members[1].name, "TintProperty");
    }

    #[tokio::test]
    async fn test_dry_run_leaves_project_untouched() {
        let dir = workspace("T:App.Widget;Panel\n");
        let project = dir.path().join("project.json");
        let options = ApplyOptions {
            dry_run: true,
            ..Default::default()
        };

        let report = apply(&project, &dir.path().join("renames.txt"), &options)
            .await
            .unwrap();
        assert_eq!(report.commit, CommitStatus::NotAttempted);
        assert_eq!(report.summary().applied, 1);
        assert_eq!(fs::read_to_string(&project).unwrap(), PROJECT);
    }

    #[tokio::test]
    async fn test_backing_type_flag_overrides_markers() {
        let dir = workspace("P:App.Widget.Color;Tint\n");
        let options = ApplyOptions {
            dry_run: true,
            backing_types: vec!["DependencyProperty".to_string()],
            ..Default::default()
        };

        let report = apply(
            &dir.path().join("project.json"),
            &dir.path().join("renames.txt"),
            &options,
        )
        .await
        .unwrap();
        assert_eq!(report.summary().cascaded, 0);
    }

    #[test]
    fn test_engine_config_overrides() {
        let options = ApplyOptions {
            backing_types: vec!["Marker".to_string()],
            backing_suffix: Some("Field".to_string()),
            ..Default::default()
        };
        let config = options.engine_config();
        assert!(config.is_backing_field_type("Marker"));
        assert!(!config.is_backing_field_type("BindableProperty"));
        assert_eq!(config.backing_field_suffix, "Field");
    }
}
