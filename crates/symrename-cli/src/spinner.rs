//! Progress spinner around a program model.

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use symrename_model::{Decl, ModelError, ModelVersion, ProgramModel, RenameError};

const TICK: Duration = Duration::from_millis(50);

/// Shows a spinner on stderr while the wrapped model compiles or renames.
///
/// The spinner only observes; results pass through unchanged.
pub struct SpinnerModel<M> {
    inner: M,
    enabled: bool,
}

impl<M> SpinnerModel<M> {
    pub fn new(inner: M, enabled: bool) -> Self {
        Self { inner, enabled }
    }

    fn start(&self, message: String) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars("|/-\\ ")
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(message);
        pb.enable_steady_tick(TICK);
        pb
    }
}

#[async_trait]
impl<M: ProgramModel> ProgramModel for SpinnerModel<M> {
    async fn compile(&self) -> Result<ModelVersion, ModelError> {
        let pb = self.start("Loading project".to_string());
        let result = self.inner.compile().await;
        pb.finish_and_clear();
        result
    }

    async fn rename_symbol(
        &self,
        target: Decl<'_>,
        new_name: &str,
    ) -> Result<ModelVersion, RenameError> {
        let label = target
            .qualified_name()
            .map(|name| name.to_string())
            .unwrap_or_default();
        let pb = self.start(format!("Renaming {label} => {new_name}"));
        let result = self.inner.rename_symbol(target, new_name).await;
        pb.finish_and_clear();
        result
    }
}
