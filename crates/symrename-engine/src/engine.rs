//! The rename engine.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::outcome::{CommitStatus, DirectiveReport, RenameOutcome, RenamedSymbol, RunReport};
use symrename_directive::{parse_source, DirectiveLine, RenameDirective};
use symrename_model::{ModelVersion, Persistence, ProgramModel, QualifiedName};
use symrename_resolver::{resolve_member, resolve_type, AliasTable};
use tracing::{debug, info, warn};

/// Applies rename directives one at a time against a program model.
///
/// The engine owns the active [`ModelVersion`] and the [`AliasTable`]. Every
/// successful rename replaces the active version; declarations are always
/// resolved against the active version, never reused across a rename.
pub struct RenameEngine<M> {
    model: M,
    config: EngineConfig,
    current: ModelVersion,
    aliases: AliasTable,
    reports: Vec<DirectiveReport>,
}

impl<M: ProgramModel> RenameEngine<M> {
    /// Compile the initial version of the program.
    pub async fn start(model: M, config: EngineConfig) -> Result<Self, EngineError> {
        let current = model
            .compile()
            .await
            .map_err(EngineError::SourceUnavailable)?;
        info!(
            "Loaded '{}': {} types, {} members",
            current.project_name(),
            current.type_count(),
            current.member_count()
        );

        Ok(Self {
            model,
            config,
            current,
            aliases: AliasTable::new(),
            reports: Vec::new(),
        })
    }

    /// The active model version.
    pub fn current(&self) -> &ModelVersion {
        &self.current
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Outcomes recorded so far, in directive order.
    pub fn reports(&self) -> &[DirectiveReport] {
        &self.reports
    }

    /// Parse a rename list and apply every recognized line in order.
    pub async fn apply_source(&mut self, source: &str) {
        for line in parse_source(source) {
            self.apply_line(&line).await;
        }
    }

    /// Apply one parsed line and record its outcome.
    pub async fn apply_line(&mut self, line: &DirectiveLine) -> &RenameOutcome {
        let outcome = match &line.parsed {
            Ok(directive) => self.apply(directive).await,
            Err(err) => {
                warn!("Invalid entry '{}' (line {}): {}", line.raw, line.number, err);
                RenameOutcome::SkippedMalformed {
                    raw_line: line.raw.clone(),
                    reason: err.to_string(),
                }
            }
        };

        self.reports.push(DirectiveReport {
            line: line.number,
            raw: line.raw.clone(),
            outcome,
        });
        let last = self.reports.len() - 1;
        &self.reports[last].outcome
    }

    /// Apply a single directive without recording it.
    pub async fn apply(&mut self, directive: &RenameDirective) -> RenameOutcome {
        match directive {
            RenameDirective::TypeRename { old_name, new_name } => {
                self.rename_type(old_name, new_name).await
            }
            RenameDirective::MemberRename {
                type_name,
                member_name,
                new_name,
            } => self.rename_member(type_name, member_name, new_name).await,
        }
    }

    async fn rename_type(&mut self, old_name: &QualifiedName, new_name: &str) -> RenameOutcome {
        let alias = match old_name.with_simple_name(new_name) {
            Ok(alias) => alias,
            Err(err) => return rejected(old_name.to_string(), err),
        };

        let Some(target) = resolve_type(old_name, self.current.root(), &self.aliases) else {
            warn!("Symbol {} not found", old_name);
            return RenameOutcome::SkippedUnresolved {
                qualified_name: old_name.to_string(),
            };
        };
        let Some(previous) = target.qualified_name() else {
            return RenameOutcome::SkippedUnresolved {
                qualified_name: old_name.to_string(),
            };
        };
        let to = match previous.with_simple_name(new_name) {
            Ok(to) => to,
            Err(err) => return rejected(old_name.to_string(), err),
        };

        info!("Renaming {} => {}", old_name, new_name);
        let next = match self.model.rename_symbol(target, new_name).await {
            Ok(next) => next,
            Err(err) => {
                warn!("Cannot rename {}: {}", old_name, err);
                return rejected(old_name.to_string(), err);
            }
        };
        self.current = next;
        self.aliases.record(old_name.clone(), &previous, alias);

        RenameOutcome::Applied {
            renamed: vec![RenamedSymbol { from: previous, to }],
            cascade_failure: None,
        }
    }

    async fn rename_member(
        &mut self,
        type_name: &QualifiedName,
        member_name: &str,
        new_name: &str,
    ) -> RenameOutcome {
        let full_name = format!("{type_name}.{member_name}");

        let Some(member) =
            resolve_member(type_name, member_name, self.current.root(), &self.aliases)
        else {
            warn!("Symbol {} not found", full_name);
            return RenameOutcome::SkippedUnresolved {
                qualified_name: full_name,
            };
        };
        let Some(previous) = member.qualified_name() else {
            return RenameOutcome::SkippedUnresolved {
                qualified_name: full_name,
            };
        };
        let to = match previous.with_simple_name(new_name) {
            Ok(to) => to,
            Err(err) => return rejected(full_name, err),
        };
        let is_property = member.is_property();

        info!("Renaming {} => {}", full_name, new_name);
        let next = match self.model.rename_symbol(member, new_name).await {
            Ok(next) => next,
            Err(err) => {
                warn!("Cannot rename {}: {}", full_name, err);
                return rejected(full_name, err);
            }
        };
        self.current = next;

        let mut renamed = vec![RenamedSymbol { from: previous, to }];
        let mut cascade_failure = None;
        if is_property {
            match self
                .rename_backing_field(type_name, member_name, new_name)
                .await
            {
                Ok(Some(field)) => renamed.push(field),
                Ok(None) => {}
                Err(reason) => {
                    warn!("Backing field of {} not renamed: {}", full_name, reason);
                    cascade_failure = Some(reason);
                }
            }
        }

        RenameOutcome::Applied {
            renamed,
            cascade_failure,
        }
    }

    /// Rename `<member><suffix>` to `<new_name><suffix>` when it is a field
    /// whose declared type is a recognized marker type.
    ///
    /// Runs against the version produced by the property rename. String
    /// literals inside the field's initializer that spell the old property
    /// name are left as they are.
    async fn rename_backing_field(
        &mut self,
        type_name: &QualifiedName,
        member_name: &str,
        new_name: &str,
    ) -> Result<Option<RenamedSymbol>, String> {
        let suffix = &self.config.backing_field_suffix;
        let field_name = format!("{member_name}{suffix}");
        let new_field_name = format!("{new_name}{suffix}");

        let Some(field) =
            resolve_member(type_name, &field_name, self.current.root(), &self.aliases)
        else {
            debug!("No backing field {}.{}", type_name, field_name);
            return Ok(None);
        };
        if !field.is_field() {
            debug!("{}.{} is not a field", type_name, field_name);
            return Ok(None);
        }
        let Some(marker) = field.declared_type() else {
            return Ok(None);
        };
        if !self.config.is_backing_field_type(marker.simple_name()) {
            debug!(
                "{}.{} has type {}, not a backing field marker",
                type_name,
                field_name,
                marker.full_name()
            );
            return Ok(None);
        }

        let Some(from) = field.qualified_name() else {
            return Ok(None);
        };
        let to = from
            .with_simple_name(&new_field_name)
            .map_err(|err| err.to_string())?;

        info!("Renaming {} => {}", from, new_field_name);
        let next = self
            .model
            .rename_symbol(field, &new_field_name)
            .await
            .map_err(|err| err.to_string())?;
        self.current = next;

        Ok(Some(RenamedSymbol { from, to }))
    }

    /// Commit the final version and return the run report.
    pub fn finish<P: Persistence>(self, mut store: P) -> RunReport {
        let commit = match store.commit(&self.current) {
            Ok(()) => CommitStatus::Committed,
            Err(err) => {
                warn!("Commit failed: {}", err);
                CommitStatus::Failed(err.to_string())
            }
        };
        self.into_report(commit)
    }

    /// Return the run report without committing.
    pub fn finish_without_commit(self) -> RunReport {
        self.into_report(CommitStatus::NotAttempted)
    }

    fn into_report(self, commit: CommitStatus) -> RunReport {
        RunReport {
            directives: self.reports,
            aliases: self.aliases,
            version: self.current.id(),
            commit,
        }
    }
}

fn rejected(qualified_name: String, err: impl std::fmt::Display) -> RenameOutcome {
    RenameOutcome::SkippedRejected {
        qualified_name,
        reason: err.to_string(),
    }
}
