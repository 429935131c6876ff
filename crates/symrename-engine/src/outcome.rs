//! Per-directive outcomes and the run report.

use std::fmt;
use symrename_model::{QualifiedName, VersionId};
use symrename_resolver::AliasTable;

/// One declaration renamed by a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedSymbol {
    pub from: QualifiedName,
    pub to: QualifiedName,
}

impl fmt::Display for RenamedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.from, self.to)
    }
}

/// What happened to one directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The rename was applied. The primary rename comes first, followed by a
    /// cascaded backing field rename if there was one.
    Applied {
        renamed: Vec<RenamedSymbol>,
        /// Why a detected backing field could not be renamed.
        cascade_failure: Option<String>,
    },
    /// The directive was structurally invalid; the model was not touched.
    SkippedMalformed { raw_line: String, reason: String },
    /// No declaration matched the directive's name.
    SkippedUnresolved { qualified_name: String },
    /// The model rejected the rename (name collision, invalid name).
    SkippedRejected {
        qualified_name: String,
        reason: String,
    },
}

impl RenameOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, RenameOutcome::Applied { .. })
    }

    /// New qualified names of every renamed declaration.
    pub fn affected_names(&self) -> Vec<&QualifiedName> {
        match self {
            RenameOutcome::Applied { renamed, .. } => renamed.iter().map(|r| &r.to).collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for RenameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenameOutcome::Applied {
                renamed,
                cascade_failure,
            } => {
                let names: Vec<String> = renamed.iter().map(|r| r.to_string()).collect();
                write!(f, "renamed {}", names.join(", "))?;
                if let Some(reason) = cascade_failure {
                    write!(f, " (backing field not renamed: {reason})")?;
                }
                Ok(())
            }
            RenameOutcome::SkippedMalformed { reason, .. } => write!(f, "invalid entry: {reason}"),
            RenameOutcome::SkippedUnresolved { qualified_name } => {
                write!(f, "symbol {qualified_name} not found")
            }
            RenameOutcome::SkippedRejected {
                qualified_name,
                reason,
            } => write!(f, "cannot rename {qualified_name}: {reason}"),
        }
    }
}

/// Outcome of one directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveReport {
    /// 1-based line number in the rename list
    pub line: usize,
    /// The line as written
    pub raw: String,
    pub outcome: RenameOutcome,
}

/// Result of the final commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitStatus {
    Committed,
    Failed(String),
    /// Dry run: the final version was not handed to persistence.
    NotAttempted,
}

/// Counts of outcomes by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub applied: usize,
    pub cascaded: usize,
    pub malformed: usize,
    pub unresolved: usize,
    pub rejected: usize,
}

impl Summary {
    pub fn skipped(&self) -> usize {
        self.malformed + self.unresolved + self.rejected
    }
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Outcomes in directive order
    pub directives: Vec<DirectiveReport>,
    /// Type renames recorded during the run
    pub aliases: AliasTable,
    /// Version that was (or would have been) committed
    pub version: VersionId,
    pub commit: CommitStatus,
}

impl RunReport {
    pub fn committed(&self) -> bool {
        self.commit == CommitStatus::Committed
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for report in &self.directives {
            match &report.outcome {
                RenameOutcome::Applied { renamed, .. } => {
                    summary.applied += 1;
                    summary.cascaded += renamed.len().saturating_sub(1);
                }
                RenameOutcome::SkippedMalformed { .. } => summary.malformed += 1,
                RenameOutcome::SkippedUnresolved { .. } => summary.unresolved += 1,
                RenameOutcome::SkippedRejected { .. } => summary.rejected += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renamed(from: &str, to: &str) -> RenamedSymbol {
        RenamedSymbol {
            from: QualifiedName::parse(from).unwrap(),
            to: QualifiedName::parse(to).unwrap(),
        }
    }

    #[test]
    fn test_outcome_display() {
        let applied = RenameOutcome::Applied {
            renamed: vec![
                renamed("App.Widget.Color", "App.Widget.Tint"),
                renamed("App.Widget.ColorProperty", "App.Widget.TintProperty"),
            ],
            cascade_failure: None,
        };
        assert_eq!(
            applied.to_string(),
            "renamed App.Widget.Color => App.Widget.Tint, App.Widget.ColorProperty => App.Widget.TintProperty"
        );

        let unresolved = RenameOutcome::SkippedUnresolved {
            qualified_name: "App.Ghost".into(),
        };
        assert_eq!(unresolved.to_string(), "symbol App.Ghost not found");
    }

    #[test]
    fn test_summary_counts() {
        let report = RunReport {
            directives: vec![
                DirectiveReport {
                    line: 1,
                    raw: "P:App.Widget.Color;Tint".into(),
                    outcome: RenameOutcome::Applied {
                        renamed: vec![
                            renamed("App.Widget.Color", "App.Widget.Tint"),
                            renamed("App.Widget.ColorProperty", "App.Widget.TintProperty"),
                        ],
                        cascade_failure: None,
                    },
                },
                DirectiveReport {
                    line: 2,
                    raw: "T:App.Foo".into(),
                    outcome: RenameOutcome::SkippedMalformed {
                        raw_line: "T:App.Foo".into(),
                        reason: "expected 2 ';'-separated fields, found 1".into(),
                    },
                },
            ],
            aliases: AliasTable::new(),
            version: symrename_model::VersionId::fresh(),
            commit: CommitStatus::NotAttempted,
        };

        let summary = report.summary();
        assert_eq!(summary.applied, 1);
        assert_eq!(summary.cascaded, 1);
        assert_eq!(summary.malformed, 1);
        assert_eq!(summary.skipped(), 1);
        assert!(!report.committed());
    }
}
