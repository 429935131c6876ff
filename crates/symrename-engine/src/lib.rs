//! Rename engine for symrename.
//!
//! This crate orchestrates a rename run:
//! 1. Compile the initial program model
//! 2. For each directive, in order: resolve, rename, cascade to a property's
//!    backing field, and replace the active model version
//! 3. Commit the final version
//!
//! ## Example
//!
//! ```
//! use symrename_engine::{EngineConfig, RenameEngine};
//! use symrename_model::{InMemoryModel, MemoryStore};
//!
//! let model = InMemoryModel::from_json(
//!     r#"{ "name": "App", "namespaces": [ { "name": "App", "types": [ { "name": "Foo" } ] } ] }"#,
//! )
//! .unwrap();
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let report = runtime.block_on(async {
//!     let mut engine = RenameEngine::start(model, EngineConfig::default()).await.unwrap();
//!     engine.apply_source("T:App.Foo;Bar").await;
//!     engine.finish(MemoryStore::new())
//! });
//! assert!(report.committed());
//! assert_eq!(report.summary().applied, 1);
//! ```

mod config;
mod engine;
mod error;
mod outcome;

pub use config::{
    EngineConfig, EngineConfigBuilder, DEFAULT_BACKING_FIELD_SUFFIX, DEFAULT_BACKING_FIELD_TYPES,
};
pub use engine::RenameEngine;
pub use error::EngineError;
pub use outcome::{CommitStatus, DirectiveReport, RenameOutcome, RenamedSymbol, RunReport, Summary};
