//! Transformation-and-validation engine for Data Vault 2.0 load
//! specifications.
//!
//! Consumes a classification model and a source column catalog, resolves
//! physical data types, composes multi-column hash keys, enforces Data
//! Vault naming and referential-consistency rules, and emits one target
//! load document per entity plus a run summary. Per-entity failures never
//! abort the batch.

pub mod assembler;
pub mod builders;
pub mod cache;
pub mod config;
pub mod errors;
pub mod keys;
pub mod orchestrator;
pub mod resolver;
pub mod warnings;

pub use assembler::DocumentAssembler;
pub use builders::{build_entity, BuildContext, EntityPolicy};
pub use cache::{HubMetadataCache, LinkMetadataCache};
pub use config::BuildConfig;
pub use errors::{BuildError, Result};
pub use keys::BusinessKeyValidator;
pub use orchestrator::{
    BatchOrchestrator, EntityOutcome, EntityTotals, OutcomeStatus, RunOutput, RunSummary,
};
pub use resolver::{DataTypeResolver, ResolvedType};
pub use warnings::Warning;
