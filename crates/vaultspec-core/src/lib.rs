//! Core contracts for Vaultspec.
//!
//! This crate defines the canonical input types (classification model,
//! column catalog) and output types (target load documents) shared by the
//! build engine and the CLI.

pub mod catalog;
pub mod document;
pub mod error;
pub mod model;

pub use catalog::{CatalogIndex, ColumnCatalog, ColumnCatalogEntry};
pub use document::{
    ColumnSource, ColumnSpec, DocumentMeta, EntityType, KeyType, SourceColumn,
    TargetLoadDocument, ValidationStatus,
};
pub use error::{Error, Result};
pub use model::{ClassificationModel, Hub, Link, LinkSatellite, Satellite};

/// Current contract version stamped into document metadata.
pub const DOCUMENT_VERSION: &str = "1.0.0";
