use thiserror::Error;

/// Fatal per-entity build errors.
///
/// Contract violations and referential errors abort the entity that raised
/// them; the orchestrator records the failure and continues with the rest
/// of the phase.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("entity {entity} has no business keys")]
    EmptyBusinessKeys { entity: String },
    #[error("entity {entity} has no source tables")]
    EmptySourceTables { entity: String },
    #[error("link {entity} must relate at least two hubs")]
    TooFewRelatedHubs { entity: String },
    #[error("none of the source tables of {entity} appear in the catalog: {tables:?}")]
    UnknownSourceTables { entity: String, tables: Vec<String> },
    #[error("{entity} references non-existent hub: {hub}")]
    UnknownHub { entity: String, hub: String },
    #[error("{entity} references non-existent link: {link}")]
    UnknownLink { entity: String, link: String },
    #[error(
        "link {entity} contains business keys that don't belong to any related hub: {keys:?}"
    )]
    ExtraLinkKeys { entity: String, keys: Vec<String> },
}

/// Result type for per-entity build operations.
pub type Result<T> = std::result::Result<T, BuildError>;
