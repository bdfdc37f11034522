use std::fmt;

use serde::Serialize;

/// Structured consistency warning raised while building an entity.
///
/// Warnings never abort a build; they are rendered into the document's
/// metadata block and surfaced through the run summary.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A related hub has business keys the link does not carry.
    MissingHubKeys {
        link: String,
        hub: String,
        keys: Vec<String>,
    },
    /// The link carries no business key of a related hub.
    NoKeysFromHub { link: String, hub: String },
    /// A dependent entity is missing keys its parent declares.
    MissingParentKeys {
        entity: String,
        parent: String,
        keys: Vec<String>,
    },
    /// A dependent entity carries keys beyond its parent's.
    ExtraParentKeys {
        entity: String,
        parent: String,
        keys: Vec<String>,
    },
    /// The dependent's keys were replaced with the parent's
    /// (`auto_reconcile_keys`).
    ReconciledKeys { entity: String, parent: String },
    /// A column was absent from the catalog and fell back to the default
    /// bounded-string type.
    TypeFallback { column: String, dtype: String },
    /// The entity name does not carry the canonical prefix for its kind.
    NamePrefix { entity: String, expected: String },
    /// Descriptive attributes that repeat business keys; excluded from the
    /// descriptive column list so no source column is loaded twice.
    DescriptiveKeyOverlap { entity: String, columns: Vec<String> },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingHubKeys { link, hub, keys } => write!(
                f,
                "Link {link} is missing business keys from hub {hub}: {keys:?}"
            ),
            Warning::NoKeysFromHub { link, hub } => {
                write!(f, "Link {link} has no business keys from hub {hub}")
            }
            Warning::MissingParentKeys {
                entity,
                parent,
                keys,
            } => write!(
                f,
                "{entity} is missing business keys from parent {parent}: {keys:?}"
            ),
            Warning::ExtraParentKeys {
                entity,
                parent,
                keys,
            } => write!(
                f,
                "{entity} contains extra business keys not in parent {parent}: {keys:?}"
            ),
            Warning::ReconciledKeys { entity, parent } => write!(
                f,
                "{entity}: business keys replaced with those of parent {parent}"
            ),
            Warning::TypeFallback { column, dtype } => write!(
                f,
                "Column {column} not found in catalog, using default type {dtype}"
            ),
            Warning::NamePrefix { entity, expected } => {
                write!(f, "{entity}: name should start with '{expected}'")
            }
            Warning::DescriptiveKeyOverlap { entity, columns } => write!(
                f,
                "{entity}: descriptive attributes overlap business keys and were excluded: {columns:?}"
            ),
        }
    }
}

/// Render warnings into the prose list carried by document metadata.
pub fn render_warnings(warnings: &[Warning]) -> Option<Vec<String>> {
    if warnings.is_empty() {
        None
    } else {
        Some(warnings.iter().map(|warning| warning.to_string()).collect())
    }
}
