use serde::{Deserialize, Serialize};

/// Options for the build engine, injected at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Version stamped into every document's metadata block.
    pub version: String,
    /// Target schema for all generated entities.
    pub target_schema: String,
    /// Collision code disambiguating business-key namespaces. Taken from
    /// configuration, never derived from entity names.
    pub collision_code: String,
    /// Length used for the bounded-string fallback type and for bounded
    /// string columns without a declared length.
    pub default_string_length: u32,
    /// Replace a dependent entity's business keys with its parent's when
    /// they diverge. Off by default; the mismatch is reported either way.
    pub auto_reconcile_keys: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            version: vaultspec_core::DOCUMENT_VERSION.to_string(),
            target_schema: "integration".to_string(),
            collision_code: "mdm".to_string(),
            default_string_length: 255,
            auto_reconcile_keys: false,
        }
    }
}
