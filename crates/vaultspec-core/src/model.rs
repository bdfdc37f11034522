use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Classification model for one run: the full set of Data Vault entities
/// produced by the upstream classifier. Read-only from the engine's point
/// of view.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ClassificationModel {
    #[serde(default)]
    pub hubs: Vec<Hub>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub satellites: Vec<Satellite>,
    #[serde(default)]
    pub link_satellites: Vec<LinkSatellite>,
}

/// A business object keyed by one or more business keys.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Hub {
    /// Entity name in the form `HUB_<business_object>`.
    pub name: String,
    /// Ordered business key column names; must be non-empty.
    pub business_keys: Vec<String>,
    /// Source tables contributing to this hub; must be non-empty.
    pub source_tables: Vec<String>,
    pub description: String,
}

/// A relationship between two or more hubs.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Link {
    /// Entity name in the form `LNK_<relationship>`.
    pub name: String,
    /// Names of the related hubs; at least two.
    pub related_hubs: Vec<String>,
    /// Business keys, expected to equal the union of the related hubs' keys.
    pub business_keys: Vec<String>,
    pub source_tables: Vec<String>,
    pub description: String,
}

/// Descriptive attributes for a hub.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Satellite {
    /// Entity name in the form `SAT_<business_object>_<description>`.
    pub name: String,
    /// Parent hub name.
    pub hub: String,
    /// Business keys, expected to equal the parent hub's keys.
    pub business_keys: Vec<String>,
    pub source_table: String,
    /// Descriptive columns; disjoint from `business_keys`.
    pub descriptive_attrs: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Descriptive attributes for a link.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LinkSatellite {
    /// Entity name in the form `LSAT_<relationship>_<description>`.
    pub name: String,
    /// Parent link name.
    pub link: String,
    /// Business keys, expected to equal the parent link's keys.
    pub business_keys: Vec<String>,
    pub source_table: String,
    pub descriptive_attrs: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}
