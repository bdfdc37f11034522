use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Data Vault entity kind; the serialized values are fixed downstream
/// vocabulary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Hub,
    Lnk,
    Sat,
    Lsat,
}

impl EntityType {
    /// Canonical name prefix for entities of this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            EntityType::Hub => "HUB_",
            EntityType::Lnk => "LNK_",
            EntityType::Sat => "SAT_",
            EntityType::Lsat => "LSAT_",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Hub => "hub",
            EntityType::Lnk => "lnk",
            EntityType::Sat => "sat",
            EntityType::Lsat => "lsat",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a target column within the load; fixed downstream vocabulary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum KeyType {
    HashKeyHub,
    HashKeyLnk,
    HashKeySat,
    HashKeyLsat,
    BizKey,
    HashDiff,
    Descriptive,
}

/// A single source column reference with its resolved type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct SourceColumn {
    pub name: String,
    pub dtype: String,
}

/// Source mapping for a target column: one column or an ordered composite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(untagged)]
pub enum ColumnSource {
    Single(SourceColumn),
    Composite(Vec<SourceColumn>),
}

/// One column of a target load document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct ColumnSpec {
    /// Target column name, upper-cased.
    pub target: String,
    pub dtype: String,
    pub key_type: KeyType,
    /// Owning entity for a hub/link hash key embedded in a dependent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// `None` for keys derived entirely at load time.
    pub source: Option<ColumnSource>,
}

/// Validation outcome recorded in the document metadata block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Valid,
    Warnings,
}

/// Metadata block stamped on every target load document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentMeta {
    pub created_at: DateTime<Utc>,
    pub version: String,
    pub validation_status: ValidationStatus,
    pub validation_warnings: Option<Vec<String>>,
}

/// Fully-specified load document for one Data Vault entity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TargetLoadDocument {
    pub source_schema: String,
    pub source_table: String,
    pub target_schema: String,
    pub target_table: String,
    pub target_entity_type: EntityType,
    /// Parent hub/link name; present for satellites and link satellites.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_table: Option<String>,
    pub collision_code: String,
    pub description: String,
    pub metadata: DocumentMeta,
    pub columns: Vec<ColumnSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_type_uses_downstream_vocabulary() {
        let json = serde_json::to_string(&KeyType::HashKeyLnk).expect("serialize");
        assert_eq!(json, "\"hash_key_lnk\"");
        let json = serde_json::to_string(&KeyType::BizKey).expect("serialize");
        assert_eq!(json, "\"biz_key\"");
        let json = serde_json::to_string(&EntityType::Lsat).expect("serialize");
        assert_eq!(json, "\"lsat\"");
    }

    #[test]
    fn column_source_serializes_single_and_composite() {
        let single = ColumnSource::Single(SourceColumn {
            name: "CUSTOMER_ID".to_string(),
            dtype: "NUMBER".to_string(),
        });
        let value = serde_json::to_value(&single).expect("serialize");
        assert_eq!(value["name"], "CUSTOMER_ID");

        let composite = ColumnSource::Composite(vec![SourceColumn {
            name: "ORDER_ID".to_string(),
            dtype: "NUMBER".to_string(),
        }]);
        let value = serde_json::to_value(&composite).expect("serialize");
        assert!(value.is_array());
    }

    #[test]
    fn absent_source_serializes_as_null() {
        let spec = ColumnSpec {
            target: "DV_HSH_DIFF".to_string(),
            dtype: "raw".to_string(),
            key_type: KeyType::HashDiff,
            parent: None,
            source: None,
        };
        let value = serde_json::to_value(&spec).expect("serialize");
        assert!(value["source"].is_null());
        assert!(value.get("parent").is_none());
    }
}
