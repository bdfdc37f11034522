use vaultspec_core::{
    CatalogIndex, DocumentMeta, EntityType, TargetLoadDocument, ValidationStatus,
};

use crate::config::BuildConfig;
use crate::errors::BuildError;
use crate::warnings::{render_warnings, Warning};

/// Target column name of the hash-diff column on satellites.
pub const HASH_DIFF_COLUMN: &str = "DV_HSH_DIFF";

/// Resolved physical source location of an entity.
#[derive(Debug, Clone)]
pub struct SourceRef {
    pub schema: String,
    pub table: String,
}

/// Shared document-shape logic used by all four builders: source schema
/// resolution, naming conventions, and the metadata block.
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    config: BuildConfig,
}

impl DocumentAssembler {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Resolve the source schema from the first listed source table found
    /// in the catalog. Fatal when no source table appears at all.
    pub fn resolve_source(
        &self,
        entity: &str,
        source_tables: &[String],
        catalog: &CatalogIndex<'_>,
    ) -> Result<SourceRef, BuildError> {
        for table in source_tables {
            if let Some(schema) = catalog.schema_of(table) {
                return Ok(SourceRef {
                    schema: schema.to_string(),
                    table: table.clone(),
                });
            }
        }
        Err(BuildError::UnknownSourceTables {
            entity: entity.to_string(),
            tables: source_tables.to_vec(),
        })
    }

    /// Target name of a hub/link/satellite hash-key column.
    pub fn hash_key_name(entity: &str) -> String {
        format!("DV_HKEY_{}", entity.to_uppercase())
    }

    /// Warn when an entity name misses the canonical prefix for its kind.
    pub fn check_name_prefix(kind: EntityType, name: &str) -> Option<Warning> {
        let expected = kind.prefix();
        if name.starts_with(expected) {
            None
        } else {
            Some(Warning::NamePrefix {
                entity: name.to_string(),
                expected: expected.to_string(),
            })
        }
    }

    /// Assemble the final document around the per-kind column list.
    pub fn assemble(
        &self,
        kind: EntityType,
        name: &str,
        source: SourceRef,
        parent_table: Option<String>,
        description: String,
        warnings: &[Warning],
        columns: Vec<vaultspec_core::ColumnSpec>,
    ) -> TargetLoadDocument {
        let status = if warnings.is_empty() {
            ValidationStatus::Valid
        } else {
            ValidationStatus::Warnings
        };
        TargetLoadDocument {
            source_schema: source.schema,
            source_table: source.table,
            target_schema: self.config.target_schema.clone(),
            target_table: name.to_uppercase(),
            target_entity_type: kind,
            parent_table,
            collision_code: self.config.collision_code.clone(),
            description,
            metadata: DocumentMeta {
                created_at: chrono::Utc::now(),
                version: self.config.version.clone(),
                validation_status: status,
                validation_warnings: render_warnings(warnings),
            },
            columns,
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultspec_core::{ColumnCatalog, ColumnCatalogEntry};

    fn catalog() -> ColumnCatalog {
        ColumnCatalog {
            entries: vec![ColumnCatalogEntry {
                schema: "SRC".to_string(),
                table: "ORDERS".to_string(),
                column: "ORDER_ID".to_string(),
                declared_type: "NUMBER".to_string(),
                length: None,
                nullable: false,
                description: String::new(),
            }],
        }
    }

    #[test]
    fn source_schema_comes_from_first_table_in_catalog() {
        let catalog = catalog();
        let index = catalog.index();
        let assembler = DocumentAssembler::new(BuildConfig::default());
        let source = assembler
            .resolve_source(
                "HUB_ORDER",
                &["MISSING".to_string(), "ORDERS".to_string()],
                &index,
            )
            .expect("source resolved");
        assert_eq!(source.schema, "SRC");
        assert_eq!(source.table, "ORDERS");
    }

    #[test]
    fn unknown_source_tables_are_fatal() {
        let catalog = catalog();
        let index = catalog.index();
        let assembler = DocumentAssembler::new(BuildConfig::default());
        let result = assembler.resolve_source("HUB_ORDER", &["NOWHERE".to_string()], &index);
        assert!(matches!(result, Err(BuildError::UnknownSourceTables { .. })));
    }

    #[test]
    fn hash_key_names_are_upper_cased() {
        assert_eq!(
            DocumentAssembler::hash_key_name("hub_customer"),
            "DV_HKEY_HUB_CUSTOMER"
        );
    }

    #[test]
    fn name_prefix_check_matches_kind() {
        assert!(DocumentAssembler::check_name_prefix(EntityType::Hub, "HUB_CUSTOMER").is_none());
        let warning = DocumentAssembler::check_name_prefix(EntityType::Sat, "CUSTOMER_PROFILE");
        assert!(matches!(warning, Some(Warning::NamePrefix { .. })));
    }
}
