use std::collections::BTreeMap;

use vaultspec_core::CatalogIndex;

use crate::warnings::Warning;

/// Declared types formatted with an explicit length.
const BOUNDED_STRING_TYPES: [&str; 6] =
    ["STRING", "VARCHAR", "VARCHAR2", "NVARCHAR2", "CHAR", "NCHAR"];

/// Outcome of resolving one column against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Normalized target type expression, e.g. `VARCHAR2(50)` or `NUMBER`.
    pub dtype: String,
    /// True when the column was absent and the configured default applied.
    pub fallback: bool,
}

/// Pure mapping from catalog entries to normalized target type expressions.
///
/// Unknown columns resolve to the configured default bounded-string type;
/// the caller decides how to surface the fallback.
#[derive(Debug)]
pub struct DataTypeResolver<'a> {
    index: &'a CatalogIndex<'a>,
    default_length: u32,
}

impl<'a> DataTypeResolver<'a> {
    pub fn new(index: &'a CatalogIndex<'a>, default_length: u32) -> Self {
        Self {
            index,
            default_length,
        }
    }

    /// Resolve one column within one table.
    pub fn resolve(&self, table: &str, column: &str) -> ResolvedType {
        match self.index.lookup(table, column) {
            Some(entry) => ResolvedType {
                dtype: self.format_type(&entry.declared_type, entry.length.as_deref()),
                fallback: false,
            },
            None => ResolvedType {
                dtype: self.default_type(),
                fallback: true,
            },
        }
    }

    /// Resolve one column against an ordered list of candidate tables;
    /// the first table containing the column wins.
    pub fn resolve_any(&self, tables: &[String], column: &str) -> ResolvedType {
        for table in tables {
            if let Some(entry) = self.index.lookup(table, column) {
                return ResolvedType {
                    dtype: self.format_type(&entry.declared_type, entry.length.as_deref()),
                    fallback: false,
                };
            }
        }
        ResolvedType {
            dtype: self.default_type(),
            fallback: true,
        }
    }

    /// Resolve a set of columns, collecting a fallback warning per column
    /// that was absent from the catalog.
    pub fn resolve_all(
        &self,
        tables: &[String],
        columns: &[String],
    ) -> (BTreeMap<String, String>, Vec<Warning>) {
        let mut types = BTreeMap::new();
        let mut warnings = Vec::new();
        for column in columns {
            let resolved = self.resolve_any(tables, column);
            if resolved.fallback {
                warnings.push(Warning::TypeFallback {
                    column: column.clone(),
                    dtype: resolved.dtype.clone(),
                });
            }
            types.insert(column.clone(), resolved.dtype);
        }
        (types, warnings)
    }

    fn default_type(&self) -> String {
        format!("STRING({})", self.default_length)
    }

    fn format_type(&self, declared: &str, length: Option<&str>) -> String {
        let normalized = declared.trim().to_uppercase();
        if BOUNDED_STRING_TYPES.contains(&normalized.as_str()) {
            let length = length
                .map(str::to_string)
                .unwrap_or_else(|| self.default_length.to_string());
            format!("{normalized}({length})")
        } else {
            normalized
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultspec_core::{ColumnCatalog, ColumnCatalogEntry};

    fn entry(table: &str, column: &str, dtype: &str, length: Option<&str>) -> ColumnCatalogEntry {
        ColumnCatalogEntry {
            schema: "SRC".to_string(),
            table: table.to_string(),
            column: column.to_string(),
            declared_type: dtype.to_string(),
            length: length.map(str::to_string),
            nullable: true,
            description: String::new(),
        }
    }

    fn catalog() -> ColumnCatalog {
        ColumnCatalog {
            entries: vec![
                entry("CUSTOMERS", "CUSTOMER_ID", "NUMBER", None),
                entry("CUSTOMERS", "CUSTOMER_NAME", "STRING", Some("50")),
                entry("CUSTOMERS", "NOTES", "VARCHAR2", None),
                entry("ORDERS", "ORDER_DATE", "date", None),
            ],
        }
    }

    #[test]
    fn bounded_string_gets_catalog_length() {
        let catalog = catalog();
        let index = catalog.index();
        let resolver = DataTypeResolver::new(&index, 255);
        let resolved = resolver.resolve("CUSTOMERS", "CUSTOMER_NAME");
        assert_eq!(resolved.dtype, "STRING(50)");
        assert!(!resolved.fallback);
    }

    #[test]
    fn bounded_string_without_length_gets_default() {
        let catalog = catalog();
        let index = catalog.index();
        let resolver = DataTypeResolver::new(&index, 255);
        assert_eq!(resolver.resolve("CUSTOMERS", "NOTES").dtype, "VARCHAR2(255)");
    }

    #[test]
    fn other_types_pass_through_upper_cased() {
        let catalog = catalog();
        let index = catalog.index();
        let resolver = DataTypeResolver::new(&index, 255);
        assert_eq!(resolver.resolve("CUSTOMERS", "CUSTOMER_ID").dtype, "NUMBER");
        assert_eq!(resolver.resolve("ORDERS", "ORDER_DATE").dtype, "DATE");
    }

    #[test]
    fn unknown_column_falls_back_deterministically() {
        let catalog = catalog();
        let index = catalog.index();
        let resolver = DataTypeResolver::new(&index, 100);
        let first = resolver.resolve("CUSTOMERS", "MISSING");
        let second = resolver.resolve("CUSTOMERS", "MISSING");
        assert_eq!(first, second);
        assert_eq!(first.dtype, "STRING(100)");
        assert!(first.fallback);
    }

    #[test]
    fn resolve_all_reports_one_warning_per_missing_column() {
        let catalog = catalog();
        let index = catalog.index();
        let resolver = DataTypeResolver::new(&index, 255);
        let tables = vec!["CUSTOMERS".to_string()];
        let columns = vec!["CUSTOMER_ID".to_string(), "MISSING".to_string()];
        let (types, warnings) = resolver.resolve_all(&tables, &columns);
        assert_eq!(types["CUSTOMER_ID"], "NUMBER");
        assert_eq!(types["MISSING"], "STRING(255)");
        assert_eq!(warnings.len(), 1);
        assert!(matches!(&warnings[0], Warning::TypeFallback { column, .. } if column == "MISSING"));
    }
}
