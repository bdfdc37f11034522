use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const REQUIRED_HEADERS: [&str; 7] = [
    "SCHEMA_NAME",
    "TABLE_NAME",
    "COLUMN_NAME",
    "DATA_TYPE",
    "LENGTH",
    "NULLABLE",
    "DESCRIPTION",
];

/// One physical source column as described by the source system catalog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ColumnCatalogEntry {
    pub schema: String,
    pub table: String,
    pub column: String,
    /// Declared type as found in the catalog (e.g. `VARCHAR2`, `NUMBER`).
    pub declared_type: String,
    /// Declared length; `None` when the catalog carried a placeholder.
    pub length: Option<String>,
    pub nullable: bool,
    pub description: String,
}

/// Full source column catalog, loaded once per run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnCatalog {
    pub entries: Vec<ColumnCatalogEntry>,
}

impl ColumnCatalog {
    /// Read a catalog from CSV with the required header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut positions = HashMap::new();
        for (idx, header) in headers.iter().enumerate() {
            positions.insert(header.to_uppercase(), idx);
        }
        for required in REQUIRED_HEADERS {
            if !positions.contains_key(required) {
                return Err(Error::InvalidCatalog(format!(
                    "missing required column: {required}"
                )));
            }
        }

        let field = |record: &csv::StringRecord, name: &str| -> String {
            positions
                .get(name)
                .and_then(|idx| record.get(*idx))
                .unwrap_or_default()
                .to_string()
        };

        let mut entries = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            entries.push(ColumnCatalogEntry {
                schema: field(&record, "SCHEMA_NAME"),
                table: field(&record, "TABLE_NAME"),
                column: field(&record, "COLUMN_NAME"),
                declared_type: field(&record, "DATA_TYPE"),
                length: parse_length(&field(&record, "LENGTH")),
                nullable: parse_nullable(&field(&record, "NULLABLE")),
                description: field(&record, "DESCRIPTION"),
            });
        }

        Ok(Self { entries })
    }

    /// Read a catalog CSV from disk.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Build the lookup index over this catalog.
    pub fn index(&self) -> CatalogIndex<'_> {
        CatalogIndex::new(&self.entries)
    }
}

/// O(1) lookup of catalog entries by (table, column).
///
/// The catalog is expected deduplicated; when duplicate rows exist the
/// first one wins.
#[derive(Debug)]
pub struct CatalogIndex<'a> {
    columns: HashMap<(&'a str, &'a str), &'a ColumnCatalogEntry>,
    table_schemas: HashMap<&'a str, &'a str>,
}

impl<'a> CatalogIndex<'a> {
    pub fn new(entries: &'a [ColumnCatalogEntry]) -> Self {
        let mut columns = HashMap::new();
        let mut table_schemas = HashMap::new();
        for entry in entries {
            columns
                .entry((entry.table.as_str(), entry.column.as_str()))
                .or_insert(entry);
            table_schemas
                .entry(entry.table.as_str())
                .or_insert(entry.schema.as_str());
        }
        Self {
            columns,
            table_schemas,
        }
    }

    /// Look up one source column by table and column name.
    pub fn lookup(&self, table: &str, column: &str) -> Option<&'a ColumnCatalogEntry> {
        self.columns.get(&(table, column)).copied()
    }

    /// Schema of the given table, when the table appears in the catalog.
    pub fn schema_of(&self, table: &str) -> Option<&'a str> {
        self.table_schemas.get(table).copied()
    }

    pub fn contains_table(&self, table: &str) -> bool {
        self.table_schemas.contains_key(table)
    }
}

/// Normalize the catalog `LENGTH` field; placeholders mean "unspecified".
fn parse_length(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_nullable(raw: &str) -> bool {
    !raw.trim().eq_ignore_ascii_case("N")
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_CSV: &str = "\
SCHEMA_NAME,TABLE_NAME,COLUMN_NAME,DATA_TYPE,LENGTH,NULLABLE,DESCRIPTION
SRC,CUSTOMERS,CUSTOMER_ID,NUMBER,-,N,Customer identifier
SRC,CUSTOMERS,CUSTOMER_NAME,VARCHAR2,50,Y,Customer display name
SRC,ORDERS,ORDER_ID,NUMBER,,N,Order identifier
";

    #[test]
    fn reads_catalog_and_normalizes_placeholders() {
        let catalog = ColumnCatalog::from_reader(CATALOG_CSV.as_bytes()).expect("parse catalog");
        assert_eq!(catalog.entries.len(), 3);

        let index = catalog.index();
        let id = index.lookup("CUSTOMERS", "CUSTOMER_ID").expect("entry");
        assert_eq!(id.declared_type, "NUMBER");
        assert_eq!(id.length, None);
        assert!(!id.nullable);

        let name = index.lookup("CUSTOMERS", "CUSTOMER_NAME").expect("entry");
        assert_eq!(name.length.as_deref(), Some("50"));
        assert!(name.nullable);

        assert_eq!(index.schema_of("ORDERS"), Some("SRC"));
        assert!(index.lookup("CUSTOMERS", "MISSING").is_none());
        assert!(!index.contains_table("UNKNOWN"));
    }

    #[test]
    fn rejects_catalog_missing_required_headers() {
        let csv = "SCHEMA_NAME,TABLE_NAME,COLUMN_NAME\nSRC,T,C\n";
        let result = ColumnCatalog::from_reader(csv.as_bytes());
        assert!(matches!(result, Err(Error::InvalidCatalog(_))));
    }

    #[test]
    fn first_duplicate_row_wins() {
        let csv = "\
SCHEMA_NAME,TABLE_NAME,COLUMN_NAME,DATA_TYPE,LENGTH,NULLABLE,DESCRIPTION
SRC,T,C,NUMBER,-,N,first
OTHER,T,C,VARCHAR2,10,Y,second
";
        let catalog = ColumnCatalog::from_reader(csv.as_bytes()).expect("parse catalog");
        let index = catalog.index();
        let entry = index.lookup("T", "C").expect("entry");
        assert_eq!(entry.declared_type, "NUMBER");
        assert_eq!(index.schema_of("T"), Some("SRC"));
    }
}
