use thiserror::Error;

/// Core error type shared across Vaultspec crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The column catalog is malformed or missing required columns.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    /// CSV decoding failure while reading the catalog.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    /// I/O failure while reading inputs.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results returned by Vaultspec crates.
pub type Result<T> = std::result::Result<T, Error>;
