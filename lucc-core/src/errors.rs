use thiserror::Error;

/// Error type for invalid operations.
///
/// Every variant is fatal to the period being processed: errors are never
/// downgraded to warnings and no step is retried.
#[derive(Error, Debug)]
pub enum LuccError {
    /// A required input reference is missing or does not exist.
    #[error("missing required input: {0}")]
    Config(String),
    /// The lookup table source is missing a required column or key column.
    #[error("lookup table schema error: {0}")]
    Schema(String),
    /// A raster contains a class code with no entry in a required lookup table.
    #[error("class code {code} has no entry in lookup table '{table}'")]
    Lookup { code: i32, table: String },
    /// Rasters participating in one arithmetic step are not the same shape.
    #[error("raster shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// A period's end year does not come after its start year.
    #[error("invalid period: end year {end_year} must be after start year {start_year}")]
    InvalidPeriod { start_year: i32, end_year: i32 },
    /// Read or write failure on a raster or table source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A raster artifact could not be encoded or decoded.
    #[error("raster serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

/// Convenience type for `Result<T, LuccError>`.
pub type LuccResult<T> = Result<T, LuccError>;
