//! Dataset error types.

use thiserror::Error;

/// Result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Errors that can occur while evaluating ledger data against a recipe.
///
/// Parsing itself never fails: malformed CSV rows are dropped, so the only
/// error source is a recipe whose parameters cannot be interpreted.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("recipe parameter missing or invalid: {0}")]
    Recipe(String),
}
