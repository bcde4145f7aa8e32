//! Data-access errors

use std::time::Duration;

use thiserror::Error;

/// Failure of a data-access operation.
///
/// Callers treat every variant the same way; the split only makes logs readable.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database operation exceeded its {0:?} deadline")]
    Timeout(Duration),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("row has {found} columns, expected {expected}")]
    ColumnCount { expected: usize, found: usize },

    #[error("failed to decode column `{column}`: {source}")]
    Column {
        column: &'static str,
        #[source]
        source: sqlx::Error,
    },
}
