use thiserror::Error;

use super::DocumentStoreError;

#[derive(Debug, Error, PartialEq)]
pub enum SearchMetricsError {
    #[error("Failed to update search count")]
    StoreError(#[from] DocumentStoreError),
    #[error("Malformed search count document {0}")]
    MalformedDocument(String),
}
