//! Store error types

use thiserror::Error;

/// Errors surfaced by the document store.
///
/// `InvalidId` is raised before any driver call, so a malformed id from a
/// path parameter never reaches the database.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid document id: {0}")]
    InvalidId(String),

    #[error("failed to encode document: {0}")]
    Encode(#[from] bson::ser::Error),

    #[error(transparent)]
    Database(#[from] mongodb::error::Error),
}
