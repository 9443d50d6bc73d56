//! Error types for catalog loading, navigation, and resolution

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Catalog root is not an object")]
    NotAnObject,
    #[error("Malformed path at key {key:?}: {reason}")]
    MalformedPath { key: String, reason: String },
    #[error("Malformed catalog: {0}")]
    MalformedCatalog(String),
}
