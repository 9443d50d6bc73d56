//! Catalog loading and the query facade
//!
//! A [`Catalog`] owns one immutable deserialized boards document. Reloading
//! means constructing a fresh `Catalog`; queries against an older instance
//! keep observing the older data. All queries are pure reads, so a shared
//! reference can be used from any number of threads without locking.

use serde_json::Value;
use std::path::Path;
use tracing::info;

use crate::board::BoardParams;
use crate::error::CatalogError;
use crate::identity::{resolve_by_product_id, ResolvedBoard};
use crate::navigate::navigate;
use crate::search::{self, PropertyMatch, PATH_DELIMITER};

/// An immutable board catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: Value,
}

impl Catalog {
    /// Parse a catalog from a JSON document. The root must be an object
    /// keyed by vendor name.
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let root: Value = serde_json::from_str(content)?;
        if !root.is_object() {
            return Err(CatalogError::NotAnObject);
        }
        Ok(Self { root })
    }

    /// Load a catalog from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            vendors = catalog.vendor_count(),
            "Loaded board catalog"
        );
        Ok(catalog)
    }

    /// The raw catalog tree.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Number of top-level vendor entries.
    pub fn vendor_count(&self) -> usize {
        self.root.as_object().map(|m| m.len()).unwrap_or(0)
    }

    /// All leaves whose path contains `token`.
    pub fn find_by_token(&self, token: &str) -> Vec<PropertyMatch> {
        search::find_by_token(&self.root, token)
    }

    /// All leaves whose path contains `token` and whose value equals
    /// `expected`.
    pub fn find_by_token_and_value(
        &self,
        token: &str,
        expected: &str,
    ) -> (Vec<PropertyMatch>, bool) {
        search::find_by_token_and_value(&self.root, token, expected)
    }

    /// All product-id leaves.
    pub fn find_product_ids(&self) -> Vec<PropertyMatch> {
        search::find_product_ids(&self.root)
    }

    /// All vendor-id leaves.
    pub fn find_vendor_ids(&self) -> Vec<PropertyMatch> {
        search::find_vendor_ids(&self.root)
    }

    /// Walk an explicit key sequence from the root.
    pub fn navigate(&self, keys: &[&str]) -> Result<&Value, CatalogError> {
        navigate(&self.root, keys)
    }

    /// Resolve a product id to a board identity and display name.
    pub fn resolve_by_product_id(
        &self,
        product_id: &str,
    ) -> Result<Option<ResolvedBoard>, CatalogError> {
        resolve_by_product_id(&self.root, product_id)
    }

    /// Find the record path for a vendor:architecture:board-key identity.
    ///
    /// An identity omits the category segment, so every category under the
    /// architecture is checked in document order and the first one holding
    /// the board key wins, consistent with resolver tie-breaking. An
    /// unknown identity returns `Ok(None)`; an identity that is not a
    /// three-part triple is a malformed path.
    pub fn board_path(&self, identity: &str) -> Result<Option<String>, CatalogError> {
        let parts: Vec<&str> = identity.split(PATH_DELIMITER).collect();
        let [vendor, architecture, board_key] = parts[..] else {
            return Err(CatalogError::MalformedPath {
                key: identity.to_string(),
                reason: "identity must be vendor:architecture:board-key".to_string(),
            });
        };
        let categories = match navigate(&self.root, &[vendor, architecture]) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => return Ok(None),
        };
        for (category, node) in categories {
            if let Value::Object(boards) = node {
                if matches!(boards.get(board_key), Some(Value::Object(_))) {
                    return Ok(Some(format!(
                        "{PATH_DELIMITER}{vendor}{PATH_DELIMITER}{architecture}\
                         {PATH_DELIMITER}{category}{PATH_DELIMITER}{board_key}"
                    )));
                }
            }
        }
        Ok(None)
    }

    /// Fetch the typed parameter record at a board path (the `path` of a
    /// [`ResolvedBoard`]).
    pub fn board_params(&self, board_path: &str) -> Result<BoardParams, CatalogError> {
        let keys: Vec<&str> = board_path.split(PATH_DELIMITER).collect();
        let node = navigate(&self.root, &keys)?;
        match node {
            Value::Object(_) => {
                serde_json::from_value(node.clone()).map_err(CatalogError::Json)
            }
            _ => Err(CatalogError::MalformedCatalog(format!(
                "expected a board record at {board_path:?}, found a leaf"
            ))),
        }
    }
}
