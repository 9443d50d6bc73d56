//! Board identity resolution from a USB product id
//!
//! A board identity is the vendor:architecture:board-key triple derived from
//! the fixed-position segments of a matched path. The catalog shape this
//! assumes is `:<vendor>:<architecture>:<category>:<board-key>:...`; a
//! catalog that deviates from it is reported as malformed rather than
//! producing a truncated identity.

use serde::Serialize;
use serde_json::Value;

use crate::error::CatalogError;
use crate::navigate::navigate;
use crate::search::{find_by_token_and_value, PATH_DELIMITER};

/// Number of path segments (including the leading empty root segment) that
/// make up a board record's address.
const BOARD_PATH_SEGMENTS: usize = 5;

/// A successfully resolved board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedBoard {
    /// vendor:architecture:board-key triple.
    pub identity: String,
    /// Human-readable board name from the catalog.
    pub display_name: String,
    /// Serialized path of the board record, usable with
    /// [`crate::Catalog::board_params`].
    pub path: String,
}

/// Resolve a product id to a board identity and display name.
///
/// The product id is compared as its canonical catalog string form, exactly
/// and case-sensitively; callers normalize numeric USB ids before querying.
/// An unknown id is a legitimate outcome and returns `Ok(None)`. When more
/// than one board shares the id, the first match in collector order wins;
/// that order is the catalog document's insertion order, deterministic per
/// loaded catalog instance but not otherwise specified.
pub fn resolve_by_product_id(
    tree: &Value,
    product_id: &str,
) -> Result<Option<ResolvedBoard>, CatalogError> {
    let (matches, found) = find_by_token_and_value(tree, "pid", product_id);
    if !found {
        return Ok(None);
    }

    let first = &matches[0];
    let segments: Vec<&str> = first.path.split(PATH_DELIMITER).collect();
    if segments.len() < BOARD_PATH_SEGMENTS {
        return Err(CatalogError::MalformedCatalog(format!(
            "product id {} matched at {:?}, which is too shallow for a board record",
            product_id, first.path
        )));
    }
    let segments = &segments[..BOARD_PATH_SEGMENTS];

    let identity = format!(
        "{}{PATH_DELIMITER}{}{PATH_DELIMITER}{}",
        segments[1], segments[2], segments[4]
    );
    let board_path = segments.join(&PATH_DELIMITER.to_string());

    let mut name_keys = segments.to_vec();
    name_keys.push("name");
    let display_name = match navigate(tree, &name_keys) {
        Ok(Value::String(name)) => name.clone(),
        Ok(_) => {
            return Err(CatalogError::MalformedCatalog(format!(
                "board {identity} has a non-string name entry"
            )))
        }
        Err(err) => {
            return Err(CatalogError::MalformedCatalog(format!(
                "board {identity} is missing a name entry: {err}"
            )))
        }
    };

    Ok(Some(ResolvedBoard {
        identity,
        display_name,
        path: board_path,
    }))
}
