//! Path navigation: walk an explicit key sequence from the catalog root
//!
//! Navigation is dual-mode by design. Callers use it both to fetch a single
//! scalar attribute (a board's display name) and to fetch an entire
//! sub-record (the board's whole table), so the return value is the raw
//! node reached, leaf or object.

use serde_json::Value;

use crate::error::CatalogError;

/// Walk `keys` in order from `tree`.
///
/// - A string child at the current key is returned immediately; any
///   remaining keys are ignored.
/// - An empty-string key is a no-op (stay at the current node).
/// - Otherwise the walk descends into the object child at the key. A
///   missing key, or a child that is not an object, is a malformed path.
///
/// Exhausting the keys without hitting a leaf returns the object reached;
/// an empty `keys` returns the root unchanged.
pub fn navigate<'a>(tree: &'a Value, keys: &[&str]) -> Result<&'a Value, CatalogError> {
    let mut current = tree;
    for key in keys {
        let map = match current {
            Value::Object(map) => map,
            _ => {
                return Err(CatalogError::MalformedPath {
                    key: key.to_string(),
                    reason: "cannot descend into a non-object node".to_string(),
                })
            }
        };
        match map.get(*key) {
            Some(leaf @ Value::String(_)) => return Ok(leaf),
            _ if key.is_empty() => {}
            Some(child @ Value::Object(_)) => current = child,
            Some(_) => {
                return Err(CatalogError::MalformedPath {
                    key: key.to_string(),
                    reason: "expected an object or string value".to_string(),
                })
            }
            None => {
                return Err(CatalogError::MalformedPath {
                    key: key.to_string(),
                    reason: "no such key".to_string(),
                })
            }
        }
    }
    Ok(current)
}
