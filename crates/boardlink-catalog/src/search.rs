//! Recursive search over the catalog tree
//!
//! The catalog is a heterogeneously typed tree: string leaves nested in
//! objects of manufacturer-defined depth (vendor, architecture, category,
//! board, attribute). Every query here is a full depth-first walk; nothing
//! is cached or indexed, and the tree is never mutated.

use serde::Serialize;
use serde_json::Value;

/// Delimiter used when serializing a key sequence into a path string.
/// Must not appear inside any catalog key.
pub const PATH_DELIMITER: char = ':';

/// A leaf hit produced by a catalog search.
///
/// `path` is the serialized path of the leaf's *parent* object, not of the
/// leaf itself (see [`collect`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyMatch {
    pub path: String,
    pub value: String,
}

/// Returns true iff every entry in `required` is a literal substring of
/// `path`. An empty `required` set matches everything. Case-sensitive, no
/// trimming or escaping.
pub fn path_matches(path: &str, required: &[&str]) -> bool {
    required.iter().all(|needle| path.contains(needle))
}

/// Walk the tree depth-first and collect every string leaf whose serialized
/// path satisfies the conjunctive substring predicate.
///
/// Object entries are visited in the document's insertion order
/// (serde_json's preserve_order feature), so result order is deterministic
/// for a given loaded catalog but unspecified across differently-ordered
/// documents. Values that are neither strings nor objects are skipped.
///
/// The recorded `path` of a match is the prefix *without* the matched key.
/// Downstream segment slicing (identity resolution) counts on this, so the
/// leaf's own key must not be appended here.
pub fn collect(node: &Value, prefix: &str, required: &[&str]) -> Vec<PropertyMatch> {
    let mut out = Vec::new();
    if let Value::Object(map) = node {
        collect_into(map, prefix, required, &mut out);
    }
    out
}

fn collect_into(
    map: &serde_json::Map<String, Value>,
    prefix: &str,
    required: &[&str],
    out: &mut Vec<PropertyMatch>,
) {
    for (key, child) in map {
        match child {
            Value::String(leaf) => {
                let candidate = format!("{prefix}{PATH_DELIMITER}{key}");
                if path_matches(&candidate, required) {
                    out.push(PropertyMatch {
                        path: prefix.to_string(),
                        value: leaf.clone(),
                    });
                }
            }
            Value::Object(nested) => {
                let candidate = format!("{prefix}{PATH_DELIMITER}{key}");
                collect_into(nested, &candidate, required, out);
            }
            // Arrays, numbers, bools, nulls carry no board attributes.
            _ => {}
        }
    }
}

/// All leaves whose serialized path contains `token`.
pub fn find_by_token(tree: &Value, token: &str) -> Vec<PropertyMatch> {
    collect(tree, "", &[token])
}

/// All leaves whose serialized path contains `token` and whose value equals
/// `expected` exactly. The bool is true iff at least one leaf matched.
pub fn find_by_token_and_value(
    tree: &Value,
    token: &str,
    expected: &str,
) -> (Vec<PropertyMatch>, bool) {
    let results: Vec<PropertyMatch> = find_by_token(tree, token)
        .into_iter()
        .filter(|m| m.value == expected)
        .collect();
    let found = !results.is_empty();
    (results, found)
}

/// All product-id leaves in the catalog.
pub fn find_product_ids(tree: &Value) -> Vec<PropertyMatch> {
    find_by_token(tree, "pid")
}

/// All vendor-id leaves in the catalog.
pub fn find_vendor_ids(tree: &Value) -> Vec<PropertyMatch> {
    find_by_token(tree, "vid")
}

/// Distinct match values, first occurrence order preserved.
pub fn unique_values(matches: &[PropertyMatch]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    matches
        .iter()
        .filter(|m| seen.insert(m.value.as_str()))
        .map(|m| m.value.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_tree() -> Value {
        json!({
            "vendorA": {
                "avr": {
                    "boards": {
                        "uno": {
                            "pid": "0x0001",
                            "vid": "0x2341",
                            "name": "Arduino Uno"
                        },
                        "mega": {
                            "pid": "0x0010",
                            "vid": "0x2341",
                            "name": "Arduino Mega"
                        }
                    }
                }
            },
            "vendorB": {
                "sam": {
                    "boards": {
                        "due": {
                            "pid": "0x003d",
                            "name": "Arduino Due"
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_path_matches_conjunction() {
        assert!(path_matches(":vendorA:avr:boards:uno:pid", &["avr", "pid"]));
        assert!(!path_matches(":vendorA:avr:boards:uno:pid", &["avr", "vid"]));
    }

    #[test]
    fn test_path_matches_empty_set() {
        assert!(path_matches(":anything:at:all", &[]));
        assert!(path_matches("", &[]));
    }

    #[test]
    fn test_path_matches_case_sensitive() {
        assert!(!path_matches(":vendorA:avr", &["AVR"]));
    }

    #[test]
    fn test_collect_records_parent_path() {
        let tree = sample_tree();
        let matches = collect(&tree, "", &["uno:pid"]);
        assert_eq!(matches.len(), 1);
        // The matched key ("pid") is not part of the recorded path.
        assert_eq!(matches[0].path, ":vendorA:avr:boards:uno");
        assert_eq!(matches[0].value, "0x0001");
    }

    #[test]
    fn test_collect_empty_predicate_enumerates_all_leaves() {
        let tree = sample_tree();
        let matches = collect(&tree, "", &[]);
        // 3 leaves per board under vendorA, 2 under vendorB's due.
        assert_eq!(matches.len(), 8);
    }

    #[test]
    fn test_collect_subset_property() {
        let tree = sample_tree();
        let all = collect(&tree, "", &[]);
        let filtered = collect(&tree, "", &["pid"]);
        for m in &filtered {
            assert!(all.contains(m));
        }
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_collect_ignores_non_string_non_object_values() {
        let tree = json!({
            "vendor": {
                "count": 3,
                "enabled": true,
                "tags": ["a", "b"],
                "nothing": null,
                "name": "Vendor"
            }
        });
        let matches = collect(&tree, "", &[]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, "Vendor");
    }

    #[test]
    fn test_collect_no_match_is_empty_not_error() {
        let tree = sample_tree();
        assert!(collect(&tree, "", &["no-such-token"]).is_empty());
    }

    #[test]
    fn test_collect_non_object_root() {
        assert!(collect(&json!("just a string"), "", &[]).is_empty());
        assert!(collect(&json!(42), "", &[]).is_empty());
    }

    #[test]
    fn test_find_by_token_and_value() {
        let tree = sample_tree();
        let (matches, found) = find_by_token_and_value(&tree, "pid", "0x0010");
        assert!(found);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].path, ":vendorA:avr:boards:mega");

        let (matches, found) = find_by_token_and_value(&tree, "pid", "0xdead");
        assert!(!found);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_value_comparison_is_exact() {
        let tree = sample_tree();
        // "0X0001" differs in case from the stored "0x0001".
        let (_, found) = find_by_token_and_value(&tree, "pid", "0X0001");
        assert!(!found);
    }

    #[test]
    fn test_query_idempotence() {
        let tree = sample_tree();
        let first = find_by_token(&tree, "pid");
        let second = find_by_token(&tree, "pid");
        assert_eq!(first, second);
    }

    #[test]
    fn test_find_product_and_vendor_ids() {
        let tree = sample_tree();
        assert_eq!(find_product_ids(&tree).len(), 3);
        assert_eq!(find_vendor_ids(&tree).len(), 2);
    }

    #[test]
    fn test_unique_values() {
        let tree = sample_tree();
        let vids = unique_values(&find_vendor_ids(&tree));
        assert_eq!(vids, vec!["0x2341".to_string()]);
    }
}
