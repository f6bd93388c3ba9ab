//! Canonical argument hashing.
//!
//! Tool arguments are serialized with recursively sorted object keys and no
//! whitespace, then digested with SHA-256. The hex digest is the fixture key.
//! Values are not normalized: `1`, `1.0` and `"1"` all hash differently.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Recursively rebuild a value with object keys in lexicographic order.
fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::with_capacity(map.len());
            for key in keys {
                if let Some(v) = map.get(key) {
                    sorted.insert(key.clone(), sort_keys(v));
                }
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// Compact JSON with sorted keys.
pub fn canonical_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(&sort_keys(value))?)
}

/// SHA-256 hex digest of the canonical JSON form of `args`.
pub fn compute_args_hash(args: &Value) -> Result<String> {
    let canonical = canonical_json(args)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}
