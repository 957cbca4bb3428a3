//! Merge-with-defaults validation
//!
//! Progress files written by older versions may lack fields the current
//! schema has. Rather than rejecting them, any missing field (at any depth)
//! is filled from the default record before deserializing. Import uses the
//! same path, so a loaded record and an imported record go through one
//! validation route.

use serde_json::Value;

use super::model::UserProgress;

/// Fill missing fields of `stored` from `defaults`, recursively.
///
/// Keys present in `stored` win; keys only in `defaults` are copied over.
/// Unknown extra keys in `stored` are kept (and later ignored by serde).
fn merge_with_defaults(defaults: Value, stored: Value) -> Value {
    match (defaults, stored) {
        (Value::Object(defaults), Value::Object(mut stored)) => {
            for (key, default_value) in defaults {
                match stored.remove(&key) {
                    Some(stored_value) => {
                        stored.insert(key, merge_with_defaults(default_value, stored_value));
                    }
                    None => {
                        stored.insert(key, default_value);
                    }
                }
            }
            Value::Object(stored)
        }
        (_, stored) => stored,
    }
}

/// Turn a raw JSON value into a fully-shaped progress record, filling any
/// missing field from the defaults. Fails if a present field has the wrong
/// type.
pub fn repair(stored: Value) -> Result<UserProgress, serde_json::Error> {
    let defaults = serde_json::to_value(UserProgress::default())?;
    serde_json::from_value(merge_with_defaults(defaults, stored))
}
