//! Human-readable rendering of decoded claims
//!
//! Output is for display only and must never be fed back into signing.

use chrono::DateTime;
use serde_json::{Map, Value};

/// Claims holding NumericDate seconds
pub const TIMESTAMP_CLAIMS: [&str; 3] = ["iat", "exp", "nbf"];

/// Rewrite integer `iat`, `exp` and `nbf` claims as `YYYY-MM-DD HH:MM:SS UTC`
///
/// Only top-level keys of an object are touched. Non-integer values and
/// seconds outside the representable range are copied unchanged, as is any
/// payload that is not an object.
#[must_use]
pub fn process_jwt_payload(payload: &Value) -> Value {
    let Some(claims) = payload.as_object() else {
        return payload.clone();
    };

    let mut rendered = Map::with_capacity(claims.len());
    for (name, value) in claims {
        let value = if TIMESTAMP_CLAIMS.contains(&name.as_str()) {
            value
                .as_i64()
                .and_then(format_timestamp)
                .map_or_else(|| value.clone(), Value::String)
        } else {
            value.clone()
        };
        rendered.insert(name.clone(), value);
    }
    Value::Object(rendered)
}

fn format_timestamp(seconds: i64) -> Option<String> {
    DateTime::from_timestamp(seconds, 0).map(|time| time.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}
