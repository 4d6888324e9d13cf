use serde_json::{Map, Value};

use crate::common::response::ApiError;

/// Merges the caller's id into an opaque JSON object body.
///
/// An empty body counts as `{}`. Anything that is not a JSON object is
/// rejected so it never reaches a backend. The owner field always wins over
/// a caller-supplied value of the same name; key order is otherwise kept.
pub fn inject_owner(body: &[u8], field: &str, owner: i64) -> Result<Vec<u8>, ApiError> {
    let mut document: Map<String, Value> = if body.is_empty() {
        Map::new()
    } else {
        serde_json::from_slice(body).map_err(|e| {
            tracing::debug!(error = %e, "rejecting request body");
            ApiError::BadRequestBody
        })?
    };

    document.insert(field.to_string(), Value::from(owner));

    serde_json::to_vec(&document).map_err(|e| {
        tracing::error!(error = %e, "failed to re-encode request body");
        ApiError::Internal("Error preparing request")
    })
}
