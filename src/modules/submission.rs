use axum::{
    body::{Body, to_bytes},
    http::{HeaderMap, Method},
    response::Response,
};

use crate::common::inject::inject_owner;
use crate::common::response::ApiError;
use crate::infrastructure::backend::proxy::Backend;
use crate::modules::auth::dto::Identity;
use crate::state::AppState;

/// Write path shared by both job kinds: read the caller's body, stamp the
/// backend's owner field into it, relay the request.
///
/// Nothing is sent unless the body parsed, so a rejected body never costs a
/// backend round trip.
pub async fn forward_with_owner(
    state: AppState,
    backend: Backend,
    identity: &Identity,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, ApiError> {
    let raw = to_bytes(body, state.config.max_body_bytes).await.map_err(|e| {
        tracing::debug!(error = %e, "error reading request body");
        ApiError::UnreadableBody
    })?;

    let injected = inject_owner(&raw, backend.owner_field(), identity.user_id)?;

    state
        .backends
        .forward(backend, method, &headers, injected, identity.user_id)
        .await
}
