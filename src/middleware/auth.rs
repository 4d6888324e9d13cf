use crate::common::response::ApiError;
use crate::common::security::verify_token;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

/// Splits `Bearer <token>`. Anything but exactly two space-separated parts
/// with the literal scheme `Bearer` is malformed.
pub fn bearer_token(value: Option<&HeaderValue>) -> Result<&str, ApiError> {
    let value = value.ok_or(ApiError::MissingCredential)?;
    let value = value.to_str().map_err(|_| ApiError::MalformedCredential)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(ApiError::MalformedCredential),
    }
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers().get(header::AUTHORIZATION))?;
    let identity = verify_token(token, &state.config.jwt_secret)?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
