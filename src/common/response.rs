use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Every failure the gateway reports to a caller.
///
/// The `Display` text is the exact body sent back, so it must never carry
/// token contents, SQL errors or upstream details. Those are logged where
/// the error is created.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authorization header required")]
    MissingCredential,
    #[error("Invalid authorization format")]
    MalformedCredential,
    #[error("Invalid token")]
    InvalidCredential,
    #[error("Invalid credentials")]
    InvalidLogin,

    #[error("Invalid JSON in request body")]
    BadRequestBody,
    #[error("Error reading request body")]
    UnreadableBody,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    InvalidIdentifier(&'static str),
    #[error("Invalid video storage location")]
    MalformedLocator,

    #[error("{0}")]
    NotFound(&'static str),
    #[error("Video is not ready for download")]
    NotReady,
    #[error("{0}")]
    Conflict(&'static str),

    #[error("Error connecting to video service")]
    BadGateway,
    #[error("Error retrieving video file")]
    StorageUnavailable,
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingCredential
            | Self::MalformedCredential
            | Self::InvalidCredential
            | Self::InvalidLogin => StatusCode::UNAUTHORIZED,
            Self::BadRequestBody
            | Self::UnreadableBody
            | Self::Validation(_)
            | Self::InvalidIdentifier(_)
            | Self::MalformedLocator => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::NotReady => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadGateway => StatusCode::BAD_GATEWAY,
            Self::StorageUnavailable | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status(), format!("{self}\n")).into_response();
        response.headers_mut().insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        response
    }
}
