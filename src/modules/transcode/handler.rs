use axum::{
    Json,
    body::Body,
    extract::{Extension, Path, State},
    http::{HeaderMap, Method},
    response::Response,
};
use tracing::info;

use super::model::TranscodingJob;
use super::service::TranscodeService;
use crate::common::response::ApiError;
use crate::infrastructure::backend::proxy::Backend;
use crate::modules::auth::dto::Identity;
use crate::modules::submission::forward_with_owner;
use crate::state::AppState;

/// Submit a transcoding job
#[utoipa::path(
    post,
    path = "/auth/video/transcode",
    request_body(content = Object, content_type = "application/json", description = "Passed to the transcoding service with `created_by` set to the caller"),
    responses(
        (status = 200, description = "Transcoding service response, relayed verbatim"),
        (status = 400, description = "Invalid JSON in request body"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Transcoding service unreachable")
    ),
    security(("bearer_auth" = [])),
    tag = "Transcode"
)]
pub async fn submit_transcode(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, ApiError> {
    forward_with_owner(state, Backend::Transcoding, &identity, method, headers, body).await
}

/// List the caller's transcoding jobs, newest first
#[utoipa::path(
    get,
    path = "/auth/video/transcode",
    responses(
        (status = 200, description = "Caller's transcoding jobs", body = Vec<TranscodingJob>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Transcode"
)]
pub async fn list_transcodes(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<TranscodingJob>>, ApiError> {
    TranscodeService::list(state, &identity).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/auth/video/transcode/{id}",
    params(
        ("id" = String, Path, description = "Transcoding job ID (UUID)")
    ),
    responses(
        (status = 200, description = "Transcoding job", body = TranscodingJob),
        (status = 400, description = "Invalid video ID format"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found or not owned by the caller")
    ),
    security(("bearer_auth" = [])),
    tag = "Transcode"
)]
pub async fn get_transcode(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(raw_id): Path<String>,
) -> Result<Json<TranscodingJob>, ApiError> {
    let id = TranscodeService::parse_id(&raw_id)?;
    let job = TranscodeService::get(&state, &identity, id).await?;

    info!(user_id = identity.user_id, %id, "retrieved transcoding job");
    Ok(Json(job))
}
