use axum::{
    Json,
    body::Body,
    extract::{Extension, Path, State},
    http::{HeaderMap, Method},
    response::Response,
};

use super::model::VideoAnalysis;
use super::service::AnalysisService;
use crate::common::response::ApiError;
use crate::infrastructure::backend::proxy::Backend;
use crate::modules::auth::dto::Identity;
use crate::modules::submission::forward_with_owner;
use crate::state::AppState;

/// Submit a video for analysis
#[utoipa::path(
    post,
    path = "/auth/video/analyze",
    request_body(content = Object, content_type = "application/json", description = "Passed to the analysis service with `user` set to the caller"),
    responses(
        (status = 200, description = "Analysis service response, relayed verbatim"),
        (status = 400, description = "Invalid JSON in request body"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Analysis service unreachable")
    ),
    security(("bearer_auth" = [])),
    tag = "Analysis"
)]
pub async fn submit_analysis(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, ApiError> {
    forward_with_owner(state, Backend::Analysis, &identity, method, headers, body).await
}

/// List the caller's analysis jobs, newest first
#[utoipa::path(
    get,
    path = "/auth/video/analyze",
    responses(
        (status = 200, description = "Caller's analysis jobs", body = Vec<VideoAnalysis>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Analysis"
)]
pub async fn list_analyses(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<VideoAnalysis>>, ApiError> {
    AnalysisService::list(state, &identity).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/auth/video/analyze/{id}",
    params(
        ("id" = String, Path, description = "Analysis job ID (UUID)")
    ),
    responses(
        (status = 200, description = "Analysis job", body = VideoAnalysis),
        (status = 400, description = "Invalid job ID format"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found or not owned by the caller")
    ),
    security(("bearer_auth" = [])),
    tag = "Analysis"
)]
pub async fn get_analysis(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<VideoAnalysis>, ApiError> {
    AnalysisService::get(state, &identity, &id).await.map(Json)
}
