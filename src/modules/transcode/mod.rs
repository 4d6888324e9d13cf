use axum::Router;
use axum::middleware;
use axum::routing::get;

use crate::state::AppState;

pub mod download;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/auth/video/transcode",
            get(handler::list_transcodes).post(handler::submit_transcode),
        )
        .route("/auth/video/transcode/{id}", get(handler::get_transcode))
        .route(
            "/auth/video/transcode/{id}/download",
            get(download::download_output),
        )
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::require_auth,
        ))
}
