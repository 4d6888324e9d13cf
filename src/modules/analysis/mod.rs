use axum::Router;
use axum::middleware;
use axum::routing::get;

use crate::state::AppState;

pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/auth/video/analyze",
            get(handler::list_analyses).post(handler::submit_analysis),
        )
        .route("/auth/video/analyze/{id}", get(handler::get_analysis))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::require_auth,
        ))
}
