use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/auth/register", post(handler::register))
        .route("/auth/login", post(handler::login));

    let protected_routes = Router::new()
        .route(
            "/auth/profile",
            get(handler::get_profile).put(handler::update_profile),
        )
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::require_auth,
        ));

    public_routes.merge(protected_routes)
}
