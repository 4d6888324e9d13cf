use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

use crate::modules::analysis::model::{AnalysisStatus, VideoAnalysis};
use crate::modules::auth::dto::{AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::modules::auth::model::User;
use crate::modules::transcode::model::{TranscodingJob, TranscodingStatus};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::modules::auth::handler::register,
        crate::modules::auth::handler::login,
        crate::modules::auth::handler::get_profile,
        crate::modules::auth::handler::update_profile,
        crate::modules::analysis::handler::submit_analysis,
        crate::modules::analysis::handler::list_analyses,
        crate::modules::analysis::handler::get_analysis,
        crate::modules::transcode::handler::submit_transcode,
        crate::modules::transcode::handler::list_transcodes,
        crate::modules::transcode::handler::get_transcode,
        crate::modules::transcode::download::download_output,
    ),
    components(
        schemas(
            RegisterRequest, LoginRequest, UpdateProfileRequest, AuthResponse, User,
            VideoAnalysis, AnalysisStatus,
            TranscodingJob, TranscodingStatus,
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Auth", description = "Accounts and tokens"),
        (name = "Analysis", description = "Video analysis jobs"),
        (name = "Transcode", description = "Video transcoding jobs and downloads")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
