use tracing::{error, info};
use uuid::Uuid;

use super::model::TranscodingJob;
use crate::common::response::ApiError;
use crate::modules::auth::dto::Identity;
use crate::state::AppState;

const NOT_FOUND: &str = "Video not found or access denied";

pub struct TranscodeService;

impl TranscodeService {
    pub async fn list(state: AppState, identity: &Identity) -> Result<Vec<TranscodingJob>, ApiError> {
        let jobs = state
            .transcodes
            .list_by_owner(identity.user_id)
            .await
            .map_err(|e| {
                error!(user_id = identity.user_id, error = %e, "error retrieving transcoding jobs");
                ApiError::Internal("Error retrieving transcoding jobs")
            })?;

        info!(user_id = identity.user_id, count = jobs.len(), "retrieved transcoding jobs");
        Ok(jobs)
    }

    pub fn parse_id(raw_id: &str) -> Result<Uuid, ApiError> {
        Uuid::parse_str(raw_id).map_err(|_| ApiError::InvalidIdentifier("Invalid video ID format"))
    }

    /// Loads a job the caller owns. Absent and foreign jobs are
    /// indistinguishable to the caller.
    pub async fn get(state: &AppState, identity: &Identity, id: Uuid) -> Result<TranscodingJob, ApiError> {
        state
            .transcodes
            .find_by_id(id)
            .await
            .map_err(|e| {
                error!(user_id = identity.user_id, %id, error = %e, "error retrieving transcoding job");
                ApiError::Internal("Error retrieving video information")
            })?
            .filter(|job| job.is_owned_by(identity.user_id))
            .ok_or(ApiError::NotFound(NOT_FOUND))
    }
}
