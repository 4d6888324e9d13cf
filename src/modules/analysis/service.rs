use tracing::{error, info};
use uuid::Uuid;

use super::model::VideoAnalysis;
use crate::common::response::ApiError;
use crate::modules::auth::dto::Identity;
use crate::state::AppState;

const NOT_FOUND: &str = "Video analysis not found or access denied";

pub struct AnalysisService;

impl AnalysisService {
    pub async fn list(state: AppState, identity: &Identity) -> Result<Vec<VideoAnalysis>, ApiError> {
        let jobs = state
            .analyses
            .list_by_owner(identity.user_id)
            .await
            .map_err(|e| {
                error!(user_id = identity.user_id, error = %e, "error retrieving video analyses");
                ApiError::Internal("Error retrieving video analyses")
            })?;

        info!(user_id = identity.user_id, count = jobs.len(), "retrieved video analyses");
        Ok(jobs)
    }

    /// A job that exists but belongs to someone else is reported exactly
    /// like one that does not exist.
    pub async fn get(state: AppState, identity: &Identity, raw_id: &str) -> Result<VideoAnalysis, ApiError> {
        if Uuid::parse_str(raw_id).is_err() {
            return Err(ApiError::InvalidIdentifier("Invalid job ID format"));
        }

        let job = state
            .analyses
            .find_by_job_id(raw_id)
            .await
            .map_err(|e| {
                error!(user_id = identity.user_id, job_id = raw_id, error = %e, "error retrieving video analysis");
                ApiError::Internal("Error retrieving video analysis information")
            })?
            .filter(|job| job.is_owned_by(identity.user_id))
            .ok_or(ApiError::NotFound(NOT_FOUND))?;

        info!(user_id = identity.user_id, job_id = raw_id, "retrieved video analysis");
        Ok(job)
    }
}
