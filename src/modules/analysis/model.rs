use serde::Serialize;
use sqlx::FromRow;
use thiserror::Error;
use time::OffsetDateTime;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Error)]
#[error("unknown video analysis status {0:?}")]
pub struct UnknownAnalysisStatus(pub String);

impl TryFrom<String> for AnalysisStatus {
    type Error = UnknownAnalysisStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(UnknownAnalysisStatus(value)),
        }
    }
}

/// A row of `video_analyses`, written by the analysis service.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct VideoAnalysis {
    pub job_id: String,
    pub video_id: String,
    pub s3_url: String,
    pub people_count: Option<i32>,
    #[sqlx(try_from = "String")]
    pub status: AnalysisStatus,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub completed_at: Option<OffsetDateTime>,
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<i32>,
}

impl VideoAnalysis {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.created_by.map(i64::from) == Some(user_id)
    }
}
