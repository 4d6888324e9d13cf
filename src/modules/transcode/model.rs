use serde::Serialize;
use sqlx::FromRow;
use thiserror::Error;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TranscodingStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

#[derive(Debug, Error)]
#[error("unknown transcoding status {0:?}")]
pub struct UnknownTranscodingStatus(pub String);

impl TryFrom<String> for TranscodingStatus {
    type Error = UnknownTranscodingStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(UnknownTranscodingStatus(value)),
        }
    }
}

/// A row of `transcoding_jobs`, written by the transcoding service.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TranscodingJob {
    pub id: Uuid,
    pub job_id: String,
    pub source_path: String,
    pub target_codec: String,
    pub target_container: String,
    pub source_codec: Option<String>,
    pub source_container: Option<String>,
    pub output_url: Option<String>,
    pub duration_seconds: Option<i64>,
    #[sqlx(try_from = "String")]
    pub status: TranscodingStatus,
    pub error_message: Option<String>,
    pub gpu_used: Option<String>,
    pub quality_preset: Option<String>,
    pub bitrate: Option<i64>,
    pub file_size_bytes: Option<i64>,
    pub source_duration: Option<f64>,
    pub source_bitrate: Option<i64>,
    pub source_width: Option<i64>,
    pub source_height: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub inserted_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<i32>,
}

impl TranscodingJob {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.created_by.map(i64::from) == Some(user_id)
    }

    /// The stored output locator, if the job has produced one.
    pub fn output_locator(&self) -> Option<&str> {
        self.output_url.as_deref().filter(|url| !url.is_empty())
    }
}
