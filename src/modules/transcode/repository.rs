use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::model::TranscodingJob;

#[async_trait]
pub trait TranscodeRepository: Send + Sync {
    /// Jobs owned by `owner`, newest first.
    async fn list_by_owner(&self, owner: i64) -> Result<Vec<TranscodingJob>>;
    /// Any job with this id, whoever owns it.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TranscodingJob>>;
}

pub struct PgTranscodeRepository {
    pool: PgPool,
}

impl PgTranscodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Integer measurements are widened to int8 so the row decodes whether the
// writer created them as `integer` or `bigint`.
const COLUMNS: &str = r#"
    id, job_id, source_path, target_codec, target_container,
    source_codec, source_container, output_url,
    duration_seconds::int8 AS duration_seconds, status,
    error_message, gpu_used, quality_preset,
    bitrate::int8 AS bitrate, file_size_bytes::int8 AS file_size_bytes,
    source_duration::float8 AS source_duration,
    source_bitrate::int8 AS source_bitrate,
    source_width::int8 AS source_width,
    source_height::int8 AS source_height,
    inserted_at AT TIME ZONE 'UTC' AS inserted_at,
    updated_at AT TIME ZONE 'UTC' AS updated_at,
    created_by
"#;

#[async_trait]
impl TranscodeRepository for PgTranscodeRepository {
    async fn list_by_owner(&self, owner: i64) -> Result<Vec<TranscodingJob>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM transcoding_jobs WHERE created_by = $1 ORDER BY inserted_at DESC"
        );
        let jobs = sqlx::query_as::<_, TranscodingJob>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TranscodingJob>> {
        let sql = format!("SELECT {COLUMNS} FROM transcoding_jobs WHERE id = $1");
        let job = sqlx::query_as::<_, TranscodingJob>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }
}
