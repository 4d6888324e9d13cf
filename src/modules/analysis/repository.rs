use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use super::model::VideoAnalysis;

#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Jobs owned by `owner`, newest first.
    async fn list_by_owner(&self, owner: i64) -> Result<Vec<VideoAnalysis>>;
    /// Any job with this id, whoever owns it.
    async fn find_by_job_id(&self, job_id: &str) -> Result<Option<VideoAnalysis>>;
}

pub struct PgAnalysisRepository {
    pool: PgPool,
}

impl PgAnalysisRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// The backend writes `timestamp` columns in UTC; they are read back as
// `timestamptz` so they decode into `OffsetDateTime`.
const COLUMNS: &str = r#"
    job_id, video_id, s3_url, people_count, status,
    created_at AT TIME ZONE 'UTC' AS created_at,
    completed_at AT TIME ZONE 'UTC' AS completed_at,
    error_message, created_by
"#;

#[async_trait]
impl AnalysisRepository for PgAnalysisRepository {
    async fn list_by_owner(&self, owner: i64) -> Result<Vec<VideoAnalysis>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM video_analyses WHERE created_by = $1 ORDER BY created_at DESC"
        );
        let jobs = sqlx::query_as::<_, VideoAnalysis>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    async fn find_by_job_id(&self, job_id: &str) -> Result<Option<VideoAnalysis>> {
        let sql = format!("SELECT {COLUMNS} FROM video_analyses WHERE job_id = $1");
        let job = sqlx::query_as::<_, VideoAnalysis>(&sql)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }
}
