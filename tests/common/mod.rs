#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use time::OffsetDateTime;
use url::Url;
use uuid::Uuid;

use video_gateway::app::create_app;
use video_gateway::common::security;
use video_gateway::config::settings::AppConfig;
use video_gateway::infrastructure::backend::proxy::BackendProxy;
use video_gateway::infrastructure::storage::{ObjectStore, StoredObject};
use video_gateway::modules::analysis::model::{AnalysisStatus, VideoAnalysis};
use video_gateway::modules::analysis::repository::AnalysisRepository;
use video_gateway::modules::auth::dto::Identity;
use video_gateway::modules::auth::model::User;
use video_gateway::modules::auth::repository::UserRepository;
use video_gateway::modules::transcode::model::{TranscodingJob, TranscodingStatus};
use video_gateway::modules::transcode::repository::TranscodeRepository;
use video_gateway::state::AppState;

pub const SECRET: &str = "integration-test-secret";

// -- In-memory repositories ---------------------------------------------------

#[derive(Default)]
pub struct MemoryUsers {
    users: Mutex<Vec<User>>,
    pub calls: AtomicUsize,
}

impl MemoryUsers {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: users.len() as i64 + 1,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn update_email(&self, id: i64, email: &str) -> Result<Option<User>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.id == id).map(|u| {
            u.email = email.to_string();
            u.updated_at = OffsetDateTime::now_utc();
            u.clone()
        }))
    }
}

#[derive(Default)]
pub struct MemoryAnalyses {
    jobs: Mutex<Vec<VideoAnalysis>>,
    pub calls: AtomicUsize,
    pub failing: bool,
}

impl MemoryAnalyses {
    pub fn with(jobs: Vec<VideoAnalysis>) -> Self {
        Self {
            jobs: Mutex::new(jobs),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisRepository for MemoryAnalyses {
    async fn list_by_owner(&self, owner: i64) -> Result<Vec<VideoAnalysis>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(anyhow!("connection refused"));
        }
        let mut jobs: Vec<_> = self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| j.created_by.map(i64::from) == Some(owner))
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }

    async fn find_by_job_id(&self, job_id: &str) -> Result<Option<VideoAnalysis>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(anyhow!("connection refused"));
        }
        let jobs = self.jobs.lock().unwrap();
        Ok(jobs.iter().find(|j| j.job_id == job_id).cloned())
    }
}

#[derive(Default)]
pub struct MemoryTranscodes {
    jobs: Mutex<Vec<TranscodingJob>>,
    pub calls: AtomicUsize,
}

impl MemoryTranscodes {
    pub fn with(jobs: Vec<TranscodingJob>) -> Self {
        Self {
            jobs: Mutex::new(jobs),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscodeRepository for MemoryTranscodes {
    async fn list_by_owner(&self, owner: i64) -> Result<Vec<TranscodingJob>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut jobs: Vec<_> = self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| j.created_by.map(i64::from) == Some(owner))
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.inserted_at.cmp(&a.inserted_at));
        Ok(jobs)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TranscodingJob>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let jobs = self.jobs.lock().unwrap();
        Ok(jobs.iter().find(|j| j.id == id).cloned())
    }
}

// -- In-memory object store ---------------------------------------------------

#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    pub failing: bool,
    pub calls: AtomicUsize,
}

impl MemoryStore {
    pub fn put(&self, bucket: &str, key: &str, bytes: Vec<u8>) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), bytes);
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<StoredObject> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(anyhow!("service unavailable"));
        }
        let bytes = self
            .objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| anyhow!("NoSuchKey: {bucket}/{key}"))?;

        Ok(StoredObject {
            content_length: Some(bytes.len() as u64),
            body: Box::pin(Cursor::new(bytes)),
        })
    }
}

// -- App construction ---------------------------------------------------------

pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryUsers>,
    pub analyses: Arc<MemoryAnalyses>,
    pub transcodes: Arc<MemoryTranscodes>,
    pub storage: Arc<MemoryStore>,
}

#[derive(Default)]
pub struct Fixtures {
    pub analyses: MemoryAnalyses,
    pub transcodes: MemoryTranscodes,
    pub storage: MemoryStore,
}

pub fn config(analysis_url: &str, transcode_url: &str) -> AppConfig {
    AppConfig {
        server_port: 0,
        database_url: "postgres://unused".to_string(),
        db_max_connections: 1,
        db_min_connections: 0,
        jwt_secret: SECRET.to_string(),
        token_ttl_hours: 24,
        analyze_video_url: Url::parse(analysis_url).unwrap(),
        transcode_video_url: Url::parse(transcode_url).unwrap(),
        aws_region: "us-east-1".to_string(),
        aws_access_key: String::new(),
        aws_secret_key: String::new(),
        s3_endpoint: None,
        max_body_bytes: 10 * 1024 * 1024,
    }
}

pub fn test_app(analysis_url: &str, transcode_url: &str, fixtures: Fixtures) -> TestApp {
    test_app_with_config(config(analysis_url, transcode_url), fixtures)
}

pub fn test_app_with_config(config: AppConfig, fixtures: Fixtures) -> TestApp {
    let users = Arc::new(MemoryUsers::default());
    let analyses = Arc::new(fixtures.analyses);
    let transcodes = Arc::new(fixtures.transcodes);
    let storage = Arc::new(fixtures.storage);
    let backends = BackendProxy::new(&config).unwrap();

    let state = AppState::new(
        config,
        users.clone(),
        analyses.clone(),
        transcodes.clone(),
        storage.clone(),
        backends,
    );

    TestApp {
        router: create_app(state),
        users,
        analyses,
        transcodes,
        storage,
    }
}

/// App whose backends point nowhere; for tests that must not reach them.
pub fn offline_app(fixtures: Fixtures) -> TestApp {
    test_app("http://127.0.0.1:9", "http://127.0.0.1:9", fixtures)
}

/// A base URL on which nothing is listening.
pub fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

// -- Requests and responses ---------------------------------------------------

pub fn token_for(user_id: i64) -> String {
    let identity = Identity {
        user_id,
        email: format!("user{user_id}@example.com"),
    };
    security::issue_token(&identity, SECRET, 24).unwrap()
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_string(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// -- Record fixtures ----------------------------------------------------------

pub fn at(unix: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(unix).unwrap()
}

pub fn analysis(job_id: &str, owner: i32, created_at: i64) -> VideoAnalysis {
    VideoAnalysis {
        job_id: job_id.to_string(),
        video_id: format!("video-{job_id}"),
        s3_url: format!("s3://uploads/{job_id}.mp4"),
        people_count: None,
        status: AnalysisStatus::Pending,
        created_at: at(created_at),
        completed_at: None,
        error_message: None,
        created_by: Some(owner),
    }
}

pub fn transcode(id: Uuid, owner: i32, output_url: Option<&str>, inserted_at: i64) -> TranscodingJob {
    TranscodingJob {
        id,
        job_id: format!("tj-{id}"),
        source_path: "s3://b/in.mp4".to_string(),
        target_codec: "h264".to_string(),
        target_container: "mp4".to_string(),
        source_codec: None,
        source_container: None,
        output_url: output_url.map(str::to_string),
        duration_seconds: None,
        status: if output_url.is_some() {
            TranscodingStatus::Completed
        } else {
            TranscodingStatus::Processing
        },
        error_message: None,
        gpu_used: None,
        quality_preset: None,
        bitrate: None,
        file_size_bytes: None,
        source_duration: None,
        source_bitrate: None,
        source_width: None,
        source_height: None,
        inserted_at: at(inserted_at),
        updated_at: at(inserted_at),
        created_by: Some(owner),
    }
}
