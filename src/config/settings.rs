use thiserror::Error;
use url::Url;

use crate::config::env::{self, EnvKey};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub analyze_video_url: Url,
    pub transcode_video_url: Url,
    pub aws_region: String,
    pub aws_access_key: String,
    pub aws_secret_key: String,
    pub s3_endpoint: Option<String>,
    pub max_body_bytes: usize,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 8080)?,
            database_url: env::require(EnvKey::DatabaseUrl)?,
            db_max_connections: env::get_parsed(EnvKey::DbMaxConnections, 100)?,
            db_min_connections: env::get_parsed(EnvKey::DbMinConnections, 10)?,
            jwt_secret: env::require(EnvKey::JwtSecret)?,
            token_ttl_hours: env::get_parsed(EnvKey::TokenTtlHours, 24)?,
            analyze_video_url: parse_url(EnvKey::AnalyzeVideoUrl, "http://localhost:8000")?,
            transcode_video_url: parse_url(EnvKey::TranscodeVideoUrl, "http://localhost:4000")?,
            aws_region: env::get_or(EnvKey::AwsRegion, "us-east-1"),
            aws_access_key: env::get_or(EnvKey::AwsAccessKey, ""),
            aws_secret_key: env::get_or(EnvKey::AwsSecretKey, ""),
            s3_endpoint: env::get(EnvKey::S3Endpoint),
            max_body_bytes: env::get_parsed(EnvKey::MaxBodyBytes, 10 * 1024 * 1024)?,
        })
    }
}

fn parse_url(key: EnvKey, default: &str) -> Result<Url, ConfigError> {
    let raw = env::get_or(key, default);
    let url = Url::parse(&raw).map_err(|e| ConfigError::Invalid {
        key: key.as_str(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::Invalid {
            key: key.as_str(),
            reason: format!("{raw} cannot be used as a base URL"),
        });
    }

    Ok(url)
}
