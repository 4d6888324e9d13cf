use std::env;
use std::str::FromStr;

use crate::config::settings::ConfigError;

#[derive(Clone, Copy, Debug)]
pub enum EnvKey {
    ServerPort,
    DatabaseUrl,
    DbMaxConnections,
    DbMinConnections,
    JwtSecret,
    TokenTtlHours,
    AnalyzeVideoUrl,
    TranscodeVideoUrl,
    AwsRegion,
    AwsAccessKey,
    AwsSecretKey,
    S3Endpoint,
    MaxBodyBytes,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "PORT",
            EnvKey::DatabaseUrl => "DATABASE_URL",
            EnvKey::DbMaxConnections => "DB_MAX_CONNECTIONS",
            EnvKey::DbMinConnections => "DB_MIN_CONNECTIONS",
            EnvKey::JwtSecret => "JWT_SECRET",
            EnvKey::TokenTtlHours => "TOKEN_TTL_HOURS",
            EnvKey::AnalyzeVideoUrl => "ANALYZE_VIDEO_URL",
            EnvKey::TranscodeVideoUrl => "TRANSCODE_VIDEO_URL",
            EnvKey::AwsRegion => "AWS_REGION",
            EnvKey::AwsAccessKey => "AWS_ACCESS_KEY_ID",
            EnvKey::AwsSecretKey => "AWS_SECRET_ACCESS_KEY",
            EnvKey::S3Endpoint => "S3_ENDPOINT",
            EnvKey::MaxBodyBytes => "MAX_BODY_BYTES",
        }
    }
}

/// Reads a variable, treating an empty value the same as an unset one.
pub fn get(key: EnvKey) -> Option<String> {
    env::var(key.as_str()).ok().filter(|v| !v.is_empty())
}

pub fn require(key: EnvKey) -> Result<String, ConfigError> {
    get(key).ok_or(ConfigError::Missing(key.as_str()))
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    get(key).unwrap_or_else(|| default.to_string())
}

/// Unlike a silent fallback, a present-but-unparseable value is an error.
pub fn get_parsed<T>(key: EnvKey, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        Some(val) => val.parse::<T>().map_err(|e| ConfigError::Invalid {
            key: key.as_str(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
