use std::pin::Pin;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncRead;

pub mod s3;

pub type ObjectBody = Pin<Box<dyn AsyncRead + Send>>;

/// An object fetched from storage, not yet read.
pub struct StoredObject {
    pub content_length: Option<u64>,
    pub body: ObjectBody,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get_object(&self, bucket: &str, key: &str) -> anyhow::Result<StoredObject>;
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("locator {0:?} has no bucket/key separator")]
pub struct MalformedLocator(pub String);

/// A bucket/key pair decoded from a stored output URL such as
/// `s3://bucket/path/to/file.mp4` (the scheme prefix is optional).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub bucket: String,
    pub key: String,
}

impl Locator {
    pub fn parse(raw: &str) -> Result<Self, MalformedLocator> {
        let trimmed = raw.strip_prefix("s3://").unwrap_or(raw);

        match trimmed.split_once('/') {
            Some((bucket, key)) if !bucket.is_empty() => Ok(Self {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            _ => Err(MalformedLocator(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_s3_url() {
        let locator = Locator::parse("s3://bucket-a/path/to/file.mp4").unwrap();
        assert_eq!(locator.bucket, "bucket-a");
        assert_eq!(locator.key, "path/to/file.mp4");
    }

    #[test]
    fn scheme_is_optional() {
        let locator = Locator::parse("bucket-b/out.webm").unwrap();
        assert_eq!(locator.bucket, "bucket-b");
        assert_eq!(locator.key, "out.webm");
    }

    #[test]
    fn only_first_separator_splits() {
        let locator = Locator::parse("s3://b/a//b/").unwrap();
        assert_eq!(locator.bucket, "b");
        assert_eq!(locator.key, "a//b/");
    }

    #[test]
    fn missing_separator_is_malformed() {
        assert!(Locator::parse("s3://just-a-bucket").is_err());
        assert!(Locator::parse("").is_err());
    }

    #[test]
    fn empty_bucket_is_malformed() {
        assert!(Locator::parse("s3:///key.mp4").is_err());
    }
}
