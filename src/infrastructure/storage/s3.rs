use anyhow::anyhow;
use async_trait::async_trait;
use aws_sdk_s3::config::Builder;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::{Client, config::BehaviorVersion, config::Credentials, config::Region};
use tracing::info;

use super::{ObjectStore, StoredObject};
use crate::config::settings::AppConfig;

#[derive(Clone)]
pub struct StorageService {
    pub client: Client,
}

impl StorageService {
    pub fn new(config: &AppConfig) -> Self {
        let credentials = Credentials::new(
            &config.aws_access_key,
            &config.aws_secret_key,
            None,
            None,
            "static",
        );

        let mut builder = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()))
            .credentials_provider(credentials);

        // MinIO and other self-hosted stores need path-style addressing.
        if let Some(endpoint) = &config.s3_endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let client = Client::from_conf(builder.build());

        info!(
            region = %config.aws_region,
            endpoint = config.s3_endpoint.as_deref().unwrap_or("aws"),
            "object storage client ready"
        );

        Self { client }
    }
}

#[async_trait]
impl ObjectStore for StorageService {
    async fn get_object(&self, bucket: &str, key: &str) -> anyhow::Result<StoredObject> {
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| anyhow!("get_object {bucket}/{key}: {}", DisplayErrorContext(e)))?;

        let content_length = resp.content_length().and_then(|len| u64::try_from(len).ok());

        Ok(StoredObject {
            content_length,
            body: Box::pin(resp.body.into_async_read()),
        })
    }
}
