use crate::core::ObjectLister;
use crate::utils::error::{IssueError, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client as S3Client;

/// Lists bucket keys with `ListObjectsV2`, following continuation tokens.
#[derive(Clone)]
pub struct S3ObjectLister {
    client: S3Client,
}

impl S3ObjectLister {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    pub async fn from_region(region: &str) -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let config = aws_sdk_s3::config::Builder::from(&config)
            .region(Region::new(region.to_string()))
            .force_path_style(true)
            .build();
        Self::new(S3Client::from_conf(config))
    }
}

#[async_trait]
impl ObjectLister for S3ObjectLister {
    async fn list_keys(&self, bucket: &str, prefix: Option<&str>) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_objects_v2()
                .bucket(bucket)
                .set_prefix(prefix.map(str::to_string))
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(|e| IssueError::StorageError {
                    message: format!("Failed to list s3://{}: {}", bucket, DisplayErrorContext(&e)),
                })?;

            keys.extend(
                output
                    .contents()
                    .iter()
                    .filter_map(|object| object.key())
                    .map(str::to_string),
            );

            match output.next_continuation_token() {
                Some(token) if output.is_truncated().unwrap_or(false) => {
                    continuation_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        tracing::debug!("Listed {} keys in s3://{}", keys.len(), bucket);
        Ok(keys)
    }
}
