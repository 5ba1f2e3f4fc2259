use crate::adapters::page::{DEFAULT_ITEM_SELECTOR, DEFAULT_PAGE_URL};
use crate::core::extractor::DEFAULT_TITLE_PREFIX;
use crate::core::{ConfigProvider, SourceKind};
use crate::utils::error::{IssueError, Result};
use std::env;
use std::time::Duration;

/// Configuration of the Lambda function, read from its environment.
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub source: SourceKind,
    pub page_url: String,
    pub item_selector: String,
    pub s3_bucket: String,
    pub s3_region: String,
    pub public_base_url: Option<String>,
    pub title_prefix: String,
    pub fetch_timeout_seconds: u64,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let source = match lookup("ISSUE_SOURCE") {
            Some(value) => value
                .parse()
                .map_err(|message| IssueError::ConfigError { message })?,
            None => SourceKind::Bucket,
        };

        let fetch_timeout_seconds = match lookup("FETCH_TIMEOUT_SECONDS") {
            Some(value) => value.parse().map_err(|_| IssueError::InvalidConfigValueError {
                field: "FETCH_TIMEOUT_SECONDS".to_string(),
                value: value.clone(),
                reason: "Value must be a whole number of seconds".to_string(),
            })?,
            None => super::DEFAULT_FETCH_TIMEOUT_SECONDS,
        };

        Ok(Self {
            source,
            page_url: lookup("PAGE_URL").unwrap_or_else(|| DEFAULT_PAGE_URL.to_string()),
            item_selector: lookup("ITEM_SELECTOR")
                .unwrap_or_else(|| DEFAULT_ITEM_SELECTOR.to_string()),
            s3_bucket: lookup("S3_BUCKET").unwrap_or_else(|| super::DEFAULT_BUCKET.to_string()),
            s3_region: lookup("S3_REGION").unwrap_or_else(|| super::DEFAULT_REGION.to_string()),
            public_base_url: lookup("PUBLIC_BASE_URL"),
            title_prefix: lookup("TITLE_PREFIX")
                .unwrap_or_else(|| DEFAULT_TITLE_PREFIX.to_string()),
            fetch_timeout_seconds,
        })
    }
}

impl ConfigProvider for LambdaConfig {
    fn source_kind(&self) -> SourceKind {
        self.source
    }

    fn page_url(&self) -> &str {
        &self.page_url
    }

    fn item_selector(&self) -> &str {
        &self.item_selector
    }

    fn bucket(&self) -> &str {
        &self.s3_bucket
    }

    fn bucket_region(&self) -> &str {
        &self.s3_region
    }

    fn public_base_url(&self) -> Option<&str> {
        self.public_base_url.as_deref()
    }

    fn title_prefix(&self) -> &str {
        &self.title_prefix
    }

    fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }
}

impl crate::utils::validation::Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        super::validate_source_config(self)?;
        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}
