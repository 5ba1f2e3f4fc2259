// Application wiring: picks the Source Adapter named by the configuration and
// puts the resolver behind the query interface.

use crate::adapters::PageSource;
use crate::core::resolver::IssueResolver;
use crate::core::{ConfigProvider, IssueQueries, SourceKind};
use crate::utils::error::Result;
use std::sync::Arc;

pub async fn build_queries<C: ConfigProvider + ?Sized>(config: &C) -> Result<Arc<dyn IssueQueries>> {
    match config.source_kind() {
        SourceKind::Page => {
            tracing::info!("Using listing page {}", config.page_url());
            let source = PageSource::new(config.page_url(), config.item_selector())?;
            let resolver = IssueResolver::new(source).with_fetch_timeout(config.fetch_timeout());
            Ok(Arc::new(resolver))
        }
        SourceKind::Bucket => build_bucket_queries(config).await,
    }
}

#[cfg(feature = "s3")]
async fn build_bucket_queries<C: ConfigProvider + ?Sized>(
    config: &C,
) -> Result<Arc<dyn IssueQueries>> {
    use crate::adapters::{BucketSource, S3ObjectLister};

    tracing::info!(
        "Using bucket {} in {}",
        config.bucket(),
        config.bucket_region()
    );
    let lister = S3ObjectLister::from_region(config.bucket_region()).await;
    let mut source = BucketSource::new(lister, config.bucket());
    if let Some(base_url) = config.public_base_url() {
        source = source.with_public_base_url(base_url);
    }

    let resolver = IssueResolver::new(source)
        .with_fetch_timeout(config.fetch_timeout())
        .with_title_prefix(config.title_prefix());
    Ok(Arc::new(resolver))
}

#[cfg(not(feature = "s3"))]
async fn build_bucket_queries<C: ConfigProvider + ?Sized>(
    _config: &C,
) -> Result<Arc<dyn IssueQueries>> {
    Err(crate::utils::error::IssueError::ConfigError {
        message: "The bucket source requires the `s3` feature".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::file_config::FileConfig;

    #[tokio::test]
    async fn test_build_page_queries() {
        let config = FileConfig::from_toml_str("source = \"page\"").unwrap();
        assert!(build_queries(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_build_rejects_invalid_page_url() {
        let config = FileConfig::from_toml_str("[page]\nurl = \"::\"").unwrap();
        assert!(build_queries(&config).await.is_err());
    }
}
