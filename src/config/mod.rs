pub mod file_config;
pub mod lambda;

use crate::core::{ConfigProvider, SourceKind};
use crate::utils::error::Result;
use crate::utils::validation::*;

pub const DEFAULT_BUCKET: &str = "readme-arkiv";
pub const DEFAULT_REGION: &str = "eu-north-1";
pub const DEFAULT_FETCH_TIMEOUT_SECONDS: u64 = 8;

/// Checks the settings the configured source kind depends on.
pub fn validate_source_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_range(
        "fetch_timeout_seconds",
        config.fetch_timeout().as_secs(),
        1,
        60,
    )?;

    match config.source_kind() {
        SourceKind::Page => {
            validate_url("page_url", config.page_url())?;
            validate_selector("item_selector", config.item_selector())?;
        }
        SourceKind::Bucket => {
            validate_bucket_name("bucket", config.bucket())?;
            validate_region("bucket_region", config.bucket_region())?;
            if let Some(base_url) = config.public_base_url() {
                validate_url("public_base_url", base_url)?;
            }
            validate_non_empty_string("title_prefix", config.title_prefix())?;
        }
    }

    tracing::debug!("✅ Configuration validation passed");
    Ok(())
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::*;
    use crate::adapters::page::{DEFAULT_ITEM_SELECTOR, DEFAULT_PAGE_URL};
    use crate::core::extractor::DEFAULT_TITLE_PREFIX;
    use clap::Parser;
    use std::time::Duration;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "readme-issues")]
    #[command(about = "Answers GraphQL queries about readme issues. Reads the request from stdin.")]
    pub struct CliConfig {
        #[arg(long, value_enum, default_value = "page")]
        pub source: SourceKind,

        #[arg(long, default_value = DEFAULT_PAGE_URL)]
        pub page_url: String,

        #[arg(long, default_value = DEFAULT_ITEM_SELECTOR)]
        pub item_selector: String,

        #[arg(long, default_value = DEFAULT_BUCKET)]
        pub bucket: String,

        #[arg(long, default_value = DEFAULT_REGION)]
        pub bucket_region: String,

        #[arg(long)]
        pub public_base_url: Option<String>,

        #[arg(long, default_value = DEFAULT_TITLE_PREFIX)]
        pub title_prefix: String,

        #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECONDS)]
        pub fetch_timeout_seconds: u64,

        #[arg(long, help = "Read settings from a TOML file instead of flags")]
        pub config: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl ConfigProvider for CliConfig {
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
            &self.bucket
        }

        fn bucket_region(&self) -> &str {
            &self.bucket_region
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

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_source_config(self)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_default_flags() {
            let config = CliConfig::parse_from(["readme-issues"]);

            assert_eq!(config.source_kind(), SourceKind::Page);
            assert_eq!(config.page_url(), DEFAULT_PAGE_URL);
            assert_eq!(config.fetch_timeout(), Duration::from_secs(8));
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_bucket_flags() {
            let config = CliConfig::parse_from([
                "readme-issues",
                "--source",
                "bucket",
                "--bucket",
                "Not_Valid",
            ]);

            assert_eq!(config.source_kind(), SourceKind::Bucket);
            assert!(config.validate().is_err());
        }
    }
}
