use crate::adapters::page::{DEFAULT_ITEM_SELECTOR, DEFAULT_PAGE_URL};
use crate::core::extractor::DEFAULT_TITLE_PREFIX;
use crate::core::{ConfigProvider, SourceKind};
use crate::utils::error::{IssueError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_source")]
    pub source: SourceKind,
    #[serde(default = "default_timeout_seconds")]
    pub fetch_timeout_seconds: u64,
    #[serde(default)]
    pub page: PageSection,
    #[serde(default)]
    pub bucket: BucketSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSection {
    #[serde(default = "default_page_url")]
    pub url: String,
    #[serde(default = "default_item_selector")]
    pub item_selector: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketSection {
    #[serde(default = "default_bucket")]
    pub name: String,
    #[serde(default = "default_region")]
    pub region: String,
    pub public_base_url: Option<String>,
    #[serde(default = "default_title_prefix")]
    pub title_prefix: String,
}

fn default_source() -> SourceKind {
    SourceKind::Page
}

fn default_timeout_seconds() -> u64 {
    super::DEFAULT_FETCH_TIMEOUT_SECONDS
}

fn default_page_url() -> String {
    DEFAULT_PAGE_URL.to_string()
}

fn default_item_selector() -> String {
    DEFAULT_ITEM_SELECTOR.to_string()
}

fn default_bucket() -> String {
    super::DEFAULT_BUCKET.to_string()
}

fn default_region() -> String {
    super::DEFAULT_REGION.to_string()
}

fn default_title_prefix() -> String {
    DEFAULT_TITLE_PREFIX.to_string()
}

impl Default for PageSection {
    fn default() -> Self {
        Self {
            url: default_page_url(),
            item_selector: default_item_selector(),
        }
    }
}

impl Default for BucketSection {
    fn default() -> Self {
        Self {
            name: default_bucket(),
            region: default_region(),
            public_base_url: None,
            title_prefix: default_title_prefix(),
        }
    }
}

impl FileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| IssueError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${README_BUCKET})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

impl ConfigProvider for FileConfig {
    fn source_kind(&self) -> SourceKind {
        self.source
    }

    fn page_url(&self) -> &str {
        &self.page.url
    }

    fn item_selector(&self) -> &str {
        &self.page.item_selector
    }

    fn bucket(&self) -> &str {
        &self.bucket.name
    }

    fn bucket_region(&self) -> &str {
        &self.bucket.region
    }

    fn public_base_url(&self) -> Option<&str> {
        self.bucket.public_base_url.as_deref()
    }

    fn title_prefix(&self) -> &str {
        &self.bucket.title_prefix
    }

    fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        super::validate_source_config(self)
    }
}
