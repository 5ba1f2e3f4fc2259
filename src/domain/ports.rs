use crate::domain::model::{FetchDeadline, Issue, IssueFilter, NamingRule, RawEntry};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Retrieves raw entries from a backing store.
///
/// A fetch either yields the complete collection or fails; once the deadline
/// passes the fetch is abandoned and no partial collection is returned.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// The naming convention entries of this source follow.
    fn naming_rule(&self) -> NamingRule;

    async fn fetch(
        &self,
        scope_prefix: Option<&str>,
        deadline: FetchDeadline,
    ) -> Result<Vec<RawEntry>>;
}

/// Lists object keys in a storage bucket.
#[async_trait]
pub trait ObjectLister: Send + Sync {
    async fn list_keys(&self, bucket: &str, prefix: Option<&str>) -> Result<Vec<String>>;
}

/// Operations bound by the query layer.
#[async_trait]
pub trait IssueQueries: Send + Sync {
    async fn list_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>>;

    /// `Ok(None)` when the source succeeded but holds nothing.
    async fn latest_issue(&self) -> Result<Option<Issue>>;
}

pub trait ConfigProvider: Send + Sync {
    fn source_kind(&self) -> SourceKind;
    fn page_url(&self) -> &str;
    fn item_selector(&self) -> &str;
    fn bucket(&self) -> &str;
    fn bucket_region(&self) -> &str;
    fn public_base_url(&self) -> Option<&str>;
    fn title_prefix(&self) -> &str;
    fn fetch_timeout(&self) -> Duration;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Scrape the HTML listing page.
    Page,
    /// List objects in a storage bucket.
    Bucket,
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "page" => Ok(SourceKind::Page),
            "bucket" => Ok(SourceKind::Bucket),
            other => Err(format!("unknown source kind: {}", other)),
        }
    }
}
