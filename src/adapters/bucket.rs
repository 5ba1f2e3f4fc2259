use crate::core::{FetchDeadline, NamingRule, ObjectLister, RawEntry, SourceAdapter};
use crate::utils::error::{IssueError, Result};
use async_trait::async_trait;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];

fn object_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<stem>.*\b\d{4}-\d{2})\.(?P<ext>[A-Za-z0-9]+)$")
            .expect("valid object name pattern")
    })
}

#[derive(Debug, PartialEq, Eq)]
enum ObjectRole {
    Image,
    Document,
}

/// Splits a key such as `2019/2019-03.pdf` into its stem and role.
fn classify(key: &str) -> Option<(&str, ObjectRole)> {
    let caps = object_name().captures(key)?;
    let stem = caps.name("stem")?.as_str();
    let ext = caps.name("ext")?.as_str().to_ascii_lowercase();

    if DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
        Some((stem, ObjectRole::Document))
    } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some((stem, ObjectRole::Image))
    } else {
        None
    }
}

/// Builds raw entries from the objects of a storage bucket.
///
/// The document and cover image of one issue share a key stem
/// (`2019/2019-03.pdf`, `2019/2019-03.jpg`) and become one entry.
pub struct BucketSource<L: ObjectLister> {
    lister: L,
    bucket: String,
    public_base_url: String,
}

impl<L: ObjectLister> BucketSource<L> {
    pub fn new(lister: L, bucket: impl Into<String>) -> Self {
        let bucket = bucket.into();
        let public_base_url = default_public_base_url(&bucket);
        Self {
            lister,
            bucket,
            public_base_url,
        }
    }

    pub fn with_public_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.public_base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key.trim_start_matches('/'))
    }

    pub fn group_entries(&self, keys: &[String]) -> Vec<RawEntry> {
        let mut grouped: BTreeMap<&str, RawEntry> = BTreeMap::new();

        for key in keys {
            let Some((stem, role)) = classify(key) else {
                tracing::debug!("Skipping object {}", key);
                continue;
            };

            let entry = grouped.entry(stem).or_insert_with(|| RawEntry::named(stem));
            match role {
                ObjectRole::Image => entry.image = Some(self.public_url(key)),
                ObjectRole::Document => entry.document = Some(self.public_url(key)),
            }
        }

        grouped.into_values().collect()
    }
}

pub fn default_public_base_url(bucket: &str) -> String {
    format!("https://{}.s3.amazonaws.com", bucket)
}

#[async_trait]
impl<L: ObjectLister> SourceAdapter for BucketSource<L> {
    fn naming_rule(&self) -> NamingRule {
        NamingRule::YearDashIssue
    }

    async fn fetch(
        &self,
        scope_prefix: Option<&str>,
        deadline: FetchDeadline,
    ) -> Result<Vec<RawEntry>> {
        tracing::debug!(
            "Listing bucket {} with prefix {:?}",
            self.bucket,
            scope_prefix
        );

        let until = tokio::time::Instant::from_std(deadline.instant());
        let keys = tokio::time::timeout_at(until, self.lister.list_keys(&self.bucket, scope_prefix))
            .await
            .map_err(|_| IssueError::StorageError {
                message: format!("Timed out listing bucket {}", self.bucket),
            })??;

        let entries = self.group_entries(&keys);
        tracing::debug!(
            "Grouped {} objects into {} entries",
            keys.len(),
            entries.len()
        );
        Ok(entries)
    }
}
