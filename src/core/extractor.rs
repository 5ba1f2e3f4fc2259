use crate::core::{Issue, NamingRule, RawEntry};
use crate::utils::error::{IssueError, Result};
use regex::Regex;
use std::sync::OnceLock;

pub const DEFAULT_TITLE_PREFIX: &str = "readme utgave nr.";

fn issue_then_year() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{1,2}) (\d{4})\b").expect("valid issue/year pattern"))
}

fn year_dash_issue() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{4})-(\d{2})\b").expect("valid year-issue pattern"))
}

/// Turns raw source entries into [`Issue`]s using one [`NamingRule`].
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    rule: NamingRule,
    title_prefix: String,
}

impl RecordExtractor {
    pub fn new(rule: NamingRule) -> Self {
        Self {
            rule,
            title_prefix: DEFAULT_TITLE_PREFIX.to_string(),
        }
    }

    /// Prefix for titles built from object names. Labels are used as-is.
    pub fn with_title_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.title_prefix = prefix.into();
        self
    }

    pub fn rule(&self) -> NamingRule {
        self.rule
    }

    /// Recovers `(year, issue_number)` from a name, `None` when the name does
    /// not follow the rule.
    pub fn match_name(&self, name: &str) -> Option<(i32, i32)> {
        match self.rule {
            NamingRule::IssueThenYear => {
                let caps = issue_then_year().captures(name)?;
                let issue = caps[1].parse().ok()?;
                let year = caps[2].parse().ok()?;
                Some((year, issue))
            }
            NamingRule::YearDashIssue => {
                let caps = year_dash_issue().captures(name)?;
                let year = caps[1].parse().ok()?;
                let issue = caps[2].parse().ok()?;
                Some((year, issue))
            }
        }
    }

    pub fn extract(&self, entry: &RawEntry) -> Option<Issue> {
        let (year, issue_number) = self.match_name(&entry.name)?;

        let title = match self.rule {
            NamingRule::IssueThenYear => entry.name.trim().to_string(),
            NamingRule::YearDashIssue => {
                format!("{} {} {}", self.title_prefix, issue_number, year)
            }
        };

        Some(Issue {
            title,
            image: entry.image.clone().unwrap_or_default(),
            document: entry.document.clone().unwrap_or_default(),
            year,
            issue_number,
        })
    }

    /// Extracts every matching entry; mismatches are dropped. Fails only when
    /// nothing at all could be extracted.
    pub fn extract_all(&self, entries: &[RawEntry]) -> Result<Vec<Issue>> {
        let issues: Vec<Issue> = entries
            .iter()
            .filter_map(|entry| {
                let issue = self.extract(entry);
                if issue.is_none() {
                    tracing::debug!("Skipping unmatched entry: {:?}", entry.name);
                }
                issue
            })
            .collect();

        if issues.is_empty() {
            return Err(IssueError::NoElementsFound);
        }

        tracing::debug!(
            "Extracted {} issues from {} entries",
            issues.len(),
            entries.len()
        );
        Ok(issues)
    }
}
