use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// One periodical issue extracted from a source listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub title: String,
    pub image: String,
    pub document: String,
    pub year: i32,
    pub issue_number: i32,
}

/// Caller supplied constraints. `None` means no constraint on that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueFilter {
    pub year: Option<i32>,
    pub issue_number: Option<i32>,
    pub first: Option<usize>,
}

impl IssueFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn issue_number(mut self, issue_number: i32) -> Self {
        self.issue_number = Some(issue_number);
        self
    }

    pub fn first(mut self, first: usize) -> Self {
        self.first = Some(first);
        self
    }

    /// Listing scope for the source, `"<year>/"` when a year is set.
    pub fn scope_prefix(&self) -> Option<String> {
        self.year.map(|year| format!("{}/", year))
    }
}

/// An unstructured source record before extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub name: String,
    pub image: Option<String>,
    pub document: Option<String>,
}

impl RawEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// How the year and issue number are encoded in a raw entry name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingRule {
    /// `"<issue> <year>"`, e.g. the alt text `"3 2017"`.
    IssueThenYear,
    /// `"<year>-<issue>"`, e.g. the object key `"2019/2019-03.pdf"`.
    YearDashIssue,
}

/// Point in time after which a source fetch is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchDeadline {
    at: Instant,
}

impl FetchDeadline {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

    pub fn after(timeout: Duration) -> Self {
        Self {
            at: Instant::now() + timeout,
        }
    }

    pub fn instant(&self) -> Instant {
        self.at
    }

    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }
}

impl Default for FetchDeadline {
    fn default() -> Self {
        Self::after(Self::DEFAULT_TIMEOUT)
    }
}
