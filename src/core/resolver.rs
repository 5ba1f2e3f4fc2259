use crate::core::extractor::RecordExtractor;
use crate::core::query;
use crate::core::{FetchDeadline, Issue, IssueFilter, IssueQueries, RawEntry, SourceAdapter};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Composes a source, the extractor and the query engine.
///
/// Holds no per-request state: every call fetches, extracts and queries its
/// own collection, so one resolver can be shared across concurrent requests.
pub struct IssueResolver<S: SourceAdapter> {
    source: S,
    extractor: RecordExtractor,
    fetch_timeout: Duration,
}

impl<S: SourceAdapter> IssueResolver<S> {
    pub fn new(source: S) -> Self {
        let extractor = RecordExtractor::new(source.naming_rule());
        Self {
            source,
            extractor,
            fetch_timeout: FetchDeadline::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_title_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.extractor = self.extractor.with_title_prefix(prefix);
        self
    }

    async fn fetch(&self, scope_prefix: Option<&str>) -> Result<Vec<RawEntry>> {
        tracing::debug!("fetching: scope {:?}", scope_prefix);
        let deadline = FetchDeadline::after(self.fetch_timeout);
        let entries = self
            .source
            .fetch(scope_prefix, deadline)
            .await
            .inspect_err(|e| tracing::warn!("fetching failed: {}", e))?;
        tracing::debug!("fetched {} raw entries", entries.len());
        Ok(entries)
    }

    fn extract(&self, entries: &[RawEntry]) -> Result<Vec<Issue>> {
        tracing::debug!("extracting: {} entries", entries.len());
        self.extractor
            .extract_all(entries)
            .inspect_err(|e| tracing::warn!("extracting failed: {}", e))
    }
}

#[async_trait]
impl<S: SourceAdapter> IssueQueries for IssueResolver<S> {
    async fn list_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>> {
        let scope = filter.scope_prefix();
        let entries = self.fetch(scope.as_deref()).await?;
        let issues = self.extract(&entries)?;

        tracing::debug!("querying: {} issues with {:?}", issues.len(), filter);
        let result = query::filter_and_sort(issues, filter);
        tracing::info!("Resolved {} issues", result.len());
        Ok(result)
    }

    async fn latest_issue(&self) -> Result<Option<Issue>> {
        let entries = self.fetch(None).await?;
        if entries.is_empty() {
            tracing::info!("Source is empty, no latest issue");
            return Ok(None);
        }

        let issues = self.extract(&entries)?;
        let latest = query::latest(issues);
        tracing::info!("Resolved latest issue: {:?}", latest.as_ref().map(|i| &i.title));
        Ok(latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NamingRule;
    use crate::utils::error::IssueError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct MockSource {
        entries: Vec<RawEntry>,
        error: Option<&'static str>,
        delay: Option<Duration>,
        calls: Arc<AtomicUsize>,
        scopes: Arc<Mutex<Vec<Option<String>>>>,
    }

    impl MockSource {
        fn new(names: &[&str]) -> Self {
            Self {
                entries: names.iter().map(|n| RawEntry::named(*n)).collect(),
                error: None,
                delay: None,
                calls: Arc::new(AtomicUsize::new(0)),
                scopes: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn corpus() -> Self {
            let names: Vec<String> = [2017, 2016]
                .iter()
                .flat_map(|year| (1..=6).map(move |n| format!("{} {}", n, year)))
                .collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            Self::new(&refs)
        }
    }

    #[async_trait]
    impl SourceAdapter for MockSource {
        fn naming_rule(&self) -> NamingRule {
            NamingRule::IssueThenYear
        }

        async fn fetch(
            &self,
            scope_prefix: Option<&str>,
            deadline: FetchDeadline,
        ) -> Result<Vec<RawEntry>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.scopes
                .lock()
                .unwrap()
                .push(scope_prefix.map(str::to_string));

            if let Some(delay) = self.delay {
                let until = tokio::time::Instant::from_std(deadline.instant());
                tokio::time::timeout_at(until, tokio::time::sleep(delay))
                    .await
                    .map_err(|_| IssueError::FetchError {
                        message: "Timed out".to_string(),
                    })?;
            }
            if let Some(message) = self.error {
                return Err(IssueError::FetchError {
                    message: message.to_string(),
                });
            }
            Ok(self.entries.clone())
        }
    }

    fn titles(issues: &[Issue]) -> Vec<&str> {
        issues.iter().map(|i| i.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_issues_by_year() {
        let source = MockSource::corpus();
        let scopes = source.scopes.clone();
        let resolver = IssueResolver::new(source);

        let issues = resolver
            .list_issues(&IssueFilter::new().year(2017))
            .await
            .unwrap();

        assert_eq!(
            titles(&issues),
            vec!["6 2017", "5 2017", "4 2017", "3 2017", "2 2017", "1 2017"]
        );
        assert_eq!(*scopes.lock().unwrap(), vec![Some("2017/".to_string())]);
    }

    #[tokio::test]
    async fn test_list_issues_by_number() {
        let resolver = IssueResolver::new(MockSource::corpus());
        let issues = resolver
            .list_issues(&IssueFilter::new().issue_number(3))
            .await
            .unwrap();

        assert_eq!(titles(&issues), vec!["3 2017", "3 2016"]);
    }

    #[tokio::test]
    async fn test_list_issues_first() {
        let resolver = IssueResolver::new(MockSource::corpus());
        let filter = IssueFilter::new().year(2017).issue_number(3).first(1);
        let issues = resolver.list_issues(&filter).await.unwrap();

        assert_eq!(titles(&issues), vec!["3 2017"]);
    }

    #[tokio::test]
    async fn test_list_issues_without_matches() {
        let resolver = IssueResolver::new(MockSource::new(&["cover", "about us"]));
        let result = resolver.list_issues(&IssueFilter::default()).await;

        assert!(matches!(result, Err(IssueError::NoElementsFound)));
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let mut source = MockSource::corpus();
        source.error = Some("connection reset");
        let resolver = IssueResolver::new(source);

        let result = resolver.list_issues(&IssueFilter::default()).await;
        match result {
            Err(IssueError::FetchError { message }) => assert_eq!(message, "connection reset"),
            other => panic!("expected fetch error, got {:?}", other),
        }

        assert!(resolver.latest_issue().await.is_err());
    }

    #[tokio::test]
    async fn test_slow_source_is_cancelled() {
        let mut source = MockSource::corpus();
        source.delay = Some(Duration::from_secs(5));
        let resolver = IssueResolver::new(source).with_fetch_timeout(Duration::from_millis(50));

        let result = resolver.list_issues(&IssueFilter::default()).await;
        assert!(matches!(result, Err(IssueError::FetchError { .. })));
    }

    #[tokio::test]
    async fn test_latest_issue() {
        let source = MockSource::corpus();
        let calls = source.calls.clone();
        let resolver = IssueResolver::new(source);

        let latest = resolver.latest_issue().await.unwrap().unwrap();
        assert_eq!(latest.title, "6 2017");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_latest_issue_on_empty_source() {
        let resolver = IssueResolver::new(MockSource::new(&[]));
        assert_eq!(resolver.latest_issue().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_latest_issue_without_matches() {
        let resolver = IssueResolver::new(MockSource::new(&["cover"]));
        assert!(matches!(
            resolver.latest_issue().await,
            Err(IssueError::NoElementsFound)
        ));
    }

    #[tokio::test]
    async fn test_calls_do_not_share_state() {
        let source = MockSource::corpus();
        let calls = source.calls.clone();
        let resolver = Arc::new(IssueResolver::new(source));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let resolver = resolver.clone();
                tokio::spawn(async move {
                    resolver
                        .list_issues(&IssueFilter::new().issue_number(1))
                        .await
                })
            })
            .collect();

        for handle in handles {
            let issues = handle.await.unwrap().unwrap();
            assert_eq!(titles(&issues), vec!["1 2017", "1 2016"]);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
