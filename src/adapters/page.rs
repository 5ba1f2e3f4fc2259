use crate::core::{FetchDeadline, NamingRule, RawEntry, SourceAdapter};
use crate::utils::error::{IssueError, Result};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

pub const DEFAULT_PAGE_URL: &str = "https://readme.abakus.no/";
pub const DEFAULT_ITEM_SELECTOR: &str = ".col-xs-6";

/// Scrapes issue entries from an HTML listing page.
///
/// Each element matching the item selector is one entry: the `alt` text of
/// its image is the name, the image `src` and link `href` are the locators.
pub struct PageSource {
    client: Client,
    url: Url,
    item_selector: String,
}

impl PageSource {
    pub fn new(url: &str, item_selector: impl Into<String>) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| IssueError::ConfigError {
            message: format!("Invalid page URL {}: {}", url, e),
        })?;

        Ok(Self {
            client: Client::new(),
            url,
            item_selector: item_selector.into(),
        })
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    async fn download(&self) -> Result<Vec<u8>> {
        tracing::debug!("Requesting listing page: {}", self.url);
        let response = self.client.get(self.url.clone()).send().await?;

        tracing::debug!("Listing page status: {}", response.status());
        if !response.status().is_success() {
            return Err(IssueError::FetchError {
                message: format!("HTTP {} from {}", response.status(), self.url),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Parses a downloaded page into raw entries.
    pub fn parse_entries(&self, body: &[u8]) -> Result<Vec<RawEntry>> {
        let html = std::str::from_utf8(body).map_err(|e| IssueError::ParseError {
            message: format!("Page is not valid UTF-8: {}", e),
        })?;

        let item_selector = parse_selector(&self.item_selector)?;
        let img_selector = parse_selector("img")?;
        let link_selector = parse_selector("a")?;

        let document = Html::parse_document(html);
        let entries = document
            .select(&item_selector)
            .map(|item| RawEntry {
                name: first_attr(&item, &img_selector, "alt").unwrap_or_default(),
                image: first_attr(&item, &img_selector, "src").map(|src| self.resolve(&src)),
                document: first_attr(&item, &link_selector, "href").map(|href| self.resolve(&href)),
            })
            .collect();

        Ok(entries)
    }

    fn resolve(&self, locator: &str) -> String {
        self.url
            .join(locator)
            .map(String::from)
            .unwrap_or_else(|_| locator.to_string())
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| IssueError::ParseError {
        message: format!("Invalid selector {}: {}", selector, e),
    })
}

fn first_attr(item: &ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    item.select(selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(str::to_string)
}

#[async_trait]
impl SourceAdapter for PageSource {
    fn naming_rule(&self) -> NamingRule {
        NamingRule::IssueThenYear
    }

    async fn fetch(
        &self,
        _scope_prefix: Option<&str>,
        deadline: FetchDeadline,
    ) -> Result<Vec<RawEntry>> {
        let until = tokio::time::Instant::from_std(deadline.instant());
        let body = tokio::time::timeout_at(until, self.download())
            .await
            .map_err(|_| IssueError::FetchError {
                message: format!("Timed out fetching {}", self.url),
            })??;

        let entries = self.parse_entries(&body)?;
        tracing::debug!("Found {} entries on {}", entries.len(), self.url);
        Ok(entries)
    }
}
