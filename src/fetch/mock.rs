use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::PageFetcher;
use super::error::FetchError;
use super::extract::extract_paragraph_text;

#[derive(Debug, Clone)]
enum StaticPage {
    Html(String),
    Status(u16),
    Unreachable,
}

/// In-memory fetcher: serves canned HTML per URL, anything else is unreachable.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, StaticPage>,
    requests: AtomicUsize,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `html` for `url`.
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages
            .insert(url.to_string(), StaticPage::Html(html.to_string()));
        self
    }

    /// Answers `url` with a non-2xx `status`.
    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), StaticPage::Status(status));
        self
    }

    /// Makes `url` fail as a connection error (same as an unknown URL).
    pub fn with_unreachable(mut self, url: &str) -> Self {
        self.pages.insert(url.to_string(), StaticPage::Unreachable);
        self
    }

    /// Number of `fetch_text` calls served so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        match self.pages.get(url) {
            Some(StaticPage::Html(html)) => Ok(extract_paragraph_text(html)),
            Some(StaticPage::Status(status)) if (200..300).contains(status) => Ok(String::new()),
            Some(StaticPage::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            Some(StaticPage::Unreachable) | None => Err(FetchError::Request {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}
