use async_trait::async_trait;
use reqwest::{Client as HttpClient, Url};
use tracing::debug;

use super::PageFetcher;
use super::config::FetchConfig;
use super::error::FetchError;
use super::extract::extract_paragraph_text;

/// Parses `url` and checks that it is plain HTTP(S).
pub fn parse_http_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url.trim()).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(FetchError::UnsupportedScheme {
            url: url.to_string(),
            scheme: scheme.to_string(),
        }),
    }
}

/// reqwest-backed fetcher: one GET per call, no retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: HttpClient,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        config
            .validate()
            .map_err(|reason| FetchError::ClientBuild { reason })?;

        let http = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::ClientBuild {
                reason: e.to_string(),
            })?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches the raw body of `url`, failing on any non-2xx status.
    pub async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let parsed = parse_http_url(url)?;

        let response = self
            .http
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let html = self.fetch_html(url).await?;
        let text = extract_paragraph_text(&html);

        debug!(
            url,
            html_len = html.len(),
            text_len = text.len(),
            "Fetched page"
        );

        Ok(text)
    }
}
