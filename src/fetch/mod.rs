//! Page fetching: one HTTP GET, reduced to the page's paragraph text.

pub mod config;
pub mod error;
pub mod extract;
pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use config::FetchConfig;
pub use error::FetchError;
pub use extract::extract_paragraph_text;
pub use http::{HttpFetcher, parse_http_url};
#[cfg(any(test, feature = "mock"))]
pub use mock::StaticFetcher;

use async_trait::async_trait;

#[async_trait]
/// Source of page text for the validator.
pub trait PageFetcher: Send + Sync {
    /// Returns the paragraph text of `url`.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}
