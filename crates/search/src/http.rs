//! `PageFetcher` over HTTP.

use marquee_core::Thumbnail;
use marquee_metadata::{FetchError, PageFetcher};
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::config::SearchConfig;

/// Content types accepted for thumbnails.
const IMAGE_TYPES: &[&str] = &["image/jpg", "image/jpeg", "image/png", "image/gif"];

/// Plain GET client. Keeps no cookies and treats anything but 200 as an
/// error.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &SearchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let url = with_scheme(url);
        debug!(url = %url, "GET");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if resp.status() != StatusCode::OK {
            return Err(FetchError::Status {
                url,
                status: resp.status().as_u16(),
            });
        }
        Ok(resp)
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.get(url).await?;
        resp.text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))
    }

    async fn fetch_image(&self, url: &str) -> Result<Thumbnail, FetchError> {
        let resp = self.get(url).await?;
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(media_type)
            .unwrap_or_default();

        if !IMAGE_TYPES.contains(&content_type.as_str()) {
            return Err(FetchError::UnsupportedContentType(content_type));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;
        Ok(Thumbnail {
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}

/// Bare `host/path` URLs get an `http://` prefix.
fn with_scheme(url: &str) -> String {
    let url = url.trim();
    if url.contains("://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}

/// `image/JPEG; charset=binary` → `image/jpeg`.
fn media_type(header: &str) -> String {
    header
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
