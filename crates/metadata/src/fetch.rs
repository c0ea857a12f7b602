use marquee_core::Thumbnail;

use crate::FetchError;

/// Transport the extraction engine calls out to for secondary resources.
///
/// Failures are reported back and never abort an extraction: a missing
/// episode listing or thumbnail just leaves that part of the record empty.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    fn name(&self) -> &str;

    /// GET a page and return its decoded HTML.
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;

    /// GET an image and return its raw bytes.
    async fn fetch_image(&self, url: &str) -> Result<Thumbnail, FetchError>;
}
