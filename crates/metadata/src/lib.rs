#![allow(clippy::collapsible_if)]
//! Extraction engine: turns title and search pages into typed records.

pub mod classify;
pub mod dates;
pub mod episodes;
pub mod fetch;
pub mod fields;
mod html;
pub mod search;
pub mod title;

#[cfg(test)]
pub(crate) mod test_fixtures;

use marquee_core::{ErrorCode, PageType, SearchResultSummary, Title};
use scraper::Html;
use thiserror::Error;

pub use classify::classify;
pub use dates::parse_air_date;
pub use episodes::{EpisodeListing, reconcile};
pub use fetch::PageFetcher;
pub use search::extract_search_results;
pub use title::{enrich_title, extract_title_page, parse_episode_listing, parse_title_page};

/// Outcomes that leave a document without a usable record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no title id found on page")]
    NoId,
    #[error("could not determine page type")]
    UnknownPageType,
}

impl ErrorCode for ExtractError {
    fn code(&self) -> &'static str {
        match self {
            Self::NoId => "no_id",
            Self::UnknownPageType => "unknown_page_type",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
    #[error("failed to read body: {0}")]
    Body(String),
}

impl ErrorCode for FetchError {
    fn code(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Status { .. } => "bad_status",
            Self::UnsupportedContentType(_) => "unsupported_content_type",
            Self::Body(_) => "body",
        }
    }
}

/// What a document yielded.
#[derive(Debug, Clone)]
pub enum Extraction {
    Title(Title),
    SearchResults(Vec<SearchResultSummary>),
}

/// Run the full pipeline over raw HTML: classify (unless the caller already
/// knows the page type), then extract the title or the result list.
pub async fn extract_document(
    html: &str,
    page_type: Option<PageType>,
    fetch_thumbnail: bool,
    fetcher: &dyn PageFetcher,
) -> Result<Extraction, ExtractError> {
    let mut title = {
        let document = Html::parse_document(html);
        let page_type = match page_type {
            Some(PageType::Unknown) | None => classify(&document),
            Some(known) => known,
        };
        match page_type {
            PageType::SearchResults => {
                return Ok(Extraction::SearchResults(extract_search_results(
                    &document,
                )));
            }
            PageType::TitlePage => parse_title_page(&document)?,
            PageType::Unknown => return Err(ExtractError::UnknownPageType),
        }
    };

    enrich_title(&mut title, fetch_thumbnail, fetcher).await;
    Ok(Extraction::Title(title))
}
