#![allow(clippy::collapsible_if)]
//! Search orchestration on top of the extraction engine: fetch a search
//! URL, classify what came back, extract it and wrap it in [`SearchResults`].

pub mod config;
pub mod events;
pub mod http;
pub mod searcher;

use marquee_core::ErrorCode;
use marquee_metadata::FetchError;
use thiserror::Error;

pub use config::SearchConfig;
pub use events::{ObserverSet, SearchEvent, SearchObserver};
pub use http::HttpFetcher;
pub use searcher::{SearchMatch, SearchResults, Searchable, Searcher};

#[derive(Error, Debug)]
pub enum SearchError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("could not determine page type of {url}")]
    UnknownPageType { url: String },
    #[error("search did not produce exactly one full title")]
    NoExactMatch,
}

impl ErrorCode for SearchError {
    fn code(&self) -> &'static str {
        match self {
            Self::Fetch(e) => e.code(),
            Self::UnknownPageType { .. } => "unknown_page_type",
            Self::NoExactMatch => "no_exact_match",
        }
    }
}
