//! Fetch → classify → extract, wrapped in a result envelope.

use std::sync::Arc;

use marquee_core::{PageType, SearchResultSummary, Title, TitleId, TitleRecord, urls};
use marquee_metadata::{
    ExtractError, PageFetcher, classify, enrich_title, extract_search_results, parse_title_page,
};
use scraper::Html;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::SearchError;
use crate::config::SearchConfig;
use crate::events::{ObserverSet, SearchEvent, SearchObserver};
use crate::http::HttpFetcher;

/// Anything that can be looked up on the site.
pub trait Searchable {
    fn search_term(&self) -> &str;
}

impl Searchable for str {
    fn search_term(&self) -> &str {
        self
    }
}

impl Searchable for String {
    fn search_term(&self) -> &str {
        self
    }
}

impl Searchable for TitleId {
    fn search_term(&self) -> &str {
        self.as_str()
    }
}

/// Known titles are searched by id, which lands on their title page.
impl Searchable for TitleRecord {
    fn search_term(&self) -> &str {
        self.id().as_str()
    }
}

impl Searchable for SearchResultSummary {
    fn search_term(&self) -> &str {
        self.id().as_str()
    }
}

/// One entry of a search: a fully extracted title or a result-list row.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "match", rename_all = "snake_case")]
pub enum SearchMatch {
    Title(Title),
    Summary(SearchResultSummary),
}

impl SearchMatch {
    pub fn id(&self) -> &TitleId {
        match self {
            Self::Title(t) => t.id(),
            Self::Summary(s) => s.id(),
        }
    }

    pub fn as_title(&self) -> Option<&Title> {
        match self {
            Self::Title(t) => Some(t),
            Self::Summary(_) => None,
        }
    }
}

impl std::fmt::Display for SearchMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Title(t) => std::fmt::Display::fmt(t, f),
            Self::Summary(s) => std::fmt::Display::fmt(s, f),
        }
    }
}

/// Outcome of one search, matches in page order.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub url: String,
    pub page_type: PageType,
    matches: Vec<SearchMatch>,
}

impl SearchResults {
    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    pub fn into_matches(self) -> Vec<SearchMatch> {
        self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// True when the search resolved to exactly one fully extracted title.
    pub fn is_exact_match(&self) -> bool {
        matches!(self.matches.as_slice(), [SearchMatch::Title(_)])
    }

    pub fn exact_match(&self) -> Result<&Title, SearchError> {
        match self.matches.as_slice() {
            [SearchMatch::Title(t)] => Ok(t),
            _ => Err(SearchError::NoExactMatch),
        }
    }
}

pub struct Searcher {
    config: SearchConfig,
    fetcher: Arc<dyn PageFetcher>,
    observers: ObserverSet,
}

impl Searcher {
    /// Searcher over HTTP using `config`.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    pub fn with_fetcher(config: SearchConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            config,
            fetcher,
            observers: ObserverSet::new(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn add_observer(&mut self, observer: impl SearchObserver + 'static) {
        self.observers.add(observer);
    }

    /// [`Searcher::search`] with the configured thumbnail setting.
    pub async fn search_query(&self, query: &str) -> Result<Option<SearchResults>, SearchError> {
        self.search(query, self.config.fetch_thumbnails).await
    }

    /// Run one search. A blank term yields `Ok(None)` without any request.
    pub async fn search<S: Searchable + ?Sized>(
        &self,
        searchable: &S,
        fetch_thumbnail: bool,
    ) -> Result<Option<SearchResults>, SearchError> {
        let query = searchable.search_term().trim();
        if query.is_empty() {
            debug!("blank search term; nothing to do");
            return Ok(None);
        }

        let url = urls::search_url(&self.config.base_url, query);
        info!(query = %query, url = %url, fetcher = self.fetcher.name(), "searching");

        let html = self.fetcher.fetch_page(&url).await?;
        self.observers.notify(&SearchEvent::PageFetched {
            url: url.clone(),
            bytes: html.len(),
        });

        let (page_type, mut matches, title) = {
            let document = Html::parse_document(&html);
            self.observers
                .notify(&SearchEvent::PageParsed { url: url.clone() });

            let page_type = classify(&document);
            self.observers.notify(&SearchEvent::PageTypeDetermined {
                url: url.clone(),
                page_type,
            });

            match page_type {
                PageType::SearchResults => {
                    let rows = extract_search_results(&document)
                        .into_iter()
                        .map(SearchMatch::Summary)
                        .collect::<Vec<_>>();
                    (page_type, rows, None)
                }
                PageType::TitlePage => match parse_title_page(&document) {
                    Ok(title) => (page_type, Vec::new(), Some(title)),
                    Err(ExtractError::NoId) => {
                        warn!(url = %url, "title page without an id; no matches");
                        (page_type, Vec::new(), None)
                    }
                    Err(ExtractError::UnknownPageType) => {
                        return Err(SearchError::UnknownPageType { url });
                    }
                },
                PageType::Unknown => return Err(SearchError::UnknownPageType { url }),
            }
        };

        if let Some(mut title) = title {
            enrich_title(&mut title, fetch_thumbnail, self.fetcher.as_ref()).await;
            matches.push(SearchMatch::Title(title));
        }

        debug!(url = %url, page_type = %page_type, matches = matches.len(), "search complete");
        Ok(Some(SearchResults {
            query: query.to_string(),
            url,
            page_type,
            matches,
        }))
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("config", &self.config)
            .field("fetcher", &self.fetcher.name())
            .field("observers", &self.observers)
            .finish()
    }
}
