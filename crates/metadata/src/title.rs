//! Title page extraction and the follow-up fetches it needs.
//!
//! Parsing is synchronous and works on a borrowed document. Enrichment
//! (thumbnail bytes, the episode listing of a series) happens afterwards
//! against owned data, so the document never lives across an await.

use marquee_core::{Title, TitleKind, TitleRecord, urls};
use scraper::Html;
use tracing::{debug, info, warn};

use crate::episodes::{EpisodeListing, reconcile};
use crate::fetch::PageFetcher;
use crate::{ExtractError, FetchError, fields};

/// Read every field the title page carries. Fails only when the page has
/// no title id; any other missing field is left empty.
pub fn parse_title_page(document: &Html) -> Result<Title, ExtractError> {
    let id = fields::title_id(document).ok_or(ExtractError::NoId)?;
    let kind = fields::title_kind(document);
    let mut title = Title::new(kind, id);

    let full = title.full_mut();
    full.record.title = fields::title_text(document);
    full.record.year = match kind {
        TitleKind::Movie => fields::movie_year(document),
        TitleKind::Series => fields::series_year(document),
    };
    full.rating = fields::rating(document);
    full.genres = fields::genres(document);
    full.stars = fields::stars(document);
    full.tagline = fields::tagline(document);
    full.plot = fields::plot(document);
    full.thumbnail_url = fields::thumbnail_url(document);

    debug!(
        title_id = %full.id(),
        kind = %kind,
        title = full.record.title.as_deref().unwrap_or_default(),
        "parsed title page"
    );
    Ok(title)
}

/// Parse an episode listing fetched for `series`.
pub fn parse_episode_listing(html: &str, series: &TitleRecord) -> EpisodeListing {
    let document = Html::parse_document(html);
    reconcile(&document, series)
}

/// Fetch the thumbnail (when asked to and the page had one) and, for a
/// series, the episode listing. The two fetches run concurrently and neither
/// failure affects the other or the fields already parsed.
pub async fn enrich_title(title: &mut Title, fetch_thumbnail: bool, fetcher: &dyn PageFetcher) {
    let thumbnail_url = title
        .full()
        .thumbnail_url
        .clone()
        .filter(|_| fetch_thumbnail);
    let record = title.record().clone();
    let is_series = title.as_series().is_some();

    let thumbnail_fut = async {
        match thumbnail_url {
            Some(url) => {
                let result = fetcher.fetch_image(&url).await;
                Some(result.map_err(|e| (url, e)))
            }
            None => None,
        }
    };
    let listing_fut = async {
        if is_series {
            Some(fetch_episode_listing(&record, fetcher).await)
        } else {
            None
        }
    };
    let (thumbnail, listing) = tokio::join!(thumbnail_fut, listing_fut);

    match thumbnail {
        Some(Ok(image)) => title.full_mut().thumbnail = Some(image),
        Some(Err((url, e))) => {
            warn!(title_id = %record.id(), url = %url, error = %e, "thumbnail fetch failed");
        }
        None => {}
    }

    if let Title::Series(series) = title {
        match listing {
            Some(Ok(listing)) => {
                info!(
                    title_id = %record.id(),
                    seasons = listing.seasons.len(),
                    episodes = listing.episode_count(),
                    duplicates = listing.duplicates.len(),
                    "episode listing reconciled"
                );
                series.seasons = Some(listing.seasons);
            }
            Some(Err(e)) => {
                warn!(title_id = %record.id(), error = %e, "episode listing fetch failed");
            }
            None => {}
        }
    }
}

async fn fetch_episode_listing(
    series: &TitleRecord,
    fetcher: &dyn PageFetcher,
) -> Result<EpisodeListing, FetchError> {
    let url = urls::episode_cast_url(&series.url());
    let html = fetcher.fetch_page(&url).await?;
    Ok(parse_episode_listing(&html, series))
}

/// Parse a title page from raw HTML and enrich it.
pub async fn extract_title_page(
    html: &str,
    fetch_thumbnail: bool,
    fetcher: &dyn PageFetcher,
) -> Result<Title, ExtractError> {
    let mut title = {
        let document = Html::parse_document(html);
        parse_title_page(&document)?
    };
    enrich_title(&mut title, fetch_thumbnail, fetcher).await;
    Ok(title)
}
