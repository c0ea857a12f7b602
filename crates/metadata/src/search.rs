//! Search-results page extraction.

use std::sync::LazyLock;

use marquee_core::SearchResultSummary;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::fields::title_id_from_href;
use crate::html::{first, own_text_nodes, strip_quotes, text_of};

// Leading "(2009)" of a result cell's loose text.
static RE_RESULT_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\((\d{4})\)").unwrap());

static SEL_RESULTS_TABLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div#main div.findSection > table:first-of-type").unwrap()
});
static SEL_RESULT_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr > td:nth-child(2)").unwrap());
static SEL_RESULT_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a:first-of-type[href]").unwrap());
static SEL_EXTRA_INFO: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("small:last-of-type").unwrap());

/// Summaries from the first results table, in page order. Rows without a
/// title link are skipped.
pub fn extract_search_results(document: &Html) -> Vec<SearchResultSummary> {
    let Some(table) = first(document, &SEL_RESULTS_TABLE) else {
        debug!("no results table on search page");
        return Vec::new();
    };

    table.select(&SEL_RESULT_CELL).filter_map(parse_result_cell).collect()
}

fn parse_result_cell(cell: ElementRef<'_>) -> Option<SearchResultSummary> {
    let link = cell.select(&SEL_RESULT_LINK).next()?;
    let Some(id) = link.value().attr("href").and_then(title_id_from_href) else {
        debug!(text = %text_of(cell), "skipping search row without title id");
        return None;
    };

    let mut summary = SearchResultSummary::new(id);
    summary.record.title = Some(strip_quotes(&text_of(link))).filter(|t| !t.is_empty());

    let loose = own_text_nodes(cell).into_iter().next().unwrap_or_default();
    if let Some(caps) = RE_RESULT_YEAR.captures(&loose) {
        summary.record.year = caps[1].parse().ok();

        // "(2005) (TV Series)": whatever surrounds the year is extra info.
        let whole = caps.get(0)?;
        let rest = format!("{} {}", &loose[..whole.start()], &loose[whole.end()..]);
        let rest = rest.trim();
        if !rest.is_empty() {
            summary.extra_info.push(rest.to_string());
        }
    }

    summary.extra_info.extend(
        cell.select(&SEL_EXTRA_INFO)
            .map(text_of)
            .filter(|t| !t.is_empty()),
    );

    Some(summary)
}
