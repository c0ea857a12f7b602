//! Page-type detection.
//!
//! The canonical link decides when present (`/title/…` or `/find…`);
//! otherwise the search-page marker in the meta title or `<title>` does.

use std::sync::LazyLock;

use marquee_core::PageType;
use scraper::{Html, Selector};

use crate::html::{first, text_of};

/// Marker the site puts in the title of its search pages.
const SEARCH_MARKER: &str = "IMDb Search";

static SEL_CANONICAL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("head > link[rel=canonical][href]").unwrap());
static SEL_META_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("head > meta[name=title][content]").unwrap());
static SEL_TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("head > title").unwrap());

pub fn classify(document: &Html) -> PageType {
    if let Some(href) = canonical_href(document) {
        if href.contains("/title/") {
            return PageType::TitlePage;
        }
        if href.contains("/find") {
            return PageType::SearchResults;
        }
    }

    let marked = |text: Option<String>| text.is_some_and(|t| t.contains(SEARCH_MARKER));
    if marked(meta_title_content(document)) || marked(document_title(document)) {
        return PageType::SearchResults;
    }

    PageType::Unknown
}

/// `href` of `<link rel="canonical">`, if any.
pub fn canonical_href(document: &Html) -> Option<String> {
    first(document, &SEL_CANONICAL)
        .and_then(|el| el.value().attr("href"))
        .map(str::to_string)
}

pub fn meta_title_content(document: &Html) -> Option<String> {
    first(document, &SEL_META_TITLE)
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
}

pub fn document_title(document: &Html) -> Option<String> {
    first(document, &SEL_TITLE).map(text_of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures;

    fn page(head: &str) -> Html {
        Html::parse_document(&format!("<html><head>{head}</head><body></body></html>"))
    }

    #[test]
    fn canonical_title_path() {
        let doc = page(r#"<link rel="canonical" href="http://www.imdb.com/title/tt1127180/" />"#);
        assert_eq!(classify(&doc), PageType::TitlePage);
    }

    #[test]
    fn canonical_search_path() {
        let doc = page(r#"<link rel="canonical" href="http://www.imdb.com/find?s=all&q=ring" />"#);
        assert_eq!(classify(&doc), PageType::SearchResults);
    }

    #[test]
    fn meta_title_marker() {
        let doc = page(r#"<meta name="title" content="IMDb Search: ring" /><title>whatever</title>"#);
        assert_eq!(classify(&doc), PageType::SearchResults);
    }

    #[test]
    fn document_title_marker() {
        let doc = page("<title>IMDb Search</title>");
        assert_eq!(classify(&doc), PageType::SearchResults);
    }

    #[test]
    fn canonical_without_known_path_falls_back() {
        let doc = page(
            r#"<link rel="canonical" href="http://www.imdb.com/chart/top" /><title>IMDb Search</title>"#,
        );
        assert_eq!(classify(&doc), PageType::SearchResults);
    }

    #[test]
    fn nothing_recognisable_is_unknown() {
        for head in [
            "",
            "<title>Some Blog</title>",
            r#"<link rel="canonical" href="http://example.com/about" /><meta name="title" content="About us" />"#,
        ] {
            assert_eq!(classify(&page(head)), PageType::Unknown, "head: {head}");
        }
    }

    #[test]
    fn fixtures_classify() {
        let movie = Html::parse_document(test_fixtures::MOVIE_PAGE);
        let search = Html::parse_document(test_fixtures::SEARCH_PAGE);
        assert_eq!(classify(&movie), PageType::TitlePage);
        assert_eq!(classify(&search), PageType::SearchResults);
    }
}
