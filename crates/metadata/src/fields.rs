//! Independent field rules for title pages.
//!
//! Each rule reads the document and returns `None` (or an empty list) when
//! its node is missing or its text does not parse. No rule depends on
//! another, and none mutates the document.

use std::sync::LazyLock;

use marquee_core::{Person, TitleId, TitleKind};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::classify::canonical_href;
use crate::html::{first, heading_is, next_element_sibling, own_text_nodes, strip_quotes, text_of};

// "/title/tt1127180/" -> "tt1127180"
static RE_TITLE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/title/([A-Za-z0-9]+)/?").unwrap());

const NAME_PREFIX: &str = "/name/";

static SEL_INFOBAR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td#overview-top > div.infobar").unwrap());
static SEL_TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("td#overview-top > h1.header > span:first-of-type").unwrap()
});
static SEL_MOVIE_YEAR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td#overview-top > h1.header > span > a").unwrap());
static SEL_SERIES_YEAR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("td#overview-top > h1[class*=header] > span:nth-of-type(2)").unwrap()
});
static SEL_RATING: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        "td#overview-top > div[class*=star-box] > div[class*=star-box-details] \
         > strong:first-of-type > span:first-of-type",
    )
    .unwrap()
});
static SEL_SEE_MORE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[class*=see-more]").unwrap());
static SEL_OVERVIEW_TXT_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td#overview-top > div[class*=txt-block]").unwrap());
static SEL_TXT_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[class*=txt-block]").unwrap());
static SEL_STORYLINE_HEADING: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div#maindetails_center_bottom > div[class*=article] > h2").unwrap()
});
static SEL_THUMBNAIL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("td#img_primary a:first-of-type img:first-of-type").unwrap()
});
static SEL_FIRST_SPAN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span:first-of-type").unwrap());

/// Pull the title id out of an href such as `/title/tt1127180/?ref_=x`.
pub fn title_id_from_href(href: &str) -> Option<TitleId> {
    let caps = RE_TITLE_ID.captures(href.trim())?;
    TitleId::new(&caps[1]).ok()
}

/// Title id from the page's canonical link.
pub fn title_id(document: &Html) -> Option<TitleId> {
    canonical_href(document).and_then(|href| title_id_from_href(&href))
}

/// Series when the infobar mentions "series" in any case; movie otherwise.
pub fn title_kind(document: &Html) -> TitleKind {
    let is_series = first(document, &SEL_INFOBAR)
        .is_some_and(|el| text_of(el).to_lowercase().contains("series"));
    if is_series {
        TitleKind::Series
    } else {
        TitleKind::Movie
    }
}

pub fn title_text(document: &Html) -> Option<String> {
    first(document, &SEL_TITLE)
        .map(|el| strip_quotes(&text_of(el)))
        .filter(|t| !t.is_empty())
}

/// Movie year: the year link inside the heading.
pub fn movie_year(document: &Html) -> Option<i32> {
    let text = text_of(first(document, &SEL_MOVIE_YEAR)?);
    text.trim().parse().ok()
}

/// Series year: the second heading span, e.g. `(TV Series 2005–2013)`.
pub fn series_year(document: &Html) -> Option<i32> {
    parse_series_year(&text_of(first(document, &SEL_SERIES_YEAR)?))
}

/// Strip parentheses and the `TV Series` label, then read the leading
/// four characters as the start year.
pub fn parse_series_year(text: &str) -> Option<i32> {
    let cleaned = text.replace(['(', ')'], "").replace("TV Series", "");
    let cleaned = cleaned.trim();
    if cleaned.chars().count() < 4 {
        return None;
    }
    cleaned.chars().take(4).collect::<String>().parse().ok()
}

pub fn rating(document: &Html) -> Option<u8> {
    let text = text_of(first(document, &SEL_RATING)?);
    let rating = parse_rating(&text);
    if rating.is_none() {
        debug!(text = %text, "unparseable rating");
    }
    rating
}

/// `floor(score * 10)` for a 0–10 score; anything else is no rating.
pub fn parse_rating(text: &str) -> Option<u8> {
    let score: f64 = text.trim().parse().ok()?;
    if !score.is_finite() || !(0.0..=10.0).contains(&score) {
        return None;
    }
    Some((score * 10.0).floor() as u8)
}

pub fn genres(document: &Html) -> Vec<String> {
    document
        .select(&SEL_SEE_MORE)
        .find(|block| has_heading(*block, "Genres:"))
        .map(|block| {
            child_anchors(block)
                .map(|a| text_of(a))
                .filter(|g| !g.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

pub fn stars(document: &Html) -> Vec<Person> {
    let Some(block) = document
        .select(&SEL_OVERVIEW_TXT_BLOCK)
        .find(|block| has_heading(*block, "Stars:"))
    else {
        return Vec::new();
    };

    child_anchors(block)
        .filter_map(|anchor| {
            let id = anchor.value().attr("href").and_then(person_id_from_href)?;
            let name = anchor
                .select(&SEL_FIRST_SPAN)
                .next()
                .map(text_of)
                .filter(|n| !n.is_empty())?;
            Some(Person::new(Some(id), name))
        })
        .collect()
}

/// `/name/nm0515116/` -> `nm0515116`
pub fn person_id_from_href(href: &str) -> Option<String> {
    let rest = href.trim().strip_prefix(NAME_PREFIX)?;
    let id = rest.split('/').next()?.trim();
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

pub fn tagline(document: &Html) -> Option<String> {
    let block = document
        .select(&SEL_TXT_BLOCK)
        .find(|block| has_heading(*block, "Taglines"))?;
    own_text_nodes(block).into_iter().next()
}

/// First paragraph of the block following the "Storyline" heading.
pub fn plot(document: &Html) -> Option<String> {
    let heading = document
        .select(&SEL_STORYLINE_HEADING)
        .find(|h| heading_is(*h, "Storyline"))?;
    let body = next_element_sibling(heading).filter(|el| el.value().name() == "div")?;
    body.children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "p")
        .map(text_of)
        .filter(|p| !p.is_empty())
}

pub fn thumbnail_url(document: &Html) -> Option<String> {
    first(document, &SEL_THUMBNAIL)
        .and_then(|img| img.value().attr("src"))
        .map(|src| src.trim().to_string())
        .filter(|src| !src.is_empty())
}

fn has_heading(block: ElementRef<'_>, label: &str) -> bool {
    block
        .children()
        .filter_map(ElementRef::wrap)
        .any(|child| child.value().name() == "h4" && heading_is(child, label))
}

fn child_anchors<'a>(block: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    block
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "a")
}
