//! Season/episode reconciliation for the episode cast listing.
//!
//! The listing is flat: each episode is an `<h4>Season S, Episode E: …</h4>`
//! heading followed by sibling nodes in fixed positions:
//!
//! ```text
//! <h4>Season 1, Episode 1: <a>Pilot</a></h4><b>24 March 2005</b><br>plot text…
//! ```
//!
//! Headings are anchored on one by one and folded into seasons keyed by
//! number. The first entry for an episode number wins; later duplicates are
//! dropped and reported.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use marquee_core::{Episode, Season, SeasonEpisodeNumber, TitleRecord};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, error};

use crate::dates::parse_air_date;
use crate::html::{next_element_sibling, text_of, trim_to_none};

static RE_EPISODE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Season\s+(\d+),\s+Episode\s+(\d+)").unwrap());

/// Season numbers past this are treated as malformed headings; seasons are
/// stored positionally, so the number sizes the season list.
pub const MAX_SEASON: u32 = 500;

static SEL_EPISODE_HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div#tn15content > h4").unwrap());
static SEL_HEADING_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a:first-of-type").unwrap());

/// Seasons read from an episode listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeListing {
    /// `seasons[n - 1]` is season `n`; numbers never seen leave `None`.
    pub seasons: Vec<Option<Season>>,
    /// Entries dropped because their episode number was already taken.
    pub duplicates: Vec<SeasonEpisodeNumber>,
    /// Headings that did not carry a usable season/episode number.
    pub skipped: usize,
}

impl EpisodeListing {
    pub fn episode_count(&self) -> usize {
        self.seasons.iter().flatten().map(|s| s.episodes().len()).sum()
    }
}

/// Season and episode number from a heading like `Season 2, Episode 14: …`.
/// Zero is not a valid number for either, and seasons above [`MAX_SEASON`]
/// are rejected.
pub fn parse_episode_heading(text: &str) -> Option<SeasonEpisodeNumber> {
    let caps = RE_EPISODE_HEADING.captures(text)?;
    let season: u32 = caps[1].parse().ok()?;
    let episode: u32 = caps[2].parse().ok()?;
    if season == 0 || episode == 0 || season > MAX_SEASON {
        return None;
    }
    Some(SeasonEpisodeNumber::new(season, episode))
}

/// Fold the listing's headings into seasons. `series` is only used to give
/// log lines context.
pub fn reconcile(document: &Html, series: &TitleRecord) -> EpisodeListing {
    let mut season_map: BTreeMap<u32, Season> = BTreeMap::new();
    let mut listing = EpisodeListing::default();

    for heading in document.select(&SEL_EPISODE_HEADING) {
        let heading_text = text_of(heading);
        let Some(number) = parse_episode_heading(&heading_text) else {
            debug!(heading = %heading_text, "skipping heading without season/episode number");
            listing.skipped += 1;
            continue;
        };

        let episode = read_episode(heading, number);
        let season = season_map
            .entry(number.season)
            .or_insert_with(|| Season::new(number.season));

        if season.add_episode(episode).is_err() {
            error!(
                season = number.season,
                episode = number.episode,
                title_id = %series.id(),
                title = series.title.as_deref().unwrap_or_default(),
                "duplicate episode in listing; keeping the first"
            );
            listing.duplicates.push(number);
        }
    }

    listing.seasons = materialize(season_map);
    listing
}

fn read_episode(heading: ElementRef<'_>, number: SeasonEpisodeNumber) -> Episode {
    let mut episode = Episode::new(number.season, number.episode);

    episode.title = heading
        .select(&SEL_HEADING_LINK)
        .next()
        .and_then(|a| trim_to_none(&text_of(a)));

    let air_date_node = next_element_sibling(heading);
    episode.air_date = air_date_node
        .and_then(|el| trim_to_none(&text_of(el)))
        .and_then(|text| parse_air_date(&text));

    // Plot is the loose text right after the element that follows the date.
    episode.plot = air_date_node
        .and_then(next_element_sibling)
        .and_then(|el| el.next_sibling())
        .and_then(|node| node.value().as_text().and_then(|t| trim_to_none(t)));

    episode
}

fn materialize(season_map: BTreeMap<u32, Season>) -> Vec<Option<Season>> {
    let len = season_map.keys().next_back().copied().unwrap_or(0) as usize;
    let mut seasons: Vec<Option<Season>> = vec![None; len];
    for (number, season) in season_map {
        seasons[number as usize - 1] = Some(season);
    }
    seasons
}
