use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A (season, episode) pair, rendered as `S01E02`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeasonEpisodeNumber {
    pub season: u32,
    pub episode: u32,
}

impl SeasonEpisodeNumber {
    pub fn new(season: u32, episode: u32) -> Self {
        Self { season, episode }
    }
}

impl std::fmt::Display for SeasonEpisodeNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "S{:02}E{:02}", self.season, self.episode)
    }
}

/// One episode of a season.
///
/// `season_number` points back at the owning [`Season`] by number; seasons
/// own their episodes, never the other way round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub season_number: u32,
    pub number: u32,
    pub title: Option<String>,
    pub air_date: Option<NaiveDate>,
    pub plot: Option<String>,
}

impl Episode {
    pub fn new(season_number: u32, number: u32) -> Self {
        Self {
            season_number,
            number,
            title: None,
            air_date: None,
            plot: None,
        }
    }

    pub fn season_episode_number(&self) -> SeasonEpisodeNumber {
        SeasonEpisodeNumber::new(self.season_number, self.number)
    }

    /// True when the site had no real title and filled in `Episode #S.E`.
    pub fn is_title_default(&self) -> bool {
        self.title.as_deref()
            == Some(format!("Episode #{}.{}", self.season_number, self.number).as_str())
    }
}

impl std::fmt::Display for Episode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.season_episode_number(),
            self.title.as_deref().unwrap_or("")
        )
    }
}

/// A numbered season holding episodes in the order they were extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    number: u32,
    episodes: Vec<Episode>,
}

impl Season {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            episodes: Vec::new(),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn episode(&self, number: u32) -> Option<&Episode> {
        self.episodes.iter().find(|e| e.number == number)
    }

    pub fn has_episode(&self, number: u32) -> bool {
        self.episode(number).is_some()
    }

    /// Append an episode. An episode number already present is rejected and
    /// the existing entry is left untouched.
    pub fn add_episode(&mut self, mut episode: Episode) -> Result<(), ModelError> {
        if self.has_episode(episode.number) {
            return Err(ModelError::DuplicateEpisode {
                season: self.number,
                episode: episode.number,
            });
        }
        episode.season_number = self.number;
        self.episodes.push(episode);
        Ok(())
    }
}
