use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::episode::{Season, SeasonEpisodeNumber};
use crate::error::ModelError;
use crate::person::Person;
use crate::types::TitleKind;
use crate::urls;

/// Site identifier of a title (`tt1127180`). Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TitleId(String);

impl TitleId {
    pub fn new(id: impl Into<String>) -> Result<Self, ModelError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TitleId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TitleId> for String {
    fn from(id: TitleId) -> Self {
        id.0
    }
}

impl AsRef<str> for TitleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TitleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity plus the fields every title listing carries.
///
/// Equality and hashing look at `id` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleRecord {
    id: TitleId,
    pub title: Option<String>,
    pub year: Option<i32>,
}

impl TitleRecord {
    pub fn new(id: TitleId) -> Self {
        Self {
            id,
            title: None,
            year: None,
        }
    }

    pub fn id(&self) -> &TitleId {
        &self.id
    }

    pub fn url(&self) -> String {
        urls::title_url(&self.id)
    }
}

impl PartialEq for TitleRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TitleRecord {}

impl Hash for TitleRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for TitleRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title.as_deref().unwrap_or(self.id.as_str()))?;
        if let Some(year) = self.year {
            write!(f, " ({year})")?;
        }
        Ok(())
    }
}

/// Downloaded thumbnail image, kept as the raw bytes the server sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Everything read off a title page, shared by movies and series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullTitle {
    #[serde(flatten)]
    pub record: TitleRecord,
    /// 0–100; the site's 0–10 score times ten, truncated.
    pub rating: Option<u8>,
    pub genres: Vec<String>,
    pub stars: Vec<Person>,
    pub tagline: Option<String>,
    pub plot: Option<String>,
    pub thumbnail_url: Option<String>,
    #[serde(skip)]
    pub thumbnail: Option<Thumbnail>,
}

impl FullTitle {
    pub fn new(id: TitleId) -> Self {
        Self {
            record: TitleRecord::new(id),
            rating: None,
            genres: Vec::new(),
            stars: Vec::new(),
            tagline: None,
            plot: None,
            thumbnail_url: None,
            thumbnail: None,
        }
    }

    pub fn id(&self) -> &TitleId {
        self.record.id()
    }

    pub fn url(&self) -> String {
        self.record.url()
    }
}

/// A series and, once the episode listing has been read, its seasons.
///
/// `seasons[n - 1]` holds season `n`; a season number that never appeared
/// leaves `None` in its slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesTitle {
    #[serde(flatten)]
    pub title: FullTitle,
    pub seasons: Option<Vec<Option<Season>>>,
}

impl SeriesTitle {
    pub fn new(title: FullTitle) -> Self {
        Self {
            title,
            seasons: None,
        }
    }

    pub fn season(&self, number: u32) -> Option<&Season> {
        self.seasons
            .as_ref()?
            .iter()
            .flatten()
            .find(|s| s.number() == number)
    }

    pub fn has_season(&self, number: u32) -> bool {
        self.season(number).is_some()
    }

    pub fn has_season_episode(&self, number: SeasonEpisodeNumber) -> bool {
        self.season(number.season)
            .is_some_and(|s| s.has_episode(number.episode))
    }
}

/// A fully extracted title, tagged by subtype.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Title {
    Movie(FullTitle),
    Series(SeriesTitle),
}

impl Title {
    pub fn new(kind: TitleKind, id: TitleId) -> Self {
        match kind {
            TitleKind::Movie => Self::Movie(FullTitle::new(id)),
            TitleKind::Series => Self::Series(SeriesTitle::new(FullTitle::new(id))),
        }
    }

    pub fn kind(&self) -> TitleKind {
        match self {
            Self::Movie(_) => TitleKind::Movie,
            Self::Series(_) => TitleKind::Series,
        }
    }

    pub fn type_string(&self) -> &'static str {
        self.kind().type_string()
    }

    pub fn full(&self) -> &FullTitle {
        match self {
            Self::Movie(t) => t,
            Self::Series(s) => &s.title,
        }
    }

    pub fn full_mut(&mut self) -> &mut FullTitle {
        match self {
            Self::Movie(t) => t,
            Self::Series(s) => &mut s.title,
        }
    }

    pub fn id(&self) -> &TitleId {
        self.full().id()
    }

    pub fn record(&self) -> &TitleRecord {
        &self.full().record
    }

    pub fn as_series(&self) -> Option<&SeriesTitle> {
        match self {
            Self::Series(s) => Some(s),
            Self::Movie(_) => None,
        }
    }
}

impl PartialEq for Title {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Title {}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Movie(t) => std::fmt::Display::fmt(&t.record, f),
            Self::Series(s) => {
                let record = &s.title.record;
                f.write_str(record.title.as_deref().unwrap_or(record.id().as_str()))?;
                if let Some(year) = record.year {
                    write!(f, " (TV series, {year})")?;
                }
                Ok(())
            }
        }
    }
}

/// One row of a search-results page. Compared by `id` like any title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultSummary {
    #[serde(flatten)]
    pub record: TitleRecord,
    /// Loose descriptive fragments such as `(TV series)`, in page order.
    pub extra_info: Vec<String>,
}

impl SearchResultSummary {
    pub fn new(id: TitleId) -> Self {
        Self {
            record: TitleRecord::new(id),
            extra_info: Vec::new(),
        }
    }

    pub fn id(&self) -> &TitleId {
        self.record.id()
    }
}

impl PartialEq for SearchResultSummary {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}

impl Eq for SearchResultSummary {}

impl Hash for SearchResultSummary {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.record.hash(state);
    }
}

impl From<&Title> for SearchResultSummary {
    fn from(title: &Title) -> Self {
        Self {
            record: title.record().clone(),
            extra_info: Vec::new(),
        }
    }
}

impl std::fmt::Display for SearchResultSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.record, f)?;
        if !self.extra_info.is_empty() {
            write!(f, " {}", self.extra_info.join(", "))?;
        }
        Ok(())
    }
}
