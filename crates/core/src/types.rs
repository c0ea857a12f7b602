use serde::{Deserialize, Serialize};

/// Kind of page a fetched document turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    TitlePage,
    SearchResults,
    Unknown,
}

impl PageType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TitlePage => "title_page",
            Self::SearchResults => "search_results",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Title subtype, decided once while reading the title page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleKind {
    Movie,
    Series,
}

impl TitleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }

    /// Human-readable label as shown by the site.
    pub fn type_string(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Series => "TV Series",
        }
    }
}

impl std::fmt::Display for TitleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
