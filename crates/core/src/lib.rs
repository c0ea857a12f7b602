pub mod episode;
pub mod error;
pub mod person;
pub mod title;
pub mod types;
pub mod urls;

pub use episode::{Episode, Season, SeasonEpisodeNumber};
pub use error::{ErrorCode, ErrorEnvelope, ModelError};
pub use person::Person;
pub use title::{FullTitle, SearchResultSummary, SeriesTitle, Thumbnail, Title, TitleId, TitleRecord};
pub use types::{PageType, TitleKind};
