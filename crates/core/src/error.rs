use serde::Serialize;
use thiserror::Error;

/// Violations of the record model's invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("title id must not be empty")]
    EmptyId,

    #[error("duplicate episode {episode} in season {season}")]
    DuplicateEpisode { season: u32, episode: u32 },
}

/// Stable machine-readable code for an error, used in error envelopes.
pub trait ErrorCode {
    fn code(&self) -> &'static str;
}

impl ErrorCode for ModelError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyId => "empty_id",
            Self::DuplicateEpisode { .. } => "duplicate_episode",
        }
    }
}

/// JSON error envelope: `{ "error": { "code": "…", "message": "…", "details": {} } }`
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
}

impl ErrorEnvelope {
    pub fn from_error<E>(e: &E) -> Self
    where
        E: ErrorCode + std::fmt::Display,
    {
        Self {
            error: ErrorBody {
                code: e.code().to_string(),
                message: e.to_string(),
                details: serde_json::Value::Object(serde_json::Map::new()),
            },
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.error.details = details;
        self
    }
}
