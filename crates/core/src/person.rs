use serde::{Deserialize, Serialize};

use crate::urls;

/// A credited person. `id` is absent when the page gave no usable link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    pub id: Option<String>,
    pub name: String,
}

impl Person {
    pub fn new(id: Option<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Profile URL when the id is known, otherwise a search for the name.
    pub fn url(&self) -> String {
        match &self.id {
            Some(id) => urls::person_url(id),
            None => urls::search_url(urls::BASE_URL, &self.name),
        }
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
