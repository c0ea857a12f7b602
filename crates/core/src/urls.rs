//! URL scheme for titles, people and searches.

use crate::title::TitleId;

pub const BASE_URL: &str = "https://www.imdb.com";

/// Percent-encode a query value as UTF-8 (`application/x-www-form-urlencoded`, spaces become `+`).
pub fn encode_query(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

pub fn title_url(id: &TitleId) -> String {
    format!("{BASE_URL}/title/{id}")
}

pub fn person_url(id: &str) -> String {
    format!("{BASE_URL}/name/{id}")
}

/// Full-site search URL for `query` against `base`.
pub fn search_url(base: &str, query: &str) -> String {
    format!(
        "{}/find?s=all&q={}",
        base.trim_end_matches('/'),
        encode_query(query)
    )
}

/// Episode cast listing for a series; lists every season on one page.
pub fn episode_cast_url(title_url: &str) -> String {
    format!("{}/epcast", title_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_url_from_id() {
        let id = TitleId::new("tt1127180").unwrap();
        assert_eq!(title_url(&id), "https://www.imdb.com/title/tt1127180");
    }

    #[test]
    fn search_url_encodes_utf8() {
        assert_eq!(
            search_url("https://www.imdb.com/", "Amélie & co"),
            "https://www.imdb.com/find?s=all&q=Am%C3%A9lie+%26+co"
        );
    }

    #[test]
    fn episode_cast_url_appends_segment() {
        assert_eq!(
            episode_cast_url("https://www.imdb.com/title/tt0386676/"),
            "https://www.imdb.com/title/tt0386676/epcast"
        );
    }
}
