//! Air-date parsing for episode listings.
//!
//! Dates appear as free text (`24 March 2005`, `2005`, or `????` when
//! unknown). Formats are tried in order and the first that parses wins.
//! The format table is immutable and chrono keeps its parse state on the
//! stack of each call, so concurrent extractions can share it freely.

use chrono::NaiveDate;
use tracing::debug;

/// Placeholder the site prints when the air date is not known.
const UNKNOWN_DATE: &str = "????";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateFormat {
    /// `d MMMM yyyy`, English month names.
    DayMonthYear,
    /// `yyyy`, resolved to January 1st.
    YearOnly,
}

static AIR_DATE_FORMATS: &[DateFormat] = &[DateFormat::DayMonthYear, DateFormat::YearOnly];

impl DateFormat {
    fn parse(self, text: &str) -> Option<NaiveDate> {
        match self {
            Self::DayMonthYear => NaiveDate::parse_from_str(text, "%d %B %Y").ok(),
            Self::YearOnly => {
                if text.len() != 4 || !text.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                NaiveDate::from_ymd_opt(text.parse().ok()?, 1, 1)
            }
        }
    }
}

/// Resolve an air-date string, or `None` when it is blank, `????` or
/// matches none of the known formats.
pub fn parse_air_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() || text == UNKNOWN_DATE {
        return None;
    }

    let parsed = AIR_DATE_FORMATS.iter().find_map(|format| format.parse(text));
    if parsed.is_none() {
        debug!(text, "failed to parse air date");
    }
    parsed
}
