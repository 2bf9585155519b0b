use chrono::Month;

use crate::error::{AnalysisError, Result};

pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Map 1..=12 onto a month; anything else is `None`.
pub fn month_from_number(number: u32) -> Option<Month> {
    match number {
        1..=12 => Some(MONTHS[(number - 1) as usize]),
        _ => None,
    }
}

/// Rank of the month (January = 1), used only for tie-breaking.
pub fn month_number(month: Month) -> u32 {
    month.number_from_month()
}

/// Three-letter label as it appears in the dataset ("Jan".."Dec").
pub fn month_abbrev(month: Month) -> &'static str {
    &month.name()[..3]
}

/// Parse a dataset month label. Accepts "Jan" or "January" in any case.
pub fn parse_month(label: &str) -> Result<Month> {
    label
        .trim()
        .parse::<Month>()
        .map_err(|_| AnalysisError::InvalidFormat(format!("Invalid month: '{}'", label)))
}
