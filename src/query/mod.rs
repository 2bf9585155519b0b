pub mod extremum;
pub mod filter;
pub mod range;

pub use extremum::{find_exact, find_extremum, Extremum, TieBreak};
pub use filter::{in_range, matches_country, matches_month, matches_year, Predicate, PredicateSet};
pub use range::{collect_range, country_range, require_non_empty};
