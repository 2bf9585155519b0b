pub mod climate_analyzer;
pub mod delta;
pub mod ranking;
pub mod reducer;

pub use climate_analyzer::ClimateAnalyzer;
pub use delta::DeltaAnalyzer;
pub use ranking::{highest_n, lowest_n};
pub use reducer::PerCountryReducer;
