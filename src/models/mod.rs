pub mod dataset;
pub mod month;
pub mod result_set;
pub mod temperature;
pub mod unit;

pub use dataset::{Dataset, DatasetSummary};
pub use month::{month_abbrev, month_from_number, month_number, parse_month};
pub use result_set::{ResultKind, ResultRow, ResultSet};
pub use temperature::TemperatureRecord;
pub use unit::TemperatureUnit;
