//! Data module - CSV loading and cleaning

mod loader;
mod processor;

pub use loader::{DataLoader, LoaderError};
pub use processor::{CleaningReport, DataProcessor, ProcessorError};

/// Source date column
pub const DATE_COL: &str = "dt";
pub const CITY_COL: &str = "City";
pub const TEMP_COL: &str = "AverageTemperature";
pub const UNCERTAINTY_COL: &str = "AverageTemperatureUncertainty";
/// Derived calendar year, attached by the loader
pub const YEAR_COL: &str = "Year";

/// Columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [DATE_COL, CITY_COL, TEMP_COL, UNCERTAINTY_COL];

/// Numeric columns filled by the cleaner.
pub const IMPUTED_COLUMNS: [&str; 2] = [TEMP_COL, UNCERTAINTY_COL];
