//! Stats module - Aggregates and summaries

mod calculator;

pub use calculator::{
    CityYearlyAggregate, DatasetSummary, StatsCalculator, StatsError, YearlyAggregate,
    DEFAULT_WINDOW,
};
