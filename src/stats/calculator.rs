//! Statistics Calculator Module
//! Handles the yearly aggregates, the trailing moving average and the
//! per-city series used by the dashboard.

use crate::data::{CITY_COL, TEMP_COL, UNCERTAINTY_COL, YEAR_COL};
use polars::prelude::*;
use std::collections::HashSet;
use thiserror::Error;

/// Default trailing window for the moving average, in years.
pub const DEFAULT_WINDOW: usize = 10;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Global means for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyAggregate {
    pub year: i32,
    pub mean_temperature: f64,
    pub mean_uncertainty: f64,
    /// Trailing mean of `mean_temperature`, undefined until the window fills
    pub moving_average: Option<f64>,
}

/// Mean temperature of one city in one year.
#[derive(Debug, Clone, PartialEq)]
pub struct CityYearlyAggregate {
    pub city: String,
    pub year: i32,
    pub mean_temperature: f64,
}

/// Headline facts shown in the overview.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSummary {
    pub city_count: usize,
    /// Inclusive (min, max); `None` for an empty dataset
    pub year_range: Option<(i32, i32)>,
    pub observation_count: usize,
}

/// Handles aggregate calculations over a cleaned observation frame.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Group by year, average both temperature columns and attach the
    /// trailing moving average. Rows are ascending by year.
    pub fn yearly_global(df: &DataFrame, window: usize) -> Result<Vec<YearlyAggregate>, StatsError> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col(YEAR_COL)])
            .agg([col(TEMP_COL).mean(), col(UNCERTAINTY_COL).mean()])
            .sort([YEAR_COL], SortMultipleOptions::default())
            .collect()?;

        let years = grouped.column(YEAR_COL)?.cast(&DataType::Int32)?;
        let temps = grouped.column(TEMP_COL)?.cast(&DataType::Float64)?;
        let uncertainty = grouped.column(UNCERTAINTY_COL)?.cast(&DataType::Float64)?;

        let temperature_values: Vec<f64> = temps
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        let moving = Self::moving_average(&temperature_values, window);

        let rows: Vec<YearlyAggregate> = years
            .i32()?
            .into_iter()
            .zip(uncertainty.f64()?.into_iter())
            .zip(temperature_values.iter().zip(moving))
            .filter_map(|((year, unc), (&temp, avg))| {
                Some(YearlyAggregate {
                    year: year?,
                    mean_temperature: temp,
                    mean_uncertainty: unc.unwrap_or(f64::NAN),
                    moving_average: avg,
                })
            })
            .collect();

        log::info!("Yearly aggregate: {} years (window {})", rows.len(), window);
        Ok(rows)
    }

    /// Trailing simple moving average.
    ///
    /// Index `i` holds the mean of `values[i + 1 - window ..= i]`; earlier
    /// indices have no value. NaN inside a window propagates.
    pub fn moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
        if window == 0 {
            return vec![None; values.len()];
        }

        (0..values.len())
            .map(|i| {
                if i + 1 >= window {
                    let slice = &values[i + 1 - window..=i];
                    Some(slice.iter().sum::<f64>() / window as f64)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Group by (city, year) and average the temperature.
    /// Rows are ordered by city, then year. Rows without a city are skipped.
    pub fn city_yearly(df: &DataFrame) -> Result<Vec<CityYearlyAggregate>, StatsError> {
        let grouped = df
            .clone()
            .lazy()
            .filter(col(CITY_COL).is_not_null())
            .group_by([col(CITY_COL), col(YEAR_COL)])
            .agg([col(TEMP_COL).mean()])
            .sort([CITY_COL, YEAR_COL], SortMultipleOptions::default())
            .collect()?;

        let cities = grouped.column(CITY_COL)?.cast(&DataType::String)?;
        let years = grouped.column(YEAR_COL)?.cast(&DataType::Int32)?;
        let temps = grouped.column(TEMP_COL)?.cast(&DataType::Float64)?;

        let rows: Vec<CityYearlyAggregate> = cities
            .str()?
            .into_iter()
            .zip(years.i32()?.into_iter())
            .zip(temps.f64()?.into_iter())
            .filter_map(|((city, year), temp)| {
                Some(CityYearlyAggregate {
                    city: city?.to_string(),
                    year: year?,
                    mean_temperature: temp.unwrap_or(f64::NAN),
                })
            })
            .collect();

        log::info!("City-yearly aggregate: {} rows", rows.len());
        Ok(rows)
    }

    /// Count distinct cities and find the year range.
    pub fn summary(df: &DataFrame) -> Result<DatasetSummary, StatsError> {
        let city_count = df
            .column(CITY_COL)?
            .str()?
            .into_iter()
            .flatten()
            .collect::<HashSet<_>>()
            .len();

        let years = df.column(YEAR_COL)?.cast(&DataType::Int32)?;
        let years = years.i32()?;
        let year_range = years.min().zip(years.max());

        Ok(DatasetSummary {
            city_count,
            year_range,
            observation_count: df.height(),
        })
    }

    /// Distinct cities in order of first appearance.
    pub fn city_list(rows: &[CityYearlyAggregate]) -> Vec<String> {
        let mut seen = HashSet::new();
        rows.iter()
            .filter(|row| seen.insert(row.city.as_str()))
            .map(|row| row.city.clone())
            .collect()
    }

    /// Rows for one city, ascending by year.
    pub fn filter_city(rows: &[CityYearlyAggregate], city: &str) -> Vec<CityYearlyAggregate> {
        let mut selected: Vec<CityYearlyAggregate> =
            rows.iter().filter(|row| row.city == city).cloned().collect();
        selected.sort_by_key(|row| row.year);
        selected
    }
}
