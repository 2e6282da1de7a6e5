//! Dashboard pipeline: load → clean → aggregate.
//!
//! Everything the window displays is computed here once per loaded file.
//! The GUI only filters the finished aggregates.

use crate::data::{CleaningReport, DataLoader, DataProcessor, LoaderError, ProcessorError, IMPUTED_COLUMNS};
use crate::stats::{CityYearlyAggregate, DatasetSummary, StatsCalculator, StatsError, YearlyAggregate};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error(transparent)]
    Stats(#[from] StatsError),
}

/// Aggregated view of one temperature file.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub source: PathBuf,
    /// Moving-average window, in years
    pub window: usize,
    pub summary: DatasetSummary,
    pub cleaning: Vec<CleaningReport>,
    pub yearly: Vec<YearlyAggregate>,
    pub city_yearly: Vec<CityYearlyAggregate>,
    /// Selector options, in order of first appearance in `city_yearly`
    pub cities: Vec<String>,
}

impl Dashboard {
    /// Run the full pipeline on a CSV file.
    pub fn build(path: &Path, window: usize) -> Result<Self, DashboardError> {
        let df = DataLoader::load_csv(path)?;
        Self::from_frame(path.to_path_buf(), df, window)
    }

    /// Clean and aggregate an already loaded observation frame.
    pub fn from_frame(source: PathBuf, mut df: DataFrame, window: usize) -> Result<Self, DashboardError> {
        let summary = StatsCalculator::summary(&df)?;
        let cleaning = DataProcessor::fill_missing_with_mean(&mut df, &IMPUTED_COLUMNS)?;
        let yearly = StatsCalculator::yearly_global(&df, window)?;
        let city_yearly = StatsCalculator::city_yearly(&df)?;
        let cities = StatsCalculator::city_list(&city_yearly);

        log::info!(
            "Dashboard ready: {} observations, {} cities, {} imputed values",
            summary.observation_count,
            summary.city_count,
            cleaning.iter().map(|r| r.missing).sum::<usize>()
        );

        Ok(Self {
            source,
            window,
            summary,
            cleaning,
            yearly,
            city_yearly,
            cities,
        })
    }

    /// Chronological series for one city.
    pub fn city_series(&self, city: &str) -> Vec<CityYearlyAggregate> {
        StatsCalculator::filter_city(&self.city_yearly, city)
    }

    /// Total number of cells filled by the cleaner.
    pub fn imputed_count(&self) -> usize {
        self.cleaning.iter().map(|r| r.missing).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::DEFAULT_WINDOW;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str =
        "dt,AverageTemperature,AverageTemperatureUncertainty,City,Country,Latitude,Longitude";

    #[test]
    fn test_build_from_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("GlobalLandTemperaturesByMajorCity.csv");
        let body = "2000-01-01,10.0,1.0,A,X,0N,0E\n\
                    2000-06-01,,1.0,A,X,0N,0E\n\
                    2000-01-01,20.0,,B,Y,1N,1E\n\
                    2001-01-01,30.0,3.0,B,Y,1N,1E\n";
        fs::write(&path, format!("{HEADER}\n{body}")).unwrap();

        let dashboard = Dashboard::build(&path, DEFAULT_WINDOW).unwrap();

        assert_eq!(dashboard.summary.city_count, 2);
        assert_eq!(dashboard.summary.year_range, Some((2000, 2001)));
        assert_eq!(dashboard.imputed_count(), 2);
        assert_eq!(dashboard.cities, vec!["A", "B"]);

        // The missing A cell is filled with mean(10, 20, 30) = 20,
        // so A's 2000 mean is (10 + 20) / 2 = 15.
        let a = dashboard.city_series("A");
        assert_eq!(a.len(), 1);
        assert!((a[0].mean_temperature - 15.0).abs() < 1e-9);

        assert_eq!(dashboard.yearly.len(), 2);
        assert!(dashboard.yearly.iter().all(|row| row.moving_average.is_none()));
        assert!((dashboard.yearly[0].mean_temperature - (10.0 + 20.0 + 20.0) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_build_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = Dashboard::build(&dir.path().join("missing.csv"), DEFAULT_WINDOW).unwrap_err();
        assert!(matches!(err, DashboardError::Loader(LoaderError::FileNotFound(_))));
    }

    #[test]
    fn test_window_is_configurable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("temps.csv");
        let body: String = (2000..2005)
            .map(|y| format!("{y}-01-01,{}.0,0.1,A,X,0N,0E\n", y - 2000))
            .collect();
        fs::write(&path, format!("{HEADER}\n{body}")).unwrap();

        let dashboard = Dashboard::build(&path, 2).unwrap();

        assert_eq!(dashboard.window, 2);
        assert_eq!(dashboard.yearly[0].moving_average, None);
        assert!((dashboard.yearly[4].moving_average.unwrap() - 3.5).abs() < 1e-9);
    }
}
