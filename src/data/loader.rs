//! CSV Data Loader Module
//! Reads temperature observations with Polars and attaches the derived year.

use super::{CITY_COL, DATE_COL, REQUIRED_COLUMNS, TEMP_COL, UNCERTAINTY_COL, YEAR_COL};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Date layouts accepted in the `dt` column, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Data file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Unparseable date {value:?} in row {row}")]
    InvalidDate { row: usize, value: String },
}

/// Loads observation tables. Every frame it returns carries the
/// required columns with normalized dtypes plus an Int32 `Year`.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file using Polars.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::FileNotFound(path.to_path_buf()));
        }

        // Infer over every row: a float late in the file must not be
        // read against an integer schema and dropped.
        let raw = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(None)
            .finish()?
            .collect()?;

        log::info!(
            "Read {} rows, {} columns from {}",
            raw.height(),
            raw.width(),
            path.display()
        );

        Self::prepare(raw)
    }

    /// Keep the required columns, cast them and attach `Year`.
    ///
    /// Unused source columns (`Country`, `Latitude`, `Longitude`, ...) are dropped.
    /// A missing or unparseable date in any row fails the whole load, and so
    /// does a non-numeric temperature cell. Only empty cells become missing.
    pub fn prepare(raw: DataFrame) -> Result<DataFrame, LoaderError> {
        for name in REQUIRED_COLUMNS {
            if !raw.get_column_names().iter().any(|c| c.as_str() == name) {
                return Err(LoaderError::MissingColumn(name.to_string()));
            }
        }

        let mut df = raw
            .lazy()
            .select([
                col(DATE_COL).cast(DataType::String),
                col(CITY_COL).cast(DataType::String),
                col(TEMP_COL).strict_cast(DataType::Float64),
                col(UNCERTAINTY_COL).strict_cast(DataType::Float64),
            ])
            .collect()?;

        let years = {
            let dates = df.column(DATE_COL)?.str()?;
            let mut years: Vec<i32> = Vec::with_capacity(dates.len());
            for (row, value) in dates.into_iter().enumerate() {
                let year = value.and_then(Self::parse_year).ok_or_else(|| {
                    LoaderError::InvalidDate {
                        row,
                        value: value.unwrap_or_default().to_string(),
                    }
                })?;
                years.push(year);
            }
            years
        };

        df.with_column(Column::new(YEAR_COL.into(), years))?;
        log::debug!("Attached {} column to {} rows", YEAR_COL, df.height());

        Ok(df)
    }

    /// Extract the calendar year from a date string.
    pub fn parse_year(value: &str) -> Option<i32> {
        let value = value.trim();

        if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
            return value.parse().ok();
        }

        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                    .map(|dt| dt.date())
            })
            .map(|date| date.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str =
        "dt,AverageTemperature,AverageTemperatureUncertainty,City,Country,Latitude,Longitude";

    fn write_csv(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("temps.csv");
        fs::write(&path, format!("{HEADER}\n{body}")).unwrap();
        path
    }

    #[test]
    fn test_parse_year_formats() {
        assert_eq!(DataLoader::parse_year("1849-01-01"), Some(1849));
        assert_eq!(DataLoader::parse_year(" 2013-09-01 "), Some(2013));
        assert_eq!(DataLoader::parse_year("2001-05-01 12:00:00"), Some(2001));
        assert_eq!(DataLoader::parse_year("2001-05-01T12:00:00"), Some(2001));
        assert_eq!(DataLoader::parse_year("1999/12/31"), Some(1999));
        assert_eq!(DataLoader::parse_year("12/31/1999"), Some(1999));
        assert_eq!(DataLoader::parse_year("1900"), Some(1900));
        assert_eq!(DataLoader::parse_year("not a date"), None);
        assert_eq!(DataLoader::parse_year("2001-13-01"), None);
        assert_eq!(DataLoader::parse_year(""), None);
    }

    #[test]
    fn test_load_csv_attaches_year_and_drops_unused_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "1849-01-01,26.704,1.435,Abidjan,Côte D'Ivoire,5.63N,3.23W\n\
             1850-02-01,,,Abidjan,Côte D'Ivoire,5.63N,3.23W\n\
             1850-03-01,12.5,0.9,Berlin,Germany,52.24N,13.14E\n",
        );

        let df = DataLoader::load_csv(&path).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 5);
        assert!(df.column("Country").is_err());

        let years: Vec<Option<i32>> = df.column(YEAR_COL).unwrap().i32().unwrap().into_iter().collect();
        assert_eq!(years, vec![Some(1849), Some(1850), Some(1850)]);

        let temps = df.column(TEMP_COL).unwrap().f64().unwrap();
        assert_eq!(temps.null_count(), 1);
        assert_eq!(temps.get(2), Some(12.5));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = DataLoader::load_csv(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
    }

    #[test]
    fn test_bad_date_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "2000-01-01,10.0,1.0,A,X,0N,0E\n\
             someday,11.0,1.0,A,X,0N,0E\n",
        );

        match DataLoader::load_csv(&path) {
            Err(LoaderError::InvalidDate { row, value }) => {
                assert_eq!(row, 1);
                assert_eq!(value, "someday");
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_column() {
        let raw = df!(
            "dt" => ["2000-01-01"],
            "City" => ["A"],
            "AverageTemperature" => [1.0],
        )
        .unwrap();

        match DataLoader::prepare(raw) {
            Err(LoaderError::MissingColumn(name)) => assert_eq!(name, UNCERTAINTY_COL),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_late_decimal_after_integer_rows_is_kept() {
        let dir = TempDir::new().unwrap();
        let mut body = "2000-01-01,10,1,A,X,0N,0E\n".repeat(10_000);
        body.push_str("2001-01-01,25.5,1,A,X,0N,0E\n");
        let path = write_csv(&dir, &body);

        let df = DataLoader::load_csv(&path).unwrap();
        let temps = df.column(TEMP_COL).unwrap().f64().unwrap();

        assert_eq!(df.height(), 10_001);
        assert_eq!(temps.null_count(), 0);
        assert_eq!(temps.get(10_000), Some(25.5));
        assert_eq!(temps.get(0), Some(10.0));
    }

    #[test]
    fn test_non_numeric_temperature_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "2000-01-01,10.0,1.0,A,X,0N,0E\n\
             2000-02-01,abc,1.0,A,X,0N,0E\n\
             2000-03-01,20.0,1.0,A,X,0N,0E\n",
        );

        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::CsvError(_)));
    }

    #[test]
    fn test_header_only_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "");

        let df = DataLoader::load_csv(&path).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.column(YEAR_COL).unwrap().dtype(), &DataType::Int32);
    }
}
