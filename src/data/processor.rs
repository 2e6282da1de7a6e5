//! Data Processor Module
//! Handles data cleaning (mean imputation of the temperature columns).

use polars::prelude::*;
use statrs::statistics::Statistics;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Outcome of cleaning one column.
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningReport {
    pub column: String,
    /// Number of null or NaN cells that were found
    pub missing: usize,
    /// Mean of the present values; `None` when the column had none
    pub fill_value: Option<f64>,
}

/// Handles data cleaning operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Replace missing values in each column with that column's overall mean.
    ///
    /// The mean is taken over every non-missing value in the whole frame.
    /// Columns with no present values are left as they are.
    pub fn fill_missing_with_mean(
        df: &mut DataFrame,
        columns: &[&str],
    ) -> Result<Vec<CleaningReport>, ProcessorError> {
        let mut reports = Vec::with_capacity(columns.len());

        for &name in columns {
            let (filled, report) = {
                let values = df.column(name)?.cast(&DataType::Float64)?;
                let ca = values.f64()?;

                let present: Vec<f64> = ca.into_iter().flatten().filter(|v| !v.is_nan()).collect();
                let fill_value = if present.is_empty() {
                    None
                } else {
                    Some(present.iter().mean())
                };
                let missing = ca.len() - present.len();

                let filled: Vec<Option<f64>> = ca
                    .into_iter()
                    .map(|v| match v {
                        Some(x) if !x.is_nan() => Some(x),
                        _ => fill_value,
                    })
                    .collect();

                (
                    filled,
                    CleaningReport {
                        column: name.to_string(),
                        missing,
                        fill_value,
                    },
                )
            };

            df.with_column(Column::new(name.into(), filled))?;

            match report.fill_value {
                Some(mean) => log::debug!(
                    "Filled {} missing values in {} with {:.4}",
                    report.missing,
                    report.column,
                    mean
                ),
                None if report.missing > 0 => {
                    log::warn!(
                        "Column {} has no values; {} cells stay missing",
                        report.column,
                        report.missing
                    )
                }
                None => {}
            }

            reports.push(report);
        }

        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name).unwrap().f64().unwrap().into_iter().collect()
    }

    #[test]
    fn test_fill_with_column_mean() {
        let mut df = df!(
            "AverageTemperature" => [Some(10.0), Some(20.0), None],
            "AverageTemperatureUncertainty" => [Some(1.0), None, Some(3.0)],
        )
        .unwrap();

        let reports = DataProcessor::fill_missing_with_mean(
            &mut df,
            &["AverageTemperature", "AverageTemperatureUncertainty"],
        )
        .unwrap();

        assert_eq!(
            column_values(&df, "AverageTemperature"),
            vec![Some(10.0), Some(20.0), Some(15.0)]
        );
        assert_eq!(
            column_values(&df, "AverageTemperatureUncertainty"),
            vec![Some(1.0), Some(2.0), Some(3.0)]
        );
        assert_eq!(reports[0].missing, 1);
        assert!((reports[0].fill_value.unwrap() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_is_global_not_per_group() {
        let mut df = df!(
            "City" => ["A", "A", "B", "B"],
            "AverageTemperature" => [Some(0.0), None, Some(30.0), Some(30.0)],
        )
        .unwrap();

        DataProcessor::fill_missing_with_mean(&mut df, &["AverageTemperature"]).unwrap();

        let filled = column_values(&df, "AverageTemperature")[1].unwrap();
        assert!((filled - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_nan_counts_as_missing() {
        let mut df = df!("AverageTemperature" => [Some(2.0), Some(f64::NAN), Some(4.0)]).unwrap();

        let reports = DataProcessor::fill_missing_with_mean(&mut df, &["AverageTemperature"]).unwrap();

        assert_eq!(reports[0].missing, 1);
        assert_eq!(
            column_values(&df, "AverageTemperature"),
            vec![Some(2.0), Some(3.0), Some(4.0)]
        );
    }

    #[test]
    fn test_all_missing_column_stays_missing() {
        let mut df = df!("AverageTemperature" => [None::<f64>, None]).unwrap();

        let reports = DataProcessor::fill_missing_with_mean(&mut df, &["AverageTemperature"]).unwrap();

        assert_eq!(reports[0].fill_value, None);
        assert_eq!(reports[0].missing, 2);
        assert_eq!(df.column("AverageTemperature").unwrap().null_count(), 2);
    }

    #[test]
    fn test_unknown_column_errors() {
        let mut df = df!("AverageTemperature" => [1.0]).unwrap();
        assert!(DataProcessor::fill_missing_with_mean(&mut df, &["Nope"]).is_err());
    }
}
