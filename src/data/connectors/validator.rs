use crate::error::{GenetradeError, Result};
use polars::prelude::*;
use super::types::PriceColumn;
use std::collections::HashMap;

pub struct DataValidator;

impl DataValidator {
    /// Validate that DataFrame has a date and a numeric close column
    pub fn validate_price_columns(df: &DataFrame) -> Result<HashMap<PriceColumn, String>> {
        let mut column_map = HashMap::new();

        for required in PriceColumn::all() {
            match Self::find_column(df, &required) {
                Some(col_name) => {
                    column_map.insert(required, col_name.to_string());
                }
                None => {
                    return Err(GenetradeError::DataLoading(format!(
                        "Missing required column: {} (tried aliases: {:?})",
                        required.as_str(),
                        required.aliases()
                    )));
                }
            }
        }

        if let Some(close_name) = column_map.get(&PriceColumn::Close) {
            let series = df.column(close_name)?;
            if !matches!(series.dtype(), DataType::Float64 | DataType::Float32 | DataType::Int64 | DataType::Int32 | DataType::UInt64 | DataType::UInt32) {
                return Err(GenetradeError::DataLoading(format!(
                    "Column '{}' (close) must be numeric, found {:?}",
                    close_name,
                    series.dtype()
                )));
            }
        }

        Ok(column_map)
    }

    /// Find column by checking aliases
    fn find_column<'a>(df: &'a DataFrame, required: &PriceColumn) -> Option<&'a str> {
        let columns = df.get_column_names();
        for alias in required.aliases() {
            if columns.iter().any(|col| col.as_str() == alias) {
                return Some(alias);
            }
        }
        None
    }

    /// Every close must be a positive, finite price
    pub fn validate_positive_closes(ticker: &str, closes: &[f64]) -> Result<()> {
        if let Some((row, value)) = closes
            .iter()
            .enumerate()
            .find(|(_, c)| !(**c > 0.0) || !c.is_finite())
        {
            return Err(GenetradeError::DataLoading(format!(
                "Invalid close for {} at row {}: {}",
                ticker, row, value
            )));
        }
        Ok(())
    }

    /// Check for minimum required rows
    pub fn validate_minimum_rows(df: &DataFrame, min_rows: usize) -> Result<()> {
        if df.height() < min_rows {
            return Err(GenetradeError::DataLoading(format!(
                "Insufficient data: {} rows, minimum {} required",
                df.height(),
                min_rows
            )));
        }
        Ok(())
    }

    /// Check for null values in critical columns
    pub fn check_nulls(df: &DataFrame) -> Result<Vec<(String, usize)>> {
        let mut null_report = Vec::new();

        for col_name in df.get_column_names() {
            let series = df.column(col_name)?;
            let null_count = series.null_count();
            if null_count > 0 {
                null_report.push((col_name.to_string(), null_count));
            }
        }

        Ok(null_report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn test_validate_good_data() {
        let df = df! {
            "Date" => &["2023-01-02", "2023-01-03"],
            "Close" => &[100.5, 102.0],
            "Volume" => &[1000.0, 1500.0],
        }
        .unwrap();

        let columns = DataValidator::validate_price_columns(&df).unwrap();
        assert_eq!(columns[&PriceColumn::Date], "Date");
        assert_eq!(columns[&PriceColumn::Close], "Close");
    }

    #[test]
    fn test_validate_missing_close() {
        let df = df! {
            "date" => &["2023-01-02", "2023-01-03"],
            "open" => &[100.0, 101.0],
        }
        .unwrap();

        assert!(DataValidator::validate_price_columns(&df).is_err());
    }

    #[test]
    fn test_non_numeric_close_rejected() {
        let df = df! {
            "date" => &["2023-01-02"],
            "close" => &["n/a"],
        }
        .unwrap();

        assert!(DataValidator::validate_price_columns(&df).is_err());
    }

    #[test]
    fn test_non_positive_closes_rejected() {
        assert!(DataValidator::validate_positive_closes("A", &[1.0, 2.0]).is_ok());
        assert!(DataValidator::validate_positive_closes("A", &[1.0, 0.0]).is_err());
        assert!(DataValidator::validate_positive_closes("A", &[f64::NAN]).is_err());
    }

    #[test]
    fn test_minimum_rows() {
        let df = df! { "close" => &[1.0, 2.0] }.unwrap();
        assert!(DataValidator::validate_minimum_rows(&df, 2).is_ok());
        assert!(DataValidator::validate_minimum_rows(&df, 3).is_err());
    }
}
