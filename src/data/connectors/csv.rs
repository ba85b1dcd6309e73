use crate::data::market::PriceSeries;
use crate::error::{GenetradeError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use std::path::Path;
use super::{types::PriceColumn, validator::DataValidator};

pub struct CsvConnector;

impl CsvConnector {
    /// Load CSV file into DataFrame
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))
            .map_err(|e| {
                GenetradeError::DataLoading(format!(
                    "Failed to open {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?
            .finish()
            .map_err(|e| GenetradeError::DataLoading(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Load one instrument's daily closes in file order.
    ///
    /// Rows with a null date or close are dropped with a warning.
    pub fn load_price_series<P: AsRef<Path>>(path: P, ticker: &str, min_rows: usize) -> Result<PriceSeries> {
        let df = Self::load(&path)?;
        Self::price_series_from_frame(&df, ticker, min_rows)
    }

    pub fn price_series_from_frame(df: &DataFrame, ticker: &str, min_rows: usize) -> Result<PriceSeries> {
        let column_map = DataValidator::validate_price_columns(df)?;
        DataValidator::validate_minimum_rows(df, min_rows)?;

        let null_report = DataValidator::check_nulls(df)?;
        if !null_report.is_empty() {
            log::warn!("Null values detected in {}: {:?}", ticker, null_report);
        }

        let (Some(date_name), Some(close_name)) = (
            column_map.get(&PriceColumn::Date),
            column_map.get(&PriceColumn::Close),
        ) else {
            return Err(GenetradeError::DataLoading(format!(
                "Price columns not resolved for {}",
                ticker
            )));
        };

        let dates = df.column(date_name)?.cast(&DataType::String)?;
        let dates = dates.str()?;
        let closes = df.column(close_name)?.cast(&DataType::Float64)?;
        let closes = closes.f64()?;

        let mut parsed_dates = Vec::with_capacity(df.height());
        let mut parsed_closes = Vec::with_capacity(df.height());
        for (date, close) in dates.into_iter().zip(closes.into_iter()) {
            if let (Some(date), Some(close)) = (date, close) {
                parsed_dates.push(parse_date(date)?);
                parsed_closes.push(close);
            }
        }

        if parsed_closes.len() < min_rows {
            return Err(GenetradeError::InsufficientData {
                ticker: ticker.to_string(),
                have: parsed_closes.len(),
                need: min_rows,
            });
        }
        DataValidator::validate_positive_closes(ticker, &parsed_closes)?;

        log::debug!("Loaded {} closes for {}", parsed_closes.len(), ticker);
        PriceSeries::new(ticker, parsed_dates, parsed_closes)
    }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part.
fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    let day = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| GenetradeError::DataLoading(format!("Invalid date '{}': {}", value, e)))
}
