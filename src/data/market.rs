use crate::config::{DataConfig, EstimationConfig};
use crate::data::connectors::CsvConnector;
use crate::error::{GenetradeError, Result};
use crate::types::PriceHistory;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Daily closes of one instrument, dates strictly increasing
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    ticker: String,
    dates: Vec<NaiveDate>,
    closes: Vec<f64>,
}

/// Prices before the simulation start and the prices the simulation replays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSplit<'a> {
    pub estimation: &'a [f64],
    pub simulation: &'a [f64],
}

impl PriceSeries {
    pub fn new(ticker: &str, dates: Vec<NaiveDate>, closes: Vec<f64>) -> Result<Self> {
        if dates.len() != closes.len() {
            return Err(GenetradeError::DataLoading(format!(
                "{} has {} dates but {} closes",
                ticker,
                dates.len(),
                closes.len()
            )));
        }
        if let Some(pair) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(GenetradeError::DataLoading(format!(
                "{} dates are not strictly increasing at {}",
                ticker, pair[1]
            )));
        }
        Ok(Self {
            ticker: ticker.to_string(),
            dates,
            closes,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Index of the first row on or after `date`
    fn position(&self, date: NaiveDate) -> usize {
        self.dates.partition_point(|d| *d < date)
    }

    /// The `lookback` closes strictly before `start_date` and the first `days` closes from it.
    pub fn split_at(&self, start_date: NaiveDate, lookback: usize, days: usize) -> Result<SeriesSplit<'_>> {
        let start = self.position(start_date);
        if start < lookback {
            return Err(GenetradeError::InsufficientData {
                ticker: self.ticker.clone(),
                have: start,
                need: lookback,
            });
        }
        let available = self.len() - start;
        if available < days {
            return Err(GenetradeError::InsufficientData {
                ticker: self.ticker.clone(),
                have: available,
                need: days,
            });
        }
        Ok(SeriesSplit {
            estimation: &self.closes[start - lookback..start],
            simulation: &self.closes[start..start + days],
        })
    }

    /// Closes dated within `[from, to]`
    pub fn between(&self, from: NaiveDate, to: NaiveDate) -> &[f64] {
        let start = self.position(from);
        let end = self.dates.partition_point(|d| *d <= to).max(start);
        &self.closes[start..end]
    }
}

/// Price series of every configured instrument, in ticker order
#[derive(Debug, Clone, Default)]
pub struct MarketData {
    series: BTreeMap<String, PriceSeries>,
}

impl MarketData {
    pub fn new(series: impl IntoIterator<Item = PriceSeries>) -> Self {
        Self {
            series: series.into_iter().map(|s| (s.ticker.clone(), s)).collect(),
        }
    }

    /// Load `<directory>/<TICKER>_data.csv` for every configured ticker.
    pub fn load(data: &DataConfig, estimation: &EstimationConfig) -> Result<Self> {
        let mut series = BTreeMap::new();
        for ticker in &data.tickers {
            let path = data.price_file(ticker);
            let loaded = CsvConnector::load_price_series(&path, ticker, estimation.lookback_days + 1)?;
            log::info!("Loaded {} rows for {} from {}", loaded.len(), ticker, path.display());
            series.insert(ticker.clone(), loaded);
        }
        Ok(Self { series })
    }

    pub fn tickers(&self) -> Vec<String> {
        self.series.keys().cloned().collect()
    }

    pub fn get(&self, ticker: &str) -> Option<&PriceSeries> {
        self.series.get(ticker)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PriceSeries)> {
        self.series.iter()
    }

    /// Split every series at `start_date` into estimation windows and simulation prices.
    pub fn split_at(
        &self,
        start_date: NaiveDate,
        lookback: usize,
        days: usize,
    ) -> Result<(PriceHistory, PriceHistory)> {
        let mut estimation = PriceHistory::new();
        let mut simulation = PriceHistory::new();
        for (ticker, series) in &self.series {
            let split = series.split_at(start_date, lookback, days)?;
            estimation.insert(ticker.clone(), split.estimation.to_vec());
            simulation.insert(ticker.clone(), split.simulation.to_vec());
        }
        Ok((estimation, simulation))
    }
}
