use super::traits::ConfigSection;
use crate::error::GenetradeError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where per-instrument price files live and which instruments to trade
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub directory: PathBuf,
    pub tickers: Vec<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
            tickers: vec!["AAPL".to_string(), "SPOT".to_string()],
        }
    }
}

impl DataConfig {
    pub fn price_file(&self, ticker: &str) -> PathBuf {
        self.directory.join(format!("{}_data.csv", ticker))
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), GenetradeError> {
        if self.tickers.is_empty() {
            return Err(GenetradeError::Configuration(
                "At least one ticker is required".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for ticker in &self.tickers {
            if ticker.trim().is_empty() {
                return Err(GenetradeError::Configuration("Empty ticker name".to_string()));
            }
            if !seen.insert(ticker) {
                return Err(GenetradeError::Configuration(format!(
                    "Duplicate ticker: {}",
                    ticker
                )));
            }
        }
        Ok(())
    }
}
