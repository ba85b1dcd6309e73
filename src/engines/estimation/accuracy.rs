use super::estimator::PriceEstimator;
use super::rolling::RollingForecaster;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Squared forecast error of every rolling window against the prices that followed it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastAccuracy {
    pub estimator: String,
    pub lookback: usize,
    pub horizon: usize,
    /// (window start, sum of squared errors)
    pub squared_errors: Vec<(usize, f64)>,
}

impl ForecastAccuracy {
    pub fn evaluate(
        estimator: &dyn PriceEstimator,
        prices: &[f64],
        lookback: usize,
        horizon: usize,
    ) -> Result<Self> {
        let forecaster = RollingForecaster::new(estimator, lookback, horizon);
        let mut squared_errors = Vec::new();

        for forecast in forecaster.forecasts(prices) {
            let forecast = forecast?;
            let realized_start = forecast.window_start + lookback;
            let realized_end = realized_start + horizon;
            if realized_end > prices.len() {
                break;
            }

            let error = forecast
                .result
                .estimated_prices
                .iter()
                .zip(&prices[realized_start..realized_end])
                .map(|(predicted, actual)| (predicted - actual).powi(2))
                .sum::<f64>();
            squared_errors.push((forecast.window_start, error));
        }

        log::debug!(
            "{}: {} scored windows (lookback {}, horizon {})",
            estimator.name(),
            squared_errors.len(),
            lookback,
            horizon
        );

        Ok(Self {
            estimator: estimator.name().to_string(),
            lookback,
            horizon,
            squared_errors,
        })
    }

    pub fn windows(&self) -> usize {
        self.squared_errors.len()
    }

    pub fn mean(&self) -> Option<f64> {
        if self.squared_errors.is_empty() {
            return None;
        }
        let total: f64 = self.squared_errors.iter().map(|(_, e)| e).sum();
        Some(total / self.squared_errors.len() as f64)
    }

    pub fn min(&self) -> Option<f64> {
        self.squared_errors.iter().map(|(_, e)| *e).reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.squared_errors.iter().map(|(_, e)| *e).reduce(f64::max)
    }
}
