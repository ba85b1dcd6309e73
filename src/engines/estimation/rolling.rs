use super::estimator::{EstimationResult, PriceEstimator};
use crate::error::Result;

/// One forecast from a sliding window
#[derive(Debug, Clone)]
pub struct WindowForecast {
    /// Index of the first price in the window
    pub window_start: usize,
    pub result: EstimationResult,
}

/// Sliding-window forecast stream over a price series.
///
/// Window `i` covers `prices[i..i + lookback]`; windows are produced for every
/// `i in 0..len - lookback`, so each window has at least one realized price after it.
pub struct RollingForecaster<'a> {
    estimator: &'a dyn PriceEstimator,
    lookback: usize,
    horizon: usize,
}

impl<'a> RollingForecaster<'a> {
    pub fn new(estimator: &'a dyn PriceEstimator, lookback: usize, horizon: usize) -> Self {
        Self {
            estimator,
            lookback,
            horizon,
        }
    }

    pub fn window_count(&self, len: usize) -> usize {
        len.saturating_sub(self.lookback)
    }

    pub fn forecasts<'p>(
        &'p self,
        prices: &'p [f64],
    ) -> impl Iterator<Item = Result<WindowForecast>> + 'p {
        (0..self.window_count(prices.len())).map(move |start| {
            let window = &prices[start..start + self.lookback];
            self.estimator
                .estimate(window, self.horizon)
                .map(|result| WindowForecast {
                    window_start: start,
                    result,
                })
        })
    }
}
