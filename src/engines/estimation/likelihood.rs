use super::estimator::{check_positive, check_window, mean_std, EstimationResult, PriceEstimator};
use crate::error::Result;

/// Log-normal maximum likelihood: drift of log-returns projected as `last * exp(mu * k)`.
/// Coefficients are (log drift, log volatility).
pub struct MaximumLikelihoodEstimator;

impl PriceEstimator for MaximumLikelihoodEstimator {
    fn name(&self) -> &'static str {
        "maximum_likelihood"
    }

    fn estimate(&self, window: &[f64], horizon: usize) -> Result<EstimationResult> {
        check_window(self.name(), window, horizon)?;
        check_positive(self.name(), window)?;

        let log_returns: Vec<f64> = window.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
        let (mu, sigma) = mean_std(&log_returns);

        let last_price = window[window.len() - 1];
        let estimated_prices = (1..=horizon)
            .map(|k| last_price * (mu * k as f64).exp())
            .collect();

        Ok(EstimationResult {
            estimated_prices,
            coefficients: (mu, sigma),
        })
    }
}
