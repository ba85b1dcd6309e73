use super::estimator::{check_positive, check_window, mean_std, EstimationResult, PriceEstimator};
use crate::error::Result;

/// Compounds the mean simple daily return forward from the last price.
/// Coefficients are (mean return, return standard deviation).
pub struct MethodOfMomentsEstimator;

impl PriceEstimator for MethodOfMomentsEstimator {
    fn name(&self) -> &'static str {
        "method_of_moments"
    }

    fn estimate(&self, window: &[f64], horizon: usize) -> Result<EstimationResult> {
        check_window(self.name(), window, horizon)?;
        check_positive(self.name(), window)?;

        let returns: Vec<f64> = window.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect();
        let (mu, sigma) = mean_std(&returns);

        let last_price = window[window.len() - 1];
        let estimated_prices = (1..=horizon)
            .map(|day| last_price * (1.0 + mu).powi(day as i32))
            .collect();

        Ok(EstimationResult {
            estimated_prices,
            coefficients: (mu, sigma),
        })
    }
}
