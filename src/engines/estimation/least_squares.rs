use super::estimator::{check_window, EstimationResult, PriceEstimator};
use crate::error::Result;

/// Ordinary least-squares trend line.
///
/// The fit runs over a normalized time axis `t in [0, 1]` spanning the window and is
/// extrapolated with the same step `1 / (n - 1)`. Coefficients are reported per day,
/// with the window's days numbered `1..=n`.
pub struct LeastSquaresEstimator;

impl PriceEstimator for LeastSquaresEstimator {
    fn name(&self) -> &'static str {
        "least_squares"
    }

    fn estimate(&self, window: &[f64], horizon: usize) -> Result<EstimationResult> {
        check_window(self.name(), window, horizon)?;

        let n = window.len();
        let step = 1.0 / (n - 1) as f64;
        let t_mean = 0.5;
        let y_mean = window.iter().sum::<f64>() / n as f64;

        let (mut sxy, mut sxx) = (0.0, 0.0);
        for (i, &y) in window.iter().enumerate() {
            let dt = i as f64 * step - t_mean;
            sxy += dt * (y - y_mean);
            sxx += dt * dt;
        }

        let b = sxy / sxx;
        let a = y_mean - b * t_mean;

        let estimated_prices = (1..=horizon)
            .map(|k| a + b * (1.0 + k as f64 * step))
            .collect();

        let slope = b * step;
        let intercept = a - slope;

        Ok(EstimationResult {
            estimated_prices,
            coefficients: (intercept, slope),
        })
    }
}
