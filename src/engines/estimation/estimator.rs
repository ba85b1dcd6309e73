use crate::error::{GenetradeError, Result};
use serde::{Deserialize, Serialize};

/// Forecast produced from one historical window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub estimated_prices: Vec<f64>,
    /// (intercept, slope) for trend fits, (drift, volatility) for return models
    pub coefficients: (f64, f64),
}

/// Pure forecasting strategy: (historical window, horizon) -> forecast.
pub trait PriceEstimator: Send + Sync {
    fn name(&self) -> &'static str;

    fn estimate(&self, window: &[f64], horizon: usize) -> Result<EstimationResult>;
}

pub(crate) fn check_window(name: &str, window: &[f64], horizon: usize) -> Result<()> {
    if window.len() < 2 {
        return Err(GenetradeError::Estimation(format!(
            "{} needs at least 2 prices, got {}",
            name,
            window.len()
        )));
    }
    if horizon == 0 {
        return Err(GenetradeError::Estimation(format!(
            "{} called with a zero horizon",
            name
        )));
    }
    if let Some(bad) = window.iter().find(|p| !p.is_finite()) {
        return Err(GenetradeError::Estimation(format!(
            "{} received a non-finite price {}",
            name, bad
        )));
    }
    Ok(())
}

pub(crate) fn check_positive(name: &str, window: &[f64]) -> Result<()> {
    if let Some(bad) = window.iter().find(|&&p| p <= 0.0) {
        return Err(GenetradeError::Estimation(format!(
            "{} requires positive prices, found {}",
            name, bad
        )));
    }
    Ok(())
}

/// Population mean and standard deviation.
pub(crate) fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_std_population() {
        let (mean, std) = mean_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((mean - 5.0).abs() < 1e-12);
        assert!((std - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_check_window_rejects_short_and_empty_horizon() {
        assert!(check_window("x", &[1.0], 3).is_err());
        assert!(check_window("x", &[1.0, 2.0], 0).is_err());
        assert!(check_window("x", &[1.0, f64::NAN], 1).is_err());
        assert!(check_window("x", &[1.0, 2.0], 1).is_ok());
    }
}
