use super::traits::ConfigSection;
use crate::engines::estimation::{
    LeastSquaresEstimator, MaximumLikelihoodEstimator, MethodOfMomentsEstimator, PriceEstimator,
};
use crate::error::GenetradeError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Forecasting settings, passed explicitly to data loading and estimation calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConfig {
    pub estimator: EstimatorKind,
    pub lookback_days: usize,
    pub forecast_days: usize,
    /// First simulated day
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Serialized by canonical name; parsed through `FromStr` so aliases work in config files too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EstimatorKind {
    LeastSquares,
    MethodOfMoments,
    MaximumLikelihood,
}

impl EstimatorKind {
    pub fn all() -> [EstimatorKind; 3] {
        [
            EstimatorKind::LeastSquares,
            EstimatorKind::MethodOfMoments,
            EstimatorKind::MaximumLikelihood,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EstimatorKind::LeastSquares => "least_squares",
            EstimatorKind::MethodOfMoments => "method_of_moments",
            EstimatorKind::MaximumLikelihood => "maximum_likelihood",
        }
    }

    /// Construct the estimator once; callers hold it behind the trait.
    pub fn build(&self) -> Box<dyn PriceEstimator> {
        match self {
            EstimatorKind::LeastSquares => Box::new(LeastSquaresEstimator),
            EstimatorKind::MethodOfMoments => Box::new(MethodOfMomentsEstimator),
            EstimatorKind::MaximumLikelihood => Box::new(MaximumLikelihoodEstimator),
        }
    }
}

impl fmt::Display for EstimatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EstimatorKind {
    type Err = GenetradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "least_squares" | "lsm" => Ok(EstimatorKind::LeastSquares),
            "method_of_moments" | "mom" => Ok(EstimatorKind::MethodOfMoments),
            "maximum_likelihood" | "mle" => Ok(EstimatorKind::MaximumLikelihood),
            _ => Err(GenetradeError::UnknownEstimator(s.to_string())),
        }
    }
}

impl TryFrom<String> for EstimatorKind {
    type Error = GenetradeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EstimatorKind> for String {
    fn from(kind: EstimatorKind) -> Self {
        kind.as_str().to_string()
    }
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            estimator: EstimatorKind::MethodOfMoments,
            lookback_days: 30,
            forecast_days: 10,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2023, 12, 29).unwrap_or_default(),
        }
    }
}

impl ConfigSection for EstimationConfig {
    fn section_name() -> &'static str {
        "estimation"
    }

    fn validate(&self) -> Result<(), GenetradeError> {
        if self.lookback_days < 2 {
            return Err(GenetradeError::Configuration(
                "Lookback must cover at least 2 days".to_string(),
            ));
        }
        if self.forecast_days == 0 {
            return Err(GenetradeError::Configuration(
                "Forecast horizon must be at least 1 day".to_string(),
            ));
        }
        if self.start_date >= self.end_date {
            return Err(GenetradeError::Configuration(format!(
                "Start date {} must precede end date {}",
                self.start_date, self.end_date
            )));
        }
        Ok(())
    }
}
