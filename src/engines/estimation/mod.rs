pub mod estimator;
pub mod least_squares;
pub mod moments;
pub mod likelihood;
pub mod rolling;
pub mod accuracy;

pub use estimator::{EstimationResult, PriceEstimator};
pub use least_squares::LeastSquaresEstimator;
pub use moments::MethodOfMomentsEstimator;
pub use likelihood::MaximumLikelihoodEstimator;
pub use rolling::{RollingForecaster, WindowForecast};
pub use accuracy::ForecastAccuracy;
