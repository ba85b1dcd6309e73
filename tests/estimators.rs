use genetrade::config::EstimatorKind;
use genetrade::engines::estimation::{
    ForecastAccuracy, LeastSquaresEstimator, MaximumLikelihoodEstimator, MethodOfMomentsEstimator, PriceEstimator,
    RollingForecaster,
};
use genetrade::error::GenetradeError;

const TOLERANCE: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE
}

#[test]
fn test_least_squares_linear_window() {
    let result = LeastSquaresEstimator.estimate(&[1.0, 2.0, 3.0, 4.0, 5.0], 2).unwrap();

    assert_eq!(result.estimated_prices.len(), 2);
    assert!(close(result.estimated_prices[0], 6.0));
    assert!(close(result.estimated_prices[1], 7.0));

    let (intercept, slope) = result.coefficients;
    assert!(close(slope, 1.0));
    assert!(close(intercept, 0.0));
}

#[test]
fn test_moments_compounds_mean_return() {
    let result = MethodOfMomentsEstimator.estimate(&[100.0, 110.0, 121.0], 3).unwrap();

    let (mu, sigma) = result.coefficients;
    assert!(close(mu, 0.1));
    assert!(sigma.abs() < TOLERANCE);
    assert!(close(result.estimated_prices[0], 133.1));
    assert!(close(result.estimated_prices[2], 121.0 * 1.1f64.powi(3)));
}

#[test]
fn test_likelihood_projects_log_drift() {
    let window = [50.0, 55.0, 52.0, 58.0];
    let result = MaximumLikelihoodEstimator.estimate(&window, 4).unwrap();

    // mean log return telescopes to ln(last / first) / (n - 1)
    let mu = (58.0f64 / 50.0).ln() / 3.0;
    assert!(close(result.coefficients.0, mu));
    for (k, price) in result.estimated_prices.iter().enumerate() {
        assert!(close(*price, 58.0 * (mu * (k + 1) as f64).exp()));
    }
}

#[test]
fn test_estimators_share_the_contract() {
    let window = [20.0, 21.0, 20.5, 22.0, 23.0, 22.5];
    for kind in EstimatorKind::all() {
        let estimator = kind.build();
        let result = estimator.estimate(&window, 5).unwrap();
        assert_eq!(result.estimated_prices.len(), 5, "{}", estimator.name());
        assert!(result.estimated_prices.iter().all(|p| p.is_finite()));
        assert_eq!(estimator.name(), kind.as_str());
    }
}

#[test]
fn test_invalid_windows_rejected() {
    for kind in EstimatorKind::all() {
        let estimator = kind.build();
        assert!(estimator.estimate(&[1.0], 2).is_err());
        assert!(estimator.estimate(&[1.0, 2.0], 0).is_err());
    }
    assert!(MethodOfMomentsEstimator.estimate(&[1.0, 0.0, 2.0], 1).is_err());
    assert!(MaximumLikelihoodEstimator.estimate(&[1.0, -1.0], 1).is_err());
}

#[test]
fn test_unknown_estimator_is_fatal() {
    let parsed = "kalman".parse::<EstimatorKind>();
    assert!(matches!(parsed, Err(GenetradeError::UnknownEstimator(name)) if name == "kalman"));
    assert_eq!("Least-Squares".parse::<EstimatorKind>().unwrap(), EstimatorKind::LeastSquares);
}

#[test]
fn test_rolling_forecasts_cover_every_window() {
    let prices: Vec<f64> = (1..=10).map(|p| p as f64).collect();
    let estimator = LeastSquaresEstimator;
    let forecaster = RollingForecaster::new(&estimator, 4, 2);

    let forecasts: Vec<_> = forecaster.forecasts(&prices).collect::<Result<_, _>>().unwrap();
    assert_eq!(forecasts.len(), 6);
    assert_eq!(forecasts[0].window_start, 0);
    assert!(close(forecasts[5].result.estimated_prices[0], 10.0));
}

#[test]
fn test_accuracy_on_linear_prices_is_exact_for_least_squares() {
    let prices: Vec<f64> = (1..=12).map(|p| 2.0 * p as f64).collect();

    let accuracy = ForecastAccuracy::evaluate(&LeastSquaresEstimator, &prices, 4, 3).unwrap();
    // windows whose realized horizon fits inside the series
    assert_eq!(accuracy.windows(), 12 - 4 - 3 + 1);
    assert!(accuracy.max().unwrap() < 1e-12);
    assert_eq!(accuracy.estimator, "least_squares");
}
