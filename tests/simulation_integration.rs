use genetrade::config::{AppConfig, ConfigManager, EstimatorKind};
use genetrade::data::MarketData;
use genetrade::engines::generation::SilentProgress;
use genetrade::engines::simulation::{Simulation, SimulationReport};
use genetrade::error::GenetradeError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/AAA_data.csv")
}

/// AAA from the fixture plus a falling BBB written with lowercase headers.
fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::copy(fixture(), dir.path().join("AAA_data.csv")).unwrap();

    let fixture_text = fs::read_to_string(fixture()).unwrap();
    let mut bbb = String::from("date,close\n");
    for (i, line) in fixture_text.lines().skip(1).enumerate() {
        let date = line.split(',').next().unwrap();
        bbb.push_str(&format!("{},{:.2}\n", date, 80.0 - 0.5 * i as f64));
    }
    fs::write(dir.path().join("BBB_data.csv"), bbb).unwrap();
    dir
}

fn write_config(dir: &Path, estimator: &str) -> PathBuf {
    let path = dir.join("genetrade.toml");
    let contents = format!(
        r#"
[evolution]
population_size = 16
iterations = 6
children_ratio = 0.25
max_age = 3
hall_of_fame_size = 4
seed = 99

[simulation]
start_cash = 1000.0
days = 8
max_buy_per_day = 5
max_sell_per_day = 5
warm_start_ratio = 0.5

[estimation]
estimator = "{}"
lookback_days = 10
forecast_days = 3
start_date = "2023-01-30"
end_date = "2023-02-24"

[data]
directory = "{}"
tickers = ["AAA", "BBB"]
"#,
        estimator,
        dir.display()
    );
    fs::write(&path, contents).unwrap();
    path
}

fn load(dir: &Path, estimator: &str) -> AppConfig {
    let manager = ConfigManager::new();
    manager.load_from_file(write_config(dir, estimator)).unwrap();
    manager.get().unwrap()
}

fn run(config: AppConfig) -> SimulationReport {
    let market = MarketData::load(&config.data, &config.estimation).unwrap();
    let mut simulation = Simulation::new(config, &market).unwrap();
    simulation.run(&mut SilentProgress).unwrap()
}

#[test]
fn test_market_split_uses_start_date() {
    let dir = data_dir();
    let config = load(dir.path(), "least_squares");
    let market = MarketData::load(&config.data, &config.estimation).unwrap();

    let (estimation, simulation) = market
        .split_at(config.estimation.start_date, 10, 8)
        .unwrap();
    assert_eq!(estimation["AAA"].len(), 10);
    // 2023-01-30 is the 21st row of the fixture
    assert_eq!(simulation["AAA"][0], 117.12);
    assert_eq!(simulation["BBB"][0], 80.0 - 0.5 * 20.0);
}

#[test]
fn test_full_run_produces_consistent_report() {
    let dir = data_dir();
    let report = run(load(dir.path(), "least_squares"));

    assert_eq!(report.estimator, "least_squares");
    assert_eq!(report.tickers, vec!["AAA".to_string(), "BBB".to_string()]);
    assert_eq!(report.iteration_best_profits.len(), 6);
    assert_eq!(report.best_profits_so_far.len(), 6);
    assert_eq!(report.final_profits.len(), 16);
    assert!(report.best_profits_so_far.windows(2).all(|w| w[0] <= w[1]));

    let best = &report.best_agent;
    assert_eq!(best.net_gain, best.profit - 1000.0);
    assert_eq!(best.sale_history["AAA"].len(), 8);
    assert!(report.hall_of_fame.len() <= 4);
    if let Some(top) = report.hall_of_fame.first() {
        assert_eq!(top.profit, best.profit);
    }
}

#[test]
fn test_same_seed_same_report() {
    let dir = data_dir();
    let first = run(load(dir.path(), "maximum_likelihood"));
    let second = run(load(dir.path(), "maximum_likelihood"));

    assert_eq!(first.best_agent.sale_history, second.best_agent.sale_history);
    assert_eq!(first.iteration_best_profits, second.iteration_best_profits);
    assert_eq!(first.ages_at_death, second.ages_at_death);
}

#[test]
fn test_report_written_as_json() {
    let dir = data_dir();
    let report = run(load(dir.path(), "method_of_moments"));

    let path = dir.path().join("report.json");
    report.write_json(&path).unwrap();
    let parsed: SimulationReport = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed.best_agent.sale_history, report.best_agent.sale_history);
    assert_eq!(parsed.days, 8);
}

#[test]
fn test_missing_ticker_file_fails_to_load() {
    let dir = data_dir();
    let mut config = load(dir.path(), "least_squares");
    config.data.tickers.push("ZZZ".to_string());

    assert!(matches!(
        MarketData::load(&config.data, &config.estimation),
        Err(GenetradeError::DataLoading(_))
    ));
}

#[test]
fn test_start_date_without_history_is_insufficient() {
    let dir = data_dir();
    let mut config = load(dir.path(), "least_squares");
    config.estimation.start_date = chrono::NaiveDate::from_ymd_opt(2023, 1, 4).unwrap();
    let market = MarketData::load(&config.data, &config.estimation).unwrap();

    assert!(matches!(
        Simulation::new(config, &market),
        Err(GenetradeError::InsufficientData { .. })
    ));
}

#[test]
fn test_unknown_estimator_in_config_rejected() {
    let dir = data_dir();
    let manager = ConfigManager::new();
    assert!(matches!(
        manager.load_from_file(write_config(dir.path(), "kalman")),
        Err(GenetradeError::UnknownEstimator(name)) if name == "kalman"
    ));
    assert_eq!(manager.get().unwrap().estimation.estimator, EstimatorKind::MethodOfMoments);
}
