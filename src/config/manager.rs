use super::{
    data::DataConfig, estimation::EstimationConfig, evolution::EvolutionConfig,
    estimation::EstimatorKind, simulation::SimulationConfig, traits::ConfigSection,
};
use crate::error::GenetradeError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub simulation: SimulationConfig,
    pub estimation: EstimationConfig,
    pub data: DataConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), GenetradeError> {
        self.evolution.validate()?;
        self.simulation.validate()?;
        self.estimation.validate()?;
        self.data.validate()?;
        Ok(())
    }

    /// Parse and validate. An unrecognised estimator name surfaces as `UnknownEstimator`.
    pub fn from_toml_str(contents: &str) -> Result<Self, GenetradeError> {
        let table: toml::Table = contents
            .parse()
            .map_err(|e| GenetradeError::Configuration(format!("Failed to parse config: {}", e)))?;
        if let Some(name) = table
            .get("estimation")
            .and_then(|section| section.get("estimator"))
            .and_then(toml::Value::as_str)
        {
            name.parse::<EstimatorKind>()?;
        }

        let config: AppConfig = toml::from_str(contents)
            .map_err(|e| GenetradeError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GenetradeError> {
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            GenetradeError::Configuration(format!(
                "Failed to read config {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config = AppConfig::from_toml_str(&contents)?;
        log::info!("Loaded configuration from {}", path.as_ref().display());

        *self.write_lock()? = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GenetradeError> {
        let toml_str = {
            let config = self.read_lock()?;
            toml::to_string_pretty(&*config)
                .map_err(|e| GenetradeError::Configuration(format!("Failed to serialize: {}", e)))?
        };

        std::fs::write(path, toml_str)
            .map_err(|e| GenetradeError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> Result<AppConfig, GenetradeError> {
        Ok(self.read_lock()?.clone())
    }

    /// Apply `f` to a copy; the stored config only changes if the result validates.
    pub fn update<F>(&self, f: F) -> Result<(), GenetradeError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.write_lock()?;
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }

    fn read_lock(&self) -> Result<std::sync::RwLockReadGuard<'_, AppConfig>, GenetradeError> {
        self.config
            .read()
            .map_err(|_| GenetradeError::Configuration("Config lock poisoned".to_string()))
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, AppConfig>, GenetradeError> {
        self.config
            .write()
            .map_err(|_| GenetradeError::Configuration("Config lock poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            [evolution]
            population_size = 20
            max_age = 4

            [evolution.genetic]
            crossover_point_amount = 3

            [estimation]
            estimator = "least_squares"
            start_date = "2022-03-01"
            end_date = "2022-06-01"

            [data]
            tickers = ["AAA", "BBB"]
            "#,
        )
        .unwrap();

        assert_eq!(config.evolution.population_size, 20);
        assert_eq!(config.evolution.max_age, 4);
        assert_eq!(config.evolution.genetic.crossover_point_amount, 3);
        assert_eq!(config.evolution.genetic.crossover_point_chance, 0.5);
        assert_eq!(config.estimation.estimator, EstimatorKind::LeastSquares);
        assert_eq!(config.data.tickers, vec!["AAA", "BBB"]);
    }

    #[test]
    fn test_unknown_estimator_fails_parse() {
        let result = AppConfig::from_toml_str(
            r#"
            [estimation]
            estimator = "crystal_ball"
            "#,
        );
        assert!(matches!(result, Err(GenetradeError::UnknownEstimator(name)) if name == "crystal_ball"));
    }

    #[test]
    fn test_estimator_aliases_accepted_in_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            [estimation]
            estimator = "MLE"
            "#,
        )
        .unwrap();
        assert_eq!(config.estimation.estimator, EstimatorKind::MaximumLikelihood);

        let saved = toml::to_string(&config).unwrap();
        assert!(saved.contains("estimator = \"maximum_likelihood\""));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let manager = ConfigManager::new();
        manager
            .update(|c| c.evolution.population_size = 33)
            .unwrap();
        manager.save_to_file(&path).unwrap();

        let reloaded = ConfigManager::new();
        reloaded.load_from_file(&path).unwrap();
        assert_eq!(reloaded.get().unwrap().evolution.population_size, 33);
    }

    #[test]
    fn test_invalid_update_is_discarded() {
        let manager = ConfigManager::new();
        let result = manager.update(|c| c.simulation.days = 0);
        assert!(result.is_err());
        assert_eq!(manager.get().unwrap().simulation.days, SimulationConfig::default().days);
    }
}
