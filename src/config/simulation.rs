use super::traits::{ensure_positive, ensure_probability, ConfigSection};
use crate::error::GenetradeError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub start_cash: f64,
    /// Number of trading days simulated (gene length)
    pub days: usize,
    pub max_buy_per_day: u64,
    pub max_sell_per_day: u64,
    /// Reserved for holding-period decision policies
    pub minimum_holding_period: usize,
    /// Fraction of the initial population built by the warm-start seeder
    pub warm_start_ratio: f64,
    /// Random genomes draw each value from U(-a, a)
    pub random_gene_amplitude: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_cash: 10000.0,
            days: 10,
            max_buy_per_day: 10,
            max_sell_per_day: 10,
            minimum_holding_period: 0,
            warm_start_ratio: 1.0,
            random_gene_amplitude: 10.0,
        }
    }
}

impl ConfigSection for SimulationConfig {
    fn section_name() -> &'static str {
        "simulation"
    }

    fn validate(&self) -> Result<(), GenetradeError> {
        let section = Self::section_name();
        ensure_positive(section, "start_cash", self.start_cash)?;
        if self.days == 0 {
            return Err(GenetradeError::Configuration(
                "Simulation must cover at least one day".to_string(),
            ));
        }
        if self.max_buy_per_day == 0 || self.max_sell_per_day == 0 {
            return Err(GenetradeError::Configuration(
                "Daily buy and sell caps must be at least 1".to_string(),
            ));
        }
        ensure_probability(section, "warm_start_ratio", self.warm_start_ratio)?;
        ensure_positive(section, "random_gene_amplitude", self.random_gene_amplitude)?;
        Ok(())
    }
}
