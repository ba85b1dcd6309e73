use super::traits::{ensure_positive, ensure_probability, ConfigSection};
use crate::error::GenetradeError;
use serde::{Deserialize, Serialize};

/// Population-level settings for the evolution loop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub iterations: usize,
    /// Fraction of the population replaced by children each generation
    pub children_ratio: f64,
    /// Agents at or beyond this age are excluded from survival
    pub max_age: u32,
    pub hall_of_fame_size: usize,
    pub seed: Option<u64>,
    pub shortfall_policy: ShortfallPolicy,
    pub genetic: GeneticSettings,
}

/// What to do when fewer agents are young enough to survive than the survivor quota needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortfallPolicy {
    /// Shrink the survivor quota and breed extra children in the freed slots
    BreedReplacements,
    /// Abort the generation with `InsufficientSurvivors`
    Fail,
}

/// Operator settings for genes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticSettings {
    pub crossover_imbalance: f64,
    pub float_mutation_variance: f64,
    pub rotation_size_variance: f64,
    pub rotation_shift_variance: f64,
    pub mutate_change_chance: f64,
    pub mutate_rotate_chance: f64,
    pub crossover_point_amount: usize,
    pub crossover_point_chance: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            iterations: 100,
            children_ratio: 0.3,
            max_age: 10,
            hall_of_fame_size: 5,
            seed: None,
            shortfall_policy: ShortfallPolicy::BreedReplacements,
            genetic: GeneticSettings::default(),
        }
    }
}

impl Default for GeneticSettings {
    fn default() -> Self {
        Self {
            crossover_imbalance: 0.25,
            float_mutation_variance: 0.1,
            rotation_size_variance: 1.0,
            rotation_shift_variance: 1.0,
            mutate_change_chance: 0.5,
            mutate_rotate_chance: 0.5,
            crossover_point_amount: 2,
            crossover_point_chance: 0.5,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), GenetradeError> {
        let section = Self::section_name();
        if self.population_size < 2 {
            return Err(GenetradeError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.children_ratio) {
            return Err(GenetradeError::Configuration(format!(
                "Children ratio must be in [0, 1), got {}",
                self.children_ratio
            )));
        }
        if self.max_age == 0 {
            return Err(GenetradeError::Configuration(
                "Max age must be at least 1".to_string(),
            ));
        }
        if self.hall_of_fame_size == 0 {
            return Err(GenetradeError::Configuration(
                "Hall of fame size must be at least 1".to_string(),
            ));
        }
        self.genetic.validate(section)
    }
}

impl GeneticSettings {
    fn validate(&self, section: &str) -> Result<(), GenetradeError> {
        // the blend range [-imbalance, 1 + imbalance] must have a finite width
        let width = 1.0 + 2.0 * self.crossover_imbalance;
        if !(self.crossover_imbalance >= 0.0) || !width.is_finite() {
            return Err(GenetradeError::Configuration(format!(
                "[{}] crossover_imbalance must be finite and non-negative, got {}",
                section, self.crossover_imbalance
            )));
        }
        ensure_positive(section, "float_mutation_variance", self.float_mutation_variance)?;
        ensure_positive(section, "rotation_size_variance", self.rotation_size_variance)?;
        ensure_positive(section, "rotation_shift_variance", self.rotation_shift_variance)?;
        ensure_probability(section, "mutate_change_chance", self.mutate_change_chance)?;
        ensure_probability(section, "mutate_rotate_chance", self.mutate_rotate_chance)?;
        ensure_probability(section, "crossover_point_chance", self.crossover_point_chance)?;
        Ok(())
    }
}
