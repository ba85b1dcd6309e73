pub mod traits;
pub mod evolution;
pub mod simulation;
pub mod estimation;
pub mod data;
pub mod manager;

pub use traits::ConfigSection;
pub use manager::{AppConfig, ConfigManager};
pub use evolution::{EvolutionConfig, GeneticSettings, ShortfallPolicy};
pub use simulation::SimulationConfig;
pub use estimation::{EstimationConfig, EstimatorKind};
pub use data::DataConfig;
