pub mod agent;
pub mod evaluator;
pub mod portfolio;

pub use agent::Agent;
pub use evaluator::{FitnessEvaluator, GenerationFitness};
pub use portfolio::Portfolio;
