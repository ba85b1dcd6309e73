pub mod gene;
pub mod genome;
pub mod operators;
pub mod seeding;
pub mod hall_of_fame;
pub mod evolution_engine;
pub mod progress;

pub use gene::Gene;
pub use genome::Genome;
pub use seeding::{InstrumentForecast, WarmStartSeeder};
pub use hall_of_fame::{EliteStrategy, HallOfFame};
pub use evolution_engine::{EvolutionEngine, Population};
pub use progress::{ConsoleProgressCallback, ProgressCallback, SilentProgress};
