pub mod estimation;
pub mod evaluation;
pub mod generation;
pub mod simulation;
