//! Headless delivery simulator.
//!
//! Flies batches of real `DeliverySession`s with a simple autopilot to
//! check landing rates, fuel use and ratings across levels.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::Autopilot;
pub use config::SimConfig;
pub use report::{LevelSummary, SimReport};
pub use runner::{run_simulation, simulate_attempt, AttemptOutcome, AttemptStats};
