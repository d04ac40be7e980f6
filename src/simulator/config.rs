//! Simulation configuration.

use crate::core::config::DeliveryConfig;

/// Configuration for a batch of autopilot runs.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of runs; each run flies every level once
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Highest level flown in each run
    pub max_level: u32,

    /// Descent ticks before an attempt counts as timed out
    pub max_ticks_per_attempt: u64,

    /// Flight model tuning
    pub delivery: DeliveryConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            seed: None,
            max_level: 10,
            max_ticks_per_attempt: 5_000,
            delivery: DeliveryConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small batch over the first few levels.
    pub fn quick(max_level: u32) -> Self {
        Self {
            num_runs: 25,
            max_level,
            ..Default::default()
        }
    }
}
