//! Simulation runner: flies real `DeliverySession`s with the autopilot.

use super::autopilot::Autopilot;
use super::config::SimConfig;
use super::report::SimReport;
use crate::core::error::DeliveryResult;
use crate::delivery::package::PackageKind;
use crate::delivery::session::{DeliverySession, SessionState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// How a simulated attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttemptOutcome {
    Landed,
    Crashed,
    GameOver,
    TimedOut,
}

/// Result of one simulated delivery.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptStats {
    pub level: u32,
    pub kind: PackageKind,
    pub outcome: AttemptOutcome,
    /// Star rating, when the attempt reached the rating card
    pub rating: Option<u8>,
    pub ticks: u64,
    pub fuel_left: f64,
    pub delivery_time: f64,
    pub total_delta_v: f64,
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> DeliveryResult<SimReport> {
    config.delivery.validate()?;
    let pilot = Autopilot::default();
    let mut attempts = Vec::with_capacity((config.num_runs * config.max_level) as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => StdRng::from_entropy(),
        };

        for level in 1..=config.max_level {
            let stats = simulate_attempt(config, &pilot, level, &mut rng)?;
            if config.verbosity >= 2 {
                println!(
                    "Run {}/{} - Level {}: {:?}, rating {:?}, {:.1}s, {:.0} fuel left",
                    run_idx + 1,
                    config.num_runs,
                    level,
                    stats.outcome,
                    stats.rating,
                    stats.delivery_time,
                    stats.fuel_left
                );
            }
            attempts.push(stats);
        }
    }

    Ok(SimReport::from_attempts(
        config.num_runs,
        config.max_level,
        attempts,
    ))
}

/// Fly one delivery at `level` until it is rated, lost or out of time.
pub fn simulate_attempt<R: Rng>(
    config: &SimConfig,
    pilot: &Autopilot,
    level: u32,
    rng: &mut R,
) -> DeliveryResult<AttemptStats> {
    let mut session = DeliverySession::new(&config.delivery, level, rng)?;
    session.confirm(rng);

    let mut outcome = AttemptOutcome::TimedOut;
    while session.ticks() < config.max_ticks_per_attempt {
        let controls = pilot.controls(&session);
        match session.tick(&controls, rng) {
            SessionState::Descent => {}
            SessionState::GameOver => {
                outcome = AttemptOutcome::GameOver;
                break;
            }
            _ => {
                outcome = if session.succeeded() {
                    AttemptOutcome::Landed
                } else {
                    AttemptOutcome::Crashed
                };
                break;
            }
        }
    }
    if session.state().is_touchdown() {
        session.confirm(rng);
    }

    let package = session.package();
    Ok(AttemptStats {
        level,
        kind: package.kind(),
        outcome,
        rating: package.is_finalized().then(|| package.rating()),
        ticks: session.ticks(),
        fuel_left: session.ship().fuel(),
        delivery_time: package.delivery_time(),
        total_delta_v: package.total_delta_v(),
    })
}
