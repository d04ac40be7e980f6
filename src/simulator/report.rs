//! Simulation report generation.

use super::runner::{AttemptOutcome, AttemptStats};
use serde::Serialize;

/// Aggregates for every attempt flown at one level.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LevelSummary {
    pub level: u32,
    pub attempts: u32,
    pub landed: u32,
    pub crashed: u32,
    pub game_over: u32,
    pub timed_out: u32,
    /// Mean star rating over rated attempts
    pub avg_rating: f64,
    /// Mean fuel left over safe landings
    pub avg_fuel_left: f64,
    /// Mean delivery time over safe landings
    pub avg_delivery_time: f64,
}

impl LevelSummary {
    pub fn landing_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.landed as f64 / self.attempts as f64
        }
    }
}

/// Aggregated results from all simulated runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub max_level: u32,
    pub levels: Vec<LevelSummary>,
    /// Individual attempts for detailed analysis
    pub attempts: Vec<AttemptStats>,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl SimReport {
    pub fn from_attempts(num_runs: u32, max_level: u32, attempts: Vec<AttemptStats>) -> Self {
        let levels = (1..=max_level)
            .map(|level| {
                let at_level: Vec<&AttemptStats> =
                    attempts.iter().filter(|a| a.level == level).collect();
                let count = |outcome: AttemptOutcome| {
                    at_level.iter().filter(|a| a.outcome == outcome).count() as u32
                };
                let landed = || {
                    at_level
                        .iter()
                        .filter(|a| a.outcome == AttemptOutcome::Landed)
                };
                LevelSummary {
                    level,
                    attempts: at_level.len() as u32,
                    landed: count(AttemptOutcome::Landed),
                    crashed: count(AttemptOutcome::Crashed),
                    game_over: count(AttemptOutcome::GameOver),
                    timed_out: count(AttemptOutcome::TimedOut),
                    avg_rating: mean(at_level.iter().filter_map(|a| a.rating.map(f64::from))),
                    avg_fuel_left: mean(landed().map(|a| a.fuel_left)),
                    avg_delivery_time: mean(landed().map(|a| a.delivery_time)),
                }
            })
            .collect();

        Self {
            num_runs,
            max_level,
            levels,
            attempts,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 AUTOPILOT DELIVERY REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");
        report.push_str(&format!(
            "Runs: {}   Levels per run: {}   Attempts: {}\n\n",
            self.num_runs,
            self.max_level,
            self.attempts.len()
        ));

        report.push_str("── PER LEVEL ────────────────────────────────────────────────────\n");
        report.push_str("  Lvl  Landed  Crash  Lost  T/O  Stars   Fuel   Time\n");
        for s in &self.levels {
            report.push_str(&format!(
                "  {:>3}  {:>5.1}%  {:>5}  {:>4}  {:>3}  {:>5.2}  {:>5.1}  {:>5.1}s\n",
                s.level,
                s.landing_rate() * 100.0,
                s.crashed,
                s.game_over,
                s.timed_out,
                s.avg_rating,
                s.avg_fuel_left,
                s.avg_delivery_time
            ));
        }

        report.push_str("\n── LANDING RATE ─────────────────────────────────────────────────\n");
        for s in &self.levels {
            let pct = s.landing_rate() * 100.0;
            let bar = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Level {:2}: {:>5.1}% {}\n", s.level, pct, bar));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::package::PackageKind;

    fn attempt(level: u32, outcome: AttemptOutcome, rating: Option<u8>) -> AttemptStats {
        AttemptStats {
            level,
            kind: PackageKind::Fragile,
            outcome,
            rating,
            ticks: 200,
            fuel_left: 60.0,
            delivery_time: 4.0,
            total_delta_v: 10.0,
        }
    }

    #[test]
    fn test_level_summaries() {
        let report = SimReport::from_attempts(
            2,
            2,
            vec![
                attempt(1, AttemptOutcome::Landed, Some(5)),
                attempt(1, AttemptOutcome::Crashed, Some(1)),
                attempt(2, AttemptOutcome::GameOver, None),
                attempt(2, AttemptOutcome::Landed, Some(4)),
            ],
        );
        let one = &report.levels[0];
        assert_eq!(one.attempts, 2);
        assert_eq!(one.landed, 1);
        assert_eq!(one.crashed, 1);
        assert!((one.avg_rating - 3.0).abs() < 1e-9);
        assert!((one.landing_rate() - 0.5).abs() < 1e-9);

        let two = &report.levels[1];
        assert_eq!(two.game_over, 1);
        assert!((two.avg_rating - 4.0).abs() < 1e-9);
        assert!((two.avg_fuel_left - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_level_has_zero_rates() {
        let report = SimReport::from_attempts(0, 1, Vec::new());
        assert_eq!(report.levels[0].landing_rate(), 0.0);
        assert_eq!(report.levels[0].avg_rating, 0.0);
    }

    #[test]
    fn test_text_and_json_output() {
        let report =
            SimReport::from_attempts(1, 1, vec![attempt(1, AttemptOutcome::Landed, Some(5))]);
        assert!(report.to_text().contains("AUTOPILOT DELIVERY REPORT"));
        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["levels"][0]["landed"], 1);
        assert_eq!(json["attempts"][0]["outcome"], "Landed");
    }
}
