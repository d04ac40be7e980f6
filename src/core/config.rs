//! Runtime tuning configuration.
//!
//! [`DeliveryConfig`] mirrors every tuning constant in [`crate::core::constants`]
//! and is passed by reference into terrain, level and session constructors.
//! It can be overridden from a JSON file; missing keys fall back to the
//! compile-time defaults, so a file may override just the values you care
//! about:
//!
//! ```json
//! { "gravity": 0.04, "starting_fuel": 150.0 }
//! ```

use super::constants::*;
use super::error::{ensure_non_negative, ensure_positive, DeliveryError, DeliveryResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Tuning values for one running game. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    // ── Screen & clock ───────────────────────────────────────────────────────
    pub screen_width: f64,
    pub screen_height: f64,
    /// Seconds of delivery time credited per simulation tick.
    pub tick_seconds: f64,

    // ── Physics ──────────────────────────────────────────────────────────────
    pub gravity: f64,
    pub thrust_power: f64,
    pub rotation_speed: f64,
    pub max_landing_velocity: f64,
    pub falling_fast_velocity: f64,
    pub still_high_altitude: f64,

    // ── Fuel ─────────────────────────────────────────────────────────────────
    pub starting_fuel: f64,
    pub fuel_burn_rate: f64,

    // ── Ship ─────────────────────────────────────────────────────────────────
    pub ship_start_y: f64,
    pub ship_edge_margin: f64,
    pub ship_collision_margin: f64,
    pub start_edge_margin: f64,
    /// Whether striking terrain outside the pad ends the attempt.
    pub terrain_collision: bool,
    pub touchdown_settle_ticks: u32,

    // ── Landing pad ──────────────────────────────────────────────────────────
    pub pad_base_width: f64,
    pub pad_height: f64,
    pub pad_y: f64,
    pub pad_screen_margin: f64,
    pub pad_width_reduction_per_level: f64,
    pub pad_max_width_reduction: f64,
    pub pad_min_width: f64,

    // ── Terrain ──────────────────────────────────────────────────────────────
    pub terrain_segments: usize,
    pub flat_zone_margin: f64,
    pub terrain_transition_width: f64,
    pub terrain_variation_base: f64,
    pub terrain_variation_per_level: f64,
    pub terrain_variation_cap: f64,

    // ── Difficulty ───────────────────────────────────────────────────────────
    pub lateral_offset_per_level: f64,
    pub max_lateral_offset: f64,

    // ── Ratings ──────────────────────────────────────────────────────────────
    pub fragile_thresholds: [f64; 4],
    pub urgent_thresholds: [f64; 4],
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tick_seconds: TICK_SECONDS,

            gravity: GRAVITY,
            thrust_power: THRUST_POWER,
            rotation_speed: ROTATION_SPEED_DEGREES,
            max_landing_velocity: MAX_LANDING_VELOCITY,
            falling_fast_velocity: FALLING_FAST_VELOCITY,
            still_high_altitude: STILL_HIGH_ALTITUDE,

            starting_fuel: STARTING_FUEL,
            fuel_burn_rate: FUEL_BURN_RATE,

            ship_start_y: SHIP_START_Y,
            ship_edge_margin: SHIP_EDGE_MARGIN,
            ship_collision_margin: SHIP_COLLISION_MARGIN,
            start_edge_margin: START_EDGE_MARGIN,
            terrain_collision: true,
            touchdown_settle_ticks: TOUCHDOWN_SETTLE_TICKS,

            pad_base_width: LANDING_PAD_WIDTH,
            pad_height: LANDING_PAD_HEIGHT,
            pad_y: LANDING_PAD_Y,
            pad_screen_margin: PAD_SCREEN_MARGIN,
            pad_width_reduction_per_level: PAD_WIDTH_REDUCTION_PER_LEVEL,
            pad_max_width_reduction: PAD_MAX_WIDTH_REDUCTION,
            pad_min_width: PAD_MIN_WIDTH,

            terrain_segments: TERRAIN_SEGMENTS,
            flat_zone_margin: TERRAIN_FLAT_ZONE_MARGIN,
            terrain_transition_width: TERRAIN_TRANSITION_WIDTH,
            terrain_variation_base: TERRAIN_HEIGHT_BASE,
            terrain_variation_per_level: TERRAIN_HEIGHT_PER_LEVEL,
            terrain_variation_cap: MAX_TERRAIN_HEIGHT,

            lateral_offset_per_level: LATERAL_OFFSET_PER_LEVEL,
            max_lateral_offset: MAX_LATERAL_OFFSET,

            fragile_thresholds: FRAGILE_THRESHOLDS,
            urgent_thresholds: URGENT_THRESHOLDS,
        }
    }
}

impl DeliveryConfig {
    /// Load a config from a JSON file and validate it.
    pub fn load(path: &Path) -> DeliveryResult<Self> {
        let text = fs::read_to_string(path)?;
        let config: DeliveryConfig = serde_json::from_str(&text).map_err(|e| {
            log::warn!("Rejected config {}: {}", path.display(), e);
            e
        })?;
        if let Err(e) = config.validate() {
            log::warn!("Rejected config {}: {}", path.display(), e);
            return Err(e);
        }
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve the config for a run.
    ///
    /// An explicit path must exist. Without one, the platform config
    /// directory is checked for `config.json`; absence means defaults.
    pub fn resolve(explicit: Option<&Path>) -> DeliveryResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Check every value against the ranges the simulation relies on.
    pub fn validate(&self) -> DeliveryResult<()> {
        ensure_positive("screen_width", self.screen_width)?;
        ensure_positive("screen_height", self.screen_height)?;
        ensure_positive("tick_seconds", self.tick_seconds)?;

        ensure_non_negative("gravity", self.gravity)?;
        ensure_non_negative("thrust_power", self.thrust_power)?;
        ensure_non_negative("rotation_speed", self.rotation_speed)?;
        ensure_positive("max_landing_velocity", self.max_landing_velocity)?;
        ensure_positive("falling_fast_velocity", self.falling_fast_velocity)?;
        ensure_non_negative("still_high_altitude", self.still_high_altitude)?;

        ensure_non_negative("starting_fuel", self.starting_fuel)?;
        ensure_non_negative("fuel_burn_rate", self.fuel_burn_rate)?;

        ensure_non_negative("ship_start_y", self.ship_start_y)?;
        ensure_non_negative("ship_edge_margin", self.ship_edge_margin)?;
        ensure_non_negative("ship_collision_margin", self.ship_collision_margin)?;
        ensure_non_negative("start_edge_margin", self.start_edge_margin)?;
        if self.ship_edge_margin * 2.0 >= self.screen_width {
            return Err(DeliveryError::InvalidParameter {
                name: "ship_edge_margin",
                value: self.ship_edge_margin,
                expected: "less than half the screen width",
            });
        }

        ensure_positive("pad_base_width", self.pad_base_width)?;
        ensure_non_negative("pad_height", self.pad_height)?;
        ensure_non_negative("pad_y", self.pad_y)?;
        ensure_non_negative("pad_screen_margin", self.pad_screen_margin)?;
        ensure_non_negative(
            "pad_width_reduction_per_level",
            self.pad_width_reduction_per_level,
        )?;
        ensure_non_negative("pad_max_width_reduction", self.pad_max_width_reduction)?;
        ensure_positive("pad_min_width", self.pad_min_width)?;
        if self.pad_base_width + self.pad_screen_margin * 2.0 > self.screen_width {
            return Err(DeliveryError::InvalidParameter {
                name: "pad_base_width",
                value: self.pad_base_width,
                expected: "pad plus both screen margins must fit the screen",
            });
        }

        if self.terrain_segments == 0 {
            return Err(DeliveryError::InvalidParameter {
                name: "terrain_segments",
                value: 0.0,
                expected: "[1, ∞)",
            });
        }
        ensure_non_negative("flat_zone_margin", self.flat_zone_margin)?;
        // Side probes of a ship over the pad edge must stay on flat ground
        if self.flat_zone_margin < self.ship_collision_margin {
            return Err(DeliveryError::InvalidParameter {
                name: "flat_zone_margin",
                value: self.flat_zone_margin,
                expected: "at least ship_collision_margin",
            });
        }
        ensure_positive("terrain_transition_width", self.terrain_transition_width)?;
        ensure_non_negative("terrain_variation_base", self.terrain_variation_base)?;
        ensure_non_negative(
            "terrain_variation_per_level",
            self.terrain_variation_per_level,
        )?;
        ensure_non_negative("terrain_variation_cap", self.terrain_variation_cap)?;

        ensure_non_negative("lateral_offset_per_level", self.lateral_offset_per_level)?;
        ensure_non_negative("max_lateral_offset", self.max_lateral_offset)?;

        validate_thresholds("fragile_thresholds", &self.fragile_thresholds)?;
        validate_thresholds("urgent_thresholds", &self.urgent_thresholds)?;

        Ok(())
    }
}

/// Thresholds must be non-negative and strictly ascending.
fn validate_thresholds(name: &'static str, thresholds: &[f64; 4]) -> DeliveryResult<()> {
    for &value in thresholds {
        ensure_non_negative(name, value)?;
    }
    for pair in thresholds.windows(2) {
        if pair[1] <= pair[0] {
            return Err(DeliveryError::InvalidParameter {
                name,
                value: pair[1],
                expected: "strictly ascending values",
            });
        }
    }
    Ok(())
}

/// Platform directories for config and log files.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "orbital-delivery")
}

/// `<config dir>/config.json`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
