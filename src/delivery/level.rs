//! A level: one landing pad, the terrain around it and the ship's start.

use super::difficulty;
use super::pad::LandingPad;
use super::terrain::TerrainProfile;
use crate::core::config::DeliveryConfig;
use crate::core::error::{DeliveryError, DeliveryResult};
use rand::Rng;

/// Immutable layout for one delivery attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    difficulty: u32,
    pad: LandingPad,
    terrain: TerrainProfile,
    start_offset: f64,
}

impl Level {
    /// Build a level with a randomly placed pad sized for `difficulty`.
    pub fn new<R: Rng>(
        config: &DeliveryConfig,
        difficulty: u32,
        rng: &mut R,
    ) -> DeliveryResult<Self> {
        if difficulty == 0 {
            return Err(DeliveryError::InvalidDifficulty { level: difficulty });
        }
        let width = difficulty::pad_width(config, difficulty);
        let pad = LandingPad::random(config, width, rng)?;
        Self::with_pad(config, difficulty, pad, rng)
    }

    /// Build a level around an already placed pad.
    pub fn with_pad<R: Rng>(
        config: &DeliveryConfig,
        difficulty: u32,
        pad: LandingPad,
        rng: &mut R,
    ) -> DeliveryResult<Self> {
        if difficulty == 0 {
            return Err(DeliveryError::InvalidDifficulty { level: difficulty });
        }
        let terrain = TerrainProfile::generate(
            config,
            difficulty,
            pad.ground_line(),
            Some(pad.flat_zone()),
            rng,
        )?;
        let start_offset = difficulty::lateral_offset(config, difficulty, pad.center_x(), rng);

        log::info!(
            "Level {}: pad x={:.0} width={:.0}, terrain variation {:.0}, start offset {:+.0}",
            difficulty,
            pad.x(),
            pad.width(),
            terrain.variation(),
            start_offset
        );

        Ok(Self {
            difficulty,
            pad,
            terrain,
            start_offset,
        })
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn pad(&self) -> &LandingPad {
        &self.pad
    }

    pub fn terrain(&self) -> &TerrainProfile {
        &self.terrain
    }

    /// Horizontal offset of the ship's start from the pad center.
    pub fn start_offset(&self) -> f64 {
        self.start_offset
    }

    /// Where the ship starts: above the pad shifted by the start offset,
    /// kept inside the ship's edge margin.
    pub fn ship_start(&self, config: &DeliveryConfig) -> (f64, f64) {
        let x = (self.pad.center_x() + self.start_offset).clamp(
            config.ship_edge_margin,
            config.screen_width - config.ship_edge_margin,
        );
        (x, config.ship_start_y)
    }

    pub fn terrain_height(&self, x: f64) -> f64 {
        self.terrain.height_at(x)
    }
}
