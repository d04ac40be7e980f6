//! Landing pad placement.

use crate::core::config::DeliveryConfig;
use crate::core::error::{ensure_positive, DeliveryError, DeliveryResult};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The rectangular landing target. `y` is the top surface the ship lands on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandingPad {
    x: f64,
    width: f64,
    y: f64,
    height: f64,
    flat_zone_margin: f64,
}

impl LandingPad {
    /// Place a pad of `width` at a random x that keeps it, plus the
    /// configured screen margin, fully on screen.
    pub fn random<R: Rng>(
        config: &DeliveryConfig,
        width: f64,
        rng: &mut R,
    ) -> DeliveryResult<Self> {
        ensure_positive("pad_width", width)?;

        let lo = config.pad_screen_margin.ceil() as i64;
        let hi = (config.screen_width - config.pad_screen_margin - width).floor() as i64;
        if hi < lo {
            return Err(DeliveryError::PadOutOfBounds {
                x: config.pad_screen_margin,
                width,
                screen_width: config.screen_width,
            });
        }

        let x = rng.gen_range(lo..=hi) as f64;
        Self::at(config, x, width)
    }

    /// Place a pad at an explicit left edge.
    pub fn at(config: &DeliveryConfig, x: f64, width: f64) -> DeliveryResult<Self> {
        ensure_positive("pad_width", width)?;
        if !x.is_finite() || x < 0.0 || x + width > config.screen_width {
            return Err(DeliveryError::PadOutOfBounds {
                x,
                width,
                screen_width: config.screen_width,
            });
        }

        Ok(Self {
            x,
            width,
            y: config.pad_y,
            height: config.pad_height,
            flat_zone_margin: config.flat_zone_margin,
        })
    }

    /// Left edge.
    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Top surface: the plane the landing check is made against.
    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Bottom of the pad, where the surrounding ground sits.
    pub fn ground_line(&self) -> f64 {
        self.y + self.height
    }

    /// X range kept flat by the terrain generator.
    pub fn flat_zone(&self) -> (f64, f64) {
        (
            self.x - self.flat_zone_margin,
            self.right() + self.flat_zone_margin,
        )
    }

    /// Whether `x` lies over the pad surface (edges inclusive).
    pub fn contains_x(&self, x: f64) -> bool {
        self.x <= x && x <= self.right()
    }
}
