//! Landing judgment against the pad plane, plus a separate terrain contact
//! check.

use super::pad::LandingPad;
use super::physics;
use super::terrain::TerrainProfile;
use serde::{Deserialize, Serialize};

/// Result of one landing check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LandingStatus {
    /// Still above the pad plane.
    Flying,
    /// Touched down on the pad slowly enough.
    Landed,
    /// Reached the pad too fast.
    Crashed,
    /// Reached ground level away from the pad.
    Missed,
}

impl LandingStatus {
    /// Whether this status ends the descent.
    pub fn is_touchdown(self) -> bool {
        !matches!(self, LandingStatus::Flying)
    }
}

/// Landing check result with the two conditions that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandingReport {
    pub status: LandingStatus,
    pub on_pad: bool,
    pub velocity_ok: bool,
}

/// Judge a ship's touchdown against the pad.
///
/// Only the pad's y-plane is consulted: once `y` reaches it the ship is
/// either on the pad (landed or crashed by speed) or has missed.
pub fn classify_landing(
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    pad: &LandingPad,
    max_landing_velocity: f64,
) -> LandingReport {
    if y < pad.y() {
        return LandingReport {
            status: LandingStatus::Flying,
            on_pad: false,
            velocity_ok: false,
        };
    }

    let on_pad = pad.contains_x(x);
    let velocity_ok = physics::speed(vx, vy) <= max_landing_velocity;

    let status = match (on_pad, velocity_ok) {
        (true, true) => LandingStatus::Landed,
        (true, false) => LandingStatus::Crashed,
        (false, _) => LandingStatus::Missed,
    };

    LandingReport {
        status,
        on_pad,
        velocity_ok,
    }
}

/// Whether the ship at (`x`, `y`) touches the terrain at its center or
/// `margin` to either side.
pub fn terrain_collision(x: f64, y: f64, terrain: &TerrainProfile, margin: f64) -> bool {
    [x - margin, x, x + margin]
        .into_iter()
        .any(|check_x| y >= terrain.height_at(check_x))
}
