//! Ship state for one delivery attempt.

use serde::{Deserialize, Serialize};

/// Discrete facing used by renderers (sprite selection only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipFacing {
    HardLeft,
    Left,
    Up,
    Right,
    HardRight,
    Down,
}

impl ShipFacing {
    /// Map a heading in degrees (0 = up, clockwise positive) to a facing.
    pub fn from_degrees(angle: f64) -> Self {
        // Normalize to (-180, 180]
        let mut a = angle.rem_euclid(360.0);
        if a > 180.0 {
            a -= 360.0;
        }
        if a.abs() > 135.0 {
            Self::Down
        } else if a < -50.0 {
            Self::HardLeft
        } else if a < -15.0 {
            Self::Left
        } else if a <= 15.0 {
            Self::Up
        } else if a <= 50.0 {
            Self::Right
        } else {
            Self::HardRight
        }
    }
}

/// Position, velocity, heading and fuel of the delivery ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipState {
    pub x: f64,
    pub y: f64,
    /// Horizontal velocity (positive = rightward).
    pub vx: f64,
    /// Vertical velocity (positive = downward).
    pub vy: f64,
    /// Heading in degrees. 0 = pointing up, positive = clockwise.
    pub angle: f64,
    /// True on ticks where the engine actually fired.
    pub thrusting: bool,
    fuel: f64,
    max_fuel: f64,
}

impl ShipState {
    /// A ship at rest, pointing up, with a full tank.
    ///
    /// Negative or non-finite fuel capacities are treated as an empty tank.
    pub fn new(x: f64, y: f64, starting_fuel: f64) -> Self {
        let max_fuel = if starting_fuel.is_finite() {
            starting_fuel.max(0.0)
        } else {
            0.0
        };
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            angle: 0.0,
            thrusting: false,
            fuel: max_fuel,
            max_fuel,
        }
    }

    /// Return to the starting state at a new position.
    pub fn reset(&mut self, x: f64, y: f64) {
        *self = Self::new(x, y, self.max_fuel);
    }

    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    pub fn max_fuel(&self) -> f64 {
        self.max_fuel
    }

    /// Remaining fuel as a fraction of a full tank.
    pub fn fuel_fraction(&self) -> f64 {
        if self.max_fuel > 0.0 {
            (self.fuel / self.max_fuel).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Set the fuel level, clamped to `[0, max_fuel]`.
    pub fn set_fuel(&mut self, fuel: f64) {
        self.fuel = if fuel.is_nan() {
            0.0
        } else {
            fuel.clamp(0.0, self.max_fuel)
        };
    }

    pub fn can_thrust(&self) -> bool {
        self.fuel > 0.0
    }

    /// Burn `amount` of fuel. Returns false if the tank was already empty.
    pub fn burn_fuel(&mut self, amount: f64) -> bool {
        if !self.can_thrust() {
            return false;
        }
        self.set_fuel(self.fuel - amount);
        true
    }

    /// Rotate counter-clockwise.
    pub fn rotate_left(&mut self, degrees: f64) {
        self.angle -= degrees;
    }

    /// Rotate clockwise.
    pub fn rotate_right(&mut self, degrees: f64) {
        self.angle += degrees;
    }

    pub fn facing(&self) -> ShipFacing {
        ShipFacing::from_degrees(self.angle)
    }

    pub fn speed(&self) -> f64 {
        super::physics::speed(self.vx, self.vy)
    }
}
