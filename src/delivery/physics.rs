//! Kinematics: pure functions for gravity, thrust and position integration.
//!
//! Coordinates are screen-space: x grows rightward, y grows downward, so
//! gravity adds to `vy` and upward thrust subtracts from it. All constants are
//! per-frame, and `dt` is 1.0 for one frame-locked tick.

/// Apply gravitational acceleration to a velocity.
pub fn apply_gravity(vx: f64, vy: f64, gravity: f64, dt: f64) -> (f64, f64) {
    (vx, vy + gravity * dt)
}

/// Apply thrust in the direction the ship is facing.
///
/// `angle_degrees` follows the ship convention: 0 points up, positive is
/// clockwise. Returns the new velocity and the delta-v of this impulse,
/// which depends only on its magnitude.
pub fn apply_thrust(
    vx: f64,
    vy: f64,
    angle_degrees: f64,
    thrust_power: f64,
    dt: f64,
) -> (f64, f64, f64) {
    // 0° is "up" on screen, which is -90° in screen-space polar coordinates
    let angle_rad = (angle_degrees - 90.0).to_radians();
    let impulse = thrust_power * dt;

    let thrust_x = angle_rad.cos() * impulse;
    let thrust_y = angle_rad.sin() * impulse;

    (vx + thrust_x, vy + thrust_y, impulse.abs())
}

/// Advance a position by one step of velocity.
pub fn update_position(x: f64, y: f64, vx: f64, vy: f64, dt: f64) -> (f64, f64) {
    (x + vx * dt, y + vy * dt)
}

/// Total speed from velocity components.
pub fn speed(vx: f64, vy: f64) -> f64 {
    vx.hypot(vy)
}

/// Height above `ground_y`, never negative.
pub fn altitude(y: f64, ground_y: f64) -> f64 {
    (ground_y - y).max(0.0)
}
