//! A simple proportional autopilot used to fly simulated deliveries.

use crate::delivery::session::{DeliverySession, TickControls};

/// Steering gains and limits.
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Fastest sideways drift the pilot will aim for
    pub max_lateral_speed: f64,
    /// Largest tilt in degrees used for sideways correction
    pub max_tilt: f64,
    /// Below this altitude the pilot hovers until lined up with the pad
    pub hover_altitude: f64,
    /// Descent rate held on final approach
    pub touchdown_speed: f64,
    /// Fastest descent rate the pilot allows
    pub max_descent_speed: f64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            max_lateral_speed: 2.0,
            max_tilt: 30.0,
            hover_altitude: 150.0,
            touchdown_speed: 1.0,
            max_descent_speed: 4.0,
        }
    }
}

impl Autopilot {
    /// Controls for the next tick of `session`.
    pub fn controls(&self, session: &DeliverySession) -> TickControls {
        let ship = session.ship();
        let pad = session.level().pad();
        let step = session.config().rotation_speed;

        let dx = pad.center_x() - ship.x;
        let desired_vx = (dx * 0.02).clamp(-self.max_lateral_speed, self.max_lateral_speed);
        let vx_error = desired_vx - ship.vx;
        let target_angle = (vx_error * 20.0).clamp(-self.max_tilt, self.max_tilt);
        let angle_error = target_angle - ship.angle;

        let altitude = session.altitude();
        let lined_up = dx.abs() <= pad.width() / 2.0 - 5.0 && ship.vx.abs() < 0.8;
        let desired_vy = if !lined_up && altitude < self.hover_altitude {
            0.0
        } else {
            (altitude * 0.02).clamp(self.touchdown_speed, self.max_descent_speed)
        };

        let braking = ship.vy > desired_vy;
        let steering = vx_error.abs() > 0.3 && ship.angle * vx_error > 0.0;

        TickControls {
            rotate_left: angle_error < -step / 2.0,
            rotate_right: angle_error > step / 2.0,
            thrust: braking || steering,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DeliveryConfig;
    use crate::delivery::level::Level;
    use crate::delivery::package::{Package, PackageKind, RatingThresholds};
    use crate::delivery::pad::LandingPad;
    use crate::delivery::session::SessionState;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_lands_centered_level_one() {
        let config = DeliveryConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let pad = LandingPad::at(&config, 350.0, 100.0).unwrap();
        let level = Level::with_pad(&config, 1, pad, &mut rng).unwrap();
        let package = Package::new(PackageKind::Fragile, "Fine China", RatingThresholds::default());
        let mut session = DeliverySession::with_level(&config, level, package);
        session.confirm(&mut rng);

        let pilot = Autopilot::default();
        for _ in 0..2_000 {
            let controls = pilot.controls(&session);
            if session.tick(&controls, &mut rng) != SessionState::Descent {
                break;
            }
        }
        assert_eq!(session.state(), SessionState::Landed);
        assert!(session.ship().fuel() > 0.0);
    }

    #[test]
    fn test_steers_toward_pad() {
        let config = DeliveryConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let pad = LandingPad::at(&config, 350.0, 100.0).unwrap();
        let level = Level::with_pad(&config, 1, pad, &mut rng).unwrap();
        let package = Package::new(PackageKind::Urgent, "Pizza (HOT)", RatingThresholds::default());
        let mut session = DeliverySession::with_level(&config, level, package);
        session.ship_mut().x = 150.0;

        let controls = Autopilot::default().controls(&session);
        // Pad is to the right: tilt clockwise
        assert!(controls.rotate_right);
        assert!(!controls.rotate_left);
    }
}
