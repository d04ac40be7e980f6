//! One delivery attempt: the ship, its package and the level it flies in,
//! driven through a fixed-tick state machine.

use super::level::Level;
use super::outcome::{self, LandingReport, LandingStatus};
use super::package::Package;
use super::physics;
use super::ship::ShipState;
use crate::core::config::DeliveryConfig;
use crate::core::error::DeliveryResult;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Physics is frame-locked: every tick advances one unit of simulated time.
pub const PHYSICS_DT: f64 = 1.0;

/// Where a delivery attempt currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Briefing before the drop. Nothing moves.
    Orbit,
    /// Flying toward the pad.
    Descent,
    /// Touched down safely; settling before the rating card.
    Landed,
    /// Hit the pad too fast, missed it, or struck terrain.
    Crashed,
    /// Rating and review are final.
    Rating,
    /// Out of fuel and falling from altitude.
    GameOver,
}

impl SessionState {
    pub fn is_touchdown(self) -> bool {
        matches!(self, SessionState::Landed | SessionState::Crashed)
    }

    /// Short banner text for the HUD.
    pub fn label(self) -> &'static str {
        match self {
            SessionState::Orbit => "IN ORBIT",
            SessionState::Descent => "DESCENT",
            SessionState::Landed => "LANDED",
            SessionState::Crashed => "CRASHED",
            SessionState::Rating => "DELIVERY REPORT",
            SessionState::GameOver => "GAME OVER",
        }
    }
}

/// Pilot controls held during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickControls {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
}

/// What a confirm press asks of whoever owns the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Handled inside the session.
    Stay,
    /// Delivery rated; move on to the next difficulty.
    NextDelivery,
    /// Game over; start again from the first difficulty.
    Restart,
}

/// A single delivery attempt.
#[derive(Debug, Clone)]
pub struct DeliverySession {
    config: DeliveryConfig,
    level: Level,
    ship: ShipState,
    package: Package,
    state: SessionState,
    landing: Option<LandingReport>,
    settle_ticks_left: u32,
    succeeded: bool,
    ticks: u64,
}

impl DeliverySession {
    /// A fresh attempt at `difficulty` with a new level and a random package.
    pub fn new<R: Rng>(
        config: &DeliveryConfig,
        difficulty: u32,
        rng: &mut R,
    ) -> DeliveryResult<Self> {
        let level = Level::new(config, difficulty, rng)?;
        let package = Package::random(config, rng);
        Ok(Self::with_level(config, level, package))
    }

    /// An attempt over a prepared level and package.
    pub fn with_level(config: &DeliveryConfig, level: Level, package: Package) -> Self {
        let (x, y) = level.ship_start(config);
        log::info!(
            "New delivery at level {}: {} ({}) from x={:.0}",
            level.difficulty(),
            package.name(),
            package.kind().name(),
            x
        );
        Self {
            config: config.clone(),
            ship: ShipState::new(x, y, config.starting_fuel),
            level,
            package,
            state: SessionState::Orbit,
            landing: None,
            settle_ticks_left: 0,
            succeeded: false,
            ticks: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn ship(&self) -> &ShipState {
        &self.ship
    }

    /// Mutable ship access for scenario setup.
    pub fn ship_mut(&mut self) -> &mut ShipState {
        &mut self.ship
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    pub fn difficulty(&self) -> u32 {
        self.level.difficulty()
    }

    /// The landing check that ended the descent, if it has ended that way.
    pub fn landing(&self) -> Option<&LandingReport> {
        self.landing.as_ref()
    }

    /// True once the ship has landed safely on the pad.
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Descent ticks simulated so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn settle_ticks_left(&self) -> u32 {
        self.settle_ticks_left
    }

    /// Height of the ship above the pad's top surface.
    pub fn altitude(&self) -> f64 {
        physics::altitude(self.ship.y, self.level.pad().y())
    }

    /// Advance past the current screen.
    pub fn confirm<R: Rng>(&mut self, rng: &mut R) -> ConfirmOutcome {
        match self.state {
            SessionState::Orbit => {
                log::info!("Level {}: descent started", self.difficulty());
                self.state = SessionState::Descent;
                ConfirmOutcome::Stay
            }
            SessionState::Descent => ConfirmOutcome::Stay,
            SessionState::Landed | SessionState::Crashed => {
                self.enter_rating(rng);
                ConfirmOutcome::Stay
            }
            SessionState::Rating => ConfirmOutcome::NextDelivery,
            SessionState::GameOver => ConfirmOutcome::Restart,
        }
    }

    /// Step one fixed tick. Returns the state after the step.
    pub fn tick<R: Rng>(&mut self, controls: &TickControls, rng: &mut R) -> SessionState {
        match self.state {
            SessionState::Descent => self.step_descent(controls, rng),
            SessionState::Landed | SessionState::Crashed => {
                self.settle_ticks_left = self.settle_ticks_left.saturating_sub(1);
                if self.settle_ticks_left == 0 {
                    self.enter_rating(rng);
                }
            }
            SessionState::Orbit | SessionState::Rating | SessionState::GameOver => {}
        }
        self.state
    }

    fn step_descent<R: Rng>(&mut self, controls: &TickControls, rng: &mut R) {
        self.ticks += 1;
        let config = &self.config;
        let ship = &mut self.ship;

        if controls.rotate_left {
            ship.rotate_left(config.rotation_speed);
        }
        if controls.rotate_right {
            ship.rotate_right(config.rotation_speed);
        }
        ship.thrusting = controls.thrust && ship.can_thrust();

        let (vx, vy) = physics::apply_gravity(ship.vx, ship.vy, config.gravity, PHYSICS_DT);
        ship.vx = vx;
        ship.vy = vy;

        if ship.thrusting {
            let (vx, vy, delta_v) = physics::apply_thrust(
                ship.vx,
                ship.vy,
                ship.angle,
                config.thrust_power,
                PHYSICS_DT,
            );
            ship.vx = vx;
            ship.vy = vy;
            ship.burn_fuel(config.fuel_burn_rate);
            self.package.add_delta_v(delta_v);
        }
        self.package.add_time(config.tick_seconds);

        let (x, y) = physics::update_position(ship.x, ship.y, ship.vx, ship.vy, PHYSICS_DT);
        ship.x = x.clamp(
            config.ship_edge_margin,
            config.screen_width - config.ship_edge_margin,
        );
        ship.y = y;

        let mut report = outcome::classify_landing(
            ship.x,
            ship.y,
            ship.vx,
            ship.vy,
            self.level.pad(),
            config.max_landing_velocity,
        );
        if report.status == LandingStatus::Flying
            && config.terrain_collision
            && outcome::terrain_collision(
                ship.x,
                ship.y,
                self.level.terrain(),
                config.ship_collision_margin,
            )
        {
            report = LandingReport {
                status: LandingStatus::Missed,
                on_pad: self.level.pad().contains_x(ship.x),
                velocity_ok: ship.speed() <= config.max_landing_velocity,
            };
        }

        match report.status {
            LandingStatus::Flying => {
                let high = ship.y < self.level.pad().y() - config.still_high_altitude;
                let falling_fast = ship.vy > config.falling_fast_velocity;
                if ship.fuel() <= 0.0 && high && falling_fast {
                    log::info!(
                        "Level {}: out of fuel at altitude {:.0}, falling at {:.2}",
                        self.level.difficulty(),
                        self.level.pad().y() - ship.y,
                        ship.vy
                    );
                    self.state = SessionState::GameOver;
                }
            }
            LandingStatus::Landed => {
                self.succeeded = true;
                self.enter_touchdown(SessionState::Landed, report, rng);
            }
            LandingStatus::Crashed | LandingStatus::Missed => {
                self.package.mark_crashed();
                self.enter_touchdown(SessionState::Crashed, report, rng);
            }
        }
    }

    fn enter_touchdown<R: Rng>(
        &mut self,
        state: SessionState,
        report: LandingReport,
        rng: &mut R,
    ) {
        log::info!(
            "Level {}: {:?} at x={:.1} speed={:.2} after {} ticks",
            self.level.difficulty(),
            report.status,
            self.ship.x,
            self.ship.speed(),
            self.ticks
        );
        self.ship.thrusting = false;
        self.landing = Some(report);
        self.state = state;
        self.settle_ticks_left = self.config.touchdown_settle_ticks;
        if self.settle_ticks_left == 0 {
            self.enter_rating(rng);
        }
    }

    fn enter_rating<R: Rng>(&mut self, rng: &mut R) {
        self.settle_ticks_left = 0;
        self.state = SessionState::Rating;
        let rating = self.package.finalize(rng);
        log::info!(
            "Level {}: {} delivered with {} stars",
            self.level.difficulty(),
            self.package.name(),
            rating
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::pad::LandingPad;
    use crate::delivery::package::{PackageKind, RatingThresholds};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn centered_session(config: &DeliveryConfig, kind: PackageKind) -> DeliverySession {
        let mut rng = create_test_rng();
        let pad = LandingPad::at(config, 350.0, 100.0).unwrap();
        let level = Level::with_pad(config, 1, pad, &mut rng).unwrap();
        let package = Package::new(kind, "Test Crate", RatingThresholds::from_config(config));
        DeliverySession::with_level(config, level, package)
    }

    fn run_until_done(session: &mut DeliverySession, controls: TickControls) -> SessionState {
        let mut rng = create_test_rng();
        for _ in 0..5_000 {
            let state = session.tick(&controls, &mut rng);
            if state != SessionState::Descent {
                return state;
            }
        }
        panic!("descent never ended");
    }

    #[test]
    fn test_starts_in_orbit_and_waits() {
        let config = DeliveryConfig::default();
        let mut session = centered_session(&config, PackageKind::Fragile);
        let mut rng = create_test_rng();
        assert_eq!(session.state(), SessionState::Orbit);
        for _ in 0..10 {
            session.tick(&TickControls::default(), &mut rng);
        }
        assert_eq!(session.ship().y, 80.0);
        assert_eq!(session.package().delivery_time(), 0.0);
        assert_eq!(session.confirm(&mut rng), ConfirmOutcome::Stay);
        assert_eq!(session.state(), SessionState::Descent);
    }

    #[test]
    fn test_free_fall_from_start_crashes_on_pad() {
        let config = DeliveryConfig::default();
        let mut session = centered_session(&config, PackageKind::Fragile);
        let mut rng = create_test_rng();
        session.confirm(&mut rng);

        let state = run_until_done(&mut session, TickControls::default());
        assert_eq!(state, SessionState::Crashed);
        let report = session.landing().unwrap();
        assert!(report.on_pad);
        assert!(!report.velocity_ok);
        assert!(session.package().crashed());
        assert!(!session.succeeded());
        assert_eq!(session.ship().fuel(), config.starting_fuel);
    }

    #[test]
    fn test_gentle_touchdown_lands() {
        let config = DeliveryConfig::default();
        let mut session = centered_session(&config, PackageKind::Urgent);
        let mut rng = create_test_rng();
        session.confirm(&mut rng);
        session.ship_mut().y = 548.5;
        session.ship_mut().vy = 1.0;

        let state = run_until_done(&mut session, TickControls::default());
        assert_eq!(state, SessionState::Landed);
        assert!(session.succeeded());
        assert!(!session.package().crashed());
    }

    #[test]
    fn test_slow_hill_strike_reports_safe_speed() {
        let config = DeliveryConfig::default();
        let mut session = centered_session(&config, PackageKind::Fragile);
        let mut rng = create_test_rng();
        session.confirm(&mut rng);
        let x = 100.0;
        let ground = session.level().terrain_height(x);
        session.ship_mut().x = x;
        session.ship_mut().y = ground.min(549.0) - 0.5;
        session.ship_mut().vy = 0.3;

        assert_eq!(
            run_until_done(&mut session, TickControls::default()),
            SessionState::Crashed
        );
        let report = session.landing().unwrap();
        assert_eq!(report.status, LandingStatus::Missed);
        assert!(!report.on_pad);
        assert!(report.velocity_ok);
        assert!(session.package().crashed());
    }

    #[test]
    fn test_touchdown_hold_then_rating() {
        let config = DeliveryConfig::default();
        let mut session = centered_session(&config, PackageKind::Fragile);
        let mut rng = create_test_rng();
        session.confirm(&mut rng);
        run_until_done(&mut session, TickControls::default());
        assert_eq!(session.settle_ticks_left(), config.touchdown_settle_ticks);

        for _ in 1..config.touchdown_settle_ticks {
            assert_eq!(
                session.tick(&TickControls::default(), &mut rng),
                SessionState::Crashed
            );
        }
        assert_eq!(
            session.tick(&TickControls::default(), &mut rng),
            SessionState::Rating
        );
        assert_eq!(session.package().rating(), 1);
        assert!(session.package().review().is_some());
    }

    #[test]
    fn test_confirm_skips_touchdown_hold() {
        let config = DeliveryConfig::default();
        let mut session = centered_session(&config, PackageKind::Fragile);
        let mut rng = create_test_rng();
        session.confirm(&mut rng);
        run_until_done(&mut session, TickControls::default());
        assert_eq!(session.confirm(&mut rng), ConfirmOutcome::Stay);
        assert_eq!(session.state(), SessionState::Rating);
        assert_eq!(session.confirm(&mut rng), ConfirmOutcome::NextDelivery);
    }

    #[test]
    fn test_zero_settle_ticks_rates_on_contact() {
        let config = DeliveryConfig {
            touchdown_settle_ticks: 0,
            ..DeliveryConfig::default()
        };
        let mut session = centered_session(&config, PackageKind::Fragile);
        let mut rng = create_test_rng();
        session.confirm(&mut rng);
        assert_eq!(
            run_until_done(&mut session, TickControls::default()),
            SessionState::Rating
        );
    }

    #[test]
    fn test_thrust_burns_fuel_and_adds_stress() {
        let config = DeliveryConfig::default();
        let mut session = centered_session(&config, PackageKind::Fragile);
        let mut rng = create_test_rng();
        session.confirm(&mut rng);
        let thrust = TickControls {
            thrust: true,
            ..TickControls::default()
        };
        for _ in 0..10 {
            session.tick(&thrust, &mut rng);
        }
        assert!((session.ship().fuel() - 97.0).abs() < 1e-9);
        assert!((session.package().total_delta_v() - 1.2).abs() < 1e-9);
        assert!((session.package().delivery_time() - 10.0 / 60.0).abs() < 1e-9);
        // Thrust beats gravity, so the ship climbs
        assert!(session.ship().vy < 0.0);
    }

    #[test]
    fn test_no_thrust_without_fuel() {
        let config = DeliveryConfig::default();
        let mut session = centered_session(&config, PackageKind::Fragile);
        let mut rng = create_test_rng();
        session.confirm(&mut rng);
        session.ship_mut().set_fuel(0.0);
        let thrust = TickControls {
            thrust: true,
            ..TickControls::default()
        };
        session.tick(&thrust, &mut rng);
        assert!(!session.ship().thrusting);
        assert_eq!(session.package().total_delta_v(), 0.0);
    }

    #[test]
    fn test_rotation_follows_controls() {
        let config = DeliveryConfig::default();
        let mut session = centered_session(&config, PackageKind::Fragile);
        let mut rng = create_test_rng();
        session.confirm(&mut rng);
        let left = TickControls {
            rotate_left: true,
            ..TickControls::default()
        };
        session.tick(&left, &mut rng);
        session.tick(&left, &mut rng);
        assert!((session.ship().angle + 2.0 * config.rotation_speed).abs() < 1e-9);
    }

    #[test]
    fn test_x_is_clamped_to_edge_margin() {
        let config = DeliveryConfig::default();
        let mut session = centered_session(&config, PackageKind::Fragile);
        let mut rng = create_test_rng();
        session.confirm(&mut rng);
        session.ship_mut().vx = -500.0;
        session.tick(&TickControls::default(), &mut rng);
        assert_eq!(session.ship().x, config.ship_edge_margin);
    }

    #[test]
    fn test_game_over_when_dry_and_falling_high() {
        let config = DeliveryConfig::default();
        let mut session = centered_session(&config, PackageKind::Fragile);
        let mut rng = create_test_rng();
        session.confirm(&mut rng);
        session.ship_mut().set_fuel(0.0);
        session.ship_mut().y = 200.0;
        session.ship_mut().vy = 6.0;
        assert_eq!(
            session.tick(&TickControls::default(), &mut rng),
            SessionState::GameOver
        );
        assert_eq!(session.confirm(&mut rng), ConfirmOutcome::Restart);
    }

    #[test]
    fn test_no_game_over_with_fuel_left() {
        let config = DeliveryConfig::default();
        let mut session = centered_session(&config, PackageKind::Fragile);
        let mut rng = create_test_rng();
        session.confirm(&mut rng);
        session.ship_mut().y = 200.0;
        session.ship_mut().vy = 6.0;
        assert_eq!(
            session.tick(&TickControls::default(), &mut rng),
            SessionState::Descent
        );
    }

    #[test]
    fn test_rating_is_fixed_once_entered() {
        let config = DeliveryConfig {
            touchdown_settle_ticks: 0,
            ..DeliveryConfig::default()
        };
        let mut session = centered_session(&config, PackageKind::Urgent);
        let mut rng = create_test_rng();
        session.confirm(&mut rng);
        session.ship_mut().y = 548.5;
        session.ship_mut().vy = 1.0;
        run_until_done(&mut session, TickControls::default());
        let review = session.package().review().unwrap().to_string();
        let rating = session.package().rating();
        for _ in 0..100 {
            session.tick(&TickControls::default(), &mut rng);
        }
        assert_eq!(session.package().review().unwrap(), review);
        assert_eq!(session.package().rating(), rating);
        assert_eq!(rating, 5);
    }
}
