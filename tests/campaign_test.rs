//! Campaign integration tests
//!
//! Walks the title screen, delivery screens and the difficulty counter
//! through the same commands the keyboard produces.

use orbital_delivery::core::config::DeliveryConfig;
use orbital_delivery::delivery::{
    Campaign, CampaignEvent, CampaignFlow, CampaignScreen, SessionState, TickControls,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_campaign() -> Campaign<ChaCha8Rng> {
    Campaign::new(DeliveryConfig::default(), ChaCha8Rng::seed_from_u64(12345))
}

fn confirm(campaign: &mut Campaign<ChaCha8Rng>) {
    assert_eq!(
        campaign.handle(CampaignEvent::Confirm).unwrap(),
        CampaignFlow::Continue
    );
}

/// Tick with no input until the delivery leaves its current state.
fn idle_until(campaign: &mut Campaign<ChaCha8Rng>, target: SessionState) {
    for _ in 0..5_000 {
        if campaign.tick(&TickControls::default()) == Some(target) {
            return;
        }
    }
    panic!("never reached {:?}", target);
}

// ============================================================================
// Screen flow
// ============================================================================

#[test]
fn test_title_to_descent() {
    let mut campaign = create_campaign();
    assert!(matches!(campaign.screen(), CampaignScreen::Title));

    confirm(&mut campaign);
    assert_eq!(campaign.session().unwrap().state(), SessionState::Orbit);

    // Orbit is frozen until the drop is confirmed
    let y = campaign.session().unwrap().ship().y;
    campaign.tick(&TickControls::default());
    assert_eq!(campaign.session().unwrap().ship().y, y);

    confirm(&mut campaign);
    assert_eq!(campaign.session().unwrap().state(), SessionState::Descent);
    campaign.tick(&TickControls::default());
    assert!(campaign.session().unwrap().ship().y > y);
}

#[test]
fn test_cancel_abandons_delivery_then_quits() {
    let mut campaign = create_campaign();
    confirm(&mut campaign);
    confirm(&mut campaign);

    assert_eq!(
        campaign.handle(CampaignEvent::Cancel).unwrap(),
        CampaignFlow::Continue
    );
    assert!(campaign.session().is_none());
    assert_eq!(campaign.difficulty(), 1);
    assert_eq!(
        campaign.handle(CampaignEvent::Cancel).unwrap(),
        CampaignFlow::Quit
    );
}

// ============================================================================
// Difficulty counter
// ============================================================================

#[test]
fn test_rated_delivery_advances_difficulty() {
    let mut campaign = create_campaign();
    confirm(&mut campaign);
    confirm(&mut campaign);

    // Level 1 starts over the pad: an unpowered drop crashes onto it
    idle_until(&mut campaign, SessionState::Rating);
    let session = campaign.session().unwrap();
    assert!(session.package().is_finalized());
    assert_eq!(session.package().rating(), 1);

    confirm(&mut campaign);
    assert_eq!(campaign.difficulty(), 2);
    let session = campaign.session().unwrap();
    assert_eq!(session.difficulty(), 2);
    assert_eq!(session.state(), SessionState::Orbit);

    let stats = campaign.stats();
    assert_eq!(stats.deliveries, 1);
    assert_eq!(stats.safe_landings, 0);
    assert_eq!(stats.best_level, 1);
}

#[test]
fn test_confirm_skips_touchdown_hold() {
    let mut campaign = create_campaign();
    confirm(&mut campaign);
    confirm(&mut campaign);

    idle_until(&mut campaign, SessionState::Crashed);
    assert!(campaign.session().unwrap().settle_ticks_left() > 0);
    confirm(&mut campaign);
    assert_eq!(campaign.session().unwrap().state(), SessionState::Rating);
}

#[test]
fn test_game_over_restarts_at_level_one() {
    let mut campaign = create_campaign();
    confirm(&mut campaign);

    // Clear two deliveries to reach level 3
    for _ in 0..2 {
        confirm(&mut campaign);
        idle_until(&mut campaign, SessionState::Rating);
        confirm(&mut campaign);
    }
    assert_eq!(campaign.difficulty(), 3);

    confirm(&mut campaign);
    let session = campaign.session_mut().unwrap();
    let pad_center = session.level().pad().center_x();
    let ship = session.ship_mut();
    ship.set_fuel(0.0);
    ship.x = pad_center;
    ship.vx = 0.0;
    ship.y = 200.0;
    ship.vy = 6.0;
    assert_eq!(
        campaign.tick(&TickControls::default()),
        Some(SessionState::GameOver)
    );

    confirm(&mut campaign);
    assert_eq!(campaign.difficulty(), 1);
    assert_eq!(campaign.session().unwrap().difficulty(), 1);
    assert_eq!(campaign.stats().deliveries, 3);
    assert_eq!(campaign.stats().best_level, 3);
}
