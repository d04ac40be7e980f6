//! Level generation integration tests
//!
//! Checks the terrain and pad guarantees across many seeds and levels:
//! the flat zone under the pad, the roughness cap, pad sizing and the
//! lateral start offset.

use orbital_delivery::core::config::DeliveryConfig;
use orbital_delivery::delivery::{difficulty, Level};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const LEVELS: [u32; 6] = [1, 2, 5, 10, 20, 100];

fn levels_for(seed: u64) -> Vec<Level> {
    let config = DeliveryConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    LEVELS
        .iter()
        .map(|&level| Level::new(&config, level, &mut rng).unwrap())
        .collect()
}

// ============================================================================
// Flat zone
// ============================================================================

#[test]
fn test_flat_zone_is_exactly_level_at_every_difficulty() {
    for seed in 0..20 {
        for level in levels_for(seed) {
            let pad = level.pad();
            let (left, right) = pad.flat_zone();
            let steps = 40;
            for i in 0..=steps {
                let x = left + (right - left) * i as f64 / steps as f64;
                let x = x.clamp(0.0, level.terrain().width());
                assert_eq!(
                    level.terrain_height(x),
                    pad.ground_line(),
                    "seed {} level {} x {}",
                    seed,
                    level.difficulty(),
                    x
                );
            }
        }
    }
}

#[test]
fn test_ground_sits_under_the_pad_top() {
    for level in levels_for(3) {
        let pad = level.pad();
        assert!(pad.ground_line() > pad.y());
        assert_eq!(level.terrain().baseline(), pad.ground_line());
    }
}

// ============================================================================
// Roughness
// ============================================================================

#[test]
fn test_terrain_stays_within_variation_bound() {
    let config = DeliveryConfig::default();
    for seed in 0..20 {
        for level in levels_for(seed) {
            let terrain = level.terrain();
            assert!(terrain.variation() <= config.terrain_variation_cap);
            for &(_, y) in terrain.points() {
                assert!(
                    (y - terrain.baseline()).abs() <= terrain.variation() + 1e-9,
                    "level {} sample {} outside bound",
                    level.difficulty(),
                    y
                );
            }
        }
    }
}

#[test]
fn test_variation_grows_then_caps() {
    let config = DeliveryConfig::default();
    let curve: Vec<f64> = (1..=30)
        .map(|level| difficulty::terrain_variation(&config, level))
        .collect();
    assert_eq!(curve[0], config.terrain_variation_base);
    assert!(curve.windows(2).all(|w| w[1] >= w[0]));
    assert_eq!(*curve.last().unwrap(), config.terrain_variation_cap);
}

#[test]
fn test_samples_span_the_screen_in_order() {
    for level in levels_for(11) {
        let points = level.terrain().points();
        assert_eq!(points.first().unwrap().0, 0.0);
        assert_eq!(points.last().unwrap().0, level.terrain().width());
        assert!(points.windows(2).all(|w| w[0].0 < w[1].0));
    }
}

// ============================================================================
// Pad and start position
// ============================================================================

#[test]
fn test_pad_width_shrinks_to_floor() {
    let config = DeliveryConfig::default();
    let widths: Vec<f64> = (1..=30)
        .map(|level| difficulty::pad_width(&config, level))
        .collect();
    assert_eq!(widths[0], config.pad_base_width);
    assert!(widths.windows(2).all(|w| w[1] <= w[0]));
    assert!(widths.iter().all(|&w| w >= config.pad_min_width));
}

#[test]
fn test_pad_stays_inside_screen_margin() {
    let config = DeliveryConfig::default();
    for seed in 0..50 {
        for level in levels_for(seed) {
            let pad = level.pad();
            assert!(pad.x() >= config.pad_screen_margin);
            assert!(pad.right() <= config.screen_width - config.pad_screen_margin);
        }
    }
}

#[test]
fn test_start_offset_bounded_and_ship_on_screen() {
    let config = DeliveryConfig::default();
    for seed in 0..50 {
        for level in levels_for(seed) {
            let offset = level.start_offset();
            assert!(offset.abs() <= config.max_lateral_offset);
            if level.difficulty() == 1 {
                assert_eq!(offset, 0.0);
            }
            let (x, y) = level.ship_start(&config);
            assert!(x >= config.ship_edge_margin);
            assert!(x <= config.screen_width - config.ship_edge_margin);
            assert_eq!(y, config.ship_start_y);
        }
    }
}

#[test]
fn test_same_seed_same_level() {
    assert_eq!(levels_for(42), levels_for(42));
}

#[test]
fn test_level_zero_is_rejected() {
    let config = DeliveryConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    assert!(Level::new(&config, 0, &mut rng).is_err());
}
