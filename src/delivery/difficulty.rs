//! Difficulty progression: how the level counter shapes terrain, pad and
//! starting position.
//!
//! Every curve saturates so that high levels stay playable. Level 0 is
//! treated like level 1; [`crate::delivery::level::Level::new`] rejects it
//! before these are ever consulted.

use crate::core::config::DeliveryConfig;
use rand::Rng;

fn levels_past_first(level: u32) -> f64 {
    level.saturating_sub(1) as f64
}

/// Terrain roughness magnitude for a level, capped.
pub fn terrain_variation(config: &DeliveryConfig, level: u32) -> f64 {
    let growth = levels_past_first(level) * config.terrain_variation_per_level;
    (config.terrain_variation_base + growth).min(config.terrain_variation_cap)
}

/// Landing pad width for a level: shrinks by a fixed amount per level, with
/// a cap on the total reduction and a hard floor.
pub fn pad_width(config: &DeliveryConfig, level: u32) -> f64 {
    let reduction = (levels_past_first(level) * config.pad_width_reduction_per_level)
        .min(config.pad_max_width_reduction);
    (config.pad_base_width - reduction).max(config.pad_min_width)
}

/// Horizontal offset of the ship's start from the pad center.
///
/// Level 1 starts directly above the pad. Later levels start further out,
/// left or right at random, flipped toward the screen center when the
/// proposed start would sit within `start_edge_margin` of an edge.
pub fn lateral_offset<R: Rng>(
    config: &DeliveryConfig,
    level: u32,
    pad_center_x: f64,
    rng: &mut R,
) -> f64 {
    if level <= 1 {
        return 0.0;
    }

    let magnitude =
        (levels_past_first(level) * config.lateral_offset_per_level).min(config.max_lateral_offset);

    let mut direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    let proposed_x = pad_center_x + magnitude * direction;
    if proposed_x < config.start_edge_margin {
        direction = 1.0;
    } else if proposed_x > config.screen_width - config.start_edge_margin {
        direction = -1.0;
    }

    magnitude * direction
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_terrain_variation_grows_then_saturates() {
        let config = DeliveryConfig::default();
        assert!((terrain_variation(&config, 1) - 20.0).abs() < f64::EPSILON);
        assert!((terrain_variation(&config, 2) - 30.0).abs() < f64::EPSILON);
        assert!((terrain_variation(&config, 11) - 120.0).abs() < f64::EPSILON);
        assert!((terrain_variation(&config, 500) - 120.0).abs() < f64::EPSILON);
        assert!((terrain_variation(&config, u32::MAX) - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pad_width_non_increasing_with_floor() {
        let config = DeliveryConfig::default();
        let mut previous = f64::INFINITY;
        for level in 1..=100 {
            let width = pad_width(&config, level);
            assert!(width <= previous, "level {} widened the pad", level);
            assert!(width >= config.pad_min_width);
            previous = width;
        }
        assert!((pad_width(&config, 1) - 100.0).abs() < f64::EPSILON);
        assert!((pad_width(&config, 3) - 90.0).abs() < f64::EPSILON);
        assert!((pad_width(&config, 100) - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pad_width_floor_applies_when_reduction_is_large() {
        let config = DeliveryConfig {
            pad_max_width_reduction: 90.0,
            ..Default::default()
        };
        assert!((pad_width(&config, 50) - config.pad_min_width).abs() < f64::EPSILON);
    }

    #[test]
    fn test_first_level_has_no_offset() {
        let config = DeliveryConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(lateral_offset(&config, 1, 400.0, &mut rng), 0.0);
        }
    }

    #[test]
    fn test_offset_magnitude_bounded() {
        let config = DeliveryConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for level in 2..60 {
            let offset = lateral_offset(&config, level, 400.0, &mut rng);
            let expected = ((level - 1) as f64 * 40.0).min(200.0);
            assert!((offset.abs() - expected).abs() < f64::EPSILON);
            assert!(offset.abs() <= config.max_lateral_offset);
        }
    }

    #[test]
    fn test_offset_forced_toward_center_near_edges() {
        let config = DeliveryConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..50 {
            // Pad near the left edge: going left would leave the screen
            let offset = lateral_offset(&config, 6, 130.0, &mut rng);
            assert!(offset > 0.0, "offset {} should point right", offset);

            // Pad near the right edge
            let offset = lateral_offset(&config, 6, 670.0, &mut rng);
            assert!(offset < 0.0, "offset {} should point left", offset);
        }
    }

    #[test]
    fn test_offset_uses_both_directions_mid_screen() {
        let config = DeliveryConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let offsets: Vec<f64> = (0..64)
            .map(|_| lateral_offset(&config, 2, 400.0, &mut rng))
            .collect();
        assert!(offsets.iter().any(|&o| o > 0.0));
        assert!(offsets.iter().any(|&o| o < 0.0));
    }
}
