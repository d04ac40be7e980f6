//! Procedural terrain: layered sine waves around a guaranteed flat landing
//! zone, with smoothstep transitions into the zone.

use super::difficulty;
use crate::core::config::DeliveryConfig;
use crate::core::constants::TERRAIN_WAVES;
use crate::core::error::{DeliveryError, DeliveryResult};
use rand::Rng;

/// Height surface for one level. Heights are screen-space y values, so a
/// smaller height is a taller hill.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainProfile {
    /// (x, height) samples, strictly increasing in x, spanning `[0, width]`.
    points: Vec<(f64, f64)>,
    baseline: f64,
    width: f64,
    variation: f64,
    flat_zone: Option<(f64, f64)>,
}

/// Cubic smoothstep on `[0, 1]`.
fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

impl TerrainProfile {
    /// Generate terrain for `difficulty`, flat at `baseline` across
    /// `flat_zone` (inclusive bounds) when one is given.
    pub fn generate<R: Rng>(
        config: &DeliveryConfig,
        difficulty: u32,
        baseline: f64,
        flat_zone: Option<(f64, f64)>,
        rng: &mut R,
    ) -> DeliveryResult<Self> {
        if difficulty == 0 {
            return Err(DeliveryError::InvalidDifficulty { level: difficulty });
        }
        if config.terrain_segments == 0 {
            return Err(DeliveryError::InvalidParameter {
                name: "terrain_segments",
                value: 0.0,
                expected: "[1, ∞)",
            });
        }
        if !baseline.is_finite() {
            return Err(DeliveryError::InvalidParameter {
                name: "baseline",
                value: baseline,
                expected: "a finite y coordinate",
            });
        }
        if let Some((left, right)) = flat_zone {
            if !left.is_finite() || !right.is_finite() || right < left {
                return Err(DeliveryError::InvalidParameter {
                    name: "flat_zone",
                    value: right - left,
                    expected: "finite bounds with left <= right",
                });
            }
        }

        let width = config.screen_width;
        let variation = difficulty::terrain_variation(config, difficulty);

        let mut xs: Vec<f64> = (0..=config.terrain_segments)
            .map(|i| i as f64 * width / config.terrain_segments as f64)
            .collect();
        // Zone edges become samples too, so interpolation never reaches
        // outside the zone for a query inside it.
        if let Some((left, right)) = flat_zone {
            xs.extend([left, right].into_iter().filter(|&b| b > 0.0 && b < width));
        }
        xs.sort_by(|a, b| a.total_cmp(b));
        xs.dedup();

        let in_zone = |x: f64| flat_zone.is_some_and(|(left, right)| left <= x && x <= right);

        let mut points: Vec<(f64, f64)> = xs
            .into_iter()
            .map(|x| {
                if in_zone(x) {
                    return (x, baseline);
                }
                let offset: f64 = TERRAIN_WAVES
                    .iter()
                    .map(|&(frequency, share, jitter)| {
                        let phase = rng.gen::<f64>() * jitter;
                        (x * frequency + phase).sin() * variation * share
                    })
                    .sum();
                (x, baseline - offset)
            })
            .collect();

        if let Some((left, right)) = flat_zone {
            let band = config.terrain_transition_width;
            for (x, y) in points.iter_mut() {
                if left - band < *x && *x < left {
                    let s = smoothstep((*x - (left - band)) / band);
                    *y = *y * (1.0 - s) + baseline * s;
                } else if right < *x && *x < right + band {
                    let s = smoothstep((*x - right) / band);
                    *y = baseline * (1.0 - s) + *y * s;
                }
            }
        }

        log::debug!(
            "Generated terrain: difficulty={} variation={:.1} samples={} flat_zone={:?}",
            difficulty,
            variation,
            points.len(),
            flat_zone
        );

        Ok(Self {
            points,
            baseline,
            width,
            variation,
            flat_zone,
        })
    }

    /// Terrain surface y at `x`, linearly interpolated between samples.
    ///
    /// `x` is clamped to the screen. A query with no bracketing pair (the
    /// last sample itself, or NaN) falls back to the baseline.
    pub fn height_at(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, self.width);
        let idx = self.points.partition_point(|&(px, _)| px <= x);
        if idx == 0 || idx >= self.points.len() {
            return self.baseline;
        }

        let (x1, y1) = self.points[idx - 1];
        let (x2, y2) = self.points[idx];
        if x2 <= x1 {
            return y1;
        }
        let t = (x - x1) / (x2 - x1);
        y1 + t * (y2 - y1)
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Ground line the flat zone sits at.
    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Roughness magnitude this terrain was generated with.
    pub fn variation(&self) -> f64 {
        self.variation
    }

    pub fn flat_zone(&self) -> Option<(f64, f64)> {
        self.flat_zone
    }

    pub fn width(&self) -> f64 {
        self.width
    }
}
