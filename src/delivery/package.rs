//! Packages: what is being delivered, how it was treated, and what it
//! thinks of the ride.

use super::reviews::{self, ReviewInput};
use crate::core::config::DeliveryConfig;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Package type. Decides which metric the delivery is rated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageKind {
    /// Rated on accumulated delta-v.
    Fragile,
    /// Rated on delivery time.
    Urgent,
    /// Any unrecognised type. Always rated 3 unless crashed.
    Mystery,
}

impl PackageKind {
    /// Kinds handed out for regular deliveries.
    pub const DELIVERABLE: [PackageKind; 2] = [PackageKind::Fragile, PackageKind::Urgent];

    /// Parse a type name, case-insensitively. Unknown names become `Mystery`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "fragile" => Self::Fragile,
            "urgent" => Self::Urgent,
            _ => Self::Mystery,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fragile => "fragile",
            Self::Urgent => "urgent",
            Self::Mystery => "mystery",
        }
    }

    /// Contents a package of this kind may hold.
    pub fn contents(&self) -> &'static [&'static str] {
        match self {
            Self::Fragile => &[
                "Delicate Vase",
                "Antique Clock",
                "Crystal Set",
                "Grandma's Ashes",
                "Prototype Sensor",
                "Fine China",
            ],
            Self::Urgent => &[
                "Vital Organs",
                "Pizza (HOT)",
                "Classified Intel",
                "Unstable Isotope",
                "Birthday Cake",
                "Live Specimen",
            ],
            Self::Mystery => &["Mystery Box"],
        }
    }
}

/// Four ascending cutoffs per metric. A value below the first earns 5
/// stars, below the second 4, and so on; anything else earns 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingThresholds {
    pub fragile: [f64; 4],
    pub urgent: [f64; 4],
}

impl RatingThresholds {
    pub fn from_config(config: &DeliveryConfig) -> Self {
        Self {
            fragile: config.fragile_thresholds,
            urgent: config.urgent_thresholds,
        }
    }
}

impl Default for RatingThresholds {
    fn default() -> Self {
        Self::from_config(&DeliveryConfig::default())
    }
}

/// Star tier for `value` against ascending cutoffs. A value exactly at a
/// cutoff falls into the lower tier.
pub fn star_tier(value: f64, cutoffs: &[f64; 4]) -> u8 {
    cutoffs
        .iter()
        .position(|&cutoff| value < cutoff)
        .map(|i| 5 - i as u8)
        .unwrap_or(1)
}

/// One package for one delivery attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    kind: PackageKind,
    name: String,
    total_delta_v: f64,
    delivery_time: f64,
    crashed: bool,
    thresholds: RatingThresholds,
    rating: Option<u8>,
    review: Option<String>,
}

impl Package {
    pub fn new(kind: PackageKind, name: impl Into<String>, thresholds: RatingThresholds) -> Self {
        Self {
            kind,
            name: name.into(),
            total_delta_v: 0.0,
            delivery_time: 0.0,
            crashed: false,
            thresholds,
            rating: None,
            review: None,
        }
    }

    /// A package of `kind` with randomly chosen contents.
    pub fn of_kind<R: Rng>(kind: PackageKind, config: &DeliveryConfig, rng: &mut R) -> Self {
        let name = kind
            .contents()
            .choose(rng)
            .copied()
            .unwrap_or("Mystery Box");
        Self::new(kind, name, RatingThresholds::from_config(config))
    }

    /// A fragile or urgent package, chosen at random.
    pub fn random<R: Rng>(config: &DeliveryConfig, rng: &mut R) -> Self {
        let kind = PackageKind::DELIVERABLE
            .choose(rng)
            .copied()
            .unwrap_or(PackageKind::Fragile);
        Self::of_kind(kind, config, rng)
    }

    pub fn kind(&self) -> PackageKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_delta_v(&self) -> f64 {
        self.total_delta_v
    }

    pub fn delivery_time(&self) -> f64 {
        self.delivery_time
    }

    pub fn crashed(&self) -> bool {
        self.crashed
    }

    /// Record delta-v experienced this tick. Only positive, finite amounts
    /// count, so the total never decreases.
    pub fn add_delta_v(&mut self, delta_v: f64) {
        if delta_v.is_finite() && delta_v > 0.0 {
            self.total_delta_v += delta_v;
        }
    }

    /// Add elapsed delivery time in seconds.
    pub fn add_time(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds > 0.0 {
            self.delivery_time += seconds;
        }
    }

    /// The delivery ended in a crash. Cannot be undone.
    pub fn mark_crashed(&mut self) {
        self.crashed = true;
    }

    /// Star rating from the current metrics, 1 (worst) to 5 (best).
    pub fn calculate_rating(&self) -> u8 {
        if self.crashed {
            return 1;
        }
        match self.kind {
            PackageKind::Fragile => star_tier(self.total_delta_v, &self.thresholds.fragile),
            PackageKind::Urgent => star_tier(self.delivery_time, &self.thresholds.urgent),
            PackageKind::Mystery => 3,
        }
    }

    /// The final rating once finalized, otherwise the live one.
    pub fn rating(&self) -> u8 {
        self.rating.unwrap_or_else(|| self.calculate_rating())
    }

    pub fn is_finalized(&self) -> bool {
        self.rating.is_some()
    }

    /// Lock in the rating and review. Later calls return the stored values.
    pub fn finalize<R: Rng>(&mut self, rng: &mut R) -> u8 {
        let rating = self.lock_rating();
        self.generate_review(rng);
        log::debug!(
            "Package '{}' ({}) rated {} stars: delta-v {:.2}, time {:.2}s, crashed={}",
            self.name,
            self.kind.name(),
            rating,
            self.total_delta_v,
            self.delivery_time,
            self.crashed
        );
        rating
    }

    /// Store the rating from the current metrics unless one is stored.
    fn lock_rating(&mut self) -> u8 {
        match self.rating {
            Some(rating) => rating,
            None => {
                let rating = self.calculate_rating();
                self.rating = Some(rating);
                rating
            }
        }
    }

    /// The package's review. Written on the first call, then returned
    /// verbatim for the life of this package. Writing it locks the rating
    /// the review describes.
    pub fn generate_review<R: Rng>(&mut self, rng: &mut R) -> &str {
        if self.review.is_none() {
            let input = ReviewInput {
                kind: self.kind,
                crashed: self.crashed,
                rating: self.lock_rating(),
                delivery_time: self.delivery_time,
            };
            self.review = Some(reviews::compose(&input, rng));
        }
        self.review.as_deref().unwrap_or(reviews::NO_COMMENT_REVIEW)
    }

    /// The review, if one has been written.
    pub fn review(&self) -> Option<&str> {
        self.review.as_deref()
    }

    /// Two-line HUD description.
    pub fn description(&self) -> String {
        match self.kind {
            PackageKind::Fragile => format!("FRAGILE: {}\nHandle with care!", self.name),
            PackageKind::Urgent => format!("URGENT: {}\nTime is critical!", self.name),
            PackageKind::Mystery => format!("MYSTERY: {}\nContents unknown.", self.name),
        }
    }

    /// Rating as `*` for earned stars and `.` for missing ones.
    pub fn stars(&self) -> String {
        let rating = self.rating() as usize;
        format!("{}{}", "*".repeat(rating), ".".repeat(5 - rating))
    }
}
