//! Review text written by the package about its delivery.

use super::package::PackageKind;
use rand::seq::SliceRandom;
use rand::Rng;

/// Praise for smooth fragile deliveries.
pub const POSITIVE_ADJECTIVES: [&str; 8] = [
    "Immaculate",
    "Butter-smooth",
    "Professional",
    "Delightful",
    "Exceptional",
    "Flawless",
    "Superb",
    "Outstanding",
];

/// What a shaken package felt.
pub const NEGATIVE_SENSATIONS: [&str; 6] = [
    "several concerning jolts",
    "like a tumble dryer",
    "my life flash before my sensors",
    "existential dread",
    "every molecule rearranging",
    "what I can only describe as violence",
];

pub const NEUTRAL_CLOSINGS: [&str; 5] = [
    "Could be worse.",
    "I've had rougher.",
    "Acceptable, I suppose.",
    "Room for improvement.",
    "It is what it is.",
];

pub const COMPLAINTS: [&str; 6] = [
    "This is fine.",
    "I contained antiques.",
    "Do you even have a license?",
    "My warranty is void now.",
    "I'll be filing a report.",
    "Was that turbulence or malice?",
];

pub const URGENT_PRAISE: [&str; 4] = [
    "Lightning fast!",
    "Now THAT'S what I call service!",
    "Speed demon! I love it!",
    "Barely had time to get nervous!",
];

pub const URGENT_COMPLAINTS: [&str; 4] = [
    "I could have walked faster.",
    "Did we stop for coffee?",
    "My expiration date is concerning now.",
    "The suspense was NOT appreciated.",
];

/// Review for an unrated kind that still arrived.
pub const NO_COMMENT_REVIEW: &str = "Delivery completed. No comment.";

/// The facts a review is written from.
#[derive(Debug, Clone, Copy)]
pub struct ReviewInput {
    pub kind: PackageKind,
    pub crashed: bool,
    pub rating: u8,
    pub delivery_time: f64,
}

fn pick<R: Rng>(bank: &[&'static str], rng: &mut R) -> &'static str {
    bank.choose(rng).copied().unwrap_or_default()
}

/// Write a review. Template choice and word choice both come from `rng`.
pub fn compose<R: Rng>(input: &ReviewInput, rng: &mut R) -> String {
    if input.crashed {
        return crash_review(rng);
    }
    match input.kind {
        PackageKind::Fragile => fragile_review(input.rating, rng),
        PackageKind::Urgent => urgent_review(input.rating, input.delivery_time, rng),
        PackageKind::Mystery => NO_COMMENT_REVIEW.to_string(),
    }
}

fn crash_review<R: Rng>(rng: &mut R) -> String {
    let complaint = pick(&COMPLAINTS, rng);
    match rng.gen_range(0..5) {
        0 => format!("I am now in {} pieces. {}", rng.gen_range(3..=47), complaint),
        1 => format!("Well, that happened. {}", complaint),
        2 => format!("*sounds of settling debris* {}", complaint),
        3 => format!("I regret choosing this carrier. {}", complaint),
        _ => format!("My contents are now modern art. {}", complaint),
    }
}

fn fragile_review<R: Rng>(rating: u8, rng: &mut R) -> String {
    match rating {
        5 => format!(
            "Pristine delivery! {} handling throughout. Would ship again!",
            pick(&POSITIVE_ADJECTIVES, rng)
        ),
        4 => format!(
            "{} work overall. Minor bumps, but I'm intact. Recommended.",
            pick(&POSITIVE_ADJECTIVES, rng)
        ),
        3 => format!(
            "Arrived intact, but felt {} during descent. {}",
            pick(&NEGATIVE_SENSATIONS, rng),
            pick(&NEUTRAL_CLOSINGS, rng)
        ),
        2 => format!(
            "Experienced {}. Some internal damage likely. {}",
            pick(&NEGATIVE_SENSATIONS, rng),
            pick(&COMPLAINTS, rng)
        ),
        _ => format!(
            "I survived, barely. Felt like {}. {}",
            pick(&NEGATIVE_SENSATIONS, rng),
            pick(&COMPLAINTS, rng)
        ),
    }
}

fn urgent_review<R: Rng>(rating: u8, delivery_time: f64, rng: &mut R) -> String {
    let time = format!("{:.1}s", delivery_time);
    match rating {
        5 => format!(
            "{} Delivered in {}. Exceptional speed!",
            pick(&URGENT_PRAISE, rng),
            time
        ),
        4 => format!("Good hustle! {} delivery time. I approve.", time),
        3 => format!(
            "Adequate timing at {}. I've seen faster, but acceptable.",
            time
        ),
        2 => format!("{}? {}", time, pick(&URGENT_COMPLAINTS, rng)),
        _ => format!("{} to deliver?! {}", time, pick(&URGENT_COMPLAINTS, rng)),
    }
}
