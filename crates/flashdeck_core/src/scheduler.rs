//! SM-2 review scheduling.
//!
//! Grades follow SuperMemo 2:
//! - 0: complete blackout
//! - 1: incorrect, remembered on seeing the answer
//! - 2: incorrect, answer seemed easy
//! - 3: correct with serious difficulty
//! - 4: correct after hesitation
//! - 5: perfect recall
//!
//! Ease is kept in thousandths so cards stay exactly comparable after a
//! serialization round-trip.

use crate::model::card::{Card, CardStatus, MIN_EASE_PERMILLE};

/// Highest accepted grade.
pub const MAX_GRADE: u8 = 5;
/// Lowest grade that counts as a successful recall.
pub const PASSING_GRADE: u8 = 3;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const FAILED_EASE_PENALTY_PERMILLE: i64 = 200;

/// New schedule for one card after a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub interval_days: u32,
    pub ease_permille: u32,
    pub due_at: i64,
    pub review_count: u32,
    pub lapses: u32,
    pub status: CardStatus,
}

impl ReviewOutcome {
    /// Writes this schedule into `card`.
    pub fn apply_to(&self, card: &mut Card) {
        card.interval_days = self.interval_days;
        card.ease_permille = self.ease_permille;
        card.due_at = self.due_at;
        card.review_count = self.review_count;
        card.lapses = self.lapses;
        card.status = self.status;
    }
}

/// Computes the next schedule for `card` graded `grade` at `now_ms`.
///
/// `grade` is clamped to `MAX_GRADE`; callers that need to reject
/// out-of-range input check it before calling.
pub fn schedule_review(card: &Card, grade: u8, now_ms: i64) -> ReviewOutcome {
    let grade = grade.min(MAX_GRADE);
    let ease = i64::from(card.ease_permille);
    let min_ease = i64::from(MIN_EASE_PERMILLE);
    let max_ease = i64::from(u32::MAX);

    let (interval_days, ease, review_count, lapses, status) = if grade >= PASSING_GRADE {
        let (interval, status) = match card.review_count {
            0 => (1, CardStatus::Learning),
            1 => (6, CardStatus::Review),
            _ => (scaled_interval(card.interval_days, ease), CardStatus::Review),
        };
        // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), in thousandths.
        let miss = i64::from(MAX_GRADE - grade);
        let delta = 100 - miss * (80 + miss * 20);
        (
            interval,
            (ease + delta).clamp(min_ease, max_ease),
            card.review_count.saturating_add(1),
            card.lapses,
            status,
        )
    } else {
        let (lapses, status) = match card.status {
            CardStatus::Review | CardStatus::Relearning => {
                (card.lapses.saturating_add(1), CardStatus::Relearning)
            }
            CardStatus::New | CardStatus::Learning => (card.lapses, CardStatus::Learning),
        };
        (
            1,
            (ease - FAILED_EASE_PENALTY_PERMILLE).clamp(min_ease, max_ease),
            0,
            lapses,
            status,
        )
    };

    ReviewOutcome {
        interval_days,
        ease_permille: u32::try_from(ease).unwrap_or(u32::MAX),
        due_at: now_ms.saturating_add(i64::from(interval_days).saturating_mul(DAY_MS)),
        review_count,
        lapses,
        status,
    }
}

/// `interval × ease` rounded to whole days, saturating at `u32::MAX`.
fn scaled_interval(interval_days: u32, ease_permille: i64) -> u32 {
    let scaled = i64::from(interval_days)
        .saturating_mul(ease_permille)
        .saturating_add(500)
        / 1000;
    u32::try_from(scaled.max(1)).unwrap_or(u32::MAX)
}

/// Formats an interval in days as a short label (`1d`, `2w`, `3mo`, `1y`).
pub fn format_interval(days: u32) -> String {
    match days {
        0 => "now".to_string(),
        1..=6 => format!("{days}d"),
        7..=29 => format!("{}w", days / 7),
        30..=364 => format!("{}mo", days / 30),
        _ => format!("{}y", days / 365),
    }
}
