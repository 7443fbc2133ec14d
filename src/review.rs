//! SM-2 review scheduling.
//!
//! After each review the learner grades recall from 0 (blackout) to 5
//! (perfect). The grade moves the card's ease factor and picks the next
//! interval:
//!
//! ```text
//! grade < 3        repetitions = 0, interval = 1 day
//! repetition 1     interval = 1 day
//! repetition 2     interval = 6 days
//! repetition n>2   interval = round(previous interval * ease)
//!
//! ease' = ease + 0.1 - (5 - q) * (0.08 + (5 - q) * 0.02), floored at 1.3
//! ```

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Ease factor of a card that was never reviewed.
pub const INITIAL_EASE: f64 = 2.5;

/// Ease never drops below this.
pub const MIN_EASE: f64 = 1.3;

/// Lowest grade that counts as recalled.
pub const PASSING_GRADE: u8 = 3;

/// Scheduling state of one card.
///
/// ```rust
/// use microcards::ReviewState;
///
/// let state = ReviewState::default().review(5).unwrap().review(5).unwrap();
/// assert_eq!(state.interval_days, 6);
/// assert_eq!(state.repetitions, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    /// Multiplier applied to the interval after the second repetition.
    pub ease_factor: f64,
    /// Days until the next review.
    pub interval_days: u32,
    /// Consecutive successful reviews.
    pub repetitions: u32,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            ease_factor: INITIAL_EASE,
            interval_days: 0,
            repetitions: 0,
        }
    }
}

impl ReviewState {
    /// The state after a review graded `quality`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGrade`] when `quality > 5`.
    pub fn review(&self, quality: u8) -> Result<Self> {
        if quality > 5 {
            return Err(Error::InvalidGrade(quality));
        }

        let lapse = f64::from(5 - quality);
        let ease_factor = (self.ease_factor + 0.1 - lapse * (0.08 + lapse * 0.02)).max(MIN_EASE);

        if quality < PASSING_GRADE {
            return Ok(Self {
                ease_factor,
                interval_days: 1,
                repetitions: 0,
            });
        }

        let repetitions = self.repetitions + 1;
        let interval_days = match repetitions {
            1 => 1,
            2 => 6,
            _ => (f64::from(self.interval_days) * self.ease_factor).round() as u32,
        };

        Ok(Self {
            ease_factor,
            interval_days,
            repetitions,
        })
    }
}
