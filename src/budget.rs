//! Word budgets for chunks.
//!
//! ## The Problem
//!
//! A flashcard holds one idea. Too few words and there is nothing to explain;
//! too many and the card turns into a page of notes.
//!
//! ```text
//! min = 50, target = 90, max = 150
//!
//!   0 ........ 50 ............ 90 ............ 150 ........
//!   |  merge   |     in range   ^ re-split aim  | must split
//! ```
//!
//! ## Three Numbers, Not Two
//!
//! - `min`: below this a chunk is merged with its successor.
//! - `target`: what a re-split aims for when a merge overshoots.
//! - `max`: the ceiling for greedy accumulation.
//!
//! A single sentence longer than `max` is never cut, so `max` is a strong
//! preference rather than a hard guarantee.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Word-count bounds for a chunk.
///
/// # Examples
///
/// ```rust
/// use microcards::WordBudget;
/// use std::cmp::Ordering;
///
/// let budget = WordBudget::new(50, 90, 150).unwrap();
/// assert_eq!(budget.fits(20), Ordering::Less);
/// assert_eq!(budget.fits(90), Ordering::Equal);
/// assert_eq!(budget.fits(200), Ordering::Greater);
///
/// // Range syntax: target is the midpoint
/// let budget = WordBudget::from(150..=300);
/// assert_eq!(budget.target(), 225);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordBudget {
    min: usize,
    target: usize,
    max: usize,
}

impl WordBudget {
    /// Create a budget.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBudget`] unless `0 < min <= target <= max`.
    pub fn new(min: usize, target: usize, max: usize) -> Result<Self> {
        let budget = Self { min, target, max };
        budget.validate()?;
        Ok(budget)
    }

    /// Check the bounds, for budgets that arrived through deserialization.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBudget`] unless `0 < min <= target <= max`.
    pub fn validate(&self) -> Result<()> {
        if self.min == 0 || self.target < self.min || self.max < self.target {
            return Err(Error::InvalidBudget {
                min: self.min,
                target: self.target,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Minimum words before a chunk stands on its own.
    #[must_use]
    pub const fn min(&self) -> usize {
        self.min
    }

    /// Words a re-split piece aims for.
    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    /// Ceiling for greedy accumulation.
    #[must_use]
    pub const fn max(&self) -> usize {
        self.max
    }

    /// Where a word count sits relative to this budget.
    ///
    /// Returns:
    /// - `Ordering::Less`: below `min`, needs merging
    /// - `Ordering::Equal`: within `min..=max`
    /// - `Ordering::Greater`: above `max`, needs splitting
    #[must_use]
    pub fn fits(&self, words: usize) -> Ordering {
        if words < self.min {
            Ordering::Less
        } else if words > self.max {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Check if adding `additional` words would exceed `max`.
    #[must_use]
    pub fn would_overflow(&self, current: usize, additional: usize) -> bool {
        current.saturating_add(additional) > self.max
    }
}

impl Default for WordBudget {
    fn default() -> Self {
        Self {
            min: 50,
            target: 90,
            max: 150,
        }
    }
}

impl From<std::ops::RangeInclusive<usize>> for WordBudget {
    fn from(range: std::ops::RangeInclusive<usize>) -> Self {
        let (min, max) = (*range.start(), *range.end());
        let max = max.max(min);
        Self {
            min,
            target: min + (max - min) / 2,
            max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget() {
        let budget = WordBudget::default();
        assert_eq!(budget.min(), 50);
        assert_eq!(budget.target(), 90);
        assert_eq!(budget.max(), 150);
        assert!(budget.validate().is_ok());
    }

    #[test]
    fn test_fits() {
        let budget = WordBudget::new(10, 15, 20).unwrap();
        assert_eq!(budget.fits(9), Ordering::Less);
        assert_eq!(budget.fits(10), Ordering::Equal);
        assert_eq!(budget.fits(20), Ordering::Equal);
        assert_eq!(budget.fits(21), Ordering::Greater);
    }

    #[test]
    fn test_range_inclusive_conversion() {
        let budget = WordBudget::from(50..=150);
        assert_eq!(budget.min(), 50);
        assert_eq!(budget.target(), 100);
        assert_eq!(budget.max(), 150);
    }

    #[test]
    fn test_would_overflow() {
        let budget = WordBudget::new(10, 50, 100).unwrap();
        assert!(!budget.would_overflow(50, 50));
        assert!(budget.would_overflow(50, 51));
        assert!(!budget.would_overflow(0, 0));
    }

    #[test]
    fn test_rejects_inconsistent_bounds() {
        assert!(WordBudget::new(0, 10, 20).is_err());
        assert!(WordBudget::new(30, 10, 20).is_err());
        assert!(WordBudget::new(10, 30, 20).is_err());
        assert!(WordBudget::new(10, 10, 10).is_ok());
    }
}
