// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Half-open intervals between two instants.
//!
//! The clock keeps two kinds of windows: the recalibration window of the
//! mechanical reference (`[start of quarter, start of next quarter)`) and the
//! sunset pair that brackets Bohemian hours. Both are [`Interval`]s.

use super::instant::{Time, TimeInstant, TimeScale};
use chrono::{DateTime, Utc};
use qtty::Days;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An interval `[start, end)` between two instants.
///
/// ```
/// use orloj::time::{Interval, JulianDay};
/// use qtty::Days;
///
/// let period = Interval::new(JulianDay::new(2_451_545.0), JulianDay::new(2_451_546.5));
/// assert_eq!(period.duration(), Days::new(1.5));
/// assert!(period.contains(&JulianDay::new(2_451_545.0)));
/// assert!(!period.contains(&JulianDay::new(2_451_546.5)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval<T: TimeInstant> {
    pub start: T,
    pub end: T,
}

/// Interval on a time scale.
pub type Period<S> = Interval<Time<S>>;

/// Interval between two UTC instants.
pub type UtcPeriod = Interval<DateTime<Utc>>;

impl<T: TimeInstant> Interval<T> {
    pub fn new(start: T, end: T) -> Self {
        Interval { start, end }
    }

    /// `end - start`.
    pub fn duration(&self) -> T::Duration {
        self.end.difference(&self.start)
    }

    /// Whether `instant` lies in `[start, end)`.
    ///
    /// An instant exactly on `end` belongs to the following interval.
    #[inline]
    pub fn contains(&self, instant: &T) -> bool {
        *instant >= self.start && *instant < self.end
    }

    /// The overlapping sub-interval, or `None` when the intervals only touch
    /// or are disjoint.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = if self.start >= other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end <= other.end {
            self.end
        } else {
            other.end
        };

        if start < end {
            Some(Self::new(start, end))
        } else {
            None
        }
    }
}

impl<S: TimeScale> Interval<Time<S>> {
    /// Length of the interval in days.
    #[inline]
    pub fn duration_days(&self) -> Days {
        self.duration()
    }
}

impl Interval<DateTime<Utc>> {
    /// Length of the interval in (fractional) days.
    pub fn duration_days(&self) -> f64 {
        self.duration().num_milliseconds() as f64 / 86_400_000.0
    }
}

impl<T: TimeInstant + fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
