// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Scale-tagged Julian Day instants.
//!
//! [`Time<S>`] stores a single Julian Day quantity in [`Days`]; the marker
//! `S: TimeScale` says which axis the number lives on. The clock engine only
//! needs two axes: [`UT`](super::UT), which the hands of the clock follow, and
//! [`TT`](super::TT), the dynamical time the ephemeris is evaluated in. Every
//! scale converts through JD(TT), so `Time::<UT>::to::<TT>()` applies ΔT and
//! the reverse conversion removes it.

use chrono::{DateTime, Utc};
use qtty::*;
use std::marker::PhantomData;
use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::scales::UT;

/// Julian Day of the Unix epoch, 1970-01-01T00:00:00 UT.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Milliseconds in one mean solar day.
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Julian Day of J2000.0.
pub const J2000_JD: f64 = 2_451_545.0;

// ═══════════════════════════════════════════════════════════════════════════
// TimeScale trait
// ═══════════════════════════════════════════════════════════════════════════

/// Marker trait for time scales.
///
/// A scale provides a display label and the pair of conversions between its
/// own Julian Day axis and the canonical JD(TT).
pub trait TimeScale: Copy + Clone + std::fmt::Debug + PartialEq + PartialOrd + 'static {
    /// Display label used by [`Time`] formatting.
    const LABEL: &'static str;

    /// Convert a Julian Day on this scale to JD(TT).
    fn to_jd_tt(value: Days) -> Days;

    /// Convert JD(TT) back to this scale.
    fn from_jd_tt(jd_tt: Days) -> Days;
}

// ═══════════════════════════════════════════════════════════════════════════
// Time<S>
// ═══════════════════════════════════════════════════════════════════════════

/// A Julian Day on time scale `S`.
///
/// `Copy` and layout-identical to a single `f64`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Time<S: TimeScale> {
    quantity: Days,
    _scale: PhantomData<S>,
}

impl<S: TimeScale> Time<S> {
    /// Create from a raw Julian Day number.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
            _scale: PhantomData,
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self {
            quantity: days,
            _scale: PhantomData,
        }
    }

    /// The Julian Day as a quantity.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The Julian Day as a scalar.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Convert to another time scale, routing through JD(TT).
    #[inline]
    pub fn to<T: TimeScale>(&self) -> Time<T> {
        Time::<T>::from_days(T::from_jd_tt(S::to_jd_tt(self.quantity)))
    }

    /// Julian centuries elapsed since J2000.0 on this scale.
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new((self.value() - J2000_JD) / 36_525.0)
    }

    /// Build from Unix milliseconds (UTC, treated as UT).
    pub fn from_millis(millis: i64) -> Self {
        let jd_ut = Days::new(UNIX_EPOCH_JD + millis as f64 / MILLIS_PER_DAY);
        Time::<UT>::from_days(jd_ut).to::<S>()
    }

    /// Unix milliseconds of this instant, rounded to the nearest millisecond.
    pub fn to_millis(&self) -> i64 {
        let jd_ut = self.to::<UT>().value();
        ((jd_ut - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round() as i64
    }

    /// Build from a `chrono::DateTime<Utc>`.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        Self::from_millis(datetime.timestamp_millis())
    }

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` outside chrono's representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.to_millis())
    }
}

impl Time<UT> {
    /// Calendar date (year, month, fractional day) of a UT Julian Day.
    ///
    /// Julian calendar before 1582-10-15, Gregorian after (Meeus ch. 7).
    pub fn calendar_date(&self) -> (i32, u32, f64) {
        let jd = self.value() + 0.5;
        let z = jd.floor();
        let f = jd - z;
        let a = if z < 2_299_161.0 {
            z
        } else {
            let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
            z + 1.0 + alpha - (alpha / 4.0).floor()
        };
        let b = a + 1524.0;
        let c = ((b - 122.1) / 365.25).floor();
        let d = (365.25 * c).floor();
        let e = ((b - d) / 30.6001).floor();

        let day = b - d - (30.6001 * e).floor() + f;
        let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
        let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

        (year as i32, month as u32, day)
    }

    /// Calendar year of this instant.
    #[inline]
    pub fn calendar_year(&self) -> i32 {
        self.calendar_date().0
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl<S: TimeScale> std::fmt::Display for Time<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", S::LABEL, self.quantity)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for Time<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for Time<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl<S: TimeScale> Add<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl<S: TimeScale> Sub<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl<S: TimeScale> Sub for Time<S> {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TimeInstant trait
// ═══════════════════════════════════════════════════════════════════════════

/// Points in time usable as [`Interval`](super::Interval) endpoints.
pub trait TimeInstant: Copy + Clone + PartialEq + PartialOrd + Sized {
    /// The duration type used for arithmetic.
    type Duration;

    /// Difference `self - other`.
    fn difference(&self, other: &Self) -> Self::Duration;

    /// `self + duration`.
    fn add_duration(&self, duration: Self::Duration) -> Self;
}

impl<S: TimeScale> TimeInstant for Time<S> {
    type Duration = Days;

    #[inline]
    fn difference(&self, other: &Self) -> Self::Duration {
        *self - *other
    }

    #[inline]
    fn add_duration(&self, duration: Self::Duration) -> Self {
        *self + duration
    }
}

impl TimeInstant for DateTime<Utc> {
    type Duration = chrono::Duration;

    fn difference(&self, other: &Self) -> Self::Duration {
        *self - *other
    }

    fn add_duration(&self, duration: Self::Duration) -> Self {
        *self + duration
    }
}
