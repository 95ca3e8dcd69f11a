// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Instants, time scales and local wall time.
//!
//! - [`Time<S>`] tags a Julian Day with its scale ([`UT`] or [`TT`]).
//! - [`Interval`] is a half-open window between two instants.
//! - [`ClockZone`] turns an instant into the [`WallTime`] the hands show.

mod delta_t;
mod instant;
mod period;
mod scales;
mod zone;

pub use delta_t::delta_t;
pub use instant::{Time, TimeInstant, TimeScale, J2000_JD, MILLIS_PER_DAY, UNIX_EPOCH_JD};
pub use period::{Interval, Period, UtcPeriod};
pub use scales::{TT, UT};
pub use zone::{ClockZone, WallTime};

/// Julian Day on the Universal Time axis (JDU).
pub type JulianDay = Time<UT>;

/// Julian Ephemeris Day on the Terrestrial Time axis (JDE / TDT).
pub type JulianEphemerisDay = Time<TT>;

/// An absolute instant, UTC.
pub type Instant = chrono::DateTime<chrono::Utc>;

/// `Instant` from Unix milliseconds.
pub fn instant_from_millis(millis: i64) -> crate::Result<Instant> {
    Instant::from_timestamp_millis(millis).ok_or(crate::OrlojError::UnrepresentableInstant(millis))
}
