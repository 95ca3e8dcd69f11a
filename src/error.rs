// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

/// Errors surfaced by the clock engine.
///
/// Numerical edge cases (no circle intersection, polar day) are not errors;
/// they come back as `None` or empty geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrlojError {
    #[error("year {year} is outside the supported range 1400-2399")]
    OutOfRange { year: i32 },

    #[error("unknown time zone: {0}")]
    UnknownZone(String),

    #[error("invalid location: latitude {latitude}, longitude {longitude}")]
    InvalidLocation { latitude: f64, longitude: f64 },

    #[error("instant {0} ms is not representable")]
    UnrepresentableInstant(i64),
}

pub type Result<T> = std::result::Result<T, OrlojError>;

/// First and last calendar years the event searches accept.
pub const MIN_YEAR: i32 = 1400;
pub const MAX_YEAR: i32 = 2399;

/// `Ok(())` when `year` is inside the supported range.
pub(crate) fn check_year(year: i32) -> Result<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(OrlojError::OutOfRange { year })
    }
}
