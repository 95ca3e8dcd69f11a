// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Ecliptic positions of the bodies shown on the clock.
//!
//! The engine only asks one question of an ephemeris: where, in apparent
//! ecliptic longitude and latitude of date, is a body at a given JDE. That
//! question is the [`Ephemeris`] trait; [`LowPrecisionEphemeris`] answers it
//! with closed-form series good to a few hundredths of a degree, far finer
//! than the width of a hand on the dial.
//!
//! | Body | Model | Typical error |
//! |------|-------|---------------|
//! | Sun | Meeus ch. 25, low accuracy | 0.01° |
//! | Moon | Meeus ch. 47, principal terms | 0.01° |
//! | Planets | JPL approximate Keplerian elements | 0.05° |

mod moon;
mod planets;
mod sun;

use crate::angle::{asin_deg, atan2_deg, cos_deg, mod360, sin_deg};
use crate::time::JulianEphemerisDay;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bodies the clock can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
}

impl Body {
    /// The five naked-eye planets, inner to outer.
    pub const PLANETS: [Body; 5] = [
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
        }
    }

    /// Altitude of the body's centre at rise and set, degrees.
    ///
    /// Refraction at the horizon plus semi-diameter for the Sun; the Moon's
    /// value also absorbs its mean horizontal parallax.
    pub const fn standard_altitude(self) -> f64 {
        match self {
            Body::Sun => -0.8333,
            Body::Moon => 0.125,
            _ => -0.5667,
        }
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Apparent geocentric ecliptic coordinates, equinox of date, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EclipticPosition {
    /// `[0, 360)`.
    pub longitude: f64,
    pub latitude: f64,
}

/// Source of ecliptic positions.
pub trait Ephemeris {
    /// Apparent ecliptic position of `body` at `jde`.
    fn ecliptic_position(&self, body: Body, jde: JulianEphemerisDay) -> EclipticPosition;
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn ecliptic_position(&self, body: Body, jde: JulianEphemerisDay) -> EclipticPosition {
        (**self).ecliptic_position(body, jde)
    }
}

/// Closed-form ephemeris used by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LowPrecisionEphemeris;

impl LowPrecisionEphemeris {
    pub const fn new() -> Self {
        Self
    }
}

impl Ephemeris for LowPrecisionEphemeris {
    fn ecliptic_position(&self, body: Body, jde: JulianEphemerisDay) -> EclipticPosition {
        let t = jde.julian_centuries().value();
        match body {
            Body::Sun => sun::apparent_position(t),
            Body::Moon => moon::apparent_position(t),
            planet => planets::apparent_position(planet, t),
        }
    }
}

// ── Shared low-precision earth-orientation terms ──────────────────────────

/// Nutation in longitude and obliquity `(Δψ, Δε)` in degrees (Meeus ch. 22,
/// 0.5″ accuracy).
pub(crate) fn nutation(t: f64) -> (f64, f64) {
    let omega = 125.04452 - 1934.136261 * t;
    let l_sun = 280.4665 + 36000.7698 * t;
    let l_moon = 218.3165 + 481267.8813 * t;

    let dpsi = -17.20 * sin_deg(omega) - 1.32 * sin_deg(2.0 * l_sun) - 0.23 * sin_deg(2.0 * l_moon)
        + 0.21 * sin_deg(2.0 * omega);
    let deps = 9.20 * cos_deg(omega) + 0.57 * cos_deg(2.0 * l_sun) + 0.10 * cos_deg(2.0 * l_moon)
        - 0.09 * cos_deg(2.0 * omega);

    (dpsi / 3600.0, deps / 3600.0)
}

/// Mean obliquity of the ecliptic, degrees (Meeus eq. 22.2).
pub(crate) fn mean_obliquity(t: f64) -> f64 {
    let seconds = 21.448 - 46.8150 * t - 0.00059 * t * t + 0.001813 * t * t * t;
    23.0 + 26.0 / 60.0 + seconds / 3600.0
}

/// True obliquity, mean plus nutation.
pub(crate) fn true_obliquity(t: f64) -> f64 {
    mean_obliquity(t) + nutation(t).1
}

/// Ecliptic `(λ, β)` to equatorial `(α, δ)`, all degrees.
pub(crate) fn ecliptic_to_equatorial(longitude: f64, latitude: f64, obliquity: f64) -> (f64, f64) {
    let (sl, cl) = (sin_deg(longitude), cos_deg(longitude));
    let (sb, cb) = (sin_deg(latitude), cos_deg(latitude));
    let (se, ce) = (sin_deg(obliquity), cos_deg(obliquity));

    let ra = atan2_deg(sl * ce - (sb / cb) * se, cl);
    let dec = asin_deg(sb * ce + cb * se * sl);
    (mod360(ra), dec)
}
