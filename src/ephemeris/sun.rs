// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Solar longitude, Meeus *Astronomical Algorithms* ch. 25 (low accuracy).

use super::EclipticPosition;
use crate::angle::{mod360, sin_deg};

/// Geometric true longitude of the Sun, degrees.
pub(super) fn true_longitude(t: f64) -> f64 {
    let l0 = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
    let m = 357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t;

    // equation of the centre
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * sin_deg(m)
        + (0.019_993 - 0.000_101 * t) * sin_deg(2.0 * m)
        + 0.000_289 * sin_deg(3.0 * m);

    mod360(l0 + c)
}

/// Apparent longitude: aberration and nutation folded into one correction.
pub(super) fn apparent_position(t: f64) -> EclipticPosition {
    let omega = 125.04 - 1_934.136 * t;
    EclipticPosition {
        longitude: mod360(true_longitude(t) - 0.005_69 - 0.004_78 * sin_deg(omega)),
        latitude: 0.0,
    }
}
