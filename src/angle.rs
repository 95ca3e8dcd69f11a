// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Degree trigonometry and angle normalisation.
//!
//! Every angle on the clock face is kept in degrees; these helpers keep the
//! conversions in one place.

#[inline]
pub fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

#[inline]
pub fn cos_deg(x: f64) -> f64 {
    x.to_radians().cos()
}

#[inline]
pub fn tan_deg(x: f64) -> f64 {
    x.to_radians().tan()
}

#[inline]
pub fn asin_deg(x: f64) -> f64 {
    x.asin().to_degrees()
}

#[inline]
pub fn atan_deg(x: f64) -> f64 {
    x.atan().to_degrees()
}

/// `atan2(y, x)` in degrees.
#[inline]
pub fn atan2_deg(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

/// Normalise to `[0, 360)`.
#[inline]
pub fn mod360(x: f64) -> f64 {
    let r = x.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Normalise to `[-180, 180)`.
#[inline]
pub fn signed_angle(x: f64) -> f64 {
    mod360(x + 180.0) - 180.0
}

/// Sign of `x` as -1, 0 or 1.
///
/// Unlike [`f64::signum`], zero maps to zero.
#[inline]
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod360_range() {
        assert_eq!(mod360(360.0), 0.0);
        assert_eq!(mod360(-90.0), 270.0);
        assert_eq!(mod360(725.0), 5.0);
        assert!(mod360(-1e-15) < 360.0);
    }

    #[test]
    fn signed_angle_range() {
        assert_eq!(signed_angle(180.0), -180.0);
        assert_eq!(signed_angle(190.0), -170.0);
        assert_eq!(signed_angle(-190.0), 170.0);
        assert_eq!(signed_angle(359.0), -1.0);
    }

    #[test]
    fn sign_keeps_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(-3.0), -1.0);
        assert_eq!(sign(2.5), 1.0);
    }

    #[test]
    fn degree_trig() {
        assert!((sin_deg(30.0) - 0.5).abs() < 1e-12);
        assert!((cos_deg(60.0) - 0.5).abs() < 1e-12);
        assert!((tan_deg(45.0) - 1.0).abs() < 1e-12);
        assert!((atan2_deg(1.0, -1.0) - 135.0).abs() < 1e-12);
        assert!((asin_deg(71.1 / 161.0) - 26.207).abs() < 1e-3);
    }
}
