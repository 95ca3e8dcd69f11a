// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Ecliptic-wheel projection
//!
//! The zodiac ring of the clock is eccentric: its hub sits
//! [`ECLIPTIC_CENTER_OFFSET`] units from the clock centre, and the scale cut
//! into it in 1864 was laid out for a ring of radius [`ECLIPTIC_INNER_RADIUS`].
//! A later segmented outer ring of radius [`ECLIPTIC_OUTER_RADIUS`] carries a
//! correctly sized scale. Reading a longitude off either ring therefore gives
//! a dial angle that differs from the true longitude by a term in `k·cos(λ)`,
//! where `k = asin(offset / radius)`.
//!
//! ## Forward
//!
//! ```text
//! off(λ)  = (k·cos λ − λ) mod 360
//! dial(λ) = 90 + off(±λ)          (− for southern observers)
//! ```
//!
//! ## Inverse
//!
//! Mechanical modes know where a hand points, not which longitude sits under
//! it. In a frame centred on the wheel hub (y up) the clock centre sits at
//! `(0, −offset)` and a hand at angle `t` from the top is the line
//! `y = M·x − offset` with `M = tan(90° − |t|)`. Intersecting that line with
//! the ring circle gives the point under the hand; its polar angle about the
//! hub is the inner dial angle, and the longitude follows by solving
//! `λ − k·cos λ = 90 − dial` (monotone in `λ` since `k < 1 rad`).

use crate::angle::{atan2_deg, atan_deg, cos_deg, mod360, sign, signed_angle, sin_deg, tan_deg};
use crate::geometry::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Radius of the ring the 1864 zodiac scale was laid out for.
pub const ECLIPTIC_INNER_RADIUS: f64 = 161.0;
/// Radius of the segmented outer zodiac ring.
pub const ECLIPTIC_OUTER_RADIUS: f64 = 178.9;
/// Distance from the clock centre to the hub of the ecliptic wheel.
pub const ECLIPTIC_CENTER_OFFSET: f64 = 71.1;

/// Hand angles this close to 0° or 180° are pinned to the ring's poles.
const POLE_EPSILON: f64 = 0.01;
/// Half-width of the neighbourhood around 90° that is averaged.
const RIGHT_ANGLE_EPSILON: f64 = 1e-6;

/// Which zodiac scale an angle is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wheel {
    Inner,
    Outer,
}

impl Wheel {
    /// Amplitude `k` of the off-centre term, degrees.
    pub const fn amplitude(self) -> f64 {
        match self {
            // asin(71.1 / 161)
            Wheel::Inner => 26.207,
            // asin(71.1 / 178.9)
            Wheel::Outer => 23.4172,
        }
    }

    pub const fn radius(self) -> f64 {
        match self {
            Wheel::Inner => ECLIPTIC_INNER_RADIUS,
            Wheel::Outer => ECLIPTIC_OUTER_RADIUS,
        }
    }
}

/// A longitude and where it shows on the two zodiac scales.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AngleTriplet {
    /// True ecliptic longitude, degrees.
    pub orig: f64,
    /// Angle on the inner ecliptic scale.
    pub ie: f64,
    /// Angle on the outer ecliptic scale.
    pub oe: f64,
}

impl AngleTriplet {
    pub const ZERO: AngleTriplet = AngleTriplet {
        orig: 0.0,
        ie: 0.0,
        oe: 0.0,
    };
}

/// `(k·cos λ − λ) mod 360` for the given scale.
#[inline]
pub fn ecliptic_to_off_center(longitude: f64, wheel: Wheel) -> f64 {
    mod360(wheel.amplitude() * cos_deg(longitude) - longitude)
}

/// Project a true longitude onto both zodiac scales.
///
/// Southern observers see the ring turn the other way, so the longitude is
/// mirrored before projecting; `orig` keeps the unmirrored value.
pub fn adjust_for_ecliptic_wheel(longitude: f64, southern: bool) -> AngleTriplet {
    let mirrored = if southern { -longitude } else { longitude };
    AngleTriplet {
        orig: longitude,
        ie: 90.0 + ecliptic_to_off_center(mirrored, Wheel::Inner),
        oe: 90.0 + ecliptic_to_off_center(mirrored, Wheel::Outer),
    }
}

/// Rotation of the moon hand for a Moon at inner-scale angle `moon_ie` on a
/// wheel turned by `sidereal_angle`.
///
/// The hand pivots on the clock centre, so it points at the Moon's position
/// on the eccentric ring, not at the ring angle itself.
pub fn moon_hand_angle(moon_ie: f64, sidereal_angle: f64) -> f64 {
    // dial coordinates: y grows downwards, 0° is at the top
    let x = sin_deg(moon_ie) * ECLIPTIC_INNER_RADIUS;
    let y = -cos_deg(moon_ie) * ECLIPTIC_INNER_RADIUS - ECLIPTIC_CENTER_OFFSET;

    90.0 + atan2_deg(y, x) + sidereal_angle
}

/// Hand angle past which the ring point under the hand lies below the hub.
fn crossover_angle() -> f64 {
    90.0 - atan_deg(ECLIPTIC_CENTER_OFFSET / ECLIPTIC_INNER_RADIUS)
}

/// Hub-centred polar angle of the inner-ring point under a hand at `abs_t`
/// (0..180) degrees from the top.
fn ring_angle_under_hand(abs_t: f64) -> f64 {
    let r = ECLIPTIC_INNER_RADIUS;
    let b = -ECLIPTIC_CENTER_OFFSET;
    let m = tan_deg(90.0 - abs_t);
    let m2 = m * m;

    let radicand = (m2 * b * b - (1.0 + m2) * (b * b - r * r)).max(0.0);
    let x = (-m * b + radicand.sqrt()) / (1.0 + m2);
    // |y| from the line stays accurate where the ring is nearly vertical;
    // the crossover decides which side of the hub the point is on
    let y_abs = (m * x + b).abs();
    let y = if abs_t < crossover_angle() { y_abs } else { -y_abs };

    atan2_deg(x, y)
}

/// Inner-scale angle of the ring point a hand points at, `t` being the hand
/// angle relative to the sidereal ring.
pub fn inner_angle_from_hand(t: f64) -> f64 {
    let t = signed_angle(t);
    let abs_t = t.abs();

    let angle = if abs_t < POLE_EPSILON {
        return 0.0;
    } else if abs_t > 180.0 - POLE_EPSILON {
        return 180.0;
    } else if (abs_t - 90.0).abs() < RIGHT_ANGLE_EPSILON {
        (ring_angle_under_hand(90.0 - RIGHT_ANGLE_EPSILON)
            + ring_angle_under_hand(90.0 + RIGHT_ANGLE_EPSILON))
            / 2.0
    } else {
        ring_angle_under_hand(abs_t)
    };

    // a hand at exactly -180 has already been returned above
    sign(t) * angle
}

/// Longitude whose inner-scale projection is `ie`.
///
/// Solves `λ − k·cos λ = 90 − ie` by Newton iteration; the left side is
/// strictly increasing, so the root is unique modulo 360.
pub fn longitude_from_inner_angle(ie: f64, southern: bool) -> f64 {
    let k = Wheel::Inner.amplitude();
    let k_rad = k.to_radians();
    let target = mod360(90.0 - ie);

    let mut a = target;
    for _ in 0..50 {
        let f = a - k * cos_deg(a) - target;
        let step = f / (1.0 + k_rad * sin_deg(a));
        a -= step;
        if step.abs() < 1e-12 {
            break;
        }
    }

    if southern {
        mod360(-a)
    } else {
        mod360(a)
    }
}

/// The longitude under a hand at `hand_angle` on a wheel turned by
/// `sidereal_angle`, with its projections on both scales.
///
/// Inverse of [`moon_hand_angle`] composed with
/// [`adjust_for_ecliptic_wheel`].
pub fn ecliptic_angles_from_hand_angle(
    hand_angle: f64,
    sidereal_angle: f64,
    southern: bool,
) -> AngleTriplet {
    let ie = inner_angle_from_hand(hand_angle - sidereal_angle);
    let orig = longitude_from_inner_angle(ie, southern);
    adjust_for_ecliptic_wheel(orig, southern)
}

/// A graduation of the outer zodiac scale, drawn from the wheel hub.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EclipticTick {
    /// Longitude the tick marks, degrees.
    pub longitude: f64,
    pub start: Point,
    pub end: Point,
    /// Sign boundaries (every 30°).
    pub major: bool,
}

/// The 60 ticks of the outer zodiac scale, every 6° of longitude.
pub fn ecliptic_ticks() -> Vec<EclipticTick> {
    (0..60)
        .map(|i| {
            let longitude = -90 + 6 * i;
            let angle = ecliptic_to_off_center(longitude as f64, Wheel::Outer);
            EclipticTick {
                longitude: longitude as f64,
                start: Point::new(0.0, ECLIPTIC_CENTER_OFFSET),
                end: Point::new(
                    cos_deg(angle) * ECLIPTIC_OUTER_RADIUS,
                    sin_deg(angle) * ECLIPTIC_OUTER_RADIUS,
                ),
                major: longitude % 30 == 0,
            }
        })
        .collect()
}
