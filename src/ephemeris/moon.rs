// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunar longitude and latitude, Meeus *Astronomical Algorithms* ch. 47.
//!
//! Only the periodic terms above 3·10⁻⁴° are kept; what is dropped adds up
//! to well under a hundredth of a degree.

use super::{nutation, EclipticPosition};
use crate::angle::{mod360, sin_deg};

/// `(D, M, M', F, Σl)` with `Σl` in 10⁻⁶ degrees (table 47.A).
#[rustfmt::skip]
const LONGITUDE_TERMS: [(i8, i8, i8, i8, f64); 59] = [
    (0, 0, 1, 0, 6_288_774.0), (2, 0, -1, 0, 1_274_027.0), (2, 0, 0, 0, 658_314.0),
    (0, 0, 2, 0, 213_618.0), (0, 1, 0, 0, -185_116.0), (0, 0, 0, 2, -114_332.0),
    (2, 0, -2, 0, 58_793.0), (2, -1, -1, 0, 57_066.0), (2, 0, 1, 0, 53_322.0),
    (2, -1, 0, 0, 45_758.0), (0, 1, -1, 0, -40_923.0), (1, 0, 0, 0, -34_720.0),
    (0, 1, 1, 0, -30_383.0), (2, 0, 0, -2, 15_327.0), (0, 0, 1, 2, -12_528.0),
    (0, 0, 1, -2, 10_980.0), (4, 0, -1, 0, 10_675.0), (0, 0, 3, 0, 10_034.0),
    (4, 0, -2, 0, 8_548.0), (2, 1, -1, 0, -7_888.0), (2, 1, 0, 0, -6_766.0),
    (1, 0, -1, 0, -5_163.0), (1, 1, 0, 0, 4_987.0), (2, -1, 1, 0, 4_036.0),
    (2, 0, 2, 0, 3_994.0), (4, 0, 0, 0, 3_861.0), (2, 0, -3, 0, 3_665.0),
    (0, 1, -2, 0, -2_689.0), (2, 0, -1, 2, -2_602.0), (2, -1, -2, 0, 2_390.0),
    (1, 0, 1, 0, -2_348.0), (2, -2, 0, 0, 2_236.0), (0, 1, 2, 0, -2_120.0),
    (0, 2, 0, 0, -2_069.0), (2, -2, -1, 0, 2_048.0), (2, 0, 1, -2, -1_773.0),
    (2, 0, 0, 2, -1_595.0), (4, -1, -1, 0, 1_215.0), (0, 0, 2, 2, -1_110.0),
    (3, 0, -1, 0, -892.0), (2, 1, 1, 0, -810.0), (4, -1, -2, 0, 759.0),
    (0, 2, -1, 0, -713.0), (2, 2, -1, 0, -700.0), (2, 1, -2, 0, 691.0),
    (2, -1, 0, -2, 596.0), (4, 0, 1, 0, 549.0), (0, 0, 4, 0, 537.0),
    (4, -1, 0, 0, 520.0), (1, 0, -2, 0, -487.0), (2, 1, 0, -2, -399.0),
    (0, 0, 2, -2, -381.0), (1, 1, 1, 0, 351.0), (3, 0, -2, 0, -340.0),
    (4, 0, -3, 0, 330.0), (2, -1, 2, 0, 327.0), (0, 2, 1, 0, -323.0),
    (1, 1, -1, 0, 299.0), (2, 0, 3, 0, 294.0),
];

/// `(D, M, M', F, Σb)` with `Σb` in 10⁻⁶ degrees (table 47.B).
#[rustfmt::skip]
const LATITUDE_TERMS: [(i8, i8, i8, i8, f64); 30] = [
    (0, 0, 0, 1, 5_128_122.0), (0, 0, 1, 1, 280_602.0), (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0), (2, 0, -1, 1, 55_413.0), (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0), (0, 0, 2, 1, 17_198.0), (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0), (2, -1, 0, -1, 8_216.0), (2, 0, -2, -1, 4_324.0),
    (2, 0, 1, 1, 4_200.0), (2, 1, 0, -1, -3_359.0), (2, -1, -1, 1, 2_463.0),
    (2, -1, 0, 1, 2_211.0), (2, -1, -1, -1, 2_065.0), (0, 1, -1, -1, -1_870.0),
    (4, 0, -1, -1, 1_828.0), (0, 1, 0, 1, -1_794.0), (0, 0, 0, 3, -1_749.0),
    (0, 1, -1, 1, -1_565.0), (1, 0, 0, 1, -1_491.0), (0, 1, 1, 1, -1_475.0),
    (0, 1, 1, -1, -1_410.0), (0, 1, 0, -1, -1_344.0), (1, 0, 0, -1, -1_335.0),
    (0, 0, 3, 1, 1_107.0), (4, 0, 0, -1, 1_021.0), (4, 0, -1, 1, 833.0),
];

struct Arguments {
    l: f64,
    d: f64,
    m: f64,
    mp: f64,
    f: f64,
    e: f64,
}

fn arguments(t: f64) -> Arguments {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    Arguments {
        l: 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
            - t4 / 65_194_000.0,
        d: 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
            - t4 / 113_065_000.0,
        m: 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0,
        mp: 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
            - t4 / 14_712_000.0,
        f: 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
            + t4 / 863_310_000.0,
        e: 1.0 - 0.002_516 * t - 0.000_007_4 * t2,
    }
}

impl Arguments {
    /// Sum of `coef · E^|m| · sin(dD + mM + m'M' + fF)`.
    fn series(&self, terms: &[(i8, i8, i8, i8, f64)]) -> f64 {
        terms
            .iter()
            .map(|&(d, m, mp, f, coef)| {
                let arg = d as f64 * self.d + m as f64 * self.m + mp as f64 * self.mp + f as f64 * self.f;
                let eccentricity = match m.abs() {
                    1 => self.e,
                    2 => self.e * self.e,
                    _ => 1.0,
                };
                coef * eccentricity * sin_deg(arg)
            })
            .sum()
    }
}

/// Geometric longitude and latitude referred to the mean equinox of date.
pub(super) fn geometric_position(t: f64) -> EclipticPosition {
    let a = arguments(t);
    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    let a3 = 313.45 + 481_266.484 * t;

    let sum_l = a.series(&LONGITUDE_TERMS)
        + 3_958.0 * sin_deg(a1)
        + 1_962.0 * sin_deg(a.l - a.f)
        + 318.0 * sin_deg(a2);

    let sum_b = a.series(&LATITUDE_TERMS) - 2_235.0 * sin_deg(a.l)
        + 382.0 * sin_deg(a3)
        + 175.0 * sin_deg(a1 - a.f)
        + 175.0 * sin_deg(a1 + a.f)
        + 127.0 * sin_deg(a.l - a.mp)
        - 115.0 * sin_deg(a.l + a.mp);

    EclipticPosition {
        longitude: mod360(a.l + sum_l / 1e6),
        latitude: sum_b / 1e6,
    }
}

pub(super) fn apparent_position(t: f64) -> EclipticPosition {
    let geometric = geometric_position(t);
    EclipticPosition {
        longitude: mod360(geometric.longitude + nutation(t).0),
        ..geometric
    }
}
