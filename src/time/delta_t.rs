// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # ΔT = TT − UT
//!
//! Piecewise model from Meeus, *Astronomical Algorithms* (2nd ed.), ch. 9:
//!
//! | Range | Model |
//! |-------|-------|
//! | before 948 | Stephenson & Houlden quadratic |
//! | 948–1600 | second Stephenson & Houlden quadratic |
//! | 1620–1992 | biennial table, second-difference interpolation |
//! | 1992–2010 | interpolation of the 1990/2000/2010 estimates |
//! | after 2010 | Meeus eq. 9.1 extrapolation |
//!
//! The engine only needs ΔT to convert the instant the hands show (UT) into
//! the argument of the ephemeris (TT); a second of error here moves the Moon
//! by half an arc-second, far below anything visible on the dial.

use qtty::{Day, Days, Seconds};

/// Biennial ΔT table from 1620 to 1992 (seconds), compiled by J. Meeus.
#[rustfmt::skip]
const BIENNIAL_TABLE: [f64; 187] = [
    124.0,115.0,106.0, 98.0, 91.0, 85.0, 79.0, 74.0, 70.0, 65.0,
     62.0, 58.0, 55.0, 53.0, 50.0, 48.0, 46.0, 44.0, 42.0, 40.0,
     37.0, 35.0, 33.0, 31.0, 28.0, 26.0, 24.0, 22.0, 20.0, 18.0,
     16.0, 14.0, 13.0, 12.0, 11.0, 10.0,  9.0,  9.0,  9.0,  9.0,
      9.0,  9.0,  9.0,  9.0, 10.0, 10.0, 10.0, 10.0, 10.0, 11.0,
     11.0, 11.0, 11.0, 11.0, 11.0, 11.0, 12.0, 12.0, 12.0, 12.0,
     12.0, 12.0, 13.0, 13.0, 13.0, 13.0, 14.0, 14.0, 14.0, 15.0,
     15.0, 15.0, 15.0, 16.0, 16.0, 16.0, 16.0, 16.0, 17.0, 17.0,
     17.0, 17.0, 17.0, 17.0, 17.0, 17.0, 16.0, 16.0, 15.0, 14.0,
     13.7, 13.1, 12.7, 12.5, 12.5, 12.5, 12.5, 12.5, 12.5, 12.3,
     12.0, 11.4, 10.6,  9.6,  8.6,  7.5,  6.6,  6.0,  5.7,  5.6,
      5.7,  5.9,  6.2,  6.5,  6.8,  7.1,  7.3,  7.5,  7.7,  7.8,
      7.9,  7.5,  6.4,  5.4,  2.9,  1.6, -1.0, -2.7, -3.6, -4.7,
     -5.4, -5.2, -5.5, -5.6, -5.8, -5.9, -6.2, -6.4, -6.1, -4.7,
     -2.7,  0.0,  2.6,  5.4,  7.7, 10.5, 13.4, 16.0, 18.2, 20.2,
     21.2, 22.4, 23.5, 23.9, 24.3, 24.0, 23.9, 23.9, 23.7, 24.0,
     24.3, 25.3, 26.2, 27.3, 28.2, 29.1, 30.0, 30.7, 31.4, 32.2,
     33.1, 34.0, 35.0, 36.5, 38.3, 40.2, 42.2, 44.5, 46.5, 48.5,
     50.5, 52.2, 53.8, 54.9, 55.8, 56.9, 58.3,
];

const JD_948: f64 = 2_067_314.5;
const JD_1600: f64 = 2_305_447.5;
const JD_1620: f64 = 2_312_752.5;
const JD_1992: f64 = 2_448_622.5;
const JD_2010: f64 = 2_455_197.5;
const BIENNIUM: f64 = 730.5;
const CENTURY: f64 = 36_525.0;

/// Quadratic in Julian centuries from an epoch: `a0 + a1·c + a2·c²`.
#[inline]
fn centuries_quadratic(jd: f64, epoch: f64, a0: f64, a1: f64, a2: f64) -> f64 {
    let c = (jd - epoch) / CENTURY;
    a0 + a1 * c + a2 * c * c
}

/// Three-point interpolation about the middle value: `y2 + n/2·(a + b + n·c)`.
#[inline]
fn interpolate3(y: [f64; 3], n: f64) -> f64 {
    let a = y[1] - y[0];
    let b = y[2] - y[1];
    y[1] + n / 2.0 * (a + b + n * (b - a))
}

/// Table lookup about the entry nearest `jd`; the first and last entries
/// borrow their neighbour as the middle point.
fn from_table(jd: f64) -> f64 {
    let last = BIENNIAL_TABLE.len() - 2;
    let m = (((jd - JD_1620) / BIENNIUM).round().max(1.0) as usize).min(last);
    let n = (jd - (JD_1620 + BIENNIUM * m as f64)) / BIENNIUM;
    interpolate3([BIENNIAL_TABLE[m - 1], BIENNIAL_TABLE[m], BIENNIAL_TABLE[m + 1]], n)
}

/// ΔT in seconds at a Julian Day on the UT axis.
pub(crate) fn delta_t_seconds(jd_ut: f64) -> Seconds {
    let seconds = if jd_ut < JD_948 {
        centuries_quadratic(jd_ut, JD_948, 1_830.0, -405.0, 46.5)
    } else if jd_ut < JD_1600 {
        centuries_quadratic(jd_ut, 2_396_758.5, 0.0, 0.0, 22.5)
    } else if jd_ut < JD_1992 {
        from_table(jd_ut)
    } else if jd_ut <= JD_2010 {
        interpolate3([56.86, 63.83, 70.0], (jd_ut - 2_451_544.5) / 3_652.5)
    } else {
        let t = jd_ut - 2_382_148.0;
        -15.0 + t * t / 41_048_480.0
    };
    Seconds::new(seconds)
}

/// ΔT as a day quantity, ready to add to a UT Julian Day.
#[inline]
pub(crate) fn delta_t_days(jd_ut: Days) -> Days {
    delta_t_seconds(jd_ut.value()).to::<Day>()
}

/// ΔT in seconds for a UT Julian Day.
#[inline]
pub fn delta_t(jd_ut: f64) -> Seconds {
    delta_t_seconds(jd_ut)
}
