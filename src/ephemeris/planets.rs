// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Planet positions from the JPL "approximate positions of the planets"
//! Keplerian elements (E. M. Standish, table 1, valid 1800–2050).
//!
//! Elements are referred to the mean ecliptic and equinox of J2000. The
//! heliocentric position of the planet minus that of the Earth–Moon
//! barycentre gives the geocentric direction, which is then carried to the
//! equinox of date by general precession in longitude.

use super::{nutation, Body, EclipticPosition};
use crate::angle::{atan2_deg, mod360};

/// `[a (au), e, I, L, ϖ, Ω]` and their rates per Julian century.
struct Elements {
    base: [f64; 6],
    rate: [f64; 6],
}

#[rustfmt::skip]
const MERCURY: Elements = Elements {
    base: [0.387_099_27, 0.205_635_93, 7.004_979_02, 252.250_323_50, 77.457_796_28, 48.330_765_93],
    rate: [0.000_000_37, 0.000_019_06, -0.005_947_49, 149_472.674_111_75, 0.160_476_89, -0.125_340_81],
};

#[rustfmt::skip]
const VENUS: Elements = Elements {
    base: [0.723_335_66, 0.006_776_72, 3.394_676_05, 181.979_099_50, 131.602_467_18, 76.679_842_55],
    rate: [0.000_003_90, -0.000_041_07, -0.000_788_90, 58_517.815_387_29, 0.002_683_29, -0.277_694_18],
};

#[rustfmt::skip]
const EARTH_MOON_BARYCENTRE: Elements = Elements {
    base: [1.000_002_61, 0.016_711_23, -0.000_015_31, 100.464_571_66, 102.937_681_93, 0.0],
    rate: [0.000_005_62, -0.000_043_92, -0.012_946_68, 35_999.372_449_81, 0.323_273_64, 0.0],
};

#[rustfmt::skip]
const MARS: Elements = Elements {
    base: [1.523_710_34, 0.093_394_10, 1.849_691_42, -4.553_432_05, -23.943_629_59, 49.559_538_91],
    rate: [0.000_018_47, 0.000_078_82, -0.008_131_31, 19_140.302_684_99, 0.444_410_88, -0.292_573_43],
};

#[rustfmt::skip]
const JUPITER: Elements = Elements {
    base: [5.202_887_00, 0.048_386_24, 1.304_396_95, 34.396_440_51, 14.728_479_83, 100.473_909_09],
    rate: [-0.000_116_07, -0.000_132_53, -0.001_837_14, 3_034.746_127_75, 0.212_526_68, 0.204_691_06],
};

#[rustfmt::skip]
const SATURN: Elements = Elements {
    base: [9.536_675_94, 0.053_861_79, 2.485_991_87, 49.954_244_23, 92.598_878_31, 113.662_424_48],
    rate: [-0.001_250_60, -0.000_509_91, 0.001_936_09, 1_222.493_622_01, -0.418_972_16, -0.288_677_94],
};

/// General precession in longitude, degrees per Julian century.
const PRECESSION_PER_CENTURY: f64 = 1.396_971_3;

fn elements(body: Body) -> &'static Elements {
    match body {
        Body::Mercury => &MERCURY,
        Body::Venus => &VENUS,
        Body::Mars => &MARS,
        Body::Jupiter => &JUPITER,
        Body::Saturn => &SATURN,
        // the Sun and Moon never reach this table; the barycentre stands in
        Body::Sun | Body::Moon => &EARTH_MOON_BARYCENTRE,
    }
}

/// Solve Kepler's equation `E − e·sin E = M` (radians).
fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let mut ea = mean_anomaly + e * mean_anomaly.sin();
    for _ in 0..30 {
        let step = (ea - e * ea.sin() - mean_anomaly) / (1.0 - e * ea.cos());
        ea -= step;
        if step.abs() < 1e-14 {
            break;
        }
    }
    ea
}

/// Heliocentric J2000 ecliptic position in au.
fn heliocentric(el: &Elements, t: f64) -> [f64; 3] {
    let v: [f64; 6] = std::array::from_fn(|i| el.base[i] + el.rate[i] * t);
    let [a, e, incl, mean_lon, peri_lon, node] = v;

    let omega = (peri_lon - node).to_radians();
    let node = node.to_radians();
    let incl = incl.to_radians();
    // M in (-180, 180] keeps Newton well started
    let m = (mod360(mean_lon - peri_lon + 180.0) - 180.0).to_radians();

    let ea = solve_kepler(m, e);
    let xp = a * (ea.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ea.sin();

    let (so, co) = omega.sin_cos();
    let (sn, cn) = node.sin_cos();
    let (si, ci) = incl.sin_cos();

    [
        (co * cn - so * sn * ci) * xp + (-so * cn - co * sn * ci) * yp,
        (co * sn + so * cn * ci) * xp + (-so * sn + co * cn * ci) * yp,
        (so * si) * xp + (co * si) * yp,
    ]
}

pub(super) fn apparent_position(body: Body, t: f64) -> EclipticPosition {
    let p = heliocentric(elements(body), t);
    let earth = heliocentric(&EARTH_MOON_BARYCENTRE, t);
    let (x, y, z) = (p[0] - earth[0], p[1] - earth[1], p[2] - earth[2]);

    let longitude = atan2_deg(y, x) + PRECESSION_PER_CENTURY * t + nutation(t).0;
    let latitude = atan2_deg(z, x.hypot(y));

    EclipticPosition {
        longitude: mod360(longitude),
        latitude,
    }
}
