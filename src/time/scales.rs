// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale markers used by the clock engine.
//!
//! | Marker | Description |
//! |--------|-------------|
//! | [`UT`] | Universal Time, the Earth-rotation axis the clock hands follow |
//! | [`TT`] | Terrestrial (Dynamical) Time, the ephemeris argument (TDT / JDE) |

use super::delta_t::delta_t_days;
use super::instant::TimeScale;
use qtty::Days;

/// Terrestrial Time: the canonical axis, identity conversion.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct TT;

impl TimeScale for TT {
    const LABEL: &'static str = "TT";

    #[inline(always)]
    fn to_jd_tt(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd_tt(jd_tt: Days) -> Days {
        jd_tt
    }
}

/// Universal Time.
///
/// `to_jd_tt` adds ΔT evaluated at the UT instant. `from_jd_tt` solves
/// `ut + ΔT(ut) = tt` by fixed-point iteration; ΔT changes by a few
/// microseconds per day, so three passes are more than enough.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UT;

impl TimeScale for UT {
    const LABEL: &'static str = "UT";

    #[inline]
    fn to_jd_tt(ut_value: Days) -> Days {
        ut_value + delta_t_days(ut_value)
    }

    #[inline]
    fn from_jd_tt(jd_tt: Days) -> Days {
        let mut ut = jd_tt;
        for _ in 0..3 {
            ut = jd_tt - delta_t_days(ut);
        }
        ut
    }
}
