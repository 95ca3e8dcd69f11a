// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Equinoxes, solstices and lunar phases.
//!
//! Both searches look for the next instant at which an ecliptic angle (the
//! Sun's longitude, or the Moon's elongation from the Sun) reaches the next
//! multiple of 90°, refining a linear estimate with the mean rate.

use crate::angle::{mod360, signed_angle};
use crate::ephemeris::{Body, Ephemeris};
use crate::error::{check_year, OrlojError, Result};
use crate::time::{Instant, JulianDay, TT};
use qtty::Days;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean motion of the Sun in longitude, degrees per day.
const SUN_RATE: f64 = 360.0 / 365.242_19;
/// Mean motion of the Moon's elongation, degrees per day.
const ELONGATION_RATE: f64 = 360.0 / 29.530_589;
const MAX_ITERATIONS: usize = 50;
const TOLERANCE_DAYS: f64 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolarTerm {
    MarchEquinox,
    JuneSolstice,
    SeptemberEquinox,
    DecemberSolstice,
}

impl SolarTerm {
    fn from_quadrant(q: u8) -> Self {
        match q % 4 {
            0 => SolarTerm::MarchEquinox,
            1 => SolarTerm::JuneSolstice,
            2 => SolarTerm::SeptemberEquinox,
            _ => SolarTerm::DecemberSolstice,
        }
    }

    /// Apparent solar longitude at this term, degrees.
    pub fn longitude(self) -> f64 {
        match self {
            SolarTerm::MarchEquinox => 0.0,
            SolarTerm::JuneSolstice => 90.0,
            SolarTerm::SeptemberEquinox => 180.0,
            SolarTerm::DecemberSolstice => 270.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LunarPhase {
    NewMoon,
    FirstQuarter,
    FullMoon,
    LastQuarter,
}

impl LunarPhase {
    fn from_quadrant(q: u8) -> Self {
        match q % 4 {
            0 => LunarPhase::NewMoon,
            1 => LunarPhase::FirstQuarter,
            2 => LunarPhase::FullMoon,
            _ => LunarPhase::LastQuarter,
        }
    }

    /// Elongation of the Moon from the Sun at this phase, degrees.
    pub fn elongation(self) -> f64 {
        match self {
            LunarPhase::NewMoon => 0.0,
            LunarPhase::FirstQuarter => 90.0,
            LunarPhase::FullMoon => 180.0,
            LunarPhase::LastQuarter => 270.0,
        }
    }
}

/// A dated solar term or lunar phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occurrence<K> {
    pub kind: K,
    pub ut: JulianDay,
    pub event_time: Instant,
}

/// The next equinox or solstice strictly after `jdu`.
pub fn next_solar_term<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    jdu: JulianDay,
) -> Result<Occurrence<SolarTerm>> {
    let angle = |t: JulianDay| ephemeris.ecliptic_position(Body::Sun, t.to::<TT>()).longitude;
    let (q, ut) = next_quadrant(jdu, angle, SUN_RATE)?;
    occurrence(SolarTerm::from_quadrant(q), ut)
}

/// The next new moon, quarter or full moon strictly after `jdu`.
pub fn next_lunar_phase<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    jdu: JulianDay,
) -> Result<Occurrence<LunarPhase>> {
    let angle = |t: JulianDay| {
        let jde = t.to::<TT>();
        let moon = ephemeris.ecliptic_position(Body::Moon, jde).longitude;
        let sun = ephemeris.ecliptic_position(Body::Sun, jde).longitude;
        mod360(moon - sun)
    };
    let (q, ut) = next_quadrant(jdu, angle, ELONGATION_RATE)?;
    occurrence(LunarPhase::from_quadrant(q), ut)
}

/// Next time `angle` reaches a multiple of 90°, with the quadrant reached.
fn next_quadrant(
    jdu: JulianDay,
    angle: impl Fn(JulianDay) -> f64,
    rate: f64,
) -> Result<(u8, JulianDay)> {
    check_year(jdu.calendar_year())?;

    let start = angle(jdu);
    let q = ((start / 90.0).floor() as i64 + 1).rem_euclid(4) as u8;
    let target = q as f64 * 90.0;

    let mut ut = jdu + Days::new(mod360(target - start).max(1e-9) / rate);
    for _ in 0..MAX_ITERATIONS {
        let correction = signed_angle(target - angle(ut)) / rate;
        ut = ut + Days::new(correction);
        if correction.abs() < TOLERANCE_DAYS {
            break;
        }
    }
    Ok((q, ut))
}

fn occurrence<K>(kind: K, ut: JulianDay) -> Result<Occurrence<K>> {
    let millis = ut.to_millis();
    let event_time = ut.to_utc().ok_or(OrlojError::UnrepresentableInstant(millis))?;
    Ok(Occurrence {
        kind,
        ut,
        event_time,
    })
}
