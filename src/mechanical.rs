// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Mechanical simulation
//!
//! The real clock is driven by gears, not by the sky. Between two
//! recalibrations its hands turn at fixed ratios:
//!
//! | Hand | Turns per solar day |
//! |------|---------------------|
//! | 24-hour hand | 1 |
//! | Sidereal ring | 366 / 365 |
//! | Moon hand | [`MoonGearRatio`] |
//! | Moon phase | moon-hand days × 2 / 57 |
//!
//! A recalibration snapshot ([`MechanicalReference`]) is taken from the
//! sky at the start of each calendar year (updated timing) or quarter
//! (original timing). From there the hands are extrapolated linearly and
//! the longitudes of the Sun and Moon are read back off the ecliptic ring
//! under their hands, so they drift exactly as the real mechanism does.

use crate::angle::{mod360, signed_angle};
use crate::ecliptic_wheel::{self, ecliptic_angles_from_hand_angle};
use crate::ephemeris::Ephemeris;
use crate::error::Result;
use crate::observer::SkyObserver;
use crate::positions::{calculate_basic_positions, BasicPositions, Timing};
use crate::time::{ClockZone, Instant, JulianDay, Time, UtcPeriod, MILLIS_PER_DAY, TT};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Turns of the sidereal ring per solar day.
pub const SIDEREAL_RATIO: f64 = 366.0 / 365.0;
/// Turns of the phase ball per turn of the moon hand.
pub const PHASE_RATIO: f64 = 2.0 / 57.0;
/// Mean synodic month, days.
pub const SYNODIC_MONTH: f64 = 29.530_589;
/// Mean motion of the Moon in longitude, degrees per day.
const MOON_MEAN_MOTION: f64 = 13.176_396;

/// Turns of the moon hand per solar day.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoonGearRatio(pub f64);

impl MoonGearRatio {
    /// The 1866 train, 366/379: about a day behind the Moon every quarter.
    pub const ORIGINAL: MoonGearRatio = MoonGearRatio(366.0 / 379.0);
    /// One turn per lunar day, `1 − 1/29.530589` to six places.
    pub const UPDATED: MoonGearRatio = MoonGearRatio(0.966_137);

    /// Ratio used by `timing`; non-mechanical timings get the updated train.
    pub const fn for_timing(timing: Timing) -> Self {
        match timing {
            Timing::MechanicalOriginal => Self::ORIGINAL,
            _ => Self::UPDATED,
        }
    }

    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Recalibration span containing `instant`: the local calendar year for
/// updated timing, the local calendar quarter for original timing.
///
/// `None` for non-mechanical timings.
pub fn recalibration_window(
    instant: Instant,
    zone: &ClockZone,
    timing: Timing,
) -> Result<Option<UtcPeriod>> {
    let wall = zone.wall_time(&instant);
    let (start, end) = match timing {
        Timing::MechanicalUpdated => ((wall.year, 1), (wall.year + 1, 1)),
        Timing::MechanicalOriginal => {
            let first = (wall.month - 1) / 3 * 3 + 1;
            if first == 10 {
                ((wall.year, first), (wall.year + 1, 1))
            } else {
                ((wall.year, first), (wall.year, first + 3))
            }
        }
        Timing::Modern | Timing::ConstrainedSun => return Ok(None),
    };

    let start = zone.local_midnight(start.0, start.1, 1)?;
    let end = zone.local_midnight(end.0, end.1, 1)?;
    Ok(Some(UtcPeriod::new(start, end)))
}

/// Calibration snapshot of the gear train.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MechanicalReference {
    /// Timing is not mechanical.
    #[default]
    NotApplicable,
    /// Mechanical timing with no valid snapshot yet.
    NeedsRecompute,
    /// Snapshot taken at the start of its `validity` window.
    Cached(Box<BasicPositions>),
}

impl MechanicalReference {
    pub fn for_timing(timing: Timing) -> Self {
        if timing.is_mechanical() {
            MechanicalReference::NeedsRecompute
        } else {
            MechanicalReference::NotApplicable
        }
    }

    /// Drop the snapshot but stay mechanical.
    pub fn invalidate(&mut self) {
        if !matches!(self, MechanicalReference::NotApplicable) {
            *self = MechanicalReference::NeedsRecompute;
        }
    }

    pub fn snapshot(&self) -> Option<&BasicPositions> {
        match self {
            MechanicalReference::Cached(reference) => Some(reference),
            _ => None,
        }
    }

    /// The snapshot in force at `instant`, recomputed when `instant` has
    /// left the cached window. `None` when timing is not mechanical.
    pub fn resolve<E: Ephemeris + ?Sized>(
        &mut self,
        ephemeris: &E,
        instant: Instant,
        zone: &ClockZone,
        observer: &SkyObserver,
        disable_dst: bool,
        timing: Timing,
    ) -> Result<Option<&BasicPositions>> {
        if matches!(self, MechanicalReference::NotApplicable) {
            return Ok(None);
        }

        let valid = self
            .snapshot()
            .and_then(|r| r.validity.as_ref())
            .is_some_and(|window| window.contains(&instant));

        if !valid {
            let Some(window) = recalibration_window(instant, zone, timing)? else {
                *self = MechanicalReference::NotApplicable;
                return Ok(None);
            };
            let mut reference = calculate_basic_positions(
                ephemeris,
                window.start,
                zone,
                observer,
                disable_dst,
                timing,
            );
            reference.validity = Some(window);
            debug!(
                %timing,
                start = %window.start,
                end = %window.end,
                days = window.duration_days(),
                "mechanical reference recomputed"
            );
            *self = MechanicalReference::Cached(Box::new(reference));
        }

        Ok(self.snapshot())
    }
}

/// The clock at `time` as the gear train shows it, extrapolated from
/// `reference`.
pub fn calculate_mechanical_positions(
    time: Instant,
    timing: Timing,
    reference: &BasicPositions,
    zone: &ClockZone,
    observer: &SkyObserver,
) -> BasicPositions {
    let southern = observer.is_southern();
    let ratio = MoonGearRatio::for_timing(timing).value();

    let delta_days = (time - reference.time).num_milliseconds() as f64 / MILLIS_PER_DAY;
    let delta_moon_days = delta_days * ratio;
    let phase_turns = delta_moon_days * PHASE_RATIO * if southern { -1.0 } else { 1.0 };

    let hand_angle = mod360(reference.hand_angle + delta_days * 360.0);
    let moon_hand_angle = mod360(reference.moon_hand_angle + delta_moon_days * 360.0);
    let sidereal_angle = mod360(reference.sidereal_angle + delta_days * SIDEREAL_RATIO * 360.0);
    let sun = ecliptic_angles_from_hand_angle(hand_angle, sidereal_angle, southern);

    let jdu: JulianDay = Time::from_utc(time);
    BasicPositions {
        time,
        jdu,
        jde: jdu.to::<TT>(),
        southern,
        wall: zone.wall_time(&time),
        hour_of_day: mod360(hand_angle + 180.0) / 15.0,
        hand_angle,
        sidereal_angle,
        sun,
        moon: ecliptic_angles_from_hand_angle(moon_hand_angle, sidereal_angle, southern),
        moon_hand_angle,
        moon_phase: mod360(reference.moon_phase + phase_turns * 360.0),
        constrained_sun: sun,
        planets: Vec::new(),
        validity: None,
    }
}

/// How far the gear train has drifted from the sky.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErrorMetrics {
    /// Sun position on the 24-hour dial, minutes of time.
    pub sun_minutes: f64,
    /// Moon longitude, days of mean lunar motion.
    pub moon_days: f64,
    /// Moon phase, days of the mean synodic month.
    pub phase_days: f64,
}

impl ErrorMetrics {
    /// `mechanical − astronomical`; positive when the mechanism is ahead.
    pub fn between(astronomical: &BasicPositions, mechanical: &BasicPositions) -> Self {
        let sun_hand =
            |p: &BasicPositions| ecliptic_wheel::moon_hand_angle(p.sun.ie, p.sidereal_angle);

        Self {
            sun_minutes: signed_angle(sun_hand(mechanical) - sun_hand(astronomical)) * 4.0,
            moon_days: signed_angle(mechanical.moon.orig - astronomical.moon.orig)
                / MOON_MEAN_MOTION,
            phase_days: signed_angle(mechanical.moon_phase - astronomical.moon_phase)
                / (360.0 / SYNODIC_MONTH),
        }
    }
}
