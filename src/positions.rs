// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Basic positions
//!
//! One snapshot of every hand and ring of the dial, computed straight from
//! the sky. Angles are degrees in the dial's drawing convention: the
//! 24-hour hand reads `0` at local noon, and the sidereal ring reads `0`
//! when the vernal point is at the top.
//!
//! | Field | Formula |
//! |-------|---------|
//! | `hand_angle` | `hour_of_day · 15 − 180` |
//! | `sidereal_angle` | `LST − 90` |
//! | `sun`, `moon` | [`adjust_for_ecliptic_wheel`] of the true longitude |
//! | `moon_hand_angle` | [`moon_hand_angle`] of the Moon's inner-scale angle |
//! | `moon_phase` | `λ☾ − λ☉` mod 360, mirrored in the south |
//! | `constrained_sun` | longitude under the 24-hour hand |

use crate::angle::{cos_deg, mod360};
use crate::ecliptic_wheel::{
    adjust_for_ecliptic_wheel, ecliptic_angles_from_hand_angle, moon_hand_angle, AngleTriplet,
};
use crate::ephemeris::{Body, Ephemeris};
use crate::observer::SkyObserver;
use crate::provider::hour_of_day;
use crate::time::{
    ClockZone, Instant, JulianDay, JulianEphemerisDay, Time, UtcPeriod, WallTime, TT,
};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the hands are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Timing {
    /// Every hand follows the sky.
    #[default]
    Modern,
    /// As `Modern`, but the Sun is drawn where the 24-hour hand crosses the
    /// ecliptic ring.
    ConstrainedSun,
    /// The 1866 gear train, recalibrated every calendar quarter.
    MechanicalOriginal,
    /// The modern gear train, recalibrated every calendar year.
    MechanicalUpdated,
}

impl Timing {
    #[inline]
    pub const fn is_mechanical(self) -> bool {
        matches!(self, Timing::MechanicalOriginal | Timing::MechanicalUpdated)
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Timing::Modern => "modern",
            Timing::ConstrainedSun => "constrained sun",
            Timing::MechanicalOriginal => "mechanical (original)",
            Timing::MechanicalUpdated => "mechanical (updated)",
        };
        f.write_str(name)
    }
}

/// Angles of every hand and ring at one instant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BasicPositions {
    pub time: Instant,
    pub jdu: JulianDay,
    pub jde: JulianEphemerisDay,
    /// Observer south of the equator: the dial is drawn mirrored.
    pub southern: bool,
    pub wall: WallTime,
    pub hour_of_day: f64,
    pub hand_angle: f64,
    pub sidereal_angle: f64,
    pub sun: AngleTriplet,
    pub moon: AngleTriplet,
    pub moon_hand_angle: f64,
    pub moon_phase: f64,
    pub constrained_sun: AngleTriplet,
    /// Planet positions, empty unless requested with
    /// [`BasicPositions::include_planets`].
    pub planets: Vec<(Body, AngleTriplet)>,
    /// Set on mechanical references: the span this snapshot calibrates.
    pub validity: Option<UtcPeriod>,
}

/// Snapshot of the clock driven straight from the sky.
///
/// Pure: the same arguments always give the same snapshot.
pub fn calculate_basic_positions<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    time: Instant,
    zone: &ClockZone,
    observer: &SkyObserver,
    disable_dst: bool,
    timing: Timing,
) -> BasicPositions {
    let jdu: JulianDay = Time::from_utc(time);
    let jde = jdu.to::<TT>();
    let wall = zone.wall_time(&time);
    let hour_of_day = hour_of_day(&wall, disable_dst, timing);
    let hand_angle = hour_of_day * 15.0 - 180.0;
    let southern = observer.is_southern();

    let sun_longitude = ephemeris.ecliptic_position(Body::Sun, jde).longitude;
    let moon_longitude = ephemeris.ecliptic_position(Body::Moon, jde).longitude;
    let sun = adjust_for_ecliptic_wheel(sun_longitude, southern);
    let moon = adjust_for_ecliptic_wheel(moon_longitude, southern);

    let sidereal_angle = observer.local_hour_angle(jdu, true) - 90.0;
    let elongation = moon_longitude - sun_longitude;
    let moon_phase = mod360(if southern { -elongation } else { elongation });

    BasicPositions {
        time,
        jdu,
        jde,
        southern,
        wall,
        hour_of_day,
        hand_angle,
        sidereal_angle,
        sun,
        moon,
        moon_hand_angle: moon_hand_angle(moon.ie, sidereal_angle),
        moon_phase,
        constrained_sun: ecliptic_angles_from_hand_angle(hand_angle, sidereal_angle, southern),
        planets: Vec::new(),
        validity: None,
    }
}

impl BasicPositions {
    /// Fill [`planets`](Self::planets) with the five naked-eye planets.
    pub fn include_planets<E: Ephemeris + ?Sized>(
        &mut self,
        ephemeris: &E,
        observer: &SkyObserver,
    ) {
        let southern = observer.is_southern();
        self.planets = Body::PLANETS
            .iter()
            .map(|&body| {
                let longitude = ephemeris.ecliptic_position(body, self.jde).longitude;
                (body, adjust_for_ecliptic_wheel(longitude, southern))
            })
            .collect();
    }

    /// The Sun as the dial shows it under `timing`.
    pub fn displayed_sun(&self, timing: Timing) -> AngleTriplet {
        match timing {
            Timing::ConstrainedSun => self.constrained_sun,
            _ => self.sun,
        }
    }
}

/// Radius of the moon ball on the dial.
pub const MOON_DISK_RADIUS: f64 = 12.0;

/// Shape of the lit part of the moon ball: a half disk closed by an
/// elliptical terminator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoonDisk {
    /// The lit limb is the long way round.
    pub large_arc: bool,
    /// The terminator bulges towards the lit limb.
    pub sweep: bool,
    /// Horizontal semi-axis of the terminator ellipse.
    pub terminator_rx: f64,
}

impl MoonDisk {
    pub fn from_phase(phase: f64) -> Self {
        let phase = mod360(phase);
        Self {
            large_arc: phase < 180.0,
            sweep: (phase / 90.0).floor() as u32 % 2 == 1,
            terminator_rx: cos_deg(phase).abs() * MOON_DISK_RADIUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::signed_angle;
    use crate::ecliptic_wheel::{ecliptic_to_off_center, Wheel};
    use crate::ephemeris::LowPrecisionEphemeris;
    use chrono::{TimeZone, Utc};

    fn prague() -> (SkyObserver, ClockZone) {
        (
            SkyObserver::new(50.0870, 14.4185).unwrap(),
            ClockZone::parse("Europe/Prague", 14.4185).unwrap(),
        )
    }

    #[test]
    fn hand_follows_local_wall_time() {
        let eph = LowPrecisionEphemeris::new();
        let (observer, zone) = prague();
        // 12:00 CEST
        let t = Utc.with_ymd_and_hms(2021, 7, 1, 10, 0, 0).unwrap();
        let with_dst = calculate_basic_positions(&eph, t, &zone, &observer, false, Timing::Modern);
        assert!((with_dst.hand_angle - 0.0).abs() < 1e-12);
        let without = calculate_basic_positions(&eph, t, &zone, &observer, true, Timing::Modern);
        assert!((without.hand_angle - -15.0).abs() < 1e-12);
    }

    #[test]
    fn sun_triplet_is_the_wheel_projection() {
        let eph = LowPrecisionEphemeris::new();
        let (observer, zone) = prague();
        let t = Utc.with_ymd_and_hms(2022, 2, 14, 8, 0, 0).unwrap();
        let p = calculate_basic_positions(&eph, t, &zone, &observer, false, Timing::Modern);
        let ie = 90.0 + ecliptic_to_off_center(p.sun.orig, Wheel::Inner);
        let oe = 90.0 + ecliptic_to_off_center(p.sun.orig, Wheel::Outer);
        assert_eq!(p.sun.ie, ie);
        assert_eq!(p.sun.oe, oe);
        assert!(p.planets.is_empty());
        assert!(p.validity.is_none());
    }

    #[test]
    fn full_moon_phase_is_half_a_turn() {
        let eph = LowPrecisionEphemeris::new();
        let (observer, zone) = prague();
        // 2000 January 21, 04:40 UT
        let t = Utc.with_ymd_and_hms(2000, 1, 21, 4, 40, 0).unwrap();
        let p = calculate_basic_positions(&eph, t, &zone, &observer, false, Timing::Modern);
        assert!((p.moon_phase - 180.0).abs() < 0.5, "{}", p.moon_phase);
    }

    #[test]
    fn southern_phase_is_mirrored() {
        let eph = LowPrecisionEphemeris::new();
        let zone = ClockZone::parse("UT", 0.0).unwrap();
        let north = SkyObserver::new(35.0, 20.0).unwrap();
        let south = SkyObserver::new(-35.0, 20.0).unwrap();
        let t = Utc.with_ymd_and_hms(2023, 5, 2, 18, 0, 0).unwrap();
        let n = calculate_basic_positions(&eph, t, &zone, &north, false, Timing::Modern);
        let s = calculate_basic_positions(&eph, t, &zone, &south, false, Timing::Modern);
        assert!(signed_angle(n.moon_phase + s.moon_phase).abs() < 1e-9);
        assert_eq!(n.sidereal_angle, s.sidereal_angle);
    }

    #[test]
    fn constrained_sun_lies_under_the_hand() {
        let eph = LowPrecisionEphemeris::new();
        let (observer, zone) = prague();
        let t = Utc.with_ymd_and_hms(2021, 10, 3, 7, 20, 0).unwrap();
        let p = calculate_basic_positions(&eph, t, &zone, &observer, false, Timing::ConstrainedSun);
        let hand = moon_hand_angle(p.constrained_sun.ie, p.sidereal_angle);
        assert!(signed_angle(hand - p.hand_angle).abs() < 1e-6);
        assert_eq!(p.displayed_sun(Timing::ConstrainedSun), p.constrained_sun);
        assert_eq!(p.displayed_sun(Timing::Modern), p.sun);
    }

    #[test]
    fn constrained_sun_stays_near_the_sun() {
        // the hand runs on zone time, the Sun on apparent solar time; the
        // gap is the equation of time plus the zone's offset from the
        // meridian, a few degrees of longitude at most
        let eph = LowPrecisionEphemeris::new();
        let t = Utc.with_ymd_and_hms(2021, 10, 1, 0, 0, 0).unwrap();
        let observer = SkyObserver::new(50.087, 14.4185).unwrap();
        let zone = ClockZone::parse("UT+01:00", 14.4185).unwrap();
        let p = calculate_basic_positions(&eph, t, &zone, &observer, false, Timing::Modern);
        let gap = signed_angle(p.constrained_sun.orig - p.sun.orig);
        assert!(gap.abs() < 5.0, "{gap}");
    }

    #[test]
    fn southern_hands_use_the_same_ring_formulas() {
        let eph = LowPrecisionEphemeris::new();
        let observer = SkyObserver::new(-33.8688, 151.2093).unwrap();
        let zone = ClockZone::parse("UT+10:00", 151.2093).unwrap();
        let t = Utc.with_ymd_and_hms(2021, 10, 3, 7, 20, 0).unwrap();
        let p = calculate_basic_positions(&eph, t, &zone, &observer, false, Timing::ConstrainedSun);

        assert!(p.southern);
        // the mirrored longitude goes through the northern hand formula
        let ie = adjust_for_ecliptic_wheel(p.moon.orig, true).ie;
        assert!((p.moon_hand_angle - moon_hand_angle(ie, p.sidereal_angle)).abs() < 1e-9);
        assert_eq!(
            p.constrained_sun,
            ecliptic_angles_from_hand_angle(p.hand_angle, p.sidereal_angle, true)
        );
        let back = ecliptic_angles_from_hand_angle(p.moon_hand_angle, p.sidereal_angle, true);
        assert!(signed_angle(back.orig - p.moon.orig).abs() < 1e-6, "{}", back.orig);
    }

    #[test]
    fn planets_on_request() {
        let eph = LowPrecisionEphemeris::new();
        let (observer, zone) = prague();
        let t = Utc.with_ymd_and_hms(2021, 10, 3, 7, 20, 0).unwrap();
        let mut p = calculate_basic_positions(&eph, t, &zone, &observer, false, Timing::Modern);
        p.include_planets(&eph, &observer);
        assert_eq!(p.planets.len(), 5);
        assert_eq!(p.planets[0].0, Body::Mercury);
        let venus = p.planets[1].1;
        assert!(signed_angle(venus.orig - p.sun.orig).abs() < 49.0);
    }

    #[test]
    fn moon_disk_shapes() {
        let new = MoonDisk::from_phase(0.0);
        assert!(new.large_arc && !new.sweep);
        assert!((new.terminator_rx - 12.0).abs() < 1e-12);

        let quarter = MoonDisk::from_phase(90.0);
        assert!(quarter.large_arc && quarter.sweep);
        assert!(quarter.terminator_rx < 1e-9);

        let full = MoonDisk::from_phase(180.0);
        assert!(!full.large_arc && !full.sweep);

        let waning = MoonDisk::from_phase(300.0);
        assert!(!waning.large_arc && waning.sweep);
        assert!((waning.terminator_rx - 6.0).abs() < 1e-9);
    }

    #[test]
    fn timing_modes() {
        assert!(!Timing::Modern.is_mechanical());
        assert!(!Timing::ConstrainedSun.is_mechanical());
        assert!(Timing::MechanicalOriginal.is_mechanical());
        assert!(Timing::MechanicalUpdated.is_mechanical());
        assert_eq!(Timing::default(), Timing::Modern);
    }
}
