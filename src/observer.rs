// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observer on the Earth's surface: sidereal time, solar time, altitudes and
//! rise/set/transit search.

use crate::angle::{asin_deg, cos_deg, mod360, signed_angle, sin_deg};
use crate::ephemeris::{ecliptic_to_equatorial, nutation, true_obliquity, Body, Ephemeris};
use crate::error::{check_year, OrlojError, Result};
use crate::time::{Instant, JulianDay, TT};
use qtty::Days;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Search step for horizon and meridian crossings.
const SEARCH_STEP_DAYS: f64 = 5.0 / 1440.0;
/// How far a search looks before giving up.
const SEARCH_SPAN_DAYS: f64 = 2.0;
const BISECTION_ROUNDS: usize = 32;

/// Geographic position of the observer, degrees (east longitude positive).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkyObserver {
    pub latitude: f64,
    pub longitude: f64,
}

/// Which crossing an event search looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EventKind {
    Rise,
    Set,
    Transit,
}

/// A rise, set or transit found by [`SkyObserver::find_event`].
#[derive(Debug, Clone, PartialEq)]
pub struct AstroEvent {
    pub body: Body,
    pub kind: EventKind,
    /// Julian Day (UT) of the event.
    pub ut: JulianDay,
    pub event_time: Instant,
    /// Human-readable label, e.g. `"Sunset"`.
    pub text: String,
}

impl SkyObserver {
    /// Observer at `latitude`/`longitude`; both must be finite and in range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite()
            || !longitude.is_finite()
            || latitude.abs() > 90.0
            || longitude.abs() > 180.0
        {
            return Err(OrlojError::InvalidLocation {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[inline]
    pub fn is_southern(&self) -> bool {
        self.latitude < 0.0
    }

    /// Local sidereal time as an angle, degrees in `[0, 360)`.
    ///
    /// With `apparent` the equation of the equinoxes is added (Meeus ch. 12).
    pub fn local_hour_angle(&self, jdu: JulianDay, apparent: bool) -> f64 {
        let d = jdu.value() - crate::time::J2000_JD;
        let t = d / 36_525.0;
        let mut gmst = 280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0;

        if apparent {
            let (dpsi, _) = nutation(t);
            gmst += dpsi * cos_deg(true_obliquity(t));
        }

        mod360(gmst + self.longitude)
    }

    /// Apparent equatorial coordinates `(α, δ)` of `body`, degrees.
    pub fn equatorial<E: Ephemeris + ?Sized>(
        &self,
        ephemeris: &E,
        body: Body,
        jdu: JulianDay,
    ) -> (f64, f64) {
        let jde = jdu.to::<TT>();
        let pos = ephemeris.ecliptic_position(body, jde);
        let obliquity = true_obliquity(jde.julian_centuries().value());
        ecliptic_to_equatorial(pos.longitude, pos.latitude, obliquity)
    }

    /// Local hour angle of `body`, degrees in `[-180, 180)`.
    pub fn body_hour_angle<E: Ephemeris + ?Sized>(
        &self,
        ephemeris: &E,
        body: Body,
        jdu: JulianDay,
    ) -> f64 {
        let (ra, _) = self.equatorial(ephemeris, body, jdu);
        signed_angle(self.local_hour_angle(jdu, true) - ra)
    }

    /// Apparent solar time, hours in `[0, 24)`.
    pub fn apparent_solar_time<E: Ephemeris + ?Sized>(&self, ephemeris: &E, jdu: JulianDay) -> f64 {
        mod360(self.body_hour_angle(ephemeris, Body::Sun, jdu) + 180.0) / 15.0
    }

    /// Geometric altitude of `body` above the horizon, degrees.
    pub fn altitude<E: Ephemeris + ?Sized>(
        &self,
        ephemeris: &E,
        body: Body,
        jdu: JulianDay,
    ) -> f64 {
        let (ra, dec) = self.equatorial(ephemeris, body, jdu);
        let h = self.local_hour_angle(jdu, true) - ra;
        asin_deg(
            sin_deg(self.latitude) * sin_deg(dec)
                + cos_deg(self.latitude) * cos_deg(dec) * cos_deg(h),
        )
    }

    /// Find the next (or, with `search_backward`, the previous) rise, set or
    /// transit of `body` within two days of `jdu`.
    ///
    /// `altitude` overrides [`Body::standard_altitude`] for rise and set.
    /// Returns `Ok(None)` when the body never crosses within the window
    /// (polar day or night), and [`OrlojError::OutOfRange`] when `jdu` lies
    /// outside the supported calendar years.
    pub fn find_event<E: Ephemeris + ?Sized>(
        &self,
        ephemeris: &E,
        body: Body,
        kind: EventKind,
        jdu: JulianDay,
        search_backward: bool,
        altitude: Option<f64>,
    ) -> Result<Option<AstroEvent>> {
        check_year(jdu.calendar_year())?;

        let h0 = altitude.unwrap_or(body.standard_altitude());
        // positive after the event, negative before
        let signal = |t: JulianDay| -> f64 {
            match kind {
                EventKind::Rise => self.altitude(ephemeris, body, t) - h0,
                EventKind::Set => h0 - self.altitude(ephemeris, body, t),
                EventKind::Transit => self.body_hour_angle(ephemeris, body, t),
            }
        };
        // the hour angle wraps from +180 to -180, which never looks like a crossing
        let is_crossing = |before: f64, after: f64| before < 0.0 && after >= 0.0;

        let steps = (SEARCH_SPAN_DAYS / SEARCH_STEP_DAYS).ceil() as usize;
        let step = Days::new(SEARCH_STEP_DAYS);

        let bracket = if search_backward {
            let mut hi = jdu;
            let mut f_hi = signal(hi);
            (0..steps).find_map(|_| {
                let lo = hi - step;
                let f_lo = signal(lo);
                let found = is_crossing(f_lo, f_hi).then_some((lo, hi));
                hi = lo;
                f_hi = f_lo;
                found
            })
        } else {
            let mut lo = jdu;
            let mut f_lo = signal(lo);
            (0..steps).find_map(|_| {
                let hi = lo + step;
                let f_hi = signal(hi);
                let found = is_crossing(f_lo, f_hi).then_some((lo, hi));
                lo = hi;
                f_lo = f_hi;
                found
            })
        };

        let Some((mut lo, mut hi)) = bracket else {
            return Ok(None);
        };

        for _ in 0..BISECTION_ROUNDS {
            let mid = lo + (hi - lo) * 0.5;
            if signal(mid) < 0.0 {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let ut = lo + (hi - lo) * 0.5;
        let millis = ut.to_millis();
        let event_time = ut.to_utc().ok_or(OrlojError::UnrepresentableInstant(millis))?;

        Ok(Some(AstroEvent {
            body,
            kind,
            ut,
            event_time,
            text: event_text(body, kind),
        }))
    }
}

fn event_text(body: Body, kind: EventKind) -> String {
    match (body, kind) {
        (Body::Sun, EventKind::Rise) => "Sunrise".to_string(),
        (Body::Sun, EventKind::Set) => "Sunset".to_string(),
        (Body::Moon, EventKind::Rise) => "Moonrise".to_string(),
        (Body::Moon, EventKind::Set) => "Moonset".to_string(),
        (body, EventKind::Rise) => format!("{body} rise"),
        (body, EventKind::Set) => format!("{body} set"),
        (body, EventKind::Transit) => format!("{body} transit"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::LowPrecisionEphemeris;
    use crate::time::Time;
    use chrono::{TimeZone, Timelike, Utc};

    const PRAGUE: SkyObserver = SkyObserver {
        latitude: 50.0870,
        longitude: 14.4185,
    };

    fn jd_utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> JulianDay {
        Time::from_utc(Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap())
    }

    #[test]
    fn rejects_bad_coordinates() {
        assert!(SkyObserver::new(91.0, 0.0).is_err());
        assert!(SkyObserver::new(0.0, f64::NAN).is_err());
        assert!(SkyObserver::new(-89.0, 179.0).is_ok());
    }

    #[test]
    fn greenwich_sidereal_time_example_12a() {
        // 1987 April 10, 0h UT: GMST 13h10m46.3668s
        let greenwich = SkyObserver::new(0.0, 0.0).unwrap();
        let lst = greenwich.local_hour_angle(Time::new(2_446_895.5), false);
        assert!((lst - 197.693_195).abs() < 1e-5, "θ0 = {lst}");
        // apparent differs by the equation of the equinoxes, under a second of time
        let apparent = greenwich.local_hour_angle(Time::new(2_446_895.5), true);
        assert!((apparent - lst).abs() < 15.0 / 3600.0);
    }

    #[test]
    fn longitude_shifts_local_sidereal_time() {
        let jdu = Time::new(2_451_545.0);
        let greenwich = SkyObserver::new(0.0, 0.0).unwrap().local_hour_angle(jdu, false);
        let prague = PRAGUE.local_hour_angle(jdu, false);
        assert!((signed_angle(prague - greenwich) - 14.4185).abs() < 1e-9);
    }

    #[test]
    fn solar_time_near_noon_at_transit() {
        let eph = LowPrecisionEphemeris::new();
        let jdu = jd_utc(2021, 6, 21, 0, 0);
        let transit = PRAGUE
            .find_event(&eph, Body::Sun, EventKind::Transit, jdu, false, None)
            .unwrap()
            .unwrap();
        let solar = PRAGUE.apparent_solar_time(&eph, transit.ut);
        assert!((solar - 12.0).abs() < 0.01, "{solar}");
        // transit in Prague is about 11:03 UT in June
        let t = transit.event_time;
        assert_eq!(t.hour(), 11);
        assert!(t.minute() < 10);
    }

    #[test]
    fn prague_sunrise_and_sunset_at_summer_solstice() {
        let eph = LowPrecisionEphemeris::new();
        let noon = jd_utc(2021, 6, 21, 11, 0);
        let set = PRAGUE
            .find_event(&eph, Body::Sun, EventKind::Set, noon, false, None)
            .unwrap()
            .unwrap();
        let rise = PRAGUE
            .find_event(&eph, Body::Sun, EventKind::Rise, noon, true, None)
            .unwrap()
            .unwrap();
        // 04:52 and 21:15 CEST
        let set_minutes = set.event_time.hour() * 60 + set.event_time.minute();
        let rise_minutes = rise.event_time.hour() * 60 + rise.event_time.minute();
        assert!((set_minutes as i32 - (19 * 60 + 15)).abs() <= 3, "{}", set.event_time);
        assert!((rise_minutes as i32 - (2 * 60 + 52)).abs() <= 3, "{}", rise.event_time);
        assert_eq!(set.text, "Sunset");
        assert_eq!(rise.text, "Sunrise");
        assert!(rise.ut < noon && noon < set.ut);
    }

    #[test]
    fn polar_day_has_no_sunset() {
        let eph = LowPrecisionEphemeris::new();
        let tromso = SkyObserver::new(69.65, 18.96).unwrap();
        let found = tromso
            .find_event(&eph, Body::Sun, EventKind::Set, jd_utc(2021, 6, 21, 0, 0), false, None)
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn searches_outside_supported_years_fail() {
        let eph = LowPrecisionEphemeris::new();
        // 1300 January 2
        let early = Time::new(2_195_883.5);
        assert_eq!(
            PRAGUE.find_event(&eph, Body::Sun, EventKind::Set, early, false, None),
            Err(OrlojError::OutOfRange { year: 1300 })
        );
        // 2400 March 1
        let late = jd_utc(2400, 3, 1, 0, 0);
        assert!(matches!(
            PRAGUE.find_event(&eph, Body::Moon, EventKind::Rise, late, true, None),
            Err(OrlojError::OutOfRange { year: 2400 })
        ));
    }

    #[test]
    fn moon_rises_and_sets_in_prague() {
        let eph = LowPrecisionEphemeris::new();
        let jdu = jd_utc(2022, 3, 1, 0, 0);
        let rise = PRAGUE
            .find_event(&eph, Body::Moon, EventKind::Rise, jdu, false, None)
            .unwrap()
            .unwrap();
        let alt = PRAGUE.altitude(&eph, Body::Moon, rise.ut);
        assert!((alt - Body::Moon.standard_altitude()).abs() < 1e-3);
        assert_eq!(rise.text, "Moonrise");
        let jupiter = PRAGUE
            .find_event(&eph, Body::Jupiter, EventKind::Transit, jdu, false, None)
            .unwrap()
            .unwrap();
        assert_eq!(jupiter.text, "Jupiter transit");
    }
}
