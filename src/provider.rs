// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Clock-time inputs drawn from the sky: the hour of the 24-hour hand and
//! the Bohemian hour counted from the last sunset.

use crate::ephemeris::{Body, Ephemeris};
use crate::observer::{AstroEvent, EventKind, SkyObserver};
use crate::positions::Timing;
use crate::time::{ClockZone, JulianDay, Period, WallTime, UT};
use tracing::{debug, warn};

/// Hour of the day shown by the 24-hour hand.
///
/// The DST share of the offset is removed when `disable_dst` is set and
/// always in mechanical timing, which has no way to follow a DST switch.
pub fn hour_of_day(wall: &WallTime, disable_dst: bool, timing: Timing) -> f64 {
    let hour = wall.hour as f64 + wall.minute as f64 / 60.0;
    if disable_dst || timing.is_mechanical() {
        hour - wall.dst_offset_seconds as f64 / 3600.0
    } else {
        hour
    }
}

/// Time since the previous sunset in 24ths of the sunset-to-sunset day.
#[derive(Debug, Clone, PartialEq)]
pub struct BohemianHours {
    /// Hours in `[0, 24)`.
    pub hours: f64,
    pub previous_sunset: AstroEvent,
    pub next_sunset: AstroEvent,
}

impl BohemianHours {
    /// The sunset-to-sunset day the hours are counted in.
    pub fn day(&self) -> Period<UT> {
        Period::new(self.previous_sunset.ut, self.next_sunset.ut)
    }

    /// Rotation of the Bohemian-hour ring that puts its 24 mark on the
    /// position the 24-hour hand had at the previous sunset.
    pub fn ring_angle(&self, zone: &ClockZone, disable_dst: bool, timing: Timing) -> f64 {
        let wall = zone.wall_time(&self.previous_sunset.event_time);
        hour_of_day(&wall, disable_dst, timing) * 15.0 - 180.0
    }
}

/// Last pair of sunsets found, reused while the query stays between them.
#[derive(Debug, Clone, Default)]
pub struct SunsetCache {
    pair: Option<(AstroEvent, AstroEvent)>,
}

impl SunsetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the cached pair. Call on any change of location, zone or timing.
    pub fn invalidate(&mut self) {
        self.pair = None;
    }

    /// Whether the cached pair brackets `jdu` as `(previous, next]`.
    fn covers(&self, jdu: JulianDay) -> bool {
        self.pair
            .as_ref()
            .is_some_and(|(a, b)| a.ut < jdu && jdu <= b.ut)
    }

    /// Bohemian hours at `jdu`, or `None` when no sunset brackets it (polar
    /// day or night) or the date is outside the supported years.
    pub fn bohemian_hours<E: Ephemeris + ?Sized>(
        &mut self,
        ephemeris: &E,
        observer: &SkyObserver,
        jdu: JulianDay,
        force_refresh: bool,
    ) -> Option<BohemianHours> {
        if force_refresh || !self.covers(jdu) {
            self.pair = find_sunsets(ephemeris, observer, jdu);
            match &self.pair {
                Some((a, b)) => debug!(
                    previous = %a.event_time,
                    next = %b.event_time,
                    "sunset pair recomputed"
                ),
                None => warn!(
                    latitude = observer.latitude,
                    jdu = jdu.value(),
                    "no bracketing sunsets, Bohemian hours unavailable"
                ),
            }
        }

        let (previous, next) = self.pair.as_ref()?;
        let length = Period::<UT>::new(previous.ut, next.ut).duration_days().value();
        if length <= 0.0 {
            return None;
        }

        Some(BohemianHours {
            hours: 24.0 * (jdu - previous.ut).value() / length,
            previous_sunset: previous.clone(),
            next_sunset: next.clone(),
        })
    }
}

fn find_sunsets<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    observer: &SkyObserver,
    jdu: JulianDay,
) -> Option<(AstroEvent, AstroEvent)> {
    let search = |backward: bool| {
        observer
            .find_event(ephemeris, Body::Sun, EventKind::Set, jdu, backward, None)
            .ok()
            .flatten()
    };
    let previous = search(true)?;
    let next = search(false)?;
    // a query landing exactly on a sunset belongs to the window it closes
    if previous.ut >= jdu {
        return None;
    }
    Some((previous, next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::LowPrecisionEphemeris;
    use crate::time::Time;
    use chrono::{TimeZone, Utc};
    use qtty::Days;

    const PRAGUE: SkyObserver = SkyObserver {
        latitude: 50.0870,
        longitude: 14.4185,
    };

    fn wall(hour: u32, minute: u32, dst: i32) -> WallTime {
        WallTime {
            year: 2021,
            month: 7,
            day: 1,
            hour,
            minute,
            second: 0,
            utc_offset_seconds: 3600 + dst,
            dst_offset_seconds: dst,
        }
    }

    #[test]
    fn dst_is_removed_on_request_or_in_mechanical_timing() {
        let w = wall(14, 30, 3600);
        assert_eq!(hour_of_day(&w, false, Timing::Modern), 14.5);
        assert_eq!(hour_of_day(&w, true, Timing::Modern), 13.5);
        assert_eq!(hour_of_day(&w, false, Timing::ConstrainedSun), 14.5);
        assert_eq!(hour_of_day(&w, false, Timing::MechanicalOriginal), 13.5);
        assert_eq!(hour_of_day(&w, false, Timing::MechanicalUpdated), 13.5);
        assert_eq!(hour_of_day(&wall(14, 30, 0), true, Timing::Modern), 14.5);
    }

    #[test]
    fn bohemian_hours_count_from_sunset() {
        let eph = LowPrecisionEphemeris::new();
        let mut cache = SunsetCache::new();
        let noon = Time::from_utc(Utc.with_ymd_and_hms(2021, 3, 21, 11, 0, 0).unwrap());
        let bh = cache.bohemian_hours(&eph, &PRAGUE, noon, false).unwrap();

        // near the equinox the sunset-to-sunset day is close to 24 h and
        // noon falls about 18 h after sunset
        let day = bh.day();
        assert!((day.duration_days().value() - 1.0).abs() < 0.01);
        assert!((bh.hours - 18.0).abs() < 0.5, "{}", bh.hours);
        assert!(day.contains(&noon));
    }

    #[test]
    fn cache_is_reused_inside_the_window() {
        let eph = LowPrecisionEphemeris::new();
        let mut cache = SunsetCache::new();
        let t0 = Time::from_utc(Utc.with_ymd_and_hms(2021, 3, 21, 9, 0, 0).unwrap());
        let first = cache.bohemian_hours(&eph, &PRAGUE, t0, false).unwrap();

        let later = t0 + Days::new(0.25);
        let second = cache.bohemian_hours(&eph, &PRAGUE, later, false).unwrap();
        assert_eq!(first.previous_sunset, second.previous_sunset);
        let length = (first.next_sunset.ut - first.previous_sunset.ut).value();
        assert!((second.hours - first.hours - 24.0 * 0.25 / length).abs() < 1e-6);

        // past the next sunset the pair moves on
        let tomorrow = first.next_sunset.ut + Days::new(0.1);
        let third = cache.bohemian_hours(&eph, &PRAGUE, tomorrow, false).unwrap();
        assert!((third.previous_sunset.ut - first.next_sunset.ut).value().abs() < 1e-6);
    }

    #[test]
    fn invalidate_forces_a_new_search() {
        let eph = LowPrecisionEphemeris::new();
        let mut cache = SunsetCache::new();
        let t0 = Time::from_utc(Utc.with_ymd_and_hms(2021, 3, 21, 9, 0, 0).unwrap());
        cache.bohemian_hours(&eph, &PRAGUE, t0, false);
        assert!(cache.covers(t0));
        cache.invalidate();
        assert!(!cache.covers(t0));
    }

    #[test]
    fn polar_day_has_no_bohemian_hours() {
        let eph = LowPrecisionEphemeris::new();
        let mut cache = SunsetCache::new();
        let tromso = SkyObserver::new(69.65, 18.96).unwrap();
        let t = Time::from_utc(Utc.with_ymd_and_hms(2021, 6, 21, 12, 0, 0).unwrap());
        assert!(cache.bohemian_hours(&eph, &tromso, t, false).is_none());
    }

    #[test]
    fn ring_points_at_sunset_hand_position() {
        let eph = LowPrecisionEphemeris::new();
        let mut cache = SunsetCache::new();
        let zone = ClockZone::parse("UT", 0.0).unwrap();
        let t = Time::from_utc(Utc.with_ymd_and_hms(2021, 3, 21, 11, 0, 0).unwrap());
        let bh = cache.bohemian_hours(&eph, &PRAGUE, t, false).unwrap();
        // sunset in Prague near the equinox is about 17:15 UT
        let angle = bh.ring_angle(&zone, false, Timing::Modern);
        assert!((angle - (17.25 * 15.0 - 180.0)).abs() < 5.0, "{angle}");
    }
}
