// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Fast-forward and rewind of simulated time.
//!
//! Each call to [`Playback::advance`] moves the simulated instant by the
//! real time elapsed since the previous frame times the speed, so the rate
//! does not depend on how often frames are drawn.

use crate::error::{MAX_YEAR, MIN_YEAR};
use crate::settings::Settings;
use crate::time::Instant;
use chrono::{Duration, TimeZone, Utc};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    /// Simulated seconds per real second; negative runs backwards.
    speed: f64,
    running: bool,
    last_frame: Option<Instant>,
    max_year: i32,
}

impl Playback {
    pub fn new(speed: f64, max_year: i32) -> Self {
        Self {
            speed,
            running: false,
            last_frame: None,
            max_year: max_year.clamp(MIN_YEAR, MAX_YEAR),
        }
    }

    /// Playback bounded by the configured maximum year.
    pub fn from_settings(settings: &Settings, speed: f64) -> Self {
        Self::new(speed, settings.playback_max_year)
    }

    pub fn max_year(&self) -> i32 {
        self.max_year
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
        self.last_frame = None;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.last_frame = None;
    }

    /// Simulated time for the frame drawn at real time `frame_time`.
    ///
    /// The first frame after [`start`](Self::start) only records its
    /// timestamp. Reaching the end of the maximum year (or the start of the
    /// earliest supported one, running backwards) clamps there and stops.
    pub fn advance(&mut self, simulated: Instant, frame_time: Instant) -> Instant {
        if !self.running {
            return simulated;
        }
        let Some(last) = self.last_frame.replace(frame_time) else {
            return simulated;
        };

        let elapsed_ms = (frame_time - last).num_milliseconds().max(0) as f64;
        let next = Duration::try_milliseconds((elapsed_ms * self.speed).round() as i64)
            .and_then(|step| simulated.checked_add_signed(step));

        let (lower, upper) = self.limits();
        let limit = match next {
            Some(t) if upper.is_some_and(|u| t >= u) => upper,
            Some(t) if lower.is_some_and(|l| t < l) => lower,
            Some(_) => None,
            // overflowed chrono's range in the direction of travel
            None if self.speed < 0.0 => lower,
            None => upper,
        };

        match (limit, next) {
            (Some(limit), _) => {
                debug!(%limit, "playback reached the end of the supported range");
                self.stop();
                limit
            }
            (None, Some(t)) => t,
            (None, None) => simulated,
        }
    }

    /// First instant of [`MIN_YEAR`] and the last millisecond of the
    /// maximum year.
    fn limits(&self) -> (Option<Instant>, Option<Instant>) {
        let lower = Utc.with_ymd_and_hms(MIN_YEAR, 1, 1, 0, 0, 0).single();
        let upper = Utc
            .with_ymd_and_hms(self.max_year + 1, 1, 1, 0, 0, 0)
            .single()
            .map(|t| t - Duration::milliseconds(1));
        (lower, upper)
    }
}

impl Default for Playback {
    fn default() -> Self {
        // one simulated day per real second
        Self::new(86_400.0, MAX_YEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn real(ms: i64) -> Instant {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::milliseconds(ms)
    }

    #[test]
    fn idle_playback_leaves_time_alone() {
        let mut p = Playback::default();
        let t = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(p.advance(t, real(0)), t);
        assert_eq!(p.advance(t, real(1000)), t);
    }

    #[test]
    fn rate_is_independent_of_frame_rate() {
        let t0 = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();

        let mut coarse = Playback::new(3600.0, MAX_YEAR);
        coarse.start();
        let mut a = coarse.advance(t0, real(0));
        a = coarse.advance(a, real(1000));

        let mut fine = Playback::new(3600.0, MAX_YEAR);
        fine.start();
        let mut b = fine.advance(t0, real(0));
        for frame in 1..=60 {
            b = fine.advance(b, real(frame * 1000 / 60));
        }

        assert_eq!(a, t0 + Duration::hours(1));
        assert!((b - a).num_milliseconds().abs() <= 60 * 3600 / 1000);
    }

    #[test]
    fn runs_backwards() {
        let t0 = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let mut p = Playback::new(-86_400.0, MAX_YEAR);
        p.start();
        p.advance(t0, real(0));
        assert_eq!(p.advance(t0, real(2000)), t0 - Duration::days(2));
    }

    #[test]
    fn stops_at_the_maximum_year() {
        let t0 = Utc.with_ymd_and_hms(2030, 12, 31, 0, 0, 0).unwrap();
        let mut p = Playback::new(86_400.0, 2030);
        p.start();
        p.advance(t0, real(0));
        let t = p.advance(t0, real(5000));
        assert_eq!(t.year(), 2030);
        assert_eq!((t.month(), t.day()), (12, 31));
        assert!(!p.is_running());
        // stopped: further frames do nothing
        assert_eq!(p.advance(t, real(9000)), t);
    }

    #[test]
    fn maximum_year_comes_from_settings() {
        let settings = Settings {
            playback_max_year: 2030,
            ..Settings::default()
        };
        let mut p = Playback::from_settings(&settings, 86_400.0);
        assert_eq!(p.max_year(), 2030);

        let t0 = Utc.with_ymd_and_hms(2030, 12, 31, 12, 0, 0).unwrap();
        p.start();
        p.advance(t0, real(0));
        let t = p.advance(t0, real(2000));
        assert_eq!(t.year(), 2030);
        assert!(!p.is_running());

        assert_eq!(Playback::from_settings(&Settings::default(), 1.0).max_year(), MAX_YEAR);
    }

    #[test]
    fn stops_at_the_earliest_year() {
        let t0 = Utc.with_ymd_and_hms(MIN_YEAR, 1, 2, 0, 0, 0).unwrap();
        let mut p = Playback::new(-86_400.0, MAX_YEAR);
        p.start();
        p.advance(t0, real(0));
        let t = p.advance(t0, real(3000));
        assert_eq!(t, Utc.with_ymd_and_hms(MIN_YEAR, 1, 1, 0, 0, 0).unwrap());
        assert!(!p.is_running());
    }
}
