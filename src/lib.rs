// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Orloj
//!
//! Engine of the Prague astronomical clock: where every hand and ring of
//! the dial points at a given instant, either following the sky or
//! following the clock's gear train.
//!
//! # Layers
//!
//! | Module | Role |
//! |--------|------|
//! | [`time`] | Julian Days on the UT and TT axes, zones and wall time |
//! | [`angle`], [`geometry`] | Degree trigonometry, circles and intersections |
//! | [`ephemeris`] | Ecliptic longitudes of the Sun, Moon and planets |
//! | [`observer`], [`events`] | Sidereal time, rise/set search, equinoxes and phases |
//! | [`ecliptic_wheel`] | Projection onto the off-centre zodiac ring and back |
//! | [`provider`] | 24-hour hand input and Bohemian hours |
//! | [`positions`] | One snapshot of every hand from the sky |
//! | [`mechanical`] | The same snapshot extrapolated through the gears |
//! | [`unequal_hours`] | Latitude-dependent geometry of the temporal hours |
//! | [`clock`], [`playback`] | Frame-by-frame driver and simulated time |
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use orloj::clock::ClockEngine;
//! use orloj::ephemeris::LowPrecisionEphemeris;
//! use orloj::settings::Settings;
//!
//! let mut clock = ClockEngine::new(LowPrecisionEphemeris::new(), Settings::default())?;
//! let frame = clock.frame(Utc.with_ymd_and_hms(2021, 7, 1, 10, 0, 0).unwrap())?;
//! // noon CEST puts the 24-hour hand straight up
//! assert_eq!(frame.displayed.hand_angle, 0.0);
//! # Ok::<(), orloj::OrlojError>(())
//! ```

mod error;

pub mod angle;
pub mod clock;
pub mod ecliptic_wheel;
pub mod ephemeris;
pub mod events;
pub mod geometry;
pub mod mechanical;
pub mod observer;
pub mod playback;
pub mod positions;
pub mod provider;
pub mod settings;
pub mod time;
pub mod unequal_hours;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use error::{OrlojError, Result, MAX_YEAR, MIN_YEAR};
