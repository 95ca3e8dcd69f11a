// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Clock engine
//!
//! [`ClockEngine`] ties the pieces together for a caller that draws frames:
//! it holds the location snapshot, the settings and the two caches (the
//! mechanical reference and the sunset pair), and turns an instant into a
//! [`ClockFrame`].
//!
//! Location changes never patch fields in place. [`LocationState::new`]
//! builds a complete snapshot (observer, zone, unequal-hour geometry) that
//! replaces the old one only when every part of it was valid.

use crate::ephemeris::Ephemeris;
use crate::error::Result;
use crate::mechanical::{calculate_mechanical_positions, ErrorMetrics, MechanicalReference};
use crate::observer::SkyObserver;
use crate::positions::{calculate_basic_positions, BasicPositions, Timing};
use crate::provider::{BohemianHours, SunsetCache};
use crate::settings::Settings;
use crate::time::{ClockZone, Instant, WallTime};
use crate::unequal_hours::{Appearance, UnequalHourGeometry};
use tracing::debug;

/// Everything that depends on where the clock stands.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationState {
    pub observer: SkyObserver,
    pub zone: ClockZone,
    pub geometry: UnequalHourGeometry,
}

impl LocationState {
    pub fn new(latitude: f64, longitude: f64, zone: &str, appearance: Appearance) -> Result<Self> {
        let observer = SkyObserver::new(latitude, longitude)?;
        let zone = ClockZone::parse(zone, longitude)?;
        Ok(Self {
            observer,
            zone,
            geometry: UnequalHourGeometry::new(latitude, appearance),
        })
    }

    fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.latitude,
            settings.longitude,
            &settings.zone,
            settings.appearance,
        )
    }
}

/// One rendered instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockFrame {
    /// What the hands show: the sky, the Sun under the 24-hour hand in
    /// constrained-sun timing, or the gear train in mechanical timing.
    pub displayed: BasicPositions,
    /// Where the sky really is.
    pub astronomical: BasicPositions,
    /// Drift of the gear train, mechanical timing only.
    pub errors: Option<ErrorMetrics>,
    pub bohemian: Option<BohemianHours>,
    pub bohemian_ring_angle: Option<f64>,
    /// Local wall time of the last recalibration, mechanical timing only.
    pub recalibrated_at: Option<WallTime>,
}

pub struct ClockEngine<E: Ephemeris> {
    ephemeris: E,
    settings: Settings,
    location: LocationState,
    reference: MechanicalReference,
    sunsets: SunsetCache,
}

impl<E: Ephemeris> ClockEngine<E> {
    pub fn new(ephemeris: E, settings: Settings) -> Result<Self> {
        let location = LocationState::from_settings(&settings)?;
        Ok(Self {
            ephemeris,
            reference: MechanicalReference::for_timing(settings.timing),
            settings,
            location,
            sunsets: SunsetCache::new(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn location(&self) -> &LocationState {
        &self.location
    }

    pub fn geometry(&self) -> &UnequalHourGeometry {
        &self.location.geometry
    }

    /// Move the clock. On error nothing changes.
    pub fn update_location(&mut self, latitude: f64, longitude: f64, zone: &str) -> Result<()> {
        let location = LocationState::new(latitude, longitude, zone, self.settings.appearance)?;
        debug!(latitude, longitude, zone, "location updated");

        self.location = location;
        self.settings.latitude = latitude;
        self.settings.longitude = longitude;
        self.settings.zone = zone.to_owned();
        self.invalidate_caches();
        Ok(())
    }

    pub fn set_timing(&mut self, timing: Timing) {
        if timing != self.settings.timing {
            self.settings.timing = timing;
            self.reference = MechanicalReference::for_timing(timing);
            self.sunsets.invalidate();
        }
    }

    pub fn set_disable_dst(&mut self, disable_dst: bool) {
        if disable_dst != self.settings.disable_dst {
            self.settings.disable_dst = disable_dst;
            self.invalidate_caches();
        }
    }

    pub fn set_appearance(&mut self, appearance: Appearance) {
        if appearance != self.settings.appearance {
            self.settings.appearance = appearance;
            self.location.geometry = UnequalHourGeometry::new(self.settings.latitude, appearance);
        }
    }

    pub fn set_additional_planets(&mut self, on: bool) {
        self.settings.additional_planets = on;
    }

    fn invalidate_caches(&mut self) {
        self.reference.invalidate();
        self.sunsets.invalidate();
    }

    /// The clock at `instant`.
    ///
    /// Fails only when a mechanical recalibration falls on a local midnight
    /// the zone cannot represent.
    pub fn frame(&mut self, instant: Instant) -> Result<ClockFrame> {
        let Settings {
            timing,
            disable_dst,
            additional_planets,
            ..
        } = self.settings;
        let LocationState { observer, zone, .. } = &self.location;

        let mut astronomical = calculate_basic_positions(
            &self.ephemeris,
            instant,
            zone,
            observer,
            disable_dst,
            timing,
        );
        if additional_planets {
            astronomical.include_planets(&self.ephemeris, observer);
        }

        let reference = self.reference.resolve(
            &self.ephemeris,
            instant,
            zone,
            observer,
            disable_dst,
            timing,
        )?;
        let (displayed, errors, recalibrated_at) = match reference {
            Some(reference) => {
                let mechanical =
                    calculate_mechanical_positions(instant, timing, reference, zone, observer);
                let errors = ErrorMetrics::between(&astronomical, &mechanical);
                let recalibrated_at = reference
                    .validity
                    .map(|window| zone.wall_time(&window.start));
                (mechanical, Some(errors), recalibrated_at)
            }
            None => {
                let mut displayed = astronomical.clone();
                displayed.sun = astronomical.displayed_sun(timing);
                (displayed, None, None)
            }
        };

        let bohemian = self
            .sunsets
            .bohemian_hours(&self.ephemeris, observer, astronomical.jdu, false);
        let bohemian_ring_angle = bohemian
            .as_ref()
            .map(|b| b.ring_angle(zone, disable_dst, timing));

        Ok(ClockFrame {
            displayed,
            astronomical,
            errors,
            bohemian,
            bohemian_ring_angle,
            recalibrated_at,
        })
    }
}
