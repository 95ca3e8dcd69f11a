// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Flat settings record. The caller owns persistence; the engine only reads
//! the values it is handed.

use crate::error::{Result, MAX_YEAR};
use crate::observer::SkyObserver;
use crate::positions::Timing;
use crate::time::ClockZone;
use crate::unequal_hours::Appearance;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const PRAGUE_LATITUDE: f64 = 50.0870;
pub const PRAGUE_LONGITUDE: f64 = 14.4185;
pub const PRAGUE_ZONE: &str = "Europe/Prague";

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    pub latitude: f64,
    pub longitude: f64,
    /// IANA name, `"UT"`, or `"LMT"` for local mean time.
    pub zone: String,
    pub timing: Timing,
    pub appearance: Appearance,
    /// Show standard time all year.
    pub disable_dst: bool,
    pub additional_planets: bool,
    pub detailed_mechanism: bool,
    pub real_position_markers: bool,
    pub show_info_panel: bool,
    pub translucent_ecliptic: bool,
    /// Playback stops on reaching this calendar year.
    pub playback_max_year: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            latitude: PRAGUE_LATITUDE,
            longitude: PRAGUE_LONGITUDE,
            zone: PRAGUE_ZONE.to_owned(),
            timing: Timing::default(),
            appearance: Appearance::default(),
            disable_dst: false,
            additional_planets: false,
            detailed_mechanism: false,
            real_position_markers: false,
            show_info_panel: true,
            translucent_ecliptic: false,
            playback_max_year: MAX_YEAR,
        }
    }
}

impl Settings {
    pub fn observer(&self) -> Result<SkyObserver> {
        SkyObserver::new(self.latitude, self.longitude)
    }

    pub fn clock_zone(&self) -> Result<ClockZone> {
        ClockZone::parse(&self.zone, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrlojError;

    #[test]
    fn defaults_to_prague() {
        let s = Settings::default();
        let observer = s.observer().unwrap();
        assert_eq!(observer.latitude, PRAGUE_LATITUDE);
        assert!(!observer.is_southern());
        assert_eq!(s.clock_zone().unwrap().to_string(), PRAGUE_ZONE);
        assert_eq!(s.timing, Timing::Modern);
        assert_eq!(s.appearance, Appearance::Current);
        assert_eq!(s.playback_max_year, MAX_YEAR);
    }

    #[test]
    fn bad_values_surface_as_errors() {
        let s = Settings {
            zone: "Mars/Olympus_Mons".into(),
            latitude: 91.0,
            ..Settings::default()
        };
        assert!(matches!(s.observer(), Err(OrlojError::InvalidLocation { .. })));
        assert_eq!(
            s.clock_zone(),
            Err(OrlojError::UnknownZone("Mars/Olympus_Mons".into()))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_keys_take_defaults() {
        let s: Settings =
            serde_json::from_str(r#"{"latitude": -33.87, "timing": "MechanicalUpdated"}"#).unwrap();
        assert_eq!(s.latitude, -33.87);
        assert_eq!(s.timing, Timing::MechanicalUpdated);
        assert_eq!(s.zone, PRAGUE_ZONE);

        let back: Settings = serde_json::from_str(&serde_json::to_string(&s).unwrap()).unwrap();
        assert_eq!(back, s);
    }
}
