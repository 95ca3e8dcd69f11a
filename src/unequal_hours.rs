// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Unequal-hour geometry
//!
//! The outer part of the dial divides daylight into twelve temporal hours.
//! Their boundaries are circular arcs running from the clock rim, through
//! the equator circle, to the Tropic of Capricorn circle, each crossing
//! the three circles at the same fraction of that circle's daylit sweep.
//!
//! Everything here depends on latitude only and is recomputed when the
//! location changes. The horizon and twilight circles are stereographic
//! images of altitude circles. Beyond the polar circle the horizon no longer
//! reaches the rim and the construction shrinks to the midnight-sun circle;
//! beyond [`MAX_UNEVEN_HOUR_LATITUDE`] it is abandoned.
//!
//! Coordinates are dial units with the clock centre at the origin and `y`
//! pointing down, as drawn.

use crate::angle::{atan_deg, cos_deg, sign, sin_deg, tan_deg};
use crate::geometry::{find_circle_radius, Circle, Point};
use std::f64::consts::PI;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const CLOCK_RADIUS: f64 = 250.0;
pub const INCLINATION: f64 = 23.5;
/// Polar-circle latitude for the dial's inclination.
pub const ARCTIC: f64 = 90.0 - INCLINATION;
pub const LABEL_RADIUS: f64 = 212.0;
pub const EQUATOR_RADIUS: f64 = 164.1;
pub const MAX_UNEVEN_HOUR_LATITUDE: f64 = 86.0;
pub const MAX_LABEL_LATITUDE: f64 = 74.0;

const HOUR_LABEL_FONT_SIZE: f64 = 30.0;
const POLAR_HOUR_LABEL_FONT_SIZE: f64 = 20.0;
/// Latitude from which hour labels start moving to their polar offsets.
const LABEL_BLEND_LATITUDE: f64 = 50.0;

/// Horizontal and vertical label offsets for hours 1–12, temperate and polar.
const LABEL_DX: [f64; 12] = [3.0, -3.0, -7.0, -9.0, -9.0, -9.0, -12.0, -14.0, -13.0, -9.0, -3.0, 5.0];
const LABEL_DY: [f64; 12] = [30.0, 27.0, 23.0, 19.0, 16.0, 12.0, 9.0, 3.0, -4.0, -9.0, -14.0, -17.0];
const POLAR_LABEL_DX: [f64; 12] = [15.0, 12.0, 0.0, -12.0, -20.0, -9.0, -5.0, -5.0, 0.0, 0.0, 8.0, 20.0];
const POLAR_LABEL_DY: [f64; 12] = [30.0, 27.0, 42.0, 38.0, 25.0, 12.0, 9.0, 6.0, 5.0, -5.0, -14.0, -24.0];

/// Radius of the horizon circle's reference sphere image.
pub fn horizon_radius() -> f64 {
    CLOCK_RADIUS * tan_deg(ARCTIC / 2.0)
}

/// Radius of the Tropic of Capricorn circle.
pub fn tropic_radius() -> f64 {
    horizon_radius() * tan_deg(ARCTIC / 2.0)
}

/// Dial artwork variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Appearance {
    #[default]
    Current,
    CurrentNoMap,
    Pre2018,
    Original1410,
}

impl Appearance {
    /// Altitude of the circle bounding the twilight band.
    pub const fn twilight_altitude(self) -> f64 {
        match self {
            Appearance::Original1410 => -10.0,
            _ => -18.0,
        }
    }
}

/// A circular arc from `from` to `to`, with the flags an SVG `A` command
/// takes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DialArc {
    pub from: Point,
    pub to: Point,
    pub radius: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

/// Closed outline of one unequal hour: its boundary, the next boundary run
/// backwards, and the rim between them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HourWedge {
    pub edge: DialArc,
    pub adjacent: DialArc,
    pub rim: DialArc,
}

/// Polar angles (degrees) where the horizon crosses the rim, the equator
/// circle and the inner circle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SunriseAngles {
    pub outer: f64,
    pub inner: f64,
    pub equator: f64,
}

/// Daylit region of the hour band: between the horizon arcs, the inner
/// circle (when the rim is the clock rim) and the outer circle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayAreaMask {
    pub outer: [Point; 2],
    pub inner: [Point; 2],
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub horizon_radius: f64,
    /// Whether the outline follows the inner circle between the horizon
    /// crossings.
    pub follows_inner_circle: bool,
}

/// Text arcs for the dawn and dusk labels, with their start offsets along
/// the arc.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TwilightLabels {
    pub dawn: DialArc,
    pub dawn_offset: f64,
    pub dusk: DialArc,
    pub dusk_offset: f64,
}

/// Numeral of one unequal hour.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HourLabel {
    /// Number written, 1–12.
    pub hour: u32,
    pub anchor: Point,
    pub dx: f64,
    pub dy: f64,
    pub font_size: f64,
}

/// Everything latitude-dependent on the unequal-hour band.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnequalHourGeometry {
    pub latitude: f64,
    pub southern: bool,
    pub horizon: Circle,
    pub twilight: Circle,
    /// Radius where the midnight Sun grazes the horizon, polar latitudes only.
    pub midnight_sun_radius: Option<f64>,
    pub sol_noctis: Option<DialArc>,
    pub day_area_mask: Option<DayAreaMask>,
    /// `None` where the horizon misses the hour band.
    pub sunrise: Option<SunriseAngles>,
    /// Boundaries after hours 1 through 11.
    pub hour_arcs: Vec<DialArc>,
    pub hour_wedges: Vec<HourWedge>,
    pub sunrise_label: Option<DialArc>,
    pub sunset_label: Option<DialArc>,
    pub twilight_labels: Option<TwilightLabels>,
    pub hour_labels: Vec<HourLabel>,
    /// Radial-gradient stop (percent) for the dusk band.
    pub dusk_gradient: f64,
    pub hour_stroke: f64,
    pub rise_set_font_size: f64,
}

/// Stereographic image of the altitude circle `altitude` at `latitude`.
///
/// Latitudes closer than half a degree to the equator are treated as 0.5°,
/// where the horizon is a very large but finite circle.
pub fn altitude_circle(latitude: f64, altitude: f64) -> Circle {
    let hr = horizon_radius();
    let lat = latitude.abs().max(0.5);
    let theta1 = -lat - (90.0 + altitude);
    let theta2 = -lat + (90.0 + altitude);
    let (x1, y1) = (hr * sin_deg(theta1), hr * cos_deg(theta1));
    let (x2, y2) = (hr * sin_deg(theta2), hr * cos_deg(theta2));
    let ya = y1 * (hr / (hr - x1));
    let yb = y2 * (hr / (hr - x2));

    Circle::new(0.0, (ya + yb) / 2.0, (yb - ya) / 2.0)
}

/// Inner reference radius when the band's outer edge is shrunk to
/// `outer_radius`.
fn inner_radius_for(outer_radius: f64) -> f64 {
    if outer_radius == CLOCK_RADIUS {
        return tropic_radius();
    }
    let delta_lat = 90.0 - 2.0 * atan_deg(outer_radius / CLOCK_RADIUS);
    tropic_radius() * tan_deg((90.0 + delta_lat) / 2.0)
}

/// Horizon crossings of the circle of radius `radius` about the centre,
/// retried a hair off `radius` when rounding leaves fewer than two.
fn horizon_crossings(horizon: &Circle, radius: f64, nudge: f64) -> Vec<Point> {
    let meet = |r: f64| Circle::new(0.0, 0.0, r).intersect(horizon).points();
    let points = meet(radius);
    if points.len() < 2 {
        meet(radius + nudge)
    } else {
        points
    }
}

fn day_area(
    latitude: f64,
    horizon: &Circle,
    outer_radius: f64,
) -> Option<(DayAreaMask, SunriseAngles)> {
    let inner_radius = inner_radius_for(outer_radius);
    let outer = horizon_crossings(horizon, outer_radius, -1e-6);
    let inner = horizon_crossings(horizon, inner_radius, 1e-6);
    let equator = Circle::new(0.0, 0.0, EQUATOR_RADIUS).intersect(horizon).points();

    if outer.len() < 2 || inner.len() < 2 || latitude.abs() > MAX_UNEVEN_HOUR_LATITUDE {
        return None;
    }
    let equator = equator.first()?;

    let mask = DayAreaMask {
        outer: [outer[0], outer[1]],
        inner: [inner[0], inner[1]],
        outer_radius,
        inner_radius,
        horizon_radius: horizon.radius,
        follows_inner_circle: outer_radius == CLOCK_RADIUS,
    };
    let sunrise = SunriseAngles {
        outer: outer[0].angle(),
        inner: inner[0].angle(),
        equator: equator.angle(),
    };
    Some((mask, sunrise))
}

/// The three reference circles an hour boundary passes through.
struct HourFrame {
    sunrise: SunriseAngles,
    outer: f64,
    inner: f64,
    southern: bool,
}

impl HourFrame {
    /// Boundary `hour` hours into the day, from the rim inwards (or
    /// inwards-out with `reverse`).
    fn arc(&self, hour: f64, reverse: bool) -> DialArc {
        let h = if self.southern { hour } else { 12.0 - hour };
        let at = |sunrise: f64, radius: f64| {
            let sweep = 180.0 + 2.0 * sunrise;
            let angle = sunrise - sweep / 12.0 * h;
            Point::new(radius * cos_deg(angle), radius * sin_deg(angle))
        };
        let p1 = at(self.sunrise.outer, self.outer);
        let p2 = at(self.sunrise.equator, EQUATOR_RADIUS);
        let p3 = at(self.sunrise.inner, self.inner);
        let radius = find_circle_radius(p1.x, p1.y, p2.x, p2.y, p3.x, p3.y);

        if reverse {
            DialArc {
                from: p3,
                to: p1,
                radius,
                large_arc: false,
                sweep: h < 6.0,
            }
        } else {
            DialArc {
                from: p1,
                to: p3,
                radius,
                large_arc: false,
                sweep: h >= 6.0,
            }
        }
    }

    /// A boundary as drawn on its own; southern boundaries run outwards.
    fn boundary(&self, hour: f64, reverse: bool) -> DialArc {
        self.arc(hour, reverse != self.southern)
    }

    fn wedge(&self, hour: u32) -> HourWedge {
        let hour = hour as f64;
        let h = if self.southern { hour } else { 12.0 - hour };
        let edge = self.arc(hour, false);
        let adjacent = self.arc(hour + sign(hour - 6.0), true);
        let rim = DialArc {
            from: adjacent.to,
            to: edge.from,
            radius: self.outer,
            large_arc: false,
            sweep: h >= 6.0,
        };
        HourWedge {
            edge,
            adjacent,
            rim,
        }
    }
}

impl UnequalHourGeometry {
    pub fn new(latitude: f64, appearance: Appearance) -> Self {
        let southern = latitude < 0.0;
        let abs_lat = latitude.abs();
        let horizon = altitude_circle(latitude, 0.0);
        let twilight = altitude_circle(latitude, appearance.twilight_altitude());
        let polar = abs_lat >= ARCTIC;

        let (midnight_sun_radius, sol_noctis) = if polar {
            let msr = horizon.radius + horizon.center.y - 1e-4;
            let r = (msr + CLOCK_RADIUS) / 2.0;
            let arc = DialArc {
                from: Point::new(cos_deg(105.0) * r, sin_deg(105.0) * r),
                to: Point::new(cos_deg(75.0) * r, sin_deg(75.0) * r),
                radius: r,
                large_arc: false,
                sweep: false,
            };
            (Some(msr), Some(arc))
        } else {
            (None, None)
        };

        let outer = midnight_sun_radius.unwrap_or(CLOCK_RADIUS);
        let (day_area_mask, sunrise) = match day_area(latitude, &horizon, outer) {
            Some((mask, angles)) => (Some(mask), Some(angles)),
            None => (None, None),
        };

        let mut geometry = Self {
            latitude,
            southern,
            horizon,
            twilight,
            midnight_sun_radius,
            sol_noctis,
            day_area_mask,
            sunrise,
            hour_arcs: Vec::new(),
            hour_wedges: Vec::new(),
            sunrise_label: None,
            sunset_label: None,
            twilight_labels: None,
            hour_labels: Vec::new(),
            dusk_gradient: dusk_gradient(&horizon, &twilight),
            hour_stroke: 2.0,
            rise_set_font_size: 15.0,
        };

        if let Some(sunrise) = sunrise.filter(|_| abs_lat <= MAX_UNEVEN_HOUR_LATITUDE) {
            let frame = HourFrame {
                sunrise,
                outer,
                inner: inner_radius_for(outer),
                southern,
            };
            geometry.hour_arcs = (1..=11).map(|h| frame.boundary(h as f64, false)).collect();
            geometry.hour_wedges = (1..=11).map(|h| frame.wedge(h)).collect();
            geometry.sunrise_label = Some(frame.boundary(0.5, false));
            geometry.sunset_label = Some(frame.boundary(11.5, true));
            geometry.twilight_labels = Some(twilight_labels(latitude, &horizon, &twilight));

            if abs_lat > ARCTIC {
                geometry.hour_stroke = 1.0;
                geometry.rise_set_font_size = cos_deg(abs_lat) * 37.6;
            }
            geometry.hour_labels = hour_labels(abs_lat, southern, &horizon);
        }

        debug!(
            latitude,
            hours = geometry.hour_arcs.len(),
            polar,
            "unequal-hour geometry recomputed"
        );
        geometry
    }

    /// No unequal hours can be drawn at this latitude.
    pub fn is_degenerate(&self) -> bool {
        self.sunrise.is_none()
    }
}

fn twilight_labels(latitude: f64, horizon: &Circle, twilight: &Circle) -> TwilightLabels {
    let (hy, hr) = (horizon.center.y, horizon.radius);
    let (dy, dr) = (twilight.center.y, twilight.radius);
    let top = (hy - hr + dy - dr) / 2.0;
    let bottom = (hy + hr + dy + dr) / 2.0;
    let r = (hr + dr) / 2.0;

    let left = DialArc {
        from: Point::new(0.0, bottom),
        to: Point::new(0.0, top),
        radius: r,
        large_arc: false,
        sweep: true,
    };
    let right = DialArc {
        from: Point::new(0.0, top),
        to: Point::new(0.0, bottom),
        ..left
    };
    let length = r * PI;
    let shift = CLOCK_RADIUS - cos_deg(latitude) * 70.0;

    if latitude < 0.0 {
        TwilightLabels {
            dawn: right,
            dawn_offset: shift,
            dusk: left,
            dusk_offset: length - shift,
        }
    } else {
        TwilightLabels {
            dawn: left,
            dawn_offset: length - shift,
            dusk: right,
            dusk_offset: shift,
        }
    }
}

fn hour_labels(abs_lat: f64, southern: bool, horizon: &Circle) -> Vec<HourLabel> {
    let anchors = Circle::new(0.0, 0.0, LABEL_RADIUS).intersect(horizon).points();
    if anchors.len() < 2 || abs_lat > MAX_LABEL_LATITUDE {
        return Vec::new();
    }

    let sunrise = anchors[0].angle();
    let step = (180.0 + 2.0 * sunrise) / 12.0;
    let first = -180.0 - sunrise + step;

    (1..=12u32)
        .map(|h| {
            let i = (h - 1) as usize;
            let angle = first + step * i as f64;
            let (mut dx, mut dy, mut font_size) = (LABEL_DX[i], LABEL_DY[i], HOUR_LABEL_FONT_SIZE);

            if abs_lat > ARCTIC {
                dx = match h {
                    1 => cubic(abs_lat, [0.055_555_555_6, -11.555_555_57, 801.541_667_7, -18_521.500_02]),
                    12 => cubic(abs_lat, [0.166_666_666_9, -34.500_000_04, 2_379.958_336, -54_688.875_07]),
                    _ => POLAR_LABEL_DX[i],
                };
                dy = POLAR_LABEL_DY[i];
                font_size = POLAR_HOUR_LABEL_FONT_SIZE;
            } else if abs_lat > LABEL_BLEND_LATITUDE {
                let w = (ARCTIC - abs_lat) / (ARCTIC - LABEL_BLEND_LATITUDE);
                dx = dx * w + POLAR_LABEL_DX[i] * (1.0 - w);
                dy = dy * w + POLAR_LABEL_DY[i] * (1.0 - w);
                font_size = HOUR_LABEL_FONT_SIZE * w + POLAR_HOUR_LABEL_FONT_SIZE * (1.0 - w);
            }
            // only the long numerals near the horizon shrink
            if (4..=9).contains(&h) {
                font_size = HOUR_LABEL_FONT_SIZE;
            }

            HourLabel {
                hour: if southern { 13 - h } else { h },
                anchor: Point::new(cos_deg(angle) * LABEL_RADIUS, sin_deg(angle) * LABEL_RADIUS),
                dx,
                dy,
                font_size,
            }
        })
        .collect()
}

/// `c[0]·x³ + c[1]·x² + c[2]·x + c[3]`.
fn cubic(x: f64, c: [f64; 4]) -> f64 {
    ((c[0] * x + c[1]) * x + c[2]) * x + c[3]
}

/// Stop of the dusk gradient: the narrower the twilight band relative to
/// the horizon circle, the closer to 100 %.
fn dusk_gradient(horizon: &Circle, twilight: &Circle) -> f64 {
    let equator = Circle::new(0.0, 0.0, EQUATOR_RADIUS);
    let on_horizon = equator.intersect(horizon).points().first().copied();
    let on_twilight = equator.intersect(twilight).points().first().copied();

    let span = match (on_horizon, on_twilight) {
        (Some(a), Some(b)) => a.distance(&b),
        _ => horizon.radius / 3.0,
    };
    let span = span.min(horizon.radius - twilight.radius);
    ((1.0 - span / horizon.radius) * 100.0).clamp(80.0, 99.6)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRAGUE: f64 = 50.087;

    fn close(a: &Point, b: &Point, tol: f64) -> bool {
        (a.x - b.x).abs() < tol && (a.y - b.y).abs() < tol
    }

    #[test]
    fn dial_radii() {
        assert!((horizon_radius() - 163.907).abs() < 1e-3);
        assert!((tropic_radius() - 107.462).abs() < 1e-3);
    }

    #[test]
    fn horizon_and_twilight_circles_at_prague() {
        let horizon = altitude_circle(PRAGUE, 0.0);
        assert!((horizon.center.y - 137.111).abs() < 1e-3);
        assert!((horizon.radius - 213.694).abs() < 1e-3);
        let twilight = altitude_circle(PRAGUE, -18.0);
        assert!(twilight.radius < horizon.radius);
        // the equator circle cuts the horizon where the equinox Sun rises
        let meet = Circle::new(0.0, 0.0, EQUATOR_RADIUS).intersect(&horizon).points();
        assert_eq!(meet.len(), 2);
    }

    #[test]
    fn hemispheres_share_circles() {
        assert_eq!(altitude_circle(PRAGUE, 0.0), altitude_circle(-PRAGUE, 0.0));
        // the equator is clamped to half a degree
        assert_eq!(altitude_circle(0.0, 0.0), altitude_circle(0.3, 0.0));
    }

    #[test]
    fn temperate_geometry() {
        let g = UnequalHourGeometry::new(PRAGUE, Appearance::Current);
        let sunrise = g.sunrise.unwrap();
        assert!((sunrise.outer - 31.318).abs() < 1e-3);
        assert!((sunrise.inner + 31.318).abs() < 1e-3);
        assert!(!g.is_degenerate());
        assert_eq!(g.hour_arcs.len(), 11);
        assert_eq!(g.hour_wedges.len(), 11);
        assert_eq!(g.hour_labels.len(), 12);
        assert!(g.sunrise_label.is_some() && g.sunset_label.is_some());
        assert!(g.twilight_labels.is_some());
        assert!(g.midnight_sun_radius.is_none() && g.sol_noctis.is_none());
        assert!(g.day_area_mask.unwrap().follows_inner_circle);
        assert_eq!(g.hour_stroke, 2.0);
        assert_eq!(g.rise_set_font_size, 15.0);
        assert!((80.0..=99.6).contains(&g.dusk_gradient));
    }

    #[test]
    fn hour_arcs_join_rim_to_tropic() {
        let g = UnequalHourGeometry::new(PRAGUE, Appearance::Current);
        for arc in &g.hour_arcs {
            assert!((arc.from.x.hypot(arc.from.y) - CLOCK_RADIUS).abs() < 1e-9);
            assert!((arc.to.x.hypot(arc.to.y) - tropic_radius()).abs() < 1e-9);
            assert!(arc.radius >= arc.from.distance(&arc.to) / 2.0 - 1e-9);
        }
    }

    #[test]
    fn hour_arcs_mirror_about_noon() {
        let g = UnequalHourGeometry::new(PRAGUE, Appearance::Current);
        for i in 0..11 {
            let a = &g.hour_arcs[i];
            let b = &g.hour_arcs[10 - i];
            assert!(close(&a.from, &Point::new(-b.from.x, b.from.y), 1e-9));
            assert!((a.radius - b.radius).abs() < 1e-6 * a.radius.max(1.0));
        }
        // the noon boundary is a straight line up the dial
        let noon = &g.hour_arcs[5];
        assert!(noon.from.x.abs() < 1e-9 && noon.to.x.abs() < 1e-9);
    }

    #[test]
    fn southern_arcs_run_the_other_way() {
        let north = UnequalHourGeometry::new(PRAGUE, Appearance::Current);
        let south = UnequalHourGeometry::new(-PRAGUE, Appearance::Current);
        for i in 0..11 {
            let n = &north.hour_arcs[10 - i];
            let s = &south.hour_arcs[i];
            assert!(close(&s.from, &n.to, 1e-9));
            assert!(close(&s.to, &n.from, 1e-9));
            assert_ne!(s.sweep, n.sweep);
        }
        let numbers: Vec<u32> = south.hour_labels.iter().map(|l| l.hour).collect();
        assert_eq!(numbers, (1..=12).rev().collect::<Vec<_>>());
    }

    #[test]
    fn wedges_close_along_the_rim() {
        let g = UnequalHourGeometry::new(PRAGUE, Appearance::Current);
        let w = &g.hour_wedges[2];
        // hour 3 is bounded by the boundary of hour 2
        assert_eq!(w.edge, g.hour_arcs[2]);
        assert!(close(&w.adjacent.to, &g.hour_arcs[1].from, 1e-9));
        assert!(close(&w.rim.to, &w.edge.from, 1e-12));
        assert_eq!(w.rim.radius, CLOCK_RADIUS);
    }

    #[test]
    fn polar_circle_switches_to_midnight_sun() {
        let g = UnequalHourGeometry::new(70.0, Appearance::Current);
        let msr = g.midnight_sun_radius.unwrap();
        assert!((msr - 234.084).abs() < 1e-3);
        assert!(g.sol_noctis.is_some());
        assert!(!g.day_area_mask.unwrap().follows_inner_circle);
        assert_eq!(g.hour_arcs.len(), 11);
        for arc in &g.hour_arcs {
            assert!((arc.from.x.hypot(arc.from.y) - msr).abs() < 1e-9);
        }
        assert_eq!(g.hour_stroke, 1.0);
        assert!((g.rise_set_font_size - cos_deg(70.0) * 37.6).abs() < 1e-12);
        assert_eq!(g.hour_labels.len(), 12);
        assert_eq!(g.hour_labels[0].font_size, POLAR_HOUR_LABEL_FONT_SIZE);
    }

    #[test]
    fn labels_stop_above_their_latitude() {
        let g = UnequalHourGeometry::new(80.0, Appearance::Current);
        assert!(!g.is_degenerate());
        assert_eq!(g.hour_arcs.len(), 11);
        assert!(g.hour_labels.is_empty());
    }

    #[test]
    fn near_pole_is_degenerate() {
        for lat in [86.5, 89.0, -89.0, 90.0] {
            let g = UnequalHourGeometry::new(lat, Appearance::Current);
            assert!(g.sunrise.is_none(), "{lat}");
            assert!(g.day_area_mask.is_none());
            assert!(g.hour_arcs.is_empty() && g.hour_wedges.is_empty());
            assert!(g.hour_labels.is_empty());
            assert!(g.sunrise_label.is_none() && g.twilight_labels.is_none());
        }
    }

    #[test]
    fn label_offsets_blend_towards_the_pole() {
        let temperate = UnequalHourGeometry::new(40.0, Appearance::Current);
        assert_eq!(temperate.hour_labels[0].dx, LABEL_DX[0]);
        assert_eq!(temperate.hour_labels[0].font_size, HOUR_LABEL_FONT_SIZE);

        let blended = UnequalHourGeometry::new(60.0, Appearance::Current);
        let first = &blended.hour_labels[0];
        assert!(first.dx > LABEL_DX[0] && first.dx < POLAR_LABEL_DX[0]);
        assert!(first.font_size < HOUR_LABEL_FONT_SIZE && first.font_size > POLAR_HOUR_LABEL_FONT_SIZE);
        // mid-day numerals keep their size
        assert_eq!(blended.hour_labels[5].font_size, HOUR_LABEL_FONT_SIZE);
    }

    #[test]
    fn twilight_labels_swap_in_the_south() {
        let north = UnequalHourGeometry::new(PRAGUE, Appearance::Current)
            .twilight_labels
            .unwrap();
        let south = UnequalHourGeometry::new(-PRAGUE, Appearance::Current)
            .twilight_labels
            .unwrap();
        assert_eq!(north.dawn, south.dusk);
        assert_eq!(north.dusk, south.dawn);
        assert!((north.dusk_offset - (CLOCK_RADIUS - cos_deg(PRAGUE) * 70.0)).abs() < 1e-12);
    }

    #[test]
    fn original_appearance_uses_shallower_twilight() {
        let current = UnequalHourGeometry::new(PRAGUE, Appearance::Current);
        let original = UnequalHourGeometry::new(PRAGUE, Appearance::Original1410);
        assert_eq!(current.horizon, original.horizon);
        assert!(original.twilight.radius > current.twilight.radius);
    }

    #[test]
    fn equator_geometry_is_finite() {
        let g = UnequalHourGeometry::new(0.0, Appearance::Current);
        assert_eq!(g.hour_arcs.len(), 11);
        assert!(g.hour_arcs.iter().all(|a| !a.radius.is_nan()));
        assert_eq!(g.dusk_gradient, 99.6);
    }
}
