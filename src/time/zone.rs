// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time zones and local wall-clock fields.
//!
//! The hands of the clock are driven by local wall time, so every frame
//! needs the local date, the hour, and the part of the UTC offset that is
//! daylight-saving time (a gear train cannot follow a DST switch; mechanical
//! modes remove it again).

use crate::error::{OrlojError, Result};
use chrono::{
    DateTime, Datelike, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, Offset,
    TimeZone, Timelike, Utc,
};
use chrono_tz::{OffsetComponents, Tz};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The zone a clock face is set to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockZone {
    /// An IANA zone with its DST rules.
    Iana(Tz),
    /// A fixed offset from UTC, never observing DST.
    Fixed(FixedOffset),
    /// Local Mean Time of a meridian: 15° of longitude per hour.
    LocalMean { longitude: f64 },
}

/// Wall-clock fields of an instant in a [`ClockZone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WallTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// Total offset from UTC, DST included.
    pub utc_offset_seconds: i32,
    /// DST share of the offset (zero outside daylight-saving time).
    pub dst_offset_seconds: i32,
}

impl ClockZone {
    /// Parse a zone name.
    ///
    /// Accepts IANA names (`"Europe/Prague"`), `"LMT"` (Local Mean Time at
    /// `longitude`), `"UT"`/`"UTC"` and fixed offsets written `"UT+01:00"`,
    /// `"UTC-5"` or `"UT+05:30"`.
    pub fn parse(name: &str, longitude: f64) -> Result<Self> {
        let trimmed = name.trim();
        match trimmed {
            "LMT" => return Ok(ClockZone::LocalMean { longitude }),
            "UT" | "UTC" => return Ok(ClockZone::Fixed(utc_offset())),
            _ => {}
        }

        let rest = trimmed
            .strip_prefix("UTC")
            .or_else(|| trimmed.strip_prefix("UT"));
        if let Some(offset) = rest {
            return parse_offset(offset)
                .map(ClockZone::Fixed)
                .ok_or_else(|| OrlojError::UnknownZone(name.to_string()));
        }

        trimmed
            .parse::<Tz>()
            .map(ClockZone::Iana)
            .map_err(|_| OrlojError::UnknownZone(name.to_string()))
    }

    /// Offset of Local Mean Time at `longitude`, rounded to the second.
    pub fn local_mean_offset(longitude: f64) -> FixedOffset {
        let seconds = (longitude / 15.0 * 3600.0).round() as i32;
        FixedOffset::east_opt(seconds.clamp(-86_399, 86_399)).unwrap_or_else(utc_offset)
    }

    /// UTC offset and its DST share at `instant`, in seconds.
    pub fn offsets(&self, instant: &DateTime<Utc>) -> (i32, i32) {
        match self {
            ClockZone::Iana(tz) => {
                let offset = tz.offset_from_utc_datetime(&instant.naive_utc());
                let total = offset.fix().local_minus_utc();
                let dst = offset.dst_offset().num_seconds() as i32;
                (total, dst)
            }
            ClockZone::Fixed(fixed) => (fixed.local_minus_utc(), 0),
            ClockZone::LocalMean { longitude } => {
                (Self::local_mean_offset(*longitude).local_minus_utc(), 0)
            }
        }
    }

    /// Local wall-clock fields of `instant`.
    pub fn wall_time(&self, instant: &DateTime<Utc>) -> WallTime {
        let (utc_offset_seconds, dst_offset_seconds) = self.offsets(instant);
        let local = instant.naive_utc() + Duration::seconds(utc_offset_seconds as i64);
        WallTime {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            second: local.second(),
            utc_offset_seconds,
            dst_offset_seconds,
        }
    }

    /// The instant of local midnight starting `year-month-day`.
    ///
    /// On an ambiguous midnight the earlier instant wins; when midnight falls
    /// into a DST gap the first valid local time after the gap is used.
    pub fn local_midnight(&self, year: i32, month: u32, day: u32) -> Result<DateTime<Utc>> {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or(OrlojError::OutOfRange { year })?;
        self.resolve_local(naive).ok_or(OrlojError::OutOfRange { year })
    }

    fn resolve_local(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            ClockZone::Iana(tz) => {
                // skip forward through a gap a minute at a time
                (0..=180).find_map(|m| {
                    match tz.from_local_datetime(&(naive + Duration::minutes(m))) {
                        LocalResult::Single(t) => Some(t.with_timezone(&Utc)),
                        LocalResult::Ambiguous(early, _) => Some(early.with_timezone(&Utc)),
                        LocalResult::None => None,
                    }
                })
            }
            ClockZone::Fixed(fixed) => fixed
                .from_local_datetime(&naive)
                .single()
                .map(|t| t.with_timezone(&Utc)),
            ClockZone::LocalMean { longitude } => Self::local_mean_offset(*longitude)
                .from_local_datetime(&naive)
                .single()
                .map(|t| t.with_timezone(&Utc)),
        }
    }
}

impl fmt::Display for ClockZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockZone::Iana(tz) => write!(f, "{}", tz.name()),
            ClockZone::Fixed(fixed) => {
                let secs = fixed.local_minus_utc();
                if secs == 0 {
                    return write!(f, "UT");
                }
                let sign = if secs < 0 { '-' } else { '+' };
                let abs = secs.abs();
                write!(f, "UT{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
            }
            ClockZone::LocalMean { .. } => write!(f, "LMT"),
        }
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// `"+01:00"`, `"-5"`, `"+05:30"` → offset. Empty means UTC.
fn parse_offset(text: &str) -> Option<FixedOffset> {
    if text.is_empty() {
        return Some(utc_offset());
    }
    let (sign, body) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    let (hours, minutes) = match body.split_once(':') {
        Some((h, m)) => (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?),
        None => (body.parse::<i32>().ok()?, 0),
    };
    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
