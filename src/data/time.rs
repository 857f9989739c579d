//! Duration and timestamp formatting for the control table.
//!
//! The controller reports durations as whole seconds and instants as
//! seconds since the Unix epoch. Both are rendered as fixed-shape text.

use chrono::{DateTime, Local, SecondsFormat, TimeZone};
use serde::Deserialize;
use thiserror::Error;

/// Largest duration whose hour field still fits in two digits.
pub const TWO_DIGIT_HOURS_MAX: i64 = 99 * 3600 + 59 * 60 + 59;

/// Errors produced when coercing raw values into seconds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    /// The value is not a finite number.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Coerce a numeric string (integer or decimal) into whole seconds.
///
/// Decimals are truncated toward zero. Non-finite values are rejected.
pub fn parse_seconds(text: &str) -> Result<i64, TimeError> {
    let text = text.trim();
    if let Ok(value) = text.parse::<i64>() {
        return Ok(value);
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value.trunc() as i64),
        _ => Err(TimeError::InvalidInput(text.to_string())),
    }
}

/// Format a duration in seconds as `HH:MM:SS`.
///
/// Negative durations clamp to zero. The hour field is padded to two
/// digits and grows past that once the input exceeds [`TWO_DIGIT_HOURS_MAX`].
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// How epoch timestamps are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpochStyle {
    /// Full ISO-8601 timestamp with offset.
    #[default]
    Iso,
    /// Time of day only (`HH:MM:SS`).
    #[serde(alias = "time-of-day")]
    Time,
}

impl EpochStyle {
    /// Switch to the other style.
    pub fn toggle(self) -> Self {
        match self {
            EpochStyle::Iso => EpochStyle::Time,
            EpochStyle::Time => EpochStyle::Iso,
        }
    }

    /// Returns the display label for this style.
    pub fn label(&self) -> &'static str {
        match self {
            EpochStyle::Iso => "iso",
            EpochStyle::Time => "time",
        }
    }
}

/// Time zone used when rendering epoch timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// The host's local time zone.
    #[default]
    Local,
    /// Coordinated Universal Time.
    Utc,
}

/// Formats epoch timestamps according to a zone and style preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeFormatter {
    pub zone: Zone,
    pub style: EpochStyle,
}

impl TimeFormatter {
    pub fn new(zone: Zone, style: EpochStyle) -> Self {
        Self { zone, style }
    }

    /// Format seconds since the Unix epoch.
    ///
    /// Returns `"-"` for timestamps chrono cannot represent.
    pub fn format_epoch(&self, epoch_seconds: i64) -> String {
        let Some(instant) = DateTime::from_timestamp(epoch_seconds, 0) else {
            return "-".to_string();
        };
        match self.zone {
            Zone::Local => render_instant(instant.with_timezone(&Local), self.style),
            Zone::Utc => render_instant(instant, self.style),
        }
    }

    /// Format a duration; see [`format_duration`].
    pub fn format_duration(&self, seconds: i64) -> String {
        format_duration(seconds)
    }
}

fn render_instant<Tz: TimeZone>(instant: DateTime<Tz>, style: EpochStyle) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match style {
        EpochStyle::Iso => instant.to_rfc3339_opts(SecondsFormat::Secs, true),
        EpochStyle::Time => instant.format("%H:%M:%S").to_string(),
    }
}

/// Convenience wrapper returning the ISO-8601 UTC rendering of an epoch.
pub fn format_epoch_utc(epoch_seconds: i64) -> String {
    TimeFormatter::new(Zone::Utc, EpochStyle::Iso).format_epoch(epoch_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_known_values() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(3661), "01:01:01");
        assert_eq!(format_duration(86399), "23:59:59");
    }

    #[test]
    fn test_format_duration_negative_clamps_to_zero() {
        assert_eq!(format_duration(-1), "00:00:00");
        assert_eq!(format_duration(i64::MIN), "00:00:00");
    }

    #[test]
    fn test_format_duration_hour_overflow_boundary() {
        assert_eq!(format_duration(TWO_DIGIT_HOURS_MAX), "99:59:59");
        assert_eq!(format_duration(TWO_DIGIT_HOURS_MAX + 1), "100:00:00");
    }

    #[test]
    fn test_format_duration_monotonic_below_overflow() {
        let mut previous = format_duration(0);
        for seconds in 1..=TWO_DIGIT_HOURS_MAX {
            let current = format_duration(seconds);
            assert!(
                previous < current,
                "{} ({}) should sort before {}",
                previous,
                seconds - 1,
                current
            );
            previous = current;
        }
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("3600"), Ok(3600));
        assert_eq!(parse_seconds(" 42 "), Ok(42));
        assert_eq!(parse_seconds("90.9"), Ok(90));
        assert_eq!(parse_seconds("-5"), Ok(-5));
    }

    #[test]
    fn test_parse_seconds_rejects_garbage() {
        for input in ["abc", "NaN", "inf", ""] {
            let err = parse_seconds(input).unwrap_err();
            assert_eq!(err, TimeError::InvalidInput(input.to_string()));
        }
    }

    #[test]
    fn test_format_epoch_iso_utc() {
        assert_eq!(format_epoch_utc(0), "1970-01-01T00:00:00Z");
        assert_eq!(format_epoch_utc(1_700_000_000), "2023-11-14T22:13:20Z");
    }

    #[test]
    fn test_format_epoch_time_of_day() {
        let formatter = TimeFormatter::new(Zone::Utc, EpochStyle::Time);
        assert_eq!(formatter.format_epoch(1_700_000_000), "22:13:20");
    }

    #[test]
    fn test_format_epoch_out_of_range() {
        assert_eq!(format_epoch_utc(i64::MAX), "-");
    }

    #[test]
    fn test_epoch_style_toggle() {
        assert_eq!(EpochStyle::Iso.toggle(), EpochStyle::Time);
        assert_eq!(EpochStyle::Time.toggle(), EpochStyle::Iso);
    }
}
