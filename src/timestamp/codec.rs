use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::foundation::error::{RadarError, RadarResult};

const STAMP_FIELD: usize = 2;
const STAMP_FORMAT: &str = "%Y%m%d%H%M";

/// Sortable key for a sweep identifier.
///
/// The third `.`-separated field is a fixed-width `YYYYMMDDHHmm` stamp, so plain string order is
/// chronological order. Identifiers with fewer fields sort by their full text.
pub fn sort_key(identifier: &str) -> &str {
    identifier.split('.').nth(STAMP_FIELD).unwrap_or(identifier)
}

/// A parsed capture time in both UTC and the configured local zone.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureTime {
    pub identifier: String,
    pub timezone: String,
    pub utc: DateTime<Utc>,
    pub local: DateTime<Tz>,
}

impl CaptureTime {
    pub fn utc_label(&self) -> String {
        self.utc.format("%Y-%m-%d %H:%M UTC").to_string()
    }

    pub fn local_label(&self) -> String {
        self.local.format("%Y-%m-%d %H:%M %Z").to_string()
    }
}

/// Parse the embedded stamp of `identifier` as UTC and convert it to `timezone` (IANA name).
pub fn parse_capture_time(identifier: &str, timezone: &str) -> RadarResult<CaptureTime> {
    let stamp = identifier.split('.').nth(STAMP_FIELD).ok_or_else(|| {
        RadarError::timestamp(format!(
            "identifier '{identifier}' has no timestamp field"
        ))
    })?;

    let naive = NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT)
        .map_err(|e| RadarError::timestamp(format!("'{stamp}' is not YYYYMMDDHHmm: {e}")))?;
    let tz: Tz = timezone
        .parse()
        .map_err(|e| RadarError::timestamp(format!("unknown timezone '{timezone}': {e}")))?;

    let utc = naive.and_utc();
    Ok(CaptureTime {
        identifier: identifier.to_string(),
        timezone: timezone.to_string(),
        utc,
        local: utc.with_timezone(&tz),
    })
}

/// Human-readable record of the newest frame's capture time.
#[derive(Clone, Debug, PartialEq)]
pub enum CaptureNote {
    Parsed(CaptureTime),
    /// The stamp could not be parsed; the note carries the raw identifier instead.
    Degraded { identifier: String, reason: String },
}

impl CaptureNote {
    /// Build a note for `identifier`. Parse failures degrade; they are never returned as errors.
    pub fn from_identifier(identifier: &str, timezone: &str) -> Self {
        match parse_capture_time(identifier, timezone) {
            Ok(time) => {
                tracing::info!(
                    utc = %time.utc_label(),
                    local = %time.local_label(),
                    "last radar image"
                );
                Self::Parsed(time)
            }
            Err(err) => {
                tracing::error!(identifier, error = %err, "error parsing timestamp");
                Self::Degraded {
                    identifier: identifier.to_string(),
                    reason: err.to_string(),
                }
            }
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// File contents: the note text, newline-terminated.
    pub fn file_contents(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for CaptureNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsed(time) => write!(
                f,
                "UTC Time: {}; Local Time ({}): {}",
                time.utc_label(),
                time.timezone,
                time.local_label()
            ),
            Self::Degraded { identifier, reason } => write!(
                f,
                "Last file: {identifier}\nError parsing timestamp: {reason}"
            ),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timestamp/codec.rs"]
mod tests;
