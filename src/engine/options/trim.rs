//! Trim range: cut the input to a sub-range before converting.

use chrono::{NaiveTime, TimeDelta, Timelike};
use std::fmt;
use std::str::FromStr;

use super::Arg;
use crate::engine::error::OptionError;

/// A validated `HH:MM:SS` time, keeping the text the user typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimTime {
    text: String,
    time: NaiveTime,
}

impl TrimTime {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn seconds(&self) -> u32 {
        self.time.num_seconds_from_midnight()
    }
}

/// Two ASCII digits, a colon, two digits, a colon, two digits
fn matches_hms_pattern(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 8
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b':',
            _ => b.is_ascii_digit(),
        })
}

impl FromStr for TrimTime {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || OptionError::InvalidTrimFormat(s.to_string());
        if !matches_hms_pattern(s) {
            return Err(invalid());
        }

        let field = |range: std::ops::Range<usize>| s[range].parse::<u32>().map_err(|_| invalid());
        let time = NaiveTime::from_hms_opt(field(0..2)?, field(3..5)?, field(6..8)?)
            .ok_or_else(invalid)?;

        Ok(Self {
            text: s.to_string(),
            time,
        })
    }
}

impl fmt::Display for TrimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Format a non-negative span as `HH:MM:SS`
pub fn format_hms(delta: TimeDelta) -> String {
    let total = delta.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Optional start and end of the kept range. Both empty means no trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trim {
    start: Option<TrimTime>,
    end: Option<TrimTime>,
}

impl Trim {
    /// Accept the raw text of the two trim fields. Empty text leaves that end open.
    pub fn new(start: &str, end: &str) -> Result<Self, OptionError> {
        let parse = |text: &str| -> Result<Option<TrimTime>, OptionError> {
            if text.trim().is_empty() {
                Ok(None)
            } else {
                text.parse().map(Some)
            }
        };

        let trim = Self {
            start: parse(start)?,
            end: parse(end)?,
        };

        if let (Some(start), Some(end)) = (&trim.start, &trim.end) {
            if end.time <= start.time {
                tracing::warn!(start = %start, end = %end, "rejected trim range");
                return Err(OptionError::TrimEndBeforeStart {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
        }

        Ok(trim)
    }

    pub fn start(&self) -> Option<&TrimTime> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&TrimTime> {
        self.end.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Length of the kept range, only known when both ends are set
    pub fn duration(&self) -> Option<TimeDelta> {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => Some(end.time.signed_duration_since(start.time)),
            _ => None,
        }
    }

    /// `-ss START` then `-t DURATION`.
    ///
    /// With only an end set, the end text itself is passed to `-t`, which ffmpeg
    /// reads as a duration from the beginning. That matches "end" only because
    /// the range starts at zero.
    pub fn to_args(&self) -> Vec<Arg> {
        let mut args = Vec::new();
        if let Some(start) = &self.start {
            args.push(Arg::new("-ss", start.as_str()));
        }
        match (self.duration(), &self.end) {
            (Some(duration), _) => args.push(Arg::new("-t", format_hms(duration))),
            (None, Some(end)) => args.push(Arg::new("-t", end.as_str())),
            (None, None) => {}
        }
        args
    }
}
