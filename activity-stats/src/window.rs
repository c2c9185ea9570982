//! Time windows: what the requester picked, and the concrete bounds it resolves to.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RangeParseError, StatsError};

/// "Last N days" windows offered on the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    OneDay,
    SevenDays,
    ThirtyDays,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::OneDay, Preset::SevenDays, Preset::ThirtyDays];

    pub fn from_days(days: u32) -> Option<Self> {
        match days {
            1 => Some(Preset::OneDay),
            7 => Some(Preset::SevenDays),
            30 => Some(Preset::ThirtyDays),
            _ => None,
        }
    }

    pub fn days(self) -> u32 {
        match self {
            Preset::OneDay => 1,
            Preset::SevenDays => 7,
            Preset::ThirtyDays => 30,
        }
    }
}

/// A window as requested, before it is anchored to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowSpec {
    Preset(Preset),
    /// Both calendar days inclusive, as typed by the user.
    Range {
        first_day: NaiveDate,
        last_day: NaiveDate,
    },
}

impl WindowSpec {
    /// Builds a custom range; `last_day` must not precede `first_day`.
    pub fn range(first_day: NaiveDate, last_day: NaiveDate) -> Result<Self, RangeParseError> {
        if last_day < first_day {
            return Err(RangeParseError::EndBeforeStart {
                start: first_day,
                end: last_day,
            });
        }
        Ok(WindowSpec::Range {
            first_day,
            last_day,
        })
    }

    /// Concrete half-open bounds. Presets end at `now` and start exactly `days` earlier;
    /// ranges span midnight UTC of `first_day` to midnight UTC after `last_day`.
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<ResolvedWindow, StatsError> {
        match *self {
            WindowSpec::Preset(preset) => Ok(ResolvedWindow {
                start: now - Duration::days(i64::from(preset.days())),
                end_exclusive: now,
            }),
            WindowSpec::Range {
                first_day,
                last_day,
            } => {
                let day_after = last_day.succ_opt().ok_or_else(|| {
                    StatsError::InvalidWindow(format!("no day after {}", last_day))
                })?;
                Ok(ResolvedWindow {
                    start: midnight_utc(first_day),
                    end_exclusive: midnight_utc(day_after),
                })
            }
        }
    }
}

fn midnight_utc(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}

/// Half-open interval `[start, end_exclusive)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedWindow {
    pub start: DateTime<Utc>,
    pub end_exclusive: DateTime<Utc>,
}

impl ResolvedWindow {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end_exclusive
    }
}

/// Keyboard payload, parsed once at the boundary.
///
/// Wire form: `preset:1`, `preset:7`, `preset:30` or `custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSelector {
    Preset(Preset),
    CustomRequested,
}

impl WindowSelector {
    pub const CUSTOM: &'static str = "custom";
    const PRESET_PREFIX: &'static str = "preset:";
}

impl FromStr for WindowSelector {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == Self::CUSTOM {
            return Ok(WindowSelector::CustomRequested);
        }
        s.strip_prefix(Self::PRESET_PREFIX)
            .and_then(|days| days.parse::<u32>().ok())
            .and_then(Preset::from_days)
            .map(WindowSelector::Preset)
            .ok_or_else(|| StatsError::InvalidSelector(s.to_string()))
    }
}

impl fmt::Display for WindowSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowSelector::Preset(p) => write!(f, "{}{}", Self::PRESET_PREFIX, p.days()),
            WindowSelector::CustomRequested => f.write_str(Self::CUSTOM),
        }
    }
}
