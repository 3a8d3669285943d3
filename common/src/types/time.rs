use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const MINUTES_PER_DAY: u16 = 1440;

/// The value a slider reports when no time is selected
pub const ANY_TIME_SLIDER_VALUE: i32 = -1;

/// A minute of the day, always within 0..=1439
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    pub const MIDNIGHT: MinuteOfDay = MinuteOfDay(0);

    pub fn from_hm(hours: u32, minutes: u32) -> Result<Self, TimeError> {
        Self::try_from((hours * 60 + minutes) as i32)
    }

    pub fn get(&self) -> u16 {
        self.0
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<i32> for MinuteOfDay {
    type Error = TimeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if (0..MINUTES_PER_DAY as i32).contains(&value) {
            Ok(Self(value as u16))
        } else {
            Err(TimeError::MinuteOutOfRange(value))
        }
    }
}

impl From<NaiveTime> for MinuteOfDay {
    fn from(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }
}

impl Display for MinuteOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Restricts traffic to a window around a minute of the day, or to no window at all.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default)]
pub enum TimeFilter {
    #[default]
    Any,
    Around(MinuteOfDay),
}

impl TimeFilter {
    /// Reads a raw slider position. `-1` means "any time".
    pub fn from_slider(value: i32) -> Result<Self, TimeError> {
        match value {
            ANY_TIME_SLIDER_VALUE => Ok(TimeFilter::Any),
            value => Ok(TimeFilter::Around(MinuteOfDay::try_from(value)?)),
        }
    }

    pub fn to_slider(&self) -> i32 {
        match self {
            TimeFilter::Any => ANY_TIME_SLIDER_VALUE,
            TimeFilter::Around(minute) => minute.get() as i32,
        }
    }

    pub fn is_filtered(&self) -> bool {
        matches!(self, TimeFilter::Around(_))
    }
}

impl Serialize for TimeFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(self.to_slider())
    }
}

/// A timestamp as it was written in the source data. Timestamps without an offset are kept as
/// naive wall-clock times, they are never assumed to be UTC.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RecordedTimestamp {
    Local(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
}

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%#z"];
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

impl FromStr for RecordedTimestamp {
    type Err = TimeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Ok(RecordedTimestamp::Offset(dt));
        }
        if let Some(dt) = OFFSET_FORMATS.iter()
            .find_map(|format| DateTime::parse_from_str(value, format).ok()) {
            return Ok(RecordedTimestamp::Offset(dt));
        }

        LOCAL_FORMATS.iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .map(RecordedTimestamp::Local)
            .ok_or_else(|| TimeError::InvalidTimestamp(value.to_string()))
    }
}

impl Display for RecordedTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RecordedTimestamp::Local(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            RecordedTimestamp::Offset(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TimeError {
    MinuteOutOfRange(i32),
    InvalidTimestamp(String),
    RadiusOutOfRange(i32),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TimeError::MinuteOutOfRange(value) => write!(f, "Minute of day {} is outside of 0..=1439 (use -1 for any time)", value),
            TimeError::InvalidTimestamp(value) => write!(f, "Could not parse timestamp '{}'", value),
            TimeError::RadiusOutOfRange(value) => write!(f, "Window radius {} is outside of 1..=720 minutes", value),
        }
    }
}
