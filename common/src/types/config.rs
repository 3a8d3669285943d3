use chrono::FixedOffset;
use serde::Deserialize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use crate::types::config::dataset::Dataset;

pub mod dataset;

pub const DEFAULT_WINDOW_RADIUS_MINUTES: u16 = 60;
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1")]
    Version1 {
        stations: Dataset,
        trips: Dataset,
        #[serde(default)]
        window: WindowConfig,
        #[serde(default)]
        timestamps: TimestampConfig,
        #[serde(default)]
        server: ServerConfig,
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WindowConfig {
    #[serde(default = "default_radius")]
    pub radius_minutes: u16,
}

fn default_radius() -> u16 {
    DEFAULT_WINDOW_RADIUS_MINUTES
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { radius_minutes: DEFAULT_WINDOW_RADIUS_MINUTES }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

/// How the minute of day is read from trip timestamps.
/// Either `recorded` (wall-clock time as written in the data) or `offset: "-05:00"`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(
    untagged,
    expecting = "Invalid timestamp handling. Specify either `recorded` or a fixed offset with `offset: \"-05:00\"`"
)]
pub enum TimestampConfig {
    FixedOffset { offset: UtcOffset },
    Recorded(RecordedKeyword),
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub enum RecordedKeyword {
    #[serde(rename = "recorded")]
    Recorded,
}

impl Default for TimestampConfig {
    fn default() -> Self {
        TimestampConfig::Recorded(RecordedKeyword::Recorded)
    }
}

/// A fixed UTC offset, written like "+01:00"
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(try_from = "String")]
pub struct UtcOffset(pub FixedOffset);

#[derive(thiserror::Error, Debug)]
pub struct UtcOffsetError(String);

impl Display for UtcOffsetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Wrong offset format '{}'. Example of valid format: -05:00", self.0)
    }
}

impl TryFrom<String> for UtcOffset {
    type Error = UtcOffsetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        FixedOffset::from_str(&value)
            .map(UtcOffset)
            .map_err(|_| UtcOffsetError(value))
    }
}
