use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::fmt::{Display, Formatter};

pub mod config;
pub mod errors;
pub mod station;
pub mod time;
pub mod trip;

/// Identifies a station. Trip records reference stations by their `short_name`.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub String);

impl StationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StationId {
    fn from(value: &str) -> Self {
        StationId(value.to_string())
    }
}

impl From<String> for StationId {
    fn from(value: String) -> Self {
        StationId(value)
    }
}

impl Borrow<str> for StationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for StationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
