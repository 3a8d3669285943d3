use crate::types::StationId;
use serde::{Deserialize, Serialize};

/// A docking station. `short_name` identifies the station in trip records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub short_name: StationId,
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub capacity: Option<u32>,
}

impl Station {
    pub fn new(short_name: impl Into<StationId>, lat: f64, lon: f64) -> Self {
        Self {
            short_name: short_name.into(),
            name: None,
            lat,
            lon,
            capacity: None,
        }
    }
}
