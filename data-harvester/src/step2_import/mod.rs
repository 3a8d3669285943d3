mod stations;
mod trips;

use common::types::errors::DuplicateStationError;
use std::fmt::Display;
use std::{fmt, io};

pub use stations::import_stations;
pub use trips::{import_trips, TripImport, TRIP_COLUMNS};

#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    File(#[from] io::Error),
    Json(#[from] serde_json::Error),
    Polars(#[from] polars::error::PolarsError),
    DuplicateStation(#[from] DuplicateStationError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let err: &dyn Display = match self {
            ImportError::File(err) => err,
            ImportError::Json(err) => err,
            ImportError::Polars(err) => err,
            ImportError::DuplicateStation(err) => err,
        };
        write!(f, "{}", err)
    }
}
