use std::fmt;
use std::fmt::Formatter;
use crate::types::StationId;

#[derive(thiserror::Error, Debug)]
pub struct DuplicateStationError(pub StationId);

impl fmt::Display for DuplicateStationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Station {} is listed more than once", self.0)
    }
}
