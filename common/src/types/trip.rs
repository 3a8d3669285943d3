use crate::types::time::RecordedTimestamp;
use crate::types::StationId;

/// A single bike trip. Trips are immutable once imported.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_station_id: StationId,
    pub end_station_id: StationId,
    pub started_at: RecordedTimestamp,
    pub ended_at: RecordedTimestamp,
}

impl Trip {
    pub fn new(
        start_station_id: impl Into<StationId>,
        end_station_id: impl Into<StationId>,
        started_at: RecordedTimestamp,
        ended_at: RecordedTimestamp,
    ) -> Self {
        Self {
            start_station_id: start_station_id.into(),
            end_station_id: end_station_id.into(),
            started_at,
            ended_at,
        }
    }
}
