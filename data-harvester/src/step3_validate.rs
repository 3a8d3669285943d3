use common::types::station::Station;
use common::types::trip::Trip;
use hashbrown::HashSet;
use log::warn;

/// Trip endpoints that do not belong to any known station. Such trips are kept, they just do not
/// show up in the traffic of any station.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub unknown_start_stations: usize,
    pub unknown_end_stations: usize,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.unknown_start_stations == 0 && self.unknown_end_stations == 0
    }
}

pub fn validate_station_references(stations: &[Station], trips: &[Trip]) -> ValidationReport {
    let known: HashSet<&str> = stations.iter().map(|s| s.short_name.as_str()).collect();
    let is_unknown = |id: &str| !known.contains(id);

    let report = ValidationReport {
        unknown_start_stations: trips.iter().filter(|t| is_unknown(t.start_station_id.as_str())).count(),
        unknown_end_stations: trips.iter().filter(|t| is_unknown(t.end_station_id.as_str())).count(),
    };

    if !report.is_clean() {
        warn!(
            target: "validation",
            "{} trips start and {} trips end at stations missing from the station dataset",
            report.unknown_start_stations, report.unknown_end_stations
        );
    }

    report
}
