use crate::index::BucketIndex;
use crate::window::WindowRadius;
use common::types::station::Station;
use common::types::time::TimeFilter;
use common::types::StationId;
use hashbrown::HashMap;
use log::debug;
use serde::Serialize;

/// Trip counts of a single station. `total_traffic` is always `departures + arrivals`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
pub struct Traffic {
    departures: u32,
    arrivals: u32,
    total_traffic: u32,
}

impl Traffic {
    pub fn new(departures: u32, arrivals: u32) -> Self {
        Self {
            departures,
            arrivals,
            total_traffic: departures + arrivals,
        }
    }

    pub fn departures(&self) -> u32 {
        self.departures
    }

    pub fn arrivals(&self) -> u32 {
        self.arrivals
    }

    pub fn total_traffic(&self) -> u32 {
        self.total_traffic
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationTraffic {
    #[serde(flatten)]
    pub station: Station,
    #[serde(flatten)]
    pub traffic: Traffic,
}

/// Counts how often each station id occurs
pub fn count_by_station<'a>(ids: impl Iterator<Item = &'a StationId>) -> HashMap<&'a str, u32> {
    ids.fold(HashMap::new(), |mut counts, id| {
        *counts.entry(id.as_str()).or_insert(0) += 1;
        counts
    })
}

pub fn max_total_traffic(stations: &[StationTraffic]) -> u32 {
    stations.iter()
        .map(|s| s.traffic.total_traffic())
        .max()
        .unwrap_or(0)
}

/// Computes station traffic for a time filter on top of a prebuilt [`BucketIndex`].
pub struct TrafficAggregator {
    index: BucketIndex,
    radius: WindowRadius,
}

impl TrafficAggregator {
    pub fn new(index: BucketIndex, radius: WindowRadius) -> Self {
        Self { index, radius }
    }

    pub fn index(&self) -> &BucketIndex {
        &self.index
    }

    pub fn radius(&self) -> WindowRadius {
        self.radius
    }

    /// Returns one record per input station, in input order. Stations without trips in the window
    /// get zero traffic. The stations themselves are left untouched, so repeated calls with the
    /// same filter always give the same result.
    pub fn compute_station_traffic(&self, stations: &[Station], filter: TimeFilter) -> Vec<StationTraffic> {
        let departures = count_by_station(
            self.index.departures_in(filter, self.radius).map(|trip| &trip.start_station_id)
        );
        let arrivals = count_by_station(
            self.index.arrivals_in(filter, self.radius).map(|trip| &trip.end_station_id)
        );

        debug!(
            target: "traffic",
            "Counted departures at {} and arrivals at {} stations for filter {:?}",
            departures.len(), arrivals.len(), filter
        );

        stations.iter()
            .map(|station| {
                let id = station.short_name.as_str();
                StationTraffic {
                    station: station.clone(),
                    traffic: Traffic::new(
                        departures.get(id).copied().unwrap_or(0),
                        arrivals.get(id).copied().unwrap_or(0),
                    ),
                }
            })
            .collect()
    }
}
