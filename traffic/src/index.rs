use crate::policy::MinuteOfDayPolicy;
use common::types::time::{MinuteOfDay, MINUTES_PER_DAY};
use common::types::trip::Trip;
use log::debug;

/// Position of a trip in [`BucketIndex::trips`]
pub type TripIdx = usize;

/// One list of trips per minute of the day
#[derive(Debug, Clone, PartialEq)]
pub struct MinuteBuckets {
    pub(crate) buckets: Vec<Vec<TripIdx>>,
}

impl MinuteBuckets {
    fn empty() -> Self {
        Self { buckets: vec![Vec::new(); MINUTES_PER_DAY as usize] }
    }

    fn push(&mut self, minute: MinuteOfDay, trip: TripIdx) {
        self.buckets[minute.index()].push(trip);
    }

    pub fn bucket(&self, minute: MinuteOfDay) -> &[TripIdx] {
        &self.buckets[minute.index()]
    }

    /// Number of trips over all buckets
    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}

/// Trips sorted into departure and arrival buckets by minute of day. Once built the index is
/// read-only and can be shared between any number of readers.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketIndex {
    trips: Vec<Trip>,
    // Keyed by start minute
    departures: MinuteBuckets,
    // Keyed by end minute
    arrivals: MinuteBuckets,
}

impl BucketIndex {
    pub fn build<P>(trips: Vec<Trip>, policy: &P) -> Self
    where
        P: MinuteOfDayPolicy + ?Sized,
    {
        let mut departures = MinuteBuckets::empty();
        let mut arrivals = MinuteBuckets::empty();

        for (idx, trip) in trips.iter().enumerate() {
            departures.push(policy.minute_of_day(&trip.started_at), idx);
            arrivals.push(policy.minute_of_day(&trip.ended_at), idx);
        }

        debug!(target: "traffic", "Indexed {} trips into {} minute buckets", trips.len(), MINUTES_PER_DAY);

        Self { trips, departures, arrivals }
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn departures(&self) -> &MinuteBuckets {
        &self.departures
    }

    pub fn arrivals(&self) -> &MinuteBuckets {
        &self.arrivals
    }

    pub(crate) fn trip(&self, idx: TripIdx) -> &Trip {
        &self.trips[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::RecordedLocalTime;
    use crate::tests::{minute, spread_trips, three_trips};

    #[test]
    fn test_build_three_trips() {
        let index = BucketIndex::build(three_trips(), &RecordedLocalTime);

        assert_eq!(index.len(), 3);
        assert_eq!(index.departures().bucket(minute(8, 0)), &[0]);
        assert_eq!(index.departures().bucket(minute(8, 5)), &[1]);
        assert_eq!(index.departures().bucket(minute(23, 58)), &[2]);
        assert_eq!(index.arrivals().bucket(minute(8, 10)), &[0]);
        assert_eq!(index.arrivals().bucket(minute(8, 50)), &[1]);
        assert_eq!(index.arrivals().bucket(minute(0, 5)), &[2]);
        assert!(index.departures().bucket(minute(0, 5)).is_empty());
    }

    #[test]
    fn test_every_trip_in_exactly_one_bucket() {
        let trips = spread_trips(5_000);
        let index = BucketIndex::build(trips.clone(), &RecordedLocalTime);

        assert_eq!(index.departures().total(), trips.len());
        assert_eq!(index.arrivals().total(), trips.len());

        for buckets in [index.departures(), index.arrivals()] {
            let mut seen: Vec<TripIdx> = buckets.buckets.iter().flatten().copied().collect();
            seen.sort();
            assert_eq!(seen, (0..trips.len()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_bucket_keeps_input_order() {
        let mut trips = three_trips();
        trips.push(trips[0].clone());
        trips.push(trips[0].clone());
        let index = BucketIndex::build(trips, &RecordedLocalTime);

        assert_eq!(index.departures().bucket(minute(8, 0)), &[0, 3, 4]);
    }

    #[test]
    fn test_empty_index() {
        let index = BucketIndex::build(vec![], &RecordedLocalTime);

        assert!(index.is_empty());
        assert_eq!(index.departures().buckets.len(), 1440);
        assert_eq!(index.arrivals().total(), 0);
    }
}
