use chrono::FixedOffset;
use common::types::config::TimestampConfig;
use common::types::time::{MinuteOfDay, RecordedTimestamp};

/// Decides which minute of the day a recorded timestamp falls into.
pub trait MinuteOfDayPolicy {
    fn minute_of_day(&self, timestamp: &RecordedTimestamp) -> MinuteOfDay;
}

/// Uses the wall-clock time exactly as it was recorded. Timestamps carrying an offset are read in
/// their own offset, so nothing is normalized to UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordedLocalTime;

impl MinuteOfDayPolicy for RecordedLocalTime {
    fn minute_of_day(&self, timestamp: &RecordedTimestamp) -> MinuteOfDay {
        match timestamp {
            RecordedTimestamp::Local(dt) => MinuteOfDay::from(dt.time()),
            RecordedTimestamp::Offset(dt) => MinuteOfDay::from(dt.time()),
        }
    }
}

/// Moves timestamps with an offset into a single zone before reading the minute. Naive timestamps
/// are taken to already be in that zone.
#[derive(Debug, Clone, Copy)]
pub struct FixedZone(pub FixedOffset);

impl MinuteOfDayPolicy for FixedZone {
    fn minute_of_day(&self, timestamp: &RecordedTimestamp) -> MinuteOfDay {
        match timestamp {
            RecordedTimestamp::Local(dt) => MinuteOfDay::from(dt.time()),
            RecordedTimestamp::Offset(dt) => MinuteOfDay::from(dt.with_timezone(&self.0).time()),
        }
    }
}

pub type DynPolicy = Box<dyn MinuteOfDayPolicy + Send + Sync>;

pub fn policy_from_config(config: &TimestampConfig) -> DynPolicy {
    match config {
        TimestampConfig::Recorded(_) => Box::new(RecordedLocalTime),
        TimestampConfig::FixedOffset { offset } => Box::new(FixedZone(offset.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::config::UtcOffset;

    fn ts(value: &str) -> RecordedTimestamp {
        value.parse().unwrap()
    }

    #[test]
    fn test_recorded_local_time() {
        let policy = RecordedLocalTime;

        assert_eq!(policy.minute_of_day(&ts("2024-03-01 08:05:59")).get(), 485);
        assert_eq!(policy.minute_of_day(&ts("2024-03-01 00:00:00")).get(), 0);
        // The offset must not move the minute
        assert_eq!(policy.minute_of_day(&ts("2024-03-01T23:58:00-05:00")).get(), 1438);
        assert_eq!(policy.minute_of_day(&ts("2024-03-01T23:58:00+09:00")).get(), 1438);
    }

    #[test]
    fn test_fixed_zone() {
        let eastern = FixedZone(FixedOffset::west_opt(5 * 3600).unwrap());

        assert_eq!(eastern.minute_of_day(&ts("2024-03-02T04:58:00Z")).get(), 1438);
        assert_eq!(eastern.minute_of_day(&ts("2024-03-01T23:58:00-05:00")).get(), 1438);
        assert_eq!(eastern.minute_of_day(&ts("2024-03-01 08:00:00")).get(), 480);
    }

    #[test]
    fn test_policy_from_config() {
        let stamp = ts("2024-03-01T12:00:00Z");

        let recorded = policy_from_config(&TimestampConfig::default());
        assert_eq!(recorded.minute_of_day(&stamp).get(), 720);

        let offset = UtcOffset(FixedOffset::east_opt(3600).unwrap());
        let shifted = policy_from_config(&TimestampConfig::FixedOffset { offset });
        assert_eq!(shifted.minute_of_day(&stamp).get(), 780);
    }
}
