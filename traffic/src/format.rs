use crate::aggregate::Traffic;
use chrono::{NaiveTime, TimeDelta};
use common::types::time::{MinuteOfDay, TimeFilter};

pub const ANY_TIME_LABEL: &str = "(any time)";

/// Short 12-hour clock time, like "2:30 PM"
pub fn format_minute(minute: MinuteOfDay) -> String {
    let (time, _) = NaiveTime::MIN.overflowing_add_signed(TimeDelta::minutes(minute.get() as i64));
    time.format("%-I:%M %p").to_string()
}

pub fn time_label(filter: TimeFilter) -> String {
    match filter {
        TimeFilter::Any => ANY_TIME_LABEL.to_string(),
        TimeFilter::Around(minute) => format_minute(minute),
    }
}

pub fn tooltip(traffic: &Traffic) -> String {
    format!(
        "{} trips ({} departures, {} arrivals)",
        traffic.total_traffic(), traffic.departures(), traffic.arrivals()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::minute;

    #[test]
    fn test_format_minute() {
        assert_eq!(format_minute(minute(0, 0)), "12:00 AM");
        assert_eq!(format_minute(minute(8, 5)), "8:05 AM");
        assert_eq!(format_minute(minute(12, 0)), "12:00 PM");
        assert_eq!(format_minute(minute(14, 30)), "2:30 PM");
        assert_eq!(format_minute(minute(23, 59)), "11:59 PM");
    }

    #[test]
    fn test_time_label() {
        assert_eq!(time_label(TimeFilter::Any), "(any time)");
        assert_eq!(time_label(TimeFilter::Around(minute(17, 45))), "5:45 PM");
    }

    #[test]
    fn test_tooltip() {
        assert_eq!(tooltip(&Traffic::new(2, 1)), "3 trips (2 departures, 1 arrivals)");
        assert_eq!(tooltip(&Traffic::default()), "0 trips (0 departures, 0 arrivals)");
    }
}
