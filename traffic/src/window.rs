use crate::index::{BucketIndex, MinuteBuckets, TripIdx};
use common::types::config::DEFAULT_WINDOW_RADIUS_MINUTES;
use common::types::time::{MinuteOfDay, TimeError, TimeFilter, MINUTES_PER_DAY};
use common::types::trip::Trip;
use std::iter::Chain;
use std::ops::Range;

const DAY: usize = MINUTES_PER_DAY as usize;

/// Half the width of a time window in minutes. A window spans `2 * radius` buckets, so the radius
/// can be at most half a day.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct WindowRadius(u16);

impl WindowRadius {
    pub const MAX: u16 = MINUTES_PER_DAY / 2;

    pub fn get(&self) -> u16 {
        self.0
    }
}

impl Default for WindowRadius {
    fn default() -> Self {
        Self(DEFAULT_WINDOW_RADIUS_MINUTES)
    }
}

impl TryFrom<i32> for WindowRadius {
    type Error = TimeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if (1..=Self::MAX as i32).contains(&value) {
            Ok(Self(value as u16))
        } else {
            Err(TimeError::RadiusOutOfRange(value))
        }
    }
}

impl TryFrom<u16> for WindowRadius {
    type Error = TimeError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::try_from(value as i32)
    }
}

/// Bucket indices covered by a window, in the order they are read
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum WindowRanges {
    Contiguous(Range<usize>),
    /// The window crosses midnight: the late buckets come first, then the early ones
    Wrapping(Range<usize>, Range<usize>),
}

impl WindowRanges {
    pub fn whole_day() -> Self {
        WindowRanges::Contiguous(0..DAY)
    }

    pub fn len(&self) -> usize {
        match self {
            WindowRanges::Contiguous(range) => range.len(),
            WindowRanges::Wrapping(late, early) => late.len() + early.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IntoIterator for WindowRanges {
    type Item = usize;
    type IntoIter = Chain<Range<usize>, Range<usize>>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            WindowRanges::Contiguous(range) => range.chain(0..0),
            WindowRanges::Wrapping(late, early) => late.chain(early),
        }
    }
}

/// The buckets `center - radius + 1 ..= center + radius`, taken modulo one day.
pub fn window_ranges(center: MinuteOfDay, radius: WindowRadius) -> WindowRanges {
    let lo = (center.get() as i32 - radius.get() as i32 + 1).rem_euclid(DAY as i32) as usize;
    let end = lo + 2 * radius.get() as usize;

    if end <= DAY {
        WindowRanges::Contiguous(lo..end)
    } else {
        WindowRanges::Wrapping(lo..DAY, 0..end - DAY)
    }
}

pub fn filter_ranges(filter: TimeFilter, radius: WindowRadius) -> WindowRanges {
    match filter {
        TimeFilter::Any => WindowRanges::whole_day(),
        TimeFilter::Around(center) => window_ranges(center, radius),
    }
}

impl MinuteBuckets {
    /// All trips in the buckets selected by `filter`, bucket by bucket in window order
    pub fn select(&self, filter: TimeFilter, radius: WindowRadius) -> impl Iterator<Item = TripIdx> + '_ {
        filter_ranges(filter, radius)
            .into_iter()
            .flat_map(move |minute| self.buckets[minute].iter().copied())
    }
}

impl BucketIndex {
    pub fn departures_in(&self, filter: TimeFilter, radius: WindowRadius) -> impl Iterator<Item = &Trip> + '_ {
        self.departures().select(filter, radius).map(move |idx| self.trip(idx))
    }

    pub fn arrivals_in(&self, filter: TimeFilter, radius: WindowRadius) -> impl Iterator<Item = &Trip> + '_ {
        self.arrivals().select(filter, radius).map(move |idx| self.trip(idx))
    }
}
