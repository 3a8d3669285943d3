use crate::aggregate::Traffic;
use common::types::time::TimeFilter;
use serde::Serialize;

/// Circle radius range in pixels when all trips are shown
pub const ANY_TIME_RADIUS_RANGE: RadiusRange = RadiusRange { min: 0.0, max: 25.0 };
/// Circle radius range in pixels when trips are filtered to a time window
pub const FILTERED_RADIUS_RANGE: RadiusRange = RadiusRange { min: 3.0, max: 50.0 };

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadiusRange {
    pub min: f64,
    pub max: f64,
}

impl RadiusRange {
    pub fn for_filter(filter: TimeFilter) -> Self {
        match filter {
            TimeFilter::Any => ANY_TIME_RADIUS_RANGE,
            TimeFilter::Around(_) => FILTERED_RADIUS_RANGE,
        }
    }
}

/// Square root scale from total traffic to circle radius, so that circle areas grow linearly with
/// traffic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScale {
    max_traffic: u32,
    range: RadiusRange,
}

impl RadiusScale {
    pub fn new(max_traffic: u32, range: RadiusRange) -> Self {
        Self { max_traffic, range }
    }

    pub fn for_filter(max_traffic: u32, filter: TimeFilter) -> Self {
        Self::new(max_traffic, RadiusRange::for_filter(filter))
    }

    pub fn range(&self) -> RadiusRange {
        self.range
    }

    pub fn radius(&self, total_traffic: u32) -> f64 {
        let RadiusRange { min, max } = self.range;
        // Without any traffic there is nothing to compare against
        if self.max_traffic == 0 {
            return (min + max) / 2.0;
        }
        let t = (total_traffic as f64).sqrt() / (self.max_traffic as f64).sqrt();
        min + (max - min) * t
    }
}

/// Share of departures in the traffic of a station. Stations without traffic have a ratio of 0.
pub fn departure_ratio(traffic: &Traffic) -> f64 {
    match traffic.total_traffic() {
        0 => 0.0,
        total => traffic.departures() as f64 / total as f64,
    }
}

/// Quantizes departure ratios into mostly arriving (0), balanced (0.5) and mostly departing (1).
#[derive(Debug, Clone, PartialEq)]
pub struct FlowScale {
    steps: Vec<f64>,
}

impl Default for FlowScale {
    fn default() -> Self {
        Self { steps: vec![0.0, 0.5, 1.0] }
    }
}

impl FlowScale {
    /// `ratio` is clamped to the domain 0..=1 which is split into equally sized segments, one
    /// per step.
    pub fn quantize(&self, ratio: f64) -> f64 {
        let n = self.steps.len();
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        let segment = ((ratio * n as f64).floor() as usize).min(n - 1);
        self.steps[segment]
    }

    pub fn station_flow(&self, traffic: &Traffic) -> f64 {
        self.quantize(departure_ratio(traffic))
    }
}
