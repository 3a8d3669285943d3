use crate::AppData;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use common::types::station::Station;
use common::types::time::{TimeError, TimeFilter};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use traffic::aggregate::{max_total_traffic, StationTraffic, TrafficAggregator};
use traffic::format::{time_label, tooltip};
use traffic::scales::{departure_ratio, FlowScale, RadiusRange, RadiusScale};

#[derive(Deserialize, Debug, Default)]
pub struct TrafficQuery {
    /// Slider position, -1 or absent for any time
    time: Option<i32>,
}

#[derive(Serialize, Debug)]
pub struct StationView {
    #[serde(flatten)]
    station_traffic: StationTraffic,
    radius: f64,
    departure_ratio: f64,
    flow: f64,
    tooltip: String,
}

#[derive(Serialize, Debug)]
pub struct TrafficResponse {
    filter: TimeFilter,
    time_label: String,
    radius_range: RadiusRange,
    max_total_traffic: u32,
    stations: Vec<StationView>,
}

pub(crate) async fn endpoint(
    State(app_data): State<Arc<AppData>>,
    Query(query): Query<TrafficQuery>,
) -> Result<Json<TrafficResponse>, (StatusCode, String)> {
    let filter = parse_filter(&query).map_err(convert_error)?;
    debug!(target: "server", "Computing station traffic for {:?}", filter);

    Ok(Json(traffic_response(&app_data.aggregator, &app_data.stations, filter)))
}

fn parse_filter(query: &TrafficQuery) -> Result<TimeFilter, TimeError> {
    query.time.map_or(Ok(TimeFilter::Any), TimeFilter::from_slider)
}

pub fn traffic_response(
    aggregator: &TrafficAggregator,
    stations: &[Station],
    filter: TimeFilter,
) -> TrafficResponse {
    let traffic = aggregator.compute_station_traffic(stations, filter);
    let max_total_traffic = max_total_traffic(&traffic);
    let radius_scale = RadiusScale::for_filter(max_total_traffic, filter);
    let flow_scale = FlowScale::default();

    let stations = traffic.into_iter()
        .map(|station_traffic| {
            let counts = &station_traffic.traffic;
            StationView {
                radius: radius_scale.radius(counts.total_traffic()),
                departure_ratio: departure_ratio(counts),
                flow: flow_scale.station_flow(counts),
                tooltip: tooltip(counts),
                station_traffic,
            }
        })
        .collect();

    TrafficResponse {
        filter,
        time_label: time_label(filter),
        radius_range: radius_scale.range(),
        max_total_traffic,
        stations,
    }
}

fn convert_error(err: TimeError) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::app_data;
    use serde_json::Value;

    async fn get(time: Option<i32>) -> Result<Value, (StatusCode, String)> {
        let Json(response) = endpoint(State(app_data()), Query(TrafficQuery { time })).await?;
        Ok(serde_json::to_value(response).unwrap())
    }

    fn station<'a>(body: &'a Value, id: &str) -> &'a Value {
        body["stations"].as_array().unwrap().iter()
            .find(|s| s["short_name"] == id)
            .unwrap()
    }

    #[tokio::test]
    async fn test_any_time() {
        let body = get(None).await.unwrap();

        assert_eq!(body["filter"], -1);
        assert_eq!(body["time_label"], "(any time)");
        assert_eq!(body["max_total_traffic"], 3);
        assert_eq!(body["radius_range"]["max"], 25.0);

        let a = station(&body, "A");
        assert_eq!(a["departures"], 2);
        assert_eq!(a["arrivals"], 1);
        assert_eq!(a["total_traffic"], 3);
        assert_eq!(a["radius"], 25.0);
        assert_eq!(a["tooltip"], "3 trips (2 departures, 1 arrivals)");
        assert_eq!(a["lat"], 42.36);

        let b = station(&body, "B");
        assert_eq!(b["departure_ratio"], 0.5);
        assert_eq!(b["flow"], 0.5);
    }

    #[tokio::test]
    async fn test_slider_sentinel_equals_no_time() {
        assert_eq!(get(Some(-1)).await.unwrap(), get(None).await.unwrap());
    }

    #[tokio::test]
    async fn test_around_midnight() {
        let body = get(Some(0)).await.unwrap();

        assert_eq!(body["filter"], 0);
        assert_eq!(body["time_label"], "12:00 AM");
        assert_eq!(body["radius_range"]["min"], 3.0);

        let a = station(&body, "A");
        assert_eq!(a["departures"], 0);
        assert_eq!(a["arrivals"], 1);
        assert_eq!(a["departure_ratio"], 0.0);

        let c = station(&body, "C");
        assert_eq!(c["total_traffic"], 0);
        assert_eq!(c["radius"], 3.0);
        assert_eq!(c["departure_ratio"], 0.0);
    }

    #[tokio::test]
    async fn test_rejects_out_of_range_time() {
        for time in [-2, 1440, 100_000] {
            let (status, message) = get(Some(time)).await.unwrap_err();
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(message.contains(&time.to_string()));
        }
    }
}
