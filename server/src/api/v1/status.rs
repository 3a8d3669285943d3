use crate::AppData;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize, Debug, PartialEq)]
pub struct Status {
    stations: usize,
    trips: usize,
    rejected_trips: usize,
    window_radius: u16,
}

pub(crate) async fn endpoint(State(app_data): State<Arc<AppData>>) -> Json<Status> {
    Json(Status {
        stations: app_data.stations.len(),
        trips: app_data.aggregator.index().len(),
        rejected_trips: app_data.rejected_trips,
        window_radius: app_data.aggregator.radius().get(),
    })
}
