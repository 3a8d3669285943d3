mod api;

use axum::routing::get;
use axum::Router;
use common::types::station::Station;
use std::fmt::Display;
use std::sync::Arc;
use tokio::net::TcpListener;
use traffic::aggregate::TrafficAggregator;

/// Everything the handlers read. None of it changes after startup, so requests never need to
/// synchronize.
pub struct AppData {
    pub aggregator: TrafficAggregator,
    pub stations: Vec<Station>,
    pub rejected_trips: usize,
}

pub fn router(app_data: AppData) -> Router {
    Router::new()
        .route("/api/v1/traffic", get(api::v1::station_traffic::endpoint))
        .route("/api/v1/status", get(api::v1::status::endpoint))
        .with_state(Arc::new(app_data))
}

pub async fn build(
    app_data: AppData,
    bind: &str,
) -> Result<(TcpListener, Router), ServerError> {
    let app = router(app_data);
    let listener = TcpListener::bind(bind).await?;

    Ok((listener, app))
}

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    Io(#[from] std::io::Error),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerError::Io(err) => write!(f, "{}", err),
        }
    }
}
