use common::types::config::Config;
use common::util::logging;
use data_harvester::step1_fetch::fetch_dataset;
use data_harvester::step2_import::{import_stations, import_trips, TripImport};
use data_harvester::step3_validate::validate_station_references;
use log::info;
use server::AppData;
use std::time::Instant;
use traffic::aggregate::TrafficAggregator;
use traffic::index::BucketIndex;
use traffic::policy::policy_from_config;
use traffic::window::WindowRadius;
use crate::config::ConfigError;
use crate::BikeflowError;

/// Fetches and imports both datasets and builds the minute buckets. Nothing is served unless every
/// step succeeds.
pub async fn load(config: &Config) -> Result<AppData, BikeflowError> {
    let Config::Version1 { stations, trips, window, timestamps, .. } = config;
    let radius = WindowRadius::try_from(window.radius_minutes).map_err(ConfigError::from)?;

    info!(target: "loading", "Starting to load datasets");
    let start_time = Instant::now();

    let (fetched_stations, fetched_trips) =
        logging::run_with_spinner_async("loading", "Fetching datasets", || async {
            futures::try_join!(fetch_dataset(stations.clone()), fetch_dataset(trips.clone()))
        })
        .await?;

    let stations = logging::run_with_spinner("loading", "Importing stations", || {
        import_stations(fetched_stations)
    })?;
    let TripImport { trips, rejected } = logging::run_with_spinner("loading", "Importing trips", || {
        import_trips(fetched_trips)
    })?;

    validate_station_references(&stations, &trips);

    let policy = policy_from_config(timestamps);
    let index = logging::run_with_spinner("loading", "Sorting trips into minute buckets", || {
        BucketIndex::build(trips, policy.as_ref())
    });

    let elapsed = indicatif::HumanDuration(start_time.elapsed());
    info!(
        target: "loading",
        "Loaded {} stations and {} trips in {}",
        stations.len(), index.len(), elapsed
    );

    Ok(AppData {
        aggregator: TrafficAggregator::new(index, radius),
        stations,
        rejected_trips: rejected,
    })
}
