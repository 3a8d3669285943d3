use crate::step1_fetch::FetchStepOutput;
use crate::step2_import::ImportError;
use common::types::errors::DuplicateStationError;
use common::types::station::Station;
use hashbrown::HashSet;
use log::info;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;

/// Station information feed: `{ "data": { "stations": [...] } }`
#[derive(Deserialize)]
struct StationFeed {
    data: StationFeedData,
}

#[derive(Deserialize)]
struct StationFeedData {
    stations: Vec<Station>,
}

pub fn import_stations(
    FetchStepOutput { dataset, path }: FetchStepOutput
) -> Result<Vec<Station>, ImportError> {
    let file = File::open(&path)?;
    let feed: StationFeed = serde_json::from_reader(BufReader::new(file))?;
    let stations = feed.data.stations;

    let mut seen = HashSet::with_capacity(stations.len());
    if let Some(duplicate) = stations.iter().find(|s| !seen.insert(&s.short_name)) {
        return Err(DuplicateStationError(duplicate.short_name.clone()).into());
    }
    drop(seen);

    info!(target: "harvester", "Imported {} stations from dataset '{}'", stations.len(), dataset.id);

    Ok(stations)
}
