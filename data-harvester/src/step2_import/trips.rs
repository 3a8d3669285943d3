use crate::step1_fetch::FetchStepOutput;
use crate::step2_import::ImportError;
use common::types::time::{RecordedTimestamp, TimeError};
use common::types::trip::Trip;
use itertools::izip;
use log::{debug, info, warn};
use polars::error::PolarsError;
use polars::prelude::{col, LazyCsvReader, LazyFileListReader};
use std::fmt;
use std::fmt::Display;

pub const TRIP_COLUMNS: [&str; 4] = ["start_station_id", "end_station_id", "started_at", "ended_at"];

/// Trips read from a dataset. Rows that could not be turned into a trip are only counted.
#[derive(Debug)]
pub struct TripImport {
    pub trips: Vec<Trip>,
    pub rejected: usize,
}

#[derive(Debug)]
enum Rejection {
    MissingStation,
    Timestamp(TimeError),
}

impl Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rejection::MissingStation => write!(f, "Missing station id"),
            Rejection::Timestamp(err) => write!(f, "{}", err),
        }
    }
}

pub fn import_trips(
    FetchStepOutput { dataset, path }: FetchStepOutput
) -> Result<TripImport, ImportError> {
    // A schema inference length of 0 reads every column as a string. Station ids like "12" must
    // stay strings and timestamps are parsed below.
    let frame = LazyCsvReader::new(&path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()?
        .select(TRIP_COLUMNS.map(col))
        .collect()?;

    let [start_ids, end_ids, started, ended] = frame.get_columns()
    else { return Err(ImportError::Polars(PolarsError::ColumnNotFound("trip columns".into()))); };

    let mut trips = Vec::with_capacity(frame.height());
    let mut rejected = 0;

    for (row, (start_id, end_id, started_at, ended_at)) in
        izip!(start_ids.str()?, end_ids.str()?, started.str()?, ended.str()?).enumerate()
    {
        match parse_trip(start_id, end_id, started_at, ended_at) {
            Ok(trip) => trips.push(trip),
            Err(rejection) => {
                debug!(target: "harvester", "Skipping row {} of dataset '{}': {}", row + 1, dataset.id, rejection);
                rejected += 1;
            }
        }
    }

    if rejected > 0 {
        warn!(target: "harvester", "Skipped {} of {} trips in dataset '{}' that could not be read", rejected, frame.height(), dataset.id);
    }
    info!(target: "harvester", "Imported {} trips from dataset '{}'", trips.len(), dataset.id);

    Ok(TripImport { trips, rejected })
}

fn parse_trip(
    start_id: Option<&str>,
    end_id: Option<&str>,
    started_at: Option<&str>,
    ended_at: Option<&str>,
) -> Result<Trip, Rejection> {
    Ok(Trip::new(
        parse_station(start_id)?,
        parse_station(end_id)?,
        parse_timestamp(started_at)?,
        parse_timestamp(ended_at)?,
    ))
}

fn parse_station(id: Option<&str>) -> Result<&str, Rejection> {
    id.map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(Rejection::MissingStation)
}

fn parse_timestamp(value: Option<&str>) -> Result<RecordedTimestamp, Rejection> {
    value.unwrap_or_default()
        .parse::<RecordedTimestamp>()
        .map_err(Rejection::Timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::config::dataset::{DataSource, Dataset};
    use common::types::StationId;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fetched(content: &str) -> (NamedTempFile, FetchStepOutput) {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let path = file.path().to_path_buf();
        let out = FetchStepOutput {
            dataset: Dataset {
                id: "trips".into(),
                src: DataSource::File { path: path.to_string_lossy().into_owned() },
                license: None,
            },
            path,
        };
        (file, out)
    }

    #[test]
    fn test_import_trips() {
        let (_file, out) = fetched("\
ride_id,rideable_type,started_at,ended_at,start_station_id,end_station_id,is_member
r1,classic_bike,2024-03-01 08:00:12.345,2024-03-01 08:10:00.000,A32000,M32006,1
r2,electric_bike,2024-03-01 23:58:00,2024-03-02 00:05:00,12,A32000,0
");

        let import = import_trips(out).unwrap();

        assert_eq!(import.rejected, 0);
        assert_eq!(import.trips.len(), 2);
        assert_eq!(import.trips[0].start_station_id, StationId::from("A32000"));
        assert_eq!(import.trips[0].end_station_id, StationId::from("M32006"));
        // Numeric looking ids stay strings
        assert_eq!(import.trips[1].start_station_id, StationId::from("12"));
        assert_eq!(import.trips[1].ended_at, "2024-03-02 00:05:00".parse::<RecordedTimestamp>().unwrap());
    }

    #[test]
    fn test_rejects_unreadable_rows() {
        let (_file, out) = fetched("\
started_at,ended_at,start_station_id,end_station_id
2024-03-01 08:00:00,2024-03-01 08:10:00,A,B
not a time,2024-03-01 08:10:00,A,B
2024-03-01 08:00:00,,A,B
2024-03-01 08:00:00,2024-03-01 08:10:00,,B
2024-03-01 09:00:00,2024-03-01 09:10:00,B,A
");

        let import = import_trips(out).unwrap();

        assert_eq!(import.trips.len(), 2);
        assert_eq!(import.rejected, 3);
    }

    #[test]
    fn test_missing_column() {
        let (_file, out) = fetched("\
started_at,ended_at,start_station_id
2024-03-01 08:00:00,2024-03-01 08:10:00,A
");

        assert!(matches!(import_trips(out), Err(ImportError::Polars(_))));
    }

    #[test]
    fn test_parse_trip() {
        assert!(matches!(
            parse_trip(Some(" "), Some("B"), Some("2024-03-01 08:00:00"), Some("2024-03-01 08:10:00")),
            Err(Rejection::MissingStation)
        ));
        assert!(matches!(
            parse_trip(Some("A"), Some("B"), None, Some("2024-03-01 08:10:00")),
            Err(Rejection::Timestamp(_))
        ));
        assert!(parse_trip(Some("A"), Some("B"), Some("2024-03-01 08:00:00"), Some("2024-03-01T08:10:00-05:00")).is_ok());
    }
}
