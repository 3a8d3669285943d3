use std::fmt;
use std::fmt::Display;
use std::io::Cursor;
use std::time::{SystemTime, UNIX_EPOCH};
use common::types::config::dataset::{Dataset, DataSource};
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;
use std::fs::{create_dir_all, File};
use std::path::{Path, PathBuf};

pub async fn fetch_dataset(
    dataset: Dataset
) -> Result<FetchStepOutput, FetchError> {
    match dataset.clone().src {
        DataSource::URL { url, headers } => {
            let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default();
            let path_str = format!("./data/datasets/{}/imports/{}", dataset.id, timestamp);
            let path = Path::new(&path_str);
            if let Some(parent) = path.parent() {
                create_dir_all(parent)?;
            }

            debug!(target: "harvester", "Downloading dataset '{}' from {}", dataset.id, url);
            let response = reqwest::Client::new()
                .get(url.clone())
                .headers(header_map(&headers)?)
                .send().await?
                .error_for_status()?;

            let mut file = File::create(path)?;
            let mut content = Cursor::new(response.bytes().await?);
            let bytes = std::io::copy(&mut content, &mut file)?;
            info!(target: "harvester", "Downloaded dataset '{}' ({} bytes)", dataset.id, bytes);

            Ok(FetchStepOutput {
                dataset,
                path: path.to_path_buf(),
            })
        },
        DataSource::File { path } => {
            let path = PathBuf::from(path);
            if !path.is_file() {
                return Err(FetchError::MissingFile(path));
            }

            Ok(FetchStepOutput {
                dataset,
                path,
            })
        }
    }
}

fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap, FetchError> {
    headers.iter()
        .map(|(name, value)| {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| FetchError::InvalidHeader(name.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| FetchError::InvalidHeader(name.to_string()))?;
            Ok((name, value))
        })
        .collect()
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    Reqwest(#[from] reqwest::Error),
    File(#[from] std::io::Error),
    MissingFile(PathBuf),
    InvalidHeader(String),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FetchError::Reqwest(err) => write!(f, "{}", err),
            FetchError::File(err) => write!(f, "{}", err),
            FetchError::MissingFile(path) => write!(f, "No file found at {:?}", path),
            FetchError::InvalidHeader(name) => write!(f, "Invalid request header '{}'", name),
        }
    }
}


#[derive(Debug)]
pub struct FetchStepOutput {
    pub dataset: Dataset,
    pub path: PathBuf
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file_dataset(path: &Path) -> Dataset {
        Dataset {
            id: "local".into(),
            src: DataSource::File { path: path.to_string_lossy().into_owned() },
            license: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{}}").unwrap();

        let out = fetch_dataset(file_dataset(file.path())).await.unwrap();

        assert_eq!(out.path, file.path());
        assert_eq!(out.dataset.id, "local");
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("stations.json");

        let result = fetch_dataset(file_dataset(&missing)).await;

        assert!(matches!(result, Err(FetchError::MissingFile(path)) if path == missing));
    }

    #[test]
    fn test_header_map() {
        let headers = HashMap::from([("Authorization".to_string(), "Bearer 42".to_string())]);
        let map = header_map(&headers).unwrap();
        assert_eq!(map.get("authorization").unwrap(), "Bearer 42");

        let invalid = HashMap::from([("Bad Header".to_string(), "x".to_string())]);
        assert!(matches!(header_map(&invalid), Err(FetchError::InvalidHeader(_))));
    }
}
