use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Dataset {
    pub id: String,
    pub src: DataSource,
    pub license: Option<License>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(
    untagged,
    expecting = "Invalid or missing data source. Specify either a remote source with `url:` and `headers:` or a local path with `path:` under `src:` of this dataset")
]
pub enum DataSource {
    URL {
        url: Url,
        #[serde(default)]
        headers: HashMap<String, String>,
    },
    File {
        path: String
    }
}

// Identifiers: https://spdx.org/licenses/
#[derive(Debug, Deserialize, Serialize, Clone)]
pub enum License {
    Custom { src: DataSource },
    #[serde(rename = "CC0-1.0")]
    Cc0_1_0,
    #[serde(rename = "CC-BY-4.0")]
    CcBy4_0,
    #[serde(rename = "CC-BY-SA-4.0")]
    CcBySa4_0,
    #[serde(rename = "ODbL-1.0")]
    Odbl1_0,
}
