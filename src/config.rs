use common::types::config::Config;
use common::types::time::TimeError;
use log::info;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::path::Path;
use traffic::window::WindowRadius;
use crate::bootstrap_config::BootstrapConfig;

pub(super) fn load_config(bootstrap_config: &BootstrapConfig) -> Result<Config, ConfigError> {
    let path: &Path = Path::new(&bootstrap_config.config_file);

    let config_file = File::open(path)?;
    let config: Config = serde_yml::from_reader(config_file)?;
    check_config(&config)?;

    info!(target: "main", "Config read successfully from '{path:?}'");

    Ok(config)
}

fn check_config(config: &Config) -> Result<(), ConfigError> {
    let Config::Version1 { window, .. } = config;
    WindowRadius::try_from(window.radius_minutes)?;
    Ok(())
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    Io(#[from] std::io::Error),
    Yaml(#[from] serde_yml::Error),
    InvalidWindow(#[from] TimeError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let err: &dyn Display = match self {
            ConfigError::Io(err) => err,
            ConfigError::Yaml(err) => err,
            ConfigError::InvalidWindow(err) => err,
        };
        write!(f, "{}", err)
    }
}
