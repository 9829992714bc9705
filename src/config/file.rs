//! JSON configuration file layer.
//!
//! The hierarchy mirrors the dotted command-line flags, so `--connection.rscp_password` becomes
//! `{"connection": {"rscp_password": "…"}}`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    config::{ConnectionType, PowerLimits, extended::ExtendedConfig, secret::Secret},
    prelude::*,
    query::Query,
};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub connection: FileConnection,

    pub output: Option<PathBuf>,

    pub query: Option<Vec<Query>>,

    #[serde(default)]
    pub set: FileSet,

    #[serde(default)]
    pub extended_config: ExtendedConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConnection {
    #[serde(rename = "type")]
    pub kind: Option<ConnectionType>,

    pub address: Option<String>,
    pub user: Option<Secret>,
    pub password: Option<Secret>,
    pub rscp_password: Option<Secret>,
    pub serial_number: Option<Secret>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSet {
    #[serde(default)]
    pub power_limits: PowerLimits,

    pub powersave: Option<bool>,
    pub weather_regulated_charge: Option<bool>,
}

impl FileConfig {
    pub const DEFAULT_PATH: &'static str = "config.json";

    /// Load the explicitly requested file, or the fallback one if it happens to exist.
    pub fn load(explicit: Option<&Path>, fallback: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None if fallback.is_file() => Self::read(fallback),
            None => {
                debug!(path = %fallback.display(), "no configuration file");
                Ok(Self::default())
            }
        }
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read the configuration file `{}`", path.display())
        })?;
        let config = serde_json::from_str(&contents).with_context(|| {
            format!("failed to parse the configuration file `{}`", path.display())
        })?;
        info!("loaded the configuration file");
        Ok(config)
    }
}
