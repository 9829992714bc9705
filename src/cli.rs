mod connection;
mod set;

use std::path::PathBuf;

use clap::Parser;

pub use self::{
    connection::ConnectionArgs,
    set::{PowerLimitsArgs, SetArgs},
};
use crate::{
    config::extended::{DeviceList, ExtendedConfig},
    query::Query,
};

/// Query E3/DC solar inverter systems.
///
/// Every flag can also be provided via a JSON configuration file, the nested JSON hierarchy
/// follows the dotted flag names: `--connection.address` is `{"connection": {"address": …}}`.
/// Flags given on the command line take precedence over the configuration file.
#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// Path to the JSON configuration file.
    ///
    /// Defaults to `config.json` in the working directory when the file exists.
    #[clap(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path of the JSON output file, the output goes to stdout if not set.
    #[clap(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[clap(flatten)]
    pub connection: ConnectionArgs,

    /// Perform one or multiple live status or history queries.
    #[clap(short = 'q', long = "query", value_name = "QUERY", num_args = 0..)]
    pub query: Option<Vec<Query>>,

    #[clap(flatten)]
    pub set: SetArgs,

    #[clap(flatten)]
    pub extended_config: ExtendedConfigArgs,
}

/// Device enumeration passed through to the E3/DC library.
#[derive(Parser)]
pub struct ExtendedConfigArgs {
    /// Extended power meters configuration as a JSON list.
    #[clap(long = "extended_config.powermeters", value_name = "JSON")]
    pub powermeters: Option<DeviceList>,

    /// Extended solar inverters configuration as a JSON list.
    #[clap(long = "extended_config.pvis", value_name = "JSON")]
    pub pvis: Option<DeviceList>,

    /// Extended batteries configuration as a JSON list.
    #[clap(long = "extended_config.batteries", value_name = "JSON")]
    pub batteries: Option<DeviceList>,
}

impl ExtendedConfigArgs {
    pub fn into_config(self) -> ExtendedConfig {
        ExtendedConfig { powermeters: self.powermeters, pvis: self.pvis, batteries: self.batteries }
    }
}
