pub mod extended;
pub mod file;
pub mod secret;

use std::{
    fmt::{Display, Formatter},
    path::PathBuf,
};

use enumset::EnumSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    cli::{Args, ConnectionArgs, PowerLimitsArgs, SetArgs},
    config::{
        extended::ExtendedConfig,
        file::{FileConfig, FileConnection, FileSet},
        secret::Secret,
    },
    prelude::*,
    query::Query,
};

/// Resolved run configuration: the command line layered over the configuration file.
#[must_use]
#[derive(Debug)]
pub struct Config {
    pub connection: Connection,

    /// Requested queries, `None` unless `--query` is given.
    pub query: Option<EnumSet<Query>>,

    pub set: SetConfig,
    pub extended: ExtendedConfig,
    pub output: Option<PathBuf>,
}

impl Config {
    pub fn resolve(args: Args, file: FileConfig) -> Result<Self> {
        let connection = Connection::resolve(args.connection, file.connection)?;
        let query = args.query.or(file.query).map(|queries| queries.into_iter().collect());
        Ok(Self {
            connection,
            query,
            set: SetConfig::resolve(args.set, file.set),
            extended: args.extended_config.into_config().or(file.extended_config),
            output: args.output.or(file.output),
        })
    }
}

#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    /// Local RSCP connection (recommended).
    #[default]
    Local,

    /// E3/DC portal connection.
    Web,
}

impl Display for ConnectionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Web => write!(f, "web"),
        }
    }
}

#[must_use]
#[derive(Clone, Debug)]
#[cfg_attr(not(test), allow(dead_code, reason = "read by the device transport only"))]
pub enum Connection {
    Local { address: String, user: Secret, password: Secret, rscp_password: Secret },
    Web { user: Secret, password: Secret, serial_number: Secret },
}

impl Connection {
    pub const fn kind(&self) -> ConnectionType {
        match self {
            Self::Local { .. } => ConnectionType::Local,
            Self::Web { .. } => ConnectionType::Web,
        }
    }

    fn resolve(cli: ConnectionArgs, file: FileConnection) -> Result<Self> {
        let kind = cli.kind.or(file.kind).unwrap_or_default();
        let address = cli.address.or(file.address).filter(|address| !address.is_empty());
        let user = non_empty(cli.user.or(file.user));
        let password = non_empty(cli.password.or(file.password));
        let rscp_password = non_empty(cli.rscp_password.or(file.rscp_password));
        let serial_number = non_empty(cli.serial_number.or(file.serial_number));

        let mut issues = Vec::new();
        if user.is_none() {
            issues.push(format!(
                "Connection user config is missing. Required for connection type '{kind}'."
            ));
        }
        if password.is_none() {
            issues.push(format!(
                "Connection password config is missing. Required for connection type '{kind}'."
            ));
        }
        match kind {
            ConnectionType::Local => {
                if address.is_none() {
                    issues.push(
                        "Connection address config is missing. Required for connection type 'local'."
                            .to_string(),
                    );
                }
                if rscp_password.is_none() {
                    issues.push(
                        "Connection RSCP password config is missing. Required for connection type 'local'."
                            .to_string(),
                    );
                }
            }
            ConnectionType::Web => {
                if serial_number.is_none() {
                    issues.push(
                        "Connection serial number config is missing. Required for connection type 'web'."
                            .to_string(),
                    );
                }
            }
        }
        ensure!(issues.is_empty(), "{}", issues.iter().join("\n"));

        let connection = match kind {
            ConnectionType::Local => user.zip(password).zip(address).zip(rscp_password).map(
                |(((user, password), address), rscp_password)| Self::Local {
                    address,
                    user,
                    password,
                    rscp_password,
                },
            ),
            ConnectionType::Web => user.zip(password).zip(serial_number).map(
                |((user, password), serial_number)| Self::Web { user, password, serial_number },
            ),
        };
        connection.context("incomplete connection configuration")
    }
}

fn non_empty(secret: Option<Secret>) -> Option<Secret> {
    secret.filter(|secret| !secret.is_empty())
}

#[must_use]
#[derive(Clone, Debug, Default)]
pub struct SetConfig {
    pub power_limits: PowerLimits,
    pub powersave: Option<bool>,
    pub weather_regulated_charge: Option<bool>,
}

impl SetConfig {
    fn resolve(cli: SetArgs, file: FileSet) -> Self {
        Self {
            power_limits: PowerLimits::from(cli.power_limits).or(file.power_limits).linked(),
            powersave: cli.powersave.or(file.powersave),
            weather_regulated_charge: cli
                .weather_regulated_charge
                .or(file.weather_regulated_charge),
        }
    }

    /// Whether any setter is going to be executed.
    #[must_use]
    pub const fn is_requested(&self) -> bool {
        self.power_limits.enable.is_some()
            || self.powersave.is_some()
            || self.weather_regulated_charge.is_some()
    }
}

/// SmartPower limits in watts.
#[must_use]
#[skip_serializing_none]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PowerLimits {
    /// `true` for manual limits, `false` for the automatic mode.
    pub enable: Option<bool>,

    pub max_charge: Option<i32>,
    pub max_discharge: Option<i32>,
    pub discharge_start: Option<i32>,
}

impl PowerLimits {
    pub fn or(self, fallback: Self) -> Self {
        Self {
            enable: self.enable.or(fallback.enable),
            max_charge: self.max_charge.or(fallback.max_charge),
            max_discharge: self.max_discharge.or(fallback.max_discharge),
            discharge_start: self.discharge_start.or(fallback.discharge_start),
        }
    }

    /// Implicitly enable the manual limits when any of them is given.
    pub const fn linked(mut self) -> Self {
        if self.enable.is_none()
            && (self.max_charge.is_some()
                || self.max_discharge.is_some()
                || self.discharge_start.is_some())
        {
            self.enable = Some(true);
        }
        self
    }
}

impl From<PowerLimitsArgs> for PowerLimits {
    fn from(args: PowerLimitsArgs) -> Self {
        Self {
            enable: args.enable,
            max_charge: args.max_charge,
            max_discharge: args.max_discharge,
            discharge_start: args.discharge_start,
        }
    }
}
