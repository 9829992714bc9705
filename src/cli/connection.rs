use clap::Parser;

use crate::config::{ConnectionType, secret::Secret};

#[derive(Parser)]
pub struct ConnectionArgs {
    /// Connection type used for communication with the E3/DC system [default: local].
    #[clap(long = "connection.type", value_name = "TYPE", env = "E3DC_CLI_CONNECTION_TYPE")]
    pub kind: Option<ConnectionType>,

    /// IP or DNS address of the E3/DC system, only relevant for the `local` connection.
    #[clap(long = "connection.address", env = "E3DC_CLI_CONNECTION_ADDRESS")]
    pub address: Option<String>,

    /// Username, same as in the E3/DC portal.
    #[clap(long = "connection.user", env = "E3DC_CLI_CONNECTION_USER", hide_env_values = true)]
    pub user: Option<Secret>,

    /// Password, same as in the E3/DC portal.
    #[clap(
        long = "connection.password",
        env = "E3DC_CLI_CONNECTION_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<Secret>,

    /// RSCP password, only relevant for the `local` connection.
    ///
    /// Set on the device via Main Page → Personalize → User profile → RSCP password.
    #[clap(
        long = "connection.rscp_password",
        env = "E3DC_CLI_CONNECTION_RSCP_PASSWORD",
        hide_env_values = true
    )]
    pub rscp_password: Option<Secret>,

    /// Serial number of the system (`SN` in the E3/DC portal).
    ///
    /// Only relevant for the `web` connection.
    #[clap(
        long = "connection.serial_number",
        env = "E3DC_CLI_CONNECTION_SERIAL_NUMBER",
        hide_env_values = true
    )]
    pub serial_number: Option<Secret>,
}
