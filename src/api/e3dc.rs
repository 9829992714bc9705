//! Boundary to the E3/DC device-communication library.
//!
//! Protocol handling (RSCP on the local network, or the portal web socket) lives behind [`E3dc`].
//! Read operations return the library payload as-is, write operations return the device result
//! code: `0` for success, `1` when one value is non-optimal, and `-1` for failure.

#[cfg(test)]
pub mod fake;

use serde_json::Value;

use crate::{
    config::{Connection, PowerLimits, extended::ExtendedConfig},
    prelude::*,
    query::history::TimeWindow,
};

pub trait E3dc {
    /// Static system info: model, software release, installed peak power, battery capacity.
    fn system_info(&mut self) -> Result<Value>;

    /// Condensed live status.
    fn poll(&mut self) -> Result<Value>;

    fn system_status(&mut self) -> Result<Value>;

    fn power_settings(&mut self) -> Result<Value>;

    fn powermeter_data(&mut self) -> Result<Value>;

    fn battery_data(&mut self) -> Result<Value>;

    fn pvi_data(&mut self) -> Result<Value>;

    fn wallbox_data(&mut self) -> Result<Value>;

    /// Accumulated database values over the window.
    fn db_data(&mut self, window: TimeWindow) -> Result<Value>;

    fn set_power_limits(&mut self, limits: &PowerLimits) -> Result<i32>;

    fn set_powersave(&mut self, enable: bool) -> Result<i32>;

    fn set_weather_regulated_charge(&mut self, enable: bool) -> Result<i32>;

    fn disconnect(&mut self) -> Result;
}

/// Open the session with the system.
///
/// The RSCP and portal transports are provided by the device library, which this build does not
/// link, so every attempt fails after reporting what would have been connected.
#[instrument(skip_all, fields(kind = %connection.kind()))]
pub fn connect(connection: &Connection, extended: &ExtendedConfig) -> Result<Box<dyn E3dc>> {
    match connection {
        Connection::Local { address, .. } => {
            info!(%address, "connecting via RSCP…");
        }
        Connection::Web { .. } => {
            info!("connecting via the E3/DC portal…");
        }
    }
    debug!(?extended, "extended configuration");
    bail!(
        "failed to connect to the E3/DC system: no `{}` transport is available in this build",
        connection.kind(),
    )
}
