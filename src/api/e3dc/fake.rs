//! In-memory [`E3dc`] recording the calls.

use serde_json::{Value, json};

use crate::{
    api::e3dc::E3dc,
    config::PowerLimits,
    prelude::*,
    query::history::TimeWindow,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    SystemInfo,
    Poll,
    SystemStatus,
    PowerSettings,
    PowermeterData,
    BatteryData,
    PviData,
    WallboxData,
    DbData(TimeWindow),
    SetPowerLimits(PowerLimits),
    SetPowersave(bool),
    SetWeatherRegulatedCharge(bool),
    Disconnect,
}

pub struct FakeE3dc {
    pub calls: Vec<Call>,

    /// Every read fails with a library error.
    pub fail_reads: bool,

    pub system_status: Value,

    /// Result codes of the setters, `None` raises a library error instead.
    pub power_limits_code: Option<i32>,
    pub powersave_code: Option<i32>,
    pub weather_regulated_charge_code: Option<i32>,
}

impl Default for FakeE3dc {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            fail_reads: false,
            system_status: json!({
                "installedPeakPower": 10_000,
                "powerSaveEnabled": false,
                "weatherRegulatedChargeEnabled": true,
            }),
            power_limits_code: Some(0),
            powersave_code: Some(0),
            weather_regulated_charge_code: Some(0),
        }
    }
}

impl FakeE3dc {
    fn read(&mut self, call: Call, payload: Value) -> Result<Value> {
        self.calls.push(call);
        ensure!(!self.fail_reads, "connection reset by peer");
        Ok(payload)
    }

    fn write(&mut self, call: Call, code: Option<i32>) -> Result<i32> {
        self.calls.push(call);
        code.context("the device rejected the command")
    }
}

impl E3dc for FakeE3dc {
    fn system_info(&mut self) -> Result<Value> {
        self.read(Call::SystemInfo, json!({"model": "S10E", "serial": "S10-123456789"}))
    }

    fn poll(&mut self) -> Result<Value> {
        self.read(Call::Poll, json!({"autarky": 92.5, "stateOfCharge": 58}))
    }

    fn system_status(&mut self) -> Result<Value> {
        let status = self.system_status.clone();
        self.read(Call::SystemStatus, status)
    }

    fn power_settings(&mut self) -> Result<Value> {
        self.read(
            Call::PowerSettings,
            json!({
                "powerSaveEnabled": true,
                "weatherRegulatedChargeEnabled": true,
                "maxChargePower": 3_000,
            }),
        )
    }

    fn powermeter_data(&mut self) -> Result<Value> {
        self.read(Call::PowermeterData, json!({"power": {"L1": 120, "L2": 80, "L3": 40}}))
    }

    fn battery_data(&mut self) -> Result<Value> {
        self.read(Call::BatteryData, json!({"rsoc": 58.0, "chargeCycles": 412}))
    }

    fn pvi_data(&mut self) -> Result<Value> {
        self.read(Call::PviData, json!({"strings": {"0": {"power": 1_800}}}))
    }

    fn wallbox_data(&mut self) -> Result<Value> {
        self.read(Call::WallboxData, json!({"soc": 0, "maxChargeCurrent": 16}))
    }

    fn db_data(&mut self, window: TimeWindow) -> Result<Value> {
        self.read(
            Call::DbData(window),
            json!({
                "startTimestamp": window.start_timestamp,
                "timespanSeconds": window.timespan_seconds,
                "solarProduction": 12_345.0,
            }),
        )
    }

    fn set_power_limits(&mut self, limits: &PowerLimits) -> Result<i32> {
        let code = self.power_limits_code;
        self.write(Call::SetPowerLimits(*limits), code)
    }

    fn set_powersave(&mut self, enable: bool) -> Result<i32> {
        let code = self.powersave_code;
        self.write(Call::SetPowersave(enable), code)
    }

    fn set_weather_regulated_charge(&mut self, enable: bool) -> Result<i32> {
        let code = self.weather_regulated_charge_code;
        self.write(Call::SetWeatherRegulatedCharge(enable), code)
    }

    fn disconnect(&mut self) -> Result {
        self.calls.push(Call::Disconnect);
        Ok(())
    }
}
