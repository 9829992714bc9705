//! Setter flags.

use clap::{ArgAction, Parser};

#[derive(Parser)]
pub struct SetArgs {
    #[clap(flatten)]
    pub power_limits: PowerLimitsArgs,

    /// Enable or disable the inverter power save (standby when not in use).
    #[clap(long = "set.powersave", value_name = "true|false", action = ArgAction::Set)]
    pub powersave: Option<bool>,

    /// Enable or disable the charging optimized on the weather forecast.
    #[clap(
        long = "set.weather_regulated_charge",
        value_name = "true|false",
        action = ArgAction::Set
    )]
    pub weather_regulated_charge: Option<bool>,
}

#[derive(Parser)]
pub struct PowerLimitsArgs {
    /// `true` to enable the manual SmartPower limits, `false` for the automatic mode.
    ///
    /// Implied `true` when any other limit is set.
    #[clap(long = "set.power_limits.enable", value_name = "true|false", action = ArgAction::Set)]
    pub enable: Option<bool>,

    /// SmartPower maximum charging power in watts.
    ///
    /// The system maximum battery charge power is used when not set.
    #[clap(
        long = "set.power_limits.max_charge",
        value_name = "WATTS",
        allow_negative_numbers = true
    )]
    pub max_charge: Option<i32>,

    /// SmartPower maximum discharging power in watts.
    ///
    /// The system maximum battery discharge power is used when not set.
    #[clap(
        long = "set.power_limits.max_discharge",
        value_name = "WATTS",
        allow_negative_numbers = true
    )]
    pub max_discharge: Option<i32>,

    /// SmartPower lower charge and discharge threshold in watts.
    ///
    /// The system default discharge threshold is used when not set.
    #[clap(
        long = "set.power_limits.discharge_start",
        value_name = "WATTS",
        allow_negative_numbers = true
    )]
    pub discharge_start: Option<i32>,
}
