use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use serde_with::skip_serializing_none;

use crate::{
    api::e3dc::E3dc,
    config::{PowerLimits, SetConfig},
    prelude::*,
};

#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOperation {
    PowerLimits,
    Powersave,
    WeatherRegulatedCharge,
}

/// Human-readable result of a setter.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SetOutcome {
    #[serde(rename = "success")]
    Success,

    #[serde(rename = "one value is nonoptimal")]
    NonOptimal,

    /// The device reported a failure.
    #[serde(rename = "fail")]
    Fail,

    #[serde(rename = "unknown")]
    Unknown,

    /// The library raised an error, so there is no result code.
    #[serde(rename = "error")]
    Error,
}

impl SetOutcome {
    pub const fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Success,
            1 => Self::NonOptimal,
            -1 => Self::Fail,
            _ => Self::Unknown,
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SetResult {
    pub input_parameters: Value,
    pub result: SetOutcome,
    pub result_code: Option<i32>,
    pub error: Option<String>,
}

impl SetResult {
    fn capture(input_parameters: Value, call: Result<i32>) -> Self {
        match call {
            Ok(code) => {
                let result = SetOutcome::from_code(code);
                info!(code, ?result, "applied");
                Self { input_parameters, result, result_code: Some(code), error: None }
            }
            Err(error) => {
                warn!("failed to apply: {error:#}");
                Self {
                    input_parameters,
                    result: SetOutcome::Error,
                    result_code: None,
                    error: Some(format!("{error:#}")),
                }
            }
        }
    }
}

pub type SetResults = BTreeMap<SetOperation, SetResult>;

/// Run every requested setter, each one independently of the others' outcome.
#[instrument(skip_all)]
pub fn run_set_commands(system: &mut dyn E3dc, config: &SetConfig) -> Result<SetResults> {
    let mut results = SetResults::new();
    if config.power_limits.enable.is_some() {
        results.insert(SetOperation::PowerLimits, set_power_limits(system, &config.power_limits)?);
    }
    if let Some(enable) = config.powersave {
        results.insert(SetOperation::Powersave, set_powersave(system, enable));
    }
    if let Some(enable) = config.weather_regulated_charge {
        results.insert(
            SetOperation::WeatherRegulatedCharge,
            set_weather_regulated_charge(system, enable),
        );
    }
    Ok(results)
}

#[instrument(skip_all, fields(enable = limits.enable))]
fn set_power_limits(system: &mut dyn E3dc, limits: &PowerLimits) -> Result<SetResult> {
    let input_parameters =
        serde_json::to_value(limits).context("failed to serialize the power limits")?;
    Ok(SetResult::capture(input_parameters, system.set_power_limits(limits)))
}

#[instrument(skip(system))]
fn set_powersave(system: &mut dyn E3dc, enable: bool) -> SetResult {
    SetResult::capture(json!({"enable": enable}), system.set_powersave(enable))
}

#[instrument(skip(system))]
fn set_weather_regulated_charge(system: &mut dyn E3dc, enable: bool) -> SetResult {
    SetResult::capture(json!({"enable": enable}), system.set_weather_regulated_charge(enable))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::e3dc::fake::{Call, FakeE3dc};

    #[test]
    fn result_codes_ok() {
        assert_eq!(SetOutcome::from_code(0), SetOutcome::Success);
        assert_eq!(SetOutcome::from_code(1), SetOutcome::NonOptimal);
        assert_eq!(SetOutcome::from_code(-1), SetOutcome::Fail);
        assert_eq!(SetOutcome::from_code(42), SetOutcome::Unknown);
    }

    #[test]
    fn nothing_requested_runs_nothing() -> Result {
        let mut system = FakeE3dc::default();
        assert!(run_set_commands(&mut system, &SetConfig::default())?.is_empty());
        assert!(system.calls.is_empty());
        Ok(())
    }

    #[test]
    fn powersave_success() -> Result {
        let mut system = FakeE3dc::default();
        let config = SetConfig { powersave: Some(true), ..SetConfig::default() };
        let results = run_set_commands(&mut system, &config)?;
        assert_eq!(
            serde_json::to_value(&results)?,
            json!({
                "powersave": {
                    "input_parameters": {"enable": true},
                    "result": "success",
                    "result_code": 0,
                },
            }),
        );
        assert_eq!(system.calls, vec![Call::SetPowersave(true)]);
        Ok(())
    }

    #[test]
    fn power_limits_record_the_given_fields() -> Result {
        let mut system = FakeE3dc { power_limits_code: Some(1), ..FakeE3dc::default() };
        let limits = PowerLimits {
            max_charge: Some(-100),
            max_discharge: Some(-200),
            ..PowerLimits::default()
        }
        .linked();
        let config = SetConfig { power_limits: limits, ..SetConfig::default() };
        let results = run_set_commands(&mut system, &config)?;
        let result = &results[&SetOperation::PowerLimits];
        assert_eq!(
            result.input_parameters,
            json!({"enable": true, "max_charge": -100, "max_discharge": -200}),
        );
        assert_eq!(result.result, SetOutcome::NonOptimal);
        assert_eq!(result.result_code, Some(1));
        assert_eq!(system.calls, vec![Call::SetPowerLimits(limits)]);
        Ok(())
    }

    #[test]
    fn failing_setter_does_not_stop_the_others() -> Result {
        let mut system = FakeE3dc {
            power_limits_code: None,
            weather_regulated_charge_code: Some(-1),
            ..FakeE3dc::default()
        };
        let config = SetConfig {
            power_limits: PowerLimits { enable: Some(false), ..PowerLimits::default() },
            powersave: Some(false),
            weather_regulated_charge: Some(true),
        };
        let results = run_set_commands(&mut system, &config)?;
        assert_eq!(results.len(), 3);

        let power_limits = &results[&SetOperation::PowerLimits];
        assert_eq!(power_limits.result, SetOutcome::Error);
        assert_eq!(power_limits.result_code, None);
        assert_eq!(power_limits.error.as_deref(), Some("the device rejected the command"));

        assert_eq!(results[&SetOperation::Powersave].result, SetOutcome::Success);
        assert_eq!(results[&SetOperation::WeatherRegulatedCharge].result, SetOutcome::Fail);
        assert_eq!(results[&SetOperation::WeatherRegulatedCharge].result_code, Some(-1));

        assert_eq!(system.calls.len(), 3);
        Ok(())
    }

    #[test]
    fn error_result_has_no_code_key() -> Result {
        let result = SetResult::capture(json!({"enable": true}), Err(Error::msg("timed out")));
        assert_eq!(
            serde_json::to_value(&result)?,
            json!({"input_parameters": {"enable": true}, "result": "error", "error": "timed out"}),
        );
        Ok(())
    }
}
