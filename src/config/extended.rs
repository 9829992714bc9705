//! Extended device topology passed through to the E3/DC library untouched.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;

use crate::prelude::*;

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtendedConfig {
    pub powermeters: Option<DeviceList>,
    pub pvis: Option<DeviceList>,
    pub batteries: Option<DeviceList>,
}

impl ExtendedConfig {
    /// Field-wise merge where `self` takes precedence over `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            powermeters: self.powermeters.or(fallback.powermeters),
            pvis: self.pvis.or(fallback.pvis),
            batteries: self.batteries.or(fallback.batteries),
        }
    }
}

/// List of device descriptions, for example `[{"index": 0, "type": 1}]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceList(pub Vec<Map<String, Value>>);

impl FromStr for DeviceList {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .with_context(|| format!("`{text}` is not a JSON list of device objects"))
    }
}
