use std::fmt::{Debug, Formatter};

use derive_more::From;
use serde::Deserialize;

/// Credential that never shows up in logs.
#[derive(Clone, Eq, PartialEq, From, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    #[must_use]
    #[cfg_attr(not(test), expect(dead_code, reason = "read by the device transport only"))]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("**********")
    }
}
