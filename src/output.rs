use std::{fs, io::Write, path::Path};

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{prelude::*, query::QueryResults, setter::SetResults};

/// Everything a single run reports.
#[must_use]
#[skip_serializing_none]
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Output {
    pub query: Option<QueryResults>,
    pub set: Option<SetResults>,
}

impl Output {
    /// Keep only the non-empty sections.
    pub fn new(query: QueryResults, set: SetResults) -> Self {
        Self {
            query: (!query.is_empty()).then_some(query),
            set: (!set.is_empty()).then_some(set),
        }
    }

    /// Pretty JSON with the object keys sorted at every level.
    pub fn to_json(&self) -> Result<String> {
        // Without `preserve_order`, `serde_json::Map` is ordered by key.
        let value = serde_json::to_value(self).context("failed to serialize the output")?;
        Ok(serde_json::to_string_pretty(&value)?)
    }

    #[instrument(skip_all)]
    pub fn write(&self, path: Option<&Path>) -> Result {
        let json = self.to_json()?;
        match path {
            Some(path) => {
                fs::write(path, json).with_context(|| {
                    format!("failed to write the output to `{}`", path.display())
                })?;
                info!(path = %path.display(), "written");
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{json}").context("failed to write the output to stdout")?;
            }
        }
        Ok(())
    }
}
