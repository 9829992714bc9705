use std::{thread::sleep, time::Duration};

use bon::Builder;
use chrono::NaiveDateTime;

use crate::{
    api::e3dc::E3dc,
    config::{Config, ConnectionType},
    output::Output,
    prelude::*,
    query::{QueryResults, run_queries},
    setter::run_set_commands,
};

/// One pass over an open connection: the setters first, then the queries.
#[derive(Builder)]
pub struct Runner<'a> {
    config: &'a Config,
    system: &'a mut dyn E3dc,

    /// Local wall-clock time for the history queries.
    now: NaiveDateTime,

    /// Local systems take a moment to apply a setting, a query right after it may still report
    /// the old state.
    #[builder(default = Duration::from_millis(500))]
    settle_delay: Duration,
}

impl Runner<'_> {
    #[instrument(skip_all, fields(kind = %self.config.connection.kind()))]
    pub fn run(self) -> Result<Output> {
        let Self { config, system, now, settle_delay } = self;

        let set = run_set_commands(system, &config.set)?;

        let query = match config.query {
            Some(queries) => {
                if config.set.is_requested() && config.connection.kind() == ConnectionType::Local {
                    debug!(?settle_delay, "waiting for the settings to apply…");
                    sleep(settle_delay);
                }
                run_queries(system, queries, now)?
            }
            None => QueryResults::new(),
        };

        Ok(Output::new(query, set))
    }
}
