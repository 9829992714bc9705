pub mod history;

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use chrono::NaiveDateTime;
use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{api::e3dc::E3dc, prelude::*};

/// `system_status` reports this one too, but only the power settings reflect the portal
/// setting (Smart Functions → Smart Power → Power Save).
const POWER_SAVE_ENABLED: &str = "powerSaveEnabled";

#[derive(Debug, Hash, PartialOrd, Ord, EnumSetType, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Query {
    /// Static system info: model, software version, installed peak power, battery capacity.
    StaticSystem,

    /// Condensed status: consumption, production, state of charge, autarky.
    Live,

    /// General system status and power settings.
    LiveSystem,

    /// Power meter status: power, energy, and voltage of L1–L3.
    LivePowermeter,

    /// Battery status: state of charge, temperatures, capacity, charge cycles.
    LiveBattery,

    /// Solar inverter status: input strings, output phases, temperatures.
    LiveInverter,

    /// EV wallbox status: state of charge, consumption, maximum charge current.
    LiveWallbox,

    /// Accumulated values of today.
    HistoryToday,

    /// Accumulated values of yesterday.
    HistoryYesterday,

    /// Accumulated values of the current week, starting on Monday.
    HistoryWeek,

    /// Accumulated values of the previous week, starting on Monday.
    HistoryPreviousWeek,

    /// Accumulated values of the current month.
    HistoryMonth,

    /// Accumulated values of the previous month.
    HistoryPreviousMonth,

    /// Accumulated values of the current year, starting on 1 January.
    HistoryYear,

    /// Accumulated values of the previous year.
    HistoryPreviousYear,

    /// Accumulated values since 1970-01-02.
    HistoryTotal,
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::StaticSystem => "static_system",
            Self::Live => "live",
            Self::LiveSystem => "live_system",
            Self::LivePowermeter => "live_powermeter",
            Self::LiveBattery => "live_battery",
            Self::LiveInverter => "live_inverter",
            Self::LiveWallbox => "live_wallbox",
            Self::HistoryToday => "history_today",
            Self::HistoryYesterday => "history_yesterday",
            Self::HistoryWeek => "history_week",
            Self::HistoryPreviousWeek => "history_previous_week",
            Self::HistoryMonth => "history_month",
            Self::HistoryPreviousMonth => "history_previous_month",
            Self::HistoryYear => "history_year",
            Self::HistoryPreviousYear => "history_previous_year",
            Self::HistoryTotal => "history_total",
        };
        f.write_str(name)
    }
}

pub type QueryResults = BTreeMap<Query, Value>;

/// Run every requested query, any failure aborts the whole batch.
///
/// `now` is the local wall-clock time the history windows are computed from.
#[instrument(skip_all, fields(n_queries = queries.len()))]
pub fn run_queries(
    system: &mut dyn E3dc,
    queries: EnumSet<Query>,
    now: NaiveDateTime,
) -> Result<QueryResults> {
    queries
        .iter()
        .map(|query| {
            let result = run_query(system, query, now)
                .with_context(|| format!("failed to run the `{query}` query"))?;
            Ok((query, result))
        })
        .collect()
}

#[instrument(skip(system, now), level = Level::DEBUG)]
fn run_query(system: &mut dyn E3dc, query: Query, now: NaiveDateTime) -> Result<Value> {
    info!("querying…");
    match query {
        Query::StaticSystem => system.system_info(),
        Query::Live => system.poll(),
        Query::LiveSystem => {
            let mut status = into_object(system.system_status()?, "system status")?;
            status.remove(POWER_SAVE_ENABLED);
            let settings = into_object(system.power_settings()?, "power settings")?;
            Ok(Value::Object(merge_objects(status, settings)?))
        }
        Query::LivePowermeter => system.powermeter_data(),
        Query::LiveBattery => system.battery_data(),
        Query::LiveInverter => system.pvi_data(),
        Query::LiveWallbox => system.wallbox_data(),
        Query::HistoryToday
        | Query::HistoryYesterday
        | Query::HistoryWeek
        | Query::HistoryPreviousWeek
        | Query::HistoryMonth
        | Query::HistoryPreviousMonth
        | Query::HistoryYear
        | Query::HistoryPreviousYear
        | Query::HistoryTotal => {
            let window = history::TimeWindow::of(query, now)
                .with_context(|| format!("`{query}` is not a history query"))?;
            debug!(window.start_timestamp, window.timespan_seconds, "requesting the database");
            system.db_data(window)
        }
    }
}

fn into_object(value: Value, what: &str) -> Result<Map<String, Value>> {
    match value {
        Value::Object(object) => Ok(object),
        other => bail!("{what} is expected to be an object, got `{other}`"),
    }
}

/// Merge the objects, duplicate keys must carry identical values.
pub fn merge_objects(
    mut merged: Map<String, Value>,
    other: Map<String, Value>,
) -> Result<Map<String, Value>> {
    for (key, value) in other {
        if let Some(existing) = merged.get(&key) {
            ensure!(
                *existing == value,
                "failed to merge: duplicate key `{key}` with different values: {value} ≠ {existing}",
            );
        }
        merged.insert(key, value);
    }
    Ok(merged)
}
