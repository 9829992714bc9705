//! Time windows of the history queries.
//!
//! The E3/DC database expects the local wall-clock start time read as if it were UTC, so all the
//! arithmetic happens on [`NaiveDateTime`].

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::query::Query;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TimeWindow {
    /// UNIX timestamp in seconds.
    pub start_timestamp: i64,

    pub timespan_seconds: i64,
}

impl TimeWindow {
    const DAYS_IN_A_YEAR: i64 = 365;

    /// Window of the history query, `None` for any other query.
    #[must_use]
    pub fn of(query: Query, now: NaiveDateTime) -> Option<Self> {
        match query {
            Query::HistoryToday => Some(Self::day(now, 0)),
            Query::HistoryYesterday => Some(Self::day(now, 1)),
            Query::HistoryWeek => Some(Self::week(now, 0)),
            Query::HistoryPreviousWeek => Some(Self::week(now, 1)),
            Query::HistoryMonth => Self::month(now, 0),
            Query::HistoryPreviousMonth => Self::month(now, 1),
            Query::HistoryYear => Self::year(now, 0),
            Query::HistoryPreviousYear => Self::year(now, 1),
            Query::HistoryTotal => Self::total(now),
            Query::StaticSystem
            | Query::Live
            | Query::LiveSystem
            | Query::LivePowermeter
            | Query::LiveBattery
            | Query::LiveInverter
            | Query::LiveWallbox => None,
        }
    }

    fn new(start: NaiveDateTime, timespan: TimeDelta) -> Self {
        Self {
            start_timestamp: start.and_utc().timestamp(),
            timespan_seconds: timespan.num_seconds(),
        }
    }

    /// The portal accumulates 15-minute slots, so a day starts at 23:45 the day before.
    fn day(now: NaiveDateTime, past_days: i64) -> Self {
        let start = midnight(now.date()) - TimeDelta::days(past_days) - TimeDelta::minutes(15);
        Self::new(start, TimeDelta::days(1))
    }

    /// Weeks start on Monday, shifted by the 1-hour accumulation slot.
    fn week(now: NaiveDateTime, past_weeks: i64) -> Self {
        let since_monday = i64::from(now.weekday().num_days_from_monday());
        let start = midnight(now.date())
            - TimeDelta::days(since_monday)
            - TimeDelta::weeks(past_weeks)
            - TimeDelta::hours(1);
        Self::new(start, TimeDelta::weeks(1))
    }

    fn month(now: NaiveDateTime, past_months: u32) -> Option<Self> {
        let first_day = now.date().with_day(1)?.checked_sub_months(Months::new(past_months))?;
        let next_first_day = first_day.checked_add_months(Months::new(1))?;
        Some(Self::new(midnight(first_day), next_first_day - first_day))
    }

    fn year(now: NaiveDateTime, past_years: i32) -> Option<Self> {
        let first_day = NaiveDate::from_ymd_opt(now.year() - past_years, 1, 1)?;
        Some(Self::new(midnight(first_day), TimeDelta::days(Self::DAYS_IN_A_YEAR)))
    }

    /// Starts on 1970-01-02 to stay clear of the epoch in any timezone.
    fn total(now: NaiveDateTime) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(1970, 1, 2)?.and_hms_opt(0, 0, 1)?;
        Some(Self::new(start, now - start))
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
