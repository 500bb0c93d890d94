//! Calendar-day date ranges in local time

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone};

use crate::error::{Error, Result};

/// Day/month/year, as typed on the command line
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// An inclusive range of local calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<Local>,
    /// First instant after the last included day
    end: DateTime<Local>,
}

impl DateRange {
    /// Range covering `first` through `last`, both days included
    pub fn new(first: NaiveDate, last: NaiveDate) -> Result<Self> {
        let after_last = last
            .succ_opt()
            .ok_or_else(|| Error::InvalidQuery(format!("date {last} is out of range")))?;
        Ok(Self {
            start: local_midnight(first)?,
            end: local_midnight(after_last)?,
        })
    }

    /// Parse `DD/MM/YYYY,DD/MM/YYYY`
    pub fn parse(value: &str) -> Result<Self> {
        let dates = value.split(',').map(str::trim).collect::<Vec<_>>();
        let [first, last] = dates.as_slice() else {
            return Err(Error::InvalidQuery(format!(
                "date range must be DD/MM/YYYY,DD/MM/YYYY, got '{value}'"
            )));
        };
        Self::new(parse_day(first)?, parse_day(last)?)
    }

    /// Whether `instant` falls on one of the covered days (local time)
    pub fn contains(&self, instant: &DateTime<FixedOffset>) -> bool {
        let local = instant.with_timezone(&Local);
        self.start <= local && local < self.end
    }
}

fn parse_day(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|error| Error::InvalidQuery(format!("invalid date '{raw}': {error}")))
}

fn local_midnight(day: NaiveDate) -> Result<DateTime<Local>> {
    Local
        .from_local_datetime(&day.and_time(NaiveTime::MIN))
        .earliest()
        .ok_or_else(|| Error::InvalidQuery(format!("midnight of {day} does not exist locally")))
}
