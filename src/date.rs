//! Calendar days and months
//!
//! Every date handled by this crate is a [`CalendarDate`], i.e. a day in a single reference calendar.
//! Instants (e.g. the start of an event) are turned into calendar days only once, through [`CalendarDate::from_instant`],
//! so that all further arithmetic is done in whole days and can never be fooled by DST transitions.

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, FixedOffset, Local, NaiveDate, Offset, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// The time zone instants are projected into before being turned into calendar days
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReferenceZone {
    Utc,
    /// The time zone of the machine this code runs on
    Local,
    /// A fixed offset east of UTC
    Fixed { offset_seconds: i32 },
}

impl Default for ReferenceZone {
    fn default() -> Self {
        ReferenceZone::Local
    }
}

impl ReferenceZone {
    /// The local calendar day of an instant
    pub fn day_of(&self, instant: &DateTime<Utc>) -> NaiveDate {
        match self {
            ReferenceZone::Utc => instant.date_naive(),
            ReferenceZone::Local => instant.with_timezone(&Local).date_naive(),
            ReferenceZone::Fixed { offset_seconds } => instant.with_timezone(&fixed_offset(*offset_seconds)).date_naive(),
        }
    }

    /// The local hour (0..24) of an instant
    pub fn hour_of(&self, instant: &DateTime<Utc>) -> u32 {
        match self {
            ReferenceZone::Utc => instant.hour(),
            ReferenceZone::Local => instant.with_timezone(&Local).hour(),
            ReferenceZone::Fixed { offset_seconds } => instant.with_timezone(&fixed_offset(*offset_seconds)).hour(),
        }
    }
}

/// The offset of a `Fixed` zone. Offsets of a day or more are not valid, UTC is used instead
fn fixed_offset(offset_seconds: i32) -> FixedOffset {
    match FixedOffset::east_opt(offset_seconds) {
        Some(offset) => offset,
        None => {
            log::warn!("Invalid offset {}s, using UTC instead", offset_seconds);
            Utc.fix()
        },
    }
}



/// A day in the reference calendar
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Returns `None` if this is not a valid date
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The local calendar day an instant falls on
    pub fn from_instant(instant: &DateTime<Utc>, zone: &ReferenceZone) -> Self {
        Self(zone.day_of(instant))
    }

    /// The current day
    pub fn today(zone: &ReferenceZone) -> Self {
        Self::from_instant(&Utc::now(), zone)
    }

    pub fn as_naive(&self) -> NaiveDate { self.0 }
    pub fn year(&self) -> i32          { self.0.year() }
    pub fn month(&self) -> u32         { self.0.month() }
    pub fn day(&self) -> u32           { self.0.day() }
    pub fn weekday(&self) -> Weekday   { self.0.weekday() }

    /// Move by a number of whole days (that can be negative).
    /// Returns `None` if the result is out of the range of supported dates
    pub fn add_days(&self, days: i64) -> Option<Self> {
        let moved = if days >= 0 {
            self.0.checked_add_days(Days::new(days as u64))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        moved.map(Self)
    }

    /// Number of days from `other` to `self`
    pub fn days_since(&self, other: &CalendarDate) -> i64 {
        self.0.signed_duration_since(other.0).num_days()
    }

    /// Move by a number of years, clamping Feb 29th to Feb 28th when needed.
    /// Returns `None` if the result is out of the range of supported dates
    pub fn add_years(&self, years: i32) -> Option<Self> {
        let year = self.year().checked_add(years)?;
        NaiveDate::from_ymd_opt(year, self.month(), self.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, self.month(), self.day() - 1))
            .map(Self)
    }

    /// How many days this date is after the given first day of the week (0..7)
    pub fn weekday_offset(&self, first_day_of_week: Weekday) -> u32 {
        (self.weekday().num_days_from_monday() + 7 - first_day_of_week.num_days_from_monday()) % 7
    }

    /// The month this date belongs to
    pub fn month_of(&self) -> Month {
        Month { year: self.year(), month: self.month() }
    }

    pub fn is_same_month(&self, other: &CalendarDate) -> bool {
        self.month_of() == other.month_of()
    }

    /// Formats this date with a `chrono` format string
    pub fn format(&self, fmt: &str) -> String {
        self.0.format(fmt).to_string()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = chrono::ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self)
    }
}



/// A calendar month, e.g. the one displayed in the header of a monthly view
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMonth")]
pub struct Month {
    // Field order matters: months are sorted by year first
    year: i32,
    month: u32,
}

impl Month {
    /// Returns `None` unless `month` is in 1..=12 and the month is in the range of supported dates
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn year(&self) -> i32  { self.year }
    pub fn month(&self) -> u32 { self.month }

    /// The first day of this month
    pub fn first_day(&self) -> CalendarDate {
        // year and month have been validated at construction
        CalendarDate::from_ymd(self.year, self.month, 1)
            .unwrap_or_else(|| CalendarDate(NaiveDate::MIN))
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Returns `None` past the last supported month
    pub fn next(&self) -> Option<Self> {
        if self.month == 12 {
            Self::new(self.year.checked_add(1)?, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// Returns `None` before the first supported month
    pub fn previous(&self) -> Option<Self> {
        if self.month == 1 {
            Self::new(self.year.checked_sub(1)?, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    /// An identifier such as `3-2024`, stable for a given month
    pub fn id(&self) -> String {
        format!("{}-{}", self.month, self.year)
    }

    /// A human readable name, such as `March 2024`
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y")
    }
}

/// Serialized form of a [`Month`], validated before use
#[derive(Deserialize)]
struct RawMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawMonth> for Month {
    type Error = String;

    fn try_from(raw: RawMonth) -> Result<Self, Self::Error> {
        Month::new(raw.year, raw.month)
            .ok_or_else(|| format!("{}-{} is not a valid month", raw.month, raw.year))
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.label())
    }
}
