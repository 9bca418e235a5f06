//! Weeks, i.e. the rows of a monthly view and the columns of a weekly view

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;

/// Seven consecutive days, starting on a configured weekday
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWeek")]
pub struct Week {
    days: [CalendarDate; 7],
}

impl Week {
    /// The week that starts on `first`.
    /// Returns `None` if it would end past the last supported date
    pub fn starting_at(first: CalendarDate) -> Option<Self> {
        let mut days = [first; 7];
        for (i, day) in days.iter_mut().enumerate() {
            *day = first.add_days(i as i64)?;
        }
        Some(Self { days })
    }

    /// The week that contains `date`, with weeks starting on `first_day_of_week`.
    /// Returns `None` if this week is not entirely in the range of supported dates
    pub fn containing(date: CalendarDate, first_day_of_week: Weekday) -> Option<Self> {
        let offset = date.weekday_offset(first_day_of_week);
        Self::starting_at(date.add_days(-(offset as i64))?)
    }

    pub fn days(&self) -> &[CalendarDate; 7] { &self.days }
    pub fn first(&self) -> CalendarDate      { self.days[0] }
    pub fn last(&self) -> CalendarDate       { self.days[6] }

    /// The middle day of the week.
    /// Unlike the first or last day, it tells which month a week straddling two months mostly belongs to
    pub fn mid(&self) -> CalendarDate {
        self.days[3]
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.first() <= *date && *date <= self.last()
    }

    pub fn next(&self) -> Option<Self> {
        Self::starting_at(self.first().add_days(7)?)
    }

    pub fn previous(&self) -> Option<Self> {
        Self::starting_at(self.first().add_days(-7)?)
    }

    pub fn id(&self) -> WeekId {
        WeekId(self.first())
    }

    /// A short description of this week, such as `Mar 4 - 10, 2024` or `Feb 26 - Mar 3, 2024`
    pub fn range_label(&self) -> String {
        let first = self.first();
        let last = self.last();
        let last_fmt = if first.is_same_month(&last) { "%-d, %Y" } else { "%b %-d, %Y" };
        format!("{} - {}", first.format("%b %-d"), last.format(last_fmt))
    }
}

/// Serialized form of a [`Week`], checked for consecutive days before use
#[derive(Deserialize)]
struct RawWeek {
    days: [CalendarDate; 7],
}

impl TryFrom<RawWeek> for Week {
    type Error = String;

    fn try_from(raw: RawWeek) -> Result<Self, Self::Error> {
        for pair in raw.days.windows(2) {
            if pair[1].days_since(&pair[0]) != 1 {
                return Err(format!("{} does not follow {} in a week", pair[1], pair[0]));
            }
        }
        Ok(Self { days: raw.days })
    }
}

impl<'a> IntoIterator for &'a Week {
    type Item = &'a CalendarDate;
    type IntoIter = std::slice::Iter<'a, CalendarDate>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}



/// Identifies a week by its first day.
///
/// Its text form (`2024-3-4`, no zero padding) can be used as a scroll anchor by a UI
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekId(CalendarDate);

impl WeekId {
    pub fn first_day(&self) -> CalendarDate {
        self.0
    }

    /// Parse a `year-month-day` string. Returns `None` if this is not a valid date
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split('-');
        let year = parts.next()?.parse().ok()?;
        let month = parts.next()?.parse().ok()?;
        let day = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        CalendarDate::from_ymd(year, month, day).map(WeekId)
    }
}

impl From<CalendarDate> for WeekId {
    fn from(date: CalendarDate) -> Self {
        Self(date)
    }
}

impl Display for WeekId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}-{}-{}", self.0.year(), self.0.month(), self.0.day())
    }
}



/// The seven weekdays, in the order they are displayed when weeks start on `first_day_of_week`
pub fn weekdays_from(first_day_of_week: Weekday) -> [Weekday; 7] {
    let mut days = [first_day_of_week; 7];
    for i in 1..7 {
        days[i] = days[i - 1].succ();
    }
    days
}

/// Short weekday names (`Mon`, `Tue`...) for the header of a calendar
pub fn weekday_labels(first_day_of_week: Weekday) -> Vec<String> {
    weekdays_from(first_day_of_week)
        .iter()
        .map(|wd| wd.to_string())
        .collect()
}
