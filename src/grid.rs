//! Week grids: the rows of a scrollable monthly view

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::convert::TryFrom;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::error::{Error, Result};
use crate::settings::CalendarSettings;
use crate::week::{Week, WeekId};

/// Consecutive full weeks covering a date range
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWeekGrid")]
pub struct WeekGrid {
    first_day_of_week: Weekday,
    weeks: Vec<Week>,
}

impl WeekGrid {
    /// Generate the weeks covering `start..=end`.
    ///
    /// The first week starts on the last `first_day_of_week` that is not after `start`, and weeks are added until one ends on or after `end`.
    /// Hence the first and last weeks may contain days outside of the range, and `start == end` still gives one full week.
    ///
    /// Returns [`Error::InvalidRange`] if `start` is after `end`,
    /// and [`Error::OutOfRange`] if the padded weeks do not fit in the range of supported dates
    pub fn generate(start: CalendarDate, end: CalendarDate, first_day_of_week: Weekday) -> Result<Self> {
        if start > end {
            log::warn!("Refusing to generate a week grid from {} to {}", start, end);
            return Err(Error::InvalidRange { start, end });
        }

        let mut weeks = Vec::new();
        let mut week = Week::containing(start, first_day_of_week).ok_or_else(|| {
            log::warn!("The week of {} is out of the supported range", start);
            Error::OutOfRange(start)
        })?;
        while week.last() < end {
            let next = week.next().ok_or_else(|| {
                log::warn!("The week after {} is out of the supported range", week.last());
                Error::OutOfRange(week.last())
            })?;
            weeks.push(week);
            week = next;
        }
        weeks.push(week);

        log::debug!("Generated {} weeks from {} to {} (weeks start on {})", weeks.len(), start, end, first_day_of_week);
        Ok(Self { first_day_of_week, weeks })
    }

    /// The grid a scrollable monthly view shows around `today`, as configured by `settings`
    pub fn around(today: CalendarDate, settings: &CalendarSettings) -> Result<Self> {
        let shifted = |years: u32, forward: bool| {
            i32::try_from(years)
                .ok()
                .and_then(|years| today.add_years(if forward { years } else { -years }))
                .ok_or(Error::OutOfRange(today))
        };
        let start = shifted(settings.past_years, false)?;
        let end = shifted(settings.future_years, true)?;
        Self::generate(start, end, settings.first_day_of_week)
    }

    pub fn first_day_of_week(&self) -> Weekday { self.first_day_of_week }
    pub fn weeks(&self) -> &[Week]             { &self.weeks }
    pub fn len(&self) -> usize                 { self.weeks.len() }
    pub fn is_empty(&self) -> bool             { self.weeks.is_empty() }

    /// The first day of the grid, which may be before the requested start
    pub fn first_date(&self) -> Option<CalendarDate> {
        self.weeks.first().map(|w| w.first())
    }

    /// The last day of the grid, which may be after the requested end
    pub fn last_date(&self) -> Option<CalendarDate> {
        self.weeks.last().map(|w| w.last())
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.position_of(date).is_some()
    }

    /// The index of the week that contains `date`, e.g. to scroll to today
    pub fn position_of(&self, date: &CalendarDate) -> Option<usize> {
        let first = self.first_date()?;
        if *date < first {
            return None;
        }
        let index = (date.days_since(&first) / 7) as usize;
        if index < self.weeks.len() {
            Some(index)
        } else {
            None
        }
    }

    pub fn week_by_id(&self, id: &WeekId) -> Option<&Week> {
        self.position_of(&id.first_day())
            .map(|i| &self.weeks[i])
            .filter(|w| w.id() == *id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Week> {
        self.weeks.iter()
    }
}

/// Serialized form of a [`WeekGrid`], checked for contiguous weeks before use
#[derive(Deserialize)]
struct RawWeekGrid {
    first_day_of_week: Weekday,
    weeks: Vec<Week>,
}

impl TryFrom<RawWeekGrid> for WeekGrid {
    type Error = String;

    fn try_from(raw: RawWeekGrid) -> std::result::Result<Self, Self::Error> {
        if raw.weeks.is_empty() {
            return Err("A week grid has at least one week".to_string());
        }
        for week in &raw.weeks {
            if week.first().weekday() != raw.first_day_of_week {
                return Err(format!("Week {} does not start on {}", week.id(), raw.first_day_of_week));
            }
        }
        for pair in raw.weeks.windows(2) {
            if pair[1].first().days_since(&pair[0].last()) != 1 {
                return Err(format!("Week {} does not follow week {}", pair[1].id(), pair[0].id()));
            }
        }
        Ok(Self { first_day_of_week: raw.first_day_of_week, weeks: raw.weeks })
    }
}

impl<'a> IntoIterator for &'a WeekGrid {
    type Item = &'a Week;
    type IntoIter = std::slice::Iter<'a, Week>;

    fn into_iter(self) -> Self::IntoIter {
        self.weeks.iter()
    }
}



/// Remembers the grids that have already been generated
#[derive(Default, Debug)]
pub struct WeekGridCache {
    grids: HashMap<(CalendarDate, CalendarDate, Weekday), WeekGrid>,
}

impl WeekGridCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the grid for these parameters, generating it if it is not known yet
    pub fn get_or_generate(&mut self, start: CalendarDate, end: CalendarDate, first_day_of_week: Weekday) -> Result<&WeekGrid> {
        match self.grids.entry((start, end, first_day_of_week)) {
            Entry::Occupied(entry) => {
                log::trace!("Re-using the week grid from {} to {}", start, end);
                Ok(entry.into_mut())
            },
            Entry::Vacant(entry) => {
                let grid = WeekGrid::generate(start, end, first_day_of_week)?;
                Ok(entry.insert(grid))
            },
        }
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    pub fn clear(&mut self) {
        self.grids.clear();
    }
}
