//! Decides which month the header of a scrolling monthly view shows
//!
//! The decision only depends on what is visible (and on the selected date), never on how the viewport got there.
//! Callers keep the scroll state; [`VisibleMonthTracker`] only remembers its last answer, so that it can keep it when nothing is visible.

use std::collections::{BTreeMap, HashSet};

use crate::date::{CalendarDate, Month};
use crate::settings::{is_valid_weight, CalendarSettings};
use crate::week::Week;

/// Weight of a visible date that does not belong to the month of the selected date
const BASE_WEIGHT: f64 = 1.0;

/// The month of a week the viewport has settled on.
///
/// Its middle day is used, so that a week straddling two months does not make the header flap
pub fn anchored_month(anchor_week: &Week) -> Month {
    anchor_week.mid().month_of()
}

/// The month most of the visible dates belong to.
///
/// Dates in the month of `selected_date` weigh `selected_month_weight`, other ones weigh `1.0`.
/// Ties go to the earliest month. Returns `None` if there is no visible date.
pub fn most_visible_month(visible_dates: &HashSet<CalendarDate>, selected_date: &CalendarDate, selected_month_weight: f64) -> Option<Month> {
    let selected_month = selected_date.month_of();

    let mut weights: BTreeMap<Month, f64> = BTreeMap::new();
    for date in visible_dates {
        let month = date.month_of();
        let weight = if month == selected_month { selected_month_weight } else { BASE_WEIGHT };
        *weights.entry(month).or_insert(0.0) += weight;
    }

    // Months are iterated in ascending order, and only a strictly greater weight replaces the best one
    let mut best: Option<(Month, f64)> = None;
    for (month, weight) in weights {
        if best.map_or(true, |(_, best_weight)| weight > best_weight) {
            best = Some((month, weight));
        }
    }
    best.map(|(month, _)| month)
}



/// Keeps track of the month the header of a monthly view displays
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleMonthTracker {
    current: Month,
    selected_date: CalendarDate,
    selected_month_weight: f64,
}

impl VisibleMonthTracker {
    /// Create a tracker that initially shows the month of `selected_date`.
    ///
    /// A weight that is not a positive number is replaced by a neutral one
    pub fn new(selected_date: CalendarDate, selected_month_weight: f64) -> Self {
        let selected_month_weight = if is_valid_weight(selected_month_weight) {
            selected_month_weight
        } else {
            log::warn!("Invalid selected month weight {}, using {} instead", selected_month_weight, BASE_WEIGHT);
            BASE_WEIGHT
        };
        Self {
            current: selected_date.month_of(),
            selected_date,
            selected_month_weight,
        }
    }

    /// Create a tracker that weighs the selected month as configured by `settings`
    pub fn with_settings(selected_date: CalendarDate, settings: &CalendarSettings) -> Self {
        Self::new(selected_date, settings.selected_month_weight)
    }

    /// The month that has last been decided
    pub fn current(&self) -> Month {
        self.current
    }

    pub fn selected_date(&self) -> CalendarDate {
        self.selected_date
    }

    /// Change the selected date. This does not change the current month until the next update
    pub fn select_date(&mut self, date: CalendarDate) {
        self.selected_date = date;
    }

    /// Decide which month to display, given what is currently visible.
    ///
    /// An anchor week takes precedence over the visible dates.
    /// When nothing is visible and there is no anchor, the previous month is kept.
    pub fn update(&mut self, visible_dates: &HashSet<CalendarDate>, anchor_week: Option<&Week>) -> Month {
        let decided = match anchor_week {
            Some(week) => Some(anchored_month(week)),
            None => most_visible_month(visible_dates, &self.selected_date, self.selected_month_weight),
        };

        match decided {
            Some(month) => {
                if month != self.current {
                    log::trace!("Visible month changes from {} to {}", self.current, month);
                }
                self.current = month;
            },
            None => log::trace!("Nothing is visible, keeping {}", self.current),
        }
        self.current
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> Month {
        Month::new(y, m).unwrap()
    }

    fn days(from: CalendarDate, count: i64) -> HashSet<CalendarDate> {
        (0..count).map(|i| from.add_days(i).unwrap()).collect()
    }

    #[test]
    fn anchored_week_straddling_two_months() {
        let week = Week::starting_at(date(2024, 1, 29)).unwrap();
        let visible = days(date(2024, 1, 29), 7);

        let mut tracker = VisibleMonthTracker::new(date(2024, 1, 15), 1.5);
        assert_eq!(tracker.update(&visible, Some(&week)), month(2024, 2));

        // The anchor wins even though January is favoured by the selected date
        let week = Week::starting_at(date(2024, 2, 26)).unwrap();
        assert_eq!(tracker.update(&HashSet::new(), Some(&week)), month(2024, 2));
        let week = Week::starting_at(date(2024, 2, 27)).unwrap();
        assert_eq!(tracker.update(&HashSet::new(), Some(&week)), month(2024, 3));
    }

    #[test]
    fn weighted_majority() {
        // 3 days of January, 4 days of February
        let visible = days(date(2024, 1, 29), 7);

        assert_eq!(most_visible_month(&visible, &date(2024, 2, 10), 1.5), Some(month(2024, 2)));
        // 3 * 1.5 > 4
        assert_eq!(most_visible_month(&visible, &date(2024, 1, 10), 1.5), Some(month(2024, 1)));
        assert_eq!(most_visible_month(&visible, &date(2024, 6, 10), 1.5), Some(month(2024, 2)));
        assert_eq!(most_visible_month(&HashSet::new(), &date(2024, 6, 10), 1.5), None);
    }

    #[test]
    fn ties_go_to_the_earliest_month() {
        // Dec 30, 31 / Jan 1, 2
        let visible = days(date(2023, 12, 30), 4);
        assert_eq!(most_visible_month(&visible, &date(2024, 5, 1), 1.5), Some(month(2023, 12)));

        // A neutral weight for the selected month does not break the tie
        assert_eq!(most_visible_month(&visible, &date(2024, 1, 1), 1.0), Some(month(2023, 12)));
        assert_eq!(most_visible_month(&visible, &date(2024, 1, 1), 1.5), Some(month(2024, 1)));
    }

    #[test]
    fn several_weeks() {
        // Five rows starting on Feb 26th 2024: 4 days of Feb, 31 days of March
        let visible = days(date(2024, 2, 26), 35);
        assert_eq!(most_visible_month(&visible, &date(2024, 2, 1), 1.5), Some(month(2024, 3)));
    }

    #[test]
    fn nothing_visible_keeps_the_previous_month() {
        let mut tracker = VisibleMonthTracker::new(date(2024, 1, 15), 1.5);
        assert_eq!(tracker.current(), month(2024, 1));

        let visible = days(date(2024, 4, 1), 14);
        assert_eq!(tracker.update(&visible, None), month(2024, 4));
        assert_eq!(tracker.update(&HashSet::new(), None), month(2024, 4));
        assert_eq!(tracker.current(), month(2024, 4));
    }

    #[test]
    fn invalid_weights_are_neutral() {
        // 3 days of January, 4 days of February, January selected
        let visible = days(date(2024, 1, 29), 7);
        for weight in &[f64::NAN, -3.0, 0.0, f64::INFINITY] {
            let mut tracker = VisibleMonthTracker::new(date(2024, 1, 15), *weight);
            assert_eq!(tracker.update(&visible, None), month(2024, 2));
        }

        let settings = CalendarSettings { selected_month_weight: -1.0, ..CalendarSettings::default() };
        let mut tracker = VisibleMonthTracker::with_settings(date(2024, 1, 15), &settings);
        assert_eq!(tracker.update(&visible, None), month(2024, 2));
    }

    #[test]
    fn updates_are_stable() {
        let visible = days(date(2024, 1, 29), 7);
        let mut tracker = VisibleMonthTracker::new(date(2024, 1, 15), 1.5);
        let first = tracker.update(&visible, None);
        for _ in 0..10 {
            assert_eq!(tracker.update(&visible, None), first);
        }

        tracker.select_date(date(2024, 2, 15));
        assert_eq!(tracker.current(), first);
        assert_eq!(tracker.update(&visible, None), month(2024, 2));
        assert_eq!(tracker.selected_date(), date(2024, 2, 15));
    }
}
