//! Per-day buckets of calendar events, as displayed in the cells of a calendar

use std::collections::BTreeMap;

use crate::date::{CalendarDate, ReferenceZone};
use crate::event::{CalendarEvent, EventKinds};
use crate::week::Week;

/// Calendar events, grouped by the local day they start on
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventsByDateIndex {
    zone: ReferenceZone,
    buckets: BTreeMap<CalendarDate, Vec<CalendarEvent>>,
    n_events: usize,
}

impl EventsByDateIndex {
    /// Build an index out of a list of events.
    ///
    /// Each event is stored under the day its start falls on in `zone`, even if it lasts several days.
    /// Events of a given day are sorted by start time (events that start at the same time keep their relative order).
    pub fn index_for<'a, I>(events: I, zone: ReferenceZone) -> Self
    where
        I: IntoIterator<Item = &'a CalendarEvent>,
    {
        let mut buckets: BTreeMap<CalendarDate, Vec<CalendarEvent>> = BTreeMap::new();
        let mut n_events = 0;
        for event in events {
            buckets.entry(event.day(&zone))
                .or_insert_with(Vec::new)
                .push(event.clone());
            n_events += 1;
        }

        for bucket in buckets.values_mut() {
            bucket.sort_by_key(|event| *event.start());
        }

        log::debug!("Indexed {} events over {} days", n_events, buckets.len());
        Self { zone, buckets, n_events }
    }

    /// The events of a given day. This is empty for a day without events
    pub fn lookup(&self, date: &CalendarDate) -> &[CalendarEvent] {
        match self.buckets.get(date) {
            Some(events) => events,
            None => &[],
        }
    }

    /// The events of a given day whose kind is in `kinds`
    pub fn lookup_kinds(&self, date: &CalendarDate, kinds: EventKinds) -> Vec<&CalendarEvent> {
        self.lookup(date)
            .iter()
            .filter(|event| kinds.contains(EventKinds::from(event.kind())))
            .collect()
    }

    /// The events of a given day that start during `hour` (local time), e.g. for a row of a weekly view
    pub fn events_in_hour(&self, date: &CalendarDate, hour: u32) -> Vec<&CalendarEvent> {
        self.lookup(date)
            .iter()
            .filter(|event| event.start_hour(&self.zone) == hour)
            .collect()
    }

    /// The events of every day of a week, in order
    pub fn for_week<'a>(&'a self, week: &'a Week) -> impl Iterator<Item = (CalendarDate, &'a [CalendarEvent])> + 'a {
        week.days().iter().map(move |day| (*day, self.lookup(day)))
    }

    /// The days that have at least one event, in ascending order
    pub fn dates(&self) -> impl Iterator<Item = &CalendarDate> {
        self.buckets.keys()
    }

    pub fn zone(&self) -> &ReferenceZone {
        &self.zone
    }

    /// The number of indexed events
    pub fn len(&self) -> usize {
        self.n_events
    }

    pub fn is_empty(&self) -> bool {
        self.n_events == 0
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crate::event::EventType;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    fn event(title: &str, day: u32, hour: u32, kind: EventType) -> CalendarEvent {
        CalendarEvent::new(
            title.to_string(),
            Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, day, hour + 1, 0, 0).unwrap(),
            kind,
        )
    }

    #[test]
    fn events_are_sorted_by_start() {
        let events = vec![
            event("B", 5, 14, EventType::Meeting),
            event("A", 5, 9, EventType::Task),
            event("C", 6, 8, EventType::Reminder),
        ];
        let index = EventsByDateIndex::index_for(&events, ReferenceZone::Utc);

        let titles: Vec<&str> = index.lookup(&date(2024, 3, 5)).iter().map(|e| e.title()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(index.lookup(&date(2024, 3, 6)).len(), 1);
        assert_eq!(index.len(), 3);
        assert_eq!(index.dates().cloned().collect::<Vec<_>>(), vec![date(2024, 3, 5), date(2024, 3, 6)]);
    }

    #[test]
    fn same_start_keeps_the_input_order() {
        let events = vec![
            event("first", 5, 9, EventType::Task),
            event("second", 5, 9, EventType::Task),
        ];
        let index = EventsByDateIndex::index_for(&events, ReferenceZone::Utc);
        assert_eq!(index.lookup(&date(2024, 3, 5))[0].title(), "first");
        assert_eq!(index.lookup(&date(2024, 3, 5))[1].title(), "second");
    }

    #[test]
    fn unknown_days_are_empty() {
        let index = EventsByDateIndex::index_for(&Vec::<CalendarEvent>::new(), ReferenceZone::Utc);
        assert!(index.is_empty());
        assert!(index.lookup(&date(2024, 3, 5)).is_empty());
        assert!(index.events_in_hour(&date(2024, 3, 5), 9).is_empty());
    }

    #[test]
    fn days_depend_on_the_zone() {
        let events = vec![event("late", 5, 23, EventType::Meeting)];

        let utc = EventsByDateIndex::index_for(&events, ReferenceZone::Utc);
        assert_eq!(utc.lookup(&date(2024, 3, 5)).len(), 1);

        let berlin = EventsByDateIndex::index_for(&events, ReferenceZone::Fixed { offset_seconds: 3600 });
        assert!(berlin.lookup(&date(2024, 3, 5)).is_empty());
        assert_eq!(berlin.lookup(&date(2024, 3, 6)).len(), 1);
        assert_eq!(berlin.events_in_hour(&date(2024, 3, 6), 0).len(), 1);
    }

    #[test]
    fn multi_day_events_are_only_on_their_first_day() {
        let trip = CalendarEvent::new(
            "Trip".to_string(),
            Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 8, 18, 0, 0).unwrap(),
            EventType::Reminder,
        );
        let index = EventsByDateIndex::index_for(std::iter::once(&trip), ReferenceZone::Utc);
        assert_eq!(index.lookup(&date(2024, 3, 5)), &[trip][..]);
        assert!(index.lookup(&date(2024, 3, 6)).is_empty());
        assert!(index.lookup(&date(2024, 3, 8)).is_empty());
    }

    #[test]
    fn filters() {
        let events = vec![
            event("standup", 5, 9, EventType::Meeting),
            event("report", 5, 9, EventType::Deadline),
            event("lunch", 5, 12, EventType::Reminder),
        ];
        let index = EventsByDateIndex::index_for(&events, ReferenceZone::Utc);
        let day = date(2024, 3, 5);

        let meetings = index.lookup_kinds(&day, EventKinds::MEETING);
        assert_eq!(meetings.len(), 1);
        assert_eq!(meetings[0].title(), "standup");
        assert_eq!(index.lookup_kinds(&day, EventKinds::all()).len(), 3);
        assert!(index.lookup_kinds(&day, EventKinds::empty()).is_empty());

        assert_eq!(index.events_in_hour(&day, 9).len(), 2);
        assert_eq!(index.events_in_hour(&day, 12)[0].title(), "lunch");
        assert!(index.events_in_hour(&day, 13).is_empty());
    }

    #[test]
    fn week_buckets() {
        let events = vec![
            event("monday", 4, 9, EventType::Meeting),
            event("sunday", 10, 9, EventType::Meeting),
            event("next monday", 11, 9, EventType::Meeting),
        ];
        let index = EventsByDateIndex::index_for(&events, ReferenceZone::Utc);
        let week = Week::starting_at(date(2024, 3, 4)).unwrap();

        let counts: Vec<usize> = index.for_week(&week).map(|(_, events)| events.len()).collect();
        assert_eq!(counts, vec![1, 0, 0, 0, 0, 0, 1]);
    }
}
