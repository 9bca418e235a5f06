//! Calendar events

use bitflags::bitflags;
use chrono::{DateTime, Utc};
use csscolorparser::Color;
use serde::{Deserialize, Serialize};

use crate::date::{CalendarDate, ReferenceZone};

/// What an event is about. This drives the colour it is displayed with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Meeting,
    Deadline,
    Reminder,
    Task,
}

impl EventType {
    pub fn all() -> [EventType; 4] {
        [EventType::Meeting, EventType::Deadline, EventType::Reminder, EventType::Task]
    }

    /// The translucent colour an event of this kind is drawn with
    pub fn default_color(&self) -> Color {
        match self {
            EventType::Meeting => Color { r: 0.0, g: 0.0, b: 1.0, a: 0.2 },
            EventType::Deadline => Color { r: 1.0, g: 0.0, b: 0.0, a: 0.2 },
            EventType::Task | EventType::Reminder => Color { r: 0.0, g: 0.5, b: 0.0, a: 0.2 },
        }
    }
}

bitflags! {
    /// A set of event kinds, used to filter what a calendar cell displays
    #[derive(Serialize, Deserialize)]
    pub struct EventKinds: u8 {
        const MEETING = 1;
        const DEADLINE = 2;
        const REMINDER = 4;
        const TASK = 8;
    }
}

impl From<EventType> for EventKinds {
    fn from(kind: EventType) -> Self {
        match kind {
            EventType::Meeting => EventKinds::MEETING,
            EventType::Deadline => EventKinds::DEADLINE,
            EventType::Reminder => EventKinds::REMINDER,
            EventType::Task => EventKinds::TASK,
        }
    }
}



/// A calendar event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    title: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    is_all_day: bool,
    kind: EventType,
    completed: bool,
}

impl CalendarEvent {
    /// Create a new, uncompleted, timed event
    pub fn new(title: String, start: DateTime<Utc>, end: DateTime<Utc>, kind: EventType) -> Self {
        if end < start {
            log::warn!("Event {:?} ends before it starts", title);
        }
        Self {
            title,
            start,
            end,
            is_all_day: false,
            kind,
            completed: false,
        }
    }

    /// Mark this event as lasting all day
    pub fn all_day(mut self) -> Self {
        self.is_all_day = true;
        self
    }

    pub fn title(&self) -> &str           { &self.title     }
    pub fn start(&self) -> &DateTime<Utc> { &self.start     }
    pub fn end(&self) -> &DateTime<Utc>   { &self.end       }
    pub fn is_all_day(&self) -> bool      { self.is_all_day }
    pub fn kind(&self) -> EventType       { self.kind       }
    pub fn completed(&self) -> bool       { self.completed  }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// The calendar day this event is displayed on, i.e. the local day it starts on
    pub fn day(&self, zone: &ReferenceZone) -> CalendarDate {
        CalendarDate::from_instant(&self.start, zone)
    }

    /// The local hour this event starts at
    pub fn start_hour(&self, zone: &ReferenceZone) -> u32 {
        zone.hour_of(&self.start)
    }

    /// Whether this event ends on a later local day than it starts
    pub fn spans_multiple_days(&self, zone: &ReferenceZone) -> bool {
        CalendarDate::from_instant(&self.end, zone) > self.day(zone)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn event_days() {
        let event = CalendarEvent::new(
            "Late call".to_string(),
            Utc.with_ymd_and_hms(2024, 3, 5, 22, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 5, 23, 30, 0).unwrap(),
            EventType::Meeting,
        );
        let utc = ReferenceZone::Utc;
        let tokyo = ReferenceZone::Fixed { offset_seconds: 9 * 3600 };

        assert_eq!(event.day(&utc), CalendarDate::from_ymd(2024, 3, 5).unwrap());
        assert_eq!(event.day(&tokyo), CalendarDate::from_ymd(2024, 3, 6).unwrap());
        assert_eq!(event.start_hour(&utc), 22);
        assert_eq!(event.start_hour(&tokyo), 7);
        assert!(event.spans_multiple_days(&utc) == false);
        // 22:00 UTC is 00:00 in UTC+2, 23:30 UTC is still the same day there
        assert!(event.spans_multiple_days(&ReferenceZone::Fixed { offset_seconds: 2 * 3600 }) == false);
        assert!(event.spans_multiple_days(&ReferenceZone::Fixed { offset_seconds: 3600 + 1800 }));
    }

    #[test]
    fn completion_and_all_day() {
        let mut event = CalendarEvent::new(
            "Pay rent".to_string(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(),
            EventType::Deadline,
        ).all_day();
        assert!(event.is_all_day());
        assert!(event.completed() == false);
        event.set_completed(true);
        assert!(event.completed());
    }

    #[test]
    fn kinds() {
        let meetings_and_tasks = EventKinds::MEETING | EventKinds::TASK;
        assert!(meetings_and_tasks.contains(EventKinds::from(EventType::Task)));
        assert!(meetings_and_tasks.contains(EventKinds::from(EventType::Deadline)) == false);
        assert_eq!(EventType::all().iter().fold(EventKinds::empty(), |acc, k| acc | EventKinds::from(*k)), EventKinds::all());

        assert_eq!(EventType::Task.default_color(), EventType::Reminder.default_color());
        assert!(EventType::Meeting.default_color() != EventType::Deadline.default_color());
        assert_eq!(serde_json::to_string(&EventType::Deadline).unwrap(), "\"deadline\"");
    }
}
