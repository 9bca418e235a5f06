//! This crate computes what the calendar views of a to-do and calendar app display.
//!
//! A monthly view is a long, scrollable list of week rows. [`WeekGrid`] generates these rows for a date range,
//! [`VisibleMonthTracker`] decides which month the header shows as the rows scroll by,
//! and [`EventsByDateIndex`] gives the events to draw in each day cell.
//!
//! Every date is a [`CalendarDate`], i.e. a day in a single reference calendar: instants are projected into
//! a [`ReferenceZone`] once, and all further computations are done in whole days.
//!
//! The [`task`] module provides the to-do list that is displayed next to the calendar.

pub mod error;
pub use error::{Error, Result};
pub mod date;
pub use date::{CalendarDate, Month, ReferenceZone};
pub mod week;
pub use week::{Week, WeekId};
pub mod grid;
pub use grid::{WeekGrid, WeekGridCache};
pub mod tracker;
pub use tracker::VisibleMonthTracker;
pub mod event;
pub use event::{CalendarEvent, EventKinds, EventType};
pub mod index;
pub use index::EventsByDateIndex;
pub mod task;
pub use task::{Task, TaskGroup, TaskList};

pub mod settings;
pub mod logging;
