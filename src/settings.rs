//! Support for library configuration options

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Weekday;
use csscolorparser::Color;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::date::ReferenceZone;
use crate::error::{Error, Result};
use crate::event::EventType;

/// The settings used when a caller does not provide its own.
/// Feel free to override it when initing this library.
pub static SETTINGS: Lazy<Arc<Mutex<CalendarSettings>>> = Lazy::new(|| Arc::new(Mutex::new(CalendarSettings::default())));

/// How calendar views are laid out
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// The weekday every week row starts with
    pub first_day_of_week: Weekday,
    /// The time zone event instants are projected into
    pub zone: ReferenceZone,
    /// How many years before today the scrollable monthly view goes
    pub past_years: u32,
    /// How many years after today the scrollable monthly view goes
    pub future_years: u32,
    /// Weight of a visible date that belongs to the month of the selected date
    pub selected_month_weight: f64,
    /// How many week rows fit in a monthly view
    pub visible_weeks: u32,
    /// Colours that replace the default colour of some event kinds
    pub event_colors: HashMap<EventType, Color>,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            first_day_of_week: Weekday::Mon,
            zone: ReferenceZone::Local,
            past_years: 2,
            future_years: 1,
            selected_month_weight: 1.5,
            visible_weeks: 5,
            event_colors: HashMap::new(),
        }
    }
}

impl CalendarSettings {
    /// A snapshot of the process-wide [`SETTINGS`]
    pub fn current() -> Self {
        match SETTINGS.lock() {
            Ok(settings) => settings.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Replace the process-wide [`SETTINGS`]
    pub fn install(self) {
        match SETTINGS.lock() {
            Ok(mut settings) => *settings = self,
            Err(poisoned) => *poisoned.into_inner() = self,
        }
    }

    /// Read settings from a JSON document. Missing fields take their default value
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()
    }

    /// Read settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|err| {
            log::warn!("Unable to open settings file {:?}: {}", path, err);
            err
        })?;
        let settings: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        let settings = settings.validate()?;
        log::debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Checks the values serde cannot check by itself
    fn validate(self) -> Result<Self> {
        if is_valid_weight(self.selected_month_weight) == false {
            log::warn!("Rejecting settings with a selected month weight of {}", self.selected_month_weight);
            return Err(Error::InvalidSettings(format!("selected_month_weight must be a positive number, got {}", self.selected_month_weight)));
        }
        Ok(self)
    }

    /// The colour events of a given kind are drawn with
    pub fn color_for(&self, kind: EventType) -> Color {
        match self.event_colors.get(&kind) {
            Some(color) => color.clone(),
            None => kind.default_color(),
        }
    }
}

/// Whether a number can be used as the weight of the selected month
pub fn is_valid_weight(weight: f64) -> bool {
    weight.is_finite() && weight > 0.0
}
