use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use mealpick_shared::slot::ScheduledSlot;

/// First day of the repetition window ending at `date`, clamped to the
/// earliest representable date.
pub fn window_start(date: NaiveDate, window_days: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(window_days.into()))
        .unwrap_or(NaiveDate::MIN)
}

/// Meals already on the calendar, by date. Grows as the planner fills slots
/// so that later slots see earlier picks.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<(NaiveDate, String)>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slots<'a>(slots: impl IntoIterator<Item = &'a ScheduledSlot>) -> Self {
        Self {
            entries: slots
                .into_iter()
                .map(|slot| (slot.date, slot.meal_id.to_owned()))
                .collect(),
        }
    }

    pub fn push(&mut self, date: NaiveDate, meal_id: impl Into<String>) {
        self.entries.push((date, meal_id.into()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recent window as seen from `date`: entries of `date` itself and of the
    /// `window_days` days before it. Later dates are never visible.
    pub fn window(&self, date: NaiveDate, window_days: u32) -> RecentWindow {
        let from = window_start(date, window_days);
        let mut window = RecentWindow::default();

        for (entry_date, meal_id) in &self.entries {
            if *entry_date == date {
                window.same_day.insert(meal_id.to_owned());
            } else if *entry_date >= from && *entry_date < date {
                window.earlier.insert(meal_id.to_owned());
            }
        }

        window
    }
}

/// Meal ids used around a target date, split between the target date itself
/// and the earlier days of the window.
#[derive(Debug, Clone, Default)]
pub struct RecentWindow {
    same_day: HashSet<String>,
    earlier: HashSet<String>,
}

impl RecentWindow {
    pub fn is_recent(&self, meal_id: &str) -> bool {
        self.is_same_day(meal_id) || self.earlier.contains(meal_id)
    }

    pub fn is_same_day(&self, meal_id: &str) -> bool {
        self.same_day.contains(meal_id)
    }
}
