use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use validator::Validate;

use crate::{Error, MealTime, Result};

/// A meal assigned to a (date, meal-time) cell of the calendar.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScheduledSlot {
    pub id: String,
    pub date: NaiveDate,
    pub meal_time: MealTime,
    pub meal_id: String,
    pub meal_name: String,
    pub side_id: Option<String>,
    pub servings: f64,
    pub is_delivery: bool,
    #[serde(default)]
    pub completed: bool,
}

impl ScheduledSlot {
    pub fn state(&self) -> SlotState {
        if self.completed {
            SlotState::Completed
        } else {
            SlotState::Assigned
        }
    }
}

/// Slot produced by the planner, before the store hands out an id.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewSlot {
    pub date: NaiveDate,
    pub meal_time: MealTime,
    pub meal_id: String,
    pub meal_name: String,
    pub side_id: Option<String>,
    pub servings: f64,
    pub is_delivery: bool,
}

impl NewSlot {
    pub fn into_slot(self, id: impl Into<String>) -> ScheduledSlot {
        ScheduledSlot {
            id: id.into(),
            date: self.date,
            meal_time: self.meal_time,
            meal_id: self.meal_id,
            meal_name: self.meal_name,
            side_id: self.side_id,
            servings: self.servings,
            is_delivery: self.is_delivery,
            completed: false,
        }
    }
}

/// User edit of an assigned slot. Fields left as `None` keep their value;
/// `side_id: Some(None)` clears the side.
#[derive(Validate, Deserialize, Clone, Debug, Default)]
pub struct SlotEdit {
    pub meal_id: Option<String>,
    pub side_id: Option<Option<String>>,
    #[validate(range(exclusive_min = 0.0, message = "Servings must be greater than 0"))]
    pub servings: Option<f64>,
}

#[derive(EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum SlotState {
    Unfilled,
    Assigned,
    Completed,
    Deleted,
}

#[derive(EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum SlotAction {
    Assign,
    Edit,
    Complete,
    Uncomplete,
    Delete,
}

impl SlotState {
    /// Lifecycle of a slot:
    ///
    /// ```text
    /// unfilled --assign--> assigned --edit--> assigned
    /// assigned --complete--> completed --uncomplete--> assigned
    /// assigned --delete--> deleted
    /// ```
    ///
    /// A completed slot is frozen: it cannot be edited or deleted until it is
    /// uncompleted, and regeneration never replaces it.
    pub fn apply(self, action: SlotAction) -> Result<SlotState> {
        use SlotAction::*;
        use SlotState::*;

        match (self, action) {
            (Unfilled, Assign) => Ok(Assigned),
            (Assigned, Edit) => Ok(Assigned),
            (Assigned, Complete) => Ok(Completed),
            (Completed, Uncomplete) => Ok(Assigned),
            (Assigned, Delete) => Ok(Deleted),
            (state, action) => Err(Error::InvalidTransition {
                state: state.to_string(),
                action: action.to_string(),
            }),
        }
    }
}
