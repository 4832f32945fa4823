use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{MealTime, day_of_week};

/// Forces a delivery meal on a weekday and meal-time.
/// `day_of_week` counts from Sunday = 0 to Saturday = 6.
#[derive(Validate, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DeliveryRule {
    pub id: String,
    #[validate(range(max = 6, message = "Day of week must be between 0 (Sunday) and 6"))]
    pub day_of_week: u8,
    pub meal_time: MealTime,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl DeliveryRule {
    pub fn applies(&self, date: NaiveDate, meal_time: MealTime) -> bool {
        self.enabled && self.day_of_week == day_of_week(date) && self.meal_time == meal_time
    }
}

pub fn requires_delivery(rules: &[DeliveryRule], date: NaiveDate, meal_time: MealTime) -> bool {
    rules.iter().any(|rule| rule.applies(date, meal_time))
}
