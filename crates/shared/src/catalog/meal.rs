use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

use crate::MealTime;

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    #[strum(to_string = "simple", serialize = "Sencillas")]
    #[serde(alias = "Sencillas")]
    Simple,
    #[strum(to_string = "elaborate", serialize = "Elaborada")]
    #[serde(alias = "Elaborada")]
    Elaborate,
    #[strum(to_string = "delivery", serialize = "No casera")]
    #[serde(alias = "No casera")]
    Delivery,
}

#[derive(Validate, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct MealItem {
    #[validate(length(min = 1, message = "Meal id cannot be empty"))]
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[validate(length(min = 1, message = "Meal name cannot be empty"))]
    pub name: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub side_ids: Vec<String>,
    #[serde(default)]
    pub use_count: u32,
    #[serde(default)]
    pub preparation: String,
    #[serde(default)]
    pub variations: String,
    #[serde(default)]
    pub preference: String,
}

impl MealItem {
    /// A meal counts as delivery when it sits in the delivery tier or carries
    /// a label mentioning delivery.
    pub fn is_delivery_eligible(&self) -> bool {
        self.difficulty == Difficulty::Delivery
            || self
                .labels
                .iter()
                .any(|label| label.to_lowercase().contains("delivery"))
    }

    /// Unlabelled meals fit every meal-time. Otherwise one label has to
    /// contain one of the meal-time keywords, ignoring case.
    pub fn matches_meal_time(&self, meal_time: MealTime) -> bool {
        if self.labels.is_empty() {
            return true;
        }

        self.labels.iter().any(|label| {
            let label = label.to_lowercase();
            meal_time
                .labels()
                .iter()
                .any(|keyword| label.contains(&keyword.to_lowercase()))
        })
    }

    pub fn default_side(&self) -> Option<&str> {
        self.side_ids.first().map(|id| id.as_str())
    }

    pub fn accepts_side(&self, side_id: &str) -> bool {
        self.side_ids.iter().any(|id| id == side_id)
    }
}
