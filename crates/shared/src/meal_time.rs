use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

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
    PartialOrd,
    Ord,
    Hash,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum MealTime {
    Breakfast,
    #[default]
    Lunch,
    Dinner,
    Snack,
}

pub const DEFAULT_MEAL_TIMES: [MealTime; 3] =
    [MealTime::Breakfast, MealTime::Lunch, MealTime::Dinner];

impl MealTime {
    /// Catalog label keywords that mark a meal as suitable for this meal-time.
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            MealTime::Breakfast => &["Desayuno"],
            MealTime::Lunch => &["Comida"],
            MealTime::Dinner => &["Cena", "Comida"],
            MealTime::Snack => &["Snack", "Desayuno"],
        }
    }

    /// Resolves the meal-time column of an imported week table, which may use
    /// either the English name or the catalog's Spanish label.
    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(meal_time) = value.parse::<MealTime>() {
            return Some(meal_time);
        }

        match value.to_lowercase().as_str() {
            "desayuno" => Some(MealTime::Breakfast),
            "comida" => Some(MealTime::Lunch),
            "cena" => Some(MealTime::Dinner),
            "merienda" => Some(MealTime::Snack),
            _ => None,
        }
    }
}
