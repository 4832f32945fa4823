use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

/// Closed unit vocabulary. Quantities only ever add up within the same unit,
/// there is no conversion between them.
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
#[strum(ascii_case_insensitive)]
pub enum Unit {
    #[default]
    #[strum(to_string = "gramos", serialize = "grams", serialize = "g")]
    #[serde(rename = "gramos")]
    Grams,
    #[strum(to_string = "pieza", serialize = "piece")]
    #[serde(rename = "pieza")]
    Piece,
    #[strum(to_string = "cucharada", serialize = "tablespoon")]
    #[serde(rename = "cucharada")]
    Tablespoon,
    #[strum(to_string = "cucharadita", serialize = "teaspoon")]
    #[serde(rename = "cucharadita")]
    Teaspoon,
    #[strum(to_string = "taza", serialize = "cup")]
    #[serde(rename = "taza")]
    Cup,
    #[strum(to_string = "ml", serialize = "milliliter")]
    #[serde(rename = "ml")]
    Milliliter,
    #[strum(to_string = "tiras", serialize = "strip")]
    #[serde(rename = "tiras")]
    Strip,
    #[strum(to_string = "rebanada", serialize = "slice")]
    #[serde(rename = "rebanada")]
    Slice,
}

/// Which catalog item an ingredient line belongs to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Owner {
    Meal(String),
    Side(String),
}

impl Owner {
    pub fn id(&self) -> &str {
        match self {
            Owner::Meal(id) | Owner::Side(id) => id,
        }
    }

    pub fn is_side(&self) -> bool {
        matches!(self, Owner::Side(_))
    }
}

/// Amount of one ingredient needed for a single serving of its owner.
/// A quantity of 0 means the amount is unspecified ("as needed").
#[derive(Validate, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IngredientLine {
    pub owner: Owner,
    #[validate(length(min = 1, message = "Ingredient name cannot be empty"))]
    pub ingredient_name: String,
    pub unit: Unit,
    #[validate(range(min = 0.0, message = "Quantity cannot be negative"))]
    pub quantity: f64,
}

impl IngredientLine {
    pub fn meal(
        meal_id: impl Into<String>,
        ingredient_name: impl Into<String>,
        unit: Unit,
        quantity: f64,
    ) -> Self {
        Self {
            owner: Owner::Meal(meal_id.into()),
            ingredient_name: ingredient_name.into(),
            unit,
            quantity,
        }
    }

    pub fn side(
        side_id: impl Into<String>,
        ingredient_name: impl Into<String>,
        unit: Unit,
        quantity: f64,
    ) -> Self {
        Self {
            owner: Owner::Side(side_id.into()),
            ingredient_name: ingredient_name.into(),
            unit,
            quantity,
        }
    }
}
