use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SideItem {
    #[validate(length(min = 1, message = "Side id cannot be empty"))]
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[validate(length(min = 1, message = "Side name cannot be empty"))]
    pub name: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub preference: String,
}
