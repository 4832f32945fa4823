mod delivery;
mod ingredient;
mod meal;
mod side;

pub use delivery::*;
pub use ingredient::*;
pub use meal::*;
pub use side::*;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Catalog {
    pub meals: Vec<MealItem>,
    pub sides: Vec<SideItem>,
}

impl Catalog {
    pub fn new(meals: Vec<MealItem>, sides: Vec<SideItem>) -> Self {
        Self { meals, sides }
    }

    pub fn meal(&self, id: &str) -> Option<&MealItem> {
        self.meals.iter().find(|meal| meal.id == id)
    }

    pub fn meal_by_code(&self, code: &str) -> Option<&MealItem> {
        let code = code.trim();
        self.meals
            .iter()
            .find(|meal| !meal.code.is_empty() && meal.code.eq_ignore_ascii_case(code))
    }

    pub fn side(&self, id: &str) -> Option<&SideItem> {
        self.sides.iter().find(|side| side.id == id)
    }

    /// Drops side references that point at no known side. Each dropped
    /// reference is returned so callers can report it; none of them is fatal.
    pub fn resolve_side_references(&mut self) -> Vec<Error> {
        let known: HashSet<&str> = self.sides.iter().map(|side| side.id.as_str()).collect();
        let mut dropped = vec![];

        for meal in self.meals.iter_mut() {
            meal.side_ids.retain(|side| {
                if known.contains(side.as_str()) {
                    return true;
                }

                dropped.push(Error::UnresolvedSideReference {
                    meal: meal.id.to_owned(),
                    side: side.to_owned(),
                });

                false
            });
        }

        dropped
    }
}
