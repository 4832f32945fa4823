use std::collections::{BTreeSet, HashMap};

use mealpick_db::Store;
use mealpick_shared::{Result, catalog::IngredientLine, slot::ScheduledSlot};

/// Ingredient lines per meal and per side. Ids without an entry have no
/// ingredients.
#[derive(Debug, Clone, Default)]
pub struct IngredientLookup {
    meals: HashMap<String, Vec<IngredientLine>>,
    sides: HashMap<String, Vec<IngredientLine>>,
}

impl IngredientLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_meal(&mut self, meal_id: impl Into<String>, lines: Vec<IngredientLine>) {
        self.meals.insert(meal_id.into(), lines);
    }

    pub fn insert_side(&mut self, side_id: impl Into<String>, lines: Vec<IngredientLine>) {
        self.sides.insert(side_id.into(), lines);
    }

    pub fn meal(&self, meal_id: &str) -> &[IngredientLine] {
        self.meals.get(meal_id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn side(&self, side_id: &str) -> &[IngredientLine] {
        self.sides.get(side_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Fetches the lines of every meal and side referenced by `slots`.
    pub async fn load(store: &dyn Store, slots: &[ScheduledSlot]) -> Result<Self> {
        let meal_ids = slots
            .iter()
            .map(|slot| slot.meal_id.as_str())
            .collect::<BTreeSet<_>>();
        let side_ids = slots
            .iter()
            .filter_map(|slot| slot.side_id.as_deref())
            .collect::<BTreeSet<_>>();

        let mut lookup = Self::new();

        for id in &meal_ids {
            lookup.insert_meal(*id, store.get_ingredient_lines_for_meal(id).await?);
        }

        for id in &side_ids {
            lookup.insert_side(*id, store.get_ingredient_lines_for_side(id).await?);
        }

        tracing::debug!(
            meals = meal_ids.len(),
            sides = side_ids.len(),
            "ingredient lookup loaded"
        );

        Ok(lookup)
    }
}
