use mealpick_shared::{catalog::IngredientLine, slot::ScheduledSlot};
use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::IngredientLookup;

#[derive(Display, AsRefStr, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IngredientOrigin {
    Meal,
    Side,
    Both,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct IngredientUse {
    pub slot: ScheduledSlot,
    pub found_in: IngredientOrigin,
}

/// Slots whose meal or selected side lists `name`, compared without regard
/// to case.
pub fn find_slots_using_ingredient(
    name: &str,
    slots: &[ScheduledSlot],
    lookup: &IngredientLookup,
) -> Vec<IngredientUse> {
    let wanted = name.trim().to_lowercase();
    let contains = |lines: &[IngredientLine]| {
        lines
            .iter()
            .any(|line| line.ingredient_name.to_lowercase() == wanted)
    };

    slots
        .iter()
        .filter_map(|slot| {
            let in_meal = contains(lookup.meal(&slot.meal_id));
            let in_side = slot
                .side_id
                .as_deref()
                .is_some_and(|id| contains(lookup.side(id)));

            let found_in = match (in_meal, in_side) {
                (true, true) => IngredientOrigin::Both,
                (true, false) => IngredientOrigin::Meal,
                (false, true) => IngredientOrigin::Side,
                (false, false) => return None,
            };

            Some(IngredientUse {
                slot: slot.clone(),
                found_in,
            })
        })
        .collect()
}
