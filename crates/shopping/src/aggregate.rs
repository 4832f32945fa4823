use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

use chrono::NaiveDate;
use mealpick_shared::{MealTime, catalog::Unit, slot::ScheduledSlot};
use serde::Serialize;

use crate::{IngredientLookup, compare_names};

/// Where one slot added to a shopping line.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Contribution {
    pub slot_id: String,
    pub meal_id: String,
    pub meal_name: String,
    pub date: NaiveDate,
    pub meal_time: MealTime,
    pub is_from_side: bool,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ShoppingLine {
    pub name: String,
    pub unit: Unit,
    /// Total across every contribution. 0 means "as needed".
    pub quantity: f64,
    pub used_in: Vec<Contribution>,
}

impl ShoppingLine {
    pub fn is_as_needed(&self) -> bool {
        self.quantity == 0.0
    }
}

impl fmt::Display for ShoppingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_as_needed() {
            return write!(f, "{}: as needed", self.name);
        }

        let rounded = (self.quantity * 100.0).round() / 100.0;
        write!(f, "{}: {} {}", self.name, rounded, self.unit)
    }
}

/// Groups quantities by exact name and unit, keeping first-seen order until
/// the final sort.
#[derive(Default)]
struct Accumulator {
    index: HashMap<(String, Unit), usize>,
    lines: Vec<ShoppingLine>,
}

impl Accumulator {
    fn add(&mut self, name: &str, unit: Unit, quantity: f64, used_in: Vec<Contribution>) {
        match self.index.get(&(name.to_owned(), unit)) {
            Some(&pos) => {
                let line = &mut self.lines[pos];
                line.quantity += quantity;
                line.used_in.extend(used_in);
            }
            None => {
                self.index.insert((name.to_owned(), unit), self.lines.len());
                self.lines.push(ShoppingLine {
                    name: name.to_owned(),
                    unit,
                    quantity,
                    used_in,
                });
            }
        }
    }

    fn finish(mut self) -> Vec<ShoppingLine> {
        self.lines.sort_by(|a, b| {
            compare_names(&a.name, &b.name).then_with(|| a.unit.cmp(&b.unit))
        });

        self.lines
    }
}

/// Sums the ingredients of every slot, scaled by its servings.
///
/// The selected side's lines are added next to the meal's and flagged with
/// `is_from_side`. Lines only merge when name (case-sensitive) and unit are
/// equal. Missing lookups contribute nothing.
pub fn aggregate_shopping_list(
    slots: &[ScheduledSlot],
    lookup: &IngredientLookup,
) -> Vec<ShoppingLine> {
    let mut acc = Accumulator::default();

    for slot in slots {
        let sides = slot
            .side_id
            .as_deref()
            .map(|id| lookup.side(id))
            .unwrap_or_default();
        let lines = lookup
            .meal(&slot.meal_id)
            .iter()
            .map(|line| (line, false))
            .chain(sides.iter().map(|line| (line, true)));

        for (line, is_from_side) in lines {
            acc.add(
                &line.ingredient_name,
                line.unit,
                line.quantity * slot.servings,
                vec![Contribution {
                    slot_id: slot.id.to_owned(),
                    meal_id: slot.meal_id.to_owned(),
                    meal_name: slot.meal_name.to_owned(),
                    date: slot.date,
                    meal_time: slot.meal_time,
                    is_from_side,
                }],
            );
        }
    }

    acc.finish()
}

/// One shopping list per calendar day that has slots.
pub fn aggregate_shopping_list_by_day(
    slots: &[ScheduledSlot],
    lookup: &IngredientLookup,
) -> BTreeMap<NaiveDate, Vec<ShoppingLine>> {
    let mut days: BTreeMap<NaiveDate, Vec<ScheduledSlot>> = BTreeMap::new();
    for slot in slots {
        days.entry(slot.date).or_default().push(slot.clone());
    }

    days.into_iter()
        .map(|(date, slots)| (date, aggregate_shopping_list(&slots, lookup)))
        .collect()
}

/// Aggregates only the slots falling on one of `dates`.
pub fn shopping_list_for_dates(
    slots: &[ScheduledSlot],
    dates: &[NaiveDate],
    lookup: &IngredientLookup,
) -> Vec<ShoppingLine> {
    let selected = slots
        .iter()
        .filter(|slot| dates.contains(&slot.date))
        .cloned()
        .collect::<Vec<_>>();

    aggregate_shopping_list(&selected, lookup)
}

/// Combines two aggregated lists with the same keying as
/// [`aggregate_shopping_list`]. Contributions of `a` come before those of `b`.
pub fn merge_shopping_lists(a: &[ShoppingLine], b: &[ShoppingLine]) -> Vec<ShoppingLine> {
    let mut acc = Accumulator::default();

    for line in a.iter().chain(b) {
        acc.add(&line.name, line.unit, line.quantity, line.used_in.clone());
    }

    acc.finish()
}
