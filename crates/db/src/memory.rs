use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use mealpick_shared::{
    Error, Result,
    catalog::{DeliveryRule, IngredientLine, MealItem, Owner, SideItem},
    slot::{NewSlot, ScheduledSlot},
};
use tokio::sync::RwLock;

use crate::{Store, new_slot_id, sort_slots};

#[derive(Default)]
struct Tables {
    meals: BTreeMap<String, MealItem>,
    sides: BTreeMap<String, SideItem>,
    ingredient_lines: HashMap<Owner, Vec<IngredientLine>>,
    delivery_rules: BTreeMap<String, DeliveryRule>,
    slots: HashMap<String, ScheduledSlot>,
}

/// Store kept entirely in process memory. Used by tests and by the CLI when
/// no database is configured.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_all_meals(&self) -> Result<Vec<MealItem>> {
        Ok(self.tables.read().await.meals.values().cloned().collect())
    }

    async fn get_all_sides(&self) -> Result<Vec<SideItem>> {
        Ok(self.tables.read().await.sides.values().cloned().collect())
    }

    async fn get_ingredient_lines_for_meal(&self, meal_id: &str) -> Result<Vec<IngredientLine>> {
        let tables = self.tables.read().await;

        Ok(tables
            .ingredient_lines
            .get(&Owner::Meal(meal_id.to_owned()))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_ingredient_lines_for_side(&self, side_id: &str) -> Result<Vec<IngredientLine>> {
        let tables = self.tables.read().await;

        Ok(tables
            .ingredient_lines
            .get(&Owner::Side(side_id.to_owned()))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_delivery_rules(&self) -> Result<Vec<DeliveryRule>> {
        Ok(self
            .tables
            .read()
            .await
            .delivery_rules
            .values()
            .cloned()
            .collect())
    }

    async fn get_slots_in_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduledSlot>> {
        let tables = self.tables.read().await;
        let mut slots = tables
            .slots
            .values()
            .filter(|slot| slot.date >= start && slot.date <= end)
            .cloned()
            .collect::<Vec<_>>();

        sort_slots(&mut slots);

        Ok(slots)
    }

    async fn get_slot(&self, id: &str) -> Result<Option<ScheduledSlot>> {
        Ok(self.tables.read().await.slots.get(id).cloned())
    }

    async fn create_slots(&self, slots: Vec<NewSlot>) -> Result<Vec<ScheduledSlot>> {
        self.replace_slots(&[], slots).await
    }

    async fn replace_slots(
        &self,
        delete_ids: &[String],
        slots: Vec<NewSlot>,
    ) -> Result<Vec<ScheduledSlot>> {
        let mut tables = self.tables.write().await;
        if let Some(missing) = delete_ids.iter().find(|id| !tables.slots.contains_key(*id)) {
            return Err(Error::NotFound(format!("slot {missing}")));
        }

        for id in delete_ids {
            tables.slots.remove(id);
        }

        let mut created = Vec::with_capacity(slots.len());
        for slot in slots {
            let slot = slot.into_slot(new_slot_id());
            tables.slots.insert(slot.id.to_owned(), slot.clone());
            created.push(slot);
        }

        Ok(created)
    }

    async fn update_slot(&self, slot: &ScheduledSlot) -> Result<()> {
        let mut tables = self.tables.write().await;
        let Some(current) = tables.slots.get_mut(&slot.id) else {
            return Err(Error::NotFound(format!("slot {}", slot.id)));
        };

        *current = slot.clone();

        Ok(())
    }

    async fn delete_slot(&self, id: &str) -> Result<()> {
        match self.tables.write().await.slots.remove(id) {
            Some(_) => Ok(()),
            None => Err(Error::NotFound(format!("slot {id}"))),
        }
    }

    async fn put_meal(&self, meal: &MealItem) -> Result<()> {
        self.tables
            .write()
            .await
            .meals
            .insert(meal.id.to_owned(), meal.clone());

        Ok(())
    }

    async fn put_side(&self, side: &SideItem) -> Result<()> {
        self.tables
            .write()
            .await
            .sides
            .insert(side.id.to_owned(), side.clone());

        Ok(())
    }

    async fn replace_ingredient_lines(
        &self,
        owner: &Owner,
        lines: &[IngredientLine],
    ) -> Result<()> {
        self.tables
            .write()
            .await
            .ingredient_lines
            .insert(owner.clone(), lines.to_vec());

        Ok(())
    }

    async fn put_delivery_rule(&self, rule: &DeliveryRule) -> Result<()> {
        self.tables
            .write()
            .await
            .delivery_rules
            .insert(rule.id.to_owned(), rule.clone());

        Ok(())
    }
}
