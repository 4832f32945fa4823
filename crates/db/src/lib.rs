mod memory;

pub use memory::*;

use async_trait::async_trait;
use chrono::NaiveDate;
use mealpick_shared::{
    Result,
    catalog::{Catalog, DeliveryRule, IngredientLine, MealItem, Owner, SideItem},
    slot::{NewSlot, ScheduledSlot},
};

cfg_if::cfg_if! {
    if #[cfg(feature = "sqlite")] {
        mod m0_1;
        mod sqlite;
        pub mod table;

        pub use sqlite::*;

        use sqlx_migrator::{Info, Migrator};

        pub fn migrator() -> std::result::Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
            let mut migrator = Migrator::default();
            migrator.add_migrations(vec![Box::new(m0_1::Migration)])?;

            Ok(migrator)
        }
    }
}

/// Persistence boundary of the planner. Catalog reads are expected to be
/// stable for the duration of one planning call; slot writes are the only
/// mutation the planner performs.
#[async_trait]
pub trait Store: Send + Sync {
    async fn get_all_meals(&self) -> Result<Vec<MealItem>>;

    async fn get_all_sides(&self) -> Result<Vec<SideItem>>;

    async fn get_ingredient_lines_for_meal(&self, meal_id: &str) -> Result<Vec<IngredientLine>>;

    async fn get_ingredient_lines_for_side(&self, side_id: &str) -> Result<Vec<IngredientLine>>;

    async fn get_delivery_rules(&self) -> Result<Vec<DeliveryRule>>;

    /// Slots whose date lies in `[start, end]`, ordered by date then meal-time.
    async fn get_slots_in_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduledSlot>>;

    async fn get_slot(&self, id: &str) -> Result<Option<ScheduledSlot>>;

    /// Persists new slots and returns them with their assigned ids.
    async fn create_slots(&self, slots: Vec<NewSlot>) -> Result<Vec<ScheduledSlot>>;

    async fn update_slot(&self, slot: &ScheduledSlot) -> Result<()>;

    async fn delete_slot(&self, id: &str) -> Result<()>;

    /// Deletes `delete_ids` and persists `slots` as one unit: when any id is
    /// missing or a write fails, the store is left as it was.
    async fn replace_slots(
        &self,
        delete_ids: &[String],
        slots: Vec<NewSlot>,
    ) -> Result<Vec<ScheduledSlot>>;

    async fn put_meal(&self, meal: &MealItem) -> Result<()>;

    async fn put_side(&self, side: &SideItem) -> Result<()>;

    /// Replaces every ingredient line of `owner` with `lines`.
    async fn replace_ingredient_lines(&self, owner: &Owner, lines: &[IngredientLine])
    -> Result<()>;

    async fn put_delivery_rule(&self, rule: &DeliveryRule) -> Result<()>;
}

/// Reads meals and sides and drops side references that point nowhere.
pub async fn load_catalog(store: &dyn Store) -> Result<Catalog> {
    let mut catalog = Catalog::new(store.get_all_meals().await?, store.get_all_sides().await?);

    for dropped in catalog.resolve_side_references() {
        tracing::warn!(error = %dropped, "dropping side reference");
    }

    Ok(catalog)
}

pub(crate) fn new_slot_id() -> String {
    ulid::Ulid::new().to_string()
}

pub(crate) fn sort_slots(slots: &mut [ScheduledSlot]) {
    slots.sort_by(|a, b| (a.date, a.meal_time).cmp(&(b.date, b.meal_time)));
}
