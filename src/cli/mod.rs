pub mod plan;
pub mod shopping;
pub mod slot;

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use mealpick_db::{MemoryStore, Store};
use mealpick_mealplan::{MealPlanService, StdRandom};
use mealpick_shared::slot::ScheduledSlot;

use crate::config::{Config, StoreKind};

/// Opens the configured store. The memory store starts out with the demo
/// catalog since nothing survives between runs.
pub async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
    match config.store.kind {
        StoreKind::Memory => {
            let store = Arc::new(MemoryStore::new());
            crate::demo::seed(store.as_ref()).await?;

            Ok(store)
        }
        StoreKind::Sqlite => open_sqlite(config).await,
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "sqlite")] {
        async fn open_sqlite(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
            let store =
                mealpick_db::SqliteStore::connect(&config.store.url, config.store.max_connections)
                    .await?;

            Ok(Arc::new(store))
        }
    } else {
        async fn open_sqlite(_config: &Config) -> anyhow::Result<Arc<dyn Store>> {
            anyhow::bail!(
                "mealpick was built without the sqlite feature, use store.kind = \"memory\""
            )
        }
    }
}

pub async fn service(config: &Config) -> anyhow::Result<MealPlanService> {
    let store = open_store(config).await?;

    Ok(MealPlanService::new(store, config.planner.clone()))
}

/// Seeded when `--seed` is given so a plan can be reproduced.
pub fn random(seed: Option<u64>) -> StdRandom {
    match seed {
        Some(seed) => StdRandom::seeded(seed),
        None => StdRandom::from_entropy(),
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn print_slots(slots: &[ScheduledSlot]) {
    let mut current = None;

    for slot in slots {
        if current != Some(slot.date) {
            println!("{} ({})", slot.date, slot.date.format("%A"));
            current = Some(slot.date);
        }

        let mut flags = vec![];
        if slot.is_delivery {
            flags.push("delivery".to_owned());
        }
        if slot.completed {
            flags.push("completed".to_owned());
        }
        if slot.servings != 1.0 {
            flags.push(format!("x{}", slot.servings));
        }
        if let Some(side) = &slot.side_id {
            flags.push(format!("side {side}"));
        }

        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };

        println!(
            "  {:<10} {} ({}){}  #{}",
            slot.meal_time.to_string(),
            slot.meal_name,
            slot.meal_id,
            flags,
            slot.id
        );
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}
