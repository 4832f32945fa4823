use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mealpick_db::{MemoryStore, Store};
use mealpick_mealplan::{MealPlanService, PickerConfig, StdRandom};
use mealpick_shared::{
    DEFAULT_MEAL_TIMES, Error, MealTime, Result,
    catalog::{DeliveryRule, Difficulty, IngredientLine, MealItem, Owner, SideItem},
    slot::{NewSlot, ScheduledSlot, SlotEdit},
};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
}

async fn seeded_store() -> anyhow::Result<Arc<MemoryStore>> {
    let store = Arc::new(MemoryStore::new());

    for (id, code, name, difficulty, sides) in [
        ("m1", "C1", "Pollo asado", Difficulty::Simple, vec!["s1", "s2"]),
        ("m2", "C2", "Lentejas", Difficulty::Simple, vec![]),
        ("m3", "C3", "Lasaña", Difficulty::Elaborate, vec!["s2"]),
        ("m4", "D1", "Tostadas", Difficulty::Simple, vec![]),
        ("m5", "P1", "Pizza", Difficulty::Delivery, vec![]),
    ] {
        store
            .put_meal(&MealItem {
                id: id.to_owned(),
                code: code.to_owned(),
                name: name.to_owned(),
                difficulty,
                side_ids: sides.into_iter().map(|s| s.to_owned()).collect(),
                ..Default::default()
            })
            .await?;
    }

    for (id, name) in [("s1", "Arroz"), ("s2", "Ensalada"), ("s3", "Patatas")] {
        store
            .put_side(&SideItem {
                id: id.to_owned(),
                name: name.to_owned(),
                ..Default::default()
            })
            .await?;
    }

    store
        .put_delivery_rule(&DeliveryRule {
            id: "dr1".to_owned(),
            day_of_week: 6,
            meal_time: MealTime::Dinner,
            enabled: true,
        })
        .await?;

    Ok(store)
}

fn service(store: Arc<MemoryStore>) -> MealPlanService {
    MealPlanService::new(store, PickerConfig::default())
}

#[tokio::test]
async fn test_regenerate_week_fills_every_slot() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let service = service(store.clone());
    let mut rng = StdRandom::seeded(42);

    // Wednesday; the week is planned from Monday 20th.
    let result = service
        .regenerate_week(date(22), &DEFAULT_MEAL_TIMES, &mut rng)
        .await?;

    assert_eq!(result.slots.len(), 21);
    assert_eq!(result.replaced, 0);
    assert!(result.unfilled.is_empty());
    assert_eq!(result.slots[0].date, date(20));
    assert_eq!(result.slots[20].date, date(26));

    let saturday_dinner = result
        .slots
        .iter()
        .find(|slot| slot.date == date(25) && slot.meal_time == MealTime::Dinner)
        .unwrap();
    assert!(saturday_dinner.is_delivery);
    assert!(
        result
            .slots
            .iter()
            .filter(|slot| slot.date != date(25) || slot.meal_time != MealTime::Dinner)
            .all(|slot| !slot.is_delivery)
    );

    Ok(())
}

#[tokio::test]
async fn test_regenerate_keeps_completed_slots() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let service = service(store.clone());
    let mut rng = StdRandom::seeded(7);

    let first = service
        .regenerate_day(date(21), &DEFAULT_MEAL_TIMES, &mut rng)
        .await?;
    assert_eq!(first.slots.len(), 3);

    let lunch = first
        .slots
        .iter()
        .find(|slot| slot.meal_time == MealTime::Lunch)
        .unwrap()
        .clone();
    service.complete_slot(&lunch.id).await?;

    let second = service
        .regenerate_day(date(21), &DEFAULT_MEAL_TIMES, &mut rng)
        .await?;

    assert_eq!(second.slots.len(), 3);
    assert_eq!(second.replaced, 2);
    let kept = second
        .slots
        .iter()
        .find(|slot| slot.meal_time == MealTime::Lunch)
        .unwrap();
    assert_eq!(kept.id, lunch.id);
    assert!(kept.completed);
    assert!(
        second
            .slots
            .iter()
            .filter(|slot| slot.id != lunch.id)
            .all(|slot| slot.meal_id != lunch.meal_id),
        "completed meal is not repeated on the same day"
    );

    Ok(())
}

#[tokio::test]
async fn test_regenerate_only_requested_meal_times() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let service = service(store.clone());
    let mut rng = StdRandom::seeded(3);

    let first = service
        .regenerate_day(date(21), &DEFAULT_MEAL_TIMES, &mut rng)
        .await?;
    let breakfast = first.slots[0].clone();
    assert_eq!(breakfast.meal_time, MealTime::Breakfast);

    let second = service
        .regenerate_day(date(21), &[MealTime::Dinner], &mut rng)
        .await?;

    assert_eq!(second.replaced, 1);
    assert_eq!(second.slots.len(), 3);
    assert!(second.slots.iter().any(|slot| slot.id == breakfast.id));

    Ok(())
}

#[tokio::test]
async fn test_empty_catalog_leaves_calendar_untouched() -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());
    let slot = NewSlot {
        date: date(21),
        meal_time: MealTime::Lunch,
        meal_id: "gone".to_owned(),
        meal_name: "Gone".to_owned(),
        side_id: None,
        servings: 1.0,
        is_delivery: false,
    };
    store.create_slots(vec![slot]).await?;

    let service = service(store.clone());
    let mut rng = StdRandom::seeded(1);

    let result = service
        .regenerate_day(date(21), &DEFAULT_MEAL_TIMES, &mut rng)
        .await;
    assert!(matches!(result, Err(Error::EmptyCatalog)));

    let pick = service.pick_one(date(21), MealTime::Lunch, &mut rng).await;
    assert!(matches!(pick, Err(Error::EmptyCatalog)));

    assert_eq!(
        store.get_slots_in_date_range(date(21), date(21)).await?.len(),
        1
    );

    Ok(())
}

#[tokio::test]
async fn test_pick_one_honors_delivery_rule() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let service = service(store);
    let mut rng = StdRandom::seeded(5);

    let picked = service.pick_one(date(25), MealTime::Dinner, &mut rng).await?;
    assert!(picked.is_delivery);
    assert_eq!(picked.meal.id, "m5");

    let picked = service.pick_one(date(24), MealTime::Dinner, &mut rng).await?;
    assert!(!picked.is_delivery);

    Ok(())
}

#[tokio::test]
async fn test_assign_and_edit_slot() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let service = service(store);

    let slot = service
        .assign_slot(date(21), MealTime::Lunch, "m1", None, None)
        .await?;
    assert_eq!(slot.side_id.as_deref(), Some("s1"));
    assert_eq!(slot.servings, 1.0);

    let taken = service
        .assign_slot(date(21), MealTime::Lunch, "m2", None, None)
        .await;
    assert!(matches!(taken, Err(Error::InvalidTransition { .. })));

    let incompatible = service
        .assign_slot(date(21), MealTime::Dinner, "m1", Some("s3".to_owned()), None)
        .await;
    assert!(matches!(incompatible, Err(Error::SideNotCompatible { .. })));

    let unknown = service
        .assign_slot(date(21), MealTime::Dinner, "m404", None, None)
        .await;
    assert!(matches!(unknown, Err(Error::NotFound(_))));

    let edited = service
        .edit_slot(
            &slot.id,
            SlotEdit {
                side_id: Some(Some("s2".to_owned())),
                servings: Some(3.0),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(edited.side_id.as_deref(), Some("s2"));
    assert_eq!(edited.servings, 3.0);

    let edited = service
        .edit_slot(
            &slot.id,
            SlotEdit {
                meal_id: Some("m3".to_owned()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(edited.meal_name, "Lasaña");
    assert_eq!(edited.side_id.as_deref(), Some("s2"), "reset to new default");

    let rejected = service
        .edit_slot(
            &slot.id,
            SlotEdit {
                side_id: Some(Some("s1".to_owned())),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(rejected, Err(Error::SideNotCompatible { .. })));

    let rejected = service
        .edit_slot(
            &slot.id,
            SlotEdit {
                servings: Some(0.0),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(rejected, Err(Error::Validate(_))));

    Ok(())
}

#[tokio::test]
async fn test_slot_lifecycle() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let service = service(store.clone());

    let slot = service
        .assign_slot(date(22), MealTime::Dinner, "m2", None, None)
        .await?;

    let completed = service.complete_slot(&slot.id).await?;
    assert!(completed.completed);

    assert!(matches!(
        service.complete_slot(&slot.id).await,
        Err(Error::InvalidTransition { .. })
    ));
    assert!(matches!(
        service.delete_slot(&slot.id).await,
        Err(Error::InvalidTransition { .. })
    ));
    assert!(matches!(
        service.edit_slot(&slot.id, SlotEdit::default()).await,
        Err(Error::InvalidTransition { .. })
    ));

    let reopened = service.uncomplete_slot(&slot.id).await?;
    assert!(!reopened.completed);
    assert_eq!(reopened.meal_id, "m2");

    service.delete_slot(&slot.id).await?;
    assert!(store.get_slot(&slot.id).await?.is_none());
    assert!(matches!(
        service.delete_slot(&slot.id).await,
        Err(Error::NotFound(_))
    ));

    Ok(())
}

#[tokio::test]
async fn test_import_week() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let service = service(store.clone());

    let completed = service
        .assign_slot(date(21), MealTime::Lunch, "m2", None, None)
        .await?;
    service.complete_slot(&completed.id).await?;
    let replaced = service
        .assign_slot(date(20), MealTime::Lunch, "m2", None, None)
        .await?;

    let table = "Lunes\t\tMartes\t\n\
Desayuno\tD1\tTostadas\t\t\n\
Comida\tC1\tPollo\tC3\tLasaña\n\
Cena\tZZ\tNada\t\t\n";

    let report = service.import_week(date(20), table).await?;

    assert_eq!(report.created.len(), 2);
    assert_eq!(report.problems.len(), 2, "unknown code and completed cell");

    let slots = service.slots_in_range(date(20), date(26)).await?;
    assert_eq!(slots.len(), 3);
    assert!(slots.iter().all(|slot| slot.id != replaced.id));
    let tuesday_lunch = slots
        .iter()
        .find(|slot| slot.date == date(21) && slot.meal_time == MealTime::Lunch)
        .unwrap();
    assert_eq!(tuesday_lunch.id, completed.id);

    assert!(matches!(
        service.import_week(date(20), "\n").await,
        Err(Error::NoDayLabelsFound)
    ));

    Ok(())
}

#[tokio::test]
async fn test_import_week_fills_a_cell_once() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let service = service(store.clone());

    let occupied = service
        .assign_slot(date(20), MealTime::Lunch, "m3", None, None)
        .await?;

    let table = "Lunes\t\nComida\tC1\tPollo\nComida\tC2\tLentejas";

    let report = service.import_week(date(20), table).await?;
    assert_eq!(report.created.len(), 1);
    assert_eq!(report.problems.len(), 1);
    assert!(matches!(
        report.problems[0],
        Error::MalformedImportRow { row: 3, .. }
    ));

    let monday = service.slots_in_range(date(20), date(20)).await?;
    assert_eq!(monday.len(), 1);
    assert_ne!(monday[0].id, occupied.id);
    assert_eq!(monday[0].meal_id, "m1");

    let report = service.import_week(date(27), table).await?;
    assert_eq!(report.created.len(), 1);
    assert_eq!(service.slots_in_range(date(27), date(27)).await?.len(), 1);

    Ok(())
}

/// Reads from the wrapped store and refuses every slot write.
struct ReadOnlySlots(Arc<MemoryStore>);

#[async_trait]
impl Store for ReadOnlySlots {
    async fn get_all_meals(&self) -> Result<Vec<MealItem>> {
        self.0.get_all_meals().await
    }

    async fn get_all_sides(&self) -> Result<Vec<SideItem>> {
        self.0.get_all_sides().await
    }

    async fn get_ingredient_lines_for_meal(&self, meal_id: &str) -> Result<Vec<IngredientLine>> {
        self.0.get_ingredient_lines_for_meal(meal_id).await
    }

    async fn get_ingredient_lines_for_side(&self, side_id: &str) -> Result<Vec<IngredientLine>> {
        self.0.get_ingredient_lines_for_side(side_id).await
    }

    async fn get_delivery_rules(&self) -> Result<Vec<DeliveryRule>> {
        self.0.get_delivery_rules().await
    }

    async fn get_slots_in_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduledSlot>> {
        self.0.get_slots_in_date_range(start, end).await
    }

    async fn get_slot(&self, id: &str) -> Result<Option<ScheduledSlot>> {
        self.0.get_slot(id).await
    }

    async fn create_slots(&self, _slots: Vec<NewSlot>) -> Result<Vec<ScheduledSlot>> {
        Err(Error::Server("disk full".to_owned()))
    }

    async fn update_slot(&self, _slot: &ScheduledSlot) -> Result<()> {
        Err(Error::Server("disk full".to_owned()))
    }

    async fn delete_slot(&self, _id: &str) -> Result<()> {
        Err(Error::Server("disk full".to_owned()))
    }

    async fn replace_slots(
        &self,
        _delete_ids: &[String],
        _slots: Vec<NewSlot>,
    ) -> Result<Vec<ScheduledSlot>> {
        Err(Error::Server("disk full".to_owned()))
    }

    async fn put_meal(&self, meal: &MealItem) -> Result<()> {
        self.0.put_meal(meal).await
    }

    async fn put_side(&self, side: &SideItem) -> Result<()> {
        self.0.put_side(side).await
    }

    async fn replace_ingredient_lines(
        &self,
        owner: &Owner,
        lines: &[IngredientLine],
    ) -> Result<()> {
        self.0.replace_ingredient_lines(owner, lines).await
    }

    async fn put_delivery_rule(&self, rule: &DeliveryRule) -> Result<()> {
        self.0.put_delivery_rule(rule).await
    }
}

#[tokio::test]
async fn test_failed_write_keeps_the_previous_plan() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let mut rng = StdRandom::seeded(11);

    let planned = service(store.clone())
        .regenerate_week(date(20), &DEFAULT_MEAL_TIMES, &mut rng)
        .await?;
    assert_eq!(planned.slots.len(), 21);

    let failing = MealPlanService::new(
        Arc::new(ReadOnlySlots(store.clone())),
        PickerConfig::default(),
    );

    let result = failing
        .regenerate_week(date(20), &DEFAULT_MEAL_TIMES, &mut rng)
        .await;
    assert!(matches!(result, Err(Error::Server(_))));

    let result = failing
        .import_week(date(20), "Lunes\t\nComida\tC1\tPollo")
        .await;
    assert!(matches!(result, Err(Error::Server(_))));

    let after = store.get_slots_in_date_range(date(20), date(26)).await?;
    assert_eq!(after, planned.slots);

    Ok(())
}

#[tokio::test]
async fn test_huge_repetition_window() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let service = MealPlanService::new(
        store,
        PickerConfig {
            repetition_window_days: u32::MAX,
            ..Default::default()
        },
    );
    let mut rng = StdRandom::seeded(9);

    service.pick_one(date(21), MealTime::Lunch, &mut rng).await?;
    let day = service
        .regenerate_day(date(21), &DEFAULT_MEAL_TIMES, &mut rng)
        .await?;
    assert_eq!(day.slots.len(), 3);

    Ok(())
}
