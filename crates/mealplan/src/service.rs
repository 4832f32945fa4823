use std::{collections::HashSet, sync::Arc};

use chrono::{Duration, NaiveDate};
use mealpick_db::{Store, load_catalog};
use mealpick_shared::{
    Error, MealTime, Result, bail,
    catalog::{Catalog, DeliveryRule, MealItem, requires_delivery},
    slot::{NewSlot, ScheduledSlot, SlotAction, SlotEdit, SlotState},
    start_of_week,
};
use validator::Validate;

use crate::{
    DayPlan, History, PickerConfig, Planner, RandomSource, SatisfiedSlots, parse_week_table,
    pick_one, window_start,
};

#[derive(Debug, Clone)]
pub struct PickedMeal {
    pub meal: MealItem,
    pub is_delivery: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Regenerated {
    /// Every slot of the regenerated range after the operation.
    pub slots: Vec<ScheduledSlot>,
    /// Number of non-completed slots that were replaced.
    pub replaced: usize,
    pub unfilled: Vec<(NaiveDate, MealTime)>,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub created: Vec<ScheduledSlot>,
    pub problems: Vec<Error>,
}

struct Prepared {
    catalog: Catalog,
    rules: Vec<DeliveryRule>,
    history: History,
    satisfied: SatisfiedSlots,
    replaceable: Vec<String>,
}

/// Planner operations against a [`Store`].
///
/// Completed slots are never replaced. Regeneration plans the cells of the
/// requested meal-times in range again, seeding the recent window with the
/// slots it keeps, then swaps the non-completed slots for the new plan in a
/// single store write.
#[derive(Clone)]
pub struct MealPlanService {
    store: Arc<dyn Store>,
    config: PickerConfig,
}

impl MealPlanService {
    pub fn new(store: Arc<dyn Store>, config: PickerConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    async fn load_catalog(&self) -> Result<Catalog> {
        let catalog = load_catalog(self.store.as_ref()).await?;
        if catalog.meals.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        Ok(catalog)
    }

    fn window_start(&self, date: NaiveDate) -> NaiveDate {
        window_start(date, self.config.repetition_window_days)
    }

    #[tracing::instrument(skip(self, rng))]
    pub async fn pick_one(
        &self,
        date: NaiveDate,
        meal_time: MealTime,
        rng: &mut dyn RandomSource,
    ) -> Result<PickedMeal> {
        let catalog = self.load_catalog().await?;
        let rules = self.store.get_delivery_rules().await?;
        let existing = self
            .store
            .get_slots_in_date_range(self.window_start(date), date)
            .await?;

        let recent = History::from_slots(&existing)
            .window(date, self.config.repetition_window_days);
        let meals = catalog.meals.iter().collect::<Vec<_>>();

        let pick = pick_one(
            &meals,
            date,
            meal_time,
            &recent,
            &rules,
            &self.config,
            rng,
        )
        .ok_or(Error::EmptyCatalog)?;

        Ok(PickedMeal {
            meal: pick.meal.clone(),
            is_delivery: pick.is_delivery,
        })
    }

    async fn prepare(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        meal_times: &[MealTime],
    ) -> Result<Prepared> {
        let catalog = self.load_catalog().await?;
        let rules = self.store.get_delivery_rules().await?;
        let existing = self
            .store
            .get_slots_in_date_range(self.window_start(start), end)
            .await?;

        let requested = meal_times.iter().copied().collect::<HashSet<_>>();
        let (replaceable, kept): (Vec<_>, Vec<_>) = existing.into_iter().partition(|slot| {
            slot.date >= start
                && !slot.completed
                && requested.contains(&slot.meal_time)
        });

        Ok(Prepared {
            catalog,
            rules,
            history: History::from_slots(&kept),
            satisfied: SatisfiedSlots::from_completed(kept.iter().filter(|s| s.date >= start)),
            replaceable: replaceable.into_iter().map(|slot| slot.id).collect(),
        })
    }

    async fn commit(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        days: Vec<DayPlan>,
        replaceable: Vec<String>,
    ) -> Result<Regenerated> {
        let mut slots = vec![];
        let mut unfilled = vec![];

        for day in days {
            unfilled.extend(day.unfilled.iter().map(|meal_time| (day.date, *meal_time)));
            slots.extend(day.slots);
        }

        let created = self.store.replace_slots(&replaceable, slots).await?.len();
        let replaced = replaceable.len();

        tracing::info!(%start, %end, created, replaced, "slots regenerated");

        Ok(Regenerated {
            slots: self.store.get_slots_in_date_range(start, end).await?,
            replaced,
            unfilled,
        })
    }

    /// Re-plans one day, keeping its completed slots.
    #[tracing::instrument(skip(self, rng))]
    pub async fn regenerate_day(
        &self,
        date: NaiveDate,
        meal_times: &[MealTime],
        rng: &mut dyn RandomSource,
    ) -> Result<Regenerated> {
        let mut prepared = self.prepare(date, date, meal_times).await?;
        let planner = Planner::new(&prepared.catalog, &prepared.rules, &self.config);
        let day = planner.plan_day(
            date,
            meal_times,
            &mut prepared.history,
            &prepared.satisfied,
            rng,
        );

        self.commit(date, date, vec![day], prepared.replaceable).await
    }

    /// Re-plans the Monday-to-Sunday week containing `date`, keeping its
    /// completed slots.
    #[tracing::instrument(skip(self, rng))]
    pub async fn regenerate_week(
        &self,
        date: NaiveDate,
        meal_times: &[MealTime],
        rng: &mut dyn RandomSource,
    ) -> Result<Regenerated> {
        let start = start_of_week(date);
        let end = start + Duration::days(6);

        let mut prepared = self.prepare(start, end, meal_times).await?;
        let planner = Planner::new(&prepared.catalog, &prepared.rules, &self.config);
        let days = planner.plan_week(
            start,
            meal_times,
            &mut prepared.history,
            &prepared.satisfied,
            rng,
        );

        self.commit(start, end, days, prepared.replaceable).await
    }

    pub async fn slots_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduledSlot>> {
        self.store.get_slots_in_date_range(start, end).await
    }

    async fn find_slot(&self, id: &str) -> Result<ScheduledSlot> {
        self.store
            .get_slot(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("slot {id}")))
    }

    fn is_delivery(&self, rules: &[DeliveryRule], date: NaiveDate, meal_time: MealTime) -> bool {
        self.config.require_delivery_if_ruled && requires_delivery(rules, date, meal_time)
    }

    /// Puts `meal_id` on an empty (date, meal-time) cell.
    #[tracing::instrument(skip(self))]
    pub async fn assign_slot(
        &self,
        date: NaiveDate,
        meal_time: MealTime,
        meal_id: &str,
        side_id: Option<String>,
        servings: Option<f64>,
    ) -> Result<ScheduledSlot> {
        let existing = self.store.get_slots_in_date_range(date, date).await?;
        let state = existing
            .iter()
            .find(|slot| slot.meal_time == meal_time)
            .map(|slot| slot.state())
            .unwrap_or(SlotState::Unfilled);
        state.apply(SlotAction::Assign)?;

        let edit = SlotEdit {
            servings,
            ..Default::default()
        };
        edit.validate()?;

        let catalog = self.load_catalog().await?;
        let meal = catalog
            .meal(meal_id)
            .ok_or_else(|| Error::NotFound(format!("meal {meal_id}")))?;

        let side_id = match side_id {
            Some(side) if !meal.accepts_side(&side) => {
                return Err(Error::SideNotCompatible {
                    meal: meal.id.to_owned(),
                    side,
                });
            }
            Some(side) => Some(side),
            None => meal.default_side().map(|id| id.to_owned()),
        };

        let rules = self.store.get_delivery_rules().await?;
        let slot = NewSlot {
            date,
            meal_time,
            meal_id: meal.id.to_owned(),
            meal_name: meal.name.to_owned(),
            side_id,
            servings: servings.unwrap_or(1.0),
            is_delivery: self.is_delivery(&rules, date, meal_time),
        };

        let Some(created) = self.store.create_slots(vec![slot]).await?.pop() else {
            bail!("slot {date} {meal_time} was not created");
        };

        Ok(created)
    }

    /// Changes meal, side or servings of an assigned slot. Changing the meal
    /// resets the side to the new meal's default unless a side is given.
    #[tracing::instrument(skip(self))]
    pub async fn edit_slot(&self, id: &str, edit: SlotEdit) -> Result<ScheduledSlot> {
        edit.validate()?;

        let mut slot = self.find_slot(id).await?;
        slot.state().apply(SlotAction::Edit)?;

        let needs_meal = edit.meal_id.is_some() || matches!(edit.side_id, Some(Some(_)));
        if needs_meal {
            let catalog = self.load_catalog().await?;
            let meal_id = edit.meal_id.as_deref().unwrap_or(&slot.meal_id);
            let meal = catalog
                .meal(meal_id)
                .ok_or_else(|| Error::NotFound(format!("meal {meal_id}")))?;

            if meal.id != slot.meal_id {
                slot.meal_id = meal.id.to_owned();
                slot.meal_name = meal.name.to_owned();
                slot.side_id = meal.default_side().map(|id| id.to_owned());
            }

            if let Some(Some(side)) = &edit.side_id {
                if !meal.accepts_side(side) {
                    return Err(Error::SideNotCompatible {
                        meal: meal.id.to_owned(),
                        side: side.to_owned(),
                    });
                }
                slot.side_id = Some(side.to_owned());
            }
        }

        if let Some(None) = edit.side_id {
            slot.side_id = None;
        }

        if let Some(servings) = edit.servings {
            slot.servings = servings;
        }

        self.store.update_slot(&slot).await?;

        Ok(slot)
    }

    #[tracing::instrument(skip(self))]
    pub async fn complete_slot(&self, id: &str) -> Result<ScheduledSlot> {
        self.set_completed(id, SlotAction::Complete).await
    }

    /// Makes a completed slot replaceable again. The assigned meal stays.
    #[tracing::instrument(skip(self))]
    pub async fn uncomplete_slot(&self, id: &str) -> Result<ScheduledSlot> {
        self.set_completed(id, SlotAction::Uncomplete).await
    }

    async fn set_completed(&self, id: &str, action: SlotAction) -> Result<ScheduledSlot> {
        let mut slot = self.find_slot(id).await?;
        let state = slot.state().apply(action)?;

        slot.completed = state == SlotState::Completed;
        self.store.update_slot(&slot).await?;

        Ok(slot)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_slot(&self, id: &str) -> Result<()> {
        let slot = self.find_slot(id).await?;
        slot.state().apply(SlotAction::Delete)?;

        self.store.delete_slot(id).await
    }

    /// Loads a tab-separated week table onto the week starting at `start`.
    ///
    /// Imported cells replace non-completed slots; cells holding a completed
    /// slot are reported and left untouched.
    #[tracing::instrument(skip(self, text))]
    pub async fn import_week(&self, start: NaiveDate, text: &str) -> Result<ImportReport> {
        let table = parse_week_table(text)?;
        let catalog = self.load_catalog().await?;
        let rules = self.store.get_delivery_rules().await?;
        let (slots, mut problems) = table.to_slots(start, &catalog, &rules);
        problems.extend(table.problems);

        let end = start + Duration::days(6);
        let existing = self.store.get_slots_in_date_range(start, end).await?;

        let mut accepted = Vec::with_capacity(slots.len());
        let mut replaced = vec![];
        for slot in slots {
            let occupant = existing
                .iter()
                .find(|s| s.date == slot.date && s.meal_time == slot.meal_time);

            match occupant {
                Some(current) if current.completed => {
                    problems.push(Error::InvalidTransition {
                        state: SlotState::Completed.to_string(),
                        action: SlotAction::Assign.to_string(),
                    });
                    continue;
                }
                Some(current) if !replaced.contains(&current.id) => {
                    replaced.push(current.id.to_owned());
                }
                _ => {}
            }

            accepted.push(slot);
        }

        let created = self.store.replace_slots(&replaced, accepted).await?;

        for problem in &problems {
            tracing::warn!(error = %problem, "week import skipped an entry");
        }
        tracing::info!(%start, created = created.len(), skipped = problems.len(), "week imported");

        Ok(ImportReport { created, problems })
    }
}
