use std::collections::HashSet;

use chrono::NaiveDate;
use mealpick_shared::{
    MealTime,
    catalog::{Catalog, DeliveryRule, MealItem},
    slot::{NewSlot, ScheduledSlot},
    week_dates,
};

use crate::{History, PickerConfig, RandomSource, first_non_empty, pick_one};

/// (date, meal-time) cells the planner must leave alone, typically those
/// holding a completed slot.
#[derive(Debug, Clone, Default)]
pub struct SatisfiedSlots(HashSet<(NaiveDate, MealTime)>);

impl SatisfiedSlots {
    pub fn from_completed<'a>(slots: impl IntoIterator<Item = &'a ScheduledSlot>) -> Self {
        Self(
            slots
                .into_iter()
                .filter(|slot| slot.completed)
                .map(|slot| (slot.date, slot.meal_time))
                .collect(),
        )
    }

    pub fn insert(&mut self, date: NaiveDate, meal_time: MealTime) {
        self.0.insert((date, meal_time));
    }

    pub fn contains(&self, date: NaiveDate, meal_time: MealTime) -> bool {
        self.0.contains(&(date, meal_time))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub slots: Vec<NewSlot>,
    /// Requested meal-times left without a meal because the catalog is empty.
    pub unfilled: Vec<MealTime>,
}

/// Fills calendar days one meal-time at a time.
///
/// Each pick is pushed into the running [`History`] before the next slot is
/// considered, so later meal-times of the same day and later days see it. A
/// day never sees picks of a later day.
pub struct Planner<'a> {
    catalog: &'a Catalog,
    rules: &'a [DeliveryRule],
    config: &'a PickerConfig,
}

impl<'a> Planner<'a> {
    pub fn new(catalog: &'a Catalog, rules: &'a [DeliveryRule], config: &'a PickerConfig) -> Self {
        Self {
            catalog,
            rules,
            config,
        }
    }

    pub fn plan_day(
        &self,
        date: NaiveDate,
        meal_times: &[MealTime],
        history: &mut History,
        satisfied: &SatisfiedSlots,
        rng: &mut dyn RandomSource,
    ) -> DayPlan {
        let mut plan = DayPlan {
            date,
            slots: vec![],
            unfilled: vec![],
        };
        let mut seen = HashSet::new();

        for &meal_time in meal_times {
            if !seen.insert(meal_time) || satisfied.contains(date, meal_time) {
                continue;
            }

            let recent = history.window(date, self.config.repetition_window_days);

            // Meals not served yet today, or the whole catalog once every meal
            // has been used today.
            let unused_today = self
                .catalog
                .meals
                .iter()
                .filter(|meal| !recent.is_same_day(&meal.id))
                .collect::<Vec<_>>();
            let all = self.catalog.meals.iter().collect::<Vec<&MealItem>>();
            let (_, pool) = first_non_empty(vec![unused_today, all]);

            let Some(pick) = pick_one(
                &pool,
                date,
                meal_time,
                &recent,
                self.rules,
                self.config,
                rng,
            ) else {
                tracing::warn!(%date, %meal_time, "no meal available, slot left unfilled");
                plan.unfilled.push(meal_time);
                continue;
            };

            history.push(date, pick.meal.id.to_owned());

            plan.slots.push(NewSlot {
                date,
                meal_time,
                meal_id: pick.meal.id.to_owned(),
                meal_name: pick.meal.name.to_owned(),
                side_id: pick.meal.default_side().map(|id| id.to_owned()),
                servings: 1.0,
                is_delivery: pick.is_delivery,
            });
        }

        plan
    }

    /// Plans the seven days starting at `start`.
    pub fn plan_week(
        &self,
        start: NaiveDate,
        meal_times: &[MealTime],
        history: &mut History,
        satisfied: &SatisfiedSlots,
        rng: &mut dyn RandomSource,
    ) -> Vec<DayPlan> {
        week_dates(start)
            .into_iter()
            .map(|date| self.plan_day(date, meal_times, history, satisfied, rng))
            .collect()
    }
}
