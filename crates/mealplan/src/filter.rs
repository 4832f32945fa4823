use chrono::NaiveDate;
use mealpick_shared::{
    MealTime,
    catalog::{DeliveryRule, MealItem, requires_delivery},
};
use strum::{AsRefStr, Display};

use crate::{PickerConfig, RecentWindow};

/// Everything the filter chain needs to know about the slot being filled.
#[derive(Debug, Clone, Copy)]
pub struct SlotContext<'a> {
    pub date: NaiveDate,
    pub meal_time: MealTime,
    pub rules: &'a [DeliveryRule],
    pub recent: &'a RecentWindow,
    pub config: &'a PickerConfig,
}

impl SlotContext<'_> {
    /// True when delivery rules are honoured and one of them covers this slot.
    pub fn requires_delivery(&self) -> bool {
        self.config.require_delivery_if_ruled
            && requires_delivery(self.rules, self.date, self.meal_time)
    }
}

#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum FilterStep {
    MealTime,
    Delivery,
    Repetition,
}

#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum StepOutcome {
    /// The step is disabled or does not concern this slot.
    Skipped,
    /// The filtered set was non-empty and replaced the candidates.
    Applied,
    /// The filtered set was empty; the candidates were kept unchanged.
    FellBack,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterTrace {
    pub steps: Vec<(FilterStep, StepOutcome)>,
}

impl FilterTrace {
    pub fn outcome(&self, step: FilterStep) -> Option<StepOutcome> {
        self.steps
            .iter()
            .find(|(s, _)| *s == step)
            .map(|(_, outcome)| *outcome)
    }
}

/// Returns the first non-empty tier together with its index. When every tier
/// is empty the last one (empty) is returned.
pub fn first_non_empty<T>(tiers: Vec<Vec<T>>) -> (usize, Vec<T>) {
    let last = tiers.len().saturating_sub(1);

    for (index, tier) in tiers.into_iter().enumerate() {
        if !tier.is_empty() || index == last {
            return (index, tier);
        }
    }

    (0, vec![])
}

fn apply_step<'a>(
    trace: &mut FilterTrace,
    step: FilterStep,
    enabled: bool,
    candidates: Vec<&'a MealItem>,
    keep: impl Fn(&MealItem) -> bool,
) -> Vec<&'a MealItem> {
    if !enabled {
        trace.steps.push((step, StepOutcome::Skipped));
        return candidates;
    }

    let filtered = candidates
        .iter()
        .copied()
        .filter(|meal| keep(*meal))
        .collect::<Vec<_>>();

    let (tier, candidates) = first_non_empty(vec![filtered, candidates]);
    let outcome = if tier == 0 {
        StepOutcome::Applied
    } else {
        StepOutcome::FellBack
    };

    if outcome == StepOutcome::FellBack {
        tracing::debug!(step = %step, "filter matched nothing, keeping previous candidates");
    }

    trace.steps.push((step, outcome));

    candidates
}

/// Narrows `meals` for one slot through the meal-time, delivery and
/// repetition steps, in that order.
///
/// Each step falls back to its input when it would leave nothing, so a
/// non-empty input always yields a non-empty output.
pub fn filter_candidates<'a>(
    meals: &[&'a MealItem],
    context: &SlotContext<'_>,
) -> (Vec<&'a MealItem>, FilterTrace) {
    let mut trace = FilterTrace::default();
    let config = context.config;

    let candidates = apply_step(
        &mut trace,
        FilterStep::MealTime,
        config.respect_meal_time_labels,
        meals.to_vec(),
        |meal| meal.matches_meal_time(context.meal_time),
    );

    let candidates = apply_step(
        &mut trace,
        FilterStep::Delivery,
        context.requires_delivery(),
        candidates,
        |meal| meal.is_delivery_eligible(),
    );

    let candidates = apply_step(
        &mut trace,
        FilterStep::Repetition,
        config.avoid_repetition,
        candidates,
        |meal| !context.recent.is_recent(&meal.id),
    );

    (candidates, trace)
}

#[cfg(test)]
mod tests {
    use mealpick_shared::catalog::Difficulty;

    use super::*;
    use crate::History;

    fn meal(id: &str, labels: &[&str], difficulty: Difficulty) -> MealItem {
        MealItem {
            id: id.to_owned(),
            name: id.to_owned(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            difficulty,
            ..Default::default()
        }
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 20).unwrap()
    }

    fn ids(meals: &[&MealItem]) -> Vec<String> {
        meals.iter().map(|m| m.id.to_owned()).collect()
    }

    #[test]
    fn test_first_non_empty() {
        assert_eq!(first_non_empty(vec![vec![1], vec![2, 3]]), (0, vec![1]));
        assert_eq!(first_non_empty(vec![vec![], vec![2, 3]]), (1, vec![2, 3]));
        assert_eq!(first_non_empty::<u8>(vec![vec![], vec![]]), (1, vec![]));
        assert_eq!(first_non_empty::<u8>(vec![]), (0, vec![]));
    }

    #[test]
    fn test_meal_time_tier_keeps_matching_and_unlabelled() {
        let breakfast = meal("b", &["Desayuno"], Difficulty::Simple);
        let dinner = meal("d", &["Cena"], Difficulty::Simple);
        let anything = meal("a", &[], Difficulty::Simple);
        let meals = vec![&breakfast, &dinner, &anything];
        let config = PickerConfig::default();
        let recent = RecentWindow::default();
        let context = SlotContext {
            date: monday(),
            meal_time: MealTime::Dinner,
            rules: &[],
            recent: &recent,
            config: &config,
        };

        let (candidates, trace) = filter_candidates(&meals, &context);

        assert_eq!(ids(&candidates), vec!["d", "a"]);
        assert_eq!(trace.outcome(FilterStep::MealTime), Some(StepOutcome::Applied));
        assert_eq!(trace.outcome(FilterStep::Delivery), Some(StepOutcome::Skipped));
    }

    #[test]
    fn test_meal_time_tier_falls_back() {
        let breakfast = meal("b", &["Desayuno"], Difficulty::Simple);
        let meals = vec![&breakfast];
        let config = PickerConfig::default();
        let recent = RecentWindow::default();
        let context = SlotContext {
            date: monday(),
            meal_time: MealTime::Dinner,
            rules: &[],
            recent: &recent,
            config: &config,
        };

        let (candidates, trace) = filter_candidates(&meals, &context);

        assert_eq!(ids(&candidates), vec!["b"]);
        assert_eq!(trace.outcome(FilterStep::MealTime), Some(StepOutcome::FellBack));
    }

    #[test]
    fn test_delivery_tier() {
        let home = meal("home", &["Cena"], Difficulty::Elaborate);
        let pizza = meal("pizza", &["Cena"], Difficulty::Delivery);
        let sushi = meal("sushi", &["Cena", "delivery"], Difficulty::Simple);
        let meals = vec![&home, &pizza, &sushi];
        let rules = vec![DeliveryRule {
            id: "dr".to_owned(),
            day_of_week: 1,
            meal_time: MealTime::Dinner,
            enabled: true,
        }];
        let mut config = PickerConfig::default();
        let recent = RecentWindow::default();

        let context = SlotContext {
            date: monday(),
            meal_time: MealTime::Dinner,
            rules: &rules,
            recent: &recent,
            config: &config,
        };
        let (candidates, trace) = filter_candidates(&meals, &context);
        assert_eq!(ids(&candidates), vec!["pizza", "sushi"]);
        assert_eq!(trace.outcome(FilterStep::Delivery), Some(StepOutcome::Applied));

        config.require_delivery_if_ruled = false;
        let context = SlotContext {
            date: monday(),
            meal_time: MealTime::Dinner,
            rules: &rules,
            recent: &recent,
            config: &config,
        };
        let (candidates, _) = filter_candidates(&meals, &context);
        assert_eq!(candidates.len(), 3);
    }

    #[test]
    fn test_delivery_tier_falls_back_without_delivery_meals() {
        let home = meal("home", &[], Difficulty::Simple);
        let meals = vec![&home];
        let rules = vec![DeliveryRule {
            id: "dr".to_owned(),
            day_of_week: 1,
            meal_time: MealTime::Dinner,
            enabled: true,
        }];
        let config = PickerConfig::default();
        let recent = RecentWindow::default();
        let context = SlotContext {
            date: monday(),
            meal_time: MealTime::Dinner,
            rules: &rules,
            recent: &recent,
            config: &config,
        };

        let (candidates, trace) = filter_candidates(&meals, &context);
        assert_eq!(ids(&candidates), vec!["home"]);
        assert_eq!(trace.outcome(FilterStep::Delivery), Some(StepOutcome::FellBack));
    }

    #[test]
    fn test_repetition_tier() {
        let a = meal("a", &[], Difficulty::Simple);
        let b = meal("b", &[], Difficulty::Simple);
        let meals = vec![&a, &b];
        let config = PickerConfig::default();

        let mut history = History::new();
        history.push(monday().pred_opt().unwrap(), "a");
        let recent = history.window(monday(), 7);
        let context = SlotContext {
            date: monday(),
            meal_time: MealTime::Lunch,
            rules: &[],
            recent: &recent,
            config: &config,
        };
        let (candidates, trace) = filter_candidates(&meals, &context);
        assert_eq!(ids(&candidates), vec!["b"]);
        assert_eq!(trace.outcome(FilterStep::Repetition), Some(StepOutcome::Applied));

        history.push(monday(), "b");
        let recent = history.window(monday(), 7);
        let context = SlotContext {
            recent: &recent,
            ..context
        };
        let (candidates, trace) = filter_candidates(&meals, &context);
        assert_eq!(ids(&candidates), vec!["a", "b"], "pool exhausted, repetition allowed");
        assert_eq!(trace.outcome(FilterStep::Repetition), Some(StepOutcome::FellBack));
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        let config = PickerConfig::default();
        let recent = RecentWindow::default();
        let context = SlotContext {
            date: monday(),
            meal_time: MealTime::Lunch,
            rules: &[],
            recent: &recent,
            config: &config,
        };

        let (candidates, _) = filter_candidates(&[], &context);
        assert!(candidates.is_empty());
    }
}
