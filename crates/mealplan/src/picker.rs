use chrono::NaiveDate;
use mealpick_shared::{
    MealTime,
    catalog::{DeliveryRule, MealItem},
};

use crate::{
    FilterTrace, PickerConfig, RandomSource, RecentWindow, SlotContext, filter_candidates,
    score_candidates, select_weighted,
};

#[derive(Debug, Clone)]
pub struct Pick<'a> {
    pub meal: &'a MealItem,
    pub is_delivery: bool,
    pub trace: FilterTrace,
}

/// Filter, score and select one meal for a (date, meal-time) slot.
///
/// Returns `None` only when `meals` is empty.
pub fn pick_one<'a>(
    meals: &[&'a MealItem],
    date: NaiveDate,
    meal_time: MealTime,
    recent: &RecentWindow,
    rules: &[DeliveryRule],
    config: &PickerConfig,
    rng: &mut dyn RandomSource,
) -> Option<Pick<'a>> {
    let context = SlotContext {
        date,
        meal_time,
        rules,
        recent,
        config,
    };

    let (candidates, trace) = filter_candidates(meals, &context);
    let scored = score_candidates(&candidates, recent, &config.weights, rng);
    let meal = select_weighted(&scored, rng)?;

    tracing::debug!(
        %date,
        %meal_time,
        meal = %meal.id,
        candidates = candidates.len(),
        "picked meal"
    );

    Some(Pick {
        meal,
        is_delivery: context.requires_delivery(),
        trace,
    })
}

#[cfg(test)]
mod tests {
    use mealpick_shared::catalog::Difficulty;

    use super::*;
    use crate::{History, StdRandom};

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 20).unwrap()
    }

    #[test]
    fn test_non_empty_catalog_always_picks() {
        let meal = MealItem {
            id: "only".to_owned(),
            labels: vec!["Desayuno".to_owned()],
            ..Default::default()
        };
        let mut history = History::new();
        history.push(monday(), "only");
        let recent = history.window(monday(), 7);
        let mut rng = StdRandom::seeded(1);

        let pick = pick_one(
            &[&meal],
            monday(),
            MealTime::Dinner,
            &recent,
            &[],
            &PickerConfig::default(),
            &mut rng,
        );

        assert_eq!(pick.unwrap().meal.id, "only");
    }

    #[test]
    fn test_empty_catalog_picks_nothing() {
        let mut rng = StdRandom::seeded(1);
        let pick = pick_one(
            &[],
            monday(),
            MealTime::Lunch,
            &RecentWindow::default(),
            &[],
            &PickerConfig::default(),
            &mut rng,
        );

        assert!(pick.is_none());
    }

    #[test]
    fn test_fresh_meal_preferred_over_worn() {
        let fresh = MealItem {
            id: "A".to_owned(),
            use_count: 0,
            ..Default::default()
        };
        let worn = MealItem {
            id: "B".to_owned(),
            use_count: 5,
            ..Default::default()
        };
        let meals = [&fresh, &worn];
        let config = PickerConfig::default();
        let recent = RecentWindow::default();
        let mut rng = StdRandom::seeded(7);

        let mut fresh_count = 0;
        let trials = 2000;
        for _ in 0..trials {
            let pick = pick_one(
                &meals,
                monday(),
                MealTime::Lunch,
                &recent,
                &[],
                &config,
                &mut rng,
            )
            .unwrap();
            if pick.meal.id == "A" {
                fresh_count += 1;
            }
        }

        let share = fresh_count as f64 / trials as f64;
        assert!(fresh_count > trials - fresh_count, "A should win more often");
        assert!(
            (0.7..0.97).contains(&share),
            "A share {share} outside expected range"
        );
    }

    #[test]
    fn test_delivery_rule_forces_delivery_meal() {
        let meals = vec![
            MealItem {
                id: "home-1".to_owned(),
                difficulty: Difficulty::Simple,
                ..Default::default()
            },
            MealItem {
                id: "home-2".to_owned(),
                difficulty: Difficulty::Elaborate,
                ..Default::default()
            },
            MealItem {
                id: "pizza".to_owned(),
                difficulty: Difficulty::Delivery,
                ..Default::default()
            },
        ];
        let refs = meals.iter().collect::<Vec<_>>();
        let rules = vec![DeliveryRule {
            id: "dr".to_owned(),
            day_of_week: 1,
            meal_time: MealTime::Dinner,
            enabled: true,
        }];
        let recent = RecentWindow::default();
        let config = PickerConfig::default();
        let mut rng = StdRandom::seeded(3);

        for _ in 0..100 {
            let pick = pick_one(
                &refs,
                monday(),
                MealTime::Dinner,
                &recent,
                &rules,
                &config,
                &mut rng,
            )
            .unwrap();
            assert_eq!(pick.meal.id, "pizza");
            assert!(pick.is_delivery);
        }

        let pick = pick_one(
            &refs,
            monday(),
            MealTime::Lunch,
            &recent,
            &rules,
            &config,
            &mut rng,
        )
        .unwrap();
        assert!(!pick.is_delivery);
    }
}
