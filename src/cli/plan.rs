use chrono::{Duration, NaiveDate};
use mealpick_shared::{MealTime, start_of_week};

use crate::config::Config;

use super::{print_json, print_slots, random, service, today};

#[tracing::instrument(skip(config))]
pub async fn seed(config: Config) -> anyhow::Result<()> {
    let store = super::open_store(&config).await?;
    let report = crate::demo::seed(store.as_ref()).await?;

    println!(
        "seeded {} meals, {} sides, {} ingredient lines, {} delivery rules",
        report.meals, report.sides, report.ingredient_lines, report.delivery_rules
    );

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn pick(
    config: Config,
    date: Option<NaiveDate>,
    meal_time: MealTime,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let service = service(&config).await?;
    let date = date.unwrap_or_else(today);
    let mut rng = random(seed);

    let picked = service.pick_one(date, meal_time, &mut rng).await?;

    let delivery = if picked.is_delivery { " [delivery]" } else { "" };
    println!(
        "{date} {meal_time}: {} ({}){delivery}",
        picked.meal.name, picked.meal.id
    );

    Ok(())
}

fn meal_times(config: &Config, requested: Vec<MealTime>) -> Vec<MealTime> {
    if requested.is_empty() {
        config.meal_times.clone()
    } else {
        requested
    }
}

#[tracing::instrument(skip(config))]
pub async fn plan_day(
    config: Config,
    date: Option<NaiveDate>,
    requested: Vec<MealTime>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let service = service(&config).await?;
    let date = date.unwrap_or_else(today);
    let meal_times = meal_times(&config, requested);
    let mut rng = random(seed);

    let result = service.regenerate_day(date, &meal_times, &mut rng).await?;

    print_slots(&result.slots);
    println!("replaced {} slot(s)", result.replaced);

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn plan_week(
    config: Config,
    date: Option<NaiveDate>,
    requested: Vec<MealTime>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let service = service(&config).await?;
    let date = date.unwrap_or_else(today);
    let meal_times = meal_times(&config, requested);
    let mut rng = random(seed);

    let result = service.regenerate_week(date, &meal_times, &mut rng).await?;

    print_slots(&result.slots);
    println!("replaced {} slot(s)", result.replaced);
    for (date, meal_time) in &result.unfilled {
        println!("unfilled: {date} {meal_time}");
    }

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn show(
    config: Config,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    json: bool,
) -> anyhow::Result<()> {
    let service = service(&config).await?;
    let from = from.unwrap_or_else(|| start_of_week(today()));
    let to = to.unwrap_or(from + Duration::days(6));

    let slots = service.slots_in_range(from, to).await?;

    if json {
        return print_json(&slots);
    }

    if slots.is_empty() {
        println!("nothing planned between {from} and {to}");
    }
    print_slots(&slots);

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn import_week(
    config: Config,
    file: std::path::PathBuf,
    week: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(&file).await?;
    let service = service(&config).await?;
    let start = start_of_week(week.unwrap_or_else(today));

    let report = service.import_week(start, &text).await?;

    println!("imported {} slot(s) into the week of {start}", report.created.len());
    for problem in &report.problems {
        println!("skipped: {problem}");
    }

    Ok(())
}
