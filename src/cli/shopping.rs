use chrono::{Duration, NaiveDate};
use mealpick_shared::start_of_week;
use mealpick_shopping::{
    IngredientLookup, ShoppingLine, aggregate_shopping_list, aggregate_shopping_list_by_day,
    find_slots_using_ingredient,
};

use crate::config::Config;

use super::{open_store, print_json, today};

fn range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> (NaiveDate, NaiveDate) {
    let from = from.unwrap_or_else(|| start_of_week(today()));
    let to = to.unwrap_or(from + Duration::days(6));

    (from, to)
}

fn print_lines(lines: &[ShoppingLine]) {
    for line in lines {
        println!("  {line}  ({} use(s))", line.used_in.len());
    }
}

#[tracing::instrument(skip(config))]
pub async fn list(
    config: Config,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    by_day: bool,
    json: bool,
) -> anyhow::Result<()> {
    let store = open_store(&config).await?;
    let (from, to) = range(from, to);

    let slots = store.get_slots_in_date_range(from, to).await?;
    let lookup = IngredientLookup::load(store.as_ref(), &slots).await?;

    if by_day {
        let days = aggregate_shopping_list_by_day(&slots, &lookup);
        if json {
            return print_json(&days);
        }

        for (date, lines) in &days {
            println!("{date} ({})", date.format("%A"));
            print_lines(lines);
        }

        return Ok(());
    }

    let lines = aggregate_shopping_list(&slots, &lookup);
    if json {
        return print_json(&lines);
    }

    println!("shopping list {from} .. {to}");
    print_lines(&lines);

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn uses(
    config: Config,
    ingredient: String,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let store = open_store(&config).await?;
    let (from, to) = range(from, to);

    let slots = store.get_slots_in_date_range(from, to).await?;
    let lookup = IngredientLookup::load(store.as_ref(), &slots).await?;

    let uses = find_slots_using_ingredient(&ingredient, &slots, &lookup);
    if uses.is_empty() {
        println!("{ingredient} is not used between {from} and {to}");
    }

    for found in uses {
        println!(
            "{} {:<10} {} (from {})",
            found.slot.date,
            found.slot.meal_time.to_string(),
            found.slot.meal_name,
            found.found_in
        );
    }

    Ok(())
}
