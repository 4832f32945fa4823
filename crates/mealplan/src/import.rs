use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use mealpick_shared::{
    Error, MealTime, Result,
    catalog::{Catalog, DeliveryRule, requires_delivery},
    slot::NewSlot,
};

/// One filled cell of an imported week table.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekEntry {
    /// 1-based line of the table the entry comes from.
    pub row: usize,
    pub day_index: usize,
    pub meal_time: MealTime,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct WeekTable {
    pub day_labels: Vec<String>,
    pub entries: Vec<WeekEntry>,
    /// Rows or cells that were skipped, as `Error::MalformedImportRow`.
    pub problems: Vec<Error>,
}

/// Parses a tab-separated week table as exported from the planning sheet.
///
/// The header holds one day label every other column (0, 2, 4, ...). Each
/// following row starts with a meal-time and then carries a `(code, name)`
/// pair per day at columns `1 + 2d` and `2 + 2d`.
///
/// A table without day labels is rejected. Rows with an unknown meal-time and
/// cells with only half a pair are reported in `problems` and skipped.
pub fn parse_week_table(text: &str) -> Result<WeekTable> {
    let rows = text
        .trim_matches(|c: char| c == '\n' || c == '\r')
        .lines()
        .map(|line| line.split('\t').collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let Some(header) = rows.first() else {
        return Err(Error::NoDayLabelsFound);
    };

    let day_labels = header
        .iter()
        .step_by(2)
        .map(|label| label.trim())
        .filter(|label| !label.is_empty())
        .map(|label| label.to_owned())
        .collect::<Vec<_>>();

    if day_labels.is_empty() {
        return Err(Error::NoDayLabelsFound);
    }

    let mut table = WeekTable {
        day_labels,
        ..Default::default()
    };

    for (index, cells) in rows.iter().enumerate().skip(1) {
        let row = index + 1;
        let label = cells.first().map(|c| c.trim()).unwrap_or_default();
        if label.is_empty() {
            continue;
        }

        let Some(meal_time) = MealTime::from_label(label) else {
            table.problems.push(Error::MalformedImportRow {
                row,
                reason: format!("unknown meal-time '{label}'"),
            });
            continue;
        };

        for day_index in 0..table.day_labels.len() {
            let cell = |i: usize| cells.get(i).map(|c| c.trim()).unwrap_or_default();
            let code = cell(1 + day_index * 2);
            let name = cell(2 + day_index * 2);

            match (code.is_empty(), name.is_empty()) {
                (true, true) => {}
                (false, false) => table.entries.push(WeekEntry {
                    row,
                    day_index,
                    meal_time,
                    code: code.to_owned(),
                    name: name.to_owned(),
                }),
                _ => table.problems.push(Error::MalformedImportRow {
                    row,
                    reason: format!(
                        "{}: code and name must both be present",
                        table.day_labels[day_index]
                    ),
                }),
            }
        }
    }

    Ok(table)
}

impl WeekTable {
    /// Maps entries onto the seven days from `start`, resolving meal codes
    /// against `catalog`. Entries with an unknown code, a day beyond the
    /// week, or a cell already filled by an earlier row are returned as
    /// problems. At most one slot is produced per (day, meal-time).
    pub fn to_slots(
        &self,
        start: NaiveDate,
        catalog: &Catalog,
        rules: &[DeliveryRule],
    ) -> (Vec<NewSlot>, Vec<Error>) {
        let mut slots = vec![];
        let mut problems = vec![];
        let mut filled_by = HashMap::new();

        for entry in &self.entries {
            if entry.day_index >= 7 {
                problems.push(Error::MalformedImportRow {
                    row: entry.row,
                    reason: format!(
                        "{} is past the end of the week",
                        self.day_labels[entry.day_index]
                    ),
                });
                continue;
            }

            let Some(meal) = catalog.meal_by_code(&entry.code) else {
                problems.push(Error::MalformedImportRow {
                    row: entry.row,
                    reason: format!("unknown meal code '{}' ({})", entry.code, entry.name),
                });
                continue;
            };

            if let Some(first) = filled_by.get(&(entry.day_index, entry.meal_time)) {
                problems.push(Error::MalformedImportRow {
                    row: entry.row,
                    reason: format!(
                        "{} {} is already filled by row {first}",
                        self.day_labels[entry.day_index], entry.meal_time
                    ),
                });
                continue;
            }
            filled_by.insert((entry.day_index, entry.meal_time), entry.row);

            let date = start + Duration::days(entry.day_index as i64);
            slots.push(NewSlot {
                date,
                meal_time: entry.meal_time,
                meal_id: meal.id.to_owned(),
                meal_name: meal.name.to_owned(),
                side_id: meal.default_side().map(|id| id.to_owned()),
                servings: 1.0,
                is_delivery: requires_delivery(rules, date, entry.meal_time),
            });
        }

        (slots, problems)
    }
}
