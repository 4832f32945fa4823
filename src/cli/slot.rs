use chrono::NaiveDate;
use clap::Subcommand;
use mealpick_shared::{MealTime, slot::SlotEdit};

use crate::config::Config;

use super::{print_slots, service};

#[derive(Subcommand, Debug)]
pub enum SlotCommand {
    /// Put a meal on an empty slot
    Assign {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        meal_time: MealTime,
        /// Meal id
        #[arg(long)]
        meal: String,
        /// Side id (defaults to the meal's first side)
        #[arg(long)]
        side: Option<String>,
        #[arg(long)]
        servings: Option<f64>,
    },
    /// Change the meal, side or servings of a slot
    Edit {
        id: String,
        #[arg(long)]
        meal: Option<String>,
        #[arg(long, conflicts_with = "clear_side")]
        side: Option<String>,
        #[arg(long)]
        clear_side: bool,
        #[arg(long)]
        servings: Option<f64>,
    },
    /// Mark a slot as cooked
    Complete { id: String },
    /// Make a completed slot replaceable again
    Uncomplete { id: String },
    /// Remove a slot from the calendar
    Delete { id: String },
}

#[tracing::instrument(skip(config))]
pub async fn run(config: Config, command: SlotCommand) -> anyhow::Result<()> {
    let service = service(&config).await?;

    let slot = match command {
        SlotCommand::Assign {
            date,
            meal_time,
            meal,
            side,
            servings,
        } => {
            service
                .assign_slot(date, meal_time, &meal, side, servings)
                .await?
        }
        SlotCommand::Edit {
            id,
            meal,
            side,
            clear_side,
            servings,
        } => {
            let side_id = if clear_side { Some(None) } else { side.map(Some) };
            let edit = SlotEdit {
                meal_id: meal,
                side_id,
                servings,
            };

            service.edit_slot(&id, edit).await?
        }
        SlotCommand::Complete { id } => service.complete_slot(&id).await?,
        SlotCommand::Uncomplete { id } => service.uncomplete_slot(&id).await?,
        SlotCommand::Delete { id } => {
            service.delete_slot(&id).await?;
            println!("deleted slot {id}");

            return Ok(());
        }
    };

    print_slots(std::slice::from_ref(&slot));

    Ok(())
}
