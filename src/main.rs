use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use mealpick::cli::{plan, shopping, slot};
use mealpick_shared::MealTime;

/// mealpick - Weekly meal planning and shopping lists
#[derive(Parser)]
#[command(name = "mealpick")]
#[command(about = "Weekly meal planning and shopping lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the demo catalog into the store
    Seed,
    /// Pick one meal for a slot without saving it
    Pick {
        /// Day to pick for (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long, default_value = "lunch")]
        meal_time: MealTime,

        /// Seed for reproducible picks
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Re-plan one day, keeping completed slots
    PlanDay {
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Meal-times to plan (defaults to the configured ones)
        #[arg(long, value_delimiter = ',')]
        meal_times: Vec<MealTime>,

        #[arg(long)]
        seed: Option<u64>,
    },
    /// Re-plan the Monday to Sunday week containing a date, keeping completed slots
    PlanWeek {
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long, value_delimiter = ',')]
        meal_times: Vec<MealTime>,

        #[arg(long)]
        seed: Option<u64>,
    },
    /// List planned slots (defaults to the current week)
    Show {
        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,

        #[arg(long)]
        json: bool,
    },
    /// Aggregate the shopping list of a date range
    Shopping {
        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,

        /// One list per day
        #[arg(long)]
        by_day: bool,

        #[arg(long)]
        json: bool,
    },
    /// Show which planned slots use an ingredient
    Uses {
        ingredient: String,

        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Manage a single slot
    Slot {
        #[command(subcommand)]
        command: slot::SlotCommand,
    },
    /// Import a tab-separated week table
    ImportWeek {
        file: std::path::PathBuf,

        /// Any day of the target week (defaults to the current week)
        #[arg(long)]
        week: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealpick::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealpick::observability::init_observability(
        "mealpick",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Seed => plan::seed(config).await,
        Commands::Pick {
            date,
            meal_time,
            seed,
        } => plan::pick(config, date, meal_time, seed).await,
        Commands::PlanDay {
            date,
            meal_times,
            seed,
        } => plan::plan_day(config, date, meal_times, seed).await,
        Commands::PlanWeek {
            date,
            meal_times,
            seed,
        } => plan::plan_week(config, date, meal_times, seed).await,
        Commands::Show { from, to, json } => plan::show(config, from, to, json).await,
        Commands::Shopping {
            from,
            to,
            by_day,
            json,
        } => shopping::list(config, from, to, by_day, json).await,
        Commands::Uses {
            ingredient,
            from,
            to,
        } => shopping::uses(config, ingredient, from, to).await,
        Commands::Slot { command } => slot::run(config, command).await,
        Commands::ImportWeek { file, week } => plan::import_week(config, file, week).await,
    }
}
