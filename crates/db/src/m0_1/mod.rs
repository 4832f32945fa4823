mod catalog;
mod scheduled_slot;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "mealpick",
    "m0_1",
    vec_box![],
    vec_box![
        catalog::CreateMealTable,
        catalog::CreateSideTable,
        catalog::CreateIngredientTable,
        catalog::CreateDeliveryRuleTable,
        scheduled_slot::CreateTable,
        scheduled_slot::CreateDateIdx
    ]
);
