use sea_query::{ColumnDef, Index, Table, TableCreateStatement, TableDropStatement};

use crate::table::{DeliveryRule, Ingredient, Meal, Side};

pub struct CreateMealTable;
pub struct CreateSideTable;
pub struct CreateIngredientTable;
pub struct CreateDeliveryRuleTable;

fn create_meal_table() -> TableCreateStatement {
    Table::create()
        .table(Meal::Table)
        .col(ColumnDef::new(Meal::Id).string().not_null().primary_key())
        .col(ColumnDef::new(Meal::Data).text().not_null())
        .to_owned()
}

fn create_side_table() -> TableCreateStatement {
    Table::create()
        .table(Side::Table)
        .col(ColumnDef::new(Side::Id).string().not_null().primary_key())
        .col(ColumnDef::new(Side::Data).text().not_null())
        .to_owned()
}

fn create_ingredient_table() -> TableCreateStatement {
    Table::create()
        .table(Ingredient::Table)
        .col(
            ColumnDef::new(Ingredient::OwnerKind)
                .string()
                .not_null()
                .string_len(4),
        )
        .col(ColumnDef::new(Ingredient::OwnerId).string().not_null())
        .col(ColumnDef::new(Ingredient::Position).integer().not_null())
        .col(ColumnDef::new(Ingredient::Data).text().not_null())
        .primary_key(
            Index::create()
                .col(Ingredient::OwnerKind)
                .col(Ingredient::OwnerId)
                .col(Ingredient::Position),
        )
        .to_owned()
}

fn create_delivery_rule_table() -> TableCreateStatement {
    Table::create()
        .table(DeliveryRule::Table)
        .col(
            ColumnDef::new(DeliveryRule::Id)
                .string()
                .not_null()
                .primary_key(),
        )
        .col(ColumnDef::new(DeliveryRule::Data).text().not_null())
        .to_owned()
}

async fn execute(
    connection: &mut sqlx::SqliteConnection,
    statement: String,
) -> Result<(), sqlx_migrator::Error> {
    sqlx::query(&statement).execute(connection).await?;

    Ok(())
}

fn drop_table(table: impl sea_query::IntoTableRef) -> TableDropStatement {
    Table::drop().table(table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateMealTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_meal_table().to_string(sea_query::SqliteQueryBuilder);
        execute(connection, statement).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table(Meal::Table).to_string(sea_query::SqliteQueryBuilder);
        execute(connection, statement).await
    }
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateSideTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_side_table().to_string(sea_query::SqliteQueryBuilder);
        execute(connection, statement).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table(Side::Table).to_string(sea_query::SqliteQueryBuilder);
        execute(connection, statement).await
    }
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateIngredientTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_ingredient_table().to_string(sea_query::SqliteQueryBuilder);
        execute(connection, statement).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table(Ingredient::Table).to_string(sea_query::SqliteQueryBuilder);
        execute(connection, statement).await
    }
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateDeliveryRuleTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_delivery_rule_table().to_string(sea_query::SqliteQueryBuilder);
        execute(connection, statement).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table(DeliveryRule::Table).to_string(sea_query::SqliteQueryBuilder);
        execute(connection, statement).await
    }
}
