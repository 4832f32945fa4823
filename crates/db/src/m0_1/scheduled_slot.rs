use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::ScheduledSlot;

pub struct CreateTable;
pub struct CreateDateIdx;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(ScheduledSlot::Table)
        .col(
            ColumnDef::new(ScheduledSlot::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(ScheduledSlot::Date)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(ColumnDef::new(ScheduledSlot::MealTime).string().not_null())
        .col(ColumnDef::new(ScheduledSlot::Data).text().not_null())
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(ScheduledSlot::Table).to_owned()
}

fn create_date_idx() -> IndexCreateStatement {
    Index::create()
        .name("idx_scheduled_slot_date")
        .table(ScheduledSlot::Table)
        .col(ScheduledSlot::Date)
        .col(ScheduledSlot::MealTime)
        .to_owned()
}

fn drop_date_idx() -> IndexDropStatement {
    Index::drop()
        .name("idx_scheduled_slot_date")
        .table(ScheduledSlot::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateDateIdx {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_date_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_date_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
