use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use mealpick_shared::{
    Error, Result,
    catalog::{DeliveryRule, IngredientLine, MealItem, Owner, SideItem},
    slot::{NewSlot, ScheduledSlot},
};
use sea_query::{Expr, ExprTrait, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::de::DeserializeOwned;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use sqlx_migrator::{Migrate, Plan};

use crate::{Store, new_slot_id, sort_slots, table};

/// Document store on SQLite: every record is kept as a JSON document next to
/// the few columns needed to look it up.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database at `url` and applies pending
    /// migrations.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.migrate().await?;

        tracing::info!(url, max_connections, "sqlite store ready");

        Ok(store)
    }

    pub async fn migrate(&self) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        crate::migrator()
            .map_err(|e| Error::Unknown(e.into()))?
            .run(&mut conn, &Plan::apply_all())
            .await
            .map_err(|e| Error::Unknown(e.into()))?;

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn fetch_documents<T: DeserializeOwned>(
        &self,
        statement: sea_query::SelectStatement,
    ) -> Result<Vec<T>> {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|(data,)| Ok(serde_json::from_str(data)?))
            .collect()
    }

    async fn get_ingredient_lines(&self, owner: &Owner) -> Result<Vec<IngredientLine>> {
        let statement = Query::select()
            .column(table::Ingredient::Data)
            .from(table::Ingredient::Table)
            .and_where(Expr::col(table::Ingredient::OwnerKind).eq(owner_kind(owner)))
            .and_where(Expr::col(table::Ingredient::OwnerId).eq(owner.id()))
            .order_by(table::Ingredient::Position, Order::Asc)
            .to_owned();

        self.fetch_documents(statement).await
    }
}

fn owner_kind(owner: &Owner) -> &'static str {
    match owner {
        Owner::Meal(_) => "meal",
        Owner::Side(_) => "side",
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn get_all_meals(&self) -> Result<Vec<MealItem>> {
        let statement = Query::select()
            .column(table::Meal::Data)
            .from(table::Meal::Table)
            .order_by(table::Meal::Id, Order::Asc)
            .to_owned();

        self.fetch_documents(statement).await
    }

    async fn get_all_sides(&self) -> Result<Vec<SideItem>> {
        let statement = Query::select()
            .column(table::Side::Data)
            .from(table::Side::Table)
            .order_by(table::Side::Id, Order::Asc)
            .to_owned();

        self.fetch_documents(statement).await
    }

    async fn get_ingredient_lines_for_meal(&self, meal_id: &str) -> Result<Vec<IngredientLine>> {
        self.get_ingredient_lines(&Owner::Meal(meal_id.to_owned()))
            .await
    }

    async fn get_ingredient_lines_for_side(&self, side_id: &str) -> Result<Vec<IngredientLine>> {
        self.get_ingredient_lines(&Owner::Side(side_id.to_owned()))
            .await
    }

    async fn get_delivery_rules(&self) -> Result<Vec<DeliveryRule>> {
        let statement = Query::select()
            .column(table::DeliveryRule::Data)
            .from(table::DeliveryRule::Table)
            .order_by(table::DeliveryRule::Id, Order::Asc)
            .to_owned();

        self.fetch_documents(statement).await
    }

    async fn get_slots_in_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduledSlot>> {
        let statement = Query::select()
            .column(table::ScheduledSlot::Data)
            .from(table::ScheduledSlot::Table)
            .and_where(Expr::col(table::ScheduledSlot::Date).gte(start.to_string()))
            .and_where(Expr::col(table::ScheduledSlot::Date).lte(end.to_string()))
            .to_owned();

        let mut slots = self.fetch_documents::<ScheduledSlot>(statement).await?;
        sort_slots(&mut slots);

        Ok(slots)
    }

    async fn get_slot(&self, id: &str) -> Result<Option<ScheduledSlot>> {
        let statement = Query::select()
            .column(table::ScheduledSlot::Data)
            .from(table::ScheduledSlot::Table)
            .and_where(Expr::col(table::ScheduledSlot::Id).eq(id))
            .limit(1)
            .to_owned();

        Ok(self.fetch_documents(statement).await?.into_iter().next())
    }

    async fn create_slots(&self, slots: Vec<NewSlot>) -> Result<Vec<ScheduledSlot>> {
        self.replace_slots(&[], slots).await
    }

    async fn replace_slots(
        &self,
        delete_ids: &[String],
        slots: Vec<NewSlot>,
    ) -> Result<Vec<ScheduledSlot>> {
        let mut tx = self.pool.begin().await?;

        for id in delete_ids {
            let statement = Query::delete()
                .from_table(table::ScheduledSlot::Table)
                .and_where(Expr::col(table::ScheduledSlot::Id).eq(id))
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            let result = sqlx::query_with(&sql, values).execute(&mut *tx).await?;

            if result.rows_affected() == 0 {
                return Err(Error::NotFound(format!("slot {id}")));
            }
        }

        let mut created = Vec::with_capacity(slots.len());
        if !slots.is_empty() {
            let mut statement = Query::insert()
                .into_table(table::ScheduledSlot::Table)
                .columns([
                    table::ScheduledSlot::Id,
                    table::ScheduledSlot::Date,
                    table::ScheduledSlot::MealTime,
                    table::ScheduledSlot::Data,
                ])
                .to_owned();

            for slot in slots {
                let slot = slot.into_slot(new_slot_id());
                let data = serde_json::to_string(&slot)?;

                statement.values_panic([
                    slot.id.to_owned().into(),
                    slot.date.to_string().into(),
                    slot.meal_time.to_string().into(),
                    data.into(),
                ]);

                created.push(slot);
            }

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        tx.commit().await?;

        Ok(created)
    }

    async fn update_slot(&self, slot: &ScheduledSlot) -> Result<()> {
        let data = serde_json::to_string(slot)?;
        let statement = Query::update()
            .table(table::ScheduledSlot::Table)
            .values([
                (table::ScheduledSlot::Date, slot.date.to_string().into()),
                (
                    table::ScheduledSlot::MealTime,
                    slot.meal_time.to_string().into(),
                ),
                (table::ScheduledSlot::Data, data.into()),
            ])
            .and_where(Expr::col(table::ScheduledSlot::Id).eq(&slot.id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("slot {}", slot.id)));
        }

        Ok(())
    }

    async fn delete_slot(&self, id: &str) -> Result<()> {
        let statement = Query::delete()
            .from_table(table::ScheduledSlot::Table)
            .and_where(Expr::col(table::ScheduledSlot::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("slot {id}")));
        }

        Ok(())
    }

    async fn put_meal(&self, meal: &MealItem) -> Result<()> {
        let statement = Query::insert()
            .into_table(table::Meal::Table)
            .columns([table::Meal::Id, table::Meal::Data])
            .values_panic([meal.id.to_owned().into(), serde_json::to_string(meal)?.into()])
            .on_conflict(
                OnConflict::column(table::Meal::Id)
                    .update_column(table::Meal::Data)
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(())
    }

    async fn put_side(&self, side: &SideItem) -> Result<()> {
        let statement = Query::insert()
            .into_table(table::Side::Table)
            .columns([table::Side::Id, table::Side::Data])
            .values_panic([side.id.to_owned().into(), serde_json::to_string(side)?.into()])
            .on_conflict(
                OnConflict::column(table::Side::Id)
                    .update_column(table::Side::Data)
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(())
    }

    async fn replace_ingredient_lines(
        &self,
        owner: &Owner,
        lines: &[IngredientLine],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let statement = Query::delete()
            .from_table(table::Ingredient::Table)
            .and_where(Expr::col(table::Ingredient::OwnerKind).eq(owner_kind(owner)))
            .and_where(Expr::col(table::Ingredient::OwnerId).eq(owner.id()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        if !lines.is_empty() {
            let mut statement = Query::insert()
                .into_table(table::Ingredient::Table)
                .columns([
                    table::Ingredient::OwnerKind,
                    table::Ingredient::OwnerId,
                    table::Ingredient::Position,
                    table::Ingredient::Data,
                ])
                .to_owned();

            for (position, line) in lines.iter().enumerate() {
                statement.values_panic([
                    owner_kind(owner).into(),
                    owner.id().to_owned().into(),
                    (position as i64).into(),
                    serde_json::to_string(line)?.into(),
                ]);
            }

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn put_delivery_rule(&self, rule: &DeliveryRule) -> Result<()> {
        let statement = Query::insert()
            .into_table(table::DeliveryRule::Table)
            .columns([table::DeliveryRule::Id, table::DeliveryRule::Data])
            .values_panic([rule.id.to_owned().into(), serde_json::to_string(rule)?.into()])
            .on_conflict(
                OnConflict::column(table::DeliveryRule::Id)
                    .update_column(table::DeliveryRule::Data)
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(())
    }
}
