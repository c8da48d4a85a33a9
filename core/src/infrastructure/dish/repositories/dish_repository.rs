use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
    sea_query::{Expr, SimpleExpr},
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::{app_errors::CoreError, cascade::CascadeReport},
        dish::{
            entities::{Dish, DishChanges},
            ports::DishRepository,
            value_objects::GetDishesFilter,
        },
    },
    entity::{
        dishes::{ActiveModel, Column, Entity},
        restaurants,
    },
    infrastructure::{consistency, db::storage_error, dish::mappers::map_dishes},
};

#[derive(Debug, Clone)]
pub struct SqlDishRepository {
    pub db: DatabaseConnection,
}

impl SqlDishRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Rows whose ingredient list has an entry named exactly `name`.
fn ingredient_contains(backend: DbBackend, name: &str) -> Result<SimpleExpr, CoreError> {
    match backend {
        DbBackend::Postgres => Ok(Expr::cust_with_values(
            r#""dishes"."ingredients" @> CAST(? AS jsonb)"#,
            [json!([{ "name": name }]).to_string()],
        )),
        DbBackend::Sqlite => Ok(Expr::cust_with_values(
            r#"EXISTS (SELECT 1 FROM json_each("dishes"."ingredients") WHERE json_extract(json_each.value, ?) = ?)"#,
            ["$.name".to_string(), name.to_string()],
        )),
        other => Err(CoreError::Storage(format!(
            "ingredient search is not supported on {other:?}"
        ))),
    }
}

impl DishRepository for SqlDishRepository {
    async fn create_dish(&self, dish: Dish) -> Result<Dish, CoreError> {
        let active_model = ActiveModel::try_from(&dish)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(storage_error("begin dish insert"))?;

        restaurants::Entity::find_by_id(dish.restaurant_id)
            .lock_shared()
            .one(&txn)
            .await
            .map_err(storage_error("check dish restaurant"))?
            .ok_or_else(|| CoreError::reference("restaurant", dish.restaurant_id))?;

        let created = Entity::insert(active_model)
            .exec_with_returning(&txn)
            .await
            .map_err(storage_error("create dish"))?;

        txn.commit()
            .await
            .map_err(storage_error("commit dish insert"))?;

        Dish::try_from(created)
    }

    async fn get_by_id(&self, dish_id: Uuid) -> Result<Option<Dish>, CoreError> {
        let dish = Entity::find_by_id(dish_id)
            .one(&self.db)
            .await
            .map_err(storage_error("get dish"))?;

        dish.map(Dish::try_from).transpose()
    }

    async fn fetch_by_restaurant(
        &self,
        restaurant_id: Uuid,
        filter: GetDishesFilter,
    ) -> Result<Vec<Dish>, CoreError> {
        let mut query = Entity::find()
            .filter(Column::RestaurantId.eq(restaurant_id))
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id);

        if filter.available_only {
            query = query.filter(Column::IsAvailable.eq(true));
        }

        if let Some(ingredient) = filter.ingredient.as_deref() {
            let backend = self.db.get_database_backend();
            query = query.filter(ingredient_contains(backend, ingredient)?);
        }

        let dishes = query
            .limit(filter.limit.map(u64::from))
            .offset(filter.offset.map(u64::from))
            .all(&self.db)
            .await
            .map_err(storage_error("fetch dishes"))?;

        map_dishes(dishes)
    }

    async fn update_dish(&self, dish_id: Uuid, changes: DishChanges) -> Result<Dish, CoreError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(storage_error("begin dish update"))?;

        let mut dish = Entity::find_by_id(dish_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(storage_error("lock dish"))?
            .ok_or_else(|| CoreError::not_found("dish", dish_id))
            .and_then(Dish::try_from)?;

        dish.update(changes)?;

        let updated = Entity::update(ActiveModel::try_from(&dish)?)
            .exec(&txn)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => CoreError::not_found("dish", dish_id),
                e => storage_error("update dish")(e),
            })?;

        txn.commit()
            .await
            .map_err(storage_error("commit dish update"))?;

        Dish::try_from(updated)
    }

    async fn delete_dish(&self, dish_id: Uuid) -> Result<CascadeReport, CoreError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(storage_error("begin dish delete"))?;

        Entity::find_by_id(dish_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(storage_error("lock dish"))?
            .ok_or_else(|| CoreError::not_found("dish", dish_id))?;

        let report = consistency::cascade_dishes(&txn, vec![dish_id]).await?;

        txn.commit()
            .await
            .map_err(storage_error("commit dish delete"))?;

        info!(%dish_id, ?report, "dish deleted");
        Ok(report)
    }
}
