use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::{app_errors::CoreError, cascade::CascadeReport},
        restaurant::{
            entities::Restaurant,
            ports::RestaurantRepository,
            value_objects::{GetRestaurantsFilter, UpdateRestaurantInput},
        },
    },
    entity::restaurants::{ActiveModel, Column, Entity},
    infrastructure::{
        consistency,
        db::{conflict_or_storage, storage_error},
    },
};

#[derive(Debug, Clone)]
pub struct SqlRestaurantRepository {
    pub db: DatabaseConnection,
}

impl SqlRestaurantRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl RestaurantRepository for SqlRestaurantRepository {
    async fn create_restaurant(&self, restaurant: Restaurant) -> Result<Restaurant, CoreError> {
        let title = restaurant.title.clone();

        let created = Entity::insert(ActiveModel::from(&restaurant))
            .exec_with_returning(&self.db)
            .await
            .map_err(conflict_or_storage("create restaurant", || {
                format!("restaurant title '{title}' is already taken")
            }))?;

        Ok(created.into())
    }

    async fn get_by_id(&self, restaurant_id: Uuid) -> Result<Option<Restaurant>, CoreError> {
        let restaurant = Entity::find_by_id(restaurant_id)
            .one(&self.db)
            .await
            .map_err(storage_error("get restaurant"))?;

        Ok(restaurant.map(Restaurant::from))
    }

    async fn fetch_restaurants(
        &self,
        filter: GetRestaurantsFilter,
    ) -> Result<Vec<Restaurant>, CoreError> {
        let mut query = Entity::find().order_by_asc(Column::Title);

        if filter.active_only {
            query = query.filter(Column::IsActive.eq(true));
        }

        let restaurants = query
            .limit(filter.limit.map(u64::from))
            .offset(filter.offset.map(u64::from))
            .all(&self.db)
            .await
            .map_err(storage_error("fetch restaurants"))?;

        Ok(restaurants.into_iter().map(Restaurant::from).collect())
    }

    async fn update_restaurant(
        &self,
        input: UpdateRestaurantInput,
    ) -> Result<Restaurant, CoreError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(storage_error("begin restaurant update"))?;

        let mut restaurant: Restaurant = Entity::find_by_id(input.restaurant_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(storage_error("lock restaurant"))?
            .ok_or_else(|| CoreError::not_found("restaurant", input.restaurant_id))?
            .into();

        restaurant.update(input.title, input.description, input.is_active)?;
        let title = restaurant.title.clone();

        let updated = Entity::update(ActiveModel::from(&restaurant))
            .exec(&txn)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => CoreError::not_found("restaurant", restaurant.id),
                e => conflict_or_storage("update restaurant", || {
                    format!("restaurant title '{title}' is already taken")
                })(e),
            })?;

        txn.commit()
            .await
            .map_err(storage_error("commit restaurant update"))?;

        Ok(updated.into())
    }

    async fn delete_restaurant(&self, restaurant_id: Uuid) -> Result<CascadeReport, CoreError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(storage_error("begin restaurant delete"))?;

        Entity::find_by_id(restaurant_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(storage_error("lock restaurant"))?
            .ok_or_else(|| CoreError::not_found("restaurant", restaurant_id))?;

        let report = consistency::cascade_restaurant(&txn, restaurant_id).await?;

        txn.commit()
            .await
            .map_err(storage_error("commit restaurant delete"))?;

        info!(%restaurant_id, ?report, "restaurant deleted");
        Ok(report)
    }
}
