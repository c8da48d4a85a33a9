use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::entities::{app_errors::CoreError, cascade::CascadeReport},
    dish::{
        entities::{Dish, DishChanges},
        value_objects::{CreateDishInput, GetDishesFilter, UpdateDishInput},
    },
};

pub trait DishService: Send + Sync {
    fn create_dish(
        &self,
        input: CreateDishInput,
    ) -> impl Future<Output = Result<Dish, CoreError>> + Send;

    fn update_dish(
        &self,
        input: UpdateDishInput,
    ) -> impl Future<Output = Result<Dish, CoreError>> + Send;

    fn get_dish(
        &self,
        dish_id: Uuid,
    ) -> impl Future<Output = Result<Option<Dish>, CoreError>> + Send;

    fn list_dishes(
        &self,
        restaurant_id: Uuid,
        filter: GetDishesFilter,
    ) -> impl Future<Output = Result<Vec<Dish>, CoreError>> + Send;

    /// Deletes the dish and its questions, detaching sessions and rollups that reference it.
    fn delete_dish(
        &self,
        dish_id: Uuid,
    ) -> impl Future<Output = Result<CascadeReport, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait DishRepository: Send + Sync {
    /// Fails with `Reference` when the owning restaurant does not exist.
    fn create_dish(&self, dish: Dish) -> impl Future<Output = Result<Dish, CoreError>> + Send;

    fn get_by_id(
        &self,
        dish_id: Uuid,
    ) -> impl Future<Output = Result<Option<Dish>, CoreError>> + Send;

    fn fetch_by_restaurant(
        &self,
        restaurant_id: Uuid,
        filter: GetDishesFilter,
    ) -> impl Future<Output = Result<Vec<Dish>, CoreError>> + Send;

    /// Applies the changes to the current row under a lock.
    fn update_dish(
        &self,
        dish_id: Uuid,
        changes: DishChanges,
    ) -> impl Future<Output = Result<Dish, CoreError>> + Send;

    fn delete_dish(
        &self,
        dish_id: Uuid,
    ) -> impl Future<Output = Result<CascadeReport, CoreError>> + Send;
}
