use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::entities::{app_errors::CoreError, cascade::CascadeReport},
    restaurant::{
        entities::Restaurant,
        value_objects::{CreateRestaurantInput, GetRestaurantsFilter, UpdateRestaurantInput},
    },
};

pub trait RestaurantService: Send + Sync {
    fn create_restaurant(
        &self,
        input: CreateRestaurantInput,
    ) -> impl Future<Output = Result<Restaurant, CoreError>> + Send;

    fn update_restaurant(
        &self,
        input: UpdateRestaurantInput,
    ) -> impl Future<Output = Result<Restaurant, CoreError>> + Send;

    fn get_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> impl Future<Output = Result<Option<Restaurant>, CoreError>> + Send;

    fn list_restaurants(
        &self,
        filter: GetRestaurantsFilter,
    ) -> impl Future<Output = Result<Vec<Restaurant>, CoreError>> + Send;

    /// Deletes the restaurant with its dishes and questions and detaches its staff.
    fn delete_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> impl Future<Output = Result<CascadeReport, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait RestaurantRepository: Send + Sync {
    /// Fails with `Conflict` when the title is already taken.
    fn create_restaurant(
        &self,
        restaurant: Restaurant,
    ) -> impl Future<Output = Result<Restaurant, CoreError>> + Send;

    fn get_by_id(
        &self,
        restaurant_id: Uuid,
    ) -> impl Future<Output = Result<Option<Restaurant>, CoreError>> + Send;

    fn fetch_restaurants(
        &self,
        filter: GetRestaurantsFilter,
    ) -> impl Future<Output = Result<Vec<Restaurant>, CoreError>> + Send;

    /// Applies the changes to the current row under a lock.
    ///
    /// Fails with `NotFound` for an unknown id and `Conflict` when the new
    /// title is already taken.
    fn update_restaurant(
        &self,
        input: UpdateRestaurantInput,
    ) -> impl Future<Output = Result<Restaurant, CoreError>> + Send;

    fn delete_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> impl Future<Output = Result<CascadeReport, CoreError>> + Send;
}
