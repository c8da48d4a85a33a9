use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::entities::{app_errors::CoreError, cascade::CascadeReport},
    user::{
        entities::User,
        value_objects::{RegisterUserInput, UpdateUserInput},
    },
};

pub trait UserService: Send + Sync {
    fn register_user(
        &self,
        input: RegisterUserInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn get_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<User>, CoreError>> + Send;

    fn get_user_by_tg_id(
        &self,
        tg_id: i64,
    ) -> impl Future<Output = Result<Option<User>, CoreError>> + Send;

    fn update_user(
        &self,
        input: UpdateUserInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    /// Moves the user to another restaurant, or unaffiliates them with `None`.
    fn assign_restaurant(
        &self,
        user_id: Uuid,
        restaurant_id: Option<Uuid>,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    /// Deletes the user together with their training sessions.
    fn delete_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<CascadeReport, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` on a duplicate `tg_id` and with `Reference` for
    /// an unknown restaurant.
    fn create_user(&self, user: User) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn get_by_id(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<User>, CoreError>> + Send;

    fn get_by_tg_id(
        &self,
        tg_id: i64,
    ) -> impl Future<Output = Result<Option<User>, CoreError>> + Send;

    /// Persists profile fields and affiliation. Rollups are left untouched:
    /// they only move through session aggregation.
    fn update_user(&self, user: User) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn delete_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<CascadeReport, CoreError>> + Send;
}
