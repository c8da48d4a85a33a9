use sea_orm::ActiveValue::{Set, Unchanged};

use crate::{domain::user::entities::User, entity::users};

impl From<&users::Model> for User {
    fn from(model: &users::Model) -> Self {
        Self {
            id: model.id,
            tg_id: model.tg_id,
            tg_username: model.tg_username.clone(),
            full_name: model.full_name.clone(),
            is_waiter: model.is_waiter,
            is_admin: model.is_admin,
            restaurant_id: model.restaurant_id,
            total_training_time: model.total_training_time,
            last_trained_dish: model.last_trained_dish,
            created_at: model.created_at.to_utc(),
            last_active: model.last_active.to_utc(),
        }
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self::from(&model)
    }
}

impl From<&User> for users::ActiveModel {
    fn from(user: &User) -> Self {
        Self {
            id: Set(user.id),
            tg_id: Set(user.tg_id),
            tg_username: Set(user.tg_username.clone()),
            full_name: Set(user.full_name.clone()),
            is_waiter: Set(user.is_waiter),
            is_admin: Set(user.is_admin),
            restaurant_id: Set(user.restaurant_id),
            total_training_time: Set(user.total_training_time),
            last_trained_dish: Set(user.last_trained_dish),
            created_at: Set(user.created_at.fixed_offset()),
            last_active: Set(user.last_active.fixed_offset()),
        }
    }
}

/// Profile and affiliation columns only; rollups are owned by the session engine.
pub fn profile_update(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Unchanged(user.id),
        tg_username: Set(user.tg_username.clone()),
        full_name: Set(user.full_name.clone()),
        is_waiter: Set(user.is_waiter),
        is_admin: Set(user.is_admin),
        restaurant_id: Set(user.restaurant_id),
        ..Default::default()
    }
}
