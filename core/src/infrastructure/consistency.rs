//! Cascade and set-null scripts for every delete path.
//!
//! Each script takes the caller's connection (normally an open transaction)
//! and touches dependents before their parent, so foreign keys never see a
//! dangling row and a failure anywhere rolls back the whole delete.

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect, sea_query::Expr,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::common::entities::{app_errors::CoreError, cascade::CascadeReport},
    entity::{dishes, questions, restaurants, training_sessions, users},
    infrastructure::db::storage_error,
};

/// Set-null `users.restaurant_id` for the restaurant's staff.
pub async fn detach_staff<C>(conn: &C, restaurant_id: Uuid) -> Result<u64, CoreError>
where
    C: ConnectionTrait,
{
    let result = users::Entity::update_many()
        .col_expr(users::Column::RestaurantId, Expr::value(Option::<Uuid>::None))
        .filter(users::Column::RestaurantId.eq(restaurant_id))
        .exec(conn)
        .await
        .map_err(storage_error("detach staff from restaurant"))?;

    Ok(result.rows_affected)
}

/// Deletes the dishes and their questions, and detaches sessions and user
/// rollups that point at them.
pub async fn cascade_dishes<C>(conn: &C, dish_ids: Vec<Uuid>) -> Result<CascadeReport, CoreError>
where
    C: ConnectionTrait,
{
    if dish_ids.is_empty() {
        return Ok(CascadeReport::default());
    }

    let questions_deleted = questions::Entity::delete_many()
        .filter(questions::Column::DishId.is_in(dish_ids.clone()))
        .exec(conn)
        .await
        .map_err(storage_error("delete questions of dishes"))?
        .rows_affected;

    let trained_dish_cleared = users::Entity::update_many()
        .col_expr(
            users::Column::LastTrainedDish,
            Expr::value(Option::<Uuid>::None),
        )
        .filter(users::Column::LastTrainedDish.is_in(dish_ids.clone()))
        .exec(conn)
        .await
        .map_err(storage_error("clear last trained dish"))?
        .rows_affected;

    let sessions_detached = training_sessions::Entity::update_many()
        .col_expr(
            training_sessions::Column::DishId,
            Expr::value(Option::<Uuid>::None),
        )
        .filter(training_sessions::Column::DishId.is_in(dish_ids.clone()))
        .exec(conn)
        .await
        .map_err(storage_error("detach sessions from dishes"))?
        .rows_affected;

    let dishes_deleted = dishes::Entity::delete_many()
        .filter(dishes::Column::Id.is_in(dish_ids))
        .exec(conn)
        .await
        .map_err(storage_error("delete dishes"))?
        .rows_affected;

    debug!(
        dishes_deleted,
        questions_deleted, sessions_detached, trained_dish_cleared, "dish cascade applied"
    );

    Ok(CascadeReport {
        dishes_deleted,
        questions_deleted,
        trained_dish_cleared,
        sessions_detached,
        ..Default::default()
    })
}

/// Deletes the restaurant with every dish it owns and detaches its staff.
pub async fn cascade_restaurant<C>(
    conn: &C,
    restaurant_id: Uuid,
) -> Result<CascadeReport, CoreError>
where
    C: ConnectionTrait,
{
    let dish_ids = dishes::Entity::find()
        .select_only()
        .column(dishes::Column::Id)
        .filter(dishes::Column::RestaurantId.eq(restaurant_id))
        .into_tuple::<Uuid>()
        .all(conn)
        .await
        .map_err(storage_error("list dishes of restaurant"))?;

    let mut report = cascade_dishes(conn, dish_ids).await?;
    report.users_detached = detach_staff(conn, restaurant_id).await?;

    report.restaurants_deleted = restaurants::Entity::delete_by_id(restaurant_id)
        .exec(conn)
        .await
        .map_err(storage_error("delete restaurant"))?
        .rows_affected;

    Ok(report)
}

/// Deletes the user and every training session they own.
pub async fn cascade_user<C>(conn: &C, user_id: Uuid) -> Result<CascadeReport, CoreError>
where
    C: ConnectionTrait,
{
    let sessions_deleted = training_sessions::Entity::delete_many()
        .filter(training_sessions::Column::UserId.eq(user_id))
        .exec(conn)
        .await
        .map_err(storage_error("delete sessions of user"))?
        .rows_affected;

    let users_deleted = users::Entity::delete_by_id(user_id)
        .exec(conn)
        .await
        .map_err(storage_error("delete user"))?
        .rows_affected;

    Ok(CascadeReport {
        sessions_deleted,
        users_deleted,
        ..Default::default()
    })
}
