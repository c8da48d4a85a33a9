use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QuerySelect, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::{app_errors::CoreError, cascade::CascadeReport},
        user::{entities::User, ports::UserRepository},
    },
    entity::{
        restaurants,
        users::{ActiveModel, Column, Entity},
    },
    infrastructure::{
        consistency,
        db::{conflict_or_storage, storage_error},
        user::mappers::profile_update,
    },
};

#[derive(Debug, Clone)]
pub struct SqlUserRepository {
    pub db: DatabaseConnection,
}

impl SqlUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

async fn ensure_restaurant<C>(conn: &C, restaurant_id: Option<Uuid>) -> Result<(), CoreError>
where
    C: ConnectionTrait,
{
    let Some(restaurant_id) = restaurant_id else {
        return Ok(());
    };

    restaurants::Entity::find_by_id(restaurant_id)
        .lock_shared()
        .one(conn)
        .await
        .map_err(storage_error("check user restaurant"))?
        .ok_or_else(|| CoreError::reference("restaurant", restaurant_id))?;

    Ok(())
}

impl UserRepository for SqlUserRepository {
    async fn create_user(&self, user: User) -> Result<User, CoreError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(storage_error("begin user insert"))?;

        ensure_restaurant(&txn, user.restaurant_id).await?;

        let tg_id = user.tg_id;
        let created = Entity::insert(ActiveModel::from(&user))
            .exec_with_returning(&txn)
            .await
            .map_err(conflict_or_storage("create user", || {
                format!("a user with tg_id {tg_id} is already registered")
            }))?;

        txn.commit()
            .await
            .map_err(storage_error("commit user insert"))?;

        info!(user_id = %created.id, tg_id, "user registered");
        Ok(created.into())
    }

    async fn get_by_id(&self, user_id: Uuid) -> Result<Option<User>, CoreError> {
        let user = Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(storage_error("get user"))?;

        Ok(user.map(User::from))
    }

    async fn get_by_tg_id(&self, tg_id: i64) -> Result<Option<User>, CoreError> {
        let user = Entity::find()
            .filter(Column::TgId.eq(tg_id))
            .one(&self.db)
            .await
            .map_err(storage_error("get user by tg_id"))?;

        Ok(user.map(User::from))
    }

    async fn update_user(&self, user: User) -> Result<User, CoreError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(storage_error("begin user update"))?;

        Entity::find_by_id(user.id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(storage_error("lock user"))?
            .ok_or_else(|| CoreError::not_found("user", user.id))?;

        ensure_restaurant(&txn, user.restaurant_id).await?;

        let updated = profile_update(&user)
            .update(&txn)
            .await
            .map_err(storage_error("update user"))?;

        txn.commit()
            .await
            .map_err(storage_error("commit user update"))?;

        Ok(updated.into())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<CascadeReport, CoreError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(storage_error("begin user delete"))?;

        Entity::find_by_id(user_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(storage_error("lock user"))?
            .ok_or_else(|| CoreError::not_found("user", user_id))?;

        let report = consistency::cascade_user(&txn, user_id).await?;

        txn.commit()
            .await
            .map_err(storage_error("commit user delete"))?;

        info!(%user_id, ?report, "user deleted");
        Ok(report)
    }
}
