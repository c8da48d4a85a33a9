use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
    common::{
        entities::{app_errors::CoreError, cascade::CascadeReport},
        ports::Clock,
        services::Service,
    },
    dish::ports::DishRepository,
    question::ports::QuestionRepository,
    restaurant::ports::RestaurantRepository,
    training::ports::TrainingSessionRepository,
    user::{
        entities::{User, UserConfig},
        ports::{UserRepository, UserService},
        value_objects::{RegisterUserInput, UpdateUserInput},
    },
};

impl<R, D, Q, U, TS, CK> Service<R, D, Q, U, TS, CK>
where
    R: RestaurantRepository,
    D: DishRepository,
    Q: QuestionRepository,
    U: UserRepository,
    TS: TrainingSessionRepository,
    CK: Clock,
{
    async fn require_user(&self, user_id: Uuid) -> Result<User, CoreError> {
        self.user_repository
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| CoreError::not_found("user", user_id))
    }
}

impl<R, D, Q, U, TS, CK> UserService for Service<R, D, Q, U, TS, CK>
where
    R: RestaurantRepository,
    D: DishRepository,
    Q: QuestionRepository,
    U: UserRepository,
    TS: TrainingSessionRepository,
    CK: Clock,
{
    #[instrument(skip(self, input), fields(tg_id = input.tg_id))]
    async fn register_user(&self, input: RegisterUserInput) -> Result<User, CoreError> {
        let user = User::new(UserConfig {
            tg_id: input.tg_id,
            tg_username: input.tg_username,
            full_name: input.full_name,
            is_waiter: input.is_waiter,
            is_admin: input.is_admin,
            restaurant_id: input.restaurant_id,
        })?;

        let created = self.user_repository.create_user(user).await?;

        info!(user_id = %created.id, "user registered");
        Ok(created)
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, CoreError> {
        self.user_repository.get_by_id(user_id).await
    }

    async fn get_user_by_tg_id(&self, tg_id: i64) -> Result<Option<User>, CoreError> {
        self.user_repository.get_by_tg_id(tg_id).await
    }

    #[instrument(skip(self, input), fields(user_id = %input.user_id))]
    async fn update_user(&self, input: UpdateUserInput) -> Result<User, CoreError> {
        let mut user = self.require_user(input.user_id).await?;

        user.update(
            input.tg_username,
            input.full_name,
            input.is_waiter,
            input.is_admin,
        )?;

        self.user_repository.update_user(user).await
    }

    #[instrument(skip(self))]
    async fn assign_restaurant(
        &self,
        user_id: Uuid,
        restaurant_id: Option<Uuid>,
    ) -> Result<User, CoreError> {
        let mut user = self.require_user(user_id).await?;

        if let Some(restaurant_id) = restaurant_id {
            self.restaurant_repository
                .get_by_id(restaurant_id)
                .await?
                .ok_or_else(|| CoreError::reference("restaurant", restaurant_id))?;
        }

        user.restaurant_id = restaurant_id;
        self.user_repository.update_user(user).await
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, user_id: Uuid) -> Result<CascadeReport, CoreError> {
        let report = self.user_repository.delete_user(user_id).await?;

        info!(sessions = report.sessions_deleted, "user deleted");
        Ok(report)
    }
}
