use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
    common::{
        entities::{app_errors::CoreError, cascade::CascadeReport},
        ports::Clock,
        services::Service,
    },
    dish::{
        entities::{Dish, DishChanges, DishConfig},
        ports::{DishRepository, DishService},
        value_objects::{CreateDishInput, GetDishesFilter, UpdateDishInput},
    },
    question::ports::QuestionRepository,
    restaurant::ports::RestaurantRepository,
    training::ports::TrainingSessionRepository,
    user::ports::UserRepository,
};

impl<R, D, Q, U, TS, CK> DishService for Service<R, D, Q, U, TS, CK>
where
    R: RestaurantRepository,
    D: DishRepository,
    Q: QuestionRepository,
    U: UserRepository,
    TS: TrainingSessionRepository,
    CK: Clock,
{
    #[instrument(skip(self, input), fields(restaurant_id = %input.restaurant_id, name = %input.name))]
    async fn create_dish(&self, input: CreateDishInput) -> Result<Dish, CoreError> {
        let dish = Dish::new(DishConfig {
            restaurant_id: input.restaurant_id,
            name: input.name,
            description: input.description,
            cooking_time: input.cooking_time,
            ingredients: input.ingredients,
            media: input.media,
        })?;

        let created = self.dish_repository.create_dish(dish).await?;

        info!(dish_id = %created.id, "dish created");
        Ok(created)
    }

    #[instrument(skip(self, input), fields(dish_id = %input.dish_id))]
    async fn update_dish(&self, input: UpdateDishInput) -> Result<Dish, CoreError> {
        let changes = DishChanges {
            name: input.name,
            description: input.description,
            cooking_time: input.cooking_time,
            is_available: input.is_available,
            ingredients: input.ingredients,
            media: input.media,
        };

        self.dish_repository
            .update_dish(input.dish_id, changes)
            .await
    }

    async fn get_dish(&self, dish_id: Uuid) -> Result<Option<Dish>, CoreError> {
        self.dish_repository.get_by_id(dish_id).await
    }

    async fn list_dishes(
        &self,
        restaurant_id: Uuid,
        filter: GetDishesFilter,
    ) -> Result<Vec<Dish>, CoreError> {
        self.restaurant_repository
            .get_by_id(restaurant_id)
            .await?
            .ok_or_else(|| CoreError::not_found("restaurant", restaurant_id))?;

        self.dish_repository
            .fetch_by_restaurant(restaurant_id, filter)
            .await
    }

    #[instrument(skip(self))]
    async fn delete_dish(&self, dish_id: Uuid) -> Result<CascadeReport, CoreError> {
        let report = self.dish_repository.delete_dish(dish_id).await?;

        info!(
            questions = report.questions_deleted,
            sessions_detached = report.sessions_detached,
            "dish deleted"
        );
        Ok(report)
    }
}
