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
    restaurant::{
        entities::Restaurant,
        ports::{RestaurantRepository, RestaurantService},
        value_objects::{CreateRestaurantInput, GetRestaurantsFilter, UpdateRestaurantInput},
    },
    training::ports::TrainingSessionRepository,
    user::ports::UserRepository,
};

impl<R, D, Q, U, TS, CK> RestaurantService for Service<R, D, Q, U, TS, CK>
where
    R: RestaurantRepository,
    D: DishRepository,
    Q: QuestionRepository,
    U: UserRepository,
    TS: TrainingSessionRepository,
    CK: Clock,
{
    #[instrument(skip(self), fields(title = %input.title))]
    async fn create_restaurant(
        &self,
        input: CreateRestaurantInput,
    ) -> Result<Restaurant, CoreError> {
        let restaurant = Restaurant::new(input.title, input.description)?;

        let created = self
            .restaurant_repository
            .create_restaurant(restaurant)
            .await?;

        info!(restaurant_id = %created.id, "restaurant created");
        Ok(created)
    }

    #[instrument(skip(self), fields(restaurant_id = %input.restaurant_id))]
    async fn update_restaurant(
        &self,
        input: UpdateRestaurantInput,
    ) -> Result<Restaurant, CoreError> {
        self.restaurant_repository.update_restaurant(input).await
    }

    async fn get_restaurant(&self, restaurant_id: Uuid) -> Result<Option<Restaurant>, CoreError> {
        self.restaurant_repository.get_by_id(restaurant_id).await
    }

    async fn list_restaurants(
        &self,
        filter: GetRestaurantsFilter,
    ) -> Result<Vec<Restaurant>, CoreError> {
        self.restaurant_repository.fetch_restaurants(filter).await
    }

    #[instrument(skip(self))]
    async fn delete_restaurant(&self, restaurant_id: Uuid) -> Result<CascadeReport, CoreError> {
        let report = self
            .restaurant_repository
            .delete_restaurant(restaurant_id)
            .await?;

        info!(
            dishes = report.dishes_deleted,
            questions = report.questions_deleted,
            staff = report.users_detached,
            "restaurant deleted"
        );
        Ok(report)
    }
}
