use crate::{
    domain::common::{
        BrigadeConfig, TrainingPolicy,
        entities::app_errors::CoreError,
        ports::{Clock, SystemClock},
        services::Service,
    },
    infrastructure::{
        db::{Store, StoreConfig},
        dish::SqlDishRepository,
        question::SqlQuestionRepository,
        restaurant::SqlRestaurantRepository,
        training::SqlTrainingSessionRepository,
        user::SqlUserRepository,
    },
};

pub type BrigadeService<CK = SystemClock> = Service<
    SqlRestaurantRepository,
    SqlDishRepository,
    SqlQuestionRepository,
    SqlUserRepository,
    SqlTrainingSessionRepository,
    CK,
>;

/// Wires every repository onto `store` with an explicit clock.
pub fn service_with_clock<CK: Clock>(
    store: &Store,
    policy: TrainingPolicy,
    clock: CK,
) -> BrigadeService<CK> {
    Service::new(
        SqlRestaurantRepository::new(store.get_db()),
        SqlDishRepository::new(store.get_db()),
        SqlQuestionRepository::new(store.get_db()),
        SqlUserRepository::new(store.get_db()),
        SqlTrainingSessionRepository::new(store.get_db()),
        clock,
        policy,
    )
}

pub async fn create_service(config: BrigadeConfig) -> Result<(Store, BrigadeService), CoreError> {
    let store = Store::connect(StoreConfig::from(&config.database)).await?;
    let service = service_with_clock(&store, config.training, SystemClock);

    Ok((store, service))
}
