use std::sync::Arc;

use crate::domain::{
    common::{TrainingPolicy, ports::Clock},
    dish::ports::DishRepository,
    question::ports::QuestionRepository,
    restaurant::ports::RestaurantRepository,
    training::ports::TrainingSessionRepository,
    user::ports::UserRepository,
};

/// Entry point for every catalog, question bank, user and training operation.
#[derive(Clone)]
pub struct Service<R, D, Q, U, TS, CK>
where
    R: RestaurantRepository,
    D: DishRepository,
    Q: QuestionRepository,
    U: UserRepository,
    TS: TrainingSessionRepository,
    CK: Clock,
{
    pub(crate) restaurant_repository: Arc<R>,
    pub(crate) dish_repository: Arc<D>,
    pub(crate) question_repository: Arc<Q>,
    pub(crate) user_repository: Arc<U>,
    pub(crate) session_repository: Arc<TS>,
    pub(crate) clock: Arc<CK>,
    pub(crate) policy: TrainingPolicy,
}

impl<R, D, Q, U, TS, CK> Service<R, D, Q, U, TS, CK>
where
    R: RestaurantRepository,
    D: DishRepository,
    Q: QuestionRepository,
    U: UserRepository,
    TS: TrainingSessionRepository,
    CK: Clock,
{
    pub fn new(
        restaurant_repository: R,
        dish_repository: D,
        question_repository: Q,
        user_repository: U,
        session_repository: TS,
        clock: CK,
        policy: TrainingPolicy,
    ) -> Self {
        Self {
            restaurant_repository: Arc::new(restaurant_repository),
            dish_repository: Arc::new(dish_repository),
            question_repository: Arc::new(question_repository),
            user_repository: Arc::new(user_repository),
            session_repository: Arc::new(session_repository),
            clock: Arc::new(clock),
            policy,
        }
    }

    pub fn policy(&self) -> TrainingPolicy {
        self.policy
    }
}
