use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, ports::Clock, services::Service},
    dish::ports::DishRepository,
    question::ports::QuestionRepository,
    restaurant::ports::RestaurantRepository,
    stats::{
        aggregator::summarize,
        ports::StatsService,
        value_objects::{AggregationOutcome, TrainingStats},
    },
    training::{ports::TrainingSessionRepository, value_objects::GetSessionsFilter},
    user::ports::UserRepository,
};

impl<R, D, Q, U, TS, CK> StatsService for Service<R, D, Q, U, TS, CK>
where
    R: RestaurantRepository,
    D: DishRepository,
    Q: QuestionRepository,
    U: UserRepository,
    TS: TrainingSessionRepository,
    CK: Clock,
{
    async fn get_training_stats(&self, user_id: Uuid) -> Result<TrainingStats, CoreError> {
        let user = self
            .user_repository
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| CoreError::not_found("user", user_id))?;

        let sessions = self
            .session_repository
            .fetch_by_user(user_id, GetSessionsFilter::default())
            .await?;

        Ok(summarize(&user, &sessions))
    }

    #[instrument(skip(self))]
    async fn reaggregate_session(&self, session_id: Uuid) -> Result<AggregationOutcome, CoreError> {
        let session = self
            .session_repository
            .get_by_id(session_id)
            .await?
            .ok_or_else(|| CoreError::not_found("training session", session_id))?;

        if session.is_open() {
            return Err(CoreError::InvalidState {
                session_id,
                state: session.state(),
            });
        }

        let outcome = self
            .session_repository
            .aggregate_session(session_id, self.policy.aggregation, self.clock.now())
            .await?;

        info!(?outcome, "session aggregation re-run");
        Ok(outcome)
    }
}
