use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, ports::Clock, services::Service},
    dish::ports::DishRepository,
    question::ports::QuestionRepository,
    restaurant::ports::RestaurantRepository,
    training::{
        entities::{AnswerRecord, TrainingSession},
        ports::{TrainingService, TrainingSessionRepository},
        value_objects::{GetSessionsFilter, RecordAnswerInput, SessionClosure, StartSessionInput},
    },
    user::ports::UserRepository,
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
    async fn close(
        &self,
        session_id: Uuid,
        closure: SessionClosure,
    ) -> Result<TrainingSession, CoreError> {
        let session = self
            .session_repository
            .get_by_id(session_id)
            .await?
            .ok_or_else(|| CoreError::not_found("training session", session_id))?;
        session.ensure_open()?;

        self.session_repository
            .close_session(session_id, closure, self.policy)
            .await
    }
}

impl<R, D, Q, U, TS, CK> TrainingService for Service<R, D, Q, U, TS, CK>
where
    R: RestaurantRepository,
    D: DishRepository,
    Q: QuestionRepository,
    U: UserRepository,
    TS: TrainingSessionRepository,
    CK: Clock,
{
    #[instrument(skip(self), fields(user_id = %input.user_id, dish_id = %input.dish_id))]
    async fn start_session(&self, input: StartSessionInput) -> Result<TrainingSession, CoreError> {
        self.user_repository
            .get_by_id(input.user_id)
            .await?
            .ok_or_else(|| CoreError::reference("user", input.user_id))?;

        self.dish_repository
            .get_by_id(input.dish_id)
            .await?
            .ok_or_else(|| CoreError::reference("dish", input.dish_id))?;

        let session = TrainingSession::start(input.user_id, input.dish_id, self.clock.now());
        let session = self.session_repository.open_session(session).await?;

        info!(session_id = %session.id, "training session started");
        Ok(session)
    }

    #[instrument(skip(self), fields(session_id = %input.session_id, question_id = %input.question_id))]
    async fn record_answer(&self, input: RecordAnswerInput) -> Result<TrainingSession, CoreError> {
        let session = self
            .session_repository
            .get_by_id(input.session_id)
            .await?
            .ok_or_else(|| CoreError::not_found("training session", input.session_id))?;
        session.ensure_open()?;

        let question = self
            .question_repository
            .get_by_id(input.question_id)
            .await?
            .ok_or_else(|| CoreError::reference("question", input.question_id))?;

        if session.dish_id != Some(question.dish_id) {
            return Err(CoreError::reference(
                "question for the session's dish",
                input.question_id,
            ));
        }

        let record = AnswerRecord::for_question(&question, input.chosen_index, self.clock.now())?;

        self.session_repository
            .append_answer(input.session_id, record)
            .await
    }

    #[instrument(skip(self))]
    async fn complete_session(&self, session_id: Uuid) -> Result<TrainingSession, CoreError> {
        let session = self
            .close(
                session_id,
                SessionClosure::Complete {
                    at: self.clock.now(),
                },
            )
            .await?;

        info!(
            score = session.score,
            correct = session.details.correct_count(),
            answers = session.details.answers.len(),
            duration_seconds = session.duration(),
            "training session completed"
        );
        Ok(session)
    }

    #[instrument(skip(self))]
    async fn abandon_session(&self, session_id: Uuid) -> Result<TrainingSession, CoreError> {
        let session = self
            .close(
                session_id,
                SessionClosure::Abandon {
                    at: self.clock.now(),
                },
            )
            .await?;

        info!(
            duration_seconds = session.duration(),
            "training session abandoned"
        );
        Ok(session)
    }

    async fn get_session(&self, session_id: Uuid) -> Result<Option<TrainingSession>, CoreError> {
        self.session_repository.get_by_id(session_id).await
    }

    async fn list_sessions(
        &self,
        user_id: Uuid,
        filter: GetSessionsFilter,
    ) -> Result<Vec<TrainingSession>, CoreError> {
        self.session_repository.fetch_by_user(user_id, filter).await
    }
}
