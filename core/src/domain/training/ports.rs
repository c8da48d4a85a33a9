use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    common::{TrainingPolicy, entities::app_errors::CoreError},
    stats::{policies::AggregationPolicy, value_objects::AggregationOutcome},
    training::{
        entities::{AnswerRecord, TrainingSession},
        value_objects::{GetSessionsFilter, RecordAnswerInput, SessionClosure, StartSessionInput},
    },
};

/// Session lifecycle operations invoked by the delivery layer.
pub trait TrainingService: Send + Sync {
    fn start_session(
        &self,
        input: StartSessionInput,
    ) -> impl Future<Output = Result<TrainingSession, CoreError>> + Send;

    fn record_answer(
        &self,
        input: RecordAnswerInput,
    ) -> impl Future<Output = Result<TrainingSession, CoreError>> + Send;

    fn complete_session(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<TrainingSession, CoreError>> + Send;

    fn abandon_session(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<TrainingSession, CoreError>> + Send;

    fn get_session(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<Option<TrainingSession>, CoreError>> + Send;

    fn list_sessions(
        &self,
        user_id: Uuid,
        filter: GetSessionsFilter,
    ) -> impl Future<Output = Result<Vec<TrainingSession>, CoreError>> + Send;
}

/// Every mutator runs in one store transaction.
#[cfg_attr(test, mockall::automock)]
pub trait TrainingSessionRepository: Send + Sync {
    /// Inserts an open session and refreshes the user's `last_active`.
    ///
    /// Fails with `Reference` when the user or dish is gone and with
    /// `Conflict` when the user already has an open session.
    fn open_session(
        &self,
        session: TrainingSession,
    ) -> impl Future<Output = Result<TrainingSession, CoreError>> + Send;

    fn get_by_id(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<Option<TrainingSession>, CoreError>> + Send;

    fn fetch_by_user(
        &self,
        user_id: Uuid,
        filter: GetSessionsFilter,
    ) -> impl Future<Output = Result<Vec<TrainingSession>, CoreError>> + Send;

    /// Records the answer against the question row read inside the same
    /// transaction, failing with `Reference` once the question or the
    /// session's dish is gone.
    fn append_answer(
        &self,
        session_id: Uuid,
        record: AnswerRecord,
    ) -> impl Future<Output = Result<TrainingSession, CoreError>> + Send;

    /// Closes the session and folds it into the user's rollups atomically.
    fn close_session(
        &self,
        session_id: Uuid,
        closure: SessionClosure,
        policy: TrainingPolicy,
    ) -> impl Future<Output = Result<TrainingSession, CoreError>> + Send;

    fn aggregate_session(
        &self,
        session_id: Uuid,
        policy: AggregationPolicy,
        aggregated_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<AggregationOutcome, CoreError>> + Send;
}
