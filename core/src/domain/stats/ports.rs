use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    stats::value_objects::{AggregationOutcome, TrainingStats},
};

pub trait StatsService: Send + Sync {
    fn get_training_stats(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<TrainingStats, CoreError>> + Send;

    /// Re-runs rollup aggregation for one closed session. Idempotent.
    fn reaggregate_session(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<AggregationOutcome, CoreError>> + Send;
}
