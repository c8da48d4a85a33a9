use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// What one closed session adds to its user's rollups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsContribution {
    pub user_id: Uuid,
    pub minutes: i64,
    pub trained_dish: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum AggregationOutcome {
    Aggregated { minutes: i64 },
    AlreadyAggregated,
    NotCounted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrainingStats {
    pub user_id: Uuid,
    /// Minutes.
    pub total_training_time: i64,
    pub last_trained_dish: Option<Uuid>,
    pub completed_sessions: u64,
    pub abandoned_sessions: u64,
    pub open_session: Option<Uuid>,
    pub average_score: Option<f64>,
}
