use crate::domain::{
    stats::{
        policies::AggregationPolicy,
        value_objects::{StatsContribution, TrainingStats},
    },
    training::entities::{SessionState, TrainingSession},
    user::entities::User,
};

pub fn floor_minutes(seconds: i64) -> i64 {
    seconds.max(0) / 60
}

/// The rollup delta for `session`, or `None` when it must not be aggregated
/// (still open, already aggregated, or excluded by `policy`).
pub fn contribution(
    session: &TrainingSession,
    policy: AggregationPolicy,
) -> Option<StatsContribution> {
    if session.aggregated_at.is_some() {
        return None;
    }

    let trained_dish = match session.state() {
        SessionState::Open => return None,
        SessionState::Completed => session.dish_id,
        SessionState::Abandoned if policy.count_abandoned_time => None,
        SessionState::Abandoned => return None,
    };

    Some(StatsContribution {
        user_id: session.user_id,
        minutes: floor_minutes(session.duration()),
        trained_dish,
    })
}

/// Builds the stats view of `user` from their session history.
pub fn summarize(user: &User, sessions: &[TrainingSession]) -> TrainingStats {
    let mut completed = 0u64;
    let mut abandoned = 0u64;
    let mut score_sum = 0i64;
    let mut open_session = None;

    for session in sessions {
        match session.state() {
            SessionState::Open => open_session = Some(session.id),
            SessionState::Completed => {
                completed += 1;
                score_sum += i64::from(session.score.unwrap_or(0));
            }
            SessionState::Abandoned => abandoned += 1,
        }
    }

    TrainingStats {
        user_id: user.id,
        total_training_time: user.total_training_time,
        last_trained_dish: user.last_trained_dish,
        completed_sessions: completed,
        abandoned_sessions: abandoned,
        open_session,
        average_score: (completed > 0).then(|| score_sum as f64 / completed as f64),
    }
}
