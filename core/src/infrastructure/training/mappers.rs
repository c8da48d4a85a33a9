use sea_orm::ActiveValue::Set;
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        training::entities::{SessionDetails, TrainingSession},
    },
    entity::training_sessions,
};

pub fn details_to_json(
    session_id: uuid::Uuid,
    details: &SessionDetails,
) -> Result<serde_json::Value, CoreError> {
    serde_json::to_value(details).map_err(|e| {
        error!("Failed to encode details of session {}: {}", session_id, e);
        CoreError::Storage(format!("session {session_id} details: {e}"))
    })
}

impl TryFrom<training_sessions::Model> for TrainingSession {
    type Error = CoreError;

    fn try_from(model: training_sessions::Model) -> Result<Self, Self::Error> {
        let details = match model.details {
            Some(details) => serde_json::from_value(details).map_err(|e| {
                error!("Malformed details stored for session {}: {}", model.id, e);
                CoreError::Storage(format!("session {} details: {e}", model.id))
            })?,
            None => SessionDetails::default(),
        };

        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            dish_id: model.dish_id,
            start_time: model.start_time.to_utc(),
            end_time: model.end_time.map(|t| t.to_utc()),
            score: model.score,
            details,
            aggregated_at: model.aggregated_at.map(|t| t.to_utc()),
        })
    }
}

impl TryFrom<&TrainingSession> for training_sessions::ActiveModel {
    type Error = CoreError;

    fn try_from(session: &TrainingSession) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Set(session.id),
            user_id: Set(session.user_id),
            dish_id: Set(session.dish_id),
            start_time: Set(session.start_time.fixed_offset()),
            end_time: Set(session.end_time.map(|t| t.fixed_offset())),
            score: Set(session.score),
            details: Set(Some(details_to_json(session.id, &session.details)?)),
            aggregated_at: Set(session.aggregated_at.map(|t| t.fixed_offset())),
        })
    }
}
