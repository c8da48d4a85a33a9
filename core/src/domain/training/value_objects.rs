use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::training::entities::SessionState;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StartSessionInput {
    pub user_id: Uuid,
    pub dish_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordAnswerInput {
    pub session_id: Uuid,
    pub question_id: Uuid,
    pub chosen_index: u32,
}

/// How an open session is being closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionClosure {
    Complete { at: DateTime<Utc> },
    Abandon { at: DateTime<Utc> },
}

impl SessionClosure {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Self::Complete { at } | Self::Abandon { at } => *at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetSessionsFilter {
    pub state: Option<SessionState>,
    pub dish_id: Option<Uuid>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}
