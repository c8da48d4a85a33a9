use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_uuid_v7},
    question::entities::{Difficulty, Question},
    training::scoring::{ScoringPolicy, compute_score},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Open,
    Completed,
    Abandoned,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Open => "open",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        };
        f.write_str(label)
    }
}

/// A single answer given during a session.
///
/// The difficulty is copied from the question when the answer is recorded so
/// the score stays reproducible after the question is edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnswerRecord {
    pub question_id: Uuid,
    pub chosen_index: u32,
    pub correct: bool,
    pub difficulty: Difficulty,
    pub answered_at: DateTime<Utc>,
}

impl AnswerRecord {
    pub fn for_question(
        question: &Question,
        chosen_index: u32,
        answered_at: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        if !question.is_valid_choice(chosen_index) {
            return Err(CoreError::validation(format!(
                "chosen_index {chosen_index} is out of range for {} options",
                question.options.len()
            )));
        }

        Ok(Self {
            question_id: question.id,
            chosen_index,
            correct: question.is_correct(chosen_index),
            difficulty: question.difficulty,
            answered_at,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionDetails {
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
}

impl SessionDetails {
    pub fn has_answered(&self, question_id: Uuid) -> bool {
        self.answers.iter().any(|a| a.question_id == question_id)
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.correct).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TrainingSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub dish_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub score: Option<i32>,
    pub details: SessionDetails,
    /// Set once the session has been folded into the user's rollups.
    pub aggregated_at: Option<DateTime<Utc>>,
}

impl TrainingSession {
    pub fn start(user_id: Uuid, dish_id: Uuid, start_time: DateTime<Utc>) -> Self {
        Self {
            id: generate_uuid_v7(),
            user_id,
            dish_id: Some(dish_id),
            start_time,
            end_time: None,
            score: None,
            details: SessionDetails::default(),
            aggregated_at: None,
        }
    }

    pub fn state(&self) -> SessionState {
        match (self.end_time, self.score) {
            (None, _) => SessionState::Open,
            (Some(_), Some(_)) => SessionState::Completed,
            (Some(_), None) => SessionState::Abandoned,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Elapsed whole seconds between start and end; `0` while open.
    pub fn duration(&self) -> i64 {
        match self.end_time {
            Some(end_time) => (end_time - self.start_time).num_seconds().max(0),
            None => 0,
        }
    }

    pub fn ensure_open(&self) -> Result<(), CoreError> {
        match self.state() {
            SessionState::Open => Ok(()),
            state => Err(CoreError::InvalidState {
                session_id: self.id,
                state,
            }),
        }
    }

    pub fn record_answer(&mut self, record: AnswerRecord) -> Result<(), CoreError> {
        self.ensure_open()?;

        if self.details.has_answered(record.question_id) {
            return Err(CoreError::Conflict(format!(
                "question {} was already answered in session {}",
                record.question_id, self.id
            )));
        }

        self.details.answers.push(record);
        Ok(())
    }

    /// Closes the session with a score computed from the recorded answers.
    pub fn complete(
        &mut self,
        end_time: DateTime<Utc>,
        policy: ScoringPolicy,
    ) -> Result<i32, CoreError> {
        self.close(end_time)?;
        let score = compute_score(&self.details.answers, policy);
        self.score = Some(score);
        Ok(score)
    }

    /// Closes the session without an outcome.
    pub fn abandon(&mut self, end_time: DateTime<Utc>) -> Result<(), CoreError> {
        self.close(end_time)
    }

    fn close(&mut self, end_time: DateTime<Utc>) -> Result<(), CoreError> {
        self.ensure_open()?;
        if end_time < self.start_time {
            return Err(CoreError::validation(format!(
                "session {} cannot end before it started",
                self.id
            )));
        }
        self.end_time = Some(end_time);
        Ok(())
    }
}
