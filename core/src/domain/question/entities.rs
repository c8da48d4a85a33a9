use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::{
    entities::app_errors::CoreError, generate_uuid_v7, validation::required_text,
};

pub const MIN_OPTIONS: usize = 2;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy = 1,
    Medium = 2,
    Hard = 3,
}

impl Difficulty {
    /// Tier number, also used as the scoring weight.
    pub fn tier(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i16> for Difficulty {
    type Error = CoreError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Easy),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Hard),
            other => Err(CoreError::validation(format!(
                "difficulty must be 1, 2 or 3, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    pub id: Uuid,
    pub dish_id: Uuid,
    pub question_text: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct_answer: u32,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone)]
pub struct QuestionConfig {
    pub dish_id: Uuid,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: u32,
    pub difficulty: Difficulty,
}

impl Question {
    pub fn new(config: QuestionConfig) -> Result<Self, CoreError> {
        let question = Self {
            id: generate_uuid_v7(),
            dish_id: config.dish_id,
            question_text: config.question_text,
            options: config.options,
            correct_answer: config.correct_answer,
            difficulty: config.difficulty,
        };
        question.validated()
    }

    /// Normalises text fields and checks the answer key against the options.
    pub fn validated(self) -> Result<Self, CoreError> {
        let question_text = required_text("question_text", &self.question_text, None)?;

        if self.options.len() < MIN_OPTIONS {
            return Err(CoreError::validation(format!(
                "a question needs at least {MIN_OPTIONS} options, got {}",
                self.options.len()
            )));
        }

        let options = self
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| required_text(&format!("option {index}"), option, None))
            .collect::<Result<Vec<_>, _>>()?;

        if self.correct_answer as usize >= options.len() {
            return Err(CoreError::validation(format!(
                "correct_answer {} is out of range for {} options",
                self.correct_answer,
                options.len()
            )));
        }

        Ok(Self {
            question_text,
            options,
            ..self
        })
    }

    pub fn is_valid_choice(&self, chosen_index: u32) -> bool {
        (chosen_index as usize) < self.options.len()
    }

    pub fn is_correct(&self, chosen_index: u32) -> bool {
        chosen_index == self.correct_answer
    }
}
