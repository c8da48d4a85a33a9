use sea_orm::ActiveValue::Set;
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        question::entities::{Difficulty, Question},
    },
    entity::questions,
};

fn malformed(model: &questions::Model, detail: impl std::fmt::Display) -> CoreError {
    error!("Malformed question {} in store: {}", model.id, detail);
    CoreError::Storage(format!("question {}: {detail}", model.id))
}

impl TryFrom<questions::Model> for Question {
    type Error = CoreError;

    fn try_from(model: questions::Model) -> Result<Self, Self::Error> {
        let options: Vec<String> =
            serde_json::from_value(model.options.clone()).map_err(|e| malformed(&model, e))?;
        let correct_answer = u32::try_from(model.correct_answer)
            .map_err(|_| malformed(&model, "negative correct_answer"))?;
        let difficulty =
            Difficulty::try_from(model.difficulty).map_err(|e| malformed(&model, e))?;

        Ok(Self {
            id: model.id,
            dish_id: model.dish_id,
            question_text: model.question_text,
            options,
            correct_answer,
            difficulty,
        })
    }
}

impl TryFrom<&Question> for questions::ActiveModel {
    type Error = CoreError;

    fn try_from(question: &Question) -> Result<Self, Self::Error> {
        let correct_answer = i32::try_from(question.correct_answer).map_err(|_| {
            CoreError::validation(format!(
                "correct_answer {} is out of range",
                question.correct_answer
            ))
        })?;

        Ok(Self {
            id: Set(question.id),
            dish_id: Set(question.dish_id),
            question_text: Set(question.question_text.clone()),
            options: Set(serde_json::Value::from(question.options.clone())),
            correct_answer: Set(correct_answer),
            difficulty: Set(question.difficulty.tier()),
        })
    }
}
