use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::question::entities::Difficulty;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateQuestionInput {
    pub dish_id: Uuid,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateQuestionInput {
    pub question_id: Uuid,
    pub question_text: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<u32>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone)]
pub struct GetQuestionsFilter {
    pub dish_id: Uuid,
    pub difficulty: Option<Difficulty>,
}

impl GetQuestionsFilter {
    pub fn for_dish(dish_id: Uuid) -> Self {
        Self {
            dish_id,
            difficulty: None,
        }
    }
}
