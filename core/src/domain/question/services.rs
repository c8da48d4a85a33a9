use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, ports::Clock, services::Service},
    dish::ports::DishRepository,
    question::{
        entities::{Question, QuestionConfig},
        ports::{QuestionRepository, QuestionService},
        value_objects::{CreateQuestionInput, GetQuestionsFilter, UpdateQuestionInput},
    },
    restaurant::ports::RestaurantRepository,
    training::ports::TrainingSessionRepository,
    user::ports::UserRepository,
};

impl<R, D, Q, U, TS, CK> QuestionService for Service<R, D, Q, U, TS, CK>
where
    R: RestaurantRepository,
    D: DishRepository,
    Q: QuestionRepository,
    U: UserRepository,
    TS: TrainingSessionRepository,
    CK: Clock,
{
    #[instrument(skip(self, input), fields(dish_id = %input.dish_id))]
    async fn add_question(&self, input: CreateQuestionInput) -> Result<Question, CoreError> {
        let question = Question::new(QuestionConfig {
            dish_id: input.dish_id,
            question_text: input.question_text,
            options: input.options,
            correct_answer: input.correct_answer,
            difficulty: input.difficulty,
        })?;

        let created = self.question_repository.create_question(question).await?;

        debug!(question_id = %created.id, "question added");
        Ok(created)
    }

    #[instrument(skip(self, input), fields(question_id = %input.question_id))]
    async fn update_question(&self, input: UpdateQuestionInput) -> Result<Question, CoreError> {
        let current = self
            .question_repository
            .get_by_id(input.question_id)
            .await?
            .ok_or_else(|| CoreError::not_found("question", input.question_id))?;

        let merged = Question {
            question_text: input.question_text.unwrap_or(current.question_text),
            options: input.options.unwrap_or(current.options),
            correct_answer: input.correct_answer.unwrap_or(current.correct_answer),
            difficulty: input.difficulty.unwrap_or(current.difficulty),
            ..current
        }
        .validated()?;

        self.question_repository.update_question(merged).await
    }

    async fn get_question(&self, question_id: Uuid) -> Result<Option<Question>, CoreError> {
        self.question_repository.get_by_id(question_id).await
    }

    async fn get_questions(&self, filter: GetQuestionsFilter) -> Result<Vec<Question>, CoreError> {
        self.question_repository.fetch_questions(filter).await
    }

    #[instrument(skip(self))]
    async fn delete_question(&self, question_id: Uuid) -> Result<(), CoreError> {
        self.question_repository.delete_question(question_id).await
    }
}
