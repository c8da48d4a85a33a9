use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    question::{
        entities::Question,
        value_objects::{CreateQuestionInput, GetQuestionsFilter, UpdateQuestionInput},
    },
};

pub trait QuestionService: Send + Sync {
    fn add_question(
        &self,
        input: CreateQuestionInput,
    ) -> impl Future<Output = Result<Question, CoreError>> + Send;

    fn update_question(
        &self,
        input: UpdateQuestionInput,
    ) -> impl Future<Output = Result<Question, CoreError>> + Send;

    fn get_question(
        &self,
        question_id: Uuid,
    ) -> impl Future<Output = Result<Option<Question>, CoreError>> + Send;

    fn get_questions(
        &self,
        filter: GetQuestionsFilter,
    ) -> impl Future<Output = Result<Vec<Question>, CoreError>> + Send;

    fn delete_question(
        &self,
        question_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait QuestionRepository: Send + Sync {
    /// Fails with `Reference` when the dish does not exist.
    fn create_question(
        &self,
        question: Question,
    ) -> impl Future<Output = Result<Question, CoreError>> + Send;

    fn get_by_id(
        &self,
        question_id: Uuid,
    ) -> impl Future<Output = Result<Option<Question>, CoreError>> + Send;

    fn fetch_questions(
        &self,
        filter: GetQuestionsFilter,
    ) -> impl Future<Output = Result<Vec<Question>, CoreError>> + Send;

    fn update_question(
        &self,
        question: Question,
    ) -> impl Future<Output = Result<Question, CoreError>> + Send;

    fn delete_question(
        &self,
        question_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
