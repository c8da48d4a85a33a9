use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        question::{
            entities::Question, ports::QuestionRepository, value_objects::GetQuestionsFilter,
        },
    },
    entity::{
        dishes,
        questions::{ActiveModel, Column, Entity},
    },
    infrastructure::db::storage_error,
};

#[derive(Debug, Clone)]
pub struct SqlQuestionRepository {
    pub db: DatabaseConnection,
}

impl SqlQuestionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl QuestionRepository for SqlQuestionRepository {
    async fn create_question(&self, question: Question) -> Result<Question, CoreError> {
        let active_model = ActiveModel::try_from(&question)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(storage_error("begin question insert"))?;

        dishes::Entity::find_by_id(question.dish_id)
            .lock_shared()
            .one(&txn)
            .await
            .map_err(storage_error("check question dish"))?
            .ok_or_else(|| CoreError::reference("dish", question.dish_id))?;

        let created = Entity::insert(active_model)
            .exec_with_returning(&txn)
            .await
            .map_err(storage_error("create question"))?;

        txn.commit()
            .await
            .map_err(storage_error("commit question insert"))?;

        Question::try_from(created)
    }

    async fn get_by_id(&self, question_id: Uuid) -> Result<Option<Question>, CoreError> {
        Entity::find_by_id(question_id)
            .one(&self.db)
            .await
            .map_err(storage_error("get question"))?
            .map(Question::try_from)
            .transpose()
    }

    async fn fetch_questions(
        &self,
        filter: GetQuestionsFilter,
    ) -> Result<Vec<Question>, CoreError> {
        let mut query = Entity::find().filter(Column::DishId.eq(filter.dish_id));

        if let Some(difficulty) = filter.difficulty {
            query = query.filter(Column::Difficulty.eq(difficulty.tier()));
        }

        query
            .order_by_asc(Column::Difficulty)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error("fetch questions"))?
            .into_iter()
            .map(Question::try_from)
            .collect()
    }

    async fn update_question(&self, question: Question) -> Result<Question, CoreError> {
        let updated = Entity::update(ActiveModel::try_from(&question)?)
            .exec(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => CoreError::not_found("question", question.id),
                e => storage_error("update question")(e),
            })?;

        Question::try_from(updated)
    }

    async fn delete_question(&self, question_id: Uuid) -> Result<(), CoreError> {
        let result = Entity::delete_by_id(question_id)
            .exec(&self.db)
            .await
            .map_err(storage_error("delete question"))?;

        if result.rows_affected == 0 {
            return Err(CoreError::not_found("question", question_id));
        }

        Ok(())
    }
}
