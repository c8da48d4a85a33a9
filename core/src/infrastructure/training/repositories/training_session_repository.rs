use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{Set, Unchanged},
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
    sea_query::Expr,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        common::{TrainingPolicy, entities::app_errors::CoreError},
        question::entities::Question,
        stats::{aggregator, policies::AggregationPolicy, value_objects::AggregationOutcome},
        training::{
            entities::{AnswerRecord, SessionState, TrainingSession},
            ports::TrainingSessionRepository,
            value_objects::{GetSessionsFilter, SessionClosure},
        },
        user::entities::User,
    },
    entity::{
        dishes, questions,
        training_sessions::{ActiveModel, Column, Entity},
        users,
    },
    infrastructure::{
        db::{conflict_or_storage, storage_error},
        training::mappers::details_to_json,
    },
};

#[derive(Debug, Clone)]
pub struct SqlTrainingSessionRepository {
    pub db: DatabaseConnection,
}

impl SqlTrainingSessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Loads the session row under an exclusive lock.
async fn lock_session<C>(conn: &C, session_id: Uuid) -> Result<TrainingSession, CoreError>
where
    C: ConnectionTrait,
{
    Entity::find_by_id(session_id)
        .lock_exclusive()
        .one(conn)
        .await
        .map_err(storage_error("lock training session"))?
        .ok_or_else(|| CoreError::not_found("training session", session_id))
        .and_then(TrainingSession::try_from)
}

/// The user's open session as seen by `conn`.
async fn find_open<C>(conn: &C, user_id: Uuid) -> Result<Option<TrainingSession>, CoreError>
where
    C: ConnectionTrait,
{
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::EndTime.is_null())
        .one(conn)
        .await
        .map_err(storage_error("find open session"))?
        .map(TrainingSession::try_from)
        .transpose()
}

/// Moves `last_active` forward to `at`; never backwards.
async fn touch_user<C>(conn: &C, user_id: Uuid, at: DateTime<Utc>) -> Result<(), CoreError>
where
    C: ConnectionTrait,
{
    users::Entity::update_many()
        .col_expr(users::Column::LastActive, Expr::value(at.fixed_offset()))
        .filter(users::Column::Id.eq(user_id))
        .filter(users::Column::LastActive.lt(at.fixed_offset()))
        .exec(conn)
        .await
        .map_err(storage_error("touch user"))?;

    Ok(())
}

/// Folds a closed session into its user's rollups at most once.
///
/// Marking the session and updating the user happen on the caller's connection
/// and must commit together.
async fn apply_aggregation<C>(
    conn: &C,
    session: &mut TrainingSession,
    policy: AggregationPolicy,
    at: DateTime<Utc>,
) -> Result<AggregationOutcome, CoreError>
where
    C: ConnectionTrait,
{
    let Some(contribution) = aggregator::contribution(session, policy) else {
        return Ok(if session.aggregated_at.is_some() {
            AggregationOutcome::AlreadyAggregated
        } else {
            AggregationOutcome::NotCounted
        });
    };

    let marked = Entity::update_many()
        .col_expr(Column::AggregatedAt, Expr::value(at.fixed_offset()))
        .filter(Column::Id.eq(session.id))
        .filter(Column::AggregatedAt.is_null())
        .exec(conn)
        .await
        .map_err(storage_error("mark session aggregated"))?;

    if marked.rows_affected == 0 {
        warn!(session_id = %session.id, "session was aggregated concurrently");
        return Ok(AggregationOutcome::AlreadyAggregated);
    }

    let model = users::Entity::find_by_id(contribution.user_id)
        .lock_exclusive()
        .one(conn)
        .await
        .map_err(storage_error("lock user for rollup"))?
        .ok_or_else(|| CoreError::reference("user", contribution.user_id))?;

    let mut user = User::from(model);
    user.apply_contribution(&contribution);
    user.touch(at);

    users::ActiveModel {
        id: Unchanged(user.id),
        total_training_time: Set(user.total_training_time),
        last_trained_dish: Set(user.last_trained_dish),
        last_active: Set(user.last_active.fixed_offset()),
        ..Default::default()
    }
    .update(conn)
    .await
    .map_err(storage_error("update user rollups"))?;

    session.aggregated_at = Some(at);
    debug!(
        session_id = %session.id,
        minutes = contribution.minutes,
        total_training_time = user.total_training_time,
        "session folded into user rollups"
    );

    Ok(AggregationOutcome::Aggregated {
        minutes: contribution.minutes,
    })
}

impl TrainingSessionRepository for SqlTrainingSessionRepository {
    async fn open_session(&self, session: TrainingSession) -> Result<TrainingSession, CoreError> {
        let active_model = ActiveModel::try_from(&session)?;
        let dish_id = session
            .dish_id
            .ok_or_else(|| CoreError::validation("a training session needs a dish"))?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(storage_error("begin session open"))?;

        // The user row lock serializes concurrent starts for the same user.
        users::Entity::find_by_id(session.user_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(storage_error("lock session user"))?
            .ok_or_else(|| CoreError::reference("user", session.user_id))?;

        dishes::Entity::find_by_id(dish_id)
            .lock_shared()
            .one(&txn)
            .await
            .map_err(storage_error("check session dish"))?
            .ok_or_else(|| CoreError::reference("dish", dish_id))?;

        if let Some(open) = find_open(&txn, session.user_id).await? {
            return Err(CoreError::Conflict(format!(
                "user {} already has open training session {}",
                session.user_id, open.id
            )));
        }

        let user_id = session.user_id;
        let created = Entity::insert(active_model)
            .exec_with_returning(&txn)
            .await
            .map_err(conflict_or_storage("open training session", || {
                format!("user {user_id} already has an open training session")
            }))?;

        touch_user(&txn, user_id, session.start_time).await?;

        txn.commit()
            .await
            .map_err(storage_error("commit session open"))?;

        TrainingSession::try_from(created)
    }

    async fn get_by_id(&self, session_id: Uuid) -> Result<Option<TrainingSession>, CoreError> {
        Entity::find_by_id(session_id)
            .one(&self.db)
            .await
            .map_err(storage_error("get training session"))?
            .map(TrainingSession::try_from)
            .transpose()
    }

    async fn fetch_by_user(
        &self,
        user_id: Uuid,
        filter: GetSessionsFilter,
    ) -> Result<Vec<TrainingSession>, CoreError> {
        let mut query = Entity::find().filter(Column::UserId.eq(user_id));

        query = match filter.state {
            Some(SessionState::Open) => query.filter(Column::EndTime.is_null()),
            Some(SessionState::Completed) => query
                .filter(Column::EndTime.is_not_null())
                .filter(Column::Score.is_not_null()),
            Some(SessionState::Abandoned) => query
                .filter(Column::EndTime.is_not_null())
                .filter(Column::Score.is_null()),
            None => query,
        };

        if let Some(dish_id) = filter.dish_id {
            query = query.filter(Column::DishId.eq(dish_id));
        }

        query
            .order_by_desc(Column::StartTime)
            .order_by_desc(Column::Id)
            .limit(filter.limit.map(u64::from))
            .offset(filter.offset.map(u64::from))
            .all(&self.db)
            .await
            .map_err(storage_error("fetch training sessions"))?
            .into_iter()
            .map(TrainingSession::try_from)
            .collect()
    }

    async fn append_answer(
        &self,
        session_id: Uuid,
        record: AnswerRecord,
    ) -> Result<TrainingSession, CoreError> {
        let answered_at = record.answered_at;
        let txn = self
            .db
            .begin()
            .await
            .map_err(storage_error("begin answer append"))?;

        let mut session = lock_session(&txn, session_id).await?;
        session.ensure_open()?;

        // Correctness is taken from the question row as it stands in this transaction.
        let question = questions::Entity::find_by_id(record.question_id)
            .lock_shared()
            .one(&txn)
            .await
            .map_err(storage_error("lock answered question"))?
            .ok_or_else(|| CoreError::reference("question", record.question_id))
            .and_then(Question::try_from)?;

        if session.dish_id != Some(question.dish_id) {
            return Err(CoreError::reference(
                "question for the session's dish",
                question.id,
            ));
        }

        session.record_answer(AnswerRecord::for_question(
            &question,
            record.chosen_index,
            answered_at,
        )?)?;

        let updated = Entity::update_many()
            .col_expr(
                Column::Details,
                Expr::value(details_to_json(session.id, &session.details)?),
            )
            .filter(Column::Id.eq(session_id))
            .filter(Column::EndTime.is_null())
            .exec(&txn)
            .await
            .map_err(storage_error("append answer"))?;

        if updated.rows_affected == 0 {
            return Err(CoreError::InvalidState {
                session_id,
                state: lock_session(&txn, session_id).await?.state(),
            });
        }

        touch_user(&txn, session.user_id, answered_at).await?;

        txn.commit()
            .await
            .map_err(storage_error("commit answer append"))?;

        debug!(
            %session_id,
            answers = session.details.answers.len(),
            "answer recorded"
        );
        Ok(session)
    }

    async fn close_session(
        &self,
        session_id: Uuid,
        closure: SessionClosure,
        policy: TrainingPolicy,
    ) -> Result<TrainingSession, CoreError> {
        let at = closure.at();
        let txn = self
            .db
            .begin()
            .await
            .map_err(storage_error("begin session close"))?;

        let mut session = lock_session(&txn, session_id).await?;
        match closure {
            SessionClosure::Complete { at } => {
                session.complete(at, policy.scoring)?;
            }
            SessionClosure::Abandon { at } => session.abandon(at)?,
        }

        let closed = Entity::update_many()
            .col_expr(Column::EndTime, Expr::value(at.fixed_offset()))
            .col_expr(Column::Score, Expr::value(session.score))
            .filter(Column::Id.eq(session_id))
            .filter(Column::EndTime.is_null())
            .exec(&txn)
            .await
            .map_err(storage_error("close training session"))?;

        if closed.rows_affected == 0 {
            return Err(CoreError::InvalidState {
                session_id,
                state: lock_session(&txn, session_id).await?.state(),
            });
        }

        let outcome = apply_aggregation(&txn, &mut session, policy.aggregation, at).await?;
        if matches!(outcome, AggregationOutcome::NotCounted) {
            touch_user(&txn, session.user_id, at).await?;
        }

        txn.commit()
            .await
            .map_err(storage_error("commit session close"))?;

        info!(%session_id, state = %session.state(), ?outcome, "training session closed");
        Ok(session)
    }

    async fn aggregate_session(
        &self,
        session_id: Uuid,
        policy: AggregationPolicy,
        aggregated_at: DateTime<Utc>,
    ) -> Result<AggregationOutcome, CoreError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(storage_error("begin session aggregation"))?;

        let mut session = lock_session(&txn, session_id).await?;
        if session.is_open() {
            return Err(CoreError::InvalidState {
                session_id,
                state: session.state(),
            });
        }

        let outcome = apply_aggregation(&txn, &mut session, policy, aggregated_at).await?;

        txn.commit()
            .await
            .map_err(storage_error("commit session aggregation"))?;

        Ok(outcome)
    }
}
