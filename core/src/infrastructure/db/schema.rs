use sea_orm::{
    ConnectionTrait, DbBackend, EntityTrait, Schema,
    sea_query::{Index, IndexCreateStatement},
};
use tracing::{debug, error};

use crate::{
    domain::common::entities::app_errors::CoreError,
    entity::{dishes, questions, restaurants, training_sessions, users},
};

/// Backs the one-open-session-per-user rule at the store level.
const OPEN_SESSION_INDEX_SQL: &str = "CREATE UNIQUE INDEX IF NOT EXISTS \
     uq_training_sessions_open_per_user ON training_sessions (user_id) WHERE end_time IS NULL";

const INGREDIENTS_GIN_INDEX_SQL: &str = "CREATE INDEX IF NOT EXISTS \
     idx_dishes_ingredients ON dishes USING GIN (ingredients jsonb_path_ops)";

fn secondary_indexes() -> Vec<IndexCreateStatement> {
    vec![
        Index::create()
            .if_not_exists()
            .name("idx_users_restaurant_id")
            .table(users::Entity)
            .col(users::Column::RestaurantId)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_dishes_restaurant_id")
            .table(dishes::Entity)
            .col(dishes::Column::RestaurantId)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_dishes_name")
            .table(dishes::Entity)
            .col(dishes::Column::Name)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_questions_dish_difficulty")
            .table(questions::Entity)
            .col(questions::Column::DishId)
            .col(questions::Column::Difficulty)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_training_sessions_user_id")
            .table(training_sessions::Entity)
            .col(training_sessions::Column::UserId)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_training_sessions_dish_id")
            .table(training_sessions::Entity)
            .col(training_sessions::Column::DishId)
            .to_owned(),
    ]
}

async fn create_table<C, E>(
    db: &C,
    schema: &Schema,
    backend: DbBackend,
    entity: E,
) -> Result<(), CoreError>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await.map_err(|e| {
        error!("Failed to create table {}: {}", entity.table_name(), e);
        CoreError::Storage(format!("create table {}: {e}", entity.table_name()))
    })?;

    debug!(table = entity.table_name(), "table ready");
    Ok(())
}

async fn execute_sql<C: ConnectionTrait>(db: &C, sql: &str) -> Result<(), CoreError> {
    db.execute_unprepared(sql).await.map_err(|e| {
        error!("Failed to apply schema statement: {}", e);
        CoreError::Storage(format!("schema: {e}"))
    })?;
    Ok(())
}

/// Creates the five tables and their indexes. Safe to run repeatedly.
pub async fn apply<C: ConnectionTrait>(db: &C) -> Result<(), CoreError> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    // Referenced tables first: foreign keys are declared inline.
    create_table(db, &schema, backend, restaurants::Entity).await?;
    create_table(db, &schema, backend, dishes::Entity).await?;
    create_table(db, &schema, backend, users::Entity).await?;
    create_table(db, &schema, backend, questions::Entity).await?;
    create_table(db, &schema, backend, training_sessions::Entity).await?;

    for index in secondary_indexes() {
        db.execute(backend.build(&index)).await.map_err(|e| {
            error!("Failed to create index: {}", e);
            CoreError::Storage(format!("create index: {e}"))
        })?;
    }

    execute_sql(db, OPEN_SESSION_INDEX_SQL).await?;

    if backend == DbBackend::Postgres {
        execute_sql(db, INGREDIENTS_GIN_INDEX_SQL).await?;
    }

    Ok(())
}
