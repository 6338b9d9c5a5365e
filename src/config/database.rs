use crate::domain::{
    completion::entity::{completed_survey, question_answer},
    survey::entity::{answer, question, survey},
    user::entity::user,
};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema, Statement,
};
use tracing::info;

use super::AppConfig;

pub async fn establish_connection(config: &AppConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!("Successfully connected to the database.");

    if config.schema_update {
        create_tables(&db).await?;
    } else {
        info!("Skipping database schema synchronization (DB_SCHEMA_UPDATE is not true).");
    }

    Ok(db)
}

/// 엔티티 정의로부터 테이블과 조회용 인덱스를 생성합니다.
///
/// 이미 존재하는 테이블/인덱스는 건너뜁니다.
pub async fn create_tables<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    info!("Starting database schema synchronization...");

    // FK 순서대로 생성 (부모 먼저)
    create_table_if_not_exists(db, &schema, user::Entity).await?;
    create_table_if_not_exists(db, &schema, survey::Entity).await?;
    create_table_if_not_exists(db, &schema, question::Entity).await?;
    create_table_if_not_exists(db, &schema, answer::Entity).await?;
    create_table_if_not_exists(db, &schema, completed_survey::Entity).await?;
    create_table_if_not_exists(db, &schema, question_answer::Entity).await?;

    create_index_if_not_exists(db, "idx_surveys_creator", "surveys", &["creator_id"]).await?;
    create_index_if_not_exists(db, "idx_questions_survey", "questions", &["survey_id"]).await?;
    create_index_if_not_exists(db, "idx_answers_question", "answers", &["question_id"]).await?;
    create_index_if_not_exists(
        db,
        "idx_completed_survey_survey",
        "completed_survey",
        &["survey_id"],
    )
    .await?;
    create_index_if_not_exists(
        db,
        "idx_question_answer_completed",
        "question_answer",
        &["completed_survey_id"],
    )
    .await?;

    info!("Database schema synchronization completed.");
    Ok(())
}

async fn create_index_if_not_exists<C: ConnectionTrait>(
    db: &C,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let cols = columns.join(", ");
    let sql = format!("CREATE INDEX {} ON {} ({})", index_name, table_name, cols);
    let stmt = Statement::from_string(backend, sql);
    match db.execute(stmt).await {
        Ok(_) => Ok(()),
        Err(e) => {
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("duplicate") || err_str.contains("exists") {
                Ok(())
            } else {
                tracing::error!("Failed to create index {}: {}", index_name, e);
                Err(e)
            }
        }
    }
}

async fn create_table_if_not_exists<C, E>(db: &C, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: sea_orm::EntityTrait,
{
    let backend = db.get_database_backend();
    let table_name = entity.table_name().to_string();
    let create_stmt: Statement =
        backend.build(schema.create_table_from_entity(entity).if_not_exists());

    db.execute(create_stmt).await.map(|_| ()).map_err(|e| {
        tracing::error!("Failed to create table {}: {}", table_name, e);
        e
    })
}
