#![allow(dead_code)]

use chrono::Utc;
use sea_orm::{ConnectOptions, Database};

use survey_server::config::{create_tables, AppConfig};
use survey_server::domain::answer::dto::CreateAnswerRequest;
use survey_server::domain::answer::service::AnswerService;
use survey_server::domain::question::dto::CreateQuestionRequest;
use survey_server::domain::question::service::QuestionService;
use survey_server::domain::survey::dto::CreateSurveyRequest;
use survey_server::domain::survey::service::SurveyService;
use survey_server::domain::user::dto::RegisterRequest;
use survey_server::domain::user::entity::user::{self, Role};
use survey_server::domain::user::service::UserService;
use survey_server::utils::jwt::issue_token;
use survey_server::AppState;

pub const TEST_SECRET: &str = "test-jwt-secret";
pub const TEST_PASSWORD: &str = "password1234";

/// 인메모리 SQLite 기반 테스트 상태
pub async fn setup_state() -> AppState {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    create_tables(&db).await.unwrap();

    AppState {
        db,
        config: AppConfig {
            server_port: 0,
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: TEST_SECRET.to_string(),
            jwt_expiration: 1800,
            schema_update: true,
            admin: None,
        },
    }
}

pub async fn create_user(state: &AppState, nickname: &str, role: Role) -> user::Model {
    let registered = UserService::register(
        state,
        RegisterRequest {
            nickname: nickname.to_string(),
            email: format!("{}@example.com", nickname),
            password: TEST_PASSWORD.to_string(),
        },
    )
    .await
    .unwrap();

    if role == Role::Admin {
        UserService::set_role(state, registered.user_id, Role::Admin)
            .await
            .unwrap();
    }

    UserService::find(&state.db, registered.user_id)
        .await
        .unwrap()
        .unwrap()
}

pub fn token_for(user: &user::Model) -> String {
    issue_token(
        user.user_id,
        user.role.as_claim(),
        Utc::now(),
        TEST_SECRET,
        1800,
    )
    .unwrap()
}

/// 설문 1개: 단일 선택 질문(선택지 2개) + 복수 선택 질문(선택지 2개)
pub struct SurveyFixture {
    pub owner: user::Model,
    pub survey_id: i32,
    pub single_question_id: i32,
    pub single_answer_ids: [i32; 2],
    pub multi_question_id: i32,
    pub multi_answer_ids: [i32; 2],
}

pub async fn seed_survey(state: &AppState, owner: user::Model, name: &str) -> SurveyFixture {
    let survey = SurveyService::create(
        state,
        &owner,
        CreateSurveyRequest {
            name: name.to_string(),
            description: Some("테스트 설문".to_string()),
        },
    )
    .await
    .unwrap();

    let single = add_question(state, &owner, survey.survey_id, "가장 좋아하는 색은?", false).await;
    let single_a = add_answer(state, &owner, single, "빨강").await;
    let single_b = add_answer(state, &owner, single, "파랑").await;

    let multi = add_question(state, &owner, survey.survey_id, "좋아하는 과일은?", true).await;
    let multi_a = add_answer(state, &owner, multi, "사과").await;
    let multi_b = add_answer(state, &owner, multi, "바나나").await;

    SurveyFixture {
        owner,
        survey_id: survey.survey_id,
        single_question_id: single,
        single_answer_ids: [single_a, single_b],
        multi_question_id: multi,
        multi_answer_ids: [multi_a, multi_b],
    }
}

pub async fn add_question(
    state: &AppState,
    acting: &user::Model,
    survey_id: i32,
    text: &str,
    multiple_answers: bool,
) -> i32 {
    QuestionService::create(
        state,
        acting,
        CreateQuestionRequest {
            text: text.to_string(),
            multiple_answers,
            survey_id,
        },
    )
    .await
    .unwrap()
    .question_id
}

pub async fn add_answer(state: &AppState, acting: &user::Model, question_id: i32, text: &str) -> i32 {
    AnswerService::create(
        state,
        acting,
        CreateAnswerRequest {
            text: text.to_string(),
            question_id,
        },
    )
    .await
    .unwrap()
    .answer_id
}
