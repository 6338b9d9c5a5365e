pub mod config;
pub mod domain;
pub mod global;
pub mod state;
pub mod utils;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::{answer, auth, completion, health, question, survey, user};
use crate::global::middleware::request_id_middleware;
pub use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::handler::health_check,
        auth::handler::login,
        auth::handler::me,
        user::handler::register,
        user::handler::list_users,
        user::handler::get_user,
        user::handler::update_user,
        user::handler::delete_user,
        user::handler::update_role,
        survey::handler::create_survey,
        survey::handler::list_surveys,
        survey::handler::get_survey,
        survey::handler::list_surveys_by_creator,
        survey::handler::update_survey,
        survey::handler::delete_survey,
        question::handler::create_question,
        question::handler::get_question,
        question::handler::list_questions_by_survey,
        question::handler::update_question,
        question::handler::delete_question,
        answer::handler::create_answer,
        answer::handler::get_answer,
        answer::handler::list_answers_by_question,
        answer::handler::update_answer,
        answer::handler::delete_answer,
        completion::handler::complete_survey,
        completion::handler::count_completions,
        completion::handler::survey_statistics,
    ),
    components(
        schemas(
            health::dto::HealthStatus,
            health::dto::HealthState,
            health::dto::DatabaseHealth,
            auth::dto::TokenRequest,
            auth::dto::TokenResponse,
            auth::dto::SuccessTokenResponse,
            auth::dto::SuccessMeResponse,
            user::entity::user::Role,
            user::dto::RegisterRequest,
            user::dto::UpdateUserRequest,
            user::dto::UpdateRoleRequest,
            user::dto::UserResponse,
            user::dto::SuccessUserResponse,
            user::dto::SuccessUserListResponse,
            survey::dto::CreateSurveyRequest,
            survey::dto::UpdateSurveyRequest,
            survey::dto::SurveyResponse,
            survey::dto::SuccessSurveyResponse,
            survey::dto::SuccessSurveyListResponse,
            question::dto::CreateQuestionRequest,
            question::dto::UpdateQuestionRequest,
            question::dto::QuestionResponse,
            question::dto::SuccessQuestionResponse,
            question::dto::SuccessQuestionListResponse,
            answer::dto::CreateAnswerRequest,
            answer::dto::UpdateAnswerRequest,
            answer::dto::AnswerResponse,
            answer::dto::SuccessAnswerResponse,
            answer::dto::SuccessAnswerListResponse,
            completion::dto::CompleteSurveyRequest,
            completion::dto::QuestionSelectionRequest,
            completion::dto::AnswerSelectionRequest,
            completion::dto::CompletionReceipt,
            completion::dto::CompletionCountResponse,
            completion::dto::SurveyStatistics,
            completion::dto::QuestionStatistics,
            completion::dto::AnswerStatistics,
            completion::dto::SuccessCompletionResponse,
            completion::dto::SuccessCompletionCountResponse,
            completion::dto::SuccessStatisticsResponse,
            utils::response::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "서버 상태"),
        (name = "Auth", description = "로그인 및 토큰"),
        (name = "User", description = "회원 관리"),
        (name = "Survey", description = "설문 관리"),
        (name = "Question", description = "질문 관리"),
        (name = "Answer", description = "선택지 관리"),
        (name = "Completion", description = "설문 응답 및 통계")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        .route("/auth/token", post(auth::handler::login))
        .route("/auth/me", get(auth::handler::me))
        .route(
            "/users",
            post(user::handler::register).get(user::handler::list_users),
        )
        .route(
            "/users/:user_id",
            get(user::handler::get_user)
                .put(user::handler::update_user)
                .delete(user::handler::delete_user),
        )
        .route("/users/:user_id/role", put(user::handler::update_role))
        .route(
            "/surveys",
            post(survey::handler::create_survey).get(survey::handler::list_surveys),
        )
        .route(
            "/surveys/:survey_id",
            get(survey::handler::get_survey)
                .put(survey::handler::update_survey)
                .delete(survey::handler::delete_survey),
        )
        .route(
            "/surveys/bycreator/:user_id",
            get(survey::handler::list_surveys_by_creator),
        )
        .route("/questions", post(question::handler::create_question))
        .route(
            "/questions/:question_id",
            get(question::handler::get_question)
                .put(question::handler::update_question)
                .delete(question::handler::delete_question),
        )
        .route(
            "/questions/bysurvey/:survey_id",
            get(question::handler::list_questions_by_survey),
        )
        .route("/answers", post(answer::handler::create_answer))
        .route(
            "/answers/:answer_id",
            get(answer::handler::get_answer)
                .put(answer::handler::update_answer)
                .delete(answer::handler::delete_answer),
        )
        .route(
            "/answers/byquestion/:question_id",
            get(answer::handler::list_answers_by_question),
        )
        .route("/complete", post(completion::handler::complete_survey))
        .route(
            "/complete/solves/:survey_id",
            get(completion::handler::count_completions),
        )
        .route(
            "/complete/stat/:survey_id",
            get(completion::handler::survey_statistics),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
