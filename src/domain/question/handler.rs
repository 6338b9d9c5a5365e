use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::dto::{CreateQuestionRequest, QuestionResponse, UpdateQuestionRequest};
use super::service::QuestionService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 질문 생성 (설문 작성자 또는 관리자)
#[utoipa::path(
    post,
    path = "/questions",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreateQuestionRequest,
    responses(
        (status = 201, description = "생성 성공", body = SuccessQuestionResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "설문이 존재하지 않음 (CATALOG4041)", body = ErrorResponse)
    ),
    tag = "Question"
)]
pub async fn create_question(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BaseResponse<QuestionResponse>>), AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = QuestionService::create(&state, &user.user, req).await?;

    Ok((StatusCode::CREATED, Json(BaseResponse::created(result))))
}

/// 질문 조회
#[utoipa::path(
    get,
    path = "/questions/{question_id}",
    params(
        ("question_id" = i32, Path, description = "질문 ID")
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessQuestionResponse),
        (status = 404, description = "존재하지 않는 질문", body = ErrorResponse)
    ),
    tag = "Question"
)]
pub async fn get_question(
    State(state): State<AppState>,
    Path(question_id): Path<i32>,
) -> Result<Json<BaseResponse<QuestionResponse>>, AppError> {
    let result = QuestionService::get(&state, question_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 설문별 질문 목록
#[utoipa::path(
    get,
    path = "/questions/bysurvey/{survey_id}",
    params(
        ("survey_id" = i32, Path, description = "설문 ID")
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessQuestionListResponse)
    ),
    tag = "Question"
)]
pub async fn list_questions_by_survey(
    State(state): State<AppState>,
    Path(survey_id): Path<i32>,
) -> Result<Json<BaseResponse<Vec<QuestionResponse>>>, AppError> {
    let result = QuestionService::list_by_survey(&state, survey_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 질문 수정 (설문 작성자 또는 관리자)
#[utoipa::path(
    put,
    path = "/questions/{question_id}",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("question_id" = i32, Path, description = "질문 ID")
    ),
    request_body = UpdateQuestionRequest,
    responses(
        (status = 200, description = "수정 성공", body = SuccessQuestionResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 질문", body = ErrorResponse)
    ),
    tag = "Question"
)]
pub async fn update_question(
    State(state): State<AppState>,
    user: AuthUser,
    Path(question_id): Path<i32>,
    payload: Result<Json<UpdateQuestionRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<QuestionResponse>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = QuestionService::update(&state, &user.user, question_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 질문 삭제 (설문 작성자 또는 관리자)
#[utoipa::path(
    delete,
    path = "/questions/{question_id}",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("question_id" = i32, Path, description = "질문 ID")
    ),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 질문", body = ErrorResponse)
    ),
    tag = "Question"
)]
pub async fn delete_question(
    State(state): State<AppState>,
    user: AuthUser,
    Path(question_id): Path<i32>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    QuestionService::delete(&state, &user.user, question_id).await?;

    Ok(Json(BaseResponse::ok_with_message("질문이 삭제되었습니다.")))
}
