use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::dto::{AnswerResponse, CreateAnswerRequest, UpdateAnswerRequest};
use super::service::AnswerService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 선택지 생성 (설문 작성자 또는 관리자)
#[utoipa::path(
    post,
    path = "/answers",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreateAnswerRequest,
    responses(
        (status = 201, description = "생성 성공", body = SuccessAnswerResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "질문이 존재하지 않음 (CATALOG4041)", body = ErrorResponse)
    ),
    tag = "Answer"
)]
pub async fn create_answer(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CreateAnswerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BaseResponse<AnswerResponse>>), AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = AnswerService::create(&state, &user.user, req).await?;

    Ok((StatusCode::CREATED, Json(BaseResponse::created(result))))
}

/// 선택지 조회
#[utoipa::path(
    get,
    path = "/answers/{answer_id}",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("answer_id" = i32, Path, description = "선택지 ID")
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessAnswerResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 선택지", body = ErrorResponse)
    ),
    tag = "Answer"
)]
pub async fn get_answer(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(answer_id): Path<i32>,
) -> Result<Json<BaseResponse<AnswerResponse>>, AppError> {
    let result = AnswerService::get(&state, answer_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 질문별 선택지 목록
#[utoipa::path(
    get,
    path = "/answers/byquestion/{question_id}",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("question_id" = i32, Path, description = "질문 ID")
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessAnswerListResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Answer"
)]
pub async fn list_answers_by_question(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(question_id): Path<i32>,
) -> Result<Json<BaseResponse<Vec<AnswerResponse>>>, AppError> {
    let result = AnswerService::list_by_question(&state, question_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 선택지 수정 (설문 작성자 또는 관리자)
#[utoipa::path(
    put,
    path = "/answers/{answer_id}",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("answer_id" = i32, Path, description = "선택지 ID")
    ),
    request_body = UpdateAnswerRequest,
    responses(
        (status = 200, description = "수정 성공", body = SuccessAnswerResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 선택지", body = ErrorResponse)
    ),
    tag = "Answer"
)]
pub async fn update_answer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(answer_id): Path<i32>,
    payload: Result<Json<UpdateAnswerRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<AnswerResponse>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = AnswerService::update(&state, &user.user, answer_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 선택지 삭제 (설문 작성자 또는 관리자)
#[utoipa::path(
    delete,
    path = "/answers/{answer_id}",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("answer_id" = i32, Path, description = "선택지 ID")
    ),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 선택지", body = ErrorResponse)
    ),
    tag = "Answer"
)]
pub async fn delete_answer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(answer_id): Path<i32>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    AnswerService::delete(&state, &user.user, answer_id).await?;

    Ok(Json(BaseResponse::ok_with_message("선택지가 삭제되었습니다.")))
}
