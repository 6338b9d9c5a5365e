use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::dto::{CreateSurveyRequest, SurveyResponse, UpdateSurveyRequest};
use super::service::SurveyService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 설문 생성
#[utoipa::path(
    post,
    path = "/surveys",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreateSurveyRequest,
    responses(
        (status = 201, description = "생성 성공", body = SuccessSurveyResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Survey"
)]
pub async fn create_survey(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CreateSurveyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BaseResponse<SurveyResponse>>), AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = SurveyService::create(&state, &user.user, req).await?;

    Ok((StatusCode::CREATED, Json(BaseResponse::created(result))))
}

/// 전체 설문 목록
#[utoipa::path(
    get,
    path = "/surveys",
    responses(
        (status = 200, description = "조회 성공", body = SuccessSurveyListResponse)
    ),
    tag = "Survey"
)]
pub async fn list_surveys(
    State(state): State<AppState>,
) -> Result<Json<BaseResponse<Vec<SurveyResponse>>>, AppError> {
    let result = SurveyService::list(&state).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 설문 조회
#[utoipa::path(
    get,
    path = "/surveys/{survey_id}",
    params(
        ("survey_id" = i32, Path, description = "설문 ID")
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessSurveyResponse),
        (status = 404, description = "존재하지 않는 설문", body = ErrorResponse)
    ),
    tag = "Survey"
)]
pub async fn get_survey(
    State(state): State<AppState>,
    Path(survey_id): Path<i32>,
) -> Result<Json<BaseResponse<SurveyResponse>>, AppError> {
    let result = SurveyService::get(&state, survey_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 작성자별 설문 목록
#[utoipa::path(
    get,
    path = "/surveys/bycreator/{user_id}",
    params(
        ("user_id" = i32, Path, description = "작성자 회원 ID")
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessSurveyListResponse)
    ),
    tag = "Survey"
)]
pub async fn list_surveys_by_creator(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<BaseResponse<Vec<SurveyResponse>>>, AppError> {
    let result = SurveyService::list_by_creator(&state, user_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 설문 수정 (작성자 또는 관리자)
#[utoipa::path(
    put,
    path = "/surveys/{survey_id}",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("survey_id" = i32, Path, description = "설문 ID")
    ),
    request_body = UpdateSurveyRequest,
    responses(
        (status = 200, description = "수정 성공", body = SuccessSurveyResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 설문", body = ErrorResponse)
    ),
    tag = "Survey"
)]
pub async fn update_survey(
    State(state): State<AppState>,
    user: AuthUser,
    Path(survey_id): Path<i32>,
    payload: Result<Json<UpdateSurveyRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<SurveyResponse>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = SurveyService::update(&state, &user.user, survey_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 설문 삭제 (작성자 또는 관리자)
#[utoipa::path(
    delete,
    path = "/surveys/{survey_id}",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("survey_id" = i32, Path, description = "설문 ID")
    ),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 설문", body = ErrorResponse)
    ),
    tag = "Survey"
)]
pub async fn delete_survey(
    State(state): State<AppState>,
    user: AuthUser,
    Path(survey_id): Path<i32>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    SurveyService::delete(&state, &user.user, survey_id).await?;

    Ok(Json(BaseResponse::ok_with_message("설문이 삭제되었습니다.")))
}
