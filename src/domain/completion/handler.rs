use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CompleteSurveyRequest, CompletionCountResponse, CompletionReceipt, SurveyStatistics,
};
use super::service::CompletionService;
use super::validation::Submission;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 설문 응답 제출
///
/// 모든 선택지를 검증한 뒤 응답 기록과 선택 내역을 한 번에 저장합니다.
/// 검증에 실패하면 아무것도 저장되지 않습니다.
#[utoipa::path(
    post,
    path = "/complete",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CompleteSurveyRequest,
    responses(
        (status = 201, description = "저장 성공", body = SuccessCompletionResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 403, description = "질문/설문 불일치 또는 선택지 초과 (COMPLETE4031~4033)", body = ErrorResponse),
        (status = 404, description = "선택지 또는 설문 없음 (COMPLETE4041, SURVEY4041)", body = ErrorResponse),
        (status = 500, description = "저장 실패 (DB5001)", body = ErrorResponse)
    ),
    tag = "Completion"
)]
pub async fn complete_survey(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CompleteSurveyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BaseResponse<CompletionReceipt>>), AppError> {
    let Json(req) = payload?;

    let result = CompletionService::complete(&state, &user.user, Submission::from(req)).await?;

    Ok((StatusCode::CREATED, Json(BaseResponse::created(result))))
}

/// 설문 응답 수 조회
#[utoipa::path(
    get,
    path = "/complete/solves/{survey_id}",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("survey_id" = i32, Path, description = "설문 ID")
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessCompletionCountResponse),
        (status = 404, description = "설문 없음", body = ErrorResponse)
    ),
    tag = "Completion"
)]
pub async fn count_completions(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(survey_id): Path<i32>,
) -> Result<Json<BaseResponse<CompletionCountResponse>>, AppError> {
    let result = CompletionService::count_completions(&state, survey_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 설문 통계 조회
#[utoipa::path(
    get,
    path = "/complete/stat/{survey_id}",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("survey_id" = i32, Path, description = "설문 ID")
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessStatisticsResponse),
        (status = 404, description = "설문 없음", body = ErrorResponse)
    ),
    tag = "Completion"
)]
pub async fn survey_statistics(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(survey_id): Path<i32>,
) -> Result<Json<BaseResponse<SurveyStatistics>>, AppError> {
    let result = CompletionService::survey_statistics(&state, survey_id).await?;

    Ok(Json(BaseResponse::success(result)))
}
