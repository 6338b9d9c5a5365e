use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::SET_COOKIE,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use super::dto::TokenRequest;
use super::service::AuthService;
use crate::domain::user::dto::UserResponse;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::cookie::create_access_token_cookie;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 로그인 (토큰 발급)
///
/// 닉네임과 비밀번호를 확인한 뒤 Access Token을 발급합니다.
/// 응답 본문과 함께 `access_token` 쿠키도 설정됩니다.
#[utoipa::path(
    post,
    path = "/auth/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "로그인 성공", body = SuccessTokenResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 404, description = "일치하는 사용자 없음", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = AuthService::login(&state, req).await?;
    let cookie = create_access_token_cookie(&result.access_token, result.expires_in)?;

    Ok(([(SET_COOKIE, cookie)], Json(BaseResponse::success(result))))
}

/// 현재 로그인한 사용자 조회
#[utoipa::path(
    get,
    path = "/auth/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessMeResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn me(user: AuthUser) -> Json<BaseResponse<UserResponse>> {
    Json(BaseResponse::success(UserResponse::from(user.user)))
}
