use axum::{
    async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::header::COOKIE,
    http::request::Parts,
};

use crate::domain::auth::service::AuthService;
use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::cookie::ACCESS_TOKEN_COOKIE;
use crate::utils::error::AppError;
use crate::utils::jwt::Claims;

/// 인증된 사용자 정보를 담는 Extractor
///
/// 토큰 검증 후 토큰의 주체(닉네임)를 DB에서 다시 조회한 결과를 함께 보관합니다.
pub struct AuthUser {
    pub claims: Claims,
    pub user: user::Model,
}

impl AuthUser {
    pub fn user_id(&self) -> i32 {
        self.user.user_id
    }
}

/// 관리자 권한이 확인된 사용자 Extractor
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?;
        let (claims, user) = AuthService::resolve_principal(state, &token).await?;

        Ok(AuthUser { claims, user })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?;
        let (claims, user) = AuthService::require_admin(state, &token).await?;

        Ok(AdminUser(AuthUser { claims, user }))
    }
}

/// 요청에서 토큰 추출
///
/// Authorization 헤더(Bearer)를 우선하고, 없으면 access_token 쿠키를 사용합니다.
fn extract_token(parts: &Parts) -> Result<String, AppError> {
    if let Some(auth_header) = parts.headers.get(AUTHORIZATION) {
        let auth_header_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("잘못된 헤더 형식입니다.".to_string()))?;

        return match auth_header_str.strip_prefix("Bearer ") {
            Some(token) if !token.is_empty() => Ok(token.to_string()),
            _ => Err(AppError::Unauthorized(
                "토큰 형식이 올바르지 않습니다.".to_string(),
            )),
        };
    }

    extract_token_from_cookie(parts)
}

/// 쿠키에서 access_token 추출
fn extract_token_from_cookie(parts: &Parts) -> Result<String, AppError> {
    let cookie_header = parts
        .headers
        .get(COOKIE)
        .ok_or_else(|| AppError::Unauthorized("로그인이 필요합니다.".to_string()))?;

    let cookie_str = cookie_header
        .to_str()
        .map_err(|_| AppError::Unauthorized("잘못된 쿠키 형식입니다.".to_string()))?;

    // 쿠키 파싱: "name1=value1; name2=value2" 형식
    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some(value) = cookie.strip_prefix(&format!("{}=", ACCESS_TOKEN_COOKIE)) {
            if !value.is_empty() {
                return Ok(value.to_string());
            }
        }
    }

    Err(AppError::Unauthorized("로그인이 필요합니다.".to_string()))
}
