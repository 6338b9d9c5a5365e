use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::dto::UserResponse;

/// 토큰 발급 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    #[validate(length(min = 1, message = "nickname은 필수입니다"))]
    pub nickname: String,
    #[validate(length(min = 1, message = "password는 필수입니다"))]
    pub password: String,
}

/// 토큰 발급 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    /// 항상 "bearer"
    pub token_type: String,
    /// 만료까지 남은 시간 (초)
    pub expires_in: i64,
}

/// 토큰 발급 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessTokenResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: TokenResponse,
}

/// 현재 사용자 조회 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessMeResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: UserResponse,
}
