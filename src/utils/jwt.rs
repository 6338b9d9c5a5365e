use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::AppError;

/// 관리자 역할 claim 값
pub const ROLE_ADMIN: &str = "admin";
/// 일반 사용자 역할 claim 값
pub const ROLE_USER: &str = "user";

/// JWT Claims 구조체
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (사용자 ID)
    pub sub: String,
    /// 발급 시점의 역할 (admin, user)
    pub role: String,
    /// Issued At
    pub iat: usize,
    /// Expiration
    pub exp: usize,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// subject를 사용자 ID로 해석
    pub fn user_id(&self) -> Result<i32, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::Unauthorized("유효하지 않은 토큰입니다.".into()))
    }
}

/// Access Token 발급
///
/// `now`를 기준으로 `ttl_seconds` 뒤에 만료되는 HS256 토큰을 생성합니다.
/// subject는 변경되지 않는 사용자 ID입니다.
pub fn issue_token(
    user_id: i32,
    role: &str,
    now: DateTime<Utc>,
    secret: &str,
    ttl_seconds: i64,
) -> Result<String, AppError> {
    let expiration = now
        .checked_add_signed(Duration::seconds(ttl_seconds))
        .ok_or_else(|| AppError::InternalError("토큰 만료 시각 계산에 실패했습니다.".into()))?;

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        iat: now.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("Token creation failed: {}", e)))
}

/// JWT 토큰 검증
///
/// 서명과 만료 시간을 확인하며, 실패는 모두 Unauthorized로 보고합니다.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("토큰이 만료되었습니다.".into())
        }
        _ => AppError::Unauthorized("유효하지 않은 토큰입니다.".into()),
    })
}
