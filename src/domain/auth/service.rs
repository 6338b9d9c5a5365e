use chrono::Utc;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use tracing::{info, warn};

use super::dto::{TokenRequest, TokenResponse};
use crate::domain::user::entity::user::{self, Role};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::jwt::{decode_token, issue_token, Claims};
use crate::utils::password::verify_password;

pub struct AuthService;

impl AuthService {
    /// 닉네임과 비밀번호로 사용자 확인
    pub async fn verify_credentials<C: ConnectionTrait>(
        db: &C,
        nickname: &str,
        password: &str,
    ) -> Result<user::Model, AppError> {
        let candidate = user::Entity::find()
            .filter(user::Column::Nickname.eq(nickname))
            .one(db)
            .await
            .map_err(AppError::db)?;

        candidate
            .filter(|u| verify_password(password, &u.hashed_password))
            .ok_or_else(|| {
                warn!(nickname, "credential verification failed");
                AppError::NotFound("닉네임 또는 비밀번호가 올바르지 않습니다.".to_string())
            })
    }

    /// 로그인: 자격 증명 확인 후 Access Token 발급
    pub async fn login(state: &AppState, req: TokenRequest) -> Result<TokenResponse, AppError> {
        let user = Self::verify_credentials(&state.db, &req.nickname, &req.password).await?;

        let access_token = issue_token(
            user.user_id,
            user.role.as_claim(),
            Utc::now(),
            &state.config.jwt_secret,
            state.config.jwt_expiration,
        )?;

        info!(user_id = user.user_id, "access token issued");

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: state.config.jwt_expiration,
        })
    }

    /// 토큰으로 요청 주체 확인
    ///
    /// 토큰이 유효하더라도 주체(사용자 ID)에 해당하는 사용자가 없으면 Unauthorized입니다.
    pub async fn resolve_principal(
        state: &AppState,
        token: &str,
    ) -> Result<(Claims, user::Model), AppError> {
        let claims = decode_token(token, &state.config.jwt_secret)?;
        let user_id = claims.user_id()?;

        let principal = user::Entity::find_by_id(user_id)
            .one(&state.db)
            .await
            .map_err(AppError::db)?
            .ok_or_else(|| AppError::Unauthorized("인증 정보가 유효하지 않습니다.".to_string()))?;

        Ok((claims, principal))
    }

    /// 관리자 권한 확인
    ///
    /// 토큰의 role claim과 저장된 역할이 모두 관리자여야 합니다.
    pub async fn require_admin(
        state: &AppState,
        token: &str,
    ) -> Result<(Claims, user::Model), AppError> {
        let (claims, principal) = Self::resolve_principal(state, token).await?;

        if !claims.is_admin() || principal.role != Role::Admin {
            warn!(user_id = principal.user_id, "admin access rejected");
            return Err(AppError::Forbidden("관리자 권한이 필요합니다.".to_string()));
        }

        Ok((claims, principal))
    }
}
