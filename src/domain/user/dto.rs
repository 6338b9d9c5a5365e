use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::user::{self, Role};
use crate::global::validator::validate_nickname;

/// 회원가입 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(
        length(min = 1, max = 50, message = "닉네임은 1~50자여야 합니다"),
        custom(function = "validate_nickname")
    )]
    pub nickname: String,
    #[validate(email(message = "이메일 형식이 올바르지 않습니다"))]
    pub email: String,
    #[validate(length(min = 4, max = 128, message = "비밀번호는 4~128자여야 합니다"))]
    pub password: String,
}

/// 회원 정보 수정 요청 DTO (전달된 필드만 변경)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(
        length(min = 1, max = 50, message = "닉네임은 1~50자여야 합니다"),
        custom(function = "validate_nickname")
    )]
    pub nickname: Option<String>,
    #[validate(email(message = "이메일 형식이 올바르지 않습니다"))]
    pub email: Option<String>,
    #[validate(length(min = 4, max = 128, message = "비밀번호는 4~128자여야 합니다"))]
    pub password: Option<String>,
}

/// 역할 변경 요청 DTO
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    pub role: Role,
}

/// 회원 정보 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: i32,
    pub nickname: String,
    pub email: String,
    pub role: Role,
    pub registration_date: NaiveDateTime,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            user_id: model.user_id,
            nickname: model.nickname,
            email: model.email,
            role: model.role,
            registration_date: model.registration_date,
        }
    }
}

/// 회원 정보 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessUserResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: UserResponse,
}

/// 회원 목록 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessUserListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<UserResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_validate_register_request() {
        let req = RegisterRequest {
            nickname: "meow".to_string(),
            email: "meow@example.com".to_string(),
            password: "secret".to_string(),
        };

        assert!(req.validate().is_ok());
    }

    #[test]
    fn should_reject_invalid_email_and_nickname() {
        let req = RegisterRequest {
            nickname: "<b>meow</b>".to_string(),
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("nickname"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn should_allow_empty_update() {
        let req: UpdateUserRequest = serde_json::from_str("{}").unwrap();

        assert!(req.validate().is_ok());
        assert!(req.nickname.is_none());
    }

    #[test]
    fn should_parse_role_in_upper_case() {
        let req: UpdateRoleRequest = serde_json::from_str(r#"{"role":"ADMIN"}"#).unwrap();

        assert_eq!(req.role, Role::Admin);
    }
}
