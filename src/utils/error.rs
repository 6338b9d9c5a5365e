use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use tracing::{error, warn};
use validator::ValidationErrors;

use super::response::ErrorResponse;

/// 애플리케이션 전역 에러 타입
///
/// 각 variant는 고유한 에러 코드를 가지므로, 호출자는 메시지 문자열을
/// 해석하지 않고도 실패 종류를 구분할 수 있습니다.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    /// 토큰 누락/위조/만료 또는 토큰의 주체가 존재하지 않는 경우
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    /// 생성 시 부모 엔티티가 존재하지 않는 경우
    ReferentialIntegrity(String),
    InternalError(String),
    ValidationError(String),
    JsonParseFailed(String),

    // 설문 응답 검증 실패
    AnswerNotFound(String),
    QuestionMismatch(String),
    TooManyAnswers(String),
    SurveyMismatch(String),
    SurveyNotFound(String),

    /// 쓰기 단계에서 발생한 저장소 오류 (롤백 후 전달됨)
    Persistence(String),
}

impl AppError {
    /// 에러 메시지 반환
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::Conflict(msg)
            | AppError::ReferentialIntegrity(msg)
            | AppError::InternalError(msg)
            | AppError::ValidationError(msg)
            | AppError::AnswerNotFound(msg)
            | AppError::QuestionMismatch(msg)
            | AppError::TooManyAnswers(msg)
            | AppError::SurveyMismatch(msg)
            | AppError::SurveyNotFound(msg)
            | AppError::Persistence(msg) => msg.clone(),
            AppError::JsonParseFailed(msg) => format!("잘못된 요청 형식입니다: {}", msg),
        }
    }

    /// 에러 코드 반환
    pub fn error_code(&self) -> String {
        match self {
            AppError::NotFound(_) => "COMMON404",
            AppError::Unauthorized(_) => "AUTH4001",
            AppError::Forbidden(_) => "COMMON403",
            AppError::Conflict(_) => "COMMON409",
            AppError::ReferentialIntegrity(_) => "CATALOG4041",
            AppError::InternalError(_) => "COMMON500",
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::AnswerNotFound(_) => "COMPLETE4041",
            AppError::QuestionMismatch(_) => "COMPLETE4031",
            AppError::TooManyAnswers(_) => "COMPLETE4032",
            AppError::SurveyMismatch(_) => "COMPLETE4033",
            AppError::SurveyNotFound(_) => "SURVEY4041",
            AppError::Persistence(_) => "DB5001",
        }
        .to_string()
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ReferentialIntegrity(_) => StatusCode::NOT_FOUND,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::JsonParseFailed(_) => StatusCode::BAD_REQUEST,
            AppError::AnswerNotFound(_) => StatusCode::NOT_FOUND,
            AppError::QuestionMismatch(_) => StatusCode::FORBIDDEN,
            AppError::TooManyAnswers(_) => StatusCode::FORBIDDEN,
            AppError::SurveyMismatch(_) => StatusCode::FORBIDDEN,
            AppError::SurveyNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.message();

        // 에러 로깅
        match &self {
            AppError::InternalError(_) | AppError::Persistence(_) => {
                error!("Internal Server Error [{}]: {}", error_code, message);
            }
            _ => {
                warn!("Error [{}]: {}", error_code, message);
            }
        }

        let error_response = ErrorResponse::new(error_code, message);

        (status, Json(error_response)).into_response()
    }
}

/// JsonRejection을 AppError로 변환
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.body_text())
    }
}

/// validator 검증 실패를 AppError로 변환
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} 값이 올바르지 않습니다.", field),
                })
            })
            .collect::<Vec<_>>()
            .join(", ");
        AppError::ValidationError(message)
    }
}

/// DB 에러 변환
impl AppError {
    /// 조회 중 발생한 DB 오류
    pub fn db(err: DbErr) -> Self {
        AppError::InternalError(format!("DB Error: {}", err))
    }

    /// 쓰기 중 발생한 DB 오류
    ///
    /// unique 제약 위반은 Conflict, FK 위반은 ReferentialIntegrity로 구분합니다.
    pub fn from_write(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                AppError::Conflict(format!("이미 존재하는 값입니다: {}", detail))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                AppError::ReferentialIntegrity(format!("참조하는 엔티티가 존재하지 않습니다: {}", detail))
            }
            _ => AppError::Persistence(format!("저장에 실패했습니다: {}", err)),
        }
    }
}
