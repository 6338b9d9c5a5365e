use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::survey::entity::answer;

/// 선택지 생성 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnswerRequest {
    #[validate(length(min = 1, max = 500, message = "선택지 내용은 1~500자여야 합니다"))]
    pub text: String,
    pub question_id: i32,
}

/// 선택지 수정 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnswerRequest {
    #[validate(length(min = 1, max = 500, message = "선택지 내용은 1~500자여야 합니다"))]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    pub answer_id: i32,
    pub text: String,
    pub question_id: i32,
}

impl From<answer::Model> for AnswerResponse {
    fn from(model: answer::Model) -> Self {
        Self {
            answer_id: model.answer_id,
            text: model.text,
            question_id: model.question_id,
        }
    }
}

/// 선택지 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessAnswerResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: AnswerResponse,
}

/// 선택지 목록 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessAnswerListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<AnswerResponse>,
}
