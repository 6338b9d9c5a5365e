use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::survey::entity::question;

/// 질문 생성 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000, message = "질문 내용은 1~1000자여야 합니다"))]
    pub text: String,
    /// 복수 선택 허용 여부 (기본값 false)
    #[serde(default)]
    pub multiple_answers: bool,
    pub survey_id: i32,
}

/// 질문 수정 요청 DTO (전달된 필드만 변경)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = 1000, message = "질문 내용은 1~1000자여야 합니다"))]
    pub text: Option<String>,
    pub multiple_answers: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub question_id: i32,
    pub text: String,
    pub multiple_answers: bool,
    pub survey_id: i32,
}

impl From<question::Model> for QuestionResponse {
    fn from(model: question::Model) -> Self {
        Self {
            question_id: model.question_id,
            text: model.text,
            multiple_answers: model.multiple_answers,
            survey_id: model.survey_id,
        }
    }
}

/// 질문 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessQuestionResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: QuestionResponse,
}

/// 질문 목록 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessQuestionListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<QuestionResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_multiple_answers_to_false() {
        let req: CreateQuestionRequest =
            serde_json::from_str(r#"{"text":"좋아하는 색은?","surveyId":1}"#).unwrap();

        assert!(!req.multiple_answers);
        assert_eq!(req.survey_id, 1);
    }

    #[test]
    fn should_reject_empty_question_text() {
        let req = CreateQuestionRequest {
            text: String::new(),
            multiple_answers: false,
            survey_id: 1,
        };

        assert!(req.validate().is_err());
    }
}
