use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::survey;

/// 설문 생성 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSurveyRequest {
    #[validate(length(min = 1, max = 200, message = "설문 이름은 1~200자여야 합니다"))]
    pub name: String,
    #[validate(length(max = 2000, message = "설명은 2000자 이하여야 합니다"))]
    pub description: Option<String>,
}

/// 설문 수정 요청 DTO (전달된 필드만 변경)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSurveyRequest {
    #[validate(length(min = 1, max = 200, message = "설문 이름은 1~200자여야 합니다"))]
    pub name: Option<String>,
    #[validate(length(max = 2000, message = "설명은 2000자 이하여야 합니다"))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    pub survey_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: i32,
}

impl From<survey::Model> for SurveyResponse {
    fn from(model: survey::Model) -> Self {
        Self {
            survey_id: model.survey_id,
            name: model.name,
            description: model.description,
            creator_id: model.creator_id,
        }
    }
}

/// 설문 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessSurveyResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: SurveyResponse,
}

/// 설문 목록 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessSurveyListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<SurveyResponse>,
}
