use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 설문 응답 제출 요청 DTO
///
/// ```json
/// { "surveyId": 1, "questions": [ { "id": 1, "answers": [ { "id": 2 } ] } ] }
/// ```
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSurveyRequest {
    #[serde(alias = "id")]
    pub survey_id: i32,
    #[serde(default)]
    pub questions: Vec<QuestionSelectionRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuestionSelectionRequest {
    /// 질문 ID
    pub id: i32,
    #[serde(default)]
    pub answers: Vec<AnswerSelectionRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnswerSelectionRequest {
    /// 선택지 ID
    pub id: i32,
}

/// 응답 저장 결과
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionReceipt {
    pub completed_survey_id: i32,
    pub survey_id: i32,
    /// 저장된 선택지 수
    pub answer_count: usize,
}

/// 설문 응답 수
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionCountResponse {
    pub survey_id: i32,
    pub count: u64,
}

/// 설문 통계
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveyStatistics {
    pub survey_id: i32,
    pub total_completions: u64,
    pub questions: Vec<QuestionStatistics>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStatistics {
    pub question_id: i32,
    pub text: String,
    pub multiple_answers: bool,
    pub answers: Vec<AnswerStatistics>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerStatistics {
    pub answer_id: i32,
    pub text: String,
    /// 이 선택지를 고른 응답 수
    pub count: u64,
    /// 전체 응답 대비 비율 (소수 둘째 자리 반올림)
    pub percentage: f64,
}

/// 응답 제출 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessCompletionResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: CompletionReceipt,
}

/// 응답 수 조회 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessCompletionCountResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: CompletionCountResponse,
}

/// 통계 조회 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessStatisticsResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: SurveyStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_nested_submission() {
        let json = r#"{"surveyId":1,"questions":[{"id":1,"answers":[{"id":2},{"id":3}]}]}"#;

        let req: CompleteSurveyRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.survey_id, 1);
        assert_eq!(req.questions.len(), 1);
        assert_eq!(req.questions[0].answers.len(), 2);
    }

    #[test]
    fn should_accept_id_as_survey_id_alias() {
        let req: CompleteSurveyRequest =
            serde_json::from_str(r#"{"id":7,"questions":[]}"#).unwrap();

        assert_eq!(req.survey_id, 7);
    }

    #[test]
    fn should_treat_missing_answers_as_empty() {
        let req: CompleteSurveyRequest =
            serde_json::from_str(r#"{"surveyId":1,"questions":[{"id":4}]}"#).unwrap();

        assert!(req.questions[0].answers.is_empty());
    }
}
