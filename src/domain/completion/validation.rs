//! 설문 응답 검증
//!
//! 저장 전에 제출 내용 전체를 현재 설문 구조와 대조합니다. 선택지마다 다음 순서로
//! 확인하며 처음 실패한 항목을 돌려줍니다.
//!
//! 1. 선택지가 존재하는가 (`AnswerNotFound`)
//! 2. 선택지가 제출된 질문에 속하는가 (`QuestionMismatch`)
//! 3. 단일 선택 질문에 선택지가 하나 이하인가 (`TooManyAnswers`)
//! 4. 질문이 제출된 설문에 속하는가 (`SurveyMismatch`)
//!
//! 모든 선택지가 통과한 뒤 설문 자체의 존재를 확인합니다 (`SurveyNotFound`).

use std::collections::HashMap;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use tracing::warn;

use super::dto::CompleteSurveyRequest;
use crate::domain::survey::entity::{answer, question, survey};
use crate::utils::error::AppError;

/// 질문 하나에 대한 선택
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSelection {
    pub question_id: i32,
    pub answer_ids: Vec<i32>,
}

/// 제출된 설문 응답
#[derive(Debug, Clone)]
pub struct Submission {
    pub survey_id: i32,
    pub questions: Vec<QuestionSelection>,
}

impl From<CompleteSurveyRequest> for Submission {
    fn from(req: CompleteSurveyRequest) -> Self {
        let questions = req
            .questions
            .into_iter()
            .map(|q| QuestionSelection {
                question_id: q.id,
                answer_ids: q.answers.into_iter().map(|a| a.id).collect(),
            })
            .collect();

        Self {
            survey_id: req.survey_id,
            questions,
        }
    }
}

/// 검증을 통과한 응답 (저장 가능한 형태)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCompletion {
    pub survey_id: i32,
    pub answer_ids: Vec<i32>,
}

/// 같은 질문 ID의 선택을 하나로 합치고, 질문 안의 중복 선택지를 제거합니다.
///
/// 질문과 선택지는 처음 등장한 순서를 유지합니다.
pub fn merge_selections(selections: Vec<QuestionSelection>) -> Vec<QuestionSelection> {
    let mut merged: Vec<QuestionSelection> = Vec::with_capacity(selections.len());
    let mut position: HashMap<i32, usize> = HashMap::new();

    for selection in selections {
        let index = *position.entry(selection.question_id).or_insert_with(|| {
            merged.push(QuestionSelection {
                question_id: selection.question_id,
                answer_ids: Vec::new(),
            });
            merged.len() - 1
        });

        let target = &mut merged[index].answer_ids;
        for answer_id in selection.answer_ids {
            if !target.contains(&answer_id) {
                target.push(answer_id);
            }
        }
    }

    merged
}

/// 제출 내용을 현재 설문 구조와 대조합니다.
///
/// 트랜잭션 안에서 호출하면 이후 저장 단계와 같은 스냅샷을 봅니다.
pub async fn validate_submission<C: ConnectionTrait>(
    db: &C,
    submission: &Submission,
) -> Result<ValidatedCompletion, AppError> {
    let selections = merge_selections(submission.questions.clone());

    let all_answer_ids: Vec<i32> = selections
        .iter()
        .flat_map(|s| s.answer_ids.iter().copied())
        .collect();

    let answers: HashMap<i32, answer::Model> = if all_answer_ids.is_empty() {
        HashMap::new()
    } else {
        answer::Entity::find()
            .filter(answer::Column::AnswerId.is_in(all_answer_ids.clone()))
            .all(db)
            .await
            .map_err(AppError::db)?
            .into_iter()
            .map(|a| (a.answer_id, a))
            .collect()
    };

    let question_ids: Vec<i32> = answers.values().map(|a| a.question_id).collect();
    let questions: HashMap<i32, question::Model> = if question_ids.is_empty() {
        HashMap::new()
    } else {
        question::Entity::find()
            .filter(question::Column::QuestionId.is_in(question_ids))
            .all(db)
            .await
            .map_err(AppError::db)?
            .into_iter()
            .map(|q| (q.question_id, q))
            .collect()
    };

    for selection in &selections {
        for answer_id in &selection.answer_ids {
            let owning_question = answers
                .get(answer_id)
                .and_then(|a| questions.get(&a.question_id))
                .ok_or_else(|| {
                    reject(AppError::AnswerNotFound(format!(
                        "선택지 {}을(를) 찾을 수 없습니다.",
                        answer_id
                    )))
                })?;

            if owning_question.question_id != selection.question_id {
                return Err(reject(AppError::QuestionMismatch(format!(
                    "선택지 {}은(는) 질문 {}에 속하지 않습니다.",
                    answer_id, selection.question_id
                ))));
            }

            if !owning_question.multiple_answers && selection.answer_ids.len() > 1 {
                return Err(reject(AppError::TooManyAnswers(format!(
                    "질문 {}은(는) 하나의 선택지만 고를 수 있습니다.",
                    selection.question_id
                ))));
            }

            if owning_question.survey_id != submission.survey_id {
                return Err(reject(AppError::SurveyMismatch(format!(
                    "질문 {}은(는) 설문 {}에 속하지 않습니다.",
                    selection.question_id, submission.survey_id
                ))));
            }
        }
    }

    let survey_exists = survey::Entity::find_by_id(submission.survey_id)
        .one(db)
        .await
        .map_err(AppError::db)?
        .is_some();
    if !survey_exists {
        return Err(reject(AppError::SurveyNotFound(format!(
            "설문 {}을(를) 찾을 수 없습니다.",
            submission.survey_id
        ))));
    }

    Ok(ValidatedCompletion {
        survey_id: submission.survey_id,
        answer_ids: all_answer_ids,
    })
}

fn reject(err: AppError) -> AppError {
    warn!(code = %err.error_code(), "completion rejected: {}", err.message());
    err
}
