use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use sea_orm::sea_query::JoinType;
use tracing::{error, info};

use super::dto::{
    AnswerStatistics, CompletionCountResponse, CompletionReceipt, QuestionStatistics,
    SurveyStatistics,
};
use super::entity::{completed_survey, question_answer};
use super::validation::{validate_submission, Submission, ValidatedCompletion};
use crate::domain::survey::entity::{answer, question};
use crate::domain::survey::service::SurveyService;
use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::error::AppError;

pub struct CompletionService;

impl CompletionService {
    /// 설문 응답 제출
    ///
    /// 검증과 저장이 하나의 트랜잭션에서 실행되며, 어느 단계든 실패하면
    /// 아무것도 남기지 않습니다.
    pub async fn complete(
        state: &AppState,
        acting: &user::Model,
        submission: Submission,
    ) -> Result<CompletionReceipt, AppError> {
        let txn = state.db.begin().await.map_err(AppError::db)?;

        let validated = match validate_submission(&txn, &submission).await {
            Ok(validated) => validated,
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    error!("Failed to roll back rejected completion: {}", rollback_err);
                }
                return Err(err);
            }
        };

        let receipt = Self::write_in(txn, acting.user_id, validated).await?;

        info!(
            completed_survey_id = receipt.completed_survey_id,
            survey_id = receipt.survey_id,
            user_id = acting.user_id,
            answer_count = receipt.answer_count,
            "survey completed"
        );
        Ok(receipt)
    }

    /// 검증된 응답을 주어진 트랜잭션에 기록하고 커밋합니다.
    ///
    /// 삽입 중 하나라도 실패하면 롤백 후 `Persistence`를 반환합니다.
    pub(crate) async fn write_in(
        txn: DatabaseTransaction,
        user_id: i32,
        validated: ValidatedCompletion,
    ) -> Result<CompletionReceipt, AppError> {
        match Self::insert_rows(&txn, user_id, &validated).await {
            Ok(receipt) => {
                txn.commit().await.map_err(|e| {
                    AppError::Persistence(format!("응답 저장에 실패했습니다: {}", e))
                })?;
                Ok(receipt)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    error!("Failed to roll back completion write: {}", rollback_err);
                }
                Err(AppError::Persistence(format!(
                    "응답 저장에 실패했습니다: {}",
                    err
                )))
            }
        }
    }

    async fn insert_rows(
        txn: &DatabaseTransaction,
        user_id: i32,
        validated: &ValidatedCompletion,
    ) -> Result<CompletionReceipt, DbErr> {
        let completed = completed_survey::ActiveModel {
            user_id: Set(user_id),
            survey_id: Set(validated.survey_id),
            completed_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        if !validated.answer_ids.is_empty() {
            let rows = validated
                .answer_ids
                .iter()
                .map(|&answer_id| question_answer::ActiveModel {
                    completed_survey_id: Set(completed.completed_survey_id),
                    answer_id: Set(answer_id),
                    ..Default::default()
                });
            question_answer::Entity::insert_many(rows).exec(txn).await?;
        }

        Ok(CompletionReceipt {
            completed_survey_id: completed.completed_survey_id,
            survey_id: validated.survey_id,
            answer_count: validated.answer_ids.len(),
        })
    }

    /// 설문 응답 수
    pub async fn count_completions(
        state: &AppState,
        survey_id: i32,
    ) -> Result<CompletionCountResponse, AppError> {
        Self::ensure_survey(state, survey_id).await?;

        let count = completed_survey::Entity::find()
            .filter(completed_survey::Column::SurveyId.eq(survey_id))
            .count(&state.db)
            .await
            .map_err(AppError::db)?;

        Ok(CompletionCountResponse { survey_id, count })
    }

    /// 설문 통계
    ///
    /// 선택지별로 그 선택지를 고른 응답 수와 전체 응답 대비 비율을 계산합니다.
    /// 설문에 속하지 않는 선택지 기록은 집계하지 않습니다.
    pub async fn survey_statistics(
        state: &AppState,
        survey_id: i32,
    ) -> Result<SurveyStatistics, AppError> {
        Self::ensure_survey(state, survey_id).await?;

        let questions = question::Entity::find()
            .filter(question::Column::SurveyId.eq(survey_id))
            .order_by_asc(question::Column::QuestionId)
            .all(&state.db)
            .await
            .map_err(AppError::db)?;

        let question_ids: Vec<i32> = questions.iter().map(|q| q.question_id).collect();
        let answers = if question_ids.is_empty() {
            Vec::new()
        } else {
            answer::Entity::find()
                .filter(answer::Column::QuestionId.is_in(question_ids))
                .order_by_asc(answer::Column::AnswerId)
                .all(&state.db)
                .await
                .map_err(AppError::db)?
        };

        let total_completions = completed_survey::Entity::find()
            .filter(completed_survey::Column::SurveyId.eq(survey_id))
            .count(&state.db)
            .await
            .map_err(AppError::db)?;

        let selections: Vec<(i32, i32)> = question_answer::Entity::find()
            .select_only()
            .column(question_answer::Column::CompletedSurveyId)
            .column(question_answer::Column::AnswerId)
            .join(
                JoinType::InnerJoin,
                question_answer::Relation::CompletedSurvey.def(),
            )
            .filter(completed_survey::Column::SurveyId.eq(survey_id))
            .into_tuple()
            .all(&state.db)
            .await
            .map_err(AppError::db)?;

        let known: HashSet<i32> = answers.iter().map(|a| a.answer_id).collect();
        let mut tally: HashMap<i32, HashSet<i32>> = HashMap::new();
        for (completed_survey_id, answer_id) in selections {
            if known.contains(&answer_id) {
                tally.entry(answer_id).or_default().insert(completed_survey_id);
            }
        }

        let mut by_question: HashMap<i32, Vec<AnswerStatistics>> = HashMap::new();
        for a in answers {
            let count = tally.get(&a.answer_id).map_or(0, |s| s.len() as u64);
            by_question
                .entry(a.question_id)
                .or_default()
                .push(AnswerStatistics {
                    answer_id: a.answer_id,
                    text: a.text,
                    count,
                    percentage: percentage(count, total_completions),
                });
        }

        let questions = questions
            .into_iter()
            .map(|q| QuestionStatistics {
                answers: by_question.remove(&q.question_id).unwrap_or_default(),
                question_id: q.question_id,
                text: q.text,
                multiple_answers: q.multiple_answers,
            })
            .collect();

        Ok(SurveyStatistics {
            survey_id,
            total_completions,
            questions,
        })
    }

    async fn ensure_survey(state: &AppState, survey_id: i32) -> Result<(), AppError> {
        SurveyService::find(&state.db, survey_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| {
                AppError::SurveyNotFound(format!("설문 {}을(를) 찾을 수 없습니다.", survey_id))
            })
    }
}

/// 비율 (%), 소수 둘째 자리에서 버림. 전체가 0이면 0.
///
/// 정수(basis point)로 내림하므로 한 질문의 단일 선택 비율 합은 100을 넘지 않습니다.
fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let basis_points = count.saturating_mul(10_000) / total;
    basis_points as f64 / 100.0
}
