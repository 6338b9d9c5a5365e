use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::dto::{CreateQuestionRequest, QuestionResponse, UpdateQuestionRequest};
use crate::domain::auth::policy::{require_ownership, Action, ResourceKind};
use crate::domain::survey::entity::{question, survey};
use crate::domain::survey::service::SurveyService;
use crate::domain::user::entity::user;
use crate::global::validator::sanitize_text;
use crate::state::AppState;
use crate::utils::error::AppError;

pub struct QuestionService;

impl QuestionService {
    /// 질문 생성 (설문 작성자 또는 관리자)
    pub async fn create(
        state: &AppState,
        acting: &user::Model,
        req: CreateQuestionRequest,
    ) -> Result<QuestionResponse, AppError> {
        let parent = SurveyService::find(&state.db, req.survey_id)
            .await?
            .ok_or_else(|| {
                AppError::ReferentialIntegrity(format!(
                    "설문 {}이(가) 존재하지 않습니다.",
                    req.survey_id
                ))
            })?;
        require_ownership(acting, parent.creator_id, ResourceKind::Question, Action::Create)?;

        let created = question::ActiveModel {
            text: Set(sanitize_text(&req.text)),
            multiple_answers: Set(req.multiple_answers),
            survey_id: Set(parent.survey_id),
            ..Default::default()
        }
        .insert(&state.db)
        .await
        .map_err(AppError::from_write)?;

        info!(
            question_id = created.question_id,
            survey_id = created.survey_id,
            "question created"
        );
        Ok(created.into())
    }

    pub async fn find<C: ConnectionTrait>(
        db: &C,
        question_id: i32,
    ) -> Result<Option<question::Model>, AppError> {
        question::Entity::find_by_id(question_id)
            .one(db)
            .await
            .map_err(AppError::db)
    }

    pub async fn get(state: &AppState, question_id: i32) -> Result<QuestionResponse, AppError> {
        Self::find(&state.db, question_id)
            .await?
            .map(QuestionResponse::from)
            .ok_or_else(|| AppError::NotFound("존재하지 않는 질문입니다.".to_string()))
    }

    pub async fn list_by_survey(
        state: &AppState,
        survey_id: i32,
    ) -> Result<Vec<QuestionResponse>, AppError> {
        let questions = question::Entity::find()
            .filter(question::Column::SurveyId.eq(survey_id))
            .order_by_asc(question::Column::QuestionId)
            .all(&state.db)
            .await
            .map_err(AppError::db)?;

        Ok(questions.into_iter().map(QuestionResponse::from).collect())
    }

    pub async fn update(
        state: &AppState,
        acting: &user::Model,
        question_id: i32,
        req: UpdateQuestionRequest,
    ) -> Result<QuestionResponse, AppError> {
        let target = Self::find(&state.db, question_id)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 질문입니다.".to_string()))?;
        let owner_id = Self::owner_of(&state.db, &target).await?;
        require_ownership(acting, owner_id, ResourceKind::Question, Action::Update)?;

        let mut active: question::ActiveModel = target.into();
        if let Some(text) = req.text {
            active.text = Set(sanitize_text(&text));
        }
        if let Some(multiple_answers) = req.multiple_answers {
            active.multiple_answers = Set(multiple_answers);
        }

        let updated = active.update(&state.db).await.map_err(AppError::from_write)?;

        info!(question_id, acting_user = acting.user_id, "question updated");
        Ok(updated.into())
    }

    pub async fn delete(
        state: &AppState,
        acting: &user::Model,
        question_id: i32,
    ) -> Result<(), AppError> {
        let target = Self::find(&state.db, question_id)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 질문입니다.".to_string()))?;
        let owner_id = Self::owner_of(&state.db, &target).await?;
        require_ownership(acting, owner_id, ResourceKind::Question, Action::Delete)?;

        let result = question::Entity::delete_by_id(question_id)
            .exec(&state.db)
            .await
            .map_err(AppError::from_write)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("존재하지 않는 질문입니다.".to_string()));
        }

        info!(question_id, acting_user = acting.user_id, "question deleted");
        Ok(())
    }

    /// 질문의 소유자 (설문 작성자) ID
    pub async fn owner_of<C: ConnectionTrait>(
        db: &C,
        target: &question::Model,
    ) -> Result<i32, AppError> {
        survey::Entity::find_by_id(target.survey_id)
            .one(db)
            .await
            .map_err(AppError::db)?
            .map(|s| s.creator_id)
            .ok_or_else(|| AppError::NotFound("존재하지 않는 설문입니다.".to_string()))
    }
}
