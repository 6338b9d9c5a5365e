use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::dto::{AnswerResponse, CreateAnswerRequest, UpdateAnswerRequest};
use crate::domain::auth::policy::{require_ownership, Action, ResourceKind};
use crate::domain::question::service::QuestionService;
use crate::domain::survey::entity::answer;
use crate::domain::user::entity::user;
use crate::global::validator::sanitize_text;
use crate::state::AppState;
use crate::utils::error::AppError;

pub struct AnswerService;

impl AnswerService {
    /// 선택지 생성 (설문 작성자 또는 관리자)
    pub async fn create(
        state: &AppState,
        acting: &user::Model,
        req: CreateAnswerRequest,
    ) -> Result<AnswerResponse, AppError> {
        let parent = QuestionService::find(&state.db, req.question_id)
            .await?
            .ok_or_else(|| {
                AppError::ReferentialIntegrity(format!(
                    "질문 {}이(가) 존재하지 않습니다.",
                    req.question_id
                ))
            })?;
        let owner_id = QuestionService::owner_of(&state.db, &parent).await?;
        require_ownership(acting, owner_id, ResourceKind::Answer, Action::Create)?;

        let created = answer::ActiveModel {
            text: Set(sanitize_text(&req.text)),
            question_id: Set(parent.question_id),
            ..Default::default()
        }
        .insert(&state.db)
        .await
        .map_err(AppError::from_write)?;

        info!(
            answer_id = created.answer_id,
            question_id = created.question_id,
            "answer created"
        );
        Ok(created.into())
    }

    pub async fn find<C: ConnectionTrait>(
        db: &C,
        answer_id: i32,
    ) -> Result<Option<answer::Model>, AppError> {
        answer::Entity::find_by_id(answer_id)
            .one(db)
            .await
            .map_err(AppError::db)
    }

    pub async fn get(state: &AppState, answer_id: i32) -> Result<AnswerResponse, AppError> {
        Self::find(&state.db, answer_id)
            .await?
            .map(AnswerResponse::from)
            .ok_or_else(|| AppError::NotFound("존재하지 않는 선택지입니다.".to_string()))
    }

    pub async fn list_by_question(
        state: &AppState,
        question_id: i32,
    ) -> Result<Vec<AnswerResponse>, AppError> {
        let answers = answer::Entity::find()
            .filter(answer::Column::QuestionId.eq(question_id))
            .order_by_asc(answer::Column::AnswerId)
            .all(&state.db)
            .await
            .map_err(AppError::db)?;

        Ok(answers.into_iter().map(AnswerResponse::from).collect())
    }

    pub async fn update(
        state: &AppState,
        acting: &user::Model,
        answer_id: i32,
        req: UpdateAnswerRequest,
    ) -> Result<AnswerResponse, AppError> {
        let target = Self::find(&state.db, answer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 선택지입니다.".to_string()))?;
        let owner_id = Self::owner_of(&state.db, &target).await?;
        require_ownership(acting, owner_id, ResourceKind::Answer, Action::Update)?;

        let mut active: answer::ActiveModel = target.into();
        if let Some(text) = req.text {
            active.text = Set(sanitize_text(&text));
        }

        let updated = active.update(&state.db).await.map_err(AppError::from_write)?;

        info!(answer_id, acting_user = acting.user_id, "answer updated");
        Ok(updated.into())
    }

    pub async fn delete(
        state: &AppState,
        acting: &user::Model,
        answer_id: i32,
    ) -> Result<(), AppError> {
        let target = Self::find(&state.db, answer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 선택지입니다.".to_string()))?;
        let owner_id = Self::owner_of(&state.db, &target).await?;
        require_ownership(acting, owner_id, ResourceKind::Answer, Action::Delete)?;

        let result = answer::Entity::delete_by_id(answer_id)
            .exec(&state.db)
            .await
            .map_err(AppError::from_write)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("존재하지 않는 선택지입니다.".to_string()));
        }

        info!(answer_id, acting_user = acting.user_id, "answer deleted");
        Ok(())
    }

    async fn owner_of<C: ConnectionTrait>(db: &C, target: &answer::Model) -> Result<i32, AppError> {
        let parent = QuestionService::find(db, target.question_id)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 질문입니다.".to_string()))?;
        QuestionService::owner_of(db, &parent).await
    }
}
