use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::dto::{CreateSurveyRequest, SurveyResponse, UpdateSurveyRequest};
use super::entity::survey;
use crate::domain::auth::policy::{require_ownership, Action, ResourceKind};
use crate::domain::user::entity::user;
use crate::domain::user::service::UserService;
use crate::global::validator::{sanitize_opt, sanitize_text};
use crate::state::AppState;
use crate::utils::error::AppError;

pub struct SurveyService;

impl SurveyService {
    /// 설문 생성 (작성자는 요청한 사용자)
    pub async fn create(
        state: &AppState,
        acting: &user::Model,
        req: CreateSurveyRequest,
    ) -> Result<SurveyResponse, AppError> {
        if UserService::find(&state.db, acting.user_id).await?.is_none() {
            return Err(AppError::ReferentialIntegrity(
                "작성자가 존재하지 않습니다.".to_string(),
            ));
        }

        let created = survey::ActiveModel {
            name: Set(sanitize_text(&req.name)),
            description: Set(sanitize_opt(req.description.as_deref())),
            creator_id: Set(acting.user_id),
            ..Default::default()
        }
        .insert(&state.db)
        .await
        .map_err(AppError::from_write)?;

        info!(
            survey_id = created.survey_id,
            creator_id = acting.user_id,
            "survey created"
        );
        Ok(created.into())
    }

    pub async fn find<C: ConnectionTrait>(
        db: &C,
        survey_id: i32,
    ) -> Result<Option<survey::Model>, AppError> {
        survey::Entity::find_by_id(survey_id)
            .one(db)
            .await
            .map_err(AppError::db)
    }

    pub async fn get(state: &AppState, survey_id: i32) -> Result<SurveyResponse, AppError> {
        Self::find(&state.db, survey_id)
            .await?
            .map(SurveyResponse::from)
            .ok_or_else(|| AppError::NotFound("존재하지 않는 설문입니다.".to_string()))
    }

    pub async fn list(state: &AppState) -> Result<Vec<SurveyResponse>, AppError> {
        let surveys = survey::Entity::find()
            .order_by_asc(survey::Column::SurveyId)
            .all(&state.db)
            .await
            .map_err(AppError::db)?;

        Ok(surveys.into_iter().map(SurveyResponse::from).collect())
    }

    pub async fn list_by_creator(
        state: &AppState,
        creator_id: i32,
    ) -> Result<Vec<SurveyResponse>, AppError> {
        let surveys = survey::Entity::find()
            .filter(survey::Column::CreatorId.eq(creator_id))
            .order_by_asc(survey::Column::SurveyId)
            .all(&state.db)
            .await
            .map_err(AppError::db)?;

        Ok(surveys.into_iter().map(SurveyResponse::from).collect())
    }

    pub async fn update(
        state: &AppState,
        acting: &user::Model,
        survey_id: i32,
        req: UpdateSurveyRequest,
    ) -> Result<SurveyResponse, AppError> {
        let target = Self::find(&state.db, survey_id)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 설문입니다.".to_string()))?;
        require_ownership(acting, target.creator_id, ResourceKind::Survey, Action::Update)?;

        let mut active: survey::ActiveModel = target.into();
        if let Some(name) = req.name {
            active.name = Set(sanitize_text(&name));
        }
        if let Some(description) = req.description {
            active.description = Set(Some(sanitize_text(&description)));
        }

        let updated = active.update(&state.db).await.map_err(AppError::from_write)?;

        info!(survey_id, acting_user = acting.user_id, "survey updated");
        Ok(updated.into())
    }

    /// 설문 삭제 (질문, 선택지, 응답 기록은 cascade)
    pub async fn delete(
        state: &AppState,
        acting: &user::Model,
        survey_id: i32,
    ) -> Result<(), AppError> {
        let target = Self::find(&state.db, survey_id)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 설문입니다.".to_string()))?;
        require_ownership(acting, target.creator_id, ResourceKind::Survey, Action::Delete)?;

        let result = survey::Entity::delete_by_id(survey_id)
            .exec(&state.db)
            .await
            .map_err(AppError::from_write)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("존재하지 않는 설문입니다.".to_string()));
        }

        info!(survey_id, acting_user = acting.user_id, "survey deleted");
        Ok(())
    }
}
