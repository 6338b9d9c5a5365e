use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

use super::dto::{RegisterRequest, UpdateUserRequest, UserResponse};
use super::entity::user::{self, Role};
use crate::config::AdminBootstrap;
use crate::domain::auth::policy::{require_ownership, Action, ResourceKind};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::password::hash_password;

pub struct UserService;

impl UserService {
    /// 회원가입
    ///
    /// 이메일 또는 닉네임이 이미 사용 중이면 Conflict입니다.
    pub async fn register(state: &AppState, req: RegisterRequest) -> Result<UserResponse, AppError> {
        Self::ensure_available(&state.db, Some(&req.nickname), Some(&req.email), None).await?;

        let created =
            Self::insert_user(&state.db, &req.nickname, &req.email, &req.password, Role::User)
                .await?;

        info!(user_id = created.user_id, "user registered");
        Ok(created.into())
    }

    pub async fn find<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> Result<Option<user::Model>, AppError> {
        user::Entity::find_by_id(user_id)
            .one(db)
            .await
            .map_err(AppError::db)
    }

    pub async fn get(state: &AppState, user_id: i32) -> Result<UserResponse, AppError> {
        Self::find(&state.db, user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("존재하지 않는 사용자입니다.".to_string()))
    }

    pub async fn list(state: &AppState) -> Result<Vec<UserResponse>, AppError> {
        let users = user::Entity::find()
            .order_by_asc(user::Column::UserId)
            .all(&state.db)
            .await
            .map_err(AppError::db)?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// 회원 정보 수정 (본인 또는 관리자)
    pub async fn update(
        state: &AppState,
        acting: &user::Model,
        user_id: i32,
        req: UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        let target = Self::find(&state.db, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 사용자입니다.".to_string()))?;
        require_ownership(acting, target.user_id, ResourceKind::User, Action::Update)?;

        Self::ensure_available(
            &state.db,
            req.nickname.as_deref().filter(|n| *n != target.nickname),
            req.email.as_deref().filter(|e| *e != target.email),
            Some(target.user_id),
        )
        .await?;

        let mut active: user::ActiveModel = target.into();
        if let Some(nickname) = req.nickname {
            active.nickname = Set(nickname);
        }
        if let Some(email) = req.email {
            active.email = Set(email);
        }
        if let Some(password) = req.password {
            active.hashed_password = Set(hash_password(&password)?);
        }

        let updated = active.update(&state.db).await.map_err(AppError::from_write)?;

        info!(user_id, acting_user = acting.user_id, "user updated");
        Ok(updated.into())
    }

    /// 회원 삭제 (본인 또는 관리자)
    ///
    /// 작성한 설문과 응답 기록은 FK cascade로 함께 삭제됩니다.
    pub async fn delete(
        state: &AppState,
        acting: &user::Model,
        user_id: i32,
    ) -> Result<(), AppError> {
        let target = Self::find(&state.db, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 사용자입니다.".to_string()))?;
        require_ownership(acting, target.user_id, ResourceKind::User, Action::Delete)?;

        let result = user::Entity::delete_by_id(user_id)
            .exec(&state.db)
            .await
            .map_err(AppError::from_write)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(
                "존재하지 않는 사용자입니다.".to_string(),
            ));
        }

        info!(user_id, acting_user = acting.user_id, "user deleted");
        Ok(())
    }

    /// 역할 변경 (관리자 전용, 호출 측에서 권한 확인)
    pub async fn set_role(
        state: &AppState,
        user_id: i32,
        role: Role,
    ) -> Result<UserResponse, AppError> {
        let target = Self::find(&state.db, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 사용자입니다.".to_string()))?;

        let mut active: user::ActiveModel = target.into();
        active.role = Set(role);
        let updated = active.update(&state.db).await.map_err(AppError::from_write)?;

        info!(user_id, ?role, "user role changed");
        Ok(updated.into())
    }

    /// 기본 관리자 계정 준비
    ///
    /// 같은 이메일의 계정이 있으면 역할만 관리자로 올리고, 없으면 새로 만듭니다.
    pub async fn ensure_admin<C: ConnectionTrait>(
        db: &C,
        admin: &AdminBootstrap,
    ) -> Result<user::Model, AppError> {
        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(admin.email.as_str()))
            .one(db)
            .await
            .map_err(AppError::db)?;

        match existing {
            Some(model) if model.role == Role::Admin => Ok(model),
            Some(model) => {
                let mut active: user::ActiveModel = model.into();
                active.role = Set(Role::Admin);
                let updated = active.update(db).await.map_err(AppError::from_write)?;
                info!(user_id = updated.user_id, "existing account promoted to admin");
                Ok(updated)
            }
            None => {
                let created = Self::insert_user(
                    db,
                    &admin.nickname,
                    &admin.email,
                    &admin.password,
                    Role::Admin,
                )
                .await?;
                info!(user_id = created.user_id, "admin account created");
                Ok(created)
            }
        }
    }

    async fn insert_user<C: ConnectionTrait>(
        db: &C,
        nickname: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<user::Model, AppError> {
        let hashed_password = hash_password(password)?;

        user::ActiveModel {
            nickname: Set(nickname.to_string()),
            email: Set(email.to_string()),
            hashed_password: Set(hashed_password),
            role: Set(role),
            registration_date: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(AppError::from_write)
    }

    /// 닉네임/이메일 중복 확인 (`except` 사용자는 제외)
    async fn ensure_available<C: ConnectionTrait>(
        db: &C,
        nickname: Option<&str>,
        email: Option<&str>,
        except: Option<i32>,
    ) -> Result<(), AppError> {
        if let Some(email) = email {
            let mut query = user::Entity::find().filter(user::Column::Email.eq(email));
            if let Some(id) = except {
                query = query.filter(user::Column::UserId.ne(id));
            }
            if query.count(db).await.map_err(AppError::db)? > 0 {
                return Err(AppError::Conflict("이미 사용 중인 이메일입니다.".to_string()));
            }
        }

        if let Some(nickname) = nickname {
            let mut query = user::Entity::find().filter(user::Column::Nickname.eq(nickname));
            if let Some(id) = except {
                query = query.filter(user::Column::UserId.ne(id));
            }
            if query.count(db).await.map_err(AppError::db)? > 0 {
                return Err(AppError::Conflict("이미 사용 중인 닉네임입니다.".to_string()));
            }
        }

        Ok(())
    }
}
