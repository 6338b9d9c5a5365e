//! 역할별 권한 정책
//!
//! 소유권 검사를 우회할 수 있는 (역할, 리소스, 행위) 조합을 한 곳에서 관리합니다.

use crate::domain::user::entity::user::{self, Role};
use crate::utils::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    User,
    Survey,
    Question,
    Answer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

/// 소유권 우회 허용 목록
const OWNERSHIP_BYPASS: &[(Role, ResourceKind, Action)] = &[
    (Role::Admin, ResourceKind::User, Action::Update),
    (Role::Admin, ResourceKind::User, Action::Delete),
    (Role::Admin, ResourceKind::Survey, Action::Update),
    (Role::Admin, ResourceKind::Survey, Action::Delete),
    (Role::Admin, ResourceKind::Question, Action::Create),
    (Role::Admin, ResourceKind::Question, Action::Update),
    (Role::Admin, ResourceKind::Question, Action::Delete),
    (Role::Admin, ResourceKind::Answer, Action::Create),
    (Role::Admin, ResourceKind::Answer, Action::Update),
    (Role::Admin, ResourceKind::Answer, Action::Delete),
];

pub fn can_bypass_ownership(role: Role, kind: ResourceKind, action: Action) -> bool {
    OWNERSHIP_BYPASS
        .iter()
        .any(|&(r, k, a)| r == role && k == kind && a == action)
}

/// 소유권 검사
///
/// 행위자가 소유자가 아니면, 역할이 해당 조합에 대해 우회 권한을 가질 때만 허용합니다.
pub fn require_ownership(
    acting: &user::Model,
    owner_id: i32,
    kind: ResourceKind,
    action: Action,
) -> Result<(), AppError> {
    if acting.user_id == owner_id || can_bypass_ownership(acting.role, kind, action) {
        return Ok(());
    }

    tracing::warn!(
        user_id = acting.user_id,
        owner_id,
        ?kind,
        ?action,
        "ownership check rejected"
    );
    Err(AppError::Forbidden("권한이 없습니다.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn principal(user_id: i32, role: Role) -> user::Model {
        user::Model {
            user_id,
            nickname: format!("user{}", user_id),
            email: format!("user{}@example.com", user_id),
            hashed_password: String::new(),
            role,
            registration_date: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn should_allow_owner_for_every_action() {
        let owner = principal(1, Role::User);

        for action in [Action::Create, Action::Read, Action::Update, Action::Delete] {
            assert!(require_ownership(&owner, 1, ResourceKind::Survey, action).is_ok());
        }
    }

    #[test]
    fn should_forbid_other_ordinary_user() {
        let other = principal(2, Role::User);

        let result = require_ownership(&other, 1, ResourceKind::Survey, Action::Update);

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn should_let_admin_bypass_update_and_delete() {
        let admin = principal(9, Role::Admin);

        for kind in [
            ResourceKind::User,
            ResourceKind::Survey,
            ResourceKind::Question,
            ResourceKind::Answer,
        ] {
            assert!(require_ownership(&admin, 1, kind, Action::Update).is_ok());
            assert!(require_ownership(&admin, 1, kind, Action::Delete).is_ok());
        }
    }

    #[test]
    fn should_let_admin_create_questions_and_answers_only() {
        assert!(can_bypass_ownership(
            Role::Admin,
            ResourceKind::Question,
            Action::Create
        ));
        assert!(can_bypass_ownership(
            Role::Admin,
            ResourceKind::Answer,
            Action::Create
        ));
        assert!(!can_bypass_ownership(
            Role::Admin,
            ResourceKind::Survey,
            Action::Create
        ));
    }

    #[test]
    fn should_never_grant_bypass_to_ordinary_users() {
        for kind in [
            ResourceKind::User,
            ResourceKind::Survey,
            ResourceKind::Question,
            ResourceKind::Answer,
        ] {
            for action in [Action::Create, Action::Read, Action::Update, Action::Delete] {
                assert!(!can_bypass_ownership(Role::User, kind, action));
            }
        }
    }
}
