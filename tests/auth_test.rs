//! 인증/인가 통합 테스트

mod common;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use sea_orm::{ActiveModelTrait, Set};

use common::{create_user, setup_state, token_for, TEST_PASSWORD, TEST_SECRET};
use survey_server::config::AdminBootstrap;
use survey_server::domain::auth::dto::TokenRequest;
use survey_server::domain::auth::service::AuthService;
use survey_server::domain::user::dto::{RegisterRequest, UpdateUserRequest};
use survey_server::domain::user::entity::user::{self, Role};
use survey_server::domain::user::service::UserService;
use survey_server::utils::error::AppError;
use survey_server::utils::jwt::{decode_token, issue_token, Claims, ROLE_ADMIN, ROLE_USER};

// ============== 로그인 ==============

#[tokio::test]
async fn should_issue_token_for_valid_credentials() {
    // Arrange
    let state = setup_state().await;
    let user = create_user(&state, "meow", Role::User).await;

    // Act
    let result = AuthService::login(
        &state,
        TokenRequest {
            nickname: "meow".to_string(),
            password: TEST_PASSWORD.to_string(),
        },
    )
    .await
    .unwrap();

    // Assert
    assert_eq!(result.token_type, "bearer");
    let claims = decode_token(&result.access_token, TEST_SECRET).unwrap();
    assert_eq!(claims.sub, user.user_id.to_string());
    assert_eq!(claims.role, ROLE_USER);
    assert_eq!(claims.exp - claims.iat, 1800);
}

#[tokio::test]
async fn should_carry_admin_role_from_stored_role() {
    // Arrange
    let state = setup_state().await;
    create_user(&state, "boss", Role::Admin).await;

    // Act
    let result = AuthService::login(
        &state,
        TokenRequest {
            nickname: "boss".to_string(),
            password: TEST_PASSWORD.to_string(),
        },
    )
    .await
    .unwrap();

    // Assert
    let claims = decode_token(&result.access_token, TEST_SECRET).unwrap();
    assert_eq!(claims.role, ROLE_ADMIN);
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let state = setup_state().await;
    create_user(&state, "meow", Role::User).await;

    let result = AuthService::verify_credentials(&state.db, "meow", "wrong-password").await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn should_reject_unknown_nickname() {
    let state = setup_state().await;

    let result = AuthService::verify_credentials(&state.db, "ghost", TEST_PASSWORD).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

// ============== 요청 주체 확인 ==============

#[tokio::test]
async fn should_resolve_principal_from_valid_token() {
    // Arrange
    let state = setup_state().await;
    let user = create_user(&state, "meow", Role::User).await;
    let token = token_for(&user);

    // Act
    let (_, principal) = AuthService::resolve_principal(&state, &token).await.unwrap();

    // Assert
    assert_eq!(principal.user_id, user.user_id);
}

#[tokio::test]
async fn should_reject_expired_token() {
    // Arrange
    let state = setup_state().await;
    let user = create_user(&state, "meow", Role::User).await;
    let issued_long_ago = Utc::now() - Duration::hours(1);
    let token = issue_token(user.user_id, ROLE_USER, issued_long_ago, TEST_SECRET, 1800).unwrap();

    // Act
    let result = AuthService::resolve_principal(&state, &token).await;

    // Assert
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn should_reject_token_signed_with_another_secret() {
    let state = setup_state().await;
    let user = create_user(&state, "meow", Role::User).await;
    let token = issue_token(user.user_id, ROLE_USER, Utc::now(), "other", 1800).unwrap();

    let result = AuthService::resolve_principal(&state, &token).await;

    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn should_reject_token_whose_subject_no_longer_exists() {
    // Arrange
    let state = setup_state().await;
    let user = create_user(&state, "meow", Role::User).await;
    let token = token_for(&user);
    UserService::delete(&state, &user, user.user_id).await.unwrap();

    // Act
    let result = AuthService::resolve_principal(&state, &token).await;

    // Assert
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn should_keep_old_token_bound_to_renamed_user() {
    // Arrange
    let state = setup_state().await;
    let alice = create_user(&state, "alice", Role::User).await;
    let alice_token = token_for(&alice);
    UserService::update(
        &state,
        &alice,
        alice.user_id,
        UpdateUserRequest {
            nickname: Some("alice2".to_string()),
            email: None,
            password: None,
        },
    )
    .await
    .unwrap();
    let bob = create_user(&state, "alice", Role::User).await;

    // Act
    let (_, principal) = AuthService::resolve_principal(&state, &alice_token)
        .await
        .unwrap();

    // Assert
    assert_ne!(bob.user_id, alice.user_id);
    assert_eq!(principal.user_id, alice.user_id);
    assert_eq!(principal.nickname, "alice2");
}

#[tokio::test]
async fn should_reject_token_with_non_numeric_subject() {
    let state = setup_state().await;
    create_user(&state, "meow", Role::User).await;
    let claims = Claims {
        sub: "meow".to_string(),
        role: ROLE_USER.to_string(),
        iat: Utc::now().timestamp() as usize,
        exp: (Utc::now() + Duration::minutes(30)).timestamp() as usize,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let result = AuthService::resolve_principal(&state, &token).await;

    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

// ============== 관리자 확인 ==============

#[tokio::test]
async fn should_allow_admin() {
    let state = setup_state().await;
    let admin = create_user(&state, "boss", Role::Admin).await;

    let result = AuthService::require_admin(&state, &token_for(&admin)).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn should_forbid_ordinary_user_from_admin_operations() {
    let state = setup_state().await;
    let user = create_user(&state, "meow", Role::User).await;

    let result = AuthService::require_admin(&state, &token_for(&user)).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn should_forbid_demoted_admin_holding_old_token() {
    // Arrange
    let state = setup_state().await;
    let admin = create_user(&state, "boss", Role::Admin).await;
    let token = token_for(&admin);
    UserService::set_role(&state, admin.user_id, Role::User)
        .await
        .unwrap();

    // Act
    let result = AuthService::require_admin(&state, &token).await;

    // Assert
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn should_forbid_user_claiming_admin_role_in_token() {
    // Arrange
    let state = setup_state().await;
    let user = create_user(&state, "meow", Role::User).await;
    let forged_role = issue_token(user.user_id, ROLE_ADMIN, Utc::now(), TEST_SECRET, 1800).unwrap();

    // Act
    let result = AuthService::require_admin(&state, &forged_role).await;

    // Assert
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

// ============== 회원가입 / 관리자 준비 ==============

#[tokio::test]
async fn should_reject_duplicate_email_and_nickname() {
    // Arrange
    let state = setup_state().await;
    create_user(&state, "meow", Role::User).await;

    // Act
    let same_email = UserService::register(
        &state,
        RegisterRequest {
            nickname: "other".to_string(),
            email: "meow@example.com".to_string(),
            password: TEST_PASSWORD.to_string(),
        },
    )
    .await;
    let same_nickname = UserService::register(
        &state,
        RegisterRequest {
            nickname: "meow".to_string(),
            email: "other@example.com".to_string(),
            password: TEST_PASSWORD.to_string(),
        },
    )
    .await;

    // Assert
    assert!(matches!(same_email, Err(AppError::Conflict(_))));
    assert!(matches!(same_nickname, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn should_enforce_unique_nickname_in_storage() {
    // Arrange
    let state = setup_state().await;
    create_user(&state, "meow", Role::User).await;

    // Act
    let result = user::ActiveModel {
        nickname: Set("meow".to_string()),
        email: Set("other@example.com".to_string()),
        hashed_password: Set("not-a-hash".to_string()),
        role: Set(Role::User),
        registration_date: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(AppError::from_write);

    // Assert
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn should_never_store_plain_password() {
    let state = setup_state().await;
    let user = create_user(&state, "meow", Role::User).await;

    assert_ne!(user.hashed_password, TEST_PASSWORD);
    assert!(user.hashed_password.starts_with("$argon2id$"));
}

#[tokio::test]
async fn should_create_then_reuse_bootstrap_admin() {
    // Arrange
    let state = setup_state().await;
    let bootstrap = AdminBootstrap {
        nickname: "root".to_string(),
        email: "root@example.com".to_string(),
        password: "root-password".to_string(),
    };

    // Act
    let created = UserService::ensure_admin(&state.db, &bootstrap).await.unwrap();
    let again = UserService::ensure_admin(&state.db, &bootstrap).await.unwrap();

    // Assert
    assert_eq!(created.role, Role::Admin);
    assert_eq!(created.user_id, again.user_id);
    assert_eq!(UserService::list(&state).await.unwrap().len(), 1);
}

#[tokio::test]
async fn should_promote_existing_account_to_admin() {
    // Arrange
    let state = setup_state().await;
    let user = create_user(&state, "meow", Role::User).await;
    let bootstrap = AdminBootstrap {
        nickname: "meow".to_string(),
        email: user.email.clone(),
        password: TEST_PASSWORD.to_string(),
    };

    // Act
    let promoted = UserService::ensure_admin(&state.db, &bootstrap).await.unwrap();

    // Assert
    assert_eq!(promoted.user_id, user.user_id);
    assert_eq!(promoted.role, Role::Admin);
}
