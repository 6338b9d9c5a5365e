use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::dto::{RegisterRequest, UpdateRoleRequest, UpdateUserRequest, UserResponse};
use super::service::UserService;
use crate::state::AppState;
use crate::utils::auth::{AdminUser, AuthUser};
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 회원가입
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "가입 성공", body = SuccessUserResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 409, description = "이메일 또는 닉네임 중복", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BaseResponse<UserResponse>>), AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = UserService::register(&state, req).await?;

    Ok((StatusCode::CREATED, Json(BaseResponse::created(result))))
}

/// 전체 회원 목록 (관리자 전용)
#[utoipa::path(
    get,
    path = "/users",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessUserListResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 403, description = "관리자 권한 없음", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<BaseResponse<Vec<UserResponse>>>, AppError> {
    let result = UserService::list(&state).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 회원 조회
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("user_id" = i32, Path, description = "회원 ID")
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessUserResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 사용자", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn get_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_id): Path<i32>,
) -> Result<Json<BaseResponse<UserResponse>>, AppError> {
    let result = UserService::get(&state, user_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 회원 정보 수정 (본인 또는 관리자)
#[utoipa::path(
    put,
    path = "/users/{user_id}",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("user_id" = i32, Path, description = "회원 ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "수정 성공", body = SuccessUserResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 사용자", body = ErrorResponse),
        (status = 409, description = "이메일 또는 닉네임 중복", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<i32>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<UserResponse>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = UserService::update(&state, &user.user, user_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 회원 삭제 (본인 또는 관리자)
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("user_id" = i32, Path, description = "회원 ID")
    ),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 사용자", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<i32>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    UserService::delete(&state, &user.user, user_id).await?;

    Ok(Json(BaseResponse::ok_with_message(
        "회원이 삭제되었습니다.",
    )))
}

/// 역할 변경 (관리자 전용)
#[utoipa::path(
    put,
    path = "/users/{user_id}/role",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("user_id" = i32, Path, description = "회원 ID")
    ),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "변경 성공", body = SuccessUserResponse),
        (status = 403, description = "관리자 권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 사용자", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn update_role(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<i32>,
    payload: Result<Json<UpdateRoleRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<UserResponse>>, AppError> {
    let Json(req) = payload?;

    let result = UserService::set_role(&state, user_id, req.role).await?;

    Ok(Json(BaseResponse::success(result)))
}
