//! User directory API handlers
//!
//! CRUD and listing endpoints for directory users. Every route runs
//! behind the auth middleware; the acting user arrives as a request
//! extension and drives the access decisions inside `UserDirectory`.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    ListUsersParams, RegisterUserRequest, UpdateUserRequest, UserDetailDto, UserDto, UserListDto,
};
use crate::application::UserDirectory;
use crate::infrastructure::cache::RedisDetailCache;
use crate::infrastructure::database::repositories::{SeaOrmReferenceStore, SeaOrmUserStore};
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::CurrentUser;

/// The directory service over its production stores.
pub type DirectoryService = UserDirectory<SeaOrmUserStore, SeaOrmReferenceStore, RedisDetailCache>;

/// User handler state — concrete over the production stores for Axum
/// compatibility.
#[derive(Clone)]
pub struct UserHandlerState {
    pub directory: Arc<DirectoryService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListUsersParams),
    responses(
        (status = 200, description = "User list page", body = ApiResponse<UserListDto>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<ApiResponse<UserListDto>>, (StatusCode, Json<ApiResponse<UserListDto>>)> {
    match state.directory.list(params.into(), &actor).await {
        Ok(page) => Ok(Json(ApiResponse::success(UserListDto::from(page)))),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User detail", body = ApiResponse<UserDetailDto>),
        (status = 404, description = "Not found"),
        (status = 503, description = "Cache unavailable")
    )
)]
pub async fn get_user_detail(
    State(state): State<UserHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserDetailDto>>, (StatusCode, Json<ApiResponse<UserDetailDto>>)> {
    match state.directory.get_detail(id).await {
        Ok(view) => Ok(Json(ApiResponse::success(UserDetailDto::from(view)))),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User created (pending approval)", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not authorized to assign the role")
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    ValidatedJson(request): ValidatedJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), (StatusCode, Json<ApiResponse<UserDto>>)> {
    match state.directory.create(request.into(), &actor).await {
        Ok(user) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(UserDto::from(user))),
        )),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 403, description = "Not authorized to update this user"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, (StatusCode, Json<ApiResponse<UserDto>>)> {
    match state.directory.update(id, request.into(), &actor).await {
        Ok(user) => Ok(Json(ApiResponse::success(UserDto::from(user)))),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<String>),
        (status = 403, description = "Not authorized to delete this user"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<String>>)> {
    match state.directory.delete(id, &actor).await {
        Ok(()) => Ok(Json(ApiResponse::success("User deleted".to_string()))),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The authenticated user", body = ApiResponse<UserDto>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn current_user(
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
) -> Json<ApiResponse<UserDto>> {
    Json(ApiResponse::success(UserDto::from(actor)))
}
