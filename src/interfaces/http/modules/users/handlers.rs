//! User management API handlers
//!
//! Delegates to `IdentityService` from the application layer.

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{CreateUserRequest, UserDto};
use crate::application::IdentityService;
use crate::domain::UserRole;
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct UserHandlerState {
    pub identity: IdentityService,
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Caller is not an admin"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    let role: UserRole = request.role.parse()?;
    let user = state
        .identity
        .create_user(&caller.identity, &request.name, &request.email, role)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(user.into()))))
}
