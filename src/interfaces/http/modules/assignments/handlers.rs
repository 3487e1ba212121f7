//! Assignment HTTP handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{AssignmentDto, CreateAssignmentInput, UpdateAssignmentInput};
use crate::application::AssignmentService;
use crate::interfaces::http::common::{ApiError, ApiPath, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct AssignmentHandlerState {
    pub assignments: Arc<AssignmentService>,
}

#[utoipa::path(
    get,
    path = "/api/assignments",
    tag = "Assignments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Assignments by shift date and start time", body = ApiResponse<Vec<AssignmentDto>>),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn list_assignments(
    State(state): State<AssignmentHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<AssignmentDto>>>, ApiError> {
    let views = state.assignments.list_assignments(&caller.identity).await?;
    Ok(Json(ApiResponse::success(
        views.into_iter().map(AssignmentDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/assignments",
    tag = "Assignments",
    security(("bearer_auth" = [])),
    request_body = CreateAssignmentInput,
    responses(
        (status = 201, description = "Assignment created", body = ApiResponse<AssignmentDto>),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Shift or user not found")
    )
)]
pub async fn create_assignment(
    State(state): State<AssignmentHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
    ValidatedJson(input): ValidatedJson<CreateAssignmentInput>,
) -> Result<(StatusCode, Json<ApiResponse<AssignmentDto>>), ApiError> {
    let view = state
        .assignments
        .create_assignment(&caller.identity, input.shift_id, input.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(view.into()))))
}

#[utoipa::path(
    put,
    path = "/api/assignments/{id}",
    tag = "Assignments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Assignment ID")),
    request_body = UpdateAssignmentInput,
    responses(
        (status = 200, description = "Assignment re-pointed", body = ApiResponse<AssignmentDto>),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Assignment or user not found")
    )
)]
pub async fn update_assignment(
    State(state): State<AssignmentHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(input): ValidatedJson<UpdateAssignmentInput>,
) -> Result<Json<ApiResponse<AssignmentDto>>, ApiError> {
    let view = state
        .assignments
        .reassign(&caller.identity, id, input.user_id)
        .await?;
    Ok(Json(ApiResponse::success(view.into())))
}
