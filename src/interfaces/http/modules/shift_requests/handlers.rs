//! Shift request HTTP handlers
//!
//! Thin adapters over `ShiftRequestWorkflow`; authorization happens there.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    Extension, Json,
};

use super::dto::{CreateShiftRequestInput, ShiftRequestDto, ShiftRequestQuery};
use crate::application::ShiftRequestWorkflow;
use crate::domain::UserRole;
use crate::interfaces::http::common::{ApiError, ApiPath, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct ShiftRequestHandlerState {
    pub workflow: Arc<ShiftRequestWorkflow>,
}

#[utoipa::path(
    post,
    path = "/api/shift_requests",
    tag = "Shift Requests",
    security(("bearer_auth" = [])),
    request_body = CreateShiftRequestInput,
    responses(
        (status = 201, description = "Pending request created", body = ApiResponse<ShiftRequestDto>),
        (status = 400, description = "Malformed body"),
        (status = 403, description = "Caller is not a worker"),
        (status = 404, description = "Shift not found"),
        (status = 409, description = "Duplicate pending request (when configured)")
    )
)]
pub async fn create_shift_request(
    State(state): State<ShiftRequestHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
    ValidatedJson(input): ValidatedJson<CreateShiftRequestInput>,
) -> Result<(StatusCode, Json<ApiResponse<ShiftRequestDto>>), ApiError> {
    let view = state
        .workflow
        .create_request(&caller.identity, input.shift_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(view.into()))))
}

#[utoipa::path(
    get,
    path = "/api/shift_requests",
    tag = "Shift Requests",
    security(("bearer_auth" = [])),
    params(ShiftRequestQuery),
    responses(
        (status = 200, description = "Matching requests, newest first", body = ApiResponse<Vec<ShiftRequestDto>>),
        (status = 400, description = "Unknown status value"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn list_shift_requests(
    State(state): State<ShiftRequestHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
    uri: Uri,
) -> Result<Json<ApiResponse<Vec<ShiftRequestDto>>>, ApiError> {
    // the query string is only parsed once the caller is known to be an admin
    caller.identity.require(UserRole::Admin, "list shift requests")?;
    let Query(query) = Query::<ShiftRequestQuery>::try_from_uri(&uri)?;
    let filter = query.into_filter()?;
    let views = state.workflow.list_requests(&caller.identity, &filter).await?;
    Ok(Json(ApiResponse::success(
        views.into_iter().map(ShiftRequestDto::from).collect(),
    )))
}

#[utoipa::path(
    put,
    path = "/api/shift_requests/approve/{id}",
    tag = "Shift Requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Shift request ID")),
    responses(
        (status = 200, description = "Request approved and assignment created", body = ApiResponse<ShiftRequestDto>),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already decided")
    )
)]
pub async fn approve_shift_request(
    State(state): State<ShiftRequestHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<ShiftRequestDto>>, ApiError> {
    let view = state.workflow.approve_request(&caller.identity, id).await?;
    Ok(Json(ApiResponse::success(view.into())))
}

#[utoipa::path(
    put,
    path = "/api/shift_requests/reject/{id}",
    tag = "Shift Requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Shift request ID")),
    responses(
        (status = 200, description = "Request rejected", body = ApiResponse<ShiftRequestDto>),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already decided")
    )
)]
pub async fn reject_shift_request(
    State(state): State<ShiftRequestHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<ShiftRequestDto>>, ApiError> {
    let view = state.workflow.reject_request(&caller.identity, id).await?;
    Ok(Json(ApiResponse::success(view.into())))
}
