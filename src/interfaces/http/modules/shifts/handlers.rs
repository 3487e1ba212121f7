//! Shift HTTP handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{CreateShiftInput, ShiftDto, UpdateShiftInput};
use crate::application::ShiftCatalog;
use crate::domain::UserRole;
use crate::interfaces::http::common::{ApiError, ApiPath, ApiResponse, EmptyData, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct ShiftHandlerState {
    pub catalog: Arc<ShiftCatalog>,
}

#[utoipa::path(
    get,
    path = "/api/shifts",
    tag = "Shifts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Shifts, newest date first", body = ApiResponse<Vec<ShiftDto>>),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn list_shifts(
    State(state): State<ShiftHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<ShiftDto>>>, ApiError> {
    let shifts = state.catalog.list_shifts(&caller.identity).await?;
    Ok(Json(ApiResponse::success(
        shifts.into_iter().map(ShiftDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/shifts/{id}",
    tag = "Shifts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Shift ID")),
    responses(
        (status = 200, description = "Shift details", body = ApiResponse<ShiftDto>),
        (status = 404, description = "Shift not found")
    )
)]
pub async fn get_shift(
    State(state): State<ShiftHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<ShiftDto>>, ApiError> {
    let shift = state.catalog.get_shift(&caller.identity, id).await?;
    Ok(Json(ApiResponse::success(shift.into())))
}

#[utoipa::path(
    post,
    path = "/api/shifts",
    tag = "Shifts",
    security(("bearer_auth" = [])),
    request_body = CreateShiftInput,
    responses(
        (status = 201, description = "Shift created", body = ApiResponse<ShiftDto>),
        (status = 400, description = "Invalid date, time or window"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn create_shift(
    State(state): State<ShiftHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
    ValidatedJson(input): ValidatedJson<CreateShiftInput>,
) -> Result<(StatusCode, Json<ApiResponse<ShiftDto>>), ApiError> {
    caller.identity.require(UserRole::Admin, "create shifts")?;
    let draft = input.into_draft()?;
    let shift = state.catalog.create_shift(&caller.identity, draft).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(shift.into()))))
}

#[utoipa::path(
    put,
    path = "/api/shifts/{id}",
    tag = "Shifts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Shift ID")),
    request_body = UpdateShiftInput,
    responses(
        (status = 200, description = "Shift updated", body = ApiResponse<ShiftDto>),
        (status = 400, description = "Invalid field or merged window"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Shift not found")
    )
)]
pub async fn update_shift(
    State(state): State<ShiftHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(input): ValidatedJson<UpdateShiftInput>,
) -> Result<Json<ApiResponse<ShiftDto>>, ApiError> {
    caller.identity.require(UserRole::Admin, "update shifts")?;
    let patch = input.into_patch()?;
    let shift = state.catalog.update_shift(&caller.identity, id, patch).await?;
    Ok(Json(ApiResponse::success(shift.into())))
}

#[utoipa::path(
    delete,
    path = "/api/shifts/{id}",
    tag = "Shifts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Shift ID")),
    responses(
        (status = 200, description = "Shift deleted", body = ApiResponse<EmptyData>),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Shift not found"),
        (status = 409, description = "Shift is referenced by requests or assignments")
    )
)]
pub async fn delete_shift(
    State(state): State<ShiftHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    state.catalog.delete_shift(&caller.identity, id).await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
