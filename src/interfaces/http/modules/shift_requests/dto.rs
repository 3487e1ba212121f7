//! Shift request DTOs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::ShiftRequestView;
use crate::domain::{DomainResult, ShiftRequestFilter};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateShiftRequestInput {
    #[validate(range(min = 1, message = "shift_id must be a positive id"))]
    pub shift_id: i32,
}

/// Optional filters, combined with AND.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShiftRequestQuery {
    /// `pending`, `approved` or `rejected`
    pub status: Option<String>,
    pub user_id: Option<i32>,
    pub shift_id: Option<i32>,
}

impl ShiftRequestQuery {
    pub fn into_filter(self) -> DomainResult<ShiftRequestFilter> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse()?),
        };
        Ok(ShiftRequestFilter {
            status,
            user_id: self.user_id,
            shift_id: self.shift_id,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShiftRequestDto {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub shift_id: i32,
    /// `pending`, `approved` or `rejected`
    pub status: String,
    #[schema(value_type = String, example = "2024-06-01")]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "17:00:00")]
    pub end_time: NaiveTime,
    pub requested_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl From<ShiftRequestView> for ShiftRequestDto {
    fn from(v: ShiftRequestView) -> Self {
        Self {
            id: v.id,
            user_id: v.user_id,
            user_name: v.user_name,
            shift_id: v.shift_id,
            status: v.status.as_str().to_string(),
            date: v.date,
            start_time: v.start_time,
            end_time: v.end_time,
            requested_at: v.requested_at,
            approved_at: v.approved_at,
        }
    }
}
