//! Shift DTOs
//!
//! Dates travel as `YYYY-MM-DD`, times as `HH:MM` or `HH:MM:SS`. Inputs
//! are strings so malformed values get a precise 400.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::ShiftView;
use crate::domain::{DomainResult, ShiftDraft, ShiftPatch};
use crate::shared::time::{parse_date, parse_time};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShiftDto {
    pub id: i32,
    #[schema(value_type = String, example = "2024-06-01")]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "17:00:00")]
    pub end_time: NaiveTime,
    pub role: String,
    pub location: String,
    pub is_assigned: bool,
    /// Display name of the current assignee
    pub assignee: Option<String>,
    pub assignee_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<ShiftView> for ShiftDto {
    fn from(v: ShiftView) -> Self {
        Self {
            id: v.shift.id,
            date: v.shift.date,
            start_time: v.shift.start_time,
            end_time: v.shift.end_time,
            role: v.shift.role,
            location: v.shift.location,
            is_assigned: v.is_assigned,
            assignee: v.assignee,
            assignee_id: v.assignee_id,
            created_at: v.shift.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateShiftInput {
    #[schema(example = "2024-06-01")]
    pub date: String,
    #[schema(example = "09:00")]
    pub start_time: String,
    #[schema(example = "17:00")]
    pub end_time: String,
    #[validate(length(min = 1, max = 100, message = "role must be 1-100 characters"))]
    pub role: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "location must be at most 200 characters"))]
    pub location: String,
}

impl CreateShiftInput {
    pub fn into_draft(self) -> DomainResult<ShiftDraft> {
        ShiftDraft::new(
            parse_date("date", &self.date)?,
            parse_time("start_time", &self.start_time)?,
            parse_time("end_time", &self.end_time)?,
            self.role,
            self.location,
        )
    }
}

/// Partial update; omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateShiftInput {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[validate(length(min = 1, max = 100, message = "role must be 1-100 characters"))]
    pub role: Option<String>,
    #[validate(length(max = 200, message = "location must be at most 200 characters"))]
    pub location: Option<String>,
}

impl UpdateShiftInput {
    pub fn into_patch(self) -> DomainResult<ShiftPatch> {
        Ok(ShiftPatch {
            date: self.date.as_deref().map(|d| parse_date("date", d)).transpose()?,
            start_time: self
                .start_time
                .as_deref()
                .map(|t| parse_time("start_time", t))
                .transpose()?,
            end_time: self
                .end_time
                .as_deref()
                .map(|t| parse_time("end_time", t))
                .transpose()?,
            role: self.role,
            location: self.location,
        })
    }
}
