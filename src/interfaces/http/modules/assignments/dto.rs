//! Assignment DTOs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::AssignmentView;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssignmentDto {
    pub id: i32,
    pub shift_id: i32,
    pub user_id: i32,
    pub user_name: String,
    #[schema(value_type = String, example = "2024-06-01")]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "17:00:00")]
    pub end_time: NaiveTime,
    pub assigned_at: DateTime<Utc>,
}

impl From<AssignmentView> for AssignmentDto {
    fn from(v: AssignmentView) -> Self {
        Self {
            id: v.id,
            shift_id: v.shift_id,
            user_id: v.user_id,
            user_name: v.user_name,
            date: v.date,
            start_time: v.start_time,
            end_time: v.end_time,
            assigned_at: v.assigned_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAssignmentInput {
    #[validate(range(min = 1))]
    pub shift_id: i32,
    #[validate(range(min = 1))]
    pub user_id: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAssignmentInput {
    /// New assignee
    #[validate(range(min = 1))]
    pub user_id: i32,
}
