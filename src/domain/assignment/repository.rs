use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Assignment, NewAssignment};
use crate::domain::DomainResult;

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Always inserts a new row.
    async fn create(&self, assignment: NewAssignment) -> DomainResult<Assignment>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Assignment>>;

    async fn list(&self) -> DomainResult<Vec<Assignment>>;

    async fn list_for_shifts(&self, shift_ids: &[i32]) -> DomainResult<Vec<Assignment>>;

    /// Point the assignment at another user and refresh `assigned_at`.
    async fn reassign(
        &self,
        id: i32,
        user_id: i32,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<Assignment>>;
}
