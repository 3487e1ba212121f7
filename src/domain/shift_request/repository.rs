use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Approval, NewShiftRequest, ShiftRequest, ShiftRequestFilter, Transition};
use crate::domain::DomainResult;

#[async_trait]
pub trait ShiftRequestRepository: Send + Sync {
    async fn create(&self, request: NewShiftRequest) -> DomainResult<ShiftRequest>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ShiftRequest>>;

    /// Matching requests, newest `requested_at` first (ties: id descending).
    async fn list(&self, filter: &ShiftRequestFilter) -> DomainResult<Vec<ShiftRequest>>;

    async fn has_pending(&self, user_id: i32, shift_id: i32) -> DomainResult<bool>;

    /// Move a pending request to `approved` and insert its assignment, both
    /// in one transaction. Nothing is written unless both succeed.
    async fn approve(&self, id: i32, at: DateTime<Utc>) -> DomainResult<Transition<Approval>>;

    /// Move a pending request to `rejected`.
    async fn reject(&self, id: i32) -> DomainResult<Transition<ShiftRequest>>;
}
