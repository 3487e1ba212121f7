use async_trait::async_trait;

use super::{Shift, ShiftDraft, ShiftPatch};
use crate::domain::DomainResult;

/// Outcome of a delete attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftDeletion {
    Deleted,
    NotFound,
    /// Still referenced; nothing was removed.
    Referenced { assignments: u64, requests: u64 },
}

#[async_trait]
pub trait ShiftRepository: Send + Sync {
    async fn create(&self, draft: ShiftDraft) -> DomainResult<Shift>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Shift>>;

    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Shift>>;

    /// All shifts, date descending then start time ascending.
    async fn list(&self) -> DomainResult<Vec<Shift>>;

    /// Merge `patch` into the stored shift and persist it in one transaction.
    /// Returns `None` when the shift does not exist. An invalid merged window
    /// rolls the transaction back.
    async fn update(&self, id: i32, patch: ShiftPatch) -> DomainResult<Option<Shift>>;

    async fn delete(&self, id: i32) -> DomainResult<ShiftDeletion>;
}
