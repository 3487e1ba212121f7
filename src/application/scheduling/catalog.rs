//! Shift catalog
//!
//! Reads are open to any authenticated caller; writes are admin-only.

use std::sync::Arc;

use tracing::{info, warn};

use super::views::{compose_shifts, ShiftView};
use crate::application::identity::Identity;
use crate::domain::{
    DomainError, DomainResult, RepositoryProvider, ShiftDeletion, ShiftDraft, ShiftPatch,
    UserRole,
};

pub struct ShiftCatalog {
    repos: Arc<dyn RepositoryProvider>,
}

impl ShiftCatalog {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn get_shift(&self, _identity: &Identity, id: i32) -> DomainResult<ShiftView> {
        let shift = self
            .repos
            .shifts()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Shift", id))?;

        let mut views = compose_shifts(self.repos.as_ref(), vec![shift]).await?;
        views.pop().ok_or_else(|| DomainError::not_found("Shift", id))
    }

    /// Date descending, then start time ascending.
    pub async fn list_shifts(&self, _identity: &Identity) -> DomainResult<Vec<ShiftView>> {
        let shifts = self.repos.shifts().list().await?;
        compose_shifts(self.repos.as_ref(), shifts).await
    }

    pub async fn create_shift(&self, identity: &Identity, draft: ShiftDraft) -> DomainResult<ShiftView> {
        identity.require(UserRole::Admin, "create shifts")?;

        let shift = self.repos.shifts().create(draft).await?;
        info!(shift_id = shift.id, date = %shift.date, created_by = identity.user_id, "Shift created");

        Ok(ShiftView {
            shift,
            is_assigned: false,
            assignee_id: None,
            assignee: None,
        })
    }

    /// Partial update; the merged window is validated before anything is
    /// written.
    pub async fn update_shift(
        &self,
        identity: &Identity,
        id: i32,
        patch: ShiftPatch,
    ) -> DomainResult<ShiftView> {
        identity.require(UserRole::Admin, "update shifts")?;

        let shift = self
            .repos
            .shifts()
            .update(id, patch)
            .await?
            .ok_or_else(|| DomainError::not_found("Shift", id))?;
        info!(shift_id = id, updated_by = identity.user_id, "Shift updated");

        let mut views = compose_shifts(self.repos.as_ref(), vec![shift]).await?;
        views.pop().ok_or_else(|| DomainError::not_found("Shift", id))
    }

    /// Refuses to delete a shift that requests or assignments still point at.
    pub async fn delete_shift(&self, identity: &Identity, id: i32) -> DomainResult<()> {
        identity.require(UserRole::Admin, "delete shifts")?;

        match self.repos.shifts().delete(id).await? {
            ShiftDeletion::Deleted => {
                info!(shift_id = id, deleted_by = identity.user_id, "Shift deleted");
                Ok(())
            }
            ShiftDeletion::NotFound => Err(DomainError::not_found("Shift", id)),
            ShiftDeletion::Referenced {
                assignments,
                requests,
            } => {
                warn!(shift_id = id, assignments, requests, "Refusing to delete referenced shift");
                Err(DomainError::Conflict(format!(
                    "shift {} is referenced by {} assignment(s) and {} request(s)",
                    id, assignments, requests
                )))
            }
        }
    }
}
