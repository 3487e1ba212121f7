//! Assignment listing and admin maintenance
//!
//! Approval is the normal way an assignment comes to exist; the manual
//! create here is an admin escape hatch.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::views::{compose_assignments, AssignmentView};
use crate::application::identity::Identity;
use crate::domain::{DomainError, DomainResult, NewAssignment, RepositoryProvider, UserRole};

pub struct AssignmentService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AssignmentService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list_assignments(&self, _identity: &Identity) -> DomainResult<Vec<AssignmentView>> {
        let assignments = self.repos.assignments().list().await?;
        compose_assignments(self.repos.as_ref(), assignments).await
    }

    pub async fn create_assignment(
        &self,
        identity: &Identity,
        shift_id: i32,
        user_id: i32,
    ) -> DomainResult<AssignmentView> {
        identity.require(UserRole::Admin, "create assignments")?;
        self.ensure_shift(shift_id).await?;
        self.ensure_user(user_id).await?;

        let assignment = self
            .repos
            .assignments()
            .create(NewAssignment::new(shift_id, user_id))
            .await?;
        info!(assignment_id = assignment.id, shift_id, user_id, "Assignment created manually");
        metrics::counter!("assignments_created_total").increment(1);

        self.view(assignment).await
    }

    /// Re-point an assignment at another user.
    pub async fn reassign(
        &self,
        identity: &Identity,
        id: i32,
        user_id: i32,
    ) -> DomainResult<AssignmentView> {
        identity.require(UserRole::Admin, "update assignments")?;
        self.ensure_user(user_id).await?;

        let assignment = self
            .repos
            .assignments()
            .reassign(id, user_id, Utc::now())
            .await?
            .ok_or_else(|| DomainError::not_found("Assignment", id))?;
        info!(assignment_id = id, user_id, updated_by = identity.user_id, "Assignment re-pointed");

        self.view(assignment).await
    }

    async fn view(&self, assignment: crate::domain::Assignment) -> DomainResult<AssignmentView> {
        let id = assignment.id;
        compose_assignments(self.repos.as_ref(), vec![assignment])
            .await?
            .pop()
            .ok_or_else(|| DomainError::not_found("Assignment", id))
    }

    async fn ensure_shift(&self, id: i32) -> DomainResult<()> {
        match self.repos.shifts().find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Shift", id)),
        }
    }

    async fn ensure_user(&self, id: i32) -> DomainResult<()> {
        match self.repos.users().find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("User", id)),
        }
    }
}
