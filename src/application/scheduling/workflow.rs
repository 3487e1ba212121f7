//! Shift request workflow engine
//!
//! Every operation checks the caller's role before touching storage.
//! Decisions go through the repository's status-guarded transitions, so
//! the `pending -> approved | rejected` lifecycle holds under concurrency.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use super::views::{compose_request, compose_requests, ShiftRequestView};
use crate::application::identity::Identity;
use crate::domain::{
    DomainError, DomainResult, NewShiftRequest, RepositoryProvider, ShiftRequestFilter,
    ShiftRequestStatus, Transition, UserRole,
};

/// Tunables for the workflow
#[derive(Debug, Clone, Default)]
pub struct WorkflowSettings {
    /// Refuse a new request while the same worker already has a pending
    /// one for the same shift.
    pub reject_duplicate_pending: bool,
}

pub struct ShiftRequestWorkflow {
    repos: Arc<dyn RepositoryProvider>,
    settings: WorkflowSettings,
}

impl ShiftRequestWorkflow {
    pub fn new(repos: Arc<dyn RepositoryProvider>, settings: WorkflowSettings) -> Self {
        Self { repos, settings }
    }

    /// A worker asks to work `shift_id`.
    pub async fn create_request(
        &self,
        identity: &Identity,
        shift_id: i32,
    ) -> DomainResult<ShiftRequestView> {
        identity.require(UserRole::Worker, "request shifts")?;

        if self.repos.shifts().find_by_id(shift_id).await?.is_none() {
            return Err(DomainError::not_found("Shift", shift_id));
        }

        if self.settings.reject_duplicate_pending
            && self
                .repos
                .shift_requests()
                .has_pending(identity.user_id, shift_id)
                .await?
        {
            warn!(user_id = identity.user_id, shift_id, "Duplicate pending shift request refused");
            metrics::counter!("shift_request_conflicts_total").increment(1);
            return Err(DomainError::Conflict(format!(
                "a pending request for shift {} already exists",
                shift_id
            )));
        }

        let request = self
            .repos
            .shift_requests()
            .create(NewShiftRequest::new(identity.user_id, shift_id))
            .await
            .inspect_err(|e| error!(user_id = identity.user_id, shift_id, error = %e, "Failed to store shift request"))?;

        info!(
            request_id = request.id,
            user_id = request.user_id,
            shift_id,
            "Shift request created"
        );
        metrics::counter!("shift_requests_created_total").increment(1);

        compose_request(self.repos.as_ref(), request).await
    }

    /// Admin view of requests matching `filter`, newest first.
    pub async fn list_requests(
        &self,
        identity: &Identity,
        filter: &ShiftRequestFilter,
    ) -> DomainResult<Vec<ShiftRequestView>> {
        identity.require(UserRole::Admin, "list shift requests")?;

        let requests = self.repos.shift_requests().list(filter).await?;
        compose_requests(self.repos.as_ref(), requests).await
    }

    /// Approve a pending request and materialize its assignment atomically.
    pub async fn approve_request(
        &self,
        identity: &Identity,
        request_id: i32,
    ) -> DomainResult<ShiftRequestView> {
        identity.require(UserRole::Admin, "approve shift requests")?;

        let outcome = self
            .repos
            .shift_requests()
            .approve(request_id, Utc::now())
            .await
            .inspect_err(|e| error!(request_id, error = %e, "Approval rolled back"))?;

        let approval = self.settle(request_id, ShiftRequestStatus::Approved, outcome)?;

        info!(
            request_id,
            assignment_id = approval.assignment.id,
            shift_id = approval.assignment.shift_id,
            user_id = approval.assignment.user_id,
            approved_by = identity.user_id,
            "Shift request approved"
        );
        metrics::counter!("assignments_created_total").increment(1);

        compose_request(self.repos.as_ref(), approval.request).await
    }

    pub async fn reject_request(
        &self,
        identity: &Identity,
        request_id: i32,
    ) -> DomainResult<ShiftRequestView> {
        identity.require(UserRole::Admin, "reject shift requests")?;

        let outcome = self
            .repos
            .shift_requests()
            .reject(request_id)
            .await
            .inspect_err(|e| error!(request_id, error = %e, "Rejection failed"))?;

        let request = self.settle(request_id, ShiftRequestStatus::Rejected, outcome)?;
        info!(request_id, rejected_by = identity.user_id, "Shift request rejected");

        compose_request(self.repos.as_ref(), request).await
    }

    /// Log and count the outcome of a guarded transition.
    fn settle<T>(
        &self,
        request_id: i32,
        decision: ShiftRequestStatus,
        outcome: Transition<T>,
    ) -> DomainResult<T> {
        match &outcome {
            Transition::Applied(_) => {
                metrics::counter!("shift_requests_decided_total", "decision" => decision.as_str())
                    .increment(1);
            }
            Transition::NotFound => {
                warn!(request_id, %decision, "Shift request not found");
            }
            Transition::AlreadyDecided(current) => {
                debug_assert!(current.is_terminal());
                warn!(request_id, %decision, %current, "Shift request already decided");
                metrics::counter!("shift_request_conflicts_total").increment(1);
            }
        }
        outcome.into_result(request_id)
    }
}
