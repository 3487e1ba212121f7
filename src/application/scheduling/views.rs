//! Read models composed from several repositories
//!
//! Lookups are batched per call. A reference that cannot be resolved means
//! the store is inconsistent and surfaces as `Storage`.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::domain::{
    current_assignments, Assignment, DomainError, DomainResult, RepositoryProvider, Shift,
    ShiftRequest, ShiftRequestStatus, User,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftRequestView {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub shift_id: i32,
    pub status: ShiftRequestStatus,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub requested_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftView {
    pub shift: Shift,
    pub is_assigned: bool,
    pub assignee_id: Option<i32>,
    /// Display name of the current assignee
    pub assignee: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentView {
    pub id: i32,
    pub shift_id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub assigned_at: DateTime<Utc>,
}

fn dangling(entity: &str, id: i32) -> DomainError {
    DomainError::Storage(format!("dangling reference to {} {}", entity, id))
}

fn unique(ids: impl Iterator<Item = i32>) -> Vec<i32> {
    let mut ids: Vec<i32> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

async fn users_by_id(
    repos: &dyn RepositoryProvider,
    ids: impl Iterator<Item = i32>,
) -> DomainResult<HashMap<i32, User>> {
    let users = repos.users().find_by_ids(&unique(ids)).await?;
    Ok(users.into_iter().map(|u| (u.id, u)).collect())
}

async fn shifts_by_id(
    repos: &dyn RepositoryProvider,
    ids: impl Iterator<Item = i32>,
) -> DomainResult<HashMap<i32, Shift>> {
    let shifts = repos.shifts().find_by_ids(&unique(ids)).await?;
    Ok(shifts.into_iter().map(|s| (s.id, s)).collect())
}

pub(crate) async fn compose_requests(
    repos: &dyn RepositoryProvider,
    requests: Vec<ShiftRequest>,
) -> DomainResult<Vec<ShiftRequestView>> {
    let users = users_by_id(repos, requests.iter().map(|r| r.user_id)).await?;
    let shifts = shifts_by_id(repos, requests.iter().map(|r| r.shift_id)).await?;

    requests
        .into_iter()
        .map(|r| {
            let user = users.get(&r.user_id).ok_or_else(|| dangling("user", r.user_id))?;
            let shift = shifts.get(&r.shift_id).ok_or_else(|| dangling("shift", r.shift_id))?;
            Ok(ShiftRequestView {
                id: r.id,
                user_id: r.user_id,
                user_name: user.name.clone(),
                shift_id: r.shift_id,
                status: r.status,
                date: shift.date,
                start_time: shift.start_time,
                end_time: shift.end_time,
                requested_at: r.requested_at,
                approved_at: r.approved_at,
            })
        })
        .collect()
}

pub(crate) async fn compose_request(
    repos: &dyn RepositoryProvider,
    request: ShiftRequest,
) -> DomainResult<ShiftRequestView> {
    let id = request.id;
    compose_requests(repos, vec![request])
        .await?
        .pop()
        .ok_or_else(|| dangling("shift request", id))
}

/// Assignments ordered by shift date then start time (ties: id).
pub(crate) async fn compose_assignments(
    repos: &dyn RepositoryProvider,
    assignments: Vec<Assignment>,
) -> DomainResult<Vec<AssignmentView>> {
    let users = users_by_id(repos, assignments.iter().map(|a| a.user_id)).await?;
    let shifts = shifts_by_id(repos, assignments.iter().map(|a| a.shift_id)).await?;

    let mut views = assignments
        .into_iter()
        .map(|a| {
            let user = users.get(&a.user_id).ok_or_else(|| dangling("user", a.user_id))?;
            let shift = shifts.get(&a.shift_id).ok_or_else(|| dangling("shift", a.shift_id))?;
            Ok(AssignmentView {
                id: a.id,
                shift_id: a.shift_id,
                user_id: a.user_id,
                user_name: user.name.clone(),
                date: shift.date,
                start_time: shift.start_time,
                end_time: shift.end_time,
                assigned_at: a.assigned_at,
            })
        })
        .collect::<DomainResult<Vec<_>>>()?;

    views.sort_by(|a, b| (a.date, a.start_time, a.id).cmp(&(b.date, b.start_time, b.id)));
    Ok(views)
}

/// Attach the current assignee to each shift, preserving input order.
pub(crate) async fn compose_shifts(
    repos: &dyn RepositoryProvider,
    shifts: Vec<Shift>,
) -> DomainResult<Vec<ShiftView>> {
    let ids: Vec<i32> = shifts.iter().map(|s| s.id).collect();
    let assignments = repos.assignments().list_for_shifts(&ids).await?;
    let current = current_assignments(&assignments);
    let users = users_by_id(repos, current.values().map(|a| a.user_id)).await?;

    shifts
        .into_iter()
        .map(|shift| {
            let assignee = match current.get(&shift.id) {
                Some(a) => {
                    let user = users.get(&a.user_id).ok_or_else(|| dangling("user", a.user_id))?;
                    Some((user.id, user.name.clone()))
                }
                None => None,
            };
            Ok(ShiftView {
                is_assigned: assignee.is_some(),
                assignee_id: assignee.as_ref().map(|(id, _)| *id),
                assignee: assignee.map(|(_, name)| name),
                shift,
            })
        })
        .collect()
}
