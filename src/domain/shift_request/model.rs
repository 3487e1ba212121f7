//! Shift request domain entity and its state machine

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::assignment::Assignment;
use crate::domain::DomainError;

/// Shift request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftRequestStatus {
    /// Awaiting an admin decision
    Pending,
    /// Approved; an assignment was materialized
    Approved,
    /// Rejected; no side effects
    Rejected,
}

impl ShiftRequestStatus {
    pub const ALL: [ShiftRequestStatus; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn can_transition_to(&self, next: ShiftRequestStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }

    /// Every status from which `next` may be entered. Storage guards its
    /// updates with this set.
    pub fn sources_of(next: ShiftRequestStatus) -> Vec<ShiftRequestStatus> {
        Self::ALL
            .into_iter()
            .filter(|s| s.can_transition_to(next))
            .collect()
    }
}

impl FromStr for ShiftRequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::InvalidInput(format!(
                "unknown status '{other}', expected pending, approved or rejected"
            ))),
        }
    }
}

impl fmt::Display for ShiftRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftRequest {
    pub id: i32,
    pub user_id: i32,
    pub shift_id: i32,
    pub status: ShiftRequestStatus,
    pub requested_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewShiftRequest {
    pub user_id: i32,
    pub shift_id: i32,
    pub requested_at: DateTime<Utc>,
}

impl NewShiftRequest {
    pub fn new(user_id: i32, shift_id: i32) -> Self {
        Self {
            user_id,
            shift_id,
            requested_at: Utc::now(),
        }
    }
}

/// Conjunctive filter; `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftRequestFilter {
    pub status: Option<ShiftRequestStatus>,
    pub user_id: Option<i32>,
    pub shift_id: Option<i32>,
}

/// Result of a guarded status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<T> {
    Applied(T),
    NotFound,
    /// The request is in a terminal status.
    AlreadyDecided(ShiftRequestStatus),
}

impl<T> Transition<T> {
    /// Collapse into a result, mapping refusals to `NotFound` / `Conflict`.
    pub fn into_result(self, request_id: i32) -> Result<T, DomainError> {
        match self {
            Transition::Applied(value) => Ok(value),
            Transition::NotFound => Err(DomainError::not_found("ShiftRequest", request_id)),
            Transition::AlreadyDecided(status) => Err(DomainError::Conflict(format!(
                "shift request {request_id} is already {status}"
            ))),
        }
    }
}

/// An approved request together with the assignment it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approval {
    pub request: ShiftRequest,
    pub assignment: Assignment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_can_move() {
        use ShiftRequestStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        for terminal in [Approved, Rejected] {
            assert!(terminal.is_terminal());
            for next in [Pending, Approved, Rejected] {
                assert!(!terminal.can_transition_to(next));
            }
        }
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn decisions_are_entered_only_from_pending() {
        use ShiftRequestStatus::*;
        assert_eq!(ShiftRequestStatus::sources_of(Approved), vec![Pending]);
        assert_eq!(ShiftRequestStatus::sources_of(Rejected), vec![Pending]);
        assert!(ShiftRequestStatus::sources_of(Pending).is_empty());
    }

    #[test]
    fn status_parse_roundtrip() {
        for status in [
            ShiftRequestStatus::Pending,
            ShiftRequestStatus::Approved,
            ShiftRequestStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<ShiftRequestStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_invalid_input() {
        let err = "cancelled".parse::<ShiftRequestStatus>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn transition_maps_refusals() {
        let applied: Transition<u8> = Transition::Applied(7);
        assert_eq!(applied.into_result(1).unwrap(), 7);

        let missing: Transition<u8> = Transition::NotFound;
        assert!(matches!(missing.into_result(1), Err(DomainError::NotFound { .. })));

        let decided: Transition<u8> = Transition::AlreadyDecided(ShiftRequestStatus::Rejected);
        match decided.into_result(1) {
            Err(DomainError::Conflict(msg)) => assert!(msg.contains("rejected")),
            other => panic!("expected conflict, got {other:?}"),
        }
    }
}
