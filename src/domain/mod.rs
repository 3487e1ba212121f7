//! Domain layer
//!
//! One module per aggregate (model + repository trait). Nothing in here
//! knows about SeaORM or axum.

pub mod assignment;
pub mod repositories;
pub mod shift;
pub mod shift_request;
pub mod user;

pub use assignment::{current_assignments, Assignment, AssignmentRepository, NewAssignment};
pub use repositories::RepositoryProvider;
pub use shift::{Shift, ShiftDeletion, ShiftDraft, ShiftPatch, ShiftRepository};
pub use shift_request::{
    Approval, NewShiftRequest, ShiftRequest, ShiftRequestFilter, ShiftRequestRepository,
    ShiftRequestStatus, Transition,
};
pub use user::{NewUser, User, UserRepository, UserRole};

pub use crate::shared::errors::{DomainError, DomainResult};
