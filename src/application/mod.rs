//! Application layer: use-case orchestration over the domain repositories

pub mod identity;
pub mod scheduling;

pub use identity::{AuthResult, Identity, IdentityService};
pub use scheduling::{
    AssignmentService, AssignmentView, ShiftCatalog, ShiftRequestView, ShiftRequestWorkflow,
    ShiftView, WorkflowSettings,
};
