//! Scheduling use-cases
//!
//! - `workflow`: shift-request lifecycle (create / list / approve / reject)
//! - `catalog`: shift CRUD with current-assignee views
//! - `assignments`: assignment listing and admin maintenance
//! - `views`: read models joined with user and shift data

pub mod assignments;
pub mod catalog;
pub mod views;
pub mod workflow;

pub use assignments::AssignmentService;
pub use catalog::ShiftCatalog;
pub use views::{AssignmentView, ShiftRequestView, ShiftView};
pub use workflow::{ShiftRequestWorkflow, WorkflowSettings};
