//! Assignment aggregate
//!
//! Binding of a user to a shift, materialized when a request is approved.

pub mod model;
pub mod repository;

pub use model::{current_assignments, Assignment, NewAssignment};
pub use repository::AssignmentRepository;
