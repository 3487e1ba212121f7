//! Shift aggregate
//!
//! A shift is a schedulable slot: date, time window, role tag and location.

pub mod model;
pub mod repository;

pub use model::{Shift, ShiftDraft, ShiftPatch};
pub use repository::{ShiftDeletion, ShiftRepository};
