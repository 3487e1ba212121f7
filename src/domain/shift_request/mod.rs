//! Shift request aggregate
//!
//! A worker's bid for a shift. The status only ever moves
//! `pending -> approved` or `pending -> rejected`.

pub mod model;
pub mod repository;

pub use model::{
    Approval, NewShiftRequest, ShiftRequest, ShiftRequestFilter, ShiftRequestStatus, Transition,
};
pub use repository::ShiftRequestRepository;
