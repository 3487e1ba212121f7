//! Identity module: token resolution, login and user management
//!
//! `Identity` is the explicit caller context threaded into every
//! scheduling operation.

pub mod context;
pub mod service;

pub use context::Identity;
pub use service::{AuthResult, IdentityService};
