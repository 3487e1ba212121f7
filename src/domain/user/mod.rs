//! User aggregate
//!
//! Users are owned by the identity subsystem; the scheduling workflow only
//! reads them.

pub mod model;
pub mod repository;

pub use model::{NewUser, User, UserRole};
pub use repository::UserRepository;
