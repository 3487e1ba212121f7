//! Database entities module

pub mod assignment;
pub mod shift;
pub mod shift_request;
pub mod user;

pub use assignment::Entity as Assignment;
pub use shift::Entity as Shift;
pub use shift_request::Entity as ShiftRequest;
pub use user::Entity as User;
