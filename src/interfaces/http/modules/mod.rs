pub mod assignments;
pub mod auth;
pub mod health;
pub mod metrics;
pub mod request_id;
pub mod shift_requests;
pub mod shifts;
pub mod users;
