//! # Shiftdesk
//!
//! Shift scheduling service: admins publish shifts, workers request them,
//! admins approve or reject, and approval materializes an assignment.
//!
//! ## Architecture
//!
//! - **domain**: entities, the request state machine and repository traits
//! - **application**: identity resolution and the scheduling use cases
//! - **infrastructure**: SeaORM persistence and JWT
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: runtime bootstrap and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub use interfaces::http::{create_api_router, ApiState};
