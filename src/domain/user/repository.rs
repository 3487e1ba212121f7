use async_trait::async_trait;

use super::{NewUser, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. A duplicate email is reported as `Conflict`.
    async fn create(&self, user: NewUser) -> DomainResult<User>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Batch lookup used when composing views. Missing ids are simply absent.
    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<User>>;

    async fn count(&self) -> DomainResult<u64>;
}
