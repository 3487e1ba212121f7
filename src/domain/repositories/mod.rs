//! Repository access for the domain layer

use super::assignment::AssignmentRepository;
use super::shift::ShiftRepository;
use super::shift_request::ShiftRequestRepository;
use super::user::UserRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let shift = repos.shifts().find_by_id(7).await?;
///     let pending = repos.shift_requests().list(&ShiftRequestFilter::default()).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn shifts(&self) -> &dyn ShiftRepository;
    fn shift_requests(&self) -> &dyn ShiftRequestRepository;
    fn assignments(&self) -> &dyn AssignmentRepository;
}
