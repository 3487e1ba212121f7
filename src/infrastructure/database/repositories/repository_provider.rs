//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{
    AssignmentRepository, RepositoryProvider, ShiftRepository, ShiftRequestRepository,
    UserRepository,
};

use super::assignment_repository::SeaOrmAssignmentRepository;
use super::shift_repository::SeaOrmShiftRepository;
use super::shift_request_repository::SeaOrmShiftRequestRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let shift = repos.shifts().find_by_id(1).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    shifts: SeaOrmShiftRepository,
    shift_requests: SeaOrmShiftRequestRepository,
    assignments: SeaOrmAssignmentRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            shifts: SeaOrmShiftRepository::new(db.clone()),
            shift_requests: SeaOrmShiftRequestRepository::new(db.clone()),
            assignments: SeaOrmAssignmentRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn shifts(&self) -> &dyn ShiftRepository {
        &self.shifts
    }

    fn shift_requests(&self) -> &dyn ShiftRequestRepository {
        &self.shift_requests
    }

    fn assignments(&self) -> &dyn AssignmentRepository {
        &self.assignments
    }
}
