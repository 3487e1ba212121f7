use crate::domain::{DomainError, DomainResult, User, UserRole};

/// Resolved caller. The role comes from storage, never from the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i32,
    pub role: UserRole,
}

impl Identity {
    pub fn new(user_id: i32, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// Fail with `Forbidden` unless the caller holds `role`.
    pub fn require(&self, role: UserRole, action: &str) -> DomainResult<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "only {} users may {}",
                role, action
            )))
        }
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.role)
    }
}
