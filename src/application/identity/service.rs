//! Identity service: application-layer orchestration
//!
//! HTTP handlers and the auth middleware are thin wrappers around this.

use std::sync::Arc;

use tracing::{info, warn};

use super::Identity;
use crate::domain::{DomainError, DomainResult, NewUser, RepositoryProvider, User, UserRole};
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Clone)]
pub struct IdentityService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
}

impl IdentityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self { repos, jwt_config }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Authentication ──────────────────────────────────────────

    /// Resolve a bearer token to the stored user.
    ///
    /// Any failure (bad signature, expired, malformed subject, user gone)
    /// is `Unauthenticated`.
    pub async fn resolve(&self, token: &str) -> DomainResult<(Identity, User)> {
        let claims = verify_token(token, &self.jwt_config).map_err(|e| {
            warn!(error = %e, "Rejected bearer token");
            DomainError::Unauthenticated("invalid or expired token".into())
        })?;

        let user_id = claims
            .user_id()
            .ok_or_else(|| DomainError::Unauthenticated("malformed token subject".into()))?;

        let user = self
            .repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::Unauthenticated("user no longer exists".into()))?;

        Ok((Identity::from(&user), user))
    }

    /// Identify a user by email and issue a token. No password is involved.
    pub async fn login(&self, email: &str) -> DomainResult<AuthResult> {
        let email = normalize_email(email);
        let Some(user) = self.repos.users().find_by_email(&email).await? else {
            warn!(%email, "Login attempt for unknown email");
            return Err(DomainError::Unauthenticated("invalid credentials".into()));
        };

        let token = self.issue_token(&user)?;
        info!(user_id = user.id, role = %user.role, "User logged in");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expires_in_secs(),
            user,
        })
    }

    pub fn issue_token(&self, user: &User) -> DomainResult<String> {
        create_token(user.id, &user.email, &self.jwt_config)
            .map_err(|e| DomainError::Internal(format!("failed to sign token: {}", e)))
    }

    // ── Users ───────────────────────────────────────────────────

    pub async fn current_user(&self, identity: &Identity) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(identity.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", identity.user_id))
    }

    /// Admin-only. Duplicate emails are `Conflict`.
    pub async fn create_user(
        &self,
        identity: &Identity,
        name: &str,
        email: &str,
        role: UserRole,
    ) -> DomainResult<User> {
        identity.require(UserRole::Admin, "create users")?;

        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidInput("name must not be empty".into()));
        }

        let user = self
            .repos
            .users()
            .create(NewUser {
                name: name.to_string(),
                email: normalize_email(email),
                role,
            })
            .await?;

        info!(user_id = user.id, role = %user.role, created_by = identity.user_id, "User created");
        Ok(user)
    }

    /// Create the first admin when the users table is empty.
    pub async fn ensure_bootstrap_admin(&self, name: &str, email: &str) -> DomainResult<Option<User>> {
        if self.repos.users().count().await? > 0 {
            return Ok(None);
        }

        let user = self
            .repos
            .users()
            .create(NewUser {
                name: name.to_string(),
                email: normalize_email(email),
                role: UserRole::Admin,
            })
            .await?;

        info!(user_id = user.id, email = %user.email, "Bootstrap admin created");
        Ok(Some(user))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}
