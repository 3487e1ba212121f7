//! Authentication middleware for Axum
//!
//! Resolves `Authorization: Bearer <jwt>` to a stored user before any
//! protected handler runs. Failures answer `401` in the standard envelope.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::application::{Identity, IdentityService};
use crate::domain::DomainError;
use crate::interfaces::http::common::ApiError;

/// Authentication state
#[derive(Clone)]
pub struct AuthState {
    pub identity: IdentityService,
}

/// Caller resolved by [`auth_middleware`], available to handlers through
/// `Extension<AuthenticatedUser>`.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub identity: Identity,
    pub name: String,
    pub email: String,
}

fn extract_token(auth_header: &str) -> Option<&str> {
    let (scheme, token) = auth_header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn unauthenticated(message: &str) -> Response {
    ApiError(DomainError::Unauthenticated(message.to_string())).into_response()
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return unauthenticated("missing authentication token");
    };

    let Some(token) = extract_token(auth_header) else {
        return unauthenticated("expected a Bearer token");
    };

    match auth_state.identity.resolve(token).await {
        Ok((identity, user)) => {
            tracing::debug!(user_id = identity.user_id, role = %identity.role, "Authenticated");
            request.extensions_mut().insert(AuthenticatedUser {
                identity,
                name: user.name,
                email: user.email,
            });
            next.run(request).await
        }
        Err(e) => ApiError(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_extraction() {
        assert_eq!(extract_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_token("bearer abc"), Some("abc"));
        assert_eq!(extract_token("Basic abc"), None);
        assert_eq!(extract_token("Bearer "), None);
        assert_eq!(extract_token("Bearer"), None);
    }
}
