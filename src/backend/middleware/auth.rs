/**
 * Authentication Middleware
 *
 * Protects routes that require a signed-in user. The bearer token is
 * verified, the user it names must still exist, and the resulting
 * `AuthenticatedUser` is attached to the request extensions for handlers.
 *
 * - no `Authorization: Bearer` header → 401 "Unauthorized: No token provided"
 * - bad signature, expired, or refresh token → 401 "Unauthorized: Invalid token"
 * - token for a deleted user → 401 "Unauthorized: User not found"
 */
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::AuthError;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::models::User;

/// Authenticated user data extracted from the access token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Authentication middleware
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(&request).ok_or_else(|| {
        tracing::warn!("[Auth] Missing bearer token for {}", request.uri().path());
        AuthError::MissingToken
    })?;

    let user_id = app_state.identity.verify_session(token).map_err(|e| {
        tracing::warn!("[Auth] Invalid token: {}", token_failure(&e));
        e
    })?;

    if !app_state.store.exists::<User>(user_id).await? {
        tracing::warn!("[Auth] Token names unknown user {}", user_id);
        return Err(AuthError::UnknownUser.into());
    }

    request.extensions_mut().insert(AuthenticatedUser { user_id });
    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn token_failure(err: &AuthError) -> String {
    match err {
        AuthError::InvalidToken(detail) => detail.clone(),
        other => other.to_string(),
    }
}

/// Axum extractor for the authenticated user set by `auth_middleware`
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl AuthUser {
    pub fn user_id(&self) -> Uuid {
        self.0.user_id
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<AuthenticatedUser>().cloned().ok_or_else(|| {
            tracing::warn!("[Auth] AuthenticatedUser not found in request extensions");
            AuthError::MissingToken
        })?;
        Ok(AuthUser(user))
    }
}
