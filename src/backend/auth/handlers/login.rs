/**
 * Login Handler
 *
 * `POST /users/login`
 *
 * 1. Look up the user by (normalized) email
 * 2. Verify the password with bcrypt
 * 3. Issue an access/refresh token pair
 *
 * Unknown emails and wrong passwords produce the same 400 response.
 */
use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest, UserSummary};
use crate::backend::auth::sessions::IdentityProvider;
use crate::backend::board::extract::ApiJson;
use crate::backend::error::BackendError;
use crate::backend::store::EntityStore;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub async fn login(
    State(store): State<EntityStore>,
    State(identity): State<IdentityProvider>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let user = store.find_user_by_email(&request.email).await?.ok_or_else(|| {
        tracing::warn!("[Auth] Login for unknown email: {}", request.email);
        BackendError::validation("credentials", INVALID_CREDENTIALS)
    })?;

    if !identity.verify_password(&request.password, &user.password_hash)? {
        tracing::warn!("[Auth] Invalid password for user {}", user.id);
        return Err(BackendError::validation("credentials", INVALID_CREDENTIALS));
    }

    let session = identity.issue_session(&user)?;
    tracing::info!("[Auth] User logged in: {} ({})", user.username, user.email);

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        expires_at: session.expires_at,
        user: UserSummary::from(&user),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::User;
    use axum::http::StatusCode;

    async fn seeded() -> (EntityStore, IdentityProvider, User) {
        let store = EntityStore::memory();
        let identity = IdentityProvider::new("test-secret", 60, 120, 4);
        let hash = identity.hash_password("password123").unwrap();
        let user = User::new("alice", "alice@example.com", hash);
        store.save(&user).await.unwrap();
        (store, identity, user)
    }

    fn credentials(email: &str, password: &str) -> LoginRequest {
        LoginRequest { email: email.into(), password: password.into() }
    }

    #[tokio::test]
    async fn test_login_success() {
        let (store, identity, user) = seeded().await;
        let Json(response) = login(
            State(store),
            State(identity.clone()),
            ApiJson(credentials("Alice@Example.com", "password123")),
        )
        .await
        .unwrap();

        assert_eq!(response.message, "Login successful");
        assert_eq!(response.user.id, user.id.to_string());
        assert_eq!(identity.verify_session(&response.access_token).unwrap(), user.id);
        assert!(identity.verify_session(&response.refresh_token).is_err());
    }

    #[tokio::test]
    async fn test_login_invalid_password() {
        let (store, identity, _) = seeded().await;
        let err = login(State(store), State(identity), ApiJson(credentials("alice@example.com", "wrongpassword")))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_login_user_not_found() {
        let (store, identity, _) = seeded().await;
        let err = login(State(store), State(identity), ApiJson(credentials("bob@example.com", "password123")))
            .await
            .unwrap_err();
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }
}
