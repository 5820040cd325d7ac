/**
 * Register Handler
 *
 * `POST /users/register`
 *
 * 1. Validate username, email and password length
 * 2. Reject an email that is already registered
 * 3. Hash the password with bcrypt and store the user
 */
use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::RegisterRequest;
use crate::backend::auth::sessions::IdentityProvider;
use crate::backend::board::extract::ApiJson;
use crate::backend::board::types::MessageResponse;
use crate::backend::error::BackendError;
use crate::backend::store::EntityStore;
use crate::shared::models::User;

pub async fn register(
    State(store): State<EntityStore>,
    State(identity): State<IdentityProvider>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), BackendError> {
    request.validate()?;

    if store.find_user_by_email(&request.email).await?.is_some() {
        tracing::warn!("[Auth] Registration rejected, email already in use: {}", request.email);
        return Err(BackendError::validation("email", "Email is already registered"));
    }

    let password_hash = identity.hash_password(&request.password)?;
    let user = User::new(request.username, &request.email, password_hash);
    store.save(&user).await?;

    tracing::info!("[Auth] Registered user {} ({})", user.id, user.email);
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}
