/**
 * Profile Handlers
 *
 * `GET|PUT|DELETE /users/profile` for the authenticated caller.
 * Deleting an account also deletes the boards it created, removes it from
 * other boards and unassigns its tasks.
 */
use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{ProfileResponse, UpdateProfileRequest, UserResponse};
use crate::backend::board::extract::ApiJson;
use crate::backend::board::service::BoardService;
use crate::backend::board::types::MessageResponse;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::store::EntityStore;
use crate::shared::models::user::normalize_email;
use crate::shared::models::User;

async fn current_user(store: &EntityStore, auth: &AuthUser) -> Result<User, BackendError> {
    store
        .get::<User>(auth.user_id())
        .await?
        .ok_or_else(|| BackendError::not_found("User", auth.user_id()))
}

pub async fn get_profile(
    State(store): State<EntityStore>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, BackendError> {
    let user = current_user(&store, &auth).await?;
    Ok(Json(UserResponse::from(&user)))
}

pub async fn update_profile(
    State(store): State<EntityStore>,
    auth: AuthUser,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, BackendError> {
    request.validate()?;
    let mut user = current_user(&store, &auth).await?;

    if let Some(email) = request.email {
        let email = normalize_email(&email);
        if email != user.email {
            if let Some(other) = store.find_user_by_email(&email).await? {
                if other.id != user.id {
                    tracing::warn!("[Auth] {} tried to take email {}", user.id, email);
                    return Err(BackendError::validation("email", "Email is already registered"));
                }
            }
            user.email = email;
        }
    }
    if let Some(username) = request.username {
        user.username = username.trim().to_string();
    }
    if let Some(avatar) = request.avatar {
        user.avatar = avatar;
    }
    user.touch();
    store.save(&user).await?;

    tracing::info!("[Auth] Updated profile of {}", user.id);
    Ok(Json(ProfileResponse {
        message: "User profile updated successfully".to_string(),
        user: UserResponse::from(&user),
    }))
}

pub async fn delete_profile(
    State(boards): State<BoardService>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, BackendError> {
    boards.delete_user(auth.user_id()).await?;
    Ok(Json(MessageResponse::new("User account deleted successfully")))
}
