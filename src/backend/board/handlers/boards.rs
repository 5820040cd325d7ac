/**
 * Board Handlers
 *
 * `/boards` and `/boards/{boardId}`. Every route sits behind
 * `auth_middleware`; ownership checks happen in `BoardService`.
 */
use axum::{extract::State, http::StatusCode, response::Json};
use uuid::Uuid;

use crate::backend::board::extract::{ApiJson, ApiPath};
use crate::backend::board::service::BoardService;
use crate::backend::board::types::{
    BoardResponse, BoardsResponse, CreateBoardRequest, MessageResponse, UpdateBoardRequest,
};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// `POST /boards`
pub async fn create_board(
    State(boards): State<BoardService>,
    auth: AuthUser,
    ApiJson(request): ApiJson<CreateBoardRequest>,
) -> Result<(StatusCode, Json<BoardResponse>), BackendError> {
    let board = boards.create_board(auth.user_id(), request).await?;
    Ok((
        StatusCode::CREATED,
        Json(BoardResponse {
            message: Some("Board created successfully.".to_string()),
            board,
        }),
    ))
}

/// `GET /boards`
pub async fn list_boards(
    State(boards): State<BoardService>,
    auth: AuthUser,
) -> Result<Json<BoardsResponse>, BackendError> {
    let boards = boards.list_boards(auth.user_id()).await?;
    Ok(Json(BoardsResponse { boards }))
}

/// `GET /boards/{boardId}`
pub async fn get_board(
    State(boards): State<BoardService>,
    auth: AuthUser,
    ApiPath(board_id): ApiPath<Uuid>,
) -> Result<Json<BoardResponse>, BackendError> {
    let board = boards.get_board(auth.user_id(), board_id).await?;
    Ok(Json(BoardResponse { message: None, board }))
}

/// `PUT /boards/{boardId}`
pub async fn update_board(
    State(boards): State<BoardService>,
    auth: AuthUser,
    ApiPath(board_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateBoardRequest>,
) -> Result<Json<BoardResponse>, BackendError> {
    let board = boards.update_board(auth.user_id(), board_id, request).await?;
    Ok(Json(BoardResponse {
        message: Some("Board updated successfully.".to_string()),
        board,
    }))
}

/// `DELETE /boards/{boardId}`
pub async fn delete_board(
    State(boards): State<BoardService>,
    auth: AuthUser,
    ApiPath(board_id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, BackendError> {
    boards.delete_board(auth.user_id(), board_id).await?;
    Ok(Json(MessageResponse::new("Board deleted successfully.")))
}
