/**
 * Column Handlers
 *
 * `/boards/{boardId}/columns` and `/boards/{boardId}/columns/{columnId}`.
 * `PUT /boards/{boardId}/columns` rewrites the column order.
 */
use axum::{extract::State, http::StatusCode, response::Json};
use uuid::Uuid;

use crate::backend::board::extract::{ApiJson, ApiPath};
use crate::backend::board::service::BoardService;
use crate::backend::board::types::{
    ColumnResponse, ColumnsResponse, CreateColumnRequest, MessageResponse, OrderResponse,
    ReorderColumnsRequest, UpdateColumnRequest,
};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// `POST /boards/{boardId}/columns`
pub async fn create_column(
    State(boards): State<BoardService>,
    auth: AuthUser,
    ApiPath(board_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CreateColumnRequest>,
) -> Result<(StatusCode, Json<ColumnResponse>), BackendError> {
    let column = boards.create_column(auth.user_id(), board_id, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ColumnResponse {
            message: Some("Column created successfully.".to_string()),
            column,
        }),
    ))
}

/// `GET /boards/{boardId}/columns`, in display order
pub async fn list_columns(
    State(boards): State<BoardService>,
    auth: AuthUser,
    ApiPath(board_id): ApiPath<Uuid>,
) -> Result<Json<ColumnsResponse>, BackendError> {
    let columns = boards.list_columns(auth.user_id(), board_id).await?;
    Ok(Json(ColumnsResponse { columns }))
}

/// `PUT /boards/{boardId}/columns`
pub async fn reorder_columns(
    State(boards): State<BoardService>,
    auth: AuthUser,
    ApiPath(board_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<ReorderColumnsRequest>,
) -> Result<Json<OrderResponse>, BackendError> {
    let board = boards.reorder_columns(auth.user_id(), board_id, request).await?;
    Ok(Json(OrderResponse {
        message: "Column order updated successfully.".to_string(),
        container_id: board.id,
        order: board.columns,
    }))
}

/// `GET /boards/{boardId}/columns/{columnId}`
pub async fn get_column(
    State(boards): State<BoardService>,
    auth: AuthUser,
    ApiPath((board_id, column_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<ColumnResponse>, BackendError> {
    let column = boards.get_column(auth.user_id(), board_id, column_id).await?;
    Ok(Json(ColumnResponse { message: None, column }))
}

/// `PUT /boards/{boardId}/columns/{columnId}`
pub async fn update_column(
    State(boards): State<BoardService>,
    auth: AuthUser,
    ApiPath((board_id, column_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(request): ApiJson<UpdateColumnRequest>,
) -> Result<Json<ColumnResponse>, BackendError> {
    let column = boards.update_column(auth.user_id(), board_id, column_id, request).await?;
    Ok(Json(ColumnResponse {
        message: Some("Column updated successfully.".to_string()),
        column,
    }))
}

/// `DELETE /boards/{boardId}/columns/{columnId}`
pub async fn delete_column(
    State(boards): State<BoardService>,
    auth: AuthUser,
    ApiPath((board_id, column_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, BackendError> {
    boards.delete_column(auth.user_id(), board_id, column_id).await?;
    Ok(Json(MessageResponse::new("Column and associated tasks deleted successfully.")))
}
