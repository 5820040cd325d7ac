/**
 * Task Handlers
 *
 * Task CRUD lives under `/boards/{boardId}/columns/{columnId}/tasks`.
 * Moves are addressed by task alone (`/boards/{boardId}/tasks/{taskId}/move`)
 * since the source column is whatever the task currently names.
 */
use axum::{extract::State, http::StatusCode, response::Json};
use uuid::Uuid;

use crate::backend::board::extract::{ApiJson, ApiPath};
use crate::backend::board::service::BoardService;
use crate::backend::board::types::{
    CreateTaskRequest, MessageResponse, MoveOutcome, MoveTaskRequest, OrderResponse,
    ReorderTasksRequest, TaskResponse, TasksResponse, UpdateTaskRequest,
};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// `POST /boards/{boardId}/columns/{columnId}/tasks`
pub async fn create_task(
    State(boards): State<BoardService>,
    auth: AuthUser,
    ApiPath((board_id, column_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(request): ApiJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), BackendError> {
    let task = boards.create_task(auth.user_id(), board_id, column_id, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(TaskResponse {
            message: Some("Task created successfully.".to_string()),
            task,
        }),
    ))
}

/// `GET /boards/{boardId}/columns/{columnId}/tasks`, in display order
pub async fn list_tasks(
    State(boards): State<BoardService>,
    auth: AuthUser,
    ApiPath((board_id, column_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<TasksResponse>, BackendError> {
    let tasks = boards.list_tasks(auth.user_id(), board_id, column_id).await?;
    Ok(Json(TasksResponse { tasks }))
}

/// `PUT /boards/{boardId}/columns/{columnId}/tasks/order`
pub async fn reorder_tasks(
    State(boards): State<BoardService>,
    auth: AuthUser,
    ApiPath((board_id, column_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(request): ApiJson<ReorderTasksRequest>,
) -> Result<Json<OrderResponse>, BackendError> {
    let column = boards.reorder_tasks(auth.user_id(), board_id, column_id, request).await?;
    Ok(Json(OrderResponse {
        message: "Task order updated successfully.".to_string(),
        container_id: column.id,
        order: column.tasks,
    }))
}

/// `GET /boards/{boardId}/columns/{columnId}/tasks/{taskId}`
pub async fn get_task(
    State(boards): State<BoardService>,
    auth: AuthUser,
    ApiPath((board_id, column_id, task_id)): ApiPath<(Uuid, Uuid, Uuid)>,
) -> Result<Json<TaskResponse>, BackendError> {
    let task = boards.get_task(auth.user_id(), board_id, column_id, task_id).await?;
    Ok(Json(TaskResponse { message: None, task }))
}

/// `PUT /boards/{boardId}/columns/{columnId}/tasks/{taskId}`
pub async fn update_task(
    State(boards): State<BoardService>,
    auth: AuthUser,
    ApiPath((board_id, column_id, task_id)): ApiPath<(Uuid, Uuid, Uuid)>,
    ApiJson(request): ApiJson<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, BackendError> {
    let task = boards
        .update_task(auth.user_id(), board_id, column_id, task_id, request)
        .await?;
    Ok(Json(TaskResponse {
        message: Some("Task updated successfully.".to_string()),
        task,
    }))
}

/// `DELETE /boards/{boardId}/columns/{columnId}/tasks/{taskId}`
pub async fn delete_task(
    State(boards): State<BoardService>,
    auth: AuthUser,
    ApiPath((board_id, column_id, task_id)): ApiPath<(Uuid, Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, BackendError> {
    boards.delete_task(auth.user_id(), board_id, column_id, task_id).await?;
    Ok(Json(MessageResponse::new("Task deleted successfully.")))
}

/// `PUT /boards/{boardId}/tasks/{taskId}/move`
pub async fn move_task(
    State(boards): State<BoardService>,
    auth: AuthUser,
    ApiPath((board_id, task_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(request): ApiJson<MoveTaskRequest>,
) -> Result<Json<MoveOutcome>, BackendError> {
    let outcome = boards.move_task(auth.user_id(), board_id, task_id, request).await?;
    Ok(Json(outcome))
}
