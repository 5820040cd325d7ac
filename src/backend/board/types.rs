/**
 * Board API Types
 *
 * Request bodies are decoded into these structs and validated with
 * `validate()` before the board service touches the store. Responses wrap
 * documents in the envelopes the browser client expects
 * (`{"board": ..}`, `{"columns": [..]}`, ...).
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use uuid::Uuid;

use crate::backend::ordering::OrderingError;
use crate::shared::error::require_text;
use crate::shared::models::{Board, Color, Column, Sequence, Task, TaskStatus};
use crate::shared::SharedError;

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`)
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn require_if_present(field: &str, value: &Option<String>) -> Result<(), SharedError> {
    match value {
        Some(value) => require_text(field, value),
        None => Ok(()),
    }
}

/// Check that `proposed` lists exactly the ids of `current`, in any order
pub fn ensure_permutation(proposed: &[Uuid], current: &[Uuid]) -> Result<(), OrderingError> {
    let mut seen = HashSet::with_capacity(proposed.len());
    if let Some(repeated) = proposed.iter().find(|id| !seen.insert(**id)) {
        return Err(OrderingError::invalid_sequence(format!("{} is listed twice", repeated)));
    }
    if let Some(missing) = current.iter().find(|id| !seen.contains(*id)) {
        return Err(OrderingError::invalid_sequence(format!("{} is missing", missing)));
    }
    Ok(())
}

// Boards

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub members: Vec<Uuid>,
}

impl CreateBoardRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_text("name", &self.name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoardRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub members: Option<Vec<Uuid>>,
}

impl UpdateBoardRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_if_present("name", &self.name)
    }
}

// Columns

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateColumnRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub color: Option<Color>,
}

impl CreateColumnRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_text("title", &self.title)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateColumnRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub color: Option<Option<Color>>,
}

impl UpdateColumnRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_if_present("title", &self.title)
    }
}

/// `PUT /boards/{boardId}/columns`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderColumnsRequest {
    pub columns: Vec<Uuid>,
    #[serde(default)]
    pub expected_version: Option<u64>,
}

// Tasks

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_to: Option<Uuid>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub color: Option<Color>,
}

impl CreateTaskRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        if self.due_date.is_none() {
            return Err(SharedError::validation("dueDate", "dueDate is required."));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to: Option<Option<Uuid>>,
    pub status: Option<TaskStatus>,
    pub color: Option<Color>,
}

impl UpdateTaskRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_if_present("title", &self.title)
    }
}

/// `PUT /boards/{boardId}/tasks/{taskId}/move`
///
/// `targetIndex` is kept raw so that negative and non-numeric values can be
/// reported as `InvalidIndex` rather than as a decoding failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskRequest {
    pub target_column_id: Uuid,
    #[serde(default)]
    pub target_index: Option<Value>,
}

/// `PUT /boards/{boardId}/columns/{columnId}/tasks/order`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderTasksRequest {
    pub tasks: Vec<Uuid>,
    #[serde(default)]
    pub expected_version: Option<u64>,
}

// Responses

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub board: Board,
}

#[derive(Debug, Serialize)]
pub struct BoardsResponse {
    pub boards: Vec<Board>,
}

#[derive(Debug, Serialize)]
pub struct ColumnResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub column: Column,
}

#[derive(Debug, Serialize)]
pub struct ColumnsResponse {
    pub columns: Vec<Column>,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub task: Task,
}

#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
}

/// Result of a column or task reorder
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub message: String,
    /// Board or column whose sequence changed
    pub container_id: Uuid,
    pub order: Sequence,
}

/// Result of a task move
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveOutcome {
    pub task: Task,
    pub source_column: Column,
    pub target_column: Column,
    pub target_index: usize,
}
