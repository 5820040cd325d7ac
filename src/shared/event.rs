/**
 * Real-time Event System
 *
 * This module defines the event taxonomy of the fan-out channel and the
 * frame format spoken over the WebSocket.
 *
 * # Wire Format
 *
 * Every frame, in both directions, is a JSON object:
 *
 * ```json
 * {"event": "taskUpdated", "data": {"columnId": "...", "taskId": "...", "action": "deleted"}}
 * ```
 *
 * # Outbound Events
 *
 * Only three event names are ever sent to clients: `taskUpdated`,
 * `columnUpdated` and `boardUpdated`. Client-originated events are renamed
 * to one of these before rebroadcast (see [`ClientEventKind`]); events
 * produced by the mutation service carry an `action` field describing the
 * change.
 *
 * Events are hints. There is no ordering guarantee beyond transport order and
 * no deduplication, so receivers should re-fetch or merge optimistically.
 */
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::shared::models::{Board, Column, Sequence, Task};

/// Name of an event delivered to connected sessions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    /// A task was created, edited, moved, deleted or a column's task order changed
    TaskUpdated,
    /// A column was created, edited, deleted or a board's column order changed
    ColumnUpdated,
    /// Any board-level delta
    BoardUpdated,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::TaskUpdated => "taskUpdated",
            EventType::ColumnUpdated => "columnUpdated",
            EventType::BoardUpdated => "boardUpdated",
        }
    }
}

/// One frame on the WebSocket, in either direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFrame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

/// Real-time event that can be broadcast to all sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeEvent {
    /// Type of event
    pub event_type: EventType,
    /// Event payload (JSON-serializable data)
    pub payload: Value,
    /// Timestamp when event occurred
    pub timestamp: String,
    /// Session identity that produced the event, `None` for server mutations
    pub origin: Option<String>,
}

impl RealtimeEvent {
    /// Create a new real-time event
    pub fn new(event_type: EventType, payload: Value) -> Self {
        Self {
            event_type,
            payload,
            timestamp: chrono::Utc::now().to_rfc3339(),
            origin: None,
        }
    }

    pub fn task_updated(payload: Value) -> Self {
        Self::new(EventType::TaskUpdated, payload)
    }

    pub fn column_updated(payload: Value) -> Self {
        Self::new(EventType::ColumnUpdated, payload)
    }

    pub fn board_updated(payload: Value) -> Self {
        Self::new(EventType::BoardUpdated, payload)
    }

    /// Tag the event with the session that sent it
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// The `{event, data}` frame delivered to clients
    pub fn to_frame(&self) -> WireFrame {
        WireFrame {
            event: self.event_type.as_str().to_string(),
            data: self.payload.clone(),
        }
    }

    // Server-originated events

    pub fn task_created(task: &Task) -> Self {
        Self::task_updated(json!({ "columnId": task.column_id, "task": task, "action": "created" }))
    }

    pub fn task_edited(task: &Task) -> Self {
        Self::task_updated(json!({ "columnId": task.column_id, "task": task, "action": "updated" }))
    }

    pub fn task_deleted(column_id: Uuid, task_id: Uuid) -> Self {
        Self::task_updated(json!({ "columnId": column_id, "taskId": task_id, "action": "deleted" }))
    }

    pub fn task_moved(source_column_id: Uuid, task: &Task, target_index: usize) -> Self {
        Self::task_updated(json!({
            "sourceColumnId": source_column_id,
            "targetColumnId": task.column_id,
            "task": task,
            "targetIndex": target_index,
            "action": "moved",
        }))
    }

    pub fn tasks_reordered(column_id: Uuid, tasks: &Sequence) -> Self {
        Self::task_updated(json!({
            "columnId": column_id,
            "tasks": tasks.ids(),
            "version": tasks.version(),
            "action": "reordered",
        }))
    }

    pub fn column_created(column: &Column) -> Self {
        Self::column_updated(json!({ "column": column, "action": "created" }))
    }

    pub fn column_edited(column: &Column) -> Self {
        Self::column_updated(json!({ "column": column, "action": "updated" }))
    }

    pub fn column_deleted(board_id: Uuid, column_id: Uuid) -> Self {
        Self::column_updated(json!({ "boardId": board_id, "columnId": column_id, "action": "deleted" }))
    }

    pub fn columns_reordered(board_id: Uuid, columns: &Sequence) -> Self {
        Self::column_updated(json!({
            "boardId": board_id,
            "columns": columns.ids(),
            "version": columns.version(),
            "action": "reordered",
        }))
    }

    pub fn board_created(board: &Board) -> Self {
        Self::board_updated(json!({ "board": board, "action": "created" }))
    }

    pub fn board_edited(board: &Board) -> Self {
        Self::board_updated(json!({ "board": board, "action": "updated" }))
    }

    pub fn board_deleted(board_id: Uuid) -> Self {
        Self::board_updated(json!({ "boardId": board_id, "action": "deleted" }))
    }
}

/// Events a client may send over the socket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientEventKind {
    AddTask,
    EditTask,
    DeleteTask,
    MoveTask,
    AddColumn,
    EditColumn,
    DeleteColumn,
    MoveColumn,
    TaskUpdated,
    ColumnUpdated,
    BoardUpdated,
}

impl ClientEventKind {
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "addTask" => Self::AddTask,
            "editTask" => Self::EditTask,
            "deleteTask" => Self::DeleteTask,
            "moveTask" => Self::MoveTask,
            "addColumn" => Self::AddColumn,
            "editColumn" => Self::EditColumn,
            "deleteColumn" => Self::DeleteColumn,
            "moveColumn" => Self::MoveColumn,
            "taskUpdated" => Self::TaskUpdated,
            "columnUpdated" => Self::ColumnUpdated,
            "boardUpdated" => Self::BoardUpdated,
            _ => return None,
        };
        Some(kind)
    }

    /// Outbound name this event is rebroadcast under
    pub fn rebroadcast_as(&self) -> EventType {
        match self {
            Self::AddTask | Self::EditTask | Self::DeleteTask | Self::MoveTask | Self::TaskUpdated => {
                EventType::TaskUpdated
            }
            Self::AddColumn
            | Self::EditColumn
            | Self::DeleteColumn
            | Self::MoveColumn
            | Self::ColumnUpdated => EventType::ColumnUpdated,
            Self::BoardUpdated => EventType::BoardUpdated,
        }
    }

    fn marks_deletion(&self) -> bool {
        matches!(self, Self::DeleteTask | Self::DeleteColumn)
    }
}

/// Translate a client frame into the event to relay, or `None` for unknown names.
///
/// Payloads are relayed verbatim; delete events gain `"action": "deleted"`.
pub fn rebroadcast(frame: WireFrame) -> Option<RealtimeEvent> {
    let kind = ClientEventKind::from_name(&frame.event)?;
    let mut data = frame.data;
    if kind.marks_deletion() {
        if let Value::Object(map) = &mut data {
            map.insert("action".to_string(), Value::String("deleted".to_string()));
        }
    }
    Some(RealtimeEvent::new(kind.rebroadcast_as(), data))
}
