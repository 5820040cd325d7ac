//! Board Handlers Module
//!
//! Thin axum handlers: extract the caller, path ids and body, call
//! `BoardService`, wrap the result in the response envelope.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Handler exports
//! ├── boards.rs   - /boards
//! ├── columns.rs  - /boards/{boardId}/columns
//! └── tasks.rs    - /boards/{boardId}/columns/{columnId}/tasks and task moves
//! ```

pub mod boards;
pub mod columns;
pub mod tasks;

pub use boards::{create_board, delete_board, get_board, list_boards, update_board};
pub use columns::{
    create_column, delete_column, get_column, list_columns, reorder_columns, update_column,
};
pub use tasks::{
    create_task, delete_task, get_task, list_tasks, move_task, reorder_tasks, update_task,
};
