/**
 * Task operations
 *
 * All task mutations are content changes: any board member may create, edit,
 * move, reorder or delete tasks. Moving between columns touches three
 * documents and writes them source first, task second, target last.
 */
use uuid::Uuid;

use super::{in_sequence_order, BoardService};
use crate::backend::board::types::{
    ensure_permutation, CreateTaskRequest, MoveOutcome, MoveTaskRequest, ReorderTasksRequest,
    UpdateTaskRequest,
};
use crate::backend::error::BackendError;
use crate::backend::ordering::{append, check_version, move_across, parse_index, remove, reorder, reposition};
use crate::backend::ownership::{ensure_content, ensure_read};
use crate::shared::models::{Column, Task};
use crate::shared::RealtimeEvent;

impl BoardService {
    pub async fn create_task(
        &self,
        identity: Uuid,
        board_id: Uuid,
        column_id: Uuid,
        request: CreateTaskRequest,
    ) -> Result<Task, BackendError> {
        request.validate()?;
        let board = self.load_board(board_id).await?;
        ensure_content(&board, &identity)?;
        let mut column = self.load_column(&board, column_id).await?;
        if let Some(assignee) = request.assigned_to {
            self.load_user(assignee).await?;
        }

        let due_date = request
            .due_date
            .ok_or_else(|| BackendError::validation("dueDate", "dueDate is required."))?;
        let mut task = Task::new(column.id, request.title, request.description, due_date);
        task.assigned_to = request.assigned_to;
        if let Some(status) = request.status {
            task.status = status;
        }
        if let Some(color) = request.color {
            task.color = color;
        }

        append(&mut column, task.id)?;
        column.touch();
        self.store.save(&task).await?;
        self.store.save(&column).await?;

        tracing::info!("[Task] {} created task {} in column {}", identity, task.id, column.id);
        self.emit(RealtimeEvent::task_created(&task)).await;
        Ok(task)
    }

    /// Tasks of a column in display order
    pub async fn list_tasks(&self, identity: Uuid, board_id: Uuid, column_id: Uuid) -> Result<Vec<Task>, BackendError> {
        let board = self.load_board(board_id).await?;
        ensure_read(&board, &identity)?;
        let column = self.load_column(&board, column_id).await?;
        let tasks = self.store.tasks_of_column(column.id).await?;
        Ok(in_sequence_order(column.tasks.ids(), tasks, |task| task.id))
    }

    pub async fn get_task(
        &self,
        identity: Uuid,
        board_id: Uuid,
        column_id: Uuid,
        task_id: Uuid,
    ) -> Result<Task, BackendError> {
        let board = self.load_board(board_id).await?;
        ensure_read(&board, &identity)?;
        let column = self.load_column(&board, column_id).await?;
        self.load_task(&column, task_id).await
    }

    pub async fn update_task(
        &self,
        identity: Uuid,
        board_id: Uuid,
        column_id: Uuid,
        task_id: Uuid,
        request: UpdateTaskRequest,
    ) -> Result<Task, BackendError> {
        request.validate()?;
        let board = self.load_board(board_id).await?;
        ensure_content(&board, &identity)?;
        let column = self.load_column(&board, column_id).await?;
        let mut task = self.load_task(&column, task_id).await?;
        if let Some(Some(assignee)) = request.assigned_to {
            self.load_user(assignee).await?;
        }

        if let Some(title) = request.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = request.description {
            task.description = description;
        }
        if let Some(due_date) = request.due_date {
            task.due_date = due_date;
        }
        if let Some(assignee) = request.assigned_to {
            task.assigned_to = assignee;
        }
        if let Some(status) = request.status {
            task.status = status;
        }
        if let Some(color) = request.color {
            task.color = color;
        }
        task.touch();
        self.store.save(&task).await?;

        tracing::info!("[Task] {} updated task {}", identity, task.id);
        self.emit(RealtimeEvent::task_edited(&task)).await;
        Ok(task)
    }

    pub async fn delete_task(
        &self,
        identity: Uuid,
        board_id: Uuid,
        column_id: Uuid,
        task_id: Uuid,
    ) -> Result<(), BackendError> {
        let board = self.load_board(board_id).await?;
        ensure_content(&board, &identity)?;
        let mut column = self.load_column(&board, column_id).await?;
        let task = self.load_task(&column, task_id).await?;

        self.store.delete::<Task>(task.id).await?;
        if remove(&mut column, &task.id).is_some() {
            column.touch();
            self.store.save(&column).await?;
        }

        tracing::info!("[Task] {} deleted task {} from column {}", identity, task.id, column.id);
        self.emit(RealtimeEvent::task_deleted(column.id, task.id)).await;
        Ok(())
    }

    /// Move a task to `targetIndex` of `targetColumnId`.
    ///
    /// Within one column this is a reposition; across columns the task leaves
    /// its source column and its `columnId` follows it.
    pub async fn move_task(
        &self,
        identity: Uuid,
        board_id: Uuid,
        task_id: Uuid,
        request: MoveTaskRequest,
    ) -> Result<MoveOutcome, BackendError> {
        let target_index = parse_index(request.target_index.as_ref())?;
        let board = self.load_board(board_id).await?;
        ensure_content(&board, &identity)?;

        let mut task = self
            .store
            .get::<Task>(task_id)
            .await?
            .ok_or_else(|| BackendError::not_found("Task", task_id))?;
        let mut source = self.load_column(&board, task.column_id).await?;
        let mut target = self.load_column(&board, request.target_column_id).await?;

        let landed = if source.id == target.id {
            let version = source.tasks.version();
            let landed = reposition(&mut source, task.id, target_index)?;
            if source.tasks.version() != version {
                source.touch();
                self.store.save(&source).await?;
            }
            target = source.clone();
            landed
        } else {
            let landed = move_across(&mut task, &mut source, &mut target, target_index)?;
            source.touch();
            task.touch();
            target.touch();
            self.store.save(&source).await?;
            self.store.save(&task).await?;
            self.store.save(&target).await?;
            landed
        };

        tracing::info!(
            "[Task] {} moved task {} from column {} to column {} at {}",
            identity,
            task.id,
            source.id,
            target.id,
            landed
        );
        self.emit(RealtimeEvent::task_moved(source.id, &task, landed)).await;
        Ok(MoveOutcome {
            task,
            source_column: source,
            target_column: target,
            target_index: landed,
        })
    }

    /// Replace a column's task order with a permutation of itself
    pub async fn reorder_tasks(
        &self,
        identity: Uuid,
        board_id: Uuid,
        column_id: Uuid,
        request: ReorderTasksRequest,
    ) -> Result<Column, BackendError> {
        let board = self.load_board(board_id).await?;
        ensure_content(&board, &identity)?;
        let mut column = self.load_column(&board, column_id).await?;
        check_version(&column, request.expected_version)?;
        ensure_permutation(&request.tasks, column.tasks.ids())?;
        reorder(&mut column, request.tasks)?;
        column.touch();
        self.store.save(&column).await?;

        tracing::info!(
            "[Task] {} reordered tasks of column {} (version {})",
            identity,
            column.id,
            column.tasks.version()
        );
        self.emit(RealtimeEvent::tasks_reordered(column.id, &column.tasks)).await;
        Ok(column)
    }
}
