/**
 * Board operations
 *
 * Boards are created by any authenticated user; the creator is the first
 * member and the only identity allowed to rename, change members, reorder
 * columns or delete. Every member's `boards` list mirrors membership.
 */
use std::collections::HashSet;
use uuid::Uuid;

use super::BoardService;
use crate::backend::board::types::{CreateBoardRequest, UpdateBoardRequest};
use crate::backend::error::BackendError;
use crate::backend::ordering::cascade_delete;
use crate::backend::ownership::{ensure_read, ensure_structure};
use crate::shared::models::{Board, Column, Task, User};
use crate::shared::RealtimeEvent;

impl BoardService {
    pub async fn create_board(&self, identity: Uuid, request: CreateBoardRequest) -> Result<Board, BackendError> {
        request.validate()?;
        let board = Board::new(
            request.name,
            request.description.unwrap_or_default(),
            identity,
            &request.members,
        );

        let mut users = Vec::with_capacity(board.members.len());
        for member in &board.members {
            users.push(self.load_user(*member).await?);
        }

        self.store.save(&board).await?;
        for mut user in users {
            if user.add_board(board.id) {
                user.touch();
                self.store.save(&user).await?;
            }
        }

        tracing::info!("[Board] {} created board {} ({})", identity, board.id, board.name);
        self.emit(RealtimeEvent::board_created(&board)).await;
        Ok(board)
    }

    /// Boards the identity created or is a member of
    pub async fn list_boards(&self, identity: Uuid) -> Result<Vec<Board>, BackendError> {
        Ok(self.store.boards_for_user(identity).await?)
    }

    pub async fn get_board(&self, identity: Uuid, board_id: Uuid) -> Result<Board, BackendError> {
        let board = self.load_board(board_id).await?;
        ensure_read(&board, &identity)?;
        Ok(board)
    }

    pub async fn update_board(
        &self,
        identity: Uuid,
        board_id: Uuid,
        request: UpdateBoardRequest,
    ) -> Result<Board, BackendError> {
        request.validate()?;
        let mut board = self.load_board(board_id).await?;
        ensure_structure(&board, &identity)?;

        if let Some(name) = request.name {
            board.name = name.trim().to_string();
        }
        if let Some(description) = request.description {
            board.description = description;
        }

        let mut added = Vec::new();
        let mut removed = Vec::new();
        if let Some(members) = request.members {
            let before: HashSet<Uuid> = board.members.iter().copied().collect();
            board.set_members(&members);
            let after: HashSet<Uuid> = board.members.iter().copied().collect();
            for member in after.difference(&before) {
                added.push(self.load_user(*member).await?);
            }
            removed = before.difference(&after).copied().collect();
        }

        board.touch();
        self.store.save(&board).await?;

        for mut user in added {
            if user.add_board(board.id) {
                user.touch();
                self.store.save(&user).await?;
            }
        }
        for member in removed {
            // a removed member whose account is gone has nothing to update
            if let Some(mut user) = self.store.get::<User>(member).await? {
                if user.remove_board(&board.id) {
                    user.touch();
                    self.store.save(&user).await?;
                }
            }
        }

        tracing::info!("[Board] {} updated board {}", identity, board.id);
        self.emit(RealtimeEvent::board_edited(&board)).await;
        Ok(board)
    }

    pub async fn delete_board(&self, identity: Uuid, board_id: Uuid) -> Result<(), BackendError> {
        let board = self.load_board(board_id).await?;
        ensure_structure(&board, &identity)?;
        self.cascade_delete_board(board).await?;
        tracing::info!("[Board] {} deleted board {}", identity, board_id);
        self.emit(RealtimeEvent::board_deleted(board_id)).await;
        Ok(())
    }

    /// Delete a board with its columns and tasks, then unlink it from members
    pub(super) async fn cascade_delete_board(&self, mut board: Board) -> Result<(), BackendError> {
        let mut column_ids = cascade_delete(&mut board);
        for column in self.store.columns_of_board(board.id).await? {
            if !column_ids.contains(&column.id) {
                column_ids.push(column.id);
            }
        }

        for column_id in column_ids {
            match self.store.get::<Column>(column_id).await? {
                Some(column) if column.board_id == board.id => {
                    self.delete_column_tree(column).await?;
                }
                // ids owned by another board are left alone
                _ => {}
            }
        }

        self.store.delete::<Board>(board.id).await?;

        for member in &board.members {
            if let Some(mut user) = self.store.get::<User>(*member).await? {
                if user.remove_board(&board.id) {
                    user.touch();
                    self.store.save(&user).await?;
                }
            }
        }
        Ok(())
    }

    /// Delete a column's tasks, then the column itself
    pub(super) async fn delete_column_tree(&self, mut column: Column) -> Result<usize, BackendError> {
        let mut task_ids = cascade_delete(&mut column);
        for task in self.store.tasks_of_column(column.id).await? {
            if !task_ids.contains(&task.id) {
                task_ids.push(task.id);
            }
        }
        for task_id in &task_ids {
            // missing tasks are skipped; delete is idempotent
            self.store.delete::<Task>(*task_id).await?;
        }
        self.store.delete::<Column>(column.id).await?;
        Ok(task_ids.len())
    }
}
