/**
 * Column operations
 *
 * Any board member may add, rename, recolor or delete columns. Reordering the
 * board's columns is a structural change reserved for the creator.
 */
use uuid::Uuid;

use super::{in_sequence_order, BoardService};
use crate::backend::board::types::{
    ensure_permutation, CreateColumnRequest, ReorderColumnsRequest, UpdateColumnRequest,
};
use crate::backend::error::BackendError;
use crate::backend::ordering::{append, check_version, remove, reorder};
use crate::backend::ownership::{ensure_content, ensure_read, ensure_structure};
use crate::shared::models::{Board, Column};
use crate::shared::RealtimeEvent;

impl BoardService {
    pub async fn create_column(
        &self,
        identity: Uuid,
        board_id: Uuid,
        request: CreateColumnRequest,
    ) -> Result<Column, BackendError> {
        request.validate()?;
        let mut board = self.load_board(board_id).await?;
        ensure_content(&board, &identity)?;

        let column = Column::new(board.id, request.title, request.color);
        append(&mut board, column.id)?;
        board.touch();

        self.store.save(&column).await?;
        self.store.save(&board).await?;

        tracing::info!("[Column] {} added column {} to board {}", identity, column.id, board.id);
        self.emit(RealtimeEvent::column_created(&column)).await;
        Ok(column)
    }

    /// Columns of a board in display order
    pub async fn list_columns(&self, identity: Uuid, board_id: Uuid) -> Result<Vec<Column>, BackendError> {
        let board = self.load_board(board_id).await?;
        ensure_read(&board, &identity)?;
        let columns = self.store.columns_of_board(board.id).await?;
        Ok(in_sequence_order(board.columns.ids(), columns, |column| column.id))
    }

    pub async fn get_column(&self, identity: Uuid, board_id: Uuid, column_id: Uuid) -> Result<Column, BackendError> {
        let board = self.load_board(board_id).await?;
        ensure_read(&board, &identity)?;
        self.load_column(&board, column_id).await
    }

    pub async fn update_column(
        &self,
        identity: Uuid,
        board_id: Uuid,
        column_id: Uuid,
        request: UpdateColumnRequest,
    ) -> Result<Column, BackendError> {
        request.validate()?;
        let board = self.load_board(board_id).await?;
        ensure_content(&board, &identity)?;
        let mut column = self.load_column(&board, column_id).await?;

        if let Some(title) = request.title {
            column.title = title.trim().to_string();
        }
        if let Some(color) = request.color {
            column.color = color;
        }
        column.touch();
        self.store.save(&column).await?;

        tracing::info!("[Column] {} updated column {}", identity, column.id);
        self.emit(RealtimeEvent::column_edited(&column)).await;
        Ok(column)
    }

    /// Delete a column and every task in it
    pub async fn delete_column(&self, identity: Uuid, board_id: Uuid, column_id: Uuid) -> Result<(), BackendError> {
        let mut board = self.load_board(board_id).await?;
        ensure_content(&board, &identity)?;
        let column = self.load_column(&board, column_id).await?;

        let removed_tasks = self.delete_column_tree(column).await?;
        if remove(&mut board, &column_id).is_some() {
            board.touch();
            self.store.save(&board).await?;
        }

        tracing::info!(
            "[Column] {} deleted column {} with {} tasks",
            identity,
            column_id,
            removed_tasks
        );
        self.emit(RealtimeEvent::column_deleted(board.id, column_id)).await;
        Ok(())
    }

    /// Replace the board's column order with a permutation of itself
    pub async fn reorder_columns(
        &self,
        identity: Uuid,
        board_id: Uuid,
        request: ReorderColumnsRequest,
    ) -> Result<Board, BackendError> {
        let mut board = self.load_board(board_id).await?;
        ensure_structure(&board, &identity)?;
        check_version(&board, request.expected_version)?;
        ensure_permutation(&request.columns, board.columns.ids())?;
        reorder(&mut board, request.columns)?;
        board.touch();
        self.store.save(&board).await?;

        tracing::info!(
            "[Column] {} reordered columns of board {} (version {})",
            identity,
            board.id,
            board.columns.version()
        );
        self.emit(RealtimeEvent::columns_reordered(board.id, &board.columns)).await;
        Ok(board)
    }
}
