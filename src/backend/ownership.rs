/**
 * Ownership Guard
 *
 * Pure predicates deciding what an identity may do with a board and its
 * contents. Columns and tasks inherit access from their board, so every check
 * takes the resolved `Board`.
 *
 * - read: creator or member
 * - structure (rename, members, column order, delete): creator only
 * - content (create/edit/move/delete columns and tasks): creator or member
 *
 * The `ensure_*` forms return `AccessDenied` and are called before any
 * store write.
 */
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::models::Board;

pub fn can_read(board: &Board, identity: &Uuid) -> bool {
    board.is_creator(identity) || board.is_member(identity)
}

pub fn can_mutate_structure(board: &Board, identity: &Uuid) -> bool {
    board.is_creator(identity)
}

pub fn can_mutate_content(board: &Board, identity: &Uuid) -> bool {
    can_read(board, identity)
}

pub fn ensure_read(board: &Board, identity: &Uuid) -> Result<(), BackendError> {
    if can_read(board, identity) {
        return Ok(());
    }
    tracing::warn!("[Board] {} denied read on board {}", identity, board.id);
    Err(BackendError::access_denied("You are not a member of this board"))
}

pub fn ensure_structure(board: &Board, identity: &Uuid) -> Result<(), BackendError> {
    if can_mutate_structure(board, identity) {
        return Ok(());
    }
    tracing::warn!("[Board] {} denied structural change on board {}", identity, board.id);
    Err(BackendError::access_denied("Only the board creator can do this"))
}

pub fn ensure_content(board: &Board, identity: &Uuid) -> Result<(), BackendError> {
    if can_mutate_content(board, identity) {
        return Ok(());
    }
    tracing::warn!("[Board] {} denied content change on board {}", identity, board.id);
    Err(BackendError::access_denied("You are not a member of this board"))
}
