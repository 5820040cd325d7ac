/**
 * Account deletion
 *
 * Removing a user removes what only they own: boards they created are
 * deleted with their columns and tasks, their membership elsewhere is
 * dropped and tasks assigned to them become unassigned.
 */
use uuid::Uuid;

use super::BoardService;
use crate::backend::error::BackendError;
use crate::shared::models::User;
use crate::shared::RealtimeEvent;

impl BoardService {
    pub async fn delete_user(&self, user_id: Uuid) -> Result<(), BackendError> {
        let user = self.load_user(user_id).await?;
        let boards = self.store.boards_for_user(user.id).await?;

        let mut deleted = Vec::new();
        let mut left = Vec::new();
        for mut board in boards {
            if board.is_creator(&user.id) {
                let board_id = board.id;
                self.cascade_delete_board(board).await?;
                deleted.push(board_id);
            } else {
                board.members.retain(|member| *member != user.id);
                board.touch();
                self.store.save(&board).await?;
                left.push(board);
            }
        }

        let mut unassigned = Vec::new();
        for mut task in self.store.tasks_assigned_to(user.id).await? {
            task.assigned_to = None;
            task.touch();
            self.store.save(&task).await?;
            unassigned.push(task);
        }

        self.store.delete::<User>(user.id).await?;
        tracing::info!(
            "[User] Deleted {} ({} boards removed, {} left, {} tasks unassigned)",
            user.id,
            deleted.len(),
            left.len(),
            unassigned.len()
        );

        for board_id in deleted {
            self.emit(RealtimeEvent::board_deleted(board_id)).await;
        }
        for board in &left {
            self.emit(RealtimeEvent::board_edited(board)).await;
        }
        for task in &unassigned {
            self.emit(RealtimeEvent::task_edited(task)).await;
        }
        Ok(())
    }
}
