/**
 * Board Manager
 *
 * The operations the HTTP layer performs on boards, built on top of a
 * `BoardStore`. Each write becomes one or more `BoardPatch`es; every patch
 * is atomic on its own and there is no transaction spanning several.
 *
 * # Failure Semantics
 *
 * - Unknown board id: `NotFound`
 * - Unknown column name, task id or subtask id inside an existing board:
 *   the unchanged board is returned, except for `add_task`, which requires
 *   the column to exist
 * - A column name that would appear twice: `ColumnConflict`
 */

use std::collections::HashSet;
use std::sync::Arc;

use crate::backend::auth::users::UserStore;
use crate::backend::boards::aggregate::{BoardPatch, PatchResult};
use crate::backend::boards::store::BoardStore;
use crate::backend::error::{BackendError, BackendResult};
use crate::shared::{
    Board, BoardSummary, Column, ColumnDraft, ObjectId, SubtaskDraft, Task, TaskDraft,
};

/// Board operations over the configured stores
#[derive(Clone)]
pub struct BoardManager {
    boards: Arc<dyn BoardStore>,
    users: Arc<dyn UserStore>,
}

impl BoardManager {
    pub fn new(boards: Arc<dyn BoardStore>, users: Arc<dyn UserStore>) -> Self {
        Self { boards, users }
    }

    /// Run one patch, mapping a missing board to `NotFound`
    async fn patch(&self, board_id: ObjectId, patch: BoardPatch) -> BackendResult<(Board, PatchResult)> {
        self.boards
            .apply_patch(board_id, &patch)
            .await?
            .ok_or_else(|| BackendError::not_found("board", board_id))
    }

    /// Create a board for `owner_id`
    ///
    /// Every column (and any task or subtask supplied inline) gets a fresh
    /// id. Inline tasks take the column name as status.
    ///
    /// # Errors
    /// * `NotFound` - the owner is not a registered user
    /// * `ColumnConflict` - two supplied columns share a name
    pub async fn create(
        &self,
        owner_id: ObjectId,
        name: String,
        columns: Vec<ColumnDraft>,
    ) -> BackendResult<Board> {
        if self.users.find_by_id(owner_id).await?.is_none() {
            return Err(BackendError::not_found("user", owner_id));
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = columns.iter().find(|column| !seen.insert(column.name.as_str())) {
            return Err(BackendError::ColumnConflict(duplicate.name.clone()));
        }

        let board = Board {
            id: ObjectId::new(),
            owner_id,
            name,
            columns: columns.into_iter().map(ColumnDraft::materialize).collect(),
        };
        let board = self.boards.insert_board(board).await?;
        tracing::info!("Board created: {} ({}) for user {}", board.name, board.id, owner_id);
        Ok(board)
    }

    /// Append columns after the existing ones
    pub async fn add_columns(&self, board_id: ObjectId, columns: Vec<ColumnDraft>) -> BackendResult<Board> {
        let columns: Vec<Column> = columns.into_iter().map(ColumnDraft::materialize).collect();
        match self.patch(board_id, BoardPatch::PushColumns(columns)).await? {
            (_, PatchResult::Conflict(name)) => Err(BackendError::ColumnConflict(name)),
            (board, _) => Ok(board),
        }
    }

    /// Remove every column whose name is listed; unknown names are ignored
    pub async fn remove_columns(&self, board_id: ObjectId, names: Vec<String>) -> BackendResult<Board> {
        let (board, _) = self.patch(board_id, BoardPatch::PullColumns(names)).await?;
        Ok(board)
    }

    pub async fn list_boards(&self, owner_id: ObjectId) -> BackendResult<Vec<BoardSummary>> {
        Ok(self.boards.list_boards(owner_id).await?)
    }

    pub async fn get_board(&self, board_id: ObjectId) -> BackendResult<Board> {
        self.boards
            .find_board(board_id)
            .await?
            .ok_or_else(|| BackendError::not_found("board", board_id))
    }

    /// Load a board and check that `user_id` owns it
    ///
    /// # Errors
    /// * `NotFound` - no such board
    /// * `Unauthorized` - the board belongs to someone else
    pub async fn authorize(&self, board_id: ObjectId, user_id: ObjectId) -> BackendResult<Board> {
        let board = self.get_board(board_id).await?;
        if board.owner_id != user_id {
            tracing::warn!("User {} denied access to board {}", user_id, board_id);
            return Err(BackendError::unauthorized("You do not have access to this board."));
        }
        Ok(board)
    }

    /// Append a task to a column
    ///
    /// # Errors
    /// * `NotFound` - the board or the column does not exist
    pub async fn add_task(&self, board_id: ObjectId, column: &str, task: TaskDraft) -> BackendResult<Board> {
        let task = task.materialize(column);
        let task_id = task.id;
        let patch = BoardPatch::PushTask {
            column: column.to_string(),
            task,
        };
        match self.patch(board_id, patch).await? {
            (_, PatchResult::NoMatch) => Err(BackendError::not_found("column", column)),
            (board, _) => {
                tracing::info!("Task {} added to '{}' on board {}", task_id, column, board_id);
                Ok(board)
            }
        }
    }

    pub async fn remove_task(&self, board_id: ObjectId, column: &str, task_id: ObjectId) -> BackendResult<Board> {
        let patch = BoardPatch::PullTask {
            column: column.to_string(),
            task_id,
        };
        let (board, _) = self.patch(board_id, patch).await?;
        Ok(board)
    }

    pub async fn get_task(&self, board_id: ObjectId, column: &str, task_id: ObjectId) -> BackendResult<Option<Task>> {
        let board = self.get_board(board_id).await?;
        Ok(board.task(column, task_id).cloned())
    }

    /// Update a task's subtasks, title and description
    ///
    /// 1. Incoming subtasks whose id matches a current subtask with a
    ///    different title are renamed, one patch each. Every rename patch
    ///    also sets the task's title and description, so a renamed subtask
    ///    is never stored next to a stale title.
    /// 2. More incoming than current: incoming subtasks without an id are
    ///    appended with fresh ids. Fewer: current subtasks missing from the
    ///    incoming ids are removed. Both also set title and description.
    ///    Equal counts change nothing beyond the renames, so without a
    ///    rename the title and description stay as they are.
    pub async fn update_task(
        &self,
        board_id: ObjectId,
        column: &str,
        task_id: ObjectId,
        title: String,
        description: String,
        subtasks: Vec<SubtaskDraft>,
    ) -> BackendResult<Board> {
        let mut board = self.get_board(board_id).await?;
        let Some(current) = board.task(column, task_id).cloned() else {
            return Ok(board);
        };

        for incoming in &subtasks {
            let Some(subtask_id) = incoming.id else {
                continue;
            };
            match current.subtask(subtask_id) {
                Some(existing) if existing.title != incoming.title => {
                    let patch = BoardPatch::RenameSubtask {
                        column: column.to_string(),
                        task_id,
                        subtask_id,
                        subtask_title: incoming.title.clone(),
                        title: title.clone(),
                        description: description.clone(),
                    };
                    board = self.patch(board_id, patch).await?.0;
                }
                _ => {}
            }
        }

        if subtasks.len() > current.subtasks.len() {
            let added = subtasks
                .into_iter()
                .filter(|subtask| subtask.id.is_none())
                .map(SubtaskDraft::materialize)
                .collect();
            let patch = BoardPatch::PushSubtasks {
                column: column.to_string(),
                task_id,
                title,
                description,
                subtasks: added,
            };
            board = self.patch(board_id, patch).await?.0;
        } else if subtasks.len() < current.subtasks.len() {
            let kept: HashSet<ObjectId> = subtasks.iter().filter_map(|subtask| subtask.id).collect();
            let removed = current
                .subtasks
                .iter()
                .map(|subtask| subtask.id)
                .filter(|id| !kept.contains(id))
                .collect();
            let patch = BoardPatch::PullSubtasks {
                column: column.to_string(),
                task_id,
                title,
                description,
                subtask_ids: removed,
            };
            board = self.patch(board_id, patch).await?.0;
        }

        tracing::info!("Task {} updated on board {}", task_id, board_id);
        Ok(board)
    }

    /// Move a task to another column and set its status to that column
    ///
    /// The removal and re-insertion happen in one patch; if the task or the
    /// target column is missing nothing changes.
    pub async fn move_task_status(
        &self,
        board_id: ObjectId,
        task_id: ObjectId,
        prev_column: &str,
        new_column: &str,
        snapshot: Task,
    ) -> BackendResult<Board> {
        let mut snapshot = snapshot;
        snapshot.id = task_id;

        let patch = BoardPatch::MoveTask {
            from: prev_column.to_string(),
            to: new_column.to_string(),
            task: snapshot,
        };
        let (board, result) = self.patch(board_id, patch).await?;
        if !result.is_applied() {
            tracing::warn!(
                "Task {} not moved from '{}' to '{}' on board {}",
                task_id,
                prev_column,
                new_column,
                board_id
            );
            return Ok(board);
        }

        let patch = BoardPatch::SetTaskStatus {
            column: new_column.to_string(),
            task_id,
            status: new_column.to_string(),
        };
        let (board, _) = self.patch(board_id, patch).await?;
        tracing::info!("Task {} moved from '{}' to '{}'", task_id, prev_column, new_column);
        Ok(board)
    }
}
