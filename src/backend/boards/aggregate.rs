//! Board Aggregate Transforms
//!
//! Every write to a board is expressed as a [`BoardPatch`]: a self-contained
//! transform addressed by column name (and task id, subtask id where needed)
//! that is applied to the in-memory board tree. Stores apply one patch at a
//! time under an exclusive lock and persist the board only when the patch
//! reports [`PatchResult::Applied`].
//!
//! A patch either applies completely or leaves the board untouched.

use std::collections::HashSet;

use crate::shared::board::{Board, Column, ObjectId, Subtask, Task};

/// Outcome of applying a patch to a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchResult {
    /// The board was modified
    Applied,
    /// The addressed column, task or subtask does not exist
    NoMatch,
    /// Applying would give two columns the same name
    Conflict(String),
}

impl PatchResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, PatchResult::Applied)
    }
}

/// A pointwise transform of one board document
#[derive(Debug, Clone, PartialEq)]
pub enum BoardPatch {
    /// Append columns after the existing ones
    PushColumns(Vec<Column>),
    /// Remove every column whose name is listed
    PullColumns(Vec<String>),
    /// Append a task to the named column
    PushTask { column: String, task: Task },
    /// Remove a task from the named column
    PullTask { column: String, task_id: ObjectId },
    /// Change the title of one subtask and set the task's title and
    /// description in the same step
    RenameSubtask {
        column: String,
        task_id: ObjectId,
        subtask_id: ObjectId,
        subtask_title: String,
        title: String,
        description: String,
    },
    /// Append subtasks and set the task's title and description
    PushSubtasks {
        column: String,
        task_id: ObjectId,
        title: String,
        description: String,
        subtasks: Vec<Subtask>,
    },
    /// Remove the listed subtasks and set the task's title and description
    PullSubtasks {
        column: String,
        task_id: ObjectId,
        title: String,
        description: String,
        subtask_ids: Vec<ObjectId>,
    },
    /// Remove a task from one column and append the snapshot to another
    MoveTask {
        from: String,
        to: String,
        task: Task,
    },
    SetTaskStatus {
        column: String,
        task_id: ObjectId,
        status: String,
    },
}

impl BoardPatch {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            BoardPatch::PushColumns(_) => "push_columns",
            BoardPatch::PullColumns(_) => "pull_columns",
            BoardPatch::PushTask { .. } => "push_task",
            BoardPatch::PullTask { .. } => "pull_task",
            BoardPatch::RenameSubtask { .. } => "rename_subtask",
            BoardPatch::PushSubtasks { .. } => "push_subtasks",
            BoardPatch::PullSubtasks { .. } => "pull_subtasks",
            BoardPatch::MoveTask { .. } => "move_task",
            BoardPatch::SetTaskStatus { .. } => "set_task_status",
        }
    }

    /// Apply the transform to `board`
    pub fn apply(&self, board: &mut Board) -> PatchResult {
        match self {
            BoardPatch::PushColumns(columns) => push_columns(board, columns),
            BoardPatch::PullColumns(names) => {
                let before = board.columns.len();
                board.columns.retain(|column| !names.contains(&column.name));
                if board.columns.len() == before {
                    PatchResult::NoMatch
                } else {
                    PatchResult::Applied
                }
            }
            BoardPatch::PushTask { column, task } => match board.column_mut(column) {
                Some(target) => {
                    let mut task = task.clone();
                    task.status = target.name.clone();
                    target.tasks.push(task);
                    PatchResult::Applied
                }
                None => PatchResult::NoMatch,
            },
            BoardPatch::PullTask { column, task_id } => {
                let Some(target) = board.column_mut(column) else {
                    return PatchResult::NoMatch;
                };
                match target.tasks.iter().position(|task| task.id == *task_id) {
                    Some(index) => {
                        target.tasks.remove(index);
                        PatchResult::Applied
                    }
                    None => PatchResult::NoMatch,
                }
            }
            BoardPatch::RenameSubtask {
                column,
                task_id,
                subtask_id,
                subtask_title,
                title,
                description,
            } => {
                let Some(task) = board.task_mut(column, *task_id) else {
                    return PatchResult::NoMatch;
                };
                let Some(subtask) = task.subtask_mut(*subtask_id) else {
                    return PatchResult::NoMatch;
                };
                subtask.title = subtask_title.clone();
                task.title = title.clone();
                task.description = description.clone();
                PatchResult::Applied
            }
            BoardPatch::PushSubtasks {
                column,
                task_id,
                title,
                description,
                subtasks,
            } => match board.task_mut(column, *task_id) {
                Some(task) => {
                    task.title = title.clone();
                    task.description = description.clone();
                    task.subtasks.extend(subtasks.iter().cloned());
                    PatchResult::Applied
                }
                None => PatchResult::NoMatch,
            },
            BoardPatch::PullSubtasks {
                column,
                task_id,
                title,
                description,
                subtask_ids,
            } => match board.task_mut(column, *task_id) {
                Some(task) => {
                    task.title = title.clone();
                    task.description = description.clone();
                    task.subtasks.retain(|subtask| !subtask_ids.contains(&subtask.id));
                    PatchResult::Applied
                }
                None => PatchResult::NoMatch,
            },
            BoardPatch::MoveTask { from, to, task } => move_task(board, from, to, task),
            BoardPatch::SetTaskStatus {
                column,
                task_id,
                status,
            } => match board.task_mut(column, *task_id) {
                Some(task) => {
                    task.status = status.clone();
                    PatchResult::Applied
                }
                None => PatchResult::NoMatch,
            },
        }
    }
}

fn push_columns(board: &mut Board, columns: &[Column]) -> PatchResult {
    let mut seen: HashSet<&str> = board.columns.iter().map(|column| column.name.as_str()).collect();
    for column in columns {
        if !seen.insert(column.name.as_str()) {
            return PatchResult::Conflict(column.name.clone());
        }
    }
    board.columns.extend(columns.iter().cloned());
    PatchResult::Applied
}

fn move_task(board: &mut Board, from: &str, to: &str, snapshot: &Task) -> PatchResult {
    if !board.has_column(to) {
        return PatchResult::NoMatch;
    }
    let Some(source) = board.column_mut(from) else {
        return PatchResult::NoMatch;
    };
    let Some(index) = source.tasks.iter().position(|task| task.id == snapshot.id) else {
        return PatchResult::NoMatch;
    };
    source.tasks.remove(index);

    let mut moved = snapshot.clone();
    moved.status = to.to_string();
    if let Some(target) = board.column_mut(to) {
        target.tasks.push(moved);
    }
    PatchResult::Applied
}
