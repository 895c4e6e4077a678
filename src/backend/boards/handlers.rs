/**
 * Board Handlers
 *
 * HTTP handlers for the `/api/...` board and task routes. All of them sit
 * behind the auth middleware; every handler that addresses an existing
 * board first checks that the authenticated user owns it.
 *
 * # Endpoints
 *
 * - POST  /api/create_board
 * - GET   /api/list_boards
 * - GET   /api/get_board/{board_id}
 * - PATCH /api/update_board_columns/{board_id}
 * - PATCH|POST /api/add_task/{board_id}/{column_name}
 * - POST  /api/remove_task/{board_id}/{column_name}
 * - GET   /api/get_task/{board_id}/{column_name}/{task_id}
 * - PATCH /api/update_task/{board_id}/{column_name}/{task_id}
 * - PATCH /api/move_task/{board_id}/{task_id}
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::backend::boards::manager::BoardManager;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::AuthUser;
use crate::shared::{Board, BoardSummary, ColumnDraft, ObjectId, Task, TaskDraft};

/// Body of POST /api/create_board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoardRequest {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnDraft>,
}

/// Body of PATCH /api/update_board_columns; exactly one field must be set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateColumnsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns_to_add: Option<Vec<ColumnDraft>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns_to_remove: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTaskRequest {
    pub task_id: ObjectId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveTaskRequest {
    pub prev_column: String,
    pub new_column: String,
}

fn parse_id(raw: &str) -> BackendResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|e| {
        tracing::warn!("Rejected identifier {:?}", raw);
        BackendError::from(e)
    })
}

/// Create a board owned by the caller
///
/// # Example Request
///
/// ```json
/// { "name": "Sprint", "columns": [ { "name": "To Do" }, { "name": "Done" } ] }
/// ```
///
/// Responds 201 with the stored board, every column carrying a fresh `_id`.
pub async fn create_board(
    State(boards): State<BoardManager>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateBoardRequest>,
) -> BackendResult<(StatusCode, Json<Board>)> {
    let board = boards.create(user.user_id, request.name, request.columns).await?;
    Ok((StatusCode::CREATED, Json(board)))
}

/// List the caller's boards as `{_id, name}` summaries
pub async fn list_boards(
    State(boards): State<BoardManager>,
    AuthUser(user): AuthUser,
) -> BackendResult<Json<Vec<BoardSummary>>> {
    Ok(Json(boards.list_boards(user.user_id).await?))
}

pub async fn get_board(
    State(boards): State<BoardManager>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<String>,
) -> BackendResult<Json<Board>> {
    let board_id = parse_id(&board_id)?;
    let board = boards.authorize(board_id, user.user_id).await?;
    Ok(Json(board))
}

/// Add or remove columns
///
/// Supplying both `columns_to_add` and `columns_to_remove`, or neither, is
/// rejected with 400.
pub async fn update_board_columns(
    State(boards): State<BoardManager>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<String>,
    Json(request): Json<UpdateColumnsRequest>,
) -> BackendResult<Json<Board>> {
    let board_id = parse_id(&board_id)?;
    boards.authorize(board_id, user.user_id).await?;

    let board = match (request.columns_to_add, request.columns_to_remove) {
        (Some(columns), None) => boards.add_columns(board_id, columns).await?,
        (None, Some(names)) => boards.remove_columns(board_id, names).await?,
        _ => {
            return Err(BackendError::handler(
                StatusCode::BAD_REQUEST,
                "Provide either columns_to_add or columns_to_remove.",
            ))
        }
    };
    Ok(Json(board))
}

/// Append a task to a column; the column must exist
pub async fn add_task(
    State(boards): State<BoardManager>,
    AuthUser(user): AuthUser,
    Path((board_id, column_name)): Path<(String, String)>,
    Json(task): Json<TaskDraft>,
) -> BackendResult<Json<Board>> {
    let board_id = parse_id(&board_id)?;
    boards.authorize(board_id, user.user_id).await?;
    Ok(Json(boards.add_task(board_id, &column_name, task).await?))
}

pub async fn remove_task(
    State(boards): State<BoardManager>,
    AuthUser(user): AuthUser,
    Path((board_id, column_name)): Path<(String, String)>,
    Json(request): Json<RemoveTaskRequest>,
) -> BackendResult<Json<Board>> {
    let board_id = parse_id(&board_id)?;
    boards.authorize(board_id, user.user_id).await?;
    Ok(Json(boards.remove_task(board_id, &column_name, request.task_id).await?))
}

pub async fn get_task(
    State(boards): State<BoardManager>,
    AuthUser(user): AuthUser,
    Path((board_id, column_name, task_id)): Path<(String, String, String)>,
) -> BackendResult<Json<Task>> {
    let board_id = parse_id(&board_id)?;
    let task_id = parse_id(&task_id)?;
    let board = boards.authorize(board_id, user.user_id).await?;

    board
        .task(&column_name, task_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| BackendError::not_found("task", task_id))
}

/// Update a task's subtasks, title and description
///
/// See [`BoardManager::update_task`] for the subtask diff rules.
pub async fn update_task(
    State(boards): State<BoardManager>,
    AuthUser(user): AuthUser,
    Path((board_id, column_name, task_id)): Path<(String, String, String)>,
    Json(task): Json<TaskDraft>,
) -> BackendResult<Json<Board>> {
    let board_id = parse_id(&board_id)?;
    let task_id = parse_id(&task_id)?;
    boards.authorize(board_id, user.user_id).await?;

    let board = boards
        .update_task(
            board_id,
            &column_name,
            task_id,
            task.title,
            task.description,
            task.subtasks,
        )
        .await?;
    Ok(Json(board))
}

/// Move a task from `prev_column` to `new_column`
///
/// The stored task is the snapshot that gets moved. A task that is not in
/// `prev_column` leaves the board unchanged.
pub async fn move_task(
    State(boards): State<BoardManager>,
    AuthUser(user): AuthUser,
    Path((board_id, task_id)): Path<(String, String)>,
    Json(request): Json<MoveTaskRequest>,
) -> BackendResult<Json<Board>> {
    let board_id = parse_id(&board_id)?;
    let task_id = parse_id(&task_id)?;
    let board = boards.authorize(board_id, user.user_id).await?;

    let Some(snapshot) = board.task(&request.prev_column, task_id).cloned() else {
        tracing::warn!("Task {} not found in '{}'", task_id, request.prev_column);
        return Ok(Json(board));
    };

    let board = boards
        .move_task_status(board_id, task_id, &request.prev_column, &request.new_column, snapshot)
        .await?;
    Ok(Json(board))
}
