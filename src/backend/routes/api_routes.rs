/**
 * API Route Configuration
 *
 * # Routes
 *
 * ## Accounts (public)
 * - `POST /register` - User registration
 * - `POST /login` - User login
 * - `GET /confirm_email/{token}` - Email confirmation
 *
 * ## Accounts (protected)
 * - `GET /user_profile` - Current user info
 *
 * ## Boards (protected)
 * - `POST /api/create_board` (also with a trailing slash)
 * - `GET /api/list_boards`
 * - `GET /api/get_board/{board_id}`
 * - `PATCH /api/update_board_columns/{board_id}`
 * - `PATCH|POST /api/add_task/{board_id}/{column_name}`
 * - `POST /api/remove_task/{board_id}/{column_name}`
 * - `GET /api/get_task/{board_id}/{column_name}/{task_id}`
 * - `PATCH /api/update_task/{board_id}/{column_name}/{task_id}`
 * - `PATCH /api/move_task/{board_id}/{task_id}`
 */

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::backend::auth::{confirm_email, login, register, user_profile};
use crate::backend::boards::handlers::{
    add_task, create_board, get_board, get_task, list_boards, move_task, remove_task,
    update_board_columns, update_task,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure public account routes
pub fn configure_public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/confirm_email/{token}", get(confirm_email))
}

/// Configure routes that require an access token
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `app_state` - State handed to the auth middleware
///
/// # Authentication
///
/// Every route added here runs behind `auth_middleware`; requests without a
/// valid token (bearer header or `access_token_cookie`) get 401.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/user_profile", get(user_profile))
        .route("/api/create_board", post(create_board))
        .route("/api/create_board/", post(create_board))
        .route("/api/list_boards", get(list_boards))
        .route("/api/get_board/{board_id}", get(get_board))
        .route("/api/update_board_columns/{board_id}", patch(update_board_columns))
        .route("/api/add_task/{board_id}/{column_name}", patch(add_task).post(add_task))
        .route("/api/remove_task/{board_id}/{column_name}", post(remove_task))
        .route("/api/get_task/{board_id}/{column_name}/{task_id}", get(get_task))
        .route("/api/update_task/{board_id}/{column_name}/{task_id}", patch(update_task))
        .route("/api/move_task/{board_id}/{task_id}", patch(move_task))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware));

    router.merge(protected)
}
