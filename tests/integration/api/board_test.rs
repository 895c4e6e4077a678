//! Board API integration tests
//!
//! Tests for board creation, listing, retrieval, ownership checks and
//! column updates.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use taskboard::shared::{Board, BoardSummary, ObjectId};

    use crate::assert_error_response;
    use crate::common::{bearer, column_names, create_board, create_test_user, TestApp};

    #[tokio::test]
    async fn test_create_board_assigns_ids() {
        let app = TestApp::new();
        let user = create_test_user(&app.server).await;
        let (name, value) = bearer(&user.token);

        let response = app
            .server
            .post("/api/create_board/")
            .add_header(name, value)
            .json(&json!({
                "name": "Sprint",
                "columns": [
                    { "name": "To Do", "tasks": [ { "title": "Write docs", "subtasks": [ { "title": "Outline" } ] } ] },
                    { "name": "Done" }
                ]
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::CREATED);
        let board: Board = response.json();
        assert_eq!(board.name, "Sprint");
        assert_eq!(column_names(&board), vec!["To Do", "Done"]);
        assert_ne!(board.columns[0].id, board.columns[1].id);

        let task = &board.columns[0].tasks[0];
        assert_eq!(task.status, "To Do");
        assert_eq!(task.subtasks.len(), 1);
        assert!(!task.subtasks[0].is_completed);
    }

    #[tokio::test]
    async fn test_create_board_wire_format() {
        let app = TestApp::new();
        let user = create_test_user(&app.server).await;
        let (name, value) = bearer(&user.token);

        let response = app
            .server
            .post("/api/create_board")
            .add_header(name, value)
            .json(&json!({ "name": "Wire", "columns": [ { "name": "A" } ] }))
            .await;

        let body: serde_json::Value = response.json();
        assert!(body["_id"]["$oid"].is_string());
        assert!(body["user"]["$oid"].is_string());
        assert!(body["columns"][0]["_id"]["$oid"].is_string());
        assert_eq!(body["columns"][0]["tasks"], json!([]));
    }

    #[tokio::test]
    async fn test_create_board_duplicate_columns() {
        let app = TestApp::new();
        let user = create_test_user(&app.server).await;
        let (name, value) = bearer(&user.token);

        let response = app
            .server
            .post("/api/create_board")
            .add_header(name, value)
            .json(&json!({ "name": "Twice", "columns": [ { "name": "A" }, { "name": "A" } ] }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_boards_in_creation_order() {
        let app = TestApp::new();
        let alice = create_test_user(&app.server).await;
        let bob = create_test_user(&app.server).await;

        let first = create_board(&app.server, &alice.token, "First", &["A"]).await;
        create_board(&app.server, &bob.token, "Not yours", &[]).await;
        let second = create_board(&app.server, &alice.token, "Second", &[]).await;

        let (name, value) = bearer(&alice.token);
        let response = app.server.get("/api/list_boards").add_header(name, value).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let boards: Vec<BoardSummary> = response.json();
        assert_eq!(boards, vec![first.summary(), second.summary()]);

        let body: serde_json::Value = {
            let (name, value) = bearer(&alice.token);
            app.server.get("/api/list_boards").add_header(name, value).await.json()
        };
        assert!(body[0].get("columns").is_none());
    }

    #[tokio::test]
    async fn test_list_boards_empty() {
        let app = TestApp::new();
        let user = create_test_user(&app.server).await;
        let (name, value) = bearer(&user.token);

        let response = app.server.get("/api/list_boards").add_header(name, value).await;

        let boards: Vec<BoardSummary> = response.json();
        assert!(boards.is_empty());
    }

    #[tokio::test]
    async fn test_get_board() {
        let app = TestApp::new();
        let user = create_test_user(&app.server).await;
        let board = create_board(&app.server, &user.token, "Mine", &["A", "B"]).await;
        let (name, value) = bearer(&user.token);

        let response = app
            .server
            .get(&format!("/api/get_board/{}", board.id))
            .add_header(name, value)
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let fetched: Board = response.json();
        assert_eq!(fetched, board);
    }

    #[tokio::test]
    async fn test_get_board_of_another_user() {
        let app = TestApp::new();
        let owner = create_test_user(&app.server).await;
        let intruder = create_test_user(&app.server).await;
        let board = create_board(&app.server, &owner.token, "Private", &["A"]).await;
        let (name, value) = bearer(&intruder.token);

        let response = app
            .server
            .get(&format!("/api/get_board/{}", board.id))
            .add_header(name, value)
            .await;

        assert_error_response!(
            response,
            StatusCode::UNAUTHORIZED,
            "You do not have access to this board."
        );
    }

    #[tokio::test]
    async fn test_get_board_unknown_or_malformed_id() {
        let app = TestApp::new();
        let user = create_test_user(&app.server).await;

        for id in [ObjectId::new().to_hex(), "definitely-not-an-id".to_string()] {
            let (name, value) = bearer(&user.token);
            let response = app
                .server
                .get(&format!("/api/get_board/{}", id))
                .add_header(name, value)
                .await;
            assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", id);
        }
    }

    #[tokio::test]
    async fn test_add_then_remove_columns() {
        let app = TestApp::new();
        let user = create_test_user(&app.server).await;
        let board = create_board(&app.server, &user.token, "Cols", &["To Do"]).await;
        let url = format!("/api/update_board_columns/{}", board.id);

        let (name, value) = bearer(&user.token);
        let response = app
            .server
            .patch(&url)
            .add_header(name, value)
            .json(&json!({ "columns_to_add": [ { "name": "Doing" }, { "name": "Done" } ] }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let updated: Board = response.json();
        assert_eq!(column_names(&updated), vec!["To Do", "Doing", "Done"]);
        let ids: HashSet<ObjectId> = updated.columns.iter().map(|column| column.id).collect();
        assert_eq!(ids.len(), 3);

        let (name, value) = bearer(&user.token);
        let response = app
            .server
            .patch(&url)
            .add_header(name, value)
            .json(&json!({ "columns_to_remove": ["Doing", "Unknown"] }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let updated: Board = response.json();
        assert_eq!(column_names(&updated), vec!["To Do", "Done"]);
    }

    #[tokio::test]
    async fn test_update_columns_requires_exactly_one_operation() {
        let app = TestApp::new();
        let user = create_test_user(&app.server).await;
        let board = create_board(&app.server, &user.token, "Cols", &["A"]).await;
        let url = format!("/api/update_board_columns/{}", board.id);

        for body in [
            json!({}),
            json!({ "columns_to_add": [ { "name": "B" } ], "columns_to_remove": ["A"] }),
        ] {
            let (name, value) = bearer(&user.token);
            let response = app.server.patch(&url).add_header(name, value).json(&body).await;
            assert_error_response!(
                response,
                StatusCode::BAD_REQUEST,
                "Provide either columns_to_add or columns_to_remove."
            );
        }
    }

    #[tokio::test]
    async fn test_add_existing_column_is_rejected() {
        let app = TestApp::new();
        let user = create_test_user(&app.server).await;
        let board = create_board(&app.server, &user.token, "Cols", &["A"]).await;
        let (name, value) = bearer(&user.token);

        let response = app
            .server
            .patch(&format!("/api/update_board_columns/{}", board.id))
            .add_header(name, value)
            .json(&json!({ "columns_to_add": [ { "name": "A" } ] }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let stored = app.state.boards.get_board(board.id).await.unwrap();
        assert_eq!(column_names(&stored), vec!["A"]);
    }

    #[tokio::test]
    async fn test_update_columns_of_another_user() {
        let app = TestApp::new();
        let owner = create_test_user(&app.server).await;
        let intruder = create_test_user(&app.server).await;
        let board = create_board(&app.server, &owner.token, "Private", &["A"]).await;
        let (name, value) = bearer(&intruder.token);

        let response = app
            .server
            .patch(&format!("/api/update_board_columns/{}", board.id))
            .add_header(name, value)
            .json(&json!({ "columns_to_remove": ["A"] }))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        let stored = app.state.boards.get_board(board.id).await.unwrap();
        assert_eq!(column_names(&stored), vec!["A"]);
    }
}
