/**
 * PostgreSQL Board Store
 *
 * One row per board; the column tree is a JSONB document in
 * `boards.columns`. Patches run inside a transaction holding the row lock
 * (`SELECT ... FOR UPDATE`), so concurrent patches to the same board are
 * serialized.
 */

use async_trait::async_trait;
use sqlx::{postgres::PgRow, types::Json, PgPool, Row};

use crate::backend::boards::aggregate::{BoardPatch, PatchResult};
use crate::backend::boards::store::BoardStore;
use crate::backend::error::StoreResult;
use crate::shared::{Board, BoardSummary, Column, ObjectId};

/// Board store over a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgBoardStore {
    pool: PgPool,
}

impl PgBoardStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn board_from_row(row: &PgRow) -> Result<Board, sqlx::Error> {
    let Json(columns): Json<Vec<Column>> = row.try_get("columns")?;
    Ok(Board {
        id: ObjectId::from(row.try_get::<uuid::Uuid, _>("id")?),
        owner_id: ObjectId::from(row.try_get::<uuid::Uuid, _>("owner_id")?),
        name: row.try_get("name")?,
        columns,
    })
}

#[async_trait]
impl BoardStore for PgBoardStore {
    async fn insert_board(&self, board: Board) -> StoreResult<Board> {
        sqlx::query(
            r#"
            INSERT INTO boards (id, owner_id, name, columns)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(board.id.as_uuid())
        .bind(board.owner_id.as_uuid())
        .bind(&board.name)
        .bind(Json(&board.columns))
        .execute(&self.pool)
        .await?;

        Ok(board)
    }

    async fn find_board(&self, board_id: ObjectId) -> StoreResult<Option<Board>> {
        let row = sqlx::query("SELECT id, owner_id, name, columns FROM boards WHERE id = $1")
            .bind(board_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(board_from_row).transpose()?)
    }

    async fn list_boards(&self, owner_id: ObjectId) -> StoreResult<Vec<BoardSummary>> {
        let rows = sqlx::query("SELECT id, name FROM boards WHERE owner_id = $1 ORDER BY seq")
            .bind(owner_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in &rows {
            summaries.push(BoardSummary {
                id: ObjectId::from(row.try_get::<uuid::Uuid, _>("id")?),
                name: row.try_get("name")?,
            });
        }
        Ok(summaries)
    }

    async fn apply_patch(
        &self,
        board_id: ObjectId,
        patch: &BoardPatch,
    ) -> StoreResult<Option<(Board, PatchResult)>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT id, owner_id, name, columns FROM boards WHERE id = $1 FOR UPDATE")
            .bind(board_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        let mut board = board_from_row(&row)?;
        let result = patch.apply(&mut board);
        tracing::debug!("Applied {} to board {}: {:?}", patch.kind(), board_id, result);

        if result.is_applied() {
            sqlx::query("UPDATE boards SET columns = $1 WHERE id = $2")
                .bind(Json(&board.columns))
                .bind(board_id.as_uuid())
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;
        } else {
            tx.rollback().await?;
        }

        Ok(Some((board, result)))
    }
}
