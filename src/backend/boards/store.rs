/**
 * Board Storage
 *
 * `BoardStore` is the persistence seam for board documents. A store hands
 * out whole boards and applies [`BoardPatch`]es atomically: the board is
 * read under an exclusive lock, the patch runs against the in-memory tree,
 * and the result is written back only if the patch reported `Applied`.
 */

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::backend::boards::aggregate::{BoardPatch, PatchResult};
use crate::backend::error::StoreResult;
use crate::shared::{Board, BoardSummary, ObjectId};

/// Persistence operations for boards
#[async_trait]
pub trait BoardStore: Send + Sync {
    async fn insert_board(&self, board: Board) -> StoreResult<Board>;

    async fn find_board(&self, board_id: ObjectId) -> StoreResult<Option<Board>>;

    /// Summaries of the owner's boards, oldest first
    async fn list_boards(&self, owner_id: ObjectId) -> StoreResult<Vec<BoardSummary>>;

    /// Apply one patch atomically
    ///
    /// Returns `None` if the board does not exist, otherwise the board as it
    /// is stored after the call together with the patch outcome.
    async fn apply_patch(
        &self,
        board_id: ObjectId,
        patch: &BoardPatch,
    ) -> StoreResult<Option<(Board, PatchResult)>>;
}

#[derive(Debug, Default)]
struct MemoryBoards {
    boards: HashMap<ObjectId, Board>,
    /// Insertion order, for listings
    order: Vec<ObjectId>,
}

/// In-process board store
#[derive(Debug, Default)]
pub struct MemoryBoardStore {
    inner: RwLock<MemoryBoards>,
}

impl MemoryBoardStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BoardStore for MemoryBoardStore {
    async fn insert_board(&self, board: Board) -> StoreResult<Board> {
        let mut inner = self.inner.write().await;
        inner.order.push(board.id);
        inner.boards.insert(board.id, board.clone());
        Ok(board)
    }

    async fn find_board(&self, board_id: ObjectId) -> StoreResult<Option<Board>> {
        Ok(self.inner.read().await.boards.get(&board_id).cloned())
    }

    async fn list_boards(&self, owner_id: ObjectId) -> StoreResult<Vec<BoardSummary>> {
        let inner = self.inner.read().await;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.boards.get(id))
            .filter(|board| board.owner_id == owner_id)
            .map(Board::summary)
            .collect())
    }

    async fn apply_patch(
        &self,
        board_id: ObjectId,
        patch: &BoardPatch,
    ) -> StoreResult<Option<(Board, PatchResult)>> {
        let mut inner = self.inner.write().await;
        let Some(stored) = inner.boards.get_mut(&board_id) else {
            return Ok(None);
        };

        let mut working = stored.clone();
        let result = patch.apply(&mut working);
        if result.is_applied() {
            *stored = working;
        }
        tracing::debug!("Applied {} to board {}: {:?}", patch.kind(), board_id, result);
        Ok(Some((stored.clone(), result)))
    }
}
