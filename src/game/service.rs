use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::keywords::KeywordPool;
use crate::room::repository::{EliminateResult, RoomRepository, StartGameResult};
use crate::shared::AppError;

/// Service for round lifecycle business logic: starting, restarting and
/// self-elimination
pub struct GameService {
    repository: Arc<dyn RoomRepository + Send + Sync>,
    keyword_pool: Arc<KeywordPool>,
}

impl GameService {
    pub fn new(
        repository: Arc<dyn RoomRepository + Send + Sync>,
        keyword_pool: Arc<KeywordPool>,
    ) -> Self {
        Self {
            repository,
            keyword_pool,
        }
    }

    /// Starts (or restarts) a round; only the room's host may do this
    #[instrument(skip(self))]
    pub async fn start_game(
        &self,
        room_id: &str,
        requester_id: &str,
    ) -> Result<StartGameResult, AppError> {
        let result = self
            .repository
            .start_game(room_id, requester_id, &self.keyword_pool)
            .await?;

        match &result {
            StartGameResult::Started(room) => {
                info!(
                    room_id = %room_id,
                    player_count = room.player_count(),
                    "Round started, keywords dealt"
                );
            }
            StartGameResult::NotHost => {
                warn!(
                    room_id = %room_id,
                    requester_id = %requester_id,
                    "Round start rejected, requester is not the host"
                );
            }
            StartGameResult::RoomNotFound => {
                warn!(room_id = %room_id, "Round start rejected, room not found");
            }
        }

        Ok(result)
    }

    /// Marks a player eliminated; players may only eliminate themselves
    #[instrument(skip(self))]
    pub async fn eliminate_player(
        &self,
        room_id: &str,
        requester_id: &str,
        target_id: &str,
    ) -> Result<EliminateResult, AppError> {
        let result = self
            .repository
            .eliminate_player(room_id, requester_id, target_id)
            .await?;

        if let EliminateResult::Eliminated { room, game_over } = &result {
            info!(
                room_id = %room_id,
                target_id = %target_id,
                game_over = game_over,
                winner = ?room.winner,
                "Player eliminated"
            );
        }

        Ok(result)
    }
}
