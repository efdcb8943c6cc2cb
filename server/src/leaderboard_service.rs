use std::sync::Arc;

use tokio::sync::Mutex;

use common::leaderboard::{LeaderboardEntry, top_players};
use common::log;
use common::protocol::ServerEvent;

use crate::broadcaster::Broadcaster;
use crate::storage::LeaderboardStorage;

/// Authoritative owner of the score history. Constructed once at startup
/// with its storage injected and shared by handle with every connection
/// handler. Submissions serialize through one lock around the
/// read-append-write of the store, so concurrent sessions cannot lose
/// each other's entries. Scores are taken at face value; nothing checks
/// them against what a real game could produce.
#[derive(Clone)]
pub struct LeaderboardService {
    storage: Arc<Mutex<LeaderboardStorage>>,
    broadcaster: Broadcaster,
}

impl LeaderboardService {
    pub fn new(storage: LeaderboardStorage, broadcaster: Broadcaster) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
            broadcaster,
        }
    }

    /// Append one submission, persist the full history, and push the fresh
    /// ranked view to every observer. Returns that view. A storage failure
    /// surfaces to this caller only; nothing is retried.
    pub async fn submit(
        &self,
        entry: LeaderboardEntry,
    ) -> Result<Vec<LeaderboardEntry>, String> {
        let entry = entry.normalized();
        let player_name = entry.player_name.clone();
        let score = entry.score;

        let ranked = {
            let storage = self.storage.lock().await;
            let mut history = storage
                .load()
                .map_err(|e| format!("Failed to read leaderboard store: {}", e))?;
            history.push(entry);
            storage
                .save(&history)
                .map_err(|e| format!("Failed to write leaderboard store: {}", e))?;
            top_players(&history)
        };

        log!(
            "Score recorded for {} ({}); {} players ranked",
            player_name,
            score,
            ranked.len()
        );

        self.broadcaster
            .broadcast_to_all(ServerEvent::Leaderboard {
                entries: ranked.clone(),
            })
            .await;

        Ok(ranked)
    }

    pub async fn top10(&self) -> Result<Vec<LeaderboardEntry>, String> {
        let storage = self.storage.lock().await;
        let history = storage
            .load()
            .map_err(|e| format!("Failed to read leaderboard store: {}", e))?;
        Ok(top_players(&history))
    }
}
