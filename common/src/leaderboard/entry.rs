use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::game::SessionSummary;

pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// One finished game as submitted to the shared leaderboard. Field names
/// are camelCase on the wire and in the store; entries are immutable once
/// stamped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: i64,
    #[serde(default)]
    pub player_name: String,
    pub score: u32,
    pub foods_eaten: u32,
    pub level: u32,
    pub timestamp: String,
    pub duration: u64,
}

impl LeaderboardEntry {
    /// Stamp a submission from a finished session: id is the submission
    /// time in epoch milliseconds, timestamp a human-readable local time.
    pub fn from_summary(player_name: &str, summary: &SessionSummary) -> Self {
        let now = Local::now();
        Self {
            id: now.timestamp_millis(),
            player_name: normalize_player_name(player_name),
            score: summary.score,
            foods_eaten: summary.foods_eaten,
            level: summary.level,
            timestamp: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            duration: summary.duration_seconds,
        }
    }

    pub fn normalized(mut self) -> Self {
        self.player_name = normalize_player_name(&self.player_name);
        self
    }
}

pub fn normalize_player_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
