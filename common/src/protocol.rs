use serde::{Deserialize, Serialize};

use crate::leaderboard::LeaderboardEntry;

/// Messages a browser client sends over the leaderboard socket.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ClientEvent {
    NewScore { entry: LeaderboardEntry },
}

/// Messages the server pushes to every connected observer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ServerEvent {
    Leaderboard { entries: Vec<LeaderboardEntry> },
}
