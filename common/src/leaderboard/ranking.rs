use std::collections::HashMap;

use super::entry::LeaderboardEntry;

pub const LEADERBOARD_SIZE: usize = 10;

/// Collapse the full submission history into the ranked view: each player's
/// single best game, descending by score, capped at ten rows. A later entry
/// replaces a player's best only on a strictly greater score, so ties keep
/// the earliest submission; the descending sort is stable over first-seen
/// player order.
pub fn top_players(entries: &[LeaderboardEntry]) -> Vec<LeaderboardEntry> {
    let mut best_by_player: HashMap<&str, &LeaderboardEntry> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for entry in entries {
        let replaces_best = match best_by_player.get(entry.player_name.as_str()) {
            None => {
                first_seen.push(&entry.player_name);
                true
            }
            Some(current) => entry.score > current.score,
        };
        if replaces_best {
            best_by_player.insert(&entry.player_name, entry);
        }
    }

    let mut ranked: Vec<LeaderboardEntry> = first_seen
        .into_iter()
        .map(|name| best_by_player[name].clone())
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(LEADERBOARD_SIZE);
    ranked
}
