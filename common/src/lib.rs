pub mod game;
pub mod identifiers;
pub mod leaderboard;
pub mod logger;
pub mod protocol;

pub use identifiers::ClientId;
