mod grid;
mod obstacles;
mod placement;
mod session;
mod session_rng;
mod settings;
mod state;
mod types;

pub use grid::{DEFAULT_GRID_SIZE, Grid};
pub use obstacles::{advance_obstacles, shuffle_directions};
pub use placement::{place_food, place_obstacles};
pub use session::{GameSession, GameSnapshot, SessionSummary, SnapshotSink};
pub use session_rng::SessionRng;
pub use settings::GameSettings;
pub use state::GameState;
pub use types::{Cell, Direction, GameEndReason, GamePhase, Obstacle};
