use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::Mutex;

use super::session_rng::SessionRng;
use super::settings::GameSettings;
use super::state::GameState;
use super::types::{Cell, Direction, GameEndReason, GamePhase, Obstacle};

/// Read-only view of the world handed to the rendering layer after every
/// tick. The renderer draws it and sends intents back; it never touches
/// engine state directly.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub direction: Direction,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub foods_eaten: u32,
    pub level: u32,
    pub tick_interval_ms: f64,
    pub phase: GamePhase,
    pub end_reason: Option<GameEndReason>,
}

impl GameSnapshot {
    pub fn of(state: &GameState) -> Self {
        Self {
            snake: state.snake.iter().copied().collect(),
            food: state.food,
            direction: state.direction,
            obstacles: state.obstacles.clone(),
            score: state.score,
            foods_eaten: state.foods_eaten,
            level: state.level,
            tick_interval_ms: state.tick_interval_ms,
            phase: state.phase,
            end_reason: state.end_reason,
        }
    }
}

/// What the session hands over when the run ends; the owner turns this into
/// a leaderboard submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    pub foods_eaten: u32,
    pub level: u32,
    pub duration_seconds: u64,
}

/// Seam between the engine and whatever presents it.
pub trait SnapshotSink: Send + Sync + 'static {
    fn publish(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;

    fn game_over(&self, summary: SessionSummary) -> impl Future<Output = ()> + Send;
}

/// One playthrough: owns the state and its rng, accepts control intents at
/// any time, and drives ticks either manually (`tick`) or on the runner's
/// self-rescheduling timer (`run`).
#[derive(Clone)]
pub struct GameSession {
    state: Arc<Mutex<GameState>>,
    rng: Arc<Mutex<SessionRng>>,
    play_started: Arc<Mutex<Option<Instant>>>,
}

impl GameSession {
    pub fn create(settings: GameSettings, seed: u64) -> Result<Self, String> {
        settings.validate()?;
        let mut rng = SessionRng::new(seed);
        let state = GameState::new(settings, &mut rng);
        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            rng: Arc::new(Mutex::new(rng)),
            play_started: Arc::new(Mutex::new(None)),
        })
    }

    pub async fn start(&self) {
        let mut state = self.state.lock().await;
        let mut rng = self.rng.lock().await;
        state.start(&mut rng);

        let mut started = self.play_started.lock().await;
        if started.is_none() {
            *started = Some(Instant::now());
        }
    }

    pub async fn pause(&self) {
        self.state.lock().await.pause();
    }

    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        let mut rng = self.rng.lock().await;
        state.reset(&mut rng);
        *self.play_started.lock().await = None;
    }

    pub async fn set_direction(&self, direction: Direction) {
        self.state.lock().await.set_direction(direction);
    }

    pub async fn tick(&self) -> GameSnapshot {
        let mut state = self.state.lock().await;
        let mut rng = self.rng.lock().await;
        state.step(&mut rng);
        GameSnapshot::of(&state)
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::of(&*self.state.lock().await)
    }

    pub async fn summary(&self) -> SessionSummary {
        let state = self.state.lock().await;
        let duration_seconds = self
            .play_started
            .lock()
            .await
            .map(|started| started.elapsed().as_secs())
            .unwrap_or(0);
        SessionSummary {
            score: state.score,
            foods_eaten: state.foods_eaten,
            level: state.level,
            duration_seconds,
        }
    }

    /// Tick loop. The sleep re-arms at whatever the interval is after each
    /// tick, so every food eaten shortens the period from the next tick on.
    /// Exactly one tick is ever in flight. Ends at game over.
    pub async fn run(self, sink: impl SnapshotSink) -> SessionSummary {
        loop {
            let interval_ms = self.state.lock().await.tick_interval_ms;
            tokio::time::sleep(Duration::from_secs_f64(interval_ms / 1000.0)).await;

            let snapshot = self.tick().await;
            let over = snapshot.phase == GamePhase::GameOver;
            sink.publish(snapshot).await;

            if over {
                break;
            }
        }

        let summary = self.summary().await;
        sink.game_over(summary.clone()).await;
        summary
    }
}
