use std::collections::{HashSet, VecDeque};

use crate::log;

use super::grid::Grid;
use super::obstacles::{advance_obstacles, shuffle_directions};
use super::placement::{place_food, place_obstacles};
use super::session_rng::SessionRng;
use super::settings::GameSettings;
use super::types::{Cell, Direction, GameEndReason, GamePhase, Obstacle};

/// Full state of one game. `step` is the only transition that advances the
/// world; it is synchronous and deterministic for a given rng, which is what
/// keeps the engine testable without timers.
#[derive(Clone, Debug)]
pub struct GameState {
    pub settings: GameSettings,
    pub grid: Grid,
    pub snake: VecDeque<Cell>,
    pub snake_set: HashSet<Cell>,
    pub food: Cell,
    pub direction: Direction,
    pub pending_direction: Option<Direction>,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub foods_eaten: u32,
    pub level: u32,
    pub tick_interval_ms: f64,
    pub phase: GamePhase,
    pub end_reason: Option<GameEndReason>,
}

impl GameState {
    pub fn new(settings: GameSettings, rng: &mut SessionRng) -> Self {
        let grid = Grid::new(settings.grid_size);
        let start = Cell::new(grid.size() / 2, grid.size() / 2);
        let food = Cell::new(grid.size() * 3 / 4, grid.size() * 3 / 4);

        let mut snake = VecDeque::new();
        snake.push_back(start);
        let mut snake_set = HashSet::new();
        snake_set.insert(start);

        let obstacles = place_obstacles(
            grid,
            &snake_set,
            Some(food),
            settings.base_obstacle_count,
            rng,
        );

        Self {
            grid,
            snake,
            snake_set,
            food,
            direction: Direction::Right,
            pending_direction: None,
            obstacles,
            score: 0,
            foods_eaten: 0,
            level: 1,
            tick_interval_ms: settings.base_tick_interval_ms,
            phase: GamePhase::Idle,
            end_reason: None,
            settings,
        }
    }

    pub fn head(&self) -> Cell {
        *self.snake.front().expect("snake body is never empty")
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Idle/Paused resume; GameOver starts over from a fresh board.
    pub fn start(&mut self, rng: &mut SessionRng) {
        match self.phase {
            GamePhase::Idle | GamePhase::Paused => self.phase = GamePhase::Running,
            GamePhase::GameOver => {
                self.reset(rng);
                self.phase = GamePhase::Running;
            }
            GamePhase::Running => {}
        }
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn reset(&mut self, rng: &mut SessionRng) {
        *self = GameState::new(self.settings.clone(), rng);
    }

    /// Buffer a direction change for the next tick. A reversal into the
    /// snake's own neck is ignored; between ticks the most recent accepted
    /// key wins.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.phase != GamePhase::Running {
            return;
        }
        if direction.is_opposite(&self.direction) {
            return;
        }
        self.pending_direction = Some(direction);
    }

    /// Advance the world one tick. Does nothing unless Running.
    pub fn step(&mut self, rng: &mut SessionRng) {
        if self.phase != GamePhase::Running {
            return;
        }

        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let next_head = self.head().step(self.direction);

        advance_obstacles(&mut self.obstacles, self.grid);

        if !self.grid.contains(next_head) {
            self.finish(GameEndReason::WallCollision);
            return;
        }
        if self.snake_set.contains(&next_head) {
            self.finish(GameEndReason::SelfCollision);
            return;
        }
        if self.obstacles.iter().any(|o| o.cell == next_head) {
            self.finish(GameEndReason::ObstacleCollision);
            return;
        }

        self.snake.push_front(next_head);
        self.snake_set.insert(next_head);

        if next_head == self.food {
            self.eat_food(rng);
        } else {
            let tail = self.snake.pop_back().expect("snake body is never empty");
            self.snake_set.remove(&tail);
        }
    }

    fn eat_food(&mut self, rng: &mut SessionRng) {
        self.foods_eaten += 1;
        self.score += self.settings.points_per_food;
        self.tick_interval_ms *= self.settings.speedup_factor;

        if self.foods_eaten % self.settings.obstacle_shuffle_interval == 0 {
            shuffle_directions(&mut self.obstacles, rng);
        }

        let new_level = self.foods_eaten / self.settings.foods_per_level + 1;
        if new_level > self.level {
            self.level = new_level;
            let count = self.settings.base_obstacle_count
                + (new_level as usize - 1) * self.settings.obstacles_per_level;
            self.obstacles = place_obstacles(self.grid, &self.snake_set, None, count, rng);
            log!(
                "Level up: level {}, {} obstacles on the field",
                self.level,
                self.obstacles.len()
            );
        }

        // a fully saturated grid yields no free cell; the stale food cell
        // then sits under the snake and cannot be eaten again
        if let Some(food) = place_food(self.grid, &self.snake_set, &self.obstacles, rng) {
            self.food = food;
        }
    }

    fn finish(&mut self, reason: GameEndReason) {
        self.phase = GamePhase::GameOver;
        self.end_reason = Some(reason);
        log!(
            "Game over ({:?}): score {}, {} foods, level {}",
            reason,
            self.score,
            self.foods_eaten,
            self.level
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle_free_settings() -> GameSettings {
        GameSettings {
            base_obstacle_count: 0,
            ..GameSettings::default()
        }
    }

    fn running_state(settings: GameSettings) -> (GameState, SessionRng) {
        let mut rng = SessionRng::new(1234);
        let mut state = GameState::new(settings, &mut rng);
        state.start(&mut rng);
        (state, rng)
    }

    fn force_snake(state: &mut GameState, cells: &[Cell]) {
        state.snake = cells.iter().copied().collect();
        state.snake_set = cells.iter().copied().collect();
    }

    #[test]
    fn test_initial_board_layout() {
        let mut rng = SessionRng::new(1);
        let state = GameState::new(GameSettings::default(), &mut rng);

        assert_eq!(state.head(), Cell::new(10, 10));
        assert_eq!(state.food, Cell::new(15, 15));
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.obstacles.len(), 5);
        assert_eq!(state.level, 1);
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_plain_move_shifts_head_keeps_length() {
        let (mut state, mut rng) = running_state(obstacle_free_settings());
        let length_before = state.snake.len();

        state.step(&mut rng);

        assert_eq!(state.head(), Cell::new(11, 10));
        assert_eq!(state.snake.len(), length_before);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_eating_food_grows_and_scores() {
        let (mut state, mut rng) = running_state(obstacle_free_settings());
        state.food = Cell::new(11, 10);

        state.step(&mut rng);

        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.score, 10);
        assert_eq!(state.foods_eaten, 1);
        assert_ne!(state.food, Cell::new(11, 10));
    }

    #[test]
    fn test_speed_decays_by_factor_per_food() {
        let (mut state, mut rng) = running_state(obstacle_free_settings());
        state.food = Cell::new(11, 10);

        state.step(&mut rng);

        assert!((state.tick_interval_ms - 150.0 * 0.95).abs() < 1e-9);

        state.food = Cell::new(12, 10);
        state.step(&mut rng);

        assert!((state.tick_interval_ms - 150.0 * 0.95 * 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_wall_collision_is_terminal() {
        let (mut state, mut rng) = running_state(obstacle_free_settings());
        force_snake(&mut state, &[Cell::new(19, 10)]);
        state.score = 30;

        state.step(&mut rng);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.end_reason, Some(GameEndReason::WallCollision));
        assert_eq!(state.score, 30);
        assert_eq!(state.head(), Cell::new(19, 10));
    }

    #[test]
    fn test_self_collision_is_terminal() {
        let (mut state, mut rng) = running_state(obstacle_free_settings());
        force_snake(
            &mut state,
            &[
                Cell::new(10, 10),
                Cell::new(11, 10),
                Cell::new(11, 11),
                Cell::new(10, 11),
            ],
        );
        state.direction = Direction::Down;

        state.step(&mut rng);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.end_reason, Some(GameEndReason::SelfCollision));
    }

    #[test]
    fn test_obstacle_collision_checked_after_advance() {
        let (mut state, mut rng) = running_state(obstacle_free_settings());
        // moving Up lands this obstacle exactly on the snake's next head
        state.obstacles = vec![Obstacle::new(Cell::new(11, 11), Direction::Up)];

        state.step(&mut rng);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.end_reason, Some(GameEndReason::ObstacleCollision));
    }

    #[test]
    fn test_obstacle_moving_away_is_no_collision() {
        let (mut state, mut rng) = running_state(obstacle_free_settings());
        state.obstacles = vec![Obstacle::new(Cell::new(11, 10), Direction::Down)];

        state.step(&mut rng);

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.head(), Cell::new(11, 10));
    }

    #[test]
    fn test_level_up_adds_two_obstacles() {
        let (mut state, mut rng) = running_state(obstacle_free_settings());
        state.settings.base_obstacle_count = 5;
        state.foods_eaten = 24;
        state.food = Cell::new(11, 10);

        state.step(&mut rng);

        assert_eq!(state.foods_eaten, 25);
        assert_eq!(state.level, 2);
        assert_eq!(state.obstacles.len(), 5 + 2);
    }

    #[test]
    fn test_level_flat_below_threshold() {
        let (mut state, mut rng) = running_state(obstacle_free_settings());
        state.foods_eaten = 23;
        state.food = Cell::new(11, 10);

        state.step(&mut rng);

        assert_eq!(state.foods_eaten, 24);
        assert_eq!(state.level, 1);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_opposite_direction_rejected() {
        let (mut state, mut rng) = running_state(obstacle_free_settings());

        state.set_direction(Direction::Left);
        state.step(&mut rng);

        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.head(), Cell::new(11, 10));
    }

    #[test]
    fn test_latest_pending_direction_wins() {
        let (mut state, mut rng) = running_state(obstacle_free_settings());

        state.set_direction(Direction::Up);
        state.set_direction(Direction::Down);
        state.step(&mut rng);

        assert_eq!(state.direction, Direction::Down);
        assert_eq!(state.head(), Cell::new(10, 11));
    }

    #[test]
    fn test_input_ignored_unless_running() {
        let mut rng = SessionRng::new(8);
        let mut state = GameState::new(obstacle_free_settings(), &mut rng);

        state.set_direction(Direction::Up);
        assert_eq!(state.pending_direction, None);

        state.start(&mut rng);
        state.pause();
        state.set_direction(Direction::Up);
        assert_eq!(state.pending_direction, None);
    }

    #[test]
    fn test_no_ticks_while_paused() {
        let (mut state, mut rng) = running_state(obstacle_free_settings());
        state.pause();

        state.step(&mut rng);

        assert_eq!(state.head(), Cell::new(10, 10));
        assert_eq!(state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_start_after_game_over_resets_board() {
        let (mut state, mut rng) = running_state(obstacle_free_settings());
        force_snake(&mut state, &[Cell::new(19, 10)]);
        state.score = 50;
        state.step(&mut rng);
        assert!(state.is_over());

        state.start(&mut rng);

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.head(), Cell::new(10, 10));
        assert_eq!(state.end_reason, None);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let (mut state, mut rng) = running_state(obstacle_free_settings());
        state.step(&mut rng);

        state.reset(&mut rng);

        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 1);
    }

    #[test]
    fn test_same_seed_replays_identically() {
        let settings = GameSettings::default();
        let mut rng_a = SessionRng::new(777);
        let mut rng_b = SessionRng::new(777);
        let mut a = GameState::new(settings.clone(), &mut rng_a);
        let mut b = GameState::new(settings, &mut rng_b);
        a.start(&mut rng_a);
        b.start(&mut rng_b);

        for _ in 0..50 {
            a.step(&mut rng_a);
            b.step(&mut rng_b);
        }

        assert_eq!(a.snake, b.snake);
        assert_eq!(a.food, b.food);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.phase, b.phase);
    }
}
