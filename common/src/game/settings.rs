use serde::{Deserialize, Serialize};

use super::grid::DEFAULT_GRID_SIZE;

/// Tuning knobs for one game session. `Default` reproduces the classic
/// arcade rules; every field is independently adjustable.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub grid_size: i32,
    pub base_tick_interval_ms: f64,
    pub base_obstacle_count: usize,
    pub foods_per_level: u32,
    pub obstacles_per_level: usize,
    pub points_per_food: u32,
    pub speedup_factor: f64,
    pub obstacle_shuffle_interval: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            base_tick_interval_ms: 150.0,
            base_obstacle_count: 5,
            foods_per_level: 25,
            obstacles_per_level: 2,
            points_per_food: 10,
            speedup_factor: 0.95,
            obstacle_shuffle_interval: 5,
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_size < 5 || self.grid_size > 100 {
            return Err("Grid size must be between 5 and 100".to_string());
        }
        if self.base_tick_interval_ms < 10.0 || self.base_tick_interval_ms > 5000.0 {
            return Err("Base tick interval must be between 10ms and 5000ms".to_string());
        }
        if self.base_obstacle_count >= (self.grid_size * self.grid_size) as usize / 2 {
            return Err("Base obstacle count must leave most of the grid free".to_string());
        }
        if self.foods_per_level == 0 {
            return Err("Foods per level must be at least 1".to_string());
        }
        if self.obstacle_shuffle_interval == 0 {
            return Err("Obstacle shuffle interval must be at least 1".to_string());
        }
        if !(0.1..1.0).contains(&self.speedup_factor) {
            return Err("Speedup factor must be at least 0.1 and below 1.0".to_string());
        }
        Ok(())
    }
}
