use super::grid::Grid;
use super::session_rng::SessionRng;
use super::types::Obstacle;

/// Step every obstacle one cell along its direction. An obstacle whose
/// tentative cell would leave the grid reverses instead and stays put for
/// this tick; it moves again on the next one.
pub fn advance_obstacles(obstacles: &mut [Obstacle], grid: Grid) {
    for obstacle in obstacles.iter_mut() {
        let next = obstacle.cell.step(obstacle.direction);
        if grid.contains(next) {
            obstacle.cell = next;
        } else {
            obstacle.direction = obstacle.direction.reversed();
        }
    }
}

/// Re-randomize every obstacle's direction independently.
pub fn shuffle_directions(obstacles: &mut [Obstacle], rng: &mut SessionRng) {
    for obstacle in obstacles.iter_mut() {
        obstacle.direction = rng.random_direction();
    }
}
