use std::collections::HashSet;

use super::grid::Grid;
use super::session_rng::SessionRng;
use super::types::{Cell, Obstacle};

const FOOD_SAMPLE_ATTEMPTS: u32 = 100;
const OBSTACLE_SAMPLE_ATTEMPTS: u32 = 50;

fn random_cell(grid: Grid, rng: &mut SessionRng) -> Cell {
    Cell::new(
        rng.random_range(0..grid.size()),
        rng.random_range(0..grid.size()),
    )
}

/// Pick a food cell disjoint from the snake body and every obstacle.
///
/// Random sampling is bounded; when it runs dry the free cells are
/// enumerated directly, so this terminates on any grid. `None` means the
/// grid holds no free cell at all.
pub fn place_food(
    grid: Grid,
    snake: &HashSet<Cell>,
    obstacles: &[Obstacle],
    rng: &mut SessionRng,
) -> Option<Cell> {
    let occupied = |cell: Cell| snake.contains(&cell) || obstacles.iter().any(|o| o.cell == cell);

    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let candidate = random_cell(grid, rng);
        if !occupied(candidate) {
            return Some(candidate);
        }
    }

    let free: Vec<Cell> = grid.cells().filter(|&cell| !occupied(cell)).collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}

/// Scatter `count` obstacles with random directions, avoiding the snake,
/// the food, and obstacles already placed in this batch. Each placement
/// gives up after a bounded number of attempts and keeps the last
/// candidate, so a crowded grid can produce overlaps rather than a stall.
pub fn place_obstacles(
    grid: Grid,
    snake: &HashSet<Cell>,
    food: Option<Cell>,
    count: usize,
    rng: &mut SessionRng,
) -> Vec<Obstacle> {
    let mut obstacles: Vec<Obstacle> = Vec::with_capacity(count);

    for _ in 0..count {
        let mut candidate = Obstacle::new(random_cell(grid, rng), rng.random_direction());
        let mut attempts = 1;

        while attempts < OBSTACLE_SAMPLE_ATTEMPTS
            && (snake.contains(&candidate.cell)
                || food == Some(candidate.cell)
                || obstacles.iter().any(|o| o.cell == candidate.cell))
        {
            candidate = Obstacle::new(random_cell(grid, rng), rng.random_direction());
            attempts += 1;
        }

        obstacles.push(candidate);
    }

    obstacles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::Direction;

    #[test]
    fn test_food_avoids_snake_and_obstacles() {
        let grid = Grid::default();
        let snake: HashSet<Cell> = (0..10).map(|x| Cell::new(x, 0)).collect();
        let obstacles: Vec<Obstacle> = (0..10)
            .map(|x| Obstacle::new(Cell::new(x, 1), Direction::Up))
            .collect();
        let mut rng = SessionRng::new(1);

        for _ in 0..200 {
            let food = place_food(grid, &snake, &obstacles, &mut rng)
                .expect("grid has free cells");
            assert!(!snake.contains(&food));
            assert!(obstacles.iter().all(|o| o.cell != food));
            assert!(grid.contains(food));
        }
    }

    #[test]
    fn test_food_found_on_nearly_full_grid() {
        let grid = Grid::new(3);
        let only_free = Cell::new(2, 2);
        let snake: HashSet<Cell> = grid.cells().filter(|&c| c != only_free).collect();
        let mut rng = SessionRng::new(2);

        let food = place_food(grid, &snake, &[], &mut rng);

        assert_eq!(food, Some(only_free));
    }

    #[test]
    fn test_food_none_on_saturated_grid() {
        let grid = Grid::new(2);
        let snake: HashSet<Cell> = grid.cells().collect();
        let mut rng = SessionRng::new(3);

        assert_eq!(place_food(grid, &snake, &[], &mut rng), None);
    }

    #[test]
    fn test_obstacles_disjoint_when_room_exists() {
        let grid = Grid::default();
        let snake: HashSet<Cell> = [Cell::new(10, 10)].into_iter().collect();
        let food = Some(Cell::new(15, 15));
        let mut rng = SessionRng::new(4);

        let obstacles = place_obstacles(grid, &snake, food, 12, &mut rng);

        assert_eq!(obstacles.len(), 12);
        let cells: HashSet<Cell> = obstacles.iter().map(|o| o.cell).collect();
        assert_eq!(cells.len(), 12);
        assert!(obstacles.iter().all(|o| !snake.contains(&o.cell)));
        assert!(obstacles.iter().all(|o| Some(o.cell) != food));
    }

    #[test]
    fn test_obstacle_count_honored_even_when_saturated() {
        let grid = Grid::new(2);
        let snake: HashSet<Cell> = grid.cells().collect();
        let mut rng = SessionRng::new(5);

        let obstacles = place_obstacles(grid, &snake, None, 3, &mut rng);

        // no free cell exists, so the cap kicks in and overlaps are kept
        assert_eq!(obstacles.len(), 3);
    }
}
