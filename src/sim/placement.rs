//! Random placement on the grid
//!
//! Rejection sampling against an exclusion predicate, capped at
//! `MAX_PLACEMENT_ATTEMPTS`. When every attempt lands on a blocked cell the
//! grid is scanned row-major for the first free one, so placement always
//! terminates even on a nearly (or completely) full board.

use rand::Rng;

use super::grid::Cell;

/// Random draws before falling back to a scan
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 128;

/// Pick a random cell in `[0, grid_size)²` for which `blocked` is false.
/// Returns `None` only when no free cell exists.
pub fn random_free_cell<R: Rng>(
    rng: &mut R,
    grid_size: i32,
    blocked: impl Fn(Cell) -> bool,
) -> Option<Cell> {
    if grid_size <= 0 {
        return None;
    }
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let cell = Cell::new(rng.random_range(0..grid_size), rng.random_range(0..grid_size));
        if !blocked(cell) {
            return Some(cell);
        }
    }
    first_free_cell(grid_size, blocked)
}

/// First free cell in row-major order
pub fn first_free_cell(grid_size: i32, blocked: impl Fn(Cell) -> bool) -> Option<Cell> {
    (0..grid_size)
        .flat_map(|y| (0..grid_size).map(move |x| Cell::new(x, y)))
        .find(|&cell| !blocked(cell))
}

/// Place up to `count` distinct cells, each avoiding `blocked` and the cells
/// placed before it. Stops early if the board fills up.
pub fn random_free_cells<R: Rng>(
    rng: &mut R,
    grid_size: i32,
    count: usize,
    blocked: impl Fn(Cell) -> bool,
) -> Vec<Cell> {
    let cells = (grid_size.max(0) as usize).pow(2);
    let mut placed: Vec<Cell> = Vec::with_capacity(count.min(cells));
    for _ in 0..count {
        let next = random_free_cell(rng, grid_size, |c| blocked(c) || placed.contains(&c));
        match next {
            Some(cell) => placed.push(cell),
            None => break,
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_free_cell_avoids_blocked() {
        let mut rng = Pcg32::seed_from_u64(3);
        let blocked = |c: Cell| c.x < 3;
        for _ in 0..200 {
            let cell = random_free_cell(&mut rng, 4, blocked).unwrap();
            assert_eq!(cell.x, 3);
            assert!((0..4).contains(&cell.y));
        }
    }

    #[test]
    fn test_single_free_cell_found_by_fallback() {
        let mut rng = Pcg32::seed_from_u64(11);
        let free = Cell::new(17, 4);
        let cell = random_free_cell(&mut rng, 20, |c| c != free);
        assert_eq!(cell, Some(free));
    }

    #[test]
    fn test_full_board_terminates() {
        let mut rng = Pcg32::seed_from_u64(5);
        assert_eq!(random_free_cell(&mut rng, 20, |_| true), None);
        assert_eq!(random_free_cell(&mut rng, 0, |_| false), None);
    }

    #[test]
    fn test_random_free_cells_distinct() {
        let mut rng = Pcg32::seed_from_u64(9);
        let cells = random_free_cells(&mut rng, 3, 9, |_| false);
        assert_eq!(cells.len(), 9);
        for (i, a) in cells.iter().enumerate() {
            assert!(!cells[i + 1..].contains(a));
        }

        // Asking for more than fits stops at the board size
        let cells = random_free_cells(&mut rng, 3, 12, |c| c == Cell::new(0, 0));
        assert_eq!(cells.len(), 8);
    }
}
