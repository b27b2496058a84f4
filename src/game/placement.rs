//! Random placement of food, bombs and power-ups on free cells

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use super::state::Position;

/// Occupancy ratio from which free cells are enumerated instead of sampled
const ENUMERATE_ABOVE_OCCUPANCY: f64 = 0.7;

/// Rejected draws tolerated before falling back to enumeration
const MAX_SAMPLE_ATTEMPTS: usize = 64;

/// Pick a uniformly random cell of the grid that is not in `occupied`
///
/// Rejection sampling is used while the board is mostly empty. Once the
/// occupied share reaches 70% (or sampling keeps hitting taken cells) the free
/// cells are listed and one is chosen directly, so the call always terminates.
/// Returns `None` when the board has no free cell left.
pub fn random_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    grid_size: usize,
    occupied: &HashSet<Position>,
) -> Option<Position> {
    let total = grid_size * grid_size;
    let taken = occupied.iter().filter(|p| p.is_within(grid_size)).count();
    if taken >= total {
        return None;
    }

    if (taken as f64) < total as f64 * ENUMERATE_ABOVE_OCCUPANCY {
        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            let pos = random_cell(rng, grid_size);
            if !occupied.contains(&pos) {
                return Some(pos);
            }
        }
    }

    free_cells(grid_size, occupied).choose(rng).copied()
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R, grid_size: usize) -> Position {
    let x = rng.gen_range(0..grid_size) as i32;
    let y = rng.gen_range(0..grid_size) as i32;
    Position::new(x, y)
}

/// All cells not in `occupied`, row by row
pub fn free_cells(grid_size: usize, occupied: &HashSet<Position>) -> Vec<Position> {
    let size = grid_size as i32;
    (0..size)
        .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
        .filter(|pos| !occupied.contains(pos))
        .collect()
}
