use rand::Rng;

use crate::*;

/// Flags every cell of a detection pass for the next gravity pass.
pub fn mark_matches(board: &mut Board, matches: &MatchSet) {
    for coords in matches.iter() {
        board.mark_matched(coords);
    }
}

/// One gravity pass over every column, bottom row upward: a matched cell
/// takes the gem of the nearest unmatched cell above it (the hole bubbles
/// up to that source), or a fresh random gem once the column is exhausted.
/// Every matched flag is cleared by the time the pass returns; the caller
/// re-detects, because refills can open new runs.
pub fn apply_gravity<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> CellCount {
    let (rows, cols) = board.size();
    let mut moved: CellCount = 0;

    for col in 0..cols {
        for row in (0..rows).rev() {
            if !board[(row, col)].matched {
                continue;
            }

            let source = (0..row).rev().find(|&src| !board[(src, col)].matched);
            match source {
                Some(src) => {
                    board[(row, col)].gem = board[(src, col)].gem;
                    board[(src, col)].matched = true;
                }
                None => {
                    board[(row, col)].gem = Gem::random(rng);
                }
            }

            board[(row, col)].matched = false;
            moved += 1;
        }
    }

    log::debug!("gravity pass rewrote {moved} cells");
    debug_assert!(!board.has_matched_cells());
    moved
}
