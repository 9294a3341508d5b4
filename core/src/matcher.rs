use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::*;

/// Minimum run length that counts as a match.
pub const MIN_RUN: usize = 3;

type RunBuf = SmallVec<[Coord2; 8]>;

/// Deduplicated set of matched cell positions produced by one detection pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchSet {
    cells: HashSet<Coord2>,
}

impl MatchSet {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.cells.contains(&coords)
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells.iter().copied()
    }

    fn insert_run(&mut self, run: &RunBuf) {
        if run.len() >= MIN_RUN {
            self.cells.extend(run.iter().copied());
        }
    }
}

/// Scans every row, then every column, for runs of at least [`MIN_RUN`]
/// equal gems. Overlapping row/column runs deduplicate through the set;
/// diagonals never match. A run longer than [`MIN_RUN`] contributes all
/// of its cells once.
pub fn find_matches(board: &Board) -> MatchSet {
    let mut matches = MatchSet::default();
    let (rows, cols) = board.size();

    for row in 0..rows {
        let mut current: Option<Gem> = None;
        let mut run = RunBuf::new();
        for col in 0..cols {
            let gem = board[(row, col)].gem;
            if current != Some(gem) {
                matches.insert_run(&run);
                run.clear();
                current = Some(gem);
            }
            run.push((row, col));
        }
        matches.insert_run(&run);
    }

    for col in 0..cols {
        let mut current: Option<Gem> = None;
        let mut run = RunBuf::new();
        for row in 0..rows {
            let gem = board[(row, col)].gem;
            if current != Some(gem) {
                matches.insert_run(&run);
                run.clear();
                current = Some(gem);
            }
            run.push((row, col));
        }
        matches.insert_run(&run);
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use ndarray::Array2;

    fn board(rows: &[&[Gem]]) -> Board {
        let shape = (rows.len(), rows[0].len());
        let flat: Vec<Gem> = rows.iter().flat_map(|row| row.iter().copied()).collect();
        Board::from_gems(Array2::from_shape_vec(shape, flat).unwrap())
    }

    fn sorted(matches: &MatchSet) -> Vec<Coord2> {
        let mut cells: Vec<Coord2> = matches.iter().collect();
        cells.sort_unstable();
        cells
    }

    /// Checkerboard-style fill with no run anywhere.
    fn stable_8x8() -> Board {
        use Gem::*;
        let even: &[Gem] = &[Red, Blue, Red, Blue, Red, Blue, Red, Blue];
        let odd: &[Gem] = &[Green, Yellow, Green, Yellow, Green, Yellow, Green, Yellow];
        board(&[even, odd, even, odd, even, odd, even, odd])
    }

    #[test]
    fn detects_exactly_one_horizontal_run() {
        use Gem::*;
        let mut fixed = stable_8x8();
        fixed.set_gem((0, 1), Red).unwrap();
        fixed.set_gem((0, 2), Red).unwrap();

        let matches = find_matches(&fixed);

        assert_eq!(sorted(&matches), [(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn long_run_contributes_every_cell_once() {
        use Gem::*;
        let fixed = board(&[
            &[Red, Red, Red, Red],
            &[Green, Yellow, Green, Yellow],
            &[Blue, Orange, Blue, Orange],
            &[Green, Yellow, Green, Yellow],
        ]);

        let matches = find_matches(&fixed);

        assert_eq!(sorted(&matches), [(0, 0), (0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn crossing_runs_share_the_corner_cell() {
        use Gem::*;
        let fixed = board(&[
            &[Red, Red, Red, Blue],
            &[Red, Yellow, Green, Yellow],
            &[Red, Orange, Blue, Orange],
            &[Green, Yellow, Green, Pink],
        ]);

        let matches = find_matches(&fixed);

        assert_eq!(matches.len(), 5);
        assert!(matches.contains((0, 0)));
        assert!(matches.contains((2, 0)));
        assert!(matches.contains((0, 2)));
    }

    #[test]
    fn diagonal_runs_do_not_match() {
        use Gem::*;
        let fixed = board(&[
            &[Red, Blue, Green, Yellow],
            &[Blue, Red, Yellow, Green],
            &[Green, Yellow, Red, Blue],
            &[Yellow, Green, Blue, Pink],
        ]);

        assert!(find_matches(&fixed).is_empty());
    }

    #[test]
    fn scan_is_idempotent_on_a_stable_board() {
        let fixed = stable_8x8();

        let first = find_matches(&fixed);
        let second = find_matches(&fixed);

        assert!(first.is_empty());
        assert_eq!(first, second);
    }
}
