use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Seeded uniform board fill, optionally constrained to a match-free start.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
    start: StartBoard,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64, start: StartBoard) -> Self {
        Self { seed, start }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: &GameConfig) -> Board {
        use StartBoard::*;

        let size = usize::from(config.size);
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let actual_start = match self.start {
            MatchFree if size < MIN_RUN => {
                log::warn!(
                    "board of size {} cannot contain a run of {}, fallback to unchecked fill",
                    config.size,
                    MIN_RUN
                );
                Unchecked
            }
            other => other,
        };

        let gems = match actual_start {
            Unchecked => Array2::from_shape_fn((size, size), |_| Gem::random(&mut rng)),
            MatchFree => {
                let mut gems = Array2::from_elem((size, size), Gem::Red);
                for row in 0..size {
                    for col in 0..size {
                        let mut gem = Gem::random(&mut rng);
                        while closes_run(&gems, (row, col), gem) {
                            gem = Gem::random(&mut rng);
                        }
                        gems[[row, col]] = gem;
                    }
                }
                gems
            }
        };

        Board::from_gems(gems)
    }
}

/// Whether placing `gem` at `(row, col)` would complete a run with the
/// already-placed cells to its left or above. At most two of the seven
/// kinds are ever excluded, so a fresh draw always terminates.
fn closes_run(gems: &Array2<Gem>, (row, col): (usize, usize), gem: Gem) -> bool {
    let need = MIN_RUN - 1;
    if col >= need && (1..=need).all(|d| gems[[row, col - d]] == gem) {
        return true;
    }
    if row >= need && (1..=need).all(|d| gems[[row - d, col]] == gem) {
        return true;
    }
    false
}
