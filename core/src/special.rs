use alloc::vec::Vec;
use rand::seq::SliceRandom;

use crate::*;

impl BoardEngine {
    /// Blasts the 3x3 block around `center` (clipped at board edges) and
    /// routes the holes through the same resolution loop as a match. The
    /// score bonus is flat, regardless of how many cells the blast hit.
    pub fn use_bomb(&mut self, state: &mut RoundState, center: Coord2) -> Result<CellCount> {
        state.check_active()?;
        self.check_idle()?;
        let center = self.board.validate_coords(center)?;
        state.spend_bomb()?;

        self.board.mark_matched(center);
        let mut blasted: CellCount = 1;
        for coords in self.board.iter_neighbors(center) {
            self.board.mark_matched(coords);
            blasted += 1;
        }

        state.award(self.bomb_score);
        self.phase = EnginePhase::Resolving;
        log::debug!("bomb blasted {blasted} cells around {center:?}");
        Ok(blasted)
    }

    /// Fisher-Yates permutation of every gem on the board, written back
    /// row-major. No detection pass runs afterwards: runs the shuffle
    /// happens to create stay on the board until the next swap scans it.
    pub fn mix_grid(&mut self, state: &mut RoundState) -> Result<()> {
        state.check_active()?;
        self.check_idle()?;
        state.spend_mix()?;

        let (rows, cols) = self.board.size();
        let mut gems: Vec<Gem> = Vec::with_capacity(usize::from(self.board.total_cells()));
        for row in 0..rows {
            for col in 0..cols {
                gems.push(self.board[(row, col)].gem);
            }
        }

        gems.shuffle(&mut self.rng);

        let mut drain = gems.into_iter();
        for row in 0..rows {
            for col in 0..cols {
                self.board[(row, col)].gem = drain.next().unwrap();
            }
        }

        log::debug!("board mixed, {} mixes left", state.mixes_left());
        Ok(())
    }
}
