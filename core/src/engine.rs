use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EnginePhase {
    Idle,
    Resolving,
}

impl EnginePhase {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl Default for EnginePhase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Outcome of a proposed swap. A swap that forms no run is kept on the
/// board rather than reverted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SwapOutcome {
    Kept,
    Matched { cleared: CellCount },
}

impl SwapOutcome {
    pub const fn starts_resolution(self) -> bool {
        match self {
            Self::Kept => false,
            Self::Matched { .. } => true,
        }
    }
}

/// Outcome of one resolution step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StepOutcome {
    NoChange,
    Cascading { cleared: CellCount },
    Settled,
}

impl StepOutcome {
    pub const fn has_update(self) -> bool {
        use StepOutcome::*;
        match self {
            NoChange => false,
            Cascading { .. } => true,
            Settled => true,
        }
    }
}

/// Owns the board and serializes every mutation behind a single phase
/// guard: while a resolution cycle is in flight, new input is rejected
/// rather than queued.
#[derive(Clone, Debug)]
pub struct BoardEngine {
    pub(crate) board: Board,
    pub(crate) rng: SmallRng,
    pub(crate) phase: EnginePhase,
    pub(crate) score_per_gem: Score,
    pub(crate) bomb_score: Score,
}

impl BoardEngine {
    pub fn new(board: Board, config: &GameConfig, seed: u64) -> Self {
        Self {
            board,
            rng: SmallRng::seed_from_u64(seed),
            phase: Default::default(),
            score_per_gem: config.score_per_gem,
            bomb_score: config.bomb_score,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Exchanges two adjacent gems and starts a resolution cycle when the
    /// exchange forms at least one run. A swap that forms no run stays on
    /// the board unreverted.
    pub fn propose_swap(
        &mut self,
        state: &mut RoundState,
        a: Coord2,
        b: Coord2,
    ) -> Result<SwapOutcome> {
        state.check_active()?;
        self.check_idle()?;
        let a = self.board.validate_coords(a)?;
        let b = self.board.validate_coords(b)?;
        if !is_adjacent(a, b) {
            return Err(GameError::InvalidSwap);
        }

        self.board.swap_gems(a, b);
        Ok(match self.detect_and_score(state) {
            0 => SwapOutcome::Kept,
            cleared => SwapOutcome::Matched { cleared },
        })
    }

    /// One cooperative resolution step: a gravity pass followed by
    /// re-detection. The shell paces cascade animation by calling this
    /// repeatedly; an in-flight cycle finishes even after the round timer
    /// runs out, so the board is never left mid-resolution.
    pub fn step(&mut self, state: &mut RoundState) -> StepOutcome {
        if self.phase.is_idle() {
            return StepOutcome::NoChange;
        }

        apply_gravity(&mut self.board, &mut self.rng);
        match self.detect_and_score(state) {
            0 => {
                self.phase = EnginePhase::Idle;
                StepOutcome::Settled
            }
            cleared => StepOutcome::Cascading { cleared },
        }
    }

    /// Drives [`Self::step`] until the board settles, returning the number
    /// of gravity passes taken.
    pub fn settle(&mut self, state: &mut RoundState) -> u32 {
        let mut passes = 0;
        while !self.phase.is_idle() {
            self.step(state);
            passes += 1;
        }
        passes
    }

    /// Runs one detection pass; any runs found are scored, flagged on the
    /// board, and move the engine into `Resolving`.
    fn detect_and_score(&mut self, state: &mut RoundState) -> CellCount {
        let matches = find_matches(&self.board);
        let cleared = matches.len();
        if cleared == 0 {
            return 0;
        }

        mark_matches(&mut self.board, &matches);
        state.award(self.score_per_gem * Score::from(cleared));
        self.phase = EnginePhase::Resolving;
        log::debug!("matched {cleared} gems");
        cleared
    }

    pub(crate) fn check_idle(&self) -> Result<()> {
        if self.phase.is_idle() {
            Ok(())
        } else {
            Err(GameError::Busy)
        }
    }
}
