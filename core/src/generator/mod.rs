use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: &GameConfig) -> Board;
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StartBoard {
    /// Uniform fill; the opening board may already contain runs.
    Unchecked,
    /// Re-draw any cell that would close a run, guaranteeing a settled start.
    MatchFree,
}
