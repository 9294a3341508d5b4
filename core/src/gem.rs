use rand::Rng;
use rand::RngExt;
use serde::{Deserialize, Serialize};

/// Closed set of gem kinds a board cell can hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gem {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Pink,
    Orange,
}

impl Gem {
    pub const ALL: [Self; 7] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Purple,
        Self::Pink,
        Self::Orange,
    ];

    /// Uniform draw over all gem kinds.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// One board position: the gem it currently holds plus the transient
/// matched flag consumed by the gravity pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub gem: Gem,
    pub matched: bool,
}

impl Cell {
    pub const fn new(gem: Gem) -> Self {
        Self {
            gem,
            matched: false,
        }
    }
}
