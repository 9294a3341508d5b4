#![no_std]

extern crate alloc;

use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cascade::*;
pub use engine::*;
pub use error::*;
pub use gem::*;
pub use generator::*;
pub use matcher::*;
pub use round::*;
pub use types::*;

mod cascade;
mod engine;
mod error;
mod gem;
mod generator;
mod matcher;
mod round;
mod special;
mod types;

/// Round parameters consumed once at round start.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub time_limit_secs: u32,
    pub bombs: CellCount,
    pub mixes: CellCount,
    pub score_per_gem: Score,
    pub bomb_score: Score,
    pub level: u32,
}

impl GameConfig {
    pub fn new(size: Coord) -> Self {
        Self {
            size: size.clamp(MIN_RUN as Coord, Coord::MAX),
            ..Self::default()
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: 8,
            time_limit_secs: 60,
            bombs: 100,
            mixes: 3,
            score_per_gem: 100,
            bomb_score: 900,
            level: 1,
        }
    }
}

/// The gem grid. Positions are fixed identities; only gem kinds and the
/// transient matched flags flow through them during cascades.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    pub fn from_gems(gems: Array2<Gem>) -> Self {
        Self {
            cells: gems.mapv(Cell::new),
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn gem_at(&self, coords: Coord2) -> Result<Gem> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords].gem)
    }

    pub fn set_gem(&mut self, coords: Coord2, gem: Gem) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self[coords].gem = gem;
        Ok(())
    }

    pub fn is_matched(&self, coords: Coord2) -> bool {
        self[coords].matched
    }

    pub(crate) fn mark_matched(&mut self, coords: Coord2) {
        self[coords].matched = true;
    }

    pub(crate) fn swap_gems(&mut self, a: Coord2, b: Coord2) {
        let gem_a = self[a].gem;
        self[a].gem = self[b].gem;
        self[b].gem = gem_a;
    }

    pub(crate) fn has_matched_cells(&self) -> bool {
        self.cells.iter().any(|cell| cell.matched)
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
