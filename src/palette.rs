//! Cosmetic brick colors
//!
//! Colors belong to the renderer, not the simulation: the row-to-color
//! assignment is reshuffled at the start of every round and looked up by
//! brick index.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::consts::BRICK_COLS;

/// Row colors as 0xRRGGBB
pub const BRICK_COLORS: [u32; 5] = [0xff6666, 0xffcc66, 0x66ff66, 0x66ccff, 0xcc66ff];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    rows: [u32; 5],
}

impl Default for Palette {
    fn default() -> Self {
        Self { rows: BRICK_COLORS }
    }
}

impl Palette {
    /// Palette with the row order shuffled
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut rows = BRICK_COLORS;
        rows.shuffle(rng);
        Self { rows }
    }

    /// Color for the brick at grid index `index` (row-major)
    pub fn color_for(&self, index: usize) -> u32 {
        let row = index / BRICK_COLS;
        self.rows[row % self.rows.len()]
    }
}
