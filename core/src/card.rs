use serde::{Deserialize, Serialize};

use crate::types::CellCount;

/// Face value of a card. Symbols are numbered `0..pair_count`, the presentation picks how they
/// look.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(pub CellCount);

impl Symbol {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Player-visible state of a single board position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardState {
    Hidden,
    Revealed,
    Matched,
}

impl CardState {
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Revealed | Self::Matched)
    }
}

impl Default for CardState {
    fn default() -> Self {
        Self::Hidden
    }
}
