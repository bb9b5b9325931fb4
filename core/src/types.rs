/// Single grid axis, used for the row and column counts.
pub type Coord = u8;

/// Count type used for cards, pairs and board positions.
pub type CellCount = u16;

/// Grid size or grid coordinates as `(rows, cols)` / `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Board position of a card, row-major and 0-based.
pub type Pos = CellCount;

/// Restart counter, used to invalidate deferred work scheduled for an earlier deal.
pub type Epoch = u64;

pub trait ToIndex {
    fn to_index(self) -> usize;
}

impl ToIndex for Pos {
    fn to_index(self) -> usize {
        self.into()
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Row-major position of `(row, col)`, only when it lies inside `size`.
pub const fn pos_of((row, col): Coord2, size: Coord2) -> Option<Pos> {
    if row >= size.0 || col >= size.1 {
        return None;
    }
    Some(row as Pos * size.1 as Pos + col as Pos)
}

/// Inverse of [`pos_of`].
pub const fn coords_of(pos: Pos, size: Coord2) -> Option<Coord2> {
    if size.1 == 0 || pos >= mult(size.0, size.1) {
        return None;
    }
    let cols = size.1 as Pos;
    Some(((pos / cols) as Coord, (pos % cols) as Coord))
}
