use gridwave_common::GridDims;

/// A decoded cell position.
///
/// `col` is already centered on the grid (`-half_mod..`), `row` is the raw
/// row-major row. The animator works with the centered pair from
/// [`GridIndexer::centered`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub col: i32,
    pub row: i32,
}

impl CellCoord {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// Converts linear cell indices to grid coordinates and back.
///
/// Pure arithmetic over `GridDims`; rows past the last full square row are
/// decoded the same way as every other row.
#[derive(Debug, Clone, Copy)]
pub struct GridIndexer {
    dims: GridDims,
}

impl GridIndexer {
    pub fn new(dims: GridDims) -> Self {
        Self { dims }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Whether `index` addresses a cell of this grid.
    pub fn contains(&self, index: usize) -> bool {
        index < self.dims.cell_count()
    }

    /// `row = i / mod_amount`, `col = (i % mod_amount) - half_mod`.
    pub fn decode(&self, index: usize) -> CellCoord {
        let modulus = self.dims.mod_amount() as usize;
        CellCoord {
            col: (index % modulus) as i32 - self.dims.half_mod(),
            row: (index / modulus) as i32,
        }
    }

    /// Inverse of [`decode`](Self::decode). `None` when the coordinate falls
    /// outside the grid.
    pub fn encode(&self, coord: CellCoord) -> Option<usize> {
        let column = coord.col + self.dims.half_mod();
        if column < 0 || column >= self.dims.mod_amount() || coord.row < 0 {
            return None;
        }
        let index = coord.row as usize * self.dims.mod_amount() as usize + column as usize;
        self.contains(index).then_some(index)
    }

    /// Centered `(x, z)` used by the manipulation engine: column and
    /// `row - half_mod`.
    pub fn centered(&self, index: usize) -> (i32, i32) {
        let coord = self.decode(index);
        (coord.col, coord.row - self.dims.half_mod())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn indexer(cells: usize) -> GridIndexer {
        GridIndexer::new(GridDims::new(cells).unwrap())
    }

    #[test]
    fn decode_row_major_64() {
        let ix = indexer(64);
        // 20 = 2 * 8 + 4: column 4 sits on the centre line.
        assert_eq!(ix.decode(20), CellCoord::new(0, 2));
        assert_eq!(ix.centered(20), (0, -2));
        assert_eq!(ix.decode(18), CellCoord::new(-2, 2));
        assert_eq!(ix.centered(18), (-2, -2));
    }

    #[test]
    fn decode_first_and_last() {
        let ix = indexer(64);
        assert_eq!(ix.decode(0), CellCoord::new(-4, 0));
        assert_eq!(ix.decode(63), CellCoord::new(3, 7));
    }

    #[test]
    fn decode_is_unique_and_inverts_encode() {
        for cells in [1, 2, 5, 64, 70, 99, 400] {
            let ix = indexer(cells);
            let mut seen = HashSet::new();
            for i in 0..cells {
                let coord = ix.decode(i);
                assert!(seen.insert(coord), "duplicate coord for {i} in {cells}");
                assert_eq!(ix.encode(coord), Some(i));
            }
        }
    }

    #[test]
    fn ragged_tail_rows_continue() {
        // 70 cells: mod 8, six cells past the 8x8 square.
        let ix = indexer(70);
        assert_eq!(ix.decode(64), CellCoord::new(-4, 8));
        assert_eq!(ix.decode(69), CellCoord::new(1, 8));
        assert_eq!(ix.encode(CellCoord::new(2, 8)), None);
    }

    #[test]
    fn encode_rejects_out_of_grid() {
        let ix = indexer(64);
        assert_eq!(ix.encode(CellCoord::new(4, 0)), None);
        assert_eq!(ix.encode(CellCoord::new(-5, 0)), None);
        assert_eq!(ix.encode(CellCoord::new(0, -1)), None);
        assert_eq!(ix.encode(CellCoord::new(0, 8)), None);
    }
}
