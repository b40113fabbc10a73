use crate::error::GeometryError;

/// Board dimensions. Cells are numbered row-major from the top-left corner,
/// so linear index `i` is `(i % cols, i / cols)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    cols: usize,
    rows: usize,
}

impl Geometry {
    pub fn new(cols: usize, rows: usize) -> Result<Self, GeometryError> {
        if cols == 0 || rows == 0 {
            return Err(GeometryError::Empty { cols, rows });
        }
        match cols.checked_mul(rows) {
            Some(cells) if cells <= 64 => Ok(Geometry { cols, rows }),
            Some(cells) => Err(GeometryError::TooLarge { cells }),
            None => Err(GeometryError::TooLarge { cells: usize::MAX }),
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Linear index of (col, row), or `None` outside the grid
    pub fn index(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.cols && row < self.rows).then(|| row * self.cols + col)
    }

    /// (col, row) of a linear index
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.cols, index / self.cols)
    }

    /// Cells of the middle column, or the two middle columns on even widths
    pub fn center_mask(&self) -> u64 {
        let mut centers = vec![(self.cols - 1) / 2];
        if self.cols % 2 == 0 {
            centers.push(self.cols / 2);
        }
        let mut mask = 0u64;
        for row in 0..self.rows {
            for &col in &centers {
                mask |= 1u64 << (row * self.cols + col);
            }
        }
        mask
    }

    /// Mask with one bit per cell on the board
    pub fn full_mask(&self) -> u64 {
        match self.cell_count() {
            64 => u64::MAX,
            n => (1u64 << n) - 1,
        }
    }
}
