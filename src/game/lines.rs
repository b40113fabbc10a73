//! Shift-and line detection on bitboards.
//!
//! For a direction with linear stride `s`, `mask & (mask >> s)` marks every
//! cell that starts a 2-run; repeating with doubled shifts extends that to
//! any run length. For runs of four this is exactly one `(s, 2s)` pair per
//! direction. The strides depend on the column count, so a detector is built
//! per geometry.

use crate::error::GeometryError;

use super::geometry::Geometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Vertical,
    Horizontal,
    /// Towards higher columns and lower rows on screen (`\`).
    DiagonalDownRight,
    /// Towards higher columns and upper rows on screen (`/`).
    DiagonalUpRight,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Vertical,
        Direction::Horizontal,
        Direction::DiagonalDownRight,
        Direction::DiagonalUpRight,
    ];

    /// Distance in linear index between consecutive cells of a run.
    fn stride(self, cols: usize) -> usize {
        match self {
            Direction::Vertical => cols,
            Direction::Horizontal => 1,
            Direction::DiagonalDownRight => cols + 1,
            Direction::DiagonalUpRight => cols - 1,
        }
    }

    /// (dcol, drow) from a run's lowest linear index to its next cell.
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Vertical => (0, 1),
            Direction::Horizontal => (1, 0),
            Direction::DiagonalDownRight => (1, 1),
            Direction::DiagonalUpRight => (-1, 1),
        }
    }
}

/// One direction's precomputed shift sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePattern {
    direction: Direction,
    stride: u32,
    shifts: Vec<u32>,
    /// Cells where a full run in this direction stays on the board. Masks off
    /// runs that would wrap from one row into the next.
    starts: u64,
}

impl LinePattern {
    fn new(geometry: Geometry, direction: Direction, run_length: usize) -> Self {
        let stride = direction.stride(geometry.cols());
        let (dc, dr) = direction.step();
        let reach = run_length as isize - 1;

        let mut starts = 0u64;
        for row in 0..geometry.rows() {
            for col in 0..geometry.cols() {
                let end_col = col as isize + dc * reach;
                let end_row = row as isize + dr * reach;
                let fits = (0..geometry.cols() as isize).contains(&end_col)
                    && (0..geometry.rows() as isize).contains(&end_row);
                if fits {
                    if let Some(i) = geometry.index(col, row) {
                        starts |= 1u64 << i;
                    }
                }
            }
        }

        let mut shifts = Vec::new();
        let mut covered = 1;
        while covered < run_length {
            let step = covered.min(run_length - covered);
            shifts.push((step * stride) as u32);
            covered += step;
        }

        LinePattern {
            direction,
            stride: stride as u32,
            shifts,
            starts,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Shift sequence applied to the mask; `[s, 2s]` for runs of four.
    pub fn shifts(&self) -> &[u32] {
        &self.shifts
    }

    /// Bits marking the first cell of every complete run in `mask`.
    pub fn run_starts(&self, mask: u64) -> u64 {
        let mut t = mask;
        for &shift in &self.shifts {
            t &= t >> shift;
        }
        t & self.starts
    }

    fn window(&self, start: u32, run_length: usize) -> u64 {
        (0..run_length as u32).fold(0u64, |w, k| w | (1u64 << (start + k * self.stride)))
    }
}

/// Detects `run_length` aligned pieces in a player's mask along every
/// direction that fits the geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDetector {
    geometry: Geometry,
    run_length: usize,
    patterns: Vec<LinePattern>,
    windows: Vec<u64>,
}

impl LineDetector {
    pub fn new(geometry: Geometry, run_length: usize) -> Result<Self, GeometryError> {
        if run_length < 2 || run_length > geometry.cols().max(geometry.rows()) {
            return Err(GeometryError::RunLength {
                run: run_length,
                cols: geometry.cols(),
                rows: geometry.rows(),
            });
        }

        let patterns: Vec<LinePattern> = Direction::ALL
            .iter()
            .map(|&d| LinePattern::new(geometry, d, run_length))
            .filter(|p| p.starts != 0)
            .collect();

        let mut windows = Vec::new();
        for pattern in &patterns {
            let mut starts = pattern.starts;
            while starts != 0 {
                let start = starts.trailing_zeros();
                windows.push(pattern.window(start, run_length));
                starts &= starts - 1;
            }
        }

        Ok(LineDetector {
            geometry,
            run_length,
            patterns,
            windows,
        })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn run_length(&self) -> usize {
        self.run_length
    }

    pub fn patterns(&self) -> &[LinePattern] {
        &self.patterns
    }

    /// Every line segment of `run_length` cells on the board, as masks.
    pub fn windows(&self) -> &[u64] {
        &self.windows
    }

    /// True if `mask` contains a complete run in any direction.
    pub fn has_run(&self, mask: u64) -> bool {
        self.patterns.iter().any(|p| p.run_starts(mask) != 0)
    }
}
