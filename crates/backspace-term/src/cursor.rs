//! Cursor tracking across host cursor-move notifications

/// A cursor-move notification as delivered by the host
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorFrame {
    pub x: f32,
    pub y: f32,
    pub row: u32,
    pub col: u32,
    pub cell_width: f32,
    pub cell_height: f32,
}

/// How the host's `row`/`col` fields map onto logical rows and columns.
///
/// Some hosts report the two fields swapped. The integrator must check this
/// against the terminal component actually in use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoordinateConvention {
    /// `frame.row` carries the column and `frame.col` the row
    #[default]
    Swapped,
    AsNamed,
}

impl CoordinateConvention {
    /// Logical `(row, col)` of a host frame
    pub fn resolve(self, frame: &CursorFrame) -> (u32, u32) {
        match self {
            CoordinateConvention::Swapped => (frame.col, frame.row),
            CoordinateConvention::AsNamed => (frame.row, frame.col),
        }
    }
}

/// Current cursor position plus the row/col remembered at the last line sample
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorState {
    pub x: f32,
    pub y: f32,
    pub row: u32,
    pub col: u32,
    pub prev_row: u32,
    pub prev_col: u32,
    pub cell_width: f32,
    pub cell_height: f32,
}

impl CursorState {
    /// Record a host notification. The remembered row/col are left alone.
    pub fn apply(&mut self, frame: &CursorFrame, convention: CoordinateConvention) {
        let (row, col) = convention.resolve(frame);
        self.x = frame.x;
        self.y = frame.y;
        self.row = row;
        self.col = col;
        self.cell_width = frame.cell_width;
        self.cell_height = frame.cell_height;
    }

    /// Use `width` x `height` as the cell size until a host notification
    /// reports one. A size already reported is kept.
    pub fn seed_cell_size(&mut self, width: f32, height: f32) {
        if self.cell_width > 0.0 {
            return;
        }
        self.cell_width = width;
        self.cell_height = height;
    }

    /// Remember the current row/col as the sampled position
    pub fn commit(&mut self) {
        self.prev_row = self.row;
        self.prev_col = self.col;
    }

    pub fn row_changed(&self) -> bool {
        self.prev_row != self.row
    }

    /// +1 when the column did not move since the last sample (forward delete), -1 otherwise
    pub fn deletion_direction(&self) -> f32 {
        if self.prev_col == self.col {
            1.0
        } else {
            -1.0
        }
    }
}
