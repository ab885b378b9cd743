//! Rendering surface that rasterizes particles onto a character grid

use backspace_core::{SurfaceSize, Vec2};
use backspace_particles::{GlyphMetrics, GlyphTransform, RenderSurface, TextStyle};

/// A pixel surface shown as a grid of terminal cells.
///
/// Each glyph lands in the cell under its rotation pivot; rotation itself
/// cannot be shown, only where the glyph is.
pub struct AsciiSurface {
    size: SurfaceSize,
    cell: Vec2,
    font_size: f32,
    grid: Vec<Vec<char>>,
}

impl AsciiSurface {
    pub fn new(size: SurfaceSize, cell_width: f32, cell_height: f32) -> Self {
        let mut surface = Self {
            size,
            cell: Vec2::new(cell_width.max(1.0), cell_height.max(1.0)),
            font_size: cell_height,
            grid: Vec::new(),
        };
        surface.reset_grid();
        surface
    }

    fn reset_grid(&mut self) {
        let cols = (self.size.width / self.cell.x).ceil().max(1.0) as usize;
        let rows = (self.size.height / self.cell.y).ceil().max(1.0) as usize;
        self.grid = vec![vec![' '; cols]; rows];
    }

    /// The grid framed by a border, one line per cell row
    pub fn render(&self) -> String {
        let width = self.grid.first().map_or(0, Vec::len);
        let border = format!("+{}+", "-".repeat(width));
        let mut out = String::with_capacity((width + 3) * (self.grid.len() + 2));
        out.push_str(&border);
        out.push('\n');
        for row in &self.grid {
            out.push('|');
            out.extend(row.iter());
            out.push_str("|\n");
        }
        out.push_str(&border);
        out.push('\n');
        out
    }
}

impl RenderSurface for AsciiSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.reset_grid();
    }

    fn configure(&mut self, style: &TextStyle) {
        self.font_size = style.font_size;
    }

    fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(' ');
        }
    }

    fn measure_glyph(&self, _glyph: char) -> GlyphMetrics {
        GlyphMetrics {
            width: self.cell.x,
            height: self.font_size,
        }
    }

    fn draw_glyph(&mut self, glyph: char, transform: &GlyphTransform) {
        let at = transform.pivot;
        if at.x < 0.0 || at.y < 0.0 {
            return;
        }
        let col = (at.x / self.cell.x) as usize;
        let row = (at.y / self.cell.y) as usize;
        if let Some(cell) = self.grid.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = glyph;
        }
    }
}
