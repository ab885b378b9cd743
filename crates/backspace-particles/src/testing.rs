//! Deterministic collaborators for tests

use crate::rand::UniformSource;
use crate::surface::{GlyphMetrics, GlyphTransform, RenderSurface, TextStyle};
use backspace_core::SurfaceSize;

/// Replays a fixed list of samples, cycling when exhausted
pub struct ScriptedUniform {
    samples: Vec<f32>,
    cursor: usize,
}

impl ScriptedUniform {
    pub fn new(samples: Vec<f32>) -> Self {
        assert!(!samples.is_empty(), "ScriptedUniform needs at least one sample");
        Self { samples, cursor: 0 }
    }

    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Number of samples handed out so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for ScriptedUniform {
    fn next_unit(&mut self) -> f32 {
        let value = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        value
    }
}

/// One `draw_glyph` call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub glyph: char,
    pub transform: GlyphTransform,
}

/// Surface that records everything drawn to it.
///
/// Glyphs are `glyph_width` wide and as tall as the configured font size.
pub struct RecordingSurface {
    pub size: SurfaceSize,
    pub glyph_width: f32,
    pub style: Option<TextStyle>,
    pub clears: usize,
    pub configures: usize,
    /// Draw calls since the last clear
    pub frame: Vec<DrawCall>,
    /// Every draw call ever made
    pub history: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
            glyph_width: 8.0,
            style: None,
            clears: 0,
            configures: 0,
            frame: Vec::new(),
            history: Vec::new(),
        }
    }
}

impl RenderSurface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn configure(&mut self, style: &TextStyle) {
        self.style = Some(style.clone());
        self.configures += 1;
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.frame.clear();
    }

    fn measure_glyph(&self, _glyph: char) -> GlyphMetrics {
        GlyphMetrics {
            width: self.glyph_width,
            height: self.style.as_ref().map_or(12.0, |s| s.font_size),
        }
    }

    fn draw_glyph(&mut self, glyph: char, transform: &GlyphTransform) {
        let call = DrawCall {
            glyph,
            transform: *transform,
        };
        self.frame.push(call.clone());
        self.history.push(call);
    }
}
