//! The rendering-surface collaborator and the per-glyph transform it receives

use crate::particle::Particle;
use backspace_core::{SurfaceSize, Vec2};

/// Measured glyph box. Width comes from text measurement, height from the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    pub width: f32,
    pub height: f32,
}

/// Vertical alignment of drawn text relative to its origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextBaseline {
    #[default]
    Top,
    Alphabetic,
}

/// Font and fill settings, applied to the surface once when it is attached
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    /// Points; also used as the glyph box height
    pub font_size: f32,
    pub foreground: String,
    pub baseline: TextBaseline,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "monospace".to_string(),
            font_size: 12.0,
            foreground: "#ffffff".to_string(),
            baseline: TextBaseline::Top,
        }
    }
}

/// Placement of one glyph: translate to `pivot`, rotate by `rotation`, then
/// translate by `offset` and draw the glyph at the local origin.
///
/// Applying the steps in any other order rotates the glyph around the wrong point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphTransform {
    pub pivot: Vec2,
    pub rotation: f32,
    pub offset: Vec2,
}

impl GlyphTransform {
    pub fn for_particle(p: &Particle) -> Self {
        let anchor = Vec2::new(p.anchor_x * p.width, p.anchor_y * p.height);
        Self {
            pivot: p.pivot(),
            rotation: p.rotation,
            offset: -anchor,
        }
    }

    /// Map a point in glyph-local coordinates to surface coordinates
    pub fn apply(&self, local: Vec2) -> Vec2 {
        self.pivot + (local + self.offset).rotated(self.rotation)
    }
}

/// A 2D drawing target the simulation renders into
pub trait RenderSurface {
    /// Current pixel dimensions (floor and right wall for the physics)
    fn size(&self) -> SurfaceSize;

    /// Follow a host window resize
    fn resize(&mut self, size: SurfaceSize);

    /// Set font, baseline and fill style. Called once when attached.
    fn configure(&mut self, style: &TextStyle);

    /// Erase everything drawn in the previous frame
    fn clear(&mut self);

    fn measure_glyph(&self, glyph: char) -> GlyphMetrics;

    fn draw_glyph(&mut self, glyph: char, transform: &GlyphTransform);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn particle(rotation: f32) -> Particle {
        Particle {
            glyph: 'x',
            x: 100.0,
            y: 40.0,
            width: 10.0,
            height: 20.0,
            anchor_x: 0.5,
            anchor_y: 0.5,
            rotation,
            vx: 0.0,
            vy: 0.0,
            v_angular: 0.0,
            time_to_live: 1,
            bounce_count: 0,
            ticks_since_last_bounce: 0,
        }
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn unrotated_origin_is_particle_position() {
        let t = GlyphTransform::for_particle(&particle(0.0));
        assert!(close(t.apply(Vec2::ZERO), Vec2::new(100.0, 40.0)));
    }

    #[test]
    fn center_stays_fixed_under_rotation() {
        for rotation in [0.3, FRAC_PI_2, PI, -2.0] {
            let t = GlyphTransform::for_particle(&particle(rotation));
            assert!(close(t.apply(Vec2::new(5.0, 10.0)), Vec2::new(105.0, 50.0)));
        }
    }

    #[test]
    fn half_turn_mirrors_about_center() {
        let t = GlyphTransform::for_particle(&particle(PI));
        // top-left corner lands on the bottom-right corner
        assert!(close(t.apply(Vec2::ZERO), Vec2::new(110.0, 60.0)));
    }
}
