//! Particle state and spawn requests

use crate::rand::UniformSource;
use crate::surface::GlyphMetrics;
use backspace_core::{EffectConfig, Vec2};

/// Rotation pivot as a fraction of the glyph box (its center)
pub const ANCHOR: f32 = 0.5;

/// Whether `glyph` can be drawn as a particle: printable ASCII and Latin-1
pub fn is_printable(glyph: char) -> bool {
    matches!(glyph, '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}')
}

/// One falling character
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub glyph: char,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub anchor_x: f32,
    pub anchor_y: f32,
    /// Radians
    pub rotation: f32,
    /// Pixels per millisecond
    pub vx: f32,
    pub vy: f32,
    /// Radians per millisecond
    pub v_angular: f32,
    /// Ticks left; the particle is dropped once this is <= 0
    pub time_to_live: i32,
    pub bounce_count: u32,
    pub ticks_since_last_bounce: u32,
}

impl Particle {
    /// Build a particle from a spawn request. `origin` is the terminal view's
    /// offset inside the surface; overrides replace the randomized defaults.
    pub fn from_request<R: UniformSource + ?Sized>(
        request: &SpawnRequest,
        metrics: GlyphMetrics,
        origin: Vec2,
        config: &EffectConfig,
        rng: &mut R,
    ) -> Self {
        let overrides = request.overrides;
        let vx = overrides
            .vx
            .unwrap_or_else(|| rng.next_unit() * -config.horizontal_max_velocity);
        let vy = overrides
            .vy
            .unwrap_or_else(|| (rng.next_unit() * 0.5 + 0.5) * -config.vertical_max_velocity);
        let v_angular = overrides
            .v_angular
            .unwrap_or_else(|| rng.next_unit() * -config.angular_max_velocity);

        Self {
            glyph: request.glyph,
            x: request.position.x + origin.x,
            y: request.position.y + origin.y,
            width: metrics.width,
            height: metrics.height,
            anchor_x: ANCHOR,
            anchor_y: ANCHOR,
            rotation: 0.0,
            vx,
            vy,
            v_angular,
            time_to_live: config.particle_time_to_live,
            bounce_count: 0,
            ticks_since_last_bounce: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.time_to_live > 0
    }

    /// Rotation pivot in surface pixels
    pub fn pivot(&self) -> Vec2 {
        Vec2::new(
            self.x + self.anchor_x * self.width,
            self.y + self.anchor_y * self.height,
        )
    }
}

/// Initial velocities that replace the randomized spawn defaults
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VelocityOverrides {
    pub vx: Option<f32>,
    pub vy: Option<f32>,
    pub v_angular: Option<f32>,
}

/// A request to create one particle, relative to the terminal view
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub glyph: char,
    pub position: Vec2,
    pub overrides: VelocityOverrides,
}

impl SpawnRequest {
    pub fn new(glyph: char, x: f32, y: f32) -> Self {
        Self {
            glyph,
            position: Vec2::new(x, y),
            overrides: VelocityOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: VelocityOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedUniform;

    fn metrics() -> GlyphMetrics {
        GlyphMetrics {
            width: 8.0,
            height: 12.0,
        }
    }

    #[test]
    fn printable_range() {
        assert!(is_printable(' '));
        assert!(is_printable('a'));
        assert!(is_printable('~'));
        assert!(is_printable('é'));
        assert!(is_printable('\u{a0}'));
        assert!(!is_printable('\u{7f}'));
        assert!(!is_printable('\n'));
        assert!(!is_printable('\u{1b}'));
        assert!(!is_printable('\u{9f}'));
        assert!(!is_printable('λ'));
    }

    #[test]
    fn defaults_are_randomized_from_config() {
        let config = EffectConfig::default();
        let mut rng = ScriptedUniform::constant(0.5);
        let request = SpawnRequest::new('a', 10.0, 20.0);
        let p = Particle::from_request(&request, metrics(), Vec2::new(1.0, 2.0), &config, &mut rng);

        assert_eq!(p.x, 11.0);
        assert_eq!(p.y, 22.0);
        assert!((p.vx - -0.15).abs() < 1e-6);
        assert!((p.vy - -0.15).abs() < 1e-6);
        assert!((p.v_angular - -0.01).abs() < 1e-6);
        assert_eq!(p.time_to_live, 1000);
        assert_eq!(p.rotation, 0.0);
        assert_eq!((p.anchor_x, p.anchor_y), (0.5, 0.5));
        assert_eq!((p.width, p.height), (8.0, 12.0));
    }

    #[test]
    fn overrides_win_and_skip_randomness() {
        let config = EffectConfig::default();
        let mut rng = ScriptedUniform::new(vec![0.25]);
        let request = SpawnRequest::new('b', 0.0, 0.0).with_overrides(VelocityOverrides {
            vx: Some(0.3),
            vy: None,
            v_angular: Some(0.01),
        });
        let p = Particle::from_request(&request, metrics(), Vec2::ZERO, &config, &mut rng);
        assert_eq!(p.vx, 0.3);
        assert_eq!(p.v_angular, 0.01);
        // only vy drew from the generator
        assert!((p.vy - (0.25 * 0.5 + 0.5) * -0.2).abs() < 1e-6);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn pivot_is_glyph_center() {
        let config = EffectConfig::default();
        let mut rng = ScriptedUniform::constant(0.0);
        let p = Particle::from_request(
            &SpawnRequest::new('c', 100.0, 50.0),
            metrics(),
            Vec2::ZERO,
            &config,
            &mut rng,
        );
        assert_eq!(p.pivot(), Vec2::new(104.0, 56.0));
    }
}
