//! Per-tick particle update: floor and wall bounces, gravity, integration, aging

use crate::particle::Particle;
use crate::rand::UniformSource;
use backspace_core::{EffectConfig, SurfaceSize};

/// A particle is killed once its bounce count exceeds this
pub const MAX_BOUNCES: u32 = 10;

/// Ticks that must pass after a floor bounce before the floor is tested again
pub const BOUNCE_COOLDOWN_TICKS: u32 = 10;

/// Inputs shared by every particle in one tick
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// Milliseconds since the previous tick
    pub dt: f32,
    pub surface: SurfaceSize,
    pub config: &'a EffectConfig,
}

/// Advance `p` by one tick.
///
/// Gravity is added once per tick while positions and rotation are scaled by
/// `dt`; the drag and velocity defaults are tuned against that.
pub fn step<R: UniformSource + ?Sized>(p: &mut Particle, ctx: &StepContext<'_>, rng: &mut R) {
    let config = ctx.config;

    if p.ticks_since_last_bounce > BOUNCE_COOLDOWN_TICKS && p.y > ctx.surface.height {
        floor_bounce(p, ctx, rng);
    }
    p.ticks_since_last_bounce += 1;

    if p.x <= 0.0 || p.x > ctx.surface.width {
        p.vx = -p.vx;
    }

    p.vy += config.gravity;

    p.x += p.vx * ctx.dt;
    p.y += p.vy * ctx.dt;
    p.rotation += p.v_angular * ctx.dt;

    p.time_to_live -= 1;
}

fn floor_bounce<R: UniformSource + ?Sized>(p: &mut Particle, ctx: &StepContext<'_>, rng: &mut R) {
    let config = ctx.config;
    p.y = ctx.surface.height;
    p.vy *= -(rng.next_unit() * config.bounce_drag_coefficient);
    p.vx *= config.horizontal_drag_coefficient;
    p.v_angular = (rng.next_unit() - 0.5) * config.angular_max_velocity;

    p.bounce_count += 1;
    if p.bounce_count > MAX_BOUNCES {
        p.time_to_live = 0;
    }
    p.ticks_since_last_bounce = 0;
}
