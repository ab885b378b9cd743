//! The simulation loop: owns the live particles and the idle/running state

use crate::particle::{is_printable, Particle, SpawnRequest};
use crate::physics::{self, StepContext};
use crate::rand::UniformSource;
use crate::surface::{GlyphTransform, RenderSurface};
use backspace_core::{EffectConfig, Vec2};
use backspace_runtime::{FrameClock, FrameOutcome};
use tracing::{debug, trace};

/// Whether the loop currently wants frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

/// Result of a spawn request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// Non-printable glyph; nothing was created
    Rejected,
    /// Added to an already running loop
    Spawned,
    /// Added, and the loop went from idle to running. The caller must request a frame.
    Activated,
}

/// Owns every live particle. Nothing outside the simulation holds on to one;
/// the collection is only changed by `spawn`, `tick` and `stop`.
pub struct ParticleSimulation {
    config: EffectConfig,
    particles: Vec<Particle>,
    clock: FrameClock,
    state: LoopState,
}

impl ParticleSimulation {
    pub fn new(config: EffectConfig) -> Self {
        Self {
            config,
            particles: Vec::new(),
            clock: FrameClock::new(),
            state: LoopState::Idle,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Read-only view of the live particles
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Create a particle for `request`, measuring its glyph on `surface`.
    /// `origin` is the terminal view's offset inside the surface.
    pub fn spawn<S, R>(
        &mut self,
        request: &SpawnRequest,
        origin: Vec2,
        surface: &S,
        rng: &mut R,
    ) -> SpawnOutcome
    where
        S: RenderSurface + ?Sized,
        R: UniformSource + ?Sized,
    {
        if !is_printable(request.glyph) {
            return SpawnOutcome::Rejected;
        }

        let metrics = surface.measure_glyph(request.glyph);
        let particle = Particle::from_request(request, metrics, origin, &self.config, rng);
        debug!(
            glyph = %particle.glyph,
            x = particle.x,
            y = particle.y,
            vx = particle.vx,
            vy = particle.vy,
            "spawning particle"
        );
        self.particles.push(particle);

        if self.state == LoopState::Idle {
            debug!("activating");
            self.state = LoopState::Running;
            SpawnOutcome::Activated
        } else {
            SpawnOutcome::Spawned
        }
    }

    /// Run one frame at host time `timestamp_ms`.
    ///
    /// The first frame after activation only records the time. Afterwards the
    /// surface is cleared, every particle is stepped, dead ones are dropped and
    /// the survivors are drawn, in that order, so a particle that dies this
    /// frame is never drawn.
    pub fn tick<S, R>(&mut self, timestamp_ms: f64, surface: &mut S, rng: &mut R) -> FrameOutcome
    where
        S: RenderSurface + ?Sized,
        R: UniformSource + ?Sized,
    {
        if self.state == LoopState::Idle {
            return FrameOutcome::Idle;
        }

        let Some(dt) = self.clock.tick(timestamp_ms) else {
            return FrameOutcome::Continue;
        };

        surface.clear();

        let ctx = StepContext {
            dt: dt as f32,
            surface: surface.size(),
            config: &self.config,
        };
        for p in &mut self.particles {
            physics::step(p, &ctx, rng);
        }

        self.particles.retain(Particle::is_alive);

        for p in &self.particles {
            surface.draw_glyph(p.glyph, &GlyphTransform::for_particle(p));
        }
        trace!(dt, alive = self.particles.len(), "simulation tick");

        if self.particles.is_empty() {
            debug!("deactivating");
            self.go_idle();
            FrameOutcome::Idle
        } else {
            FrameOutcome::Continue
        }
    }

    /// Drop every particle and go idle
    pub fn stop(&mut self) {
        self.particles.clear();
        self.go_idle();
    }

    fn go_idle(&mut self) {
        self.state = LoopState::Idle;
        self.clock.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::VelocityOverrides;
    use crate::testing::{RecordingSurface, ScriptedUniform};

    fn still_request(glyph: char) -> SpawnRequest {
        SpawnRequest::new(glyph, 100.0, 100.0).with_overrides(VelocityOverrides {
            vx: Some(0.0),
            vy: Some(0.0),
            v_angular: Some(0.0),
        })
    }

    fn short_lived(ttl: i32) -> EffectConfig {
        EffectConfig {
            particle_time_to_live: ttl,
            gravity: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn non_printable_is_rejected() {
        let mut sim = ParticleSimulation::new(EffectConfig::default());
        let surface = RecordingSurface::new(800.0, 600.0);
        let mut rng = ScriptedUniform::constant(0.5);
        let outcome = sim.spawn(&still_request('\t'), Vec2::ZERO, &surface, &mut rng);
        assert_eq!(outcome, SpawnOutcome::Rejected);
        assert_eq!(sim.particle_count(), 0);
        assert_eq!(sim.state(), LoopState::Idle);
    }

    #[test]
    fn first_spawn_activates_then_spawns() {
        let mut sim = ParticleSimulation::new(EffectConfig::default());
        let surface = RecordingSurface::new(800.0, 600.0);
        let mut rng = ScriptedUniform::constant(0.5);
        assert_eq!(
            sim.spawn(&still_request('a'), Vec2::ZERO, &surface, &mut rng),
            SpawnOutcome::Activated
        );
        assert_eq!(
            sim.spawn(&still_request('b'), Vec2::ZERO, &surface, &mut rng),
            SpawnOutcome::Spawned
        );
        assert!(sim.is_running());
        assert_eq!(sim.particle_count(), 2);
    }

    #[test]
    fn bootstrap_frame_does_no_physics() {
        let mut sim = ParticleSimulation::new(EffectConfig::default());
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let mut rng = ScriptedUniform::constant(0.5);
        sim.spawn(&still_request('a'), Vec2::ZERO, &surface, &mut rng);

        assert_eq!(sim.tick(1_000.0, &mut surface, &mut rng), FrameOutcome::Continue);
        assert_eq!(surface.clears, 0);
        assert!(surface.history.is_empty());
        assert_eq!(sim.particles()[0].time_to_live, 1000);
    }

    #[test]
    fn particle_removed_exactly_after_ttl_ticks() {
        let ttl = 4;
        let mut sim = ParticleSimulation::new(short_lived(ttl));
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let mut rng = ScriptedUniform::constant(0.5);
        sim.spawn(&still_request('a'), Vec2::ZERO, &surface, &mut rng);

        sim.tick(0.0, &mut surface, &mut rng);
        for frame in 1..ttl {
            let outcome = sim.tick(frame as f64 * 16.0, &mut surface, &mut rng);
            assert_eq!(outcome, FrameOutcome::Continue);
            assert_eq!(sim.particle_count(), 1);
        }
        let outcome = sim.tick(ttl as f64 * 16.0, &mut surface, &mut rng);
        assert_eq!(outcome, FrameOutcome::Idle);
        assert_eq!(sim.particle_count(), 0);
        assert_eq!(sim.state(), LoopState::Idle);
    }

    #[test]
    fn dying_particle_is_never_drawn() {
        let mut sim = ParticleSimulation::new(short_lived(2));
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let mut rng = ScriptedUniform::constant(0.5);
        sim.spawn(&still_request('a'), Vec2::ZERO, &surface, &mut rng);

        sim.tick(0.0, &mut surface, &mut rng);
        sim.tick(16.0, &mut surface, &mut rng);
        assert_eq!(surface.frame.len(), 1);
        sim.tick(32.0, &mut surface, &mut rng);
        assert!(surface.frame.is_empty());
        assert_eq!(surface.clears, 2);
        assert_eq!(surface.history.len(), 1);
    }

    #[test]
    fn killed_by_bounce_is_filtered_same_tick() {
        let mut sim = ParticleSimulation::new(EffectConfig::default());
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let mut rng = ScriptedUniform::constant(0.5);
        sim.spawn(&still_request('z'), Vec2::ZERO, &surface, &mut rng);
        sim.spawn(&still_request('y'), Vec2::ZERO, &surface, &mut rng);
        sim.particles[0].y = 700.0;
        sim.particles[0].bounce_count = physics::MAX_BOUNCES;
        sim.particles[0].ticks_since_last_bounce = 50;

        sim.tick(0.0, &mut surface, &mut rng);
        sim.tick(16.0, &mut surface, &mut rng);
        assert_eq!(sim.particle_count(), 1);
        assert_eq!(sim.particles()[0].glyph, 'y');
        assert_eq!(surface.frame.len(), 1);
        assert_eq!(surface.frame[0].glyph, 'y');
    }

    #[test]
    fn uses_timestamp_delta_for_integration() {
        let mut sim = ParticleSimulation::new(short_lived(100));
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let mut rng = ScriptedUniform::constant(0.5);
        let request = SpawnRequest::new('m', 100.0, 100.0).with_overrides(VelocityOverrides {
            vx: Some(0.5),
            vy: Some(0.0),
            v_angular: Some(0.0),
        });
        sim.spawn(&request, Vec2::ZERO, &surface, &mut rng);
        sim.tick(500.0, &mut surface, &mut rng);
        sim.tick(520.0, &mut surface, &mut rng);
        assert!((sim.particles()[0].x - 110.0).abs() < 1e-4);
    }

    #[test]
    fn reactivation_bootstraps_again() {
        let mut sim = ParticleSimulation::new(short_lived(1));
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let mut rng = ScriptedUniform::constant(0.5);

        sim.spawn(&still_request('a'), Vec2::ZERO, &surface, &mut rng);
        sim.tick(0.0, &mut surface, &mut rng);
        assert_eq!(sim.tick(16.0, &mut surface, &mut rng), FrameOutcome::Idle);
        assert_eq!(sim.tick(32.0, &mut surface, &mut rng), FrameOutcome::Idle);

        assert_eq!(
            sim.spawn(&still_request('b'), Vec2::ZERO, &surface, &mut rng),
            SpawnOutcome::Activated
        );
        // long idle gap: the bootstrap frame swallows it
        assert_eq!(sim.tick(60_000.0, &mut surface, &mut rng), FrameOutcome::Continue);
        assert_eq!(sim.particles()[0].time_to_live, 1);
    }

    #[test]
    fn stop_clears_everything() {
        let mut sim = ParticleSimulation::new(EffectConfig::default());
        let surface = RecordingSurface::new(800.0, 600.0);
        let mut rng = ScriptedUniform::constant(0.5);
        sim.spawn(&still_request('a'), Vec2::ZERO, &surface, &mut rng);
        sim.stop();
        assert_eq!(sim.particle_count(), 0);
        assert_eq!(sim.state(), LoopState::Idle);
    }
}
