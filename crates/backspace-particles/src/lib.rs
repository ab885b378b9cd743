//! Backspace Particles - falling glyph simulation
//!
//! Provides the particle side of the effect:
//! - `Particle` / `SpawnRequest` - one falling character and how to create it
//! - `physics::step` - gravity, floor/wall bounces, integration and aging
//! - `ParticleSimulation` - owns the live particles and the idle/running loop
//! - `RenderSurface` - the drawing collaborator, fed one `GlyphTransform` per particle

pub mod particle;
pub mod physics;
pub mod rand;
pub mod simulation;
pub mod surface;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use particle::{is_printable, Particle, SpawnRequest, VelocityOverrides};
pub use rand::{ParticleRng, UniformSource};
pub use simulation::{LoopState, ParticleSimulation, SpawnOutcome};
pub use surface::{GlyphMetrics, GlyphTransform, RenderSurface, TextBaseline, TextStyle};
