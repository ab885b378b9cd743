//! Events the effect reports to its host

use backspace_core::SurfaceSize;
use serde::Serialize;

/// Something observable that happened inside the effect
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EffectEvent {
    /// A rendering surface was attached
    SurfaceAttached { size: SurfaceSize },
    /// The surface was resized to match the host window
    SurfaceResized { size: SurfaceSize },
    /// The surface was torn down; nothing is drawn any more
    TornDown,
    /// A particle was added to the simulation
    ParticleSpawned { glyph: char, x: f32, y: f32 },
    /// A spawn was refused (non-printable glyph or no surface)
    SpawnRejected { glyph: char },
    /// The simulation went from idle to running
    Activated,
    /// The last particle died and the simulation went idle
    Deactivated,
    /// The detector compared the remembered line with the current one
    DeletionScanned { row: u32, deleted: usize },
    /// The cursor changed rows between samples, so no deletion was inferred
    RowChanged { from: u32, to: u32 },
    /// The remembered line was refreshed after a plain edit
    LineResynced { row: u32, len: usize },
}
