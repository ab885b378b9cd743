//! The host decorator: wires terminal callbacks, the frame scheduler, the
//! deletion detector and the particle simulation together.

use crate::cursor::{CoordinateConvention, CursorFrame};
use crate::detector::DeletionDetector;
use crate::input::InputKind;
use crate::terminal::TerminalView;
use backspace_core::{EffectConfig, SurfaceSize, Vec2};
use backspace_particles::{
    ParticleRng, ParticleSimulation, RenderSurface, SpawnOutcome, SpawnRequest, TextStyle,
    UniformSource,
};
use backspace_runtime::{
    DeferredSampler, EffectEvent, EventBus, FrameEvent, FrameOutcome, FrameScheduler, FrameTask,
};
use tracing::{debug, warn};

/// Whole frames that must pass after an input event before the line is
/// sampled; the sample runs on the frame after that. The host updates its
/// buffer after delivering the input, so an immediate read is stale.
pub const SAMPLE_DELAY_TICKS: u32 = 3;

/// What a deferred line sample does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleAction {
    /// Refresh the remembered line only
    ResyncLine,
    /// Compare against the remembered line and spawn particles for deleted characters
    DetectDeletion,
}

/// Integration choices that are not part of the user-facing configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectOptions {
    pub convention: CoordinateConvention,
    pub sample_delay: u32,
    /// Terminal cell size in pixels, as reported by the host renderer. When
    /// unset, the surface's measurement of a glyph stands in until the first
    /// cursor-move notification.
    pub cell_size: Option<Vec2>,
}

impl Default for EffectOptions {
    fn default() -> Self {
        Self {
            convention: CoordinateConvention::default(),
            sample_delay: SAMPLE_DELAY_TICKS,
            cell_size: None,
        }
    }
}

/// The falling-characters effect for one terminal view.
///
/// Single-threaded: every method runs either inside the host's frame
/// callback ([`BackspaceEffect::on_frame`]) or inside one of its input
/// callbacks, never concurrently.
pub struct BackspaceEffect<V, S, R = ParticleRng> {
    options: EffectOptions,
    view: V,
    surface: Option<S>,
    torn_down: bool,
    scheduler: FrameScheduler,
    sampler: DeferredSampler<SampleAction>,
    detector: DeletionDetector,
    simulation: ParticleSimulation,
    rng: R,
    events: EventBus,
}

impl<V, S, R> BackspaceEffect<V, S, R>
where
    V: TerminalView,
    S: RenderSurface,
    R: UniformSource,
{
    pub fn new(config: EffectConfig, view: V, rng: R) -> Self {
        Self {
            options: EffectOptions::default(),
            view,
            surface: None,
            torn_down: false,
            scheduler: FrameScheduler::new(),
            sampler: DeferredSampler::new(),
            detector: DeletionDetector::new(config),
            simulation: ParticleSimulation::new(config),
            rng,
            events: EventBus::new(),
        }
    }

    pub fn with_options(mut self, options: EffectOptions) -> Self {
        self.options = options;
        self
    }

    /// Start drawing into `surface`. The text style is applied once, here.
    pub fn attach_surface(&mut self, mut surface: S, style: &TextStyle) {
        if self.torn_down {
            warn!("surface attached after teardown, ignoring");
            return;
        }
        surface.configure(style);
        let cell = self.options.cell_size.unwrap_or_else(|| {
            let metrics = surface.measure_glyph('M');
            Vec2::new(metrics.width, metrics.height)
        });
        self.detector.seed_cell_size(cell.x, cell.y);
        let size = surface.size();
        debug!(width = size.width, height = size.height, "surface attached");
        self.surface = Some(surface);
        self.events.push(EffectEvent::SurfaceAttached { size });
    }

    /// Follow a host window resize
    pub fn resize(&mut self, size: SurfaceSize) {
        let Some(surface) = self.surface.as_mut() else {
            debug!("resize without a surface, ignoring");
            return;
        };
        surface.resize(size);
        self.events.push(EffectEvent::SurfaceResized { size });
    }

    /// Destroy the surface and stop all scheduling. Returns the surface so the
    /// host can release it. Every later call is a no-op.
    pub fn teardown(&mut self) -> Option<S> {
        if self.torn_down {
            return None;
        }
        self.torn_down = true;
        self.sampler.cancel_all();
        self.scheduler.clear();
        self.simulation.stop();
        self.events.push(EffectEvent::TornDown);
        debug!("torn down");
        self.surface.take()
    }

    /// Host cursor-move notification
    pub fn on_cursor_move(&mut self, frame: &CursorFrame) {
        if self.torn_down {
            return;
        }
        debug!(?frame, "cursor move");
        self.detector.cursor_moved(frame, self.options.convention);
    }

    /// Host input notification with the exact sequence the user sent
    pub fn on_data(&mut self, data: &str) {
        if self.torn_down {
            return;
        }
        let kind = InputKind::classify(data);
        debug!(?data, ?kind, "input");
        let action = if kind.is_deletion() {
            SampleAction::DetectDeletion
        } else {
            SampleAction::ResyncLine
        };
        self.sampler.schedule(action, self.options.sample_delay);
        self.scheduler.request(FrameTask::Sampler);
    }

    /// Spawn a particle directly. Needs an attached surface to measure the glyph.
    pub fn spawn(&mut self, request: SpawnRequest) -> SpawnOutcome {
        let Some(surface) = self.surface.as_ref() else {
            warn!(glyph = %request.glyph, "spawn without a surface, ignoring");
            self.events.push(EffectEvent::SpawnRejected {
                glyph: request.glyph,
            });
            return SpawnOutcome::Rejected;
        };

        let origin = self.view.origin();
        let outcome = self
            .simulation
            .spawn(&request, origin, surface, &mut self.rng);

        match outcome {
            SpawnOutcome::Rejected => {
                self.events.push(EffectEvent::SpawnRejected {
                    glyph: request.glyph,
                });
                return outcome;
            }
            SpawnOutcome::Activated => {
                self.scheduler.request(FrameTask::Simulation);
                self.events.push(EffectEvent::Activated);
            }
            SpawnOutcome::Spawned => {}
        }
        if let Some(p) = self.simulation.particles().last() {
            self.events.push(EffectEvent::ParticleSpawned {
                glyph: p.glyph,
                x: p.x,
                y: p.y,
            });
        }
        outcome
    }

    /// The host's per-frame callback. Runs every task that requested this
    /// frame, in request order; anything requested now runs next frame.
    pub fn on_frame(&mut self, timestamp_ms: f64) {
        if self.torn_down {
            return;
        }
        let tasks = self.scheduler.begin_frame();
        self.events.begin_frame(self.scheduler.frame_count());
        for task in tasks {
            match task {
                FrameTask::Sampler => self.run_sampler(),
                FrameTask::Simulation => self.run_simulation(timestamp_ms),
            }
        }
    }

    fn run_sampler(&mut self) {
        let due = self.sampler.tick();
        if !self.sampler.is_empty() {
            self.scheduler.request(FrameTask::Sampler);
        }
        for action in due {
            match action {
                // Without a surface nothing can be spawned; keep the snapshot current instead
                SampleAction::DetectDeletion if self.surface.is_some() => self.detect_deletion(),
                _ => self.resync_line(),
            }
        }
    }

    fn run_simulation(&mut self, timestamp_ms: f64) {
        let Some(surface) = self.surface.as_mut() else {
            self.simulation.stop();
            return;
        };
        match self.simulation.tick(timestamp_ms, surface, &mut self.rng) {
            FrameOutcome::Continue => {
                self.scheduler.request(FrameTask::Simulation);
            }
            FrameOutcome::Idle => {
                self.events.push(EffectEvent::Deactivated);
            }
        }
    }

    fn resync_line(&mut self) {
        let row = self.detector.cursor().row;
        let line = self.view.line_text(row);
        let len = line.chars().count();
        self.detector.resync(line);
        self.events.push(EffectEvent::LineResynced { row, len });
    }

    fn detect_deletion(&mut self) {
        let cursor = *self.detector.cursor();
        let line = self.view.line_text(cursor.row);
        let detection = self.detector.detect(line, &mut self.rng);

        if detection.row_changed {
            self.events.push(EffectEvent::RowChanged {
                from: cursor.prev_row,
                to: cursor.row,
            });
        }
        self.events.push(EffectEvent::DeletionScanned {
            row: cursor.row,
            deleted: detection.requests.len(),
        });
        for request in detection.requests {
            self.spawn(request);
        }
    }

    /// Whether the host should schedule another frame
    pub fn needs_frame(&self) -> bool {
        self.scheduler.has_pending()
    }

    pub fn is_running(&self) -> bool {
        self.simulation.is_running()
    }

    pub fn particle_count(&self) -> usize {
        self.simulation.particle_count()
    }

    pub fn pending_samples(&self) -> usize {
        self.sampler.len()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Drain the events recorded since the last call, each stamped with its frame
    pub fn drain_events(&mut self) -> Vec<FrameEvent> {
        self.events.drain()
    }

    pub fn simulation(&self) -> &ParticleSimulation {
        &self.simulation
    }

    pub fn detector(&self) -> &DeletionDetector {
        &self.detector
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the terminal view, for hosts that own its contents
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }
}
