//! Model of the host's per-frame callback queue

/// A consumer that asked to be run on the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameTask {
    /// Deferred sampler countdowns
    Sampler,
    /// Particle simulation tick
    Simulation,
}

/// What a task wants after running for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Request another frame
    Continue,
    /// Nothing left to do; do not request a frame
    Idle,
}

/// Frame requests, in the order they were made.
///
/// Tasks requested while a frame is running are collected for the *next*
/// frame, just like an animation-frame callback requested from inside one.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    requested: Vec<FrameTask>,
    frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that `task` runs on the next frame. Returns false if it was already queued.
    pub fn request(&mut self, task: FrameTask) -> bool {
        if self.requested.contains(&task) {
            return false;
        }
        self.requested.push(task);
        true
    }

    /// Start a frame: take every task requested so far, in request order
    pub fn begin_frame(&mut self) -> Vec<FrameTask> {
        self.frames += 1;
        std::mem::take(&mut self.requested)
    }

    pub fn clear(&mut self) {
        self.requested.clear();
    }

    /// Whether the host should schedule another frame
    pub fn has_pending(&self) -> bool {
        !self.requested.is_empty()
    }

    /// Number of frames started so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
