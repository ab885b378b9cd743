//! Frame-stamped event log drained by the host

use crate::event::EffectEvent;
use serde::Serialize;

/// An event and the frame it happened in. Frame 0 is everything before the
/// first frame callback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameEvent {
    pub frame: u64,
    #[serde(flatten)]
    pub event: EffectEvent,
}

/// Collects effect events between two drains, stamping each with the frame
/// that was current when it was pushed. Input callbacks that arrive between
/// frames are stamped with the last started frame.
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<FrameEvent>,
    frame: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp everything pushed from now on with `frame`
    pub fn begin_frame(&mut self, frame: u64) {
        self.frame = frame;
    }

    pub fn push(&mut self, event: EffectEvent) {
        self.events.push(FrameEvent {
            frame: self.frame,
            event,
        });
    }

    /// Take every event since the last drain, oldest first
    pub fn drain(&mut self) -> Vec<FrameEvent> {
        std::mem::take(&mut self.events)
    }
}
