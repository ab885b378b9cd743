//! Backspace Runtime - Frame loop infrastructure
//!
//! Provides the building blocks driven by the host's per-frame callback:
//! - `FrameClock` - host-timestamp delta tracking with a bootstrap frame
//! - `FrameScheduler` - queue of tasks that requested the next frame
//! - `DeferredSampler` - countdowns that fire an action after N frames
//! - `EffectEvent` / `EventBus` - frame-stamped event log for host observers

mod clock;
mod deferred;
mod event;
mod event_bus;
mod scheduler;

pub use clock::FrameClock;
pub use deferred::DeferredSampler;
pub use event::EffectEvent;
pub use event_bus::{EventBus, FrameEvent};
pub use scheduler::{FrameOutcome, FrameScheduler, FrameTask};
