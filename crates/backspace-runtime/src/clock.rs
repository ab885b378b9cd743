//! Frame clock fed by host timestamps

/// Tracks the time between frames from the timestamps the host passes to its
/// frame callback (milliseconds).
///
/// The first frame after construction or [`FrameClock::reset`] only records
/// the timestamp, so a simulation that was idle for a long time never sees a
/// huge first delta.
#[derive(Debug, Default)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `timestamp_ms`. Returns `None` on the bootstrap frame,
    /// otherwise the elapsed milliseconds.
    pub fn tick(&mut self, timestamp_ms: f64) -> Option<f64> {
        let last = self.last_timestamp.replace(timestamp_ms)?;
        // Hosts occasionally report a stale timestamp; never run time backwards
        Some((timestamp_ms - last).max(0.0))
    }

    /// Forget the last timestamp so the next tick bootstraps again
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }
}
