//! Countdown-based deferred actions

use tracing::trace;

#[derive(Debug)]
struct Countdown<A> {
    remaining: u32,
    action: A,
}

/// Holds actions that must run a fixed number of frames in the future.
///
/// Each [`DeferredSampler::tick`] fires the countdowns already at zero, in
/// scheduling order, and decrements the rest. An action scheduled with `n`
/// ticks therefore fires on the `n + 1`-th tick, after `n` full ticks passed.
/// Cancelling is dropping the countdown state.
#[derive(Debug)]
pub struct DeferredSampler<A> {
    countdowns: Vec<Countdown<A>>,
}

impl<A> Default for DeferredSampler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> DeferredSampler<A> {
    pub fn new() -> Self {
        Self {
            countdowns: Vec::new(),
        }
    }

    /// Fire `action` once `ticks` whole ticks have passed. Zero fires on the next tick.
    pub fn schedule(&mut self, action: A, ticks: u32) {
        self.countdowns.push(Countdown {
            remaining: ticks,
            action,
        });
    }

    /// Advance all countdowns by one frame and return the actions that are due
    pub fn tick(&mut self) -> Vec<A> {
        let mut due = Vec::new();
        let mut pending = Vec::with_capacity(self.countdowns.len());
        for mut countdown in self.countdowns.drain(..) {
            if countdown.remaining == 0 {
                due.push(countdown.action);
            } else {
                countdown.remaining -= 1;
                pending.push(countdown);
            }
        }
        self.countdowns = pending;
        trace!(due = due.len(), pending = self.countdowns.len(), "deferred tick");
        due
    }

    /// Drop every pending countdown
    pub fn cancel_all(&mut self) {
        self.countdowns.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.countdowns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.countdowns.len()
    }
}
