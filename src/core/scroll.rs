//! Header scroll state and frame throttling for the scroll listener.

use std::cell::Cell;

/// Header class markers derived from one scroll tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderState {
    /// Past the threshold: compact header style
    pub scrolled: bool,
    /// Past the threshold and moving down: header slides out of view
    pub nav_hidden: bool,
}

/// Tracks the previous scroll offset to derive header state and direction
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    threshold: f64,
    last_offset: f64,
}

impl ScrollTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            last_offset: 0.0,
        }
    }

    /// Compute the header state for offset `current` and remember it.
    pub fn update(&mut self, current: f64) -> HeaderState {
        let scrolled = current > self.threshold;
        let state = HeaderState {
            scrolled,
            nav_hidden: scrolled && current > self.last_offset,
        };
        self.last_offset = current;
        state
    }

    pub fn last_offset(&self) -> f64 {
        self.last_offset
    }
}

/// One-update-per-frame gate for high-frequency events.
///
/// `try_begin` succeeds only when no update is already in flight; the frame
/// callback calls `finish` once it has run.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    in_flight: Cell<bool>,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self) -> bool {
        !self.in_flight.replace(true)
    }

    pub fn finish(&self) {
        self.in_flight.set(false);
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }
}
