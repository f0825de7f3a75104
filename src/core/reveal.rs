//! Fire-once staggered reveals.

use std::cell::{Cell, RefCell};

use super::host::WatchHandle;

/// Which entrance animation a group drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RevealGroup {
    #[display("stat cards")]
    StatCards,
    #[display("checklist")]
    Checklist,
    #[display("promo card")]
    PromoCard,
}

/// Delay before item `index` of a group is revealed
pub fn stagger_delay(index: usize, stagger_ms: u32) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(stagger_ms)
}

/// Delays for every item of a group of `count` items, in order
pub fn stagger_schedule(count: usize, stagger_ms: u32) -> Vec<u32> {
    (0..count).map(|i| stagger_delay(i, stagger_ms)).collect()
}

/// A trigger that activates at most once and then cancels its subscription.
///
/// The subscription handle is attached after construction because the host
/// only hands it back once the watch, whose callback already references this
/// trigger, has been registered.
pub struct OneShot<W: WatchHandle> {
    fired: Cell<bool>,
    handle: RefCell<Option<W>>,
}

impl<W: WatchHandle> OneShot<W> {
    pub fn new() -> Self {
        Self {
            fired: Cell::new(false),
            handle: RefCell::new(None),
        }
    }

    pub fn attach(&self, handle: W) {
        if self.fired.get() {
            handle.cancel();
        } else {
            *self.handle.borrow_mut() = Some(handle);
        }
    }

    /// Returns `true` exactly once; the first call also cancels the subscription.
    pub fn fire(&self) -> bool {
        if self.fired.replace(true) {
            return false;
        }
        if let Some(handle) = self.handle.borrow_mut().take() {
            handle.cancel();
        }
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }
}

impl<W: WatchHandle> Default for OneShot<W> {
    fn default() -> Self {
        Self::new()
    }
}
