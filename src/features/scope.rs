//! Liveness of a view that owns a working set. A request may still be in
//! flight when its view goes away; the result is then dropped instead of being
//! written into state nobody is looking at.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

#[derive(Clone, Debug)]
pub struct ViewScope {
    alive: Arc<AtomicBool>,
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewScope {
    #[must_use]
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Marks the view as gone; every clone observes it.
    pub fn close(&self) {
        self.alive.store(false, Ordering::Release);
    }
}
