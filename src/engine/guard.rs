//! The self-selecting latch.
//!
//! Writes to the live selection synchronously raise the host's
//! "selection changed" notification, which would re-enter the engine
//! mid-update. The latch breaks that cycle: the engine arms it around its
//! own selection writes and swallows notifications while armed.
//!
//! Release is deliberately deferred. The engine schedules it when its
//! write completes, but the latch only disarms when the adapter calls
//! [`settle`](SelectLatch::settle) - typically from a short timer or an
//! idle callback after the host's notification queue has drained - so
//! late-delivered notifications for the engine's own writes are still
//! absorbed. Everything runs on one thread; this is a logical guard, not
//! a lock.

/// Latch suppressing the engine's own selection-changed notifications.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectLatch {
    armed: bool,
    release_pending: bool,
}

impl SelectLatch {
    /// New, disarmed latch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm before a self-initiated selection write.
    pub fn arm(&mut self) {
        self.armed = true;
        self.release_pending = false;
    }

    /// The write completed; allow the next [`settle`](Self::settle) to
    /// disarm.
    pub fn schedule_release(&mut self) {
        if self.armed {
            self.release_pending = true;
        }
    }

    /// Should an incoming notification be dropped?
    #[must_use]
    pub fn swallow(&self) -> bool {
        self.armed
    }

    /// Deferred disarm point. A no-op while a write is still in flight.
    pub fn settle(&mut self) {
        if self.release_pending {
            self.armed = false;
            self.release_pending = false;
        }
    }

    /// True while notifications are being suppressed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}
