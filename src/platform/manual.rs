//! Hand-cranked frame scheduler
//!
//! Hands out increasing handles and records cancellations. The owner fires
//! frames itself, e.g. through [`GameSession::advance`](crate::session::GameSession::advance).

use crate::session::{FrameHandle, Scheduler};

#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: i32,
    requested: u32,
    cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total frames requested so far
    pub fn requested(&self) -> u32 {
        self.requested
    }

    /// Handles revoked so far, in order
    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next += 1;
        self.requested += 1;
        Some(FrameHandle(self.next))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancelled.push(handle);
    }
}
