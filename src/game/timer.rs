//! Single-slot scheduler for mismatch recovery.
//!
//! At most one mismatch is ever on display, so the timer holds at most one
//! pending flip-back. Scheduling replaces it; cancelling drops it.

use std::time::{Duration, Instant};

use crate::core::MISMATCH_DELAY;
use crate::session::FlipBackTicket;

/// A flip-back waiting for its deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledFlipBack {
    pub ticket: FlipBackTicket,
    pub due: Instant,
}

/// The mismatch timer.
#[derive(Clone, Debug)]
pub struct MismatchTimer {
    delay: Duration,
    pending: Option<ScheduledFlipBack>,
}

impl MismatchTimer {
    /// Create a timer firing `delay` after each mismatch.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The fixed delay between a mismatch and its flip-back.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule a flip-back `delay` after `now`.
    pub fn schedule(&mut self, ticket: FlipBackTicket, now: Instant) {
        self.pending = Some(ScheduledFlipBack {
            ticket,
            due: now + self.delay,
        });
    }

    /// Drop the pending flip-back, if any. It will never fire.
    pub fn cancel(&mut self) -> Option<ScheduledFlipBack> {
        self.pending.take()
    }

    #[must_use]
    pub fn pending(&self) -> Option<&ScheduledFlipBack> {
        self.pending.as_ref()
    }

    /// Time left before the pending flip-back fires (zero if overdue).
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(now))
    }

    /// Remove and return the pending ticket if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<FlipBackTicket> {
        match self.pending {
            Some(p) if p.due <= now => {
                self.pending = None;
                Some(p.ticket)
            }
            _ => None,
        }
    }
}

impl Default for MismatchTimer {
    fn default() -> Self {
        Self::new(MISMATCH_DELAY)
    }
}
