//! Session state machine.
//!
//! - `GameSession`: Owns the deck and round state; `select` and `flip_back`
//! - `SelectOutcome`: What a selection did (ignored, revealed, matched, mismatched)
//! - `FlipBackTicket`: Generation-tagged handle for a pending mismatch
//! - `SessionSnapshot`: Read-only view handed to the presentation layer

mod outcome;
#[allow(clippy::module_inception)]
mod session;
mod snapshot;

pub use outcome::{FlipBackTicket, IgnoreReason, SelectOutcome};
pub use session::GameSession;
pub use snapshot::{Phase, SessionSnapshot};
