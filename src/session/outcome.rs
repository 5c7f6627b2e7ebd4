//! Results of a card selection.

use serde::{Deserialize, Serialize};

use crate::core::CardId;

/// Why a selection was ignored.
///
/// Ignored selections are not errors: the session state is unchanged and
/// callers are free to discard the reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// The gate is closed: a mismatch is on display or the game is won.
    Locked,
    /// No card with that ID is in the session.
    UnknownCard,
    /// The card is already face-up and unresolved.
    AlreadyFlipped,
    /// The card is already part of a found pair.
    AlreadyMatched,
    /// Two cards are already selected.
    SelectionFull,
}

/// Handle for a pending mismatch recovery.
///
/// Carries the generation of the session that produced it, so a ticket
/// outliving its session is recognised and dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipBackTicket {
    /// Generation of the owning session.
    pub generation: u64,
    /// The two mismatched cards, in selection order.
    pub cards: [CardId; 2],
}

/// Result of `GameSession::select`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// First card of a pair turned face-up.
    Revealed,
    /// Second card completed a pair. `won` is set when it was the last pair.
    Matched { won: bool },
    /// Second card did not match. Both stay face-up until the ticket is
    /// redeemed with `GameSession::flip_back`.
    Mismatched(FlipBackTicket),
}

impl SelectOutcome {
    /// Was the selection a no-op?
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, SelectOutcome::Ignored(_))
    }

    /// Did this selection complete a move (match or mismatch)?
    #[must_use]
    pub fn completes_move(&self) -> bool {
        matches!(self, SelectOutcome::Matched { .. } | SelectOutcome::Mismatched(_))
    }

    /// The flip-back ticket, if this was a mismatch.
    #[must_use]
    pub fn ticket(&self) -> Option<FlipBackTicket> {
        match self {
            SelectOutcome::Mismatched(ticket) => Some(*ticket),
            _ => None,
        }
    }
}
