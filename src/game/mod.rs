//! Game controller and its timing collaborators.
//!
//! - `MemoryGame`: start / select / poll / return-to-settings
//! - `MismatchTimer`: Single cancellable flip-back deadline
//! - `Clock`: Time source seam (`SystemClock`, `ManualClock`)

pub mod clock;
pub mod controller;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::MemoryGame;
pub use timer::{MismatchTimer, ScheduledFlipBack};
