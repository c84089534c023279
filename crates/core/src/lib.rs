//! Slot-filling dialogue engine for restaurant table reservations.
//!
//! The core is a deterministic state machine: each caller utterance is fed to
//! the extractor for the current step, the step advances (or re-prompts), and
//! the next system utterance comes back. Once all five slots are filled and
//! confirmed, the completed [`Reservation`] is handed to a
//! [`ReservationHandoff`] implementation owned by the hosting loop.
//!
//! Nothing in this crate performs I/O. Speech transcription, audio, and the
//! booking webhook all live behind the collaborator seams.

pub mod config;
pub mod dialogue;
pub mod extract;
pub mod handoff;
pub mod reservation;

pub use config::{AppConfig, ConfigError, LoadOptions};
pub use dialogue::{
    Clock, ConversationState, DialogueEngine, ReservationSlots, Slot, Step, SystemClock, Turn,
};
pub use handoff::{HandoffOutcome, ReservationHandoff};
pub use reservation::{Reservation, SessionId};
