//! Conversation state machine and confirmation sub-dialogue.

pub mod engine;
pub mod prompts;
pub mod states;

pub use engine::{Clock, DialogueEngine, SystemClock};
pub use states::{ConversationState, ReservationSlots, Slot, Step, Turn};
