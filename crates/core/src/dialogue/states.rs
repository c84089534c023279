use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::reservation::{Reservation, SessionId};

/// Dialogue step. Exactly one is current per session; transitions are a
/// strict function of (step, extraction outcome).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Greeting,
    AskIntention,
    AskPeople,
    AskDate,
    AskTime,
    AskName,
    AskPhone,
    AskPhoneNumber,
    Confirm,
    Complete,
}

/// One named field of the reservation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    PartySize,
    Date,
    Time,
    Name,
    Phone,
}

impl Slot {
    /// The step that collects this slot.
    pub fn ask_step(self) -> Step {
        match self {
            Self::PartySize => Step::AskPeople,
            Self::Date => Step::AskDate,
            Self::Time => Step::AskTime,
            Self::Name => Step::AskName,
            Self::Phone => Step::AskPhone,
        }
    }
}

/// Incrementally populated slot values. A slot is `Some` if and only if its
/// Ask step has been passed at least once this session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationSlots {
    pub party_size: Option<u8>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl ReservationSlots {
    pub fn clear(&mut self, slot: Slot) {
        match slot {
            Slot::PartySize => self.party_size = None,
            Slot::Date => self.date = None,
            Slot::Time => self.time = None,
            Slot::Name => self.name = None,
            Slot::Phone => self.phone = None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.as_reservation().is_some()
    }

    /// The finalized slot set, available only once all five slots hold values.
    pub fn as_reservation(&self) -> Option<Reservation> {
        Some(Reservation {
            party_size: self.party_size?,
            date: self.date?,
            time: self.time?,
            name: self.name.clone()?,
            phone: self.phone.clone()?,
        })
    }
}

/// Mutable state of one call/session. Created at session start, mutated only
/// by the dialogue engine, reset for a fresh reservation after completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversationState {
    pub step: Step,
    pub slots: ReservationSlots,
    /// Caller-id default offered at AskPhone, supplied once by the channel.
    pub caller_phone_hint: Option<String>,
    pub session_id: SessionId,
}

impl ConversationState {
    pub fn new(caller_phone_hint: Option<String>) -> Self {
        Self {
            step: Step::Greeting,
            slots: ReservationSlots::default(),
            caller_phone_hint,
            session_id: SessionId::generate(),
        }
    }

    /// Discards collected data for a fresh reservation on the same channel.
    /// The caller-id hint survives; the session identifier does not.
    pub fn reset(&mut self) {
        self.step = Step::Greeting;
        self.slots = ReservationSlots::default();
        self.session_id = SessionId::generate();
    }
}

/// Engine output for one processed utterance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    /// Next thing to say/display to the caller; never empty.
    pub prompt: String,
    /// True exactly when the caller has confirmed and the slot set is final.
    pub session_complete: bool,
    /// Present only when `session_complete` is true.
    pub reservation: Option<Reservation>,
}

impl Turn {
    pub(crate) fn prompt(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), session_complete: false, reservation: None }
    }

    pub(crate) fn complete(prompt: impl Into<String>, reservation: Reservation) -> Self {
        Self { prompt: prompt.into(), session_complete: true, reservation: Some(reservation) }
    }
}
