use chrono::NaiveDate;

use super::prompts;
use super::states::{ConversationState, Slot, Step, Turn};
use crate::extract;

/// Source of "today" for resolving relative dates. Injected so date
/// resolution stays deterministic under test.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// The slot-filling state machine. Stateless itself: all per-call state lives
/// in the [`ConversationState`] it is handed, so one engine serves any number
/// of independent sessions.
#[derive(Clone, Debug)]
pub struct DialogueEngine<C = SystemClock> {
    clock: C,
}

impl DialogueEngine<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for DialogueEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> DialogueEngine<C>
where
    C: Clock,
{
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Processes one caller utterance: runs the extractor for the current
    /// step, advances (or re-prompts), and returns the next system utterance.
    /// Every path yields a non-empty prompt; a miss never raises.
    pub fn handle_utterance(&self, state: &mut ConversationState, utterance: &str) -> Turn {
        let text = extract::normalize_text(utterance);
        let tokens = extract::tokenize(&text);

        match state.step {
            Step::Greeting => {
                state.step = Step::AskIntention;
                Turn::prompt(prompts::GREETING)
            }
            Step::AskIntention => {
                if is_reservation_request(&text, &tokens) {
                    state.step = Step::AskPeople;
                    Turn::prompt(prompts::ASK_PEOPLE)
                } else {
                    Turn::prompt(prompts::REASK_INTENTION)
                }
            }
            Step::AskPeople => match extract::party_size::extract(utterance) {
                Some(count) => {
                    state.slots.party_size = Some(count);
                    state.step = Step::AskDate;
                    Turn::prompt(prompts::people_confirmed(count))
                }
                None => Turn::prompt(prompts::REASK_PEOPLE),
            },
            Step::AskDate => match extract::date::extract(utterance, self.clock.today()) {
                Some(date) => {
                    state.slots.date = Some(date);
                    state.step = Step::AskTime;
                    Turn::prompt(prompts::date_confirmed(date))
                }
                None => Turn::prompt(prompts::REASK_DATE),
            },
            Step::AskTime => match extract::time::extract(utterance) {
                Some(time) => {
                    state.slots.time = Some(time);
                    state.step = Step::AskName;
                    Turn::prompt(prompts::time_confirmed(time))
                }
                None => Turn::prompt(prompts::REASK_TIME),
            },
            Step::AskName => match extract::name::extract(utterance) {
                Some(name) => {
                    let prompt = prompts::name_confirmed(&name);
                    state.slots.name = Some(name);
                    state.step = Step::AskPhone;
                    Turn::prompt(prompt)
                }
                None => Turn::prompt(prompts::REASK_NAME),
            },
            Step::AskPhone => self.handle_phone_preference(state, utterance, &text, &tokens),
            Step::AskPhoneNumber => match extract::phone::extract(utterance) {
                Some(phone) => {
                    state.slots.phone = Some(phone);
                    state.step = Step::Confirm;
                    Turn::prompt(prompts::confirmation_for(&state.slots))
                }
                None => Turn::prompt(prompts::REASK_PHONE_NUMBER),
            },
            Step::Confirm => self.handle_confirmation(state, &text, &tokens),
            // Terminal step reached without a reset, or any future step this
            // match does not know: recover by re-asking the intention.
            Step::Complete => {
                state.step = Step::AskIntention;
                Turn::prompt(prompts::RECOVERY)
            }
        }
    }

    fn handle_phone_preference(
        &self,
        state: &mut ConversationState,
        utterance: &str,
        text: &str,
        tokens: &[String],
    ) -> Turn {
        if wants_caller_number(text, tokens) {
            match state.caller_phone_hint.clone() {
                Some(hint) => {
                    state.slots.phone = Some(hint);
                    state.step = Step::Confirm;
                    return Turn::prompt(prompts::confirmation_for(&state.slots));
                }
                // Nothing to reuse on this channel; collect one explicitly.
                None => {
                    state.step = Step::AskPhoneNumber;
                    return Turn::prompt(prompts::ASK_PHONE_NUMBER);
                }
            }
        }
        if wants_other_number(text, tokens) {
            state.step = Step::AskPhoneNumber;
            return Turn::prompt(prompts::ASK_PHONE_NUMBER);
        }
        if let Some(phone) = extract::phone::extract(utterance) {
            state.slots.phone = Some(phone);
            state.step = Step::Confirm;
            return Turn::prompt(prompts::confirmation_for(&state.slots));
        }
        Turn::prompt(prompts::REASK_PHONE_PREFERENCE)
    }

    fn handle_confirmation(
        &self,
        state: &mut ConversationState,
        text: &str,
        tokens: &[String],
    ) -> Turn {
        if let Some(slot) = change_request(text) {
            state.slots.clear(slot);
            state.step = slot.ask_step();
            return Turn::prompt(change_prompt(slot));
        }
        if is_confirmation(tokens) {
            return match state.slots.as_reservation() {
                Some(reservation) => {
                    state.step = Step::Complete;
                    Turn::complete(prompts::CONFIRMED, reservation)
                }
                // Step/slot consistency is an engine invariant; if it ever
                // breaks, re-asking beats completing a partial reservation.
                None => Turn::prompt(prompts::REASK_CONFIRMATION),
            };
        }
        if is_rejection(text, tokens) {
            return Turn::prompt(prompts::ASK_WHICH_CHANGE);
        }
        Turn::prompt(prompts::REASK_CONFIRMATION)
    }
}

fn has_token(tokens: &[String], word: &str) -> bool {
    tokens.iter().any(|token| token == word)
}

fn is_reservation_request(text: &str, tokens: &[String]) -> bool {
    const PHRASES: [&str; 8] =
        ["reservar", "reserva", "mesa", "quiero", "necesito", "quisiera", "deseo", "quería"];
    PHRASES.iter().any(|phrase| text.contains(phrase))
        || text.contains("me gustaría")
        || ["sí", "si", "vale"].into_iter().any(|word| has_token(tokens, word))
}

fn wants_caller_number(text: &str, tokens: &[String]) -> bool {
    text.contains("este")
        || text.contains("mismo")
        || ["sí", "si", "vale", "ok"].into_iter().any(|word| has_token(tokens, word))
}

fn wants_other_number(text: &str, tokens: &[String]) -> bool {
    text.contains("otro") || text.contains("diferente") || has_token(tokens, "no")
}

fn is_confirmation(tokens: &[String]) -> bool {
    ["sí", "si", "confirmo", "correcto", "vale"].into_iter().any(|word| has_token(tokens, word))
}

fn is_rejection(text: &str, tokens: &[String]) -> bool {
    has_token(tokens, "no") || text.contains("cambiar") || text.contains("modificar")
}

/// "cambiar hora", "quiero modificar el teléfono", ...
fn change_request(text: &str) -> Option<Slot> {
    if !text.contains("cambiar") && !text.contains("modificar") {
        return None;
    }
    if text.contains("personas") || text.contains("comensales") {
        return Some(Slot::PartySize);
    }
    if text.contains("fecha") || text.contains("día") || text.contains("dia") {
        return Some(Slot::Date);
    }
    if text.contains("hora") {
        return Some(Slot::Time);
    }
    if text.contains("nombre") {
        return Some(Slot::Name);
    }
    if text.contains("teléfono")
        || text.contains("telefono")
        || text.contains("número")
        || text.contains("numero")
    {
        return Some(Slot::Phone);
    }
    None
}

fn change_prompt(slot: Slot) -> &'static str {
    match slot {
        Slot::PartySize => prompts::CHANGE_PEOPLE,
        Slot::Date => prompts::CHANGE_DATE,
        Slot::Time => prompts::CHANGE_TIME,
        Slot::Name => prompts::CHANGE_NAME,
        Slot::Phone => prompts::CHANGE_PHONE,
    }
}
