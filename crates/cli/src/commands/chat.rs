//! Interactive text-mode reservation session.
//!
//! Mirrors the call flow: the engine speaks first, each typed line is one
//! caller turn, and a confirmed reservation is submitted to the booking
//! webhook before the dialogue resets for the next caller. "salir" ends the
//! session.

use std::io::{self, BufRead, Write};

use mesa_booking::WebhookHandoff;
use mesa_core::config::{AppConfig, LoadOptions};
use mesa_core::{ConversationState, DialogueEngine, ReservationHandoff};

use super::CommandResult;

const FAREWELL: &str = "¡Hasta luego! Que tenga un buen día.";
const EXIT_WORD: &str = "salir";

pub fn run(options: LoadOptions, phone: Option<String>) -> CommandResult {
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => return CommandResult::failure("chat", "config", error.to_string(), 2),
    };
    crate::init_logging(&config);

    let handoff = match WebhookHandoff::new(&config.webhook) {
        Ok(handoff) => handoff,
        Err(error) => return CommandResult::failure("chat", "webhook", error.to_string(), 2),
    };
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => return CommandResult::failure("chat", "runtime", error.to_string(), 2),
    };

    let caller_phone = phone.or_else(|| config.session.caller_phone.clone());
    let engine = DialogueEngine::new();
    let mut state = ConversationState::new(caller_phone);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    // The assistant speaks first.
    let opening = engine.handle_utterance(&mut state, "");
    say(&opening.prompt);

    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let Some(Ok(line)) = lines.next() else { break };
        let utterance = line.trim();
        if utterance.eq_ignore_ascii_case(EXIT_WORD) {
            say(FAREWELL);
            break;
        }

        let turn = engine.handle_utterance(&mut state, utterance);
        say(&turn.prompt);

        if turn.session_complete {
            if let Some(reservation) = turn.reservation {
                let outcome = runtime.block_on(handoff.submit(&reservation, &state.session_id));
                say(&outcome.message);
            }
            state.reset();
            let reopening = engine.handle_utterance(&mut state, "");
            say(&format!("¡Perfecto! {}", reopening.prompt));
        }
    }

    CommandResult::success("chat", "session closed")
}

fn say(message: &str) {
    println!("Sistema: {message}");
}
