//! End-to-end dialogue scenarios: a scripted caller driving the machine from
//! greeting to handoff through the hosting-loop contract.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use mesa_core::{
    Clock, ConversationState, DialogueEngine, HandoffOutcome, Reservation, ReservationHandoff,
    SessionId, Step,
};

#[derive(Clone, Copy, Debug)]
struct FixedClock(NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Default)]
struct RecordingHandoff {
    calls: AtomicUsize,
    submitted: Mutex<Vec<Reservation>>,
}

#[async_trait]
impl ReservationHandoff for RecordingHandoff {
    async fn submit(&self, reservation: &Reservation, _session: &SessionId) -> HandoffOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().expect("no poisoned lock").push(reservation.clone());
        HandoffOutcome::success("¡Reserva confirmada!")
    }
}

fn engine() -> DialogueEngine<FixedClock> {
    DialogueEngine::with_clock(FixedClock(
        NaiveDate::from_ymd_opt(2024, 3, 20).expect("valid test date"),
    ))
}

/// Runs one utterance sequence the way the hosting loop does: feed each turn,
/// and when the engine reports completion, submit exactly once and reset.
async fn run_session(
    engine: &DialogueEngine<FixedClock>,
    state: &mut ConversationState,
    handoff: &RecordingHandoff,
    utterances: &[&str],
) {
    for utterance in utterances {
        let turn = engine.handle_utterance(state, utterance);
        assert!(!turn.prompt.is_empty(), "every turn must produce a prompt");
        if turn.session_complete {
            let reservation = turn.reservation.expect("complete turn carries the slot set");
            let outcome = handoff.submit(&reservation, &state.session_id).await;
            assert!(outcome.success);
            state.reset();
        }
    }
}

#[tokio::test]
async fn scripted_reservation_triggers_exactly_one_handoff() {
    let engine = engine();
    let handoff = RecordingHandoff::default();
    let mut state = ConversationState::new(Some("+34600000000".to_string()));

    // Greeting turn, then the seven caller utterances.
    run_session(
        &engine,
        &mut state,
        &handoff,
        &[
            "",
            "quiero reservar una mesa",
            "4 personas",
            "mañana",
            "a las 9",
            "Ana López",
            "sí",
            "sí",
        ],
    )
    .await;

    assert_eq!(handoff.calls.load(Ordering::SeqCst), 1);
    let submitted = handoff.submitted.lock().expect("no poisoned lock");
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].party_size, 4);
    assert_eq!(submitted[0].date, NaiveDate::from_ymd_opt(2024, 3, 21).expect("valid date"));
    assert_eq!(submitted[0].name, "Ana López");

    // The machine is ready for a fresh reservation on the same channel.
    assert_eq!(state.step, Step::Greeting);
    assert!(state.slots.party_size.is_none());
}

#[tokio::test]
async fn change_request_recollects_only_later_steps() {
    let engine = engine();
    let handoff = RecordingHandoff::default();
    let mut state = ConversationState::new(Some("+34600000000".to_string()));

    run_session(
        &engine,
        &mut state,
        &handoff,
        &[
            "",
            "quiero reservar una mesa",
            "4 personas",
            "mañana",
            "a las 9",
            "Ana López",
            "sí",
            "cambiar hora",
            "a las 10",
            "Ana López",
            "sí",
            "sí",
        ],
    )
    .await;

    assert_eq!(handoff.calls.load(Ordering::SeqCst), 1);
    let submitted = handoff.submitted.lock().expect("no poisoned lock");
    assert_eq!(submitted[0].time.format("%H:%M").to_string(), "10:00");
    // Slots not named in the change request kept their values.
    assert_eq!(submitted[0].party_size, 4);
    assert_eq!(submitted[0].date, NaiveDate::from_ymd_opt(2024, 3, 21).expect("valid date"));
    assert_eq!(submitted[0].phone, "+34600000000");
}

#[tokio::test]
async fn resubmitting_the_same_reservation_is_two_independent_calls() {
    let handoff = RecordingHandoff::default();
    let session = SessionId::generate();
    let reservation = Reservation {
        party_size: 2,
        date: NaiveDate::from_ymd_opt(2024, 3, 22).expect("valid date"),
        time: chrono::NaiveTime::from_hms_opt(21, 0, 0).expect("valid time"),
        name: "Juan García".to_string(),
        phone: "+34600111222".to_string(),
    };

    handoff.submit(&reservation, &session).await;
    handoff.submit(&reservation, &session).await;

    assert_eq!(handoff.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn two_reservations_back_to_back_reuse_the_channel() {
    let engine = engine();
    let handoff = RecordingHandoff::default();
    let mut state = ConversationState::new(Some("+34600000000".to_string()));

    let script = [
        "",
        "quiero reservar una mesa",
        "2 personas",
        "hoy",
        "a las 21:00",
        "Juan",
        "sí",
        "sí",
        // Reset happened; a fresh greeting turn starts the second round.
        "",
        "otra reserva",
        "somos 6",
        "pasado mañana",
        "a las 2 de la tarde",
        "Marta Ruiz",
        "sí",
        "sí",
    ];
    run_session(&engine, &mut state, &handoff, &script).await;

    assert_eq!(handoff.calls.load(Ordering::SeqCst), 2);
    let submitted = handoff.submitted.lock().expect("no poisoned lock");
    assert_eq!(submitted[1].party_size, 6);
    assert_eq!(submitted[1].date, NaiveDate::from_ymd_opt(2024, 3, 22).expect("valid date"));
    assert_eq!(submitted[1].time.format("%H:%M").to_string(), "14:00");
}
