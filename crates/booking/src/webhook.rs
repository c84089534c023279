//! HTTP submission of a completed reservation to the booking webhook.
//!
//! One blocking (awaited) POST per confirmed reservation, with a fixed
//! timeout. Failures are data, not exceptions: every branch produces a
//! caller-facing [`HandoffOutcome`] and the raw error is kept for the logs.

use std::time::Duration;

use async_trait::async_trait;
use mesa_core::config::WebhookConfig;
use mesa_core::{HandoffOutcome, Reservation, ReservationHandoff, SessionId};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::payload::HandoffRequest;

pub const GENERIC_CONFIRMATION: &str =
    "¡Reserva confirmada! Recibirá una confirmación por teléfono.";
pub const HANDOFF_APOLOGY: &str =
    "Hubo un problema procesando su reserva. Por favor, intente de nuevo.";

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("could not build the http client: {0}")]
    Client(#[from] reqwest::Error),
}

pub struct WebhookHandoff {
    client: Client,
    url: String,
    language_code: String,
    session_label: String,
    origin_note: String,
}

impl WebhookHandoff {
    pub fn new(config: &WebhookConfig) -> Result<Self, WebhookError> {
        let client =
            Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
            language_code: config.language_code.clone(),
            session_label: config.session_label.clone(),
            origin_note: config.origin_note.clone(),
        })
    }
}

#[async_trait]
impl ReservationHandoff for WebhookHandoff {
    async fn submit(&self, reservation: &Reservation, session: &SessionId) -> HandoffOutcome {
        let request = HandoffRequest::new(
            reservation,
            session,
            &self.language_code,
            &self.session_label,
            &self.origin_note,
        );

        info!(
            event_name = "booking.handoff_submitted",
            session_id = %session,
            party_size = reservation.party_size,
            "submitting reservation to booking webhook"
        );

        let response = match self.client.post(&self.url).json(&request).send().await {
            Ok(response) => response,
            Err(error) => {
                warn!(
                    event_name = "booking.handoff_transport_failed",
                    session_id = %session,
                    error = %error,
                    "booking webhook unreachable"
                );
                return HandoffOutcome::failure(HANDOFF_APOLOGY, error.to_string());
            }
        };

        let status = response.status().as_u16();
        let body = response.json::<Value>().await.ok();
        let outcome = interpret_response(status, body.as_ref());
        if !outcome.success {
            warn!(
                event_name = "booking.handoff_rejected",
                session_id = %session,
                status,
                "booking webhook returned a non-success status"
            );
        }
        outcome
    }
}

/// Maps the webhook's status and body onto a caller-facing outcome. Any 2xx
/// is a success; the acknowledgement text is used when present, otherwise a
/// generic confirmation. Everything else is a failure with the apology line.
pub(crate) fn interpret_response(status: u16, body: Option<&Value>) -> HandoffOutcome {
    if !(200..300).contains(&status) {
        return HandoffOutcome::failure(HANDOFF_APOLOGY, format!("webhook status {status}"));
    }
    let message = body.and_then(fulfillment_message).unwrap_or_else(|| {
        GENERIC_CONFIRMATION.to_string()
    });
    HandoffOutcome::success(message)
}

/// `fulfillment_response.messages[0].text.text`, tolerating both the plain
/// string form and the Dialogflow array-of-strings form.
fn fulfillment_message(body: &Value) -> Option<String> {
    let text = body
        .get("fulfillment_response")?
        .get("messages")?
        .get(0)?
        .get("text")?
        .get("text")?;
    match text {
        Value::String(message) => Some(message.clone()),
        Value::Array(messages) => {
            messages.first().and_then(Value::as_str).map(str::to_string)
        }
        _ => None,
    }
}
