//! Reservation handoff adapter: serializes a completed slot set into the
//! booking collaborator's wire contract and submits it over HTTP.

pub mod payload;
pub mod webhook;

pub use payload::HandoffRequest;
pub use webhook::{WebhookError, WebhookHandoff, GENERIC_CONFIRMATION, HANDOFF_APOLOGY};
