use async_trait::async_trait;

use crate::reservation::{Reservation, SessionId};

/// Result of submitting a completed reservation to the booking collaborator.
///
/// Carries the branch decision as data: the state machine and hosting loop
/// never branch on a raised error from the handoff path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandoffOutcome {
    pub success: bool,
    /// Caller-facing closing message, always non-empty.
    pub message: String,
    /// Transport/status detail for logging; never spoken to the caller.
    pub raw_error: Option<String>,
}

impl HandoffOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into(), raw_error: None }
    }

    pub fn failure(message: impl Into<String>, raw_error: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), raw_error: Some(raw_error.into()) }
    }
}

/// Seam to the external booking collaborator.
///
/// One call per confirmed reservation; implementations must not retry
/// internally and must not deduplicate repeated submissions.
#[async_trait]
pub trait ReservationHandoff: Send + Sync {
    async fn submit(&self, reservation: &Reservation, session: &SessionId) -> HandoffOutcome;
}
