use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for one caller's end-to-end dialogue instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully collected and caller-confirmed reservation.
///
/// Values are already validated: party size 1–20, date not in the past at
/// extraction time, phone at least 7 digits, name title-cased and non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub party_size: u8,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub name: String,
    pub phone: String,
}
