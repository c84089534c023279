//! Wire shape expected by the external booking collaborator.
//!
//! Field names (`nomreserva`, `fechareserva`, ...) are the collaborator's
//! contract and must not be renamed.

use chrono::{Datelike, Timelike};
use mesa_core::{Reservation, SessionId};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HandoffRequest {
    #[serde(rename = "sessionInfo")]
    pub session_info: SessionInfo,
    #[serde(rename = "languageCode")]
    pub language_code: String,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub session: String,
    pub parameters: ReservationParameters,
}

#[derive(Debug, Serialize)]
pub struct ReservationParameters {
    pub nomreserva: String,
    pub telefonreserva: String,
    pub fechareserva: DateParameter,
    pub horareserva: TimeParameter,
    pub numeroreserva: u8,
    pub observacions: String,
}

#[derive(Debug, Serialize)]
pub struct DateParameter {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Serialize)]
pub struct TimeParameter {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl HandoffRequest {
    pub fn new(
        reservation: &Reservation,
        session: &SessionId,
        language_code: &str,
        session_label: &str,
        origin_note: &str,
    ) -> Self {
        Self {
            session_info: SessionInfo {
                session: format!("{session_label}-{session}"),
                parameters: ReservationParameters {
                    nomreserva: reservation.name.clone(),
                    telefonreserva: reservation.phone.clone(),
                    fechareserva: DateParameter {
                        year: reservation.date.year(),
                        month: reservation.date.month(),
                        day: reservation.date.day(),
                    },
                    horareserva: TimeParameter {
                        hours: reservation.time.hour(),
                        minutes: reservation.time.minute(),
                        seconds: 0,
                    },
                    numeroreserva: reservation.party_size,
                    observacions: origin_note.to_string(),
                },
            },
            language_code: language_code.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use mesa_core::{Reservation, SessionId};
    use serde_json::json;

    use super::HandoffRequest;

    #[test]
    fn payload_matches_the_collaborator_contract() {
        let reservation = Reservation {
            party_size: 4,
            date: NaiveDate::from_ymd_opt(2024, 3, 21).expect("valid date"),
            time: NaiveTime::from_hms_opt(21, 30, 0).expect("valid time"),
            name: "Ana López".to_string(),
            phone: "+34600111222".to_string(),
        };
        let session = SessionId("sesion-de-prueba".to_string());

        let request = HandoffRequest::new(
            &reservation,
            &session,
            "es-ES",
            "mesa-text",
            "Reserva creada en modo texto",
        );
        let value = serde_json::to_value(&request).expect("serializable payload");

        assert_eq!(
            value,
            json!({
                "sessionInfo": {
                    "session": "mesa-text-sesion-de-prueba",
                    "parameters": {
                        "nomreserva": "Ana López",
                        "telefonreserva": "+34600111222",
                        "fechareserva": {"year": 2024, "month": 3, "day": 21},
                        "horareserva": {"hours": 21, "minutes": 30, "seconds": 0},
                        "numeroreserva": 4,
                        "observacions": "Reserva creada en modo texto"
                    }
                },
                "languageCode": "es-ES"
            })
        );
    }
}
