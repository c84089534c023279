//! Spanish prompt catalogue and confirmation rendering.
//!
//! Wording follows the production assistant. The confirmation readback
//! formats the date as "día de mes" and the phone as digit words grouped in
//! runs of three, which is what the speech synthesizer downstream expects.

use chrono::{Datelike, NaiveDate};

use super::states::ReservationSlots;
use crate::reservation::Reservation;

pub(crate) const GREETING: &str =
    "¡Hola! Bienvenido a nuestro restaurante. ¿En qué puedo ayudarle?";
pub(crate) const ASK_PEOPLE: &str =
    "¡Perfecto! Encantado de ayudarle con su reserva. ¿Para cuántas personas?";
pub(crate) const REASK_INTENTION: &str =
    "Disculpe, solo puedo ayudarle con reservas. ¿Le gustaría hacer una reserva?";
pub(crate) const REASK_PEOPLE: &str =
    "No entendí. ¿Cuántas personas? Puede decir, por ejemplo, para cuatro personas.";
pub(crate) const REASK_DATE: &str = "No entendí la fecha. ¿Qué día?";
pub(crate) const REASK_TIME: &str = "No entendí. ¿A qué hora?";
pub(crate) const REASK_NAME: &str = "No entendí. ¿Su nombre?";
pub(crate) const REASK_PHONE_PREFERENCE: &str = "¿Desea usar este número o prefiere dar otro?";
pub(crate) const ASK_PHONE_NUMBER: &str = "¿Qué número de teléfono prefiere?";
pub(crate) const REASK_PHONE_NUMBER: &str =
    "No entendí el número. Por favor, dígalo dígito por dígito.";
pub(crate) const CONFIRMED: &str =
    "¡Perfecto! Su reserva está confirmada. Le esperamos. ¡Buen día!";
pub(crate) const ASK_WHICH_CHANGE: &str = "¿Qué le gustaría cambiar? Puede decir cambiar \
     personas, cambiar fecha, cambiar hora, cambiar nombre o cambiar teléfono.";
pub(crate) const REASK_CONFIRMATION: &str =
    "¿Confirma los datos de la reserva? Responda sí para confirmar o no para modificar algo.";
pub(crate) const RECOVERY: &str = "¿En qué puedo ayudarle? ¿Le gustaría hacer una reserva?";

pub(crate) const CHANGE_PEOPLE: &str = "Perfecto. ¿Para cuántas personas?";
pub(crate) const CHANGE_DATE: &str = "Perfecto. ¿Para qué fecha?";
pub(crate) const CHANGE_TIME: &str = "Perfecto. ¿A qué hora?";
pub(crate) const CHANGE_NAME: &str = "Perfecto. ¿Su nombre?";
pub(crate) const CHANGE_PHONE: &str = "Perfecto. ¿Desea usar este número o prefiere otro?";

const MONTH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const DIGIT_WORDS: [&str; 10] =
    ["cero", "uno", "dos", "tres", "cuatro", "cinco", "seis", "siete", "ocho", "nueve"];

pub(crate) fn people_confirmed(count: u8) -> String {
    format!("Perfecto, {count} {}. ¿Para qué fecha?", person_word(count))
}

pub(crate) fn date_confirmed(date: NaiveDate) -> String {
    format!("Perfecto, {}. ¿A qué hora?", spanish_date(date))
}

pub(crate) fn time_confirmed(time: chrono::NaiveTime) -> String {
    format!("Perfecto, a las {}. ¿Su nombre?", time.format("%H:%M"))
}

pub(crate) fn name_confirmed(name: &str) -> String {
    format!(
        "Perfecto, {name}. ¿Desea usar este número de teléfono para la reserva, \
         o prefiere indicar otro?"
    )
}

/// "20 de marzo" — year is omitted in speech, as the assistant always books
/// the nearest future occurrence.
pub(crate) fn spanish_date(date: NaiveDate) -> String {
    let month = MONTH_NAMES[date.month0() as usize];
    format!("{} de {month}", date.day())
}

/// Digit-by-digit readback grouped in threes: "seis cero cero, cero..."
pub(crate) fn phone_for_speech(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().filter(char::is_ascii_digit).collect();
    let mut spoken = String::new();
    for (index, digit) in digits.iter().enumerate() {
        spoken.push_str(DIGIT_WORDS[digit.to_digit(10).unwrap_or(0) as usize]);
        if index + 1 == digits.len() {
            break;
        }
        if (index + 1) % 3 == 0 {
            spoken.push_str(", ");
        } else {
            spoken.push(' ');
        }
    }
    spoken
}

/// Enumerates all five slots in fixed order: size, date, time, name, phone.
pub(crate) fn confirmation(reservation: &Reservation) -> String {
    format!(
        "Confirmo: {} {}, {} a las {}, a nombre de {}, teléfono {}. ¿Es correcto?",
        reservation.party_size,
        person_word(reservation.party_size),
        spanish_date(reservation.date),
        reservation.time.format("%H:%M"),
        reservation.name,
        phone_for_speech(&reservation.phone),
    )
}

/// Confirmation is only rendered once all five slots are held; a partial set
/// reaching this point is a programming error surfaced as a re-ask rather
/// than a panic.
pub(crate) fn confirmation_for(slots: &ReservationSlots) -> String {
    match slots.as_reservation() {
        Some(reservation) => confirmation(&reservation),
        None => REASK_CONFIRMATION.to_string(),
    }
}

fn person_word(count: u8) -> &'static str {
    if count == 1 {
        "persona"
    } else {
        "personas"
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::{confirmation, phone_for_speech, spanish_date};
    use crate::reservation::Reservation;

    #[test]
    fn dates_render_in_spanish() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
        assert_eq!(spanish_date(date), "15 de enero");
    }

    #[test]
    fn phone_readback_groups_digit_words_in_threes() {
        assert_eq!(
            phone_for_speech("600111222"),
            "seis cero cero, uno uno uno, dos dos dos"
        );
        assert_eq!(phone_for_speech("+3412"), "tres cuatro uno, dos");
    }

    #[test]
    fn confirmation_enumerates_all_slots_in_order() {
        let reservation = Reservation {
            party_size: 1,
            date: NaiveDate::from_ymd_opt(2024, 3, 22).expect("valid date"),
            time: NaiveTime::from_hms_opt(20, 30, 0).expect("valid time"),
            name: "Ana López".to_string(),
            phone: "600111222".to_string(),
        };

        let prompt = confirmation(&reservation);
        assert_eq!(
            prompt,
            "Confirmo: 1 persona, 22 de marzo a las 20:30, a nombre de Ana López, \
             teléfono seis cero cero, uno uno uno, dos dos dos. ¿Es correcto?"
        );
    }
}
