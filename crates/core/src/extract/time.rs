use chrono::NaiveTime;

use super::{normalize_text, tokenize};

const HOUR_WORDS: [(&str, u32); 27] = [
    ("uno", 1),
    ("una", 1),
    ("dos", 2),
    ("tres", 3),
    ("cuatro", 4),
    ("cinco", 5),
    ("seis", 6),
    ("siete", 7),
    ("ocho", 8),
    ("nueve", 9),
    ("diez", 10),
    ("once", 11),
    ("doce", 12),
    ("trece", 13),
    ("catorce", 14),
    ("quince", 15),
    ("dieciséis", 16),
    ("dieciseis", 16),
    ("diecisiete", 17),
    ("dieciocho", 18),
    ("diecinueve", 19),
    ("veinte", 20),
    ("veintiuno", 21),
    ("veintidós", 22),
    ("veintidos", 22),
    ("veintitrés", 23),
    ("veintitres", 23),
];

/// Extracts a time of day (24h, minute precision).
///
/// Priority order: spoken hour word with optional "y media"/"y cuarto",
/// "a las HH[:MM]", bare HH:MM, "HH horas". An hour 0–11 with an evening
/// marker ("tarde"/"noche") in the utterance is shifted to PM. Candidates
/// outside 0–23 / 0–59 are discarded and scanning continues.
pub fn extract(utterance: &str) -> Option<NaiveTime> {
    let normalized = normalize_text(utterance);
    let tokens = tokenize(&normalized);
    let evening = normalized.contains("noche") || normalized.contains("tarde");

    if let Some(time) = spoken_hour(&tokens, &normalized, evening) {
        return Some(time);
    }
    if let Some(time) = after_a_las(&tokens, evening) {
        return Some(time);
    }
    if let Some(time) = clock_token(&tokens, evening) {
        return Some(time);
    }
    before_horas(&tokens, evening)
}

fn spoken_hour(tokens: &[String], normalized: &str, evening: bool) -> Option<NaiveTime> {
    let hours = tokens
        .iter()
        .find_map(|token| HOUR_WORDS.iter().find(|(word, _)| word == token).map(|(_, h)| *h))?;

    let minutes = if normalized.contains("y media") || normalized.contains("y treinta") {
        30
    } else if normalized.contains("y cuarto") || normalized.contains("y quince") {
        15
    } else {
        0
    };

    build(hours, minutes, evening)
}

/// "a las 8", "a la una", "a las 20:30".
fn after_a_las(tokens: &[String], evening: bool) -> Option<NaiveTime> {
    for window in tokens.windows(3) {
        let [first, article, value] = window else { continue };
        if first != "a" || (article != "las" && article != "la") {
            continue;
        }
        if let Some((hours, minutes)) = parse_clock(value) {
            return build(hours, minutes, evening);
        }
    }
    None
}

fn clock_token(tokens: &[String], evening: bool) -> Option<NaiveTime> {
    tokens
        .iter()
        .filter(|token| token.contains(':'))
        .find_map(|token| parse_clock(token).and_then(|(h, m)| build(h, m, evening)))
}

/// "20 horas", "a las 8 horas" (already covered), "las 14 horas".
fn before_horas(tokens: &[String], evening: bool) -> Option<NaiveTime> {
    for window in tokens.windows(2) {
        let [value, unit] = window else { continue };
        if unit != "hora" && unit != "horas" {
            continue;
        }
        if let Some((hours, minutes)) = parse_clock(value) {
            return build(hours, minutes, evening);
        }
    }
    None
}

fn parse_clock(token: &str) -> Option<(u32, u32)> {
    if let Some((hour_part, minute_part)) = token.split_once(':') {
        let hours = hour_part.parse::<u32>().ok()?;
        let minutes = if minute_part.is_empty() { 0 } else { minute_part.parse::<u32>().ok()? };
        return Some((hours, minutes));
    }
    token.parse::<u32>().ok().map(|hours| (hours, 0))
}

fn build(mut hours: u32, minutes: u32, evening: bool) -> Option<NaiveTime> {
    if evening && hours < 12 {
        hours += 12;
    }
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::extract;

    fn at(hours: u32, minutes: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hours, minutes, 0).expect("valid test time")
    }

    #[test]
    fn evening_marker_shifts_to_pm() {
        assert_eq!(extract("a las 8 de la noche"), Some(at(20, 0)));
        assert_eq!(extract("a las 8"), Some(at(8, 0)));
    }

    #[test]
    fn spoken_hour_with_half_past() {
        assert_eq!(extract("ocho y media de la tarde"), Some(at(20, 30)));
        assert_eq!(extract("ocho y media"), Some(at(8, 30)));
        assert_eq!(extract("siete y cuarto"), Some(at(7, 15)));
    }

    #[test]
    fn clock_forms_parse() {
        assert_eq!(extract("sobre las 21:45"), Some(at(21, 45)));
        assert_eq!(extract("a las 20:30"), Some(at(20, 30)));
        assert_eq!(extract("14 horas"), Some(at(14, 0)));
    }

    #[test]
    fn already_pm_hours_are_not_shifted_again() {
        assert_eq!(extract("a las 21 de la noche"), Some(at(21, 0)));
    }

    #[test]
    fn out_of_range_values_are_a_miss() {
        assert_eq!(extract("a las 25"), None);
        assert_eq!(extract("a las 8:75"), None);
        assert_eq!(extract("cuando pueda"), None);
    }
}
