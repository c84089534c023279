use chrono::{Datelike, Duration, NaiveDate};

use super::{normalize_text, tokenize};

const MONTHS: [(&str, u32); 12] = [
    ("enero", 1),
    ("febrero", 2),
    ("marzo", 3),
    ("abril", 4),
    ("mayo", 5),
    ("junio", 6),
    ("julio", 7),
    ("agosto", 8),
    ("septiembre", 9),
    ("octubre", 10),
    ("noviembre", 11),
    ("diciembre", 12),
];

// Unaccented spellings included: transcription output is not reliable about
// accents.
const WEEKDAYS: [(&str, u32); 9] = [
    ("lunes", 0),
    ("martes", 1),
    ("miércoles", 2),
    ("miercoles", 2),
    ("jueves", 3),
    ("viernes", 4),
    ("sábado", 5),
    ("sabado", 5),
    ("domingo", 6),
];

/// Resolves an utterance to an absolute calendar date, relative to `today`.
///
/// Priority order: "pasado mañana" (checked before the shorter "mañana"),
/// "mañana", "hoy", named month + day ("15 de enero"), weekday name with an
/// optional "que viene"/"próximo" qualifier, then numeric `day/month`.
/// Month/day forms that already passed this year roll to next year; relative
/// and weekday forms are forward-looking by construction.
pub fn extract(utterance: &str, today: NaiveDate) -> Option<NaiveDate> {
    let normalized = normalize_text(utterance);

    if normalized.contains("pasado mañana")
        || (normalized.contains("pasado") && normalized.contains("mañana"))
    {
        return Some(today + Duration::days(2));
    }
    if normalized.contains("mañana") {
        return Some(today + Duration::days(1));
    }
    if normalized.contains("hoy") {
        return Some(today);
    }

    let tokens = tokenize(&normalized);

    if let Some(date) = named_month_date(&tokens, today) {
        return Some(date);
    }
    if let Some(date) = weekday_date(&normalized, today) {
        return Some(date);
    }
    numeric_date(&tokens, today)
}

/// "15 de enero", "15 enero" or "enero 15".
fn named_month_date(tokens: &[String], today: NaiveDate) -> Option<NaiveDate> {
    let month_index = tokens
        .iter()
        .position(|token| MONTHS.iter().any(|(name, _)| name == token))?;
    let month = MONTHS
        .iter()
        .find(|(name, _)| *name == tokens[month_index])
        .map(|(_, number)| *number)?;

    let day_before = tokens[..month_index]
        .iter()
        .rev()
        .filter(|token| *token != "de" && *token != "del")
        .take(1)
        .find_map(|token| parse_day(token));
    let day_after = tokens.get(month_index + 1).and_then(|token| parse_day(token));

    let day = day_before.or(day_after)?;
    resolve_forward(today, month, day)
}

fn weekday_date(normalized: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (_, target) = WEEKDAYS.iter().find(|(name, _)| normalized.contains(name))?;

    let current = today.weekday().num_days_from_monday();
    let mut days_until = i64::from(*target) - i64::from(current);
    if days_until <= 0 {
        days_until += 7;
    }

    let next_week_qualifier = normalized.contains("que viene")
        || normalized.contains("próximo")
        || normalized.contains("proximo");
    if next_week_qualifier && days_until < 7 {
        days_until += 7;
    }

    Some(today + Duration::days(days_until))
}

/// Numeric short form "10/10" or "10-10", read as day/month.
fn numeric_date(tokens: &[String], today: NaiveDate) -> Option<NaiveDate> {
    for token in tokens {
        let Some((day_part, month_part)) = token.split_once(['/', '-']) else {
            continue;
        };
        let (Ok(day), Ok(month)) = (day_part.parse::<u32>(), month_part.parse::<u32>()) else {
            continue;
        };
        return resolve_forward(today, month, day);
    }
    None
}

fn resolve_forward(today: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    let this_year = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if this_year < today {
        return NaiveDate::from_ymd_opt(today.year() + 1, month, day);
    }
    Some(this_year)
}

fn parse_day(token: &str) -> Option<u32> {
    let day = token.parse::<u32>().ok()?;
    (1..=31).contains(&day).then_some(day)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::extract;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn day_after_tomorrow_is_not_confused_with_tomorrow() {
        let today = day(2024, 3, 20);
        assert_eq!(extract("pasado mañana", today), Some(day(2024, 3, 22)));
        assert_eq!(extract("mañana", today), Some(day(2024, 3, 21)));
    }

    #[test]
    fn today_resolves_to_today() {
        let today = day(2024, 3, 20);
        assert_eq!(extract("hoy mismo", today), Some(today));
    }

    #[test]
    fn named_month_in_the_past_rolls_to_next_year() {
        let today = day(2024, 6, 1);
        assert_eq!(extract("el 10 de enero", today), Some(day(2025, 1, 10)));
    }

    #[test]
    fn named_month_still_ahead_stays_this_year() {
        let today = day(2024, 6, 1);
        assert_eq!(extract("15 de agosto", today), Some(day(2024, 8, 15)));
        assert_eq!(extract("agosto 15", today), Some(day(2024, 8, 15)));
    }

    #[test]
    fn weekday_resolves_to_nearest_future_occurrence() {
        // 2024-03-20 is a Wednesday.
        let today = day(2024, 3, 20);
        assert_eq!(extract("el viernes", today), Some(day(2024, 3, 22)));
        assert_eq!(extract("el miércoles", today), Some(day(2024, 3, 27)));
    }

    #[test]
    fn qualified_weekday_is_pushed_one_week() {
        let today = day(2024, 3, 20);
        assert_eq!(extract("el viernes que viene", today), Some(day(2024, 3, 29)));
        assert_eq!(extract("próximo sabado", today), Some(day(2024, 3, 30)));
    }

    #[test]
    fn numeric_short_form_rolls_forward_when_past() {
        let today = day(2024, 6, 1);
        assert_eq!(extract("el 10/10", today), Some(day(2024, 10, 10)));
        assert_eq!(extract("el 10-02", today), Some(day(2025, 2, 10)));
    }

    #[test]
    fn impossible_dates_are_a_miss() {
        let today = day(2024, 6, 1);
        assert_eq!(extract("30 de febrero", today), None);
        assert_eq!(extract("no estoy seguro", today), None);
    }
}
