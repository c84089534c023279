const MIN_DIGITS: usize = 7;
const MAX_RAW_RUN: usize = 15;

/// Extracts a phone number: the first run of digits/`+`/separators at least
/// 7 raw characters long, stripped down to digits plus a preserved leading
/// `+`. Runs are capped at 15 raw characters. Fewer than 7 digits after
/// stripping is a miss.
///
/// A run opens only on a digit or `+`; separators before the number do not
/// count against the cap.
pub fn extract(utterance: &str) -> Option<String> {
    let mut run = String::new();
    for character in utterance.chars() {
        let extends_run =
            if run.is_empty() { opens_run(character) } else { is_phone_char(character) };
        if extends_run {
            if run.len() < MAX_RAW_RUN {
                run.push(character);
            }
            continue;
        }
        if let Some(phone) = digits_of(&run) {
            return Some(phone);
        }
        run.clear();
    }
    digits_of(&run)
}

fn opens_run(character: char) -> bool {
    character.is_ascii_digit() || character == '+'
}

fn is_phone_char(character: char) -> bool {
    character.is_ascii_digit() || matches!(character, '+' | ' ' | '-' | '(' | ')')
}

fn digits_of(run: &str) -> Option<String> {
    if run.len() < MIN_DIGITS {
        return None;
    }
    let trimmed = run.trim();
    let mut digits = String::new();
    if trimmed.starts_with('+') {
        digits.push('+');
    }
    digits.extend(trimmed.chars().filter(char::is_ascii_digit));
    let digit_count = digits.chars().filter(char::is_ascii_digit).count();
    (digit_count >= MIN_DIGITS).then_some(digits)
}
