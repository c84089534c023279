//! Field extractors: pure functions mapping a raw utterance to a typed slot
//! value, or `None` on a miss. No extractor raises; the dialogue engine is
//! the only place a miss turns into a re-prompt.
//!
//! Vocabulary is Spanish (the single working language). Matching is
//! keyword/token scanning over the normalized utterance; there is no
//! statistical classification anywhere in this module.

pub mod date;
pub mod name;
pub mod party_size;
pub mod phone;
pub mod time;

pub(crate) fn normalize_text(text: &str) -> String {
    text.to_lowercase()
}

/// Splits normalized text into tokens, keeping the separators that carry
/// meaning for numeric date/time forms (`20:30`, `10/10`, `+34...`).
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    let mut sanitized = String::with_capacity(text.len());
    for character in text.chars() {
        if character.is_alphanumeric() || matches!(character, ':' | '/' | '-' | '+') {
            sanitized.push(character);
        } else {
            sanitized.push(' ');
        }
    }
    sanitized.split_whitespace().map(|token| token.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::{normalize_text, tokenize};

    #[test]
    fn normalization_keeps_spanish_letters() {
        assert_eq!(normalize_text("Mañana a las OCHO"), "mañana a las ocho");
    }

    #[test]
    fn tokenization_preserves_numeric_forms() {
        let tokens = tokenize("el 10/10 a las 20:30, tel +34 600");
        assert!(tokens.contains(&"10/10".to_string()));
        assert!(tokens.contains(&"20:30".to_string()));
        assert!(tokens.contains(&"+34".to_string()));
    }
}
