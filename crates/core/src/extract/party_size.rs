use super::{normalize_text, tokenize};

pub const MIN_PARTY_SIZE: u8 = 1;
pub const MAX_PARTY_SIZE: u8 = 20;

const CARDINAL_WORDS: [(&str, u8); 11] = [
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
];

/// Extracts a party size from an utterance like "para 3 personas",
/// "somos cuatro" or a bare "3".
///
/// Priority: cardinal number word anywhere, then structural numeric patterns
/// ("<n> personas", "para <n>", "somos <n>", "<n> comensales"), then any bare
/// integer token. A matched integer outside 1–20 is rejected and scanning
/// continues with the next pattern.
pub fn extract(utterance: &str) -> Option<u8> {
    let normalized = normalize_text(utterance);
    let tokens = tokenize(&normalized);

    for (word, value) in CARDINAL_WORDS {
        if tokens.iter().any(|token| token == word) {
            return Some(value);
        }
    }

    if let Some(count) = structural_match(&tokens) {
        return Some(count);
    }

    tokens.iter().find_map(|token| parse_in_range(token))
}

fn structural_match(tokens: &[String]) -> Option<u8> {
    for window in tokens.windows(2) {
        let [first, second] = window else { continue };
        if is_person_unit(second) {
            if let Some(count) = parse_in_range(first) {
                return Some(count);
            }
        }
        if (first == "para" || first == "somos") && second.chars().all(|c| c.is_ascii_digit()) {
            if let Some(count) = parse_in_range(second) {
                return Some(count);
            }
        }
    }
    None
}

fn is_person_unit(token: &str) -> bool {
    matches!(token, "persona" | "personas" | "comensal" | "comensales")
}

fn parse_in_range(token: &str) -> Option<u8> {
    let count = token.parse::<u8>().ok()?;
    (MIN_PARTY_SIZE..=MAX_PARTY_SIZE).contains(&count).then_some(count)
}
