/// Extracts a caller name: the trimmed utterance rendered in title case.
///
/// Deliberately permissive. Whether the text really is a name is left to the
/// human caller at the confirmation step, so anything non-empty passes.
pub fn extract(utterance: &str) -> Option<String> {
    let trimmed = utterance.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(title_case(trimmed))
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::extract;

    #[test]
    fn names_are_title_cased() {
        assert_eq!(extract("ana lópez").as_deref(), Some("Ana López"));
        assert_eq!(extract("  JUAN GARCÍA  ").as_deref(), Some("Juan García"));
    }

    #[test]
    fn empty_input_is_a_miss() {
        assert_eq!(extract("   "), None);
        assert_eq!(extract(""), None);
    }
}
