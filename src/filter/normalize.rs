// Text normalization for banned-string matching.
//
// Farsi text on Twitter is typed with a mix of Persian and Arabic
// keyboard layouts, so the same word can arrive with either the
// Persian yeh (ی) or the Arabic yeh (ي), and either kaf form. Banned
// patterns are written once in the Persian forms; normalization folds
// the Arabic variants (and strips the short-vowel diacritics that
// would break substring matches) before matching.

/// Case-fold and canonicalize a tweet's text for pattern matching.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| match c {
            // Arabic yeh variants → Persian yeh
            '\u{064A}' | '\u{0649}' => Some('\u{06CC}'),
            // Arabic kaf → Persian kaf
            '\u{0643}' => Some('\u{06A9}'),
            // Teh marbuta → heh
            '\u{0629}' => Some('\u{0647}'),
            // Arabic short-vowel diacritics (fathatan..sukun)
            '\u{064B}'..='\u{0652}' => None,
            // Zero-width joiner/non-joiner
            '\u{200C}' | '\u{200D}' => None,
            _ => Some(c),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_latin_text() {
        assert_eq!(normalize("Hello WORLD"), "hello world");
    }

    #[test]
    fn test_folds_arabic_yeh_to_persian() {
        // "ايران" typed with Arabic yeh becomes "ایران"
        assert_eq!(normalize("ايران"), "ایران");
    }

    #[test]
    fn test_folds_arabic_kaf_to_persian() {
        assert_eq!(normalize("كتاب"), "کتاب");
    }

    #[test]
    fn test_strips_diacritics_and_joiners() {
        // fatha and kasra vanish, base letters stay
        assert_eq!(normalize("مَرحَبا"), "مرحبا");
        assert_eq!(normalize("می\u{200C}روم"), "میروم");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("ايران كتاب Hello");
        assert_eq!(normalize(&once), once);
    }
}
