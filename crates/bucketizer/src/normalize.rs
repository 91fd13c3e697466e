//! Key normalization
//!
//! Canonical form of a partitioning value: lowercase, canonically
//! decomposed with combining diacritical marks (U+0300..=U+036F) removed,
//! and every run of whitespace replaced by a single `+`.

use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block
fn is_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Canonical partition key for `value`
pub fn normalize(value: &str) -> String {
    let folded: String = value
        .to_lowercase()
        .nfd()
        .filter(|c| !is_diacritic(*c))
        .collect();

    let mut key = String::with_capacity(folded.len());
    let mut in_whitespace = false;
    for c in folded.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                key.push('+');
            }
            in_whitespace = true;
        } else {
            key.push(c);
            in_whitespace = false;
        }
    }
    key
}
