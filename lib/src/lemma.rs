use std::{collections::HashSet, sync::OnceLock};

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Curated accent-sensitive forms, keyed by their diacritic-stripped
/// lowercase shape. Blind stripping collapses distinct short Greek words
/// (ἤ "or" vs. ἡ "the", εἰ "if" vs. εἶ "you are") into one key, so these
/// keep their diacritics. Configuration data: extend it, never infer it.
fn accent_sensitive() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&str>> = OnceLock::new();
    SET.get_or_init(|| {
        [
            "η", "ει", "ο", "ω", "εν", "ου", "ην", "αυτη", "που", "πως", "αρα", "τις", "τι", "ος",
        ]
        .iter()
        .copied()
        .collect::<HashSet<&str>>()
    })
}

/// Canonicalizes a Greek surface or lemma form into its lookup key.
///
/// Trims, NFD-decomposes, drops combining marks and lowercases. Members
/// of the accent-sensitive set instead keep their diacritics: the result
/// is the lowercased, NFC-recomposed original. The sole join-key
/// computation for both the dictionary and the token side; repeated
/// application is a fixed point.
pub fn normalize(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let stripped = trimmed
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect::<String>();

    if accent_sensitive().contains(stripped.as_str()) {
        trimmed.to_lowercase().nfc().collect()
    } else {
        stripped
    }
}
