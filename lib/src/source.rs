//! Extraction of the raw lexical table embedded in a non-data artifact.
//!
//! The Strong's source ships as a script file containing one assignment
//! whose right-hand side is a large object literal. A narrow delimiter
//! scan (anchor, first `{`, first `};`) pulls the literal out without a
//! parser for the host language.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::error::SourceError;

/// Locates the table anchored by `anchor` in `source` and parses it.
///
/// The substring from the first `{` after the anchor through the brace
/// preceding the first `};` is parsed as JSON. Every miss is a structural
/// error; nothing is extracted on a best-effort basis.
pub fn extract_table(source: &str, anchor: &str) -> Result<Value, SourceError> {
    let anchor_at = source
        .find(anchor)
        .ok_or_else(|| SourceError::AnchorNotFound(anchor.to_string()))?;

    let tail = &source[anchor_at..];
    let open = tail
        .find('{')
        .ok_or_else(|| SourceError::TableStartNotFound(anchor.to_string()))?;

    let close = tail[open..]
        .find("};")
        .ok_or(SourceError::TableEndNotFound)?;

    // Through the closing brace, dropping the statement terminator.
    let literal = &tail[open..open + close + 1];
    Ok(serde_json::from_str(literal)?)
}

fn escaped_indent() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^(?:\\t)+").unwrap())
}

/// Collapses literal `\t` escape runs at line starts into real tabs.
///
/// Prior tooling serialized indentation as two-character `\t` sequences;
/// each pair becomes one tab so the JSON parser accepts the file. Clean
/// input passes through unchanged, so applying this twice is harmless.
pub fn unescape_indentation(text: &str) -> String {
    escaped_indent()
        .replace_all(text, |caps: &Captures| {
            "\t".repeat(caps[0].len() / 2)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use crate::{
        error::SourceError,
        source::{extract_table, unescape_indentation},
    };

    const ARTIFACT: &str = r#"
// Generated file, do not edit.
"use strict";
var strongsGreekDict = {"G26": {"grego": "ἀγάπη", "strongs_def": "love, affection"}};
module.exports = strongsGreekDict;
"#;

    #[test]
    fn test_extract_embedded_table() {
        let table = extract_table(ARTIFACT, "var strongsGreekDict").unwrap();
        assert_eq!(table["G26"]["grego"], "ἀγάπη");
    }

    #[test]
    fn test_extract_missing_anchor() {
        let result = extract_table(ARTIFACT, "var strongsHebrewDict");
        assert!(matches!(result, Err(SourceError::AnchorNotFound(_))));
    }

    #[test]
    fn test_extract_missing_opening_brace() {
        let result = extract_table("var strongsGreekDict = null;", "var strongsGreekDict");
        assert!(matches!(result, Err(SourceError::TableStartNotFound(_))));
    }

    #[test]
    fn test_extract_missing_terminator() {
        let result = extract_table("var strongsGreekDict = {\"G26\": 1}", "var strongsGreekDict");
        assert!(matches!(result, Err(SourceError::TableEndNotFound)));
    }

    #[test]
    fn test_extract_invalid_table() {
        let result = extract_table(
            "var strongsGreekDict = {G26: unquoted};",
            "var strongsGreekDict",
        );
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_unescape_indentation() {
        let dirty = "{\n\\t\"G26\": {\n\\t\\t\"grego\": \"ἀγάπη\"\n\\t}\n}";
        let clean = unescape_indentation(dirty);
        assert_eq!(clean, "{\n\t\"G26\": {\n\t\t\"grego\": \"ἀγάπη\"\n\t}\n}");
        assert!(serde_json::from_str::<serde_json::Value>(&clean).is_ok());
    }

    #[test]
    fn test_unescape_indentation_is_idempotent() {
        let dirty = "\\t\\t\"a\": 1,\n\\t\"b\": 2";
        let once = unescape_indentation(dirty);
        assert_eq!(unescape_indentation(&once), once);
    }

    #[test]
    fn test_unescape_keeps_inner_escapes() {
        // Only leading runs are indentation artifacts.
        let text = "\"note\": \"a\\tb\"";
        assert_eq!(unescape_indentation(text), text);
    }
}
