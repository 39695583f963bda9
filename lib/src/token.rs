use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One word-occurrence inside a verse.
///
/// `text` is the Greek surface form and the join key against the
/// dictionary. The optional fields mirror the entry fields a projection
/// may copy over; unknown upstream fields round-trip through `extra`.
/// Tokens are created by the per-book source and only ever rewritten by
/// the enricher.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "grego", default)]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strongs: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::util::de_coerce_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<u32>,

    #[serde(
        rename = "transliteracao",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transliteration: Option<String>,

    #[serde(rename = "traducao", default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,

    #[serde(rename = "verbete", default, skip_serializing_if = "Option::is_none")]
    pub verbete: Option<String>,

    #[serde(rename = "classegram", default, skip_serializing_if = "Option::is_none")]
    pub grammar_class: Option<String>,

    #[serde(rename = "desgram", default, skip_serializing_if = "Option::is_none")]
    pub grammar_tag: Option<String>,

    #[serde(
        rename = "ocorrencia",
        default,
        deserialize_with = "crate::util::de_coerce_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub occurrences: Option<u32>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Token {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token::new(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::token::Token;

    #[test]
    fn test_token_deserializes_store_schema() {
        let token: Token = serde_json::from_value(json!({
            "grego": "λόγος",
            "strongs": "G3056",
            "ocorrencia": "330",
        }))
        .unwrap();

        assert_eq!(token.text, "λόγος");
        assert_eq!(token.strongs.as_deref(), Some("G3056"));
        assert_eq!(token.occurrences, Some(330));
    }

    #[test]
    fn test_token_round_trips_unknown_fields() {
        let token: Token = serde_json::from_value(json!({
            "grego": "λόγος",
            "nota": "ver Jo 1.1",
        }))
        .unwrap();

        let value = serde_json::to_value(&token).unwrap();
        assert_eq!(value["nota"], "ver Jo 1.1");
        assert_eq!(value["grego"], "λόγος");
    }
}
