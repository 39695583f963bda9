//! Token enrichment against the lemma index.
//!
//! The fields copied from a matched entry are a fixed allow-list, one
//! per dictionary schema era. Both eras of the store have shipped with
//! slightly different field sets; the projection is selected once from
//! the store's detected schema, never per call site.

use crate::{
    dictionary::{DictionaryEntry, DictionaryStore, LemmaIndex},
    token::Token,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryField {
    Translation,
    Transliteration,
    Verbete,
    GrammarClass,
    GrammarTag,
    Occurrences,
}

/// Fixed allow-list of entry fields to copy onto a matched token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Projection {
    fields: &'static [EntryField],
}

/// The first dictionary era: translation, transliteration and the long
/// reference gloss.
pub const LEGACY_PROJECTION: Projection = Projection::new(&[
    EntryField::Translation,
    EntryField::Transliteration,
    EntryField::Verbete,
]);

/// The current era adds the grammar columns and the occurrence count.
pub const CURRENT_PROJECTION: Projection = Projection::new(&[
    EntryField::Translation,
    EntryField::Transliteration,
    EntryField::Verbete,
    EntryField::GrammarClass,
    EntryField::GrammarTag,
    EntryField::Occurrences,
]);

impl Projection {
    pub const fn new(fields: &'static [EntryField]) -> Self {
        Self { fields }
    }

    #[inline]
    pub fn fields(&self) -> &'static [EntryField] {
        self.fields
    }

    /// Copies each allow-listed field from `entry` onto `token`,
    /// overwriting whatever the token carried under the same name —
    /// including clearing it when the entry lacks the field, matching
    /// the spread-assign semantics of the original dataset builds.
    pub fn apply(&self, token: &mut Token, entry: &DictionaryEntry) {
        for field in self.fields {
            match field {
                EntryField::Translation => token.translation = entry.translation.clone(),
                EntryField::Transliteration => {
                    token.transliteration = entry.transliteration.clone()
                }
                EntryField::Verbete => token.verbete = entry.verbete.clone(),
                EntryField::GrammarClass => token.grammar_class = entry.grammar_class.clone(),
                EntryField::GrammarTag => token.grammar_tag = entry.grammar_tag.clone(),
                EntryField::Occurrences => token.occurrences = entry.occurrences,
            }
        }
    }
}

/// Dictionary schema era, detected from the fields the store carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchemaVersion {
    Legacy,
    #[default]
    Current,
}

impl SchemaVersion {
    pub fn detect(store: &DictionaryStore) -> Self {
        let has_grammar = store
            .entries()
            .any(|(_, entry)| entry.grammar_class.is_some() || entry.grammar_tag.is_some());

        if has_grammar {
            SchemaVersion::Current
        } else {
            SchemaVersion::Legacy
        }
    }

    pub fn projection(self) -> Projection {
        match self {
            SchemaVersion::Legacy => LEGACY_PROJECTION,
            SchemaVersion::Current => CURRENT_PROJECTION,
        }
    }
}

/// Joins one token against the index and merges the projected fields.
#[derive(Debug)]
pub struct Enricher<'i, 's> {
    index: &'i LemmaIndex<'s>,
    projection: Projection,
}

impl<'i, 's> Enricher<'i, 's> {
    pub fn new(index: &'i LemmaIndex<'s>, projection: Projection) -> Self {
        Self { index, projection }
    }

    /// Returns an enriched copy of `token`. A miss is expected and
    /// non-fatal: the copy comes back unchanged.
    pub fn enrich(&self, token: &Token) -> Token {
        let mut enriched = token.clone();

        if let Some(entry) = self.index.get(&token.text) {
            self.projection.apply(&mut enriched, entry);
        }

        enriched
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        dictionary::LemmaIndex,
        enrich::{Enricher, SchemaVersion, CURRENT_PROJECTION, LEGACY_PROJECTION},
        store,
        token::Token,
    };

    #[test]
    fn test_enrich_copies_projected_fields() {
        let store = store! {
            "G26" => {
                "grego": "ἀγάπη",
                "transliteracao": "agapē",
                "traducao": "amor",
                "verbete": "G26: amor, afeição",
                "classegram": "substantivo",
                "desgram": "Substantivo - Nominativo Feminino Singular",
                "ocorrencia": 116,
            },
        };
        let index = LemmaIndex::build(&store);
        let enricher = Enricher::new(&index, CURRENT_PROJECTION);

        let token = Token::new("αγαπη");
        let enriched = enricher.enrich(&token);

        assert_eq!(enriched.text, "αγαπη");
        assert_eq!(enriched.translation.as_deref(), Some("amor"));
        assert_eq!(enriched.transliteration.as_deref(), Some("agapē"));
        assert_eq!(enriched.verbete.as_deref(), Some("G26: amor, afeição"));
        assert_eq!(enriched.grammar_class.as_deref(), Some("substantivo"));
        assert_eq!(enriched.occurrences, Some(116));
    }

    #[test]
    fn test_enrich_miss_returns_equal_token() {
        let store = store! {
            "G26" => {"grego": "ἀγάπη", "traducao": "amor"},
        };
        let index = LemmaIndex::build(&store);
        let enricher = Enricher::new(&index, CURRENT_PROJECTION);

        let token = Token::new("σάρξ");
        assert_eq!(enricher.enrich(&token), token);
    }

    #[test]
    fn test_enrich_overwrites_same_named_fields() {
        let store = store! {
            "G26" => {"grego": "ἀγάπη", "traducao": "amor"},
        };
        let index = LemmaIndex::build(&store);
        let enricher = Enricher::new(&index, CURRENT_PROJECTION);

        let mut token = Token::new("ἀγάπη");
        token.translation = Some("caridade".into());
        // Entry has no transliteration: the stale value must clear.
        token.transliteration = Some("agape".into());

        let enriched = enricher.enrich(&token);
        assert_eq!(enriched.translation.as_deref(), Some("amor"));
        assert_eq!(enriched.transliteration, None);
    }

    #[test]
    fn test_legacy_projection_leaves_grammar_untouched() {
        let store = store! {
            "G26" => {"grego": "ἀγάπη", "traducao": "amor", "classegram": "substantivo"},
        };
        let index = LemmaIndex::build(&store);
        let enricher = Enricher::new(&index, LEGACY_PROJECTION);

        let enriched = enricher.enrich(&Token::new("ἀγάπη"));
        assert_eq!(enriched.translation.as_deref(), Some("amor"));
        assert_eq!(enriched.grammar_class, None);
    }

    #[test]
    fn test_schema_detection_selects_projection() {
        let legacy = store! {
            "G26" => {"grego": "ἀγάπη", "traducao": "amor"},
        };
        let current = store! {
            "G26" => {"grego": "ἀγάπη", "traducao": "amor", "desgram": "Substantivo"},
        };

        assert_eq!(SchemaVersion::detect(&legacy), SchemaVersion::Legacy);
        assert_eq!(SchemaVersion::detect(&current), SchemaVersion::Current);
        assert_eq!(
            SchemaVersion::detect(&legacy).projection(),
            LEGACY_PROJECTION
        );
    }
}
