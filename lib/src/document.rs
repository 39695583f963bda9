//! Raw per-book source shapes and the document normalizer.
//!
//! Raw books arrive from the upstream alignment tooling as an ordered
//! chapter list, each chapter carrying `pericopes[].verses[].tokens[]`.
//! Partially populated books are common while a book is being aligned,
//! so missing collections deserialize as empty instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    book::BookCatalog,
    dictionary::LemmaIndex,
    enrich::{Enricher, Projection},
    error::StoreError,
    source,
    token::Token,
    util::coerce_u32,
};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawChapter {
    #[serde(default)]
    pub chapter: Value,

    #[serde(default)]
    pub pericopes: Vec<RawPericope>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawPericope {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub start: Value,

    #[serde(default)]
    pub end: Value,

    #[serde(default)]
    pub verses: Vec<RawVerse>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawVerse {
    #[serde(default)]
    pub verse: Value,

    #[serde(default)]
    pub tokens: Vec<Token>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    pub number: u32,
    pub tokens: Vec<Token>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pericope {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,

    pub verses: Vec<Verse>,
}

/// One normalized chapter. `verses` is derived: always the concatenation
/// of the pericopes' verse lists, in pericope order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChapterDocument {
    pub number: u32,
    pub pericopes: Vec<Pericope>,
    pub verses: Vec<Verse>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BookDocument {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,

    pub chapters: Vec<ChapterDocument>,
}

impl BookDocument {
    pub fn new<S: Into<String>>(id: S, chapters: Vec<ChapterDocument>) -> Self {
        Self {
            id: id.into(),
            name: None,
            heading: None,
            chapters,
        }
    }

    /// Attaches navigational metadata from the catalog, when present.
    pub fn decorate(&mut self, catalog: &BookCatalog) {
        if let Some(descriptor) = catalog.get(&self.id) {
            self.name = Some(descriptor.name.clone());
            self.heading = Some(descriptor.heading.clone());
        }
    }
}

/// Parses a raw per-book source, repairing escaped indentation first.
pub fn parse_book(text: &str) -> Result<Vec<RawChapter>, StoreError> {
    let clean = source::unescape_indentation(text);
    serde_json::from_str(&clean).map_err(|error| StoreError::Serialization(error.to_string()))
}

/// Walks the raw book tree, enriches every token and reshapes the
/// nesting into the canonical chapter documents.
#[derive(Debug)]
pub struct DocumentNormalizer<'i, 's> {
    enricher: Enricher<'i, 's>,
}

impl<'i, 's> DocumentNormalizer<'i, 's> {
    pub fn new(index: &'i LemmaIndex<'s>, projection: Projection) -> Self {
        Self {
            enricher: Enricher::new(index, projection),
        }
    }

    pub fn normalize_book(&self, chapters: &[RawChapter]) -> Vec<ChapterDocument> {
        chapters
            .iter()
            .map(|chapter| self.normalize_chapter(chapter))
            .collect()
    }

    fn normalize_chapter(&self, raw: &RawChapter) -> ChapterDocument {
        let pericopes = raw
            .pericopes
            .iter()
            .map(|pericope| self.normalize_pericope(pericope))
            .collect::<Vec<_>>();

        let verses = pericopes
            .iter()
            .flat_map(|pericope| pericope.verses.iter().cloned())
            .collect();

        ChapterDocument {
            number: coerce_u32(&raw.chapter).unwrap_or_default(),
            pericopes,
            verses,
        }
    }

    fn normalize_pericope(&self, raw: &RawPericope) -> Pericope {
        Pericope {
            title: raw.title.clone(),
            start: coerce_u32(&raw.start),
            end: coerce_u32(&raw.end),
            verses: raw
                .verses
                .iter()
                .map(|verse| self.normalize_verse(verse))
                .collect(),
        }
    }

    fn normalize_verse(&self, raw: &RawVerse) -> Verse {
        Verse {
            number: coerce_u32(&raw.verse).unwrap_or_default(),
            tokens: raw
                .tokens
                .iter()
                .map(|token| self.enricher.enrich(token))
                .collect(),
        }
    }
}
