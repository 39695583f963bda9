//! Persisted dictionary store and the lemma-keyed lookup index.
//!
//! The store is an insertion-ordered table of lexical identifier
//! (Strong's number, language-letter prefixed) to entry. Order matters:
//! the index collision policy keeps the first entry seen for a key.

extern crate hashbrown;

use std::{fs, path::Path};

use hashbrown::{hash_map, HashMap};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::StoreError, lemma, source};

/// One dictionary entry, in the store's persisted (Portuguese) schema.
///
/// `kjv_def` and `strongs_def` are translation-fallback sources: they
/// persist with the entry like any other field so a rewrite keeps the
/// fallback chain stable, but they are never projected into tokens.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strongs: Option<String>,

    #[serde(rename = "grego", default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,

    #[serde(
        rename = "transliteracao",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transliteration: Option<String>,

    #[serde(rename = "verbete", default, skip_serializing_if = "Option::is_none")]
    pub verbete: Option<String>,

    #[serde(
        rename = "ocorrencia",
        default,
        deserialize_with = "crate::util::de_coerce_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub occurrences: Option<u32>,

    #[serde(rename = "traducao", default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,

    #[serde(rename = "classegram", default, skip_serializing_if = "Option::is_none")]
    pub grammar_class: Option<String>,

    #[serde(rename = "desgram", default, skip_serializing_if = "Option::is_none")]
    pub grammar_tag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kjv_def: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strongs_def: Option<String>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A raw store record. Non-object records occur in hand-edited stores
/// and are carried through untouched; every pass skips them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoreRecord {
    Entry(Box<DictionaryEntry>),
    Other(Value),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DictionaryStore {
    records: IndexMap<String, StoreRecord>,
}

impl DictionaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a store from JSON text, repairing escaped indentation first.
    pub fn parse(text: &str) -> Result<Self, StoreError> {
        let clean = source::unescape_indentation(text);
        serde_json::from_str(&clean).map_err(|error| StoreError::Serialization(error.to_string()))
    }

    pub fn from_value(value: Value) -> Result<Self, StoreError> {
        serde_json::from_value(value).map_err(|error| StoreError::Serialization(error.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Rewrites the whole store in one shot. Callers run this once, after
    /// a full in-memory pass; a crash before this point leaves the file
    /// untouched.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&self.records)
            .map_err(|error| StoreError::Serialization(error.to_string()))?;
        fs::write(path, text)?;
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn insert(&mut self, id: impl Into<String>, entry: DictionaryEntry) {
        self.records
            .insert(id.into(), StoreRecord::Entry(Box::new(entry)));
    }

    pub fn get(&self, id: &str) -> Option<&DictionaryEntry> {
        match self.records.get(id) {
            Some(StoreRecord::Entry(entry)) => Some(entry),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut DictionaryEntry> {
        match self.records.get_mut(id) {
            Some(StoreRecord::Entry(entry)) => Some(entry),
            _ => None,
        }
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Object entries in store order; non-object records are skipped.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &DictionaryEntry)> {
        self.records.iter().filter_map(|(id, record)| match record {
            StoreRecord::Entry(entry) => Some((id.as_str(), entry.as_ref())),
            StoreRecord::Other(_) => None,
        })
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = (&str, &mut DictionaryEntry)> {
        self.records
            .iter_mut()
            .filter_map(|(id, record)| match record {
                StoreRecord::Entry(entry) => Some((id.as_str(), entry.as_mut())),
                StoreRecord::Other(_) => None,
            })
    }
}

/// Normalized-lemma lookup over a store.
#[derive(Debug)]
pub struct LemmaIndex<'s> {
    inner: HashMap<String, &'s DictionaryEntry>,
}

impl<'s> LemmaIndex<'s> {
    /// Builds the index in store order. A key already present wins:
    /// later entries normalizing to the same key are dropped from lemma
    /// lookup (they stay addressable by identifier). Empty keys are
    /// never indexed.
    pub fn build(store: &'s DictionaryStore) -> Self {
        let mut inner = HashMap::with_capacity(store.len());

        for (id, entry) in store.entries() {
            let form = entry.lemma.as_deref().unwrap_or(id);
            let key = lemma::normalize(form);
            if key.is_empty() {
                continue;
            }

            match inner.entry(key) {
                hash_map::Entry::Occupied(occupied) => {
                    log::debug!("lemma key `{}` already taken, dropping {id}", occupied.key());
                }
                hash_map::Entry::Vacant(vacant) => {
                    vacant.insert(entry);
                }
            }
        }

        Self { inner }
    }

    /// Looks up an entry by any surface or lemma form.
    pub fn get(&self, form: &str) -> Option<&'s DictionaryEntry> {
        self.inner.get(&lemma::normalize(form)).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[macro_export]
macro_rules! store {
    { $( $id:literal => $record:tt ),* $(,)? } => {{
        $crate::dictionary::DictionaryStore::from_value(::serde_json::json!({
            $( $id: $record ),*
        }))
        .unwrap()
    }};
}
