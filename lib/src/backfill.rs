//! Offline translation backfill over the persisted dictionary store.
//!
//! One read-modify-write cycle: resolve a `traducao` for every entry
//! from the override table or the fallback chain, derive `verbete` from
//! the long definition, write only what changed and report what could
//! not be resolved. Unresolved data is diagnostic, never fatal.

use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
    fs,
    path::Path,
    sync::OnceLock,
};

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    dictionary::{DictionaryEntry, DictionaryStore},
    error::StoreError,
    token::Token,
    util::Counter,
};

/// Manual translation overrides, keyed by lexical identifier. Exact
/// curated strings; an override always beats any computed candidate.
/// Immutable configuration injected into the resolver.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Overrides {
    inner: HashMap<String, String>,
}

impl Overrides {
    pub fn new(inner: HashMap<String, String>) -> Self {
        Self { inner }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|error| StoreError::Serialization(error.to_string()))
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.inner.get(id).map(String::as_str)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    MissingStrongs,
    StrongsNotFound,
    TranslationNotFound,
}

impl Display for Reason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Reason::MissingStrongs => "missing_strongs",
            Reason::StrongsNotFound => "strongs_not_found",
            Reason::TranslationNotFound => "translation_not_found",
        };
        f.write_str(code)
    }
}

/// One record the pass could not resolve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Unresolved {
    #[serde(rename = "entryKey")]
    pub key: String,
    pub reason: Reason,
}

#[derive(Debug, Default)]
pub struct BackfillReport {
    updated: Counter<usize>,
    pub missing: Vec<Unresolved>,
}

impl BackfillReport {
    /// Number of fields written during the pass.
    #[inline]
    pub fn updated(&self) -> usize {
        self.updated.get()
    }

    fn count_update(&mut self) {
        self.updated.increment();
    }

    fn record<S: Into<String>>(&mut self, key: S, reason: Reason) {
        self.missing.push(Unresolved {
            key: key.into(),
            reason,
        });
    }
}

fn dash_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*-{2,}\s*").unwrap())
}

fn punctuation_spacing() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*([,:;])\s*").unwrap())
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Normalizes candidate gloss text: repeated-dash runs become a single
/// space, `,` `:` `;` get exactly one trailing space, whitespace runs
/// collapse, ends are trimmed. Idempotent.
pub fn tidy(text: &str) -> String {
    let text = dash_runs().replace_all(text, " ");
    let text = punctuation_spacing().replace_all(&text, "$1 ");
    let text = whitespace_runs().replace_all(&text, " ");
    text.trim().to_string()
}

/// Computes `traducao` and `verbete` for every object entry in a store.
#[derive(Debug, Default)]
pub struct Resolver {
    overrides: Overrides,
}

impl Resolver {
    pub fn new(overrides: Overrides) -> Self {
        Self { overrides }
    }

    /// Attaches `kjv_def`/`strongs_def` from the raw lexical table to
    /// matching store entries, as fallback sources only. Identifiers
    /// unknown to the store are ignored: the store is curated upstream.
    pub fn merge_raw_table(store: &mut DictionaryStore, table: &Value) {
        let Some(records) = table.as_object() else {
            return;
        };

        for (id, raw) in records {
            let Some(entry) = store.get_mut(id) else {
                continue;
            };

            if let Some(kjv) = raw.get("kjv_def").and_then(Value::as_str) {
                entry.kjv_def = Some(kjv.to_string());
            }
            if let Some(def) = raw.get("strongs_def").and_then(Value::as_str) {
                entry.strongs_def = Some(def.to_string());
            }
        }
    }

    /// Runs the full in-memory pass. Idempotent: a second run over the
    /// same store writes nothing and reports the same missing entries.
    pub fn resolve(&self, store: &mut DictionaryStore) -> BackfillReport {
        let mut report = BackfillReport::default();

        for (id, entry) in store.entries_mut() {
            let translation = self
                .overrides
                .get(id)
                .map(str::to_string)
                .or_else(|| fallback_translation(entry));

            match translation {
                Some(translation) => {
                    if entry.translation.as_deref() != Some(&translation) {
                        log::debug!("{id}: traducao <- {translation}");
                        entry.translation = Some(translation);
                        report.count_update();
                    }
                }
                None => report.record(id, Reason::TranslationNotFound),
            }

            // The long gloss comes from the long definition alone; the
            // override table has no say here.
            if let Some(verbete) = long_gloss(id, entry) {
                if entry.verbete.as_deref() != Some(&verbete) {
                    entry.verbete = Some(verbete);
                    report.count_update();
                }
            }
        }

        report
    }

    /// Consuming-side audit: checks every token's dictionary link.
    /// A token without a reference or with a dangling one is recorded;
    /// nothing is ever enriched or written here.
    pub fn audit_references<'t, I>(
        &self,
        tokens: I,
        store: &DictionaryStore,
        report: &mut BackfillReport,
    ) where
        I: IntoIterator<Item = &'t Token>,
    {
        for token in tokens {
            match token
                .strongs
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
            {
                None => report.record(token.text.clone(), Reason::MissingStrongs),
                Some(id) => {
                    if !store.contains(id) {
                        report.record(id, Reason::StrongsNotFound);
                    }
                }
            }
        }
    }
}

/// First non-empty candidate from the ordered fallback chain: short
/// English gloss, long definition, lemma, transliteration.
fn fallback_translation(entry: &DictionaryEntry) -> Option<String> {
    [
        entry.kjv_def.as_deref(),
        entry.strongs_def.as_deref(),
        entry.lemma.as_deref(),
        entry.transliteration.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(tidy)
    .find(|candidate| !candidate.is_empty())
}

fn long_gloss(id: &str, entry: &DictionaryEntry) -> Option<String> {
    let definition = tidy(entry.strongs_def.as_deref()?);
    if definition.is_empty() {
        return None;
    }

    Some(format!("{id}: {definition}"))
}
