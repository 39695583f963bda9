use interlinear::{
    backfill::Resolver,
    dictionary::{DictionaryStore, LemmaIndex},
    document::{parse_book, DocumentNormalizer},
    enrich::SchemaVersion,
    source::extract_table,
};

const ARTIFACT: &str = r#"
"use strict";
var strongsGreekDict = {
    "G26": {"kjv_def": "", "strongs_def": "love, affection"}
};
module.exports = strongsGreekDict;
"#;

const RAW_BOOK: &str = r#"
[
    {
        "chapter": 1,
        "pericopes": [
            {
                "title": "Permanecei no amor",
                "start": "9",
                "verses": [
                    {
                        "verse": 9,
                        "tokens": [
                            {"grego": "αγαπη", "strongs": "G26"},
                            {"grego": "σαρξ", "strongs": "G4561"}
                        ]
                    }
                ]
            }
        ]
    }
]
"#;

#[test]
fn test_backfill_then_build_integration() {
    // Maintenance pass: raw lexical source -> store backfill.
    let mut store = DictionaryStore::parse(r#"{"G26": {"grego": "ἀγάπη"}}"#).unwrap();
    let table = extract_table(ARTIFACT, "var strongsGreekDict").unwrap();

    let resolver = Resolver::default();
    Resolver::merge_raw_table(&mut store, &table);
    let report = resolver.resolve(&mut store);

    let entry = store.get("G26").unwrap();
    assert_eq!(entry.translation.as_deref(), Some("love, affection"));
    assert_eq!(entry.verbete.as_deref(), Some("G26: love, affection"));
    assert!(report.missing.is_empty());

    // Document build against the backfilled store.
    let index = LemmaIndex::build(&store);
    let projection = SchemaVersion::detect(&store).projection();
    let normalizer = DocumentNormalizer::new(&index, projection);

    let raw = parse_book(RAW_BOOK).unwrap();
    let chapters = normalizer.normalize_book(&raw);

    let verse = &chapters[0].verses[0];
    assert_eq!(verse.number, 9);
    assert_eq!(verse.tokens.len(), 2);
    assert_eq!(
        verse.tokens[0].translation.as_deref(),
        Some("love, affection")
    );
    // No dictionary entry for G4561: the token passes through unchanged.
    assert_eq!(verse.tokens[1].translation, None);

    assert_eq!(chapters[0].pericopes[0].start, Some(9));
    assert_eq!(chapters[0].pericopes[0].end, None);
}

#[test]
fn test_document_build_without_backfill() {
    // The build must tolerate a store the maintenance pass never touched.
    let store = DictionaryStore::parse(r#"{"G26": {"grego": "ἀγάπη"}}"#).unwrap();
    let index = LemmaIndex::build(&store);
    let normalizer = DocumentNormalizer::new(&index, SchemaVersion::detect(&store).projection());

    let raw = parse_book(RAW_BOOK).unwrap();
    let chapters = normalizer.normalize_book(&raw);

    let token = &chapters[0].verses[0].tokens[0];
    assert_eq!(token.text, "αγαπη");
    assert_eq!(token.translation, None);
}
