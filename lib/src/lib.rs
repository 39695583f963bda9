pub mod backfill;
pub mod book;
pub mod dictionary;
pub mod document;
pub mod enrich;
pub mod error;
pub mod lemma;
pub mod source;
pub mod token;
pub mod util;
