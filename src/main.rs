mod cli;
mod report;

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;

use interlinear::{
    backfill::{Overrides, Resolver},
    book::BookCatalog,
    dictionary::{DictionaryStore, LemmaIndex},
    document::{parse_book, BookDocument, DocumentNormalizer},
    enrich::SchemaVersion,
    error::{Error, StoreError},
    source,
};

fn main() -> ExitCode {
    env_logger::init();

    let cli = cli::Cli::parse();
    let result = match cli.command {
        cli::Command::Build(args) => build(args),
        cli::Command::Backfill(args) => backfill(args),
    };

    // Structural failures abort with a single top-level report;
    // unresolved lookups alone never reach this path.
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn build(args: cli::Build) -> Result<(), Error> {
    let store = DictionaryStore::load(&args.dictionary)?;
    let index = LemmaIndex::build(&store);
    let projection = SchemaVersion::detect(&store).projection();
    let normalizer = DocumentNormalizer::new(&index, projection);

    let catalog = match &args.meta {
        Some(path) => BookCatalog::load(path)?,
        None => BookCatalog::default(),
    };

    fs::create_dir_all(&args.output).map_err(StoreError::from)?;

    let mut built = 0usize;
    for path in book_sources(&args.books)? {
        let text = fs::read_to_string(&path).map_err(StoreError::from)?;
        let raw = parse_book(&text)?;

        let mut document = BookDocument::new(book_id_from_path(&path), normalizer.normalize_book(&raw));
        document.decorate(&catalog);

        let target = args.output.join(format!("{}.json", document.id));
        let json = serde_json::to_string_pretty(&document)
            .map_err(|error| StoreError::Serialization(error.to_string()))?;
        fs::write(&target, json).map_err(StoreError::from)?;

        log::info!("built {}", target.display());
        built += 1;
    }

    println!("books built: {built}");
    Ok(())
}

fn backfill(args: cli::Backfill) -> Result<(), Error> {
    let mut store = DictionaryStore::load(&args.dictionary)?;

    if let Some(source_path) = &args.source {
        let artifact = fs::read_to_string(source_path).map_err(StoreError::from)?;
        let table = source::extract_table(&artifact, &args.anchor)?;
        Resolver::merge_raw_table(&mut store, &table);
    }

    let overrides = match &args.overrides {
        Some(path) => Overrides::load(path)?,
        None => Overrides::default(),
    };

    let resolver = Resolver::new(overrides);
    let mut backfill_report = resolver.resolve(&mut store);

    if let Some(books) = &args.books {
        for path in book_sources(books)? {
            let text = fs::read_to_string(&path).map_err(StoreError::from)?;
            let raw = parse_book(&text)?;

            let tokens = raw
                .iter()
                .flat_map(|chapter| chapter.pericopes.iter())
                .flat_map(|pericope| pericope.verses.iter())
                .flat_map(|verse| verse.tokens.iter());
            resolver.audit_references(tokens, &store, &mut backfill_report);
        }
    }

    // One write, after the whole in-memory pass.
    if !args.dry_run {
        store.save(&args.dictionary)?;
    }

    report::print_report(&backfill_report, args.limit);
    Ok(())
}

/// Raw book sources in a directory, in stable name order.
fn book_sources(dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let mut paths = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

/// Book identifier from a source filename: stem, uppercased, matching
/// the catalog's permalink-derived keys.
fn book_id_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_uppercase()
}
