extern crate clap;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "interlinear", about = "Greek-Portuguese interlinear dataset tooling")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build enriched book documents from the raw per-book corpus.
    Build(Build),

    /// Backfill `traducao`/`verbete` on the dictionary store.
    Backfill(Backfill),
}

#[derive(Debug, Parser)]
pub struct Build {
    /// Dictionary store (JSON).
    #[arg(long, short = 'd')]
    pub dictionary: PathBuf,

    /// Directory of raw per-book JSON sources.
    #[arg(long, short = 'b')]
    pub books: PathBuf,

    /// Book metadata source for navigational decoration.
    #[arg(long, short = 'm')]
    pub meta: Option<PathBuf>,

    /// Output directory for enriched book documents.
    #[arg(long, short = 'o')]
    pub output: PathBuf,
}

#[derive(Debug, Parser)]
pub struct Backfill {
    /// Dictionary store (JSON), rewritten in place.
    #[arg(long, short = 'd')]
    pub dictionary: PathBuf,

    /// Raw lexical source artifact with the embedded table.
    #[arg(long, short = 's')]
    pub source: Option<PathBuf>,

    /// Anchor marker of the embedded table declaration.
    #[arg(long, short = 'a', default_value = "var strongsGreekDict")]
    pub anchor: String,

    /// Manual translation overrides (JSON, identifier -> string).
    #[arg(long)]
    pub overrides: Option<PathBuf>,

    /// Audit dictionary links across this raw book corpus.
    #[arg(long, short = 'b')]
    pub books: Option<PathBuf>,

    /// Unresolved entries printed before truncating.
    #[arg(long, default_value_t = 20)]
    pub limit: usize,

    /// Resolve and report without rewriting the store.
    #[arg(long)]
    pub dry_run: bool,
}
