use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use url::Url;

use crate::ingest::pipeline::{ContextPolicy, ExtractionSettings};

pub(crate) const DEFAULT_WIKI_BASE_URL: &str = "https://bg.wikipedia.org/wiki/";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Transduce every article of a dump into a corpus directory.
    Wikipedia(WikipediaIngestArgs),
    /// Transduce a single file of markup and print the result.
    Markup(MarkupArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ExtractionArgs {
    /// Mentions kept per article, 0 keeps all of them.
    #[arg(long, default_value_t = 0)]
    pub(crate) max_mentions: usize,
    #[arg(long, value_enum, default_value_t = ContextPolicy::default())]
    pub(crate) context_policy: ContextPolicy,
}

impl From<ExtractionArgs> for ExtractionSettings {
    fn from(value: ExtractionArgs) -> Self {
        ExtractionSettings {
            max_mentions: value.max_mentions,
            context_policy: value.context_policy,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct WikipediaIngestArgs {
    #[arg(long)]
    pub(crate) wiki_xml: PathBuf,
    #[arg(long)]
    pub(crate) output_directory: PathBuf,
    #[arg(long, default_value_t = 0)]
    pub(crate) ingest_limit: usize,
    #[arg(long, default_value = DEFAULT_WIKI_BASE_URL)]
    pub(crate) wiki_base_url: Url,
    /// Abort on the first article that cannot be transduced.
    #[arg(long)]
    pub(crate) fail_fast: bool,
    #[command(flatten)]
    pub(crate) extraction: ExtractionArgs,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct MarkupArgs {
    #[arg(long)]
    pub(crate) markup_file: PathBuf,
    #[arg(long)]
    pub(crate) title: String,
    #[arg(long, default_value = DEFAULT_WIKI_BASE_URL)]
    pub(crate) wiki_base_url: Url,
    #[command(flatten)]
    pub(crate) extraction: ExtractionArgs,
}
