use crate::{cli_args::WikipediaIngestArgs, ingest::pipeline::ExtractionSettings};
use colored::Colorize;
use std::{fmt::Display, path::PathBuf};
use url::Url;

#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) wiki_xml: PathBuf,
    pub(crate) output_directory: PathBuf,
    pub(crate) ingest_limit: usize,
    pub(crate) wiki_base_url: Url,
    pub(crate) fail_fast: bool,
    pub(crate) extraction: ExtractionSettings,
}

impl From<WikipediaIngestArgs> for Config {
    fn from(value: WikipediaIngestArgs) -> Self {
        Config {
            wiki_xml: value.wiki_xml,
            output_directory: value.output_directory,
            ingest_limit: value.ingest_limit,
            wiki_base_url: value.wiki_base_url,
            fail_fast: value.fail_fast,
            extraction: value.extraction.into(),
        }
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Config {
            wiki_xml,
            output_directory,
            ingest_limit,
            wiki_base_url,
            fail_fast,
            extraction,
        } = self;

        let wiki_xml = wiki_xml.display().to_string().blue();
        let output_directory = output_directory.display().to_string().blue();
        let wiki_base_url = wiki_base_url.as_str().bright_blue();
        let ingest_limit = match ingest_limit {
            0 => "all".to_string(),
            limit => limit.to_string(),
        }
        .yellow();
        let on_failure = (if *fail_fast { "abort" } else { "skip" }).yellow();
        let max_mentions = match extraction.max_mentions {
            0 => "all".to_string(),
            limit => limit.to_string(),
        }
        .yellow();
        let context_policy = extraction.context_policy.to_string().yellow();

        write!(
            f,
            "Ingest running.\n\tUsing wikipedia xml dump at {wiki_xml}.\n\tWriting output at {output_directory}.\n\tLinking articles under {wiki_base_url}.\n\tTransducing {ingest_limit} articles, {on_failure} on failure.\n\tKeeping {max_mentions} {context_policy} mentions per article.",
        )
    }
}
