use crate::{cli_args::MarkupArgs, ingest::pipeline::ExtractionSettings};
use colored::Colorize;
use std::{fmt::Display, path::PathBuf};
use url::Url;

#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) markup_file: PathBuf,
    pub(crate) title: String,
    pub(crate) wiki_base_url: Url,
    pub(crate) extraction: ExtractionSettings,
}

impl From<MarkupArgs> for Config {
    fn from(value: MarkupArgs) -> Self {
        Config {
            markup_file: value.markup_file,
            title: value.title,
            wiki_base_url: value.wiki_base_url,
            extraction: value.extraction.into(),
        }
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let markup_file = self.markup_file.display().to_string().blue();
        let title = self.title.as_str().bright_blue();
        let context_policy = self.extraction.context_policy.to_string().yellow();

        write!(
            f,
            "Transducing {title} from {markup_file}.\n\tKeeping {context_policy} mentions.",
        )
    }
}
