#[cfg(test)]
mod test_data;

mod cli_args;
mod config;
mod ingest;

use std::fs;

use clap::Parser;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;

use crate::{
    cli_args::{Cli, Commands},
    ingest::pipeline::{article_url, PipelineProcessor, WikiMarkupProcessor, WikipediaDumpReader},
};
use config::{ingest::Config as IngestConfig, markup::Config as MarkupConfig};

fn main() -> anyhow::Result<()> {
    let logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).build();
    let multi_progress = MultiProgress::new();
    LogWrapper::new(multi_progress.clone(), logger).try_init()?;

    match Cli::parse().command {
        Commands::Wikipedia(ingest_args) => {
            // ./wikimention \
            //     wikipedia \
            //     --wiki-xml \
            //     bgwiki-20180401-pages-articles-multistream.xml.bz2 \
            //     --output-directory \
            //     /tmp/corpus \
            //     --ingest-limit \
            //     "1000" \
            //     --context-policy \
            //     right-complete
            let config = IngestConfig::from(ingest_args);
            log::info!("\n{config}");

            let pipeline = PipelineProcessor::new(
                WikipediaDumpReader::new(config.wiki_base_url),
                WikiMarkupProcessor::new(config.extraction),
                config.ingest_limit,
                config.fail_fast,
            );
            pipeline
                .process(&multi_progress, &config.wiki_xml, &config.output_directory)
                .map_err(anyhow::Error::from)?;
            Ok(())
        }
        Commands::Markup(markup_args) => {
            let config = MarkupConfig::from(markup_args);
            log::info!("\n{config}");

            let markup = fs::read_to_string(&config.markup_file)?;
            let url = article_url(&config.wiki_base_url, &config.title);
            let document = WikiMarkupProcessor::new(config.extraction)
                .transduce(&config.title, &url, &markup)
                .map_err(anyhow::Error::from)?;

            println!("{document}");
            for mention in &document.mentions {
                println!("{mention}");
            }
            Ok(())
        }
    }
}
