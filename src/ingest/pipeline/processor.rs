use std::{fmt::Display, path::Path};

use indicatif::MultiProgress;

use super::{
    error::{MarkupError, PipelineError},
    progress::new_progress_bar,
    steps::{ArticlePage, CorpusWriter, PageOutcome, SkipReason, WikipediaDumpReader},
    wikipedia::WikiMarkupProcessor,
};

/// Totals for one run over a dump.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub(crate) processed: usize,
    pub(crate) failed: usize,
    pub(crate) no_text: usize,
    pub(crate) namespace: usize,
    pub(crate) not_wikitext: usize,
    pub(crate) redirect: usize,
}

impl RunSummary {
    fn skipped(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::NoText => self.no_text += 1,
            SkipReason::Namespace => self.namespace += 1,
            SkipReason::NotWikitext => self.not_wikitext += 1,
            SkipReason::Redirect => self.redirect += 1,
        }
    }

    pub(crate) fn total_skipped(&self) -> usize {
        self.no_text + self.namespace + self.not_wikitext + self.redirect
    }
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Processed {} articles, {} failed. Skipped {} pages: {} without text, {} outside the main namespace, {} not wikitext, {} redirects.",
            self.processed,
            self.failed,
            self.total_skipped(),
            self.no_text,
            self.namespace,
            self.not_wikitext,
            self.redirect
        )
    }
}

pub(crate) struct PipelineProcessor {
    reader: WikipediaDumpReader,
    markup: WikiMarkupProcessor,
    ingest_limit: usize,
    fail_fast: bool,
}

impl PipelineProcessor {
    pub(crate) fn new(
        reader: WikipediaDumpReader,
        markup: WikiMarkupProcessor,
        ingest_limit: usize,
        fail_fast: bool,
    ) -> Self {
        Self {
            reader,
            markup,
            ingest_limit,
            fail_fast,
        }
    }

    /// Transduce the articles of `wiki_xml` into `output_directory`.
    /// `ingest_limit` counts articles only; 0 reads the whole dump.
    pub(crate) fn process(
        &self,
        multi_progress: &MultiProgress,
        wiki_xml: &Path,
        output_directory: &Path,
    ) -> Result<RunSummary, PipelineError> {
        let limit = if self.ingest_limit == 0 {
            usize::MAX
        } else {
            self.ingest_limit
        };
        let progress = new_progress_bar(multi_progress, self.ingest_limit as u64);
        progress.set_message("Transducing articles");

        let mut writer = CorpusWriter::new(output_directory)?;
        let mut summary = RunSummary::default();

        let mut articles = 0;
        for page in self.reader.pages(wiki_xml)? {
            let ArticlePage { title, url, markup } = match page {
                PageOutcome::Article(article) => article,
                PageOutcome::Skipped { title, reason } => {
                    log::debug!("Skipping {title}: {reason}");
                    summary.skipped(reason);
                    continue;
                }
            };

            match self.markup.transduce(&title, &url, &markup) {
                Ok(document) => {
                    writer.write(&document)?;
                    summary.processed += 1;
                }
                Err(error) if self.fail_fast => {
                    return Err(MarkupError { title, error }.into());
                }
                Err(error) => {
                    log::error!("{}", MarkupError { title, error });
                    summary.failed += 1;
                }
            }
            progress.inc(1);

            articles += 1;
            if articles == limit {
                break;
            }
        }

        writer.finish()?;
        progress.finish_with_message("Transducing articles...DONE");
        log::info!("{summary}");
        Ok(summary)
    }
}
