use std::fmt::Display;

use clap::ValueEnum;
use parse_wiki_text::Configuration;

use super::{
    super::configurations::WIKIPEDIA_CONFIGURATION,
    parse::{
        assemble, build_tree, normalize_entities_and_comments, preprocess, resolve_templates,
        rewrite_tags, summarize, Assembly, MentionRecord, Regexes,
    },
    Process, WikiMarkupProcessingError,
};
use crate::ingest::pipeline::document::{Document, EntityRecord};

/// Which mentions are kept, judged by how much context they carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ContextPolicy {
    Any,
    #[default]
    RightComplete,
    BothComplete,
}

impl ContextPolicy {
    pub(crate) fn keeps(&self, mention: &MentionRecord) -> bool {
        match self {
            ContextPolicy::Any => true,
            ContextPolicy::RightComplete => mention.right_complete(),
            ContextPolicy::BothComplete => mention.left_complete() && mention.right_complete(),
        }
    }
}

impl Display for ContextPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextPolicy::Any => write!(f, "any"),
            ContextPolicy::RightComplete => write!(f, "right-complete"),
            ContextPolicy::BothComplete => write!(f, "both-complete"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ExtractionSettings {
    /// 0 keeps every mention.
    pub(crate) max_mentions: usize,
    pub(crate) context_policy: ContextPolicy,
}

impl ExtractionSettings {
    fn select(&self, mentions: Vec<MentionRecord>) -> Vec<MentionRecord> {
        let limit = if self.max_mentions == 0 {
            usize::MAX
        } else {
            self.max_mentions
        };
        mentions
            .into_iter()
            .filter(|mention| self.context_policy.keeps(mention))
            .take(limit)
            .collect()
    }
}

pub(crate) struct WikiMarkupProcessor {
    configuration: Configuration,
    regexes: Regexes,
    settings: ExtractionSettings,
}

impl WikiMarkupProcessor {
    pub(crate) fn new(settings: ExtractionSettings) -> Self {
        Self {
            configuration: Configuration::new(WIKIPEDIA_CONFIGURATION),
            regexes: Regexes::new(),
            settings,
        }
    }

    /// Run one article through the whole transducer.
    pub(crate) fn transduce(
        &self,
        title: &str,
        url: &str,
        markup: &str,
    ) -> Result<Document, WikiMarkupProcessingError> {
        let Assembly { text, mentions } = self.process(markup)?;
        let mentions = self.settings.select(mentions);
        let entity = EntityRecord {
            title: title.to_string(),
            url: url.to_string(),
            summary: summarize(&text),
        };
        Ok(Document {
            title: title.to_string(),
            url: url.to_string(),
            text,
            mentions,
            entity,
        })
    }
}

impl Process for WikiMarkupProcessor {
    type E = WikiMarkupProcessingError;
    fn process(&self, markup: &str) -> Result<Assembly, Self::E> {
        let markup = preprocess(markup, &self.regexes);
        let parse = self.configuration.parse(&markup).nodes;
        let mut tree = build_tree(&markup, &parse, &self.regexes);

        rewrite_tags(&mut tree);
        resolve_templates(&mut tree)?;
        normalize_entities_and_comments(&mut tree);

        assemble(&tree, &self.regexes)
    }
}
