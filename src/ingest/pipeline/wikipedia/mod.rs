mod configurations;
mod markup_processor;

pub(crate) use markup_processor::{
    ContextPolicy, ExtractionSettings, MentionRecord, WikiMarkupProcessingError,
    WikiMarkupProcessor,
};
