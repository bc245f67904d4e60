mod document;
mod error;
mod processor;
mod progress;
mod steps;
mod wikipedia;

pub(crate) use processor::PipelineProcessor;
pub(crate) use steps::{article_url, WikipediaDumpReader};
pub(crate) use wikipedia::{ContextPolicy, ExtractionSettings, WikiMarkupProcessor};
