mod error;
mod parse;
mod processor;
mod service;

pub(crate) use error::WikiMarkupProcessingError;
pub(crate) use parse::MentionRecord;
pub(crate) use processor::{ContextPolicy, ExtractionSettings, WikiMarkupProcessor};
pub(crate) use service::Process;
