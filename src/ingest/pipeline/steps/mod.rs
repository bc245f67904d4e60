mod corpus_writer;
mod wikipedia_dump_reader;

pub(crate) use corpus_writer::CorpusWriter;
pub(crate) use wikipedia_dump_reader::{
    article_url, ArticlePage, PageOutcome, SkipReason, WikipediaDumpReader,
};
