use std::{
    error::Error as StdError,
    fmt::{Display, Formatter, Result},
    io,
    path::PathBuf,
};

use super::wikipedia::WikiMarkupProcessingError;

#[derive(Debug)]
pub(crate) enum PipelineError {
    WikipediaDumpReaderError(WikipediaDumpReaderError),
    Markup(MarkupError),
    CorpusWriterError(CorpusWriterError),
}
impl StdError for PipelineError {}
impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            PipelineError::WikipediaDumpReaderError(e) => write!(f, "{e}"),
            PipelineError::Markup(e) => write!(f, "{e}"),
            PipelineError::CorpusWriterError(e) => write!(f, "{e}"),
        }
    }
}

#[derive(Debug)]
pub(crate) enum WikipediaDumpReaderError {
    ErrorReadingDump(PathBuf, io::Error),
    UnsupportedExtension(PathBuf),
}
impl StdError for WikipediaDumpReaderError {}
impl Display for WikipediaDumpReaderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            WikipediaDumpReaderError::ErrorReadingDump(path, e) => {
                write!(
                    f,
                    "WikipediaDumpReaderError::ErrorReadingDump {} {e}",
                    path.display()
                )
            }
            WikipediaDumpReaderError::UnsupportedExtension(path) => {
                write!(
                    f,
                    "WikipediaDumpReaderError::UnsupportedExtension {}",
                    path.display()
                )
            }
        }
    }
}
impl From<WikipediaDumpReaderError> for PipelineError {
    fn from(value: WikipediaDumpReaderError) -> Self {
        Self::WikipediaDumpReaderError(value)
    }
}

/// A document that could not be transduced, with the article it came from.
#[derive(Debug)]
pub(crate) struct MarkupError {
    pub(crate) title: String,
    pub(crate) error: WikiMarkupProcessingError,
}
impl StdError for MarkupError {}
impl Display for MarkupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}: {}", self.title, self.error)
    }
}
impl From<MarkupError> for PipelineError {
    fn from(value: MarkupError) -> Self {
        Self::Markup(value)
    }
}

#[derive(Debug)]
pub(crate) enum CorpusWriterError {
    Io(io::Error),
    Csv(csv::Error),
}
impl StdError for CorpusWriterError {}
impl Display for CorpusWriterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CorpusWriterError::Io(e) => write!(f, "CorpusWriterError::Io {e}"),
            CorpusWriterError::Csv(e) => write!(f, "CorpusWriterError::Csv {e}"),
        }
    }
}
impl From<io::Error> for CorpusWriterError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
impl From<csv::Error> for CorpusWriterError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}
impl From<CorpusWriterError> for PipelineError {
    fn from(value: CorpusWriterError) -> Self {
        Self::CorpusWriterError(value)
    }
}
