use std::{
    error::Error,
    fmt::{Display, Formatter, Result},
};

use chrono::ParseError as DateParseError;

use super::parse::NodeKind;

#[derive(Debug)]
pub(crate) enum WikiMarkupProcessingError {
    TemplateArity {
        template: String,
        expected: usize,
        found: usize,
    },
    MissingParameter(String),
    DateNotFirst(String),
    InvalidDate(String, DateParseError),
    InvalidNumber {
        template: String,
        value: String,
    },
    UnexpectedTemplate(String),
    UnexpectedNode(NodeKind),
}

impl Error for WikiMarkupProcessingError {}
impl Display for WikiMarkupProcessingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            WikiMarkupProcessingError::TemplateArity {
                template,
                expected,
                found,
            } => write!(
                f,
                "WikiMarkupProcessor: template '{template}' takes {expected} parameter(s), found {found}"
            ),
            WikiMarkupProcessingError::MissingParameter(template) => {
                write!(f, "WikiMarkupProcessor: template '{template}' has no parameters")
            }
            WikiMarkupProcessingError::DateNotFirst(output) => {
                write!(
                    f,
                    "WikiMarkupProcessor: date template must open the article, found preceding text '{output}'"
                )
            }
            WikiMarkupProcessingError::InvalidDate(date, e) => {
                write!(f, "WikiMarkupProcessor: unable to read date '{date}': {e}")
            }
            WikiMarkupProcessingError::InvalidNumber { template, value } => {
                write!(
                    f,
                    "WikiMarkupProcessor: template '{template}' expects a number, found '{value}'"
                )
            }
            WikiMarkupProcessingError::UnexpectedTemplate(name) => {
                write!(f, "WikiMarkupProcessor: unresolved template '{name}' reached the assembler")
            }
            WikiMarkupProcessingError::UnexpectedNode(kind) => {
                write!(f, "WikiMarkupProcessor: unrecognized {kind} node reached the assembler")
            }
        }
    }
}
