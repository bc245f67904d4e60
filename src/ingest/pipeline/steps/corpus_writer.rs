use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use csv::{Writer, WriterBuilder};
use serde::Serialize;

use crate::ingest::pipeline::{document::Document, error::CorpusWriterError};

const DOCUMENTS_FILE: &str = "docs.csv";
const MENTIONS_FILE: &str = "mentions.csv";
const TEXT_DIRECTORY: &str = "text";
const DOCUMENT_HEADERS: [&str; 5] = ["docid", "title", "url", "summary", "mention_count"];
const MENTION_HEADERS: [&str; 7] = [
    "docid",
    "target",
    "mention",
    "left_context",
    "right_context",
    "left_complete",
    "right_complete",
];

#[derive(Serialize)]
struct DocumentRow<'a> {
    docid: usize,
    title: &'a str,
    url: &'a str,
    summary: &'a str,
    mention_count: usize,
}

#[derive(Serialize)]
struct MentionRow<'a> {
    docid: usize,
    target: &'a str,
    mention: &'a str,
    left_context: String,
    right_context: String,
    left_complete: bool,
    right_complete: bool,
}

/// Writes transduced documents into an output directory: one row per
/// document, one row per mention and the assembled text of each document.
pub(crate) struct CorpusWriter {
    documents: Writer<File>,
    mentions: Writer<File>,
    text_directory: PathBuf,
    next_docid: usize,
}

impl CorpusWriter {
    pub(crate) fn new(output_directory: &Path) -> Result<Self, CorpusWriterError> {
        let text_directory = output_directory.join(TEXT_DIRECTORY);
        fs::create_dir_all(&text_directory)?;
        Ok(Self {
            documents: csv_with_headers(&output_directory.join(DOCUMENTS_FILE), &DOCUMENT_HEADERS)?,
            mentions: csv_with_headers(&output_directory.join(MENTIONS_FILE), &MENTION_HEADERS)?,
            text_directory,
            next_docid: 0,
        })
    }

    /// Returns the id the document was written under.
    pub(crate) fn write(&mut self, document: &Document) -> Result<usize, CorpusWriterError> {
        let docid = self.next_docid;

        fs::write(
            self.text_directory.join(format!("{docid}.txt")),
            &document.text,
        )?;
        self.documents.serialize(DocumentRow {
            docid,
            title: &document.entity.title,
            url: &document.entity.url,
            summary: &document.entity.summary,
            mention_count: document.mentions.len(),
        })?;
        for mention in &document.mentions {
            self.mentions.serialize(MentionRow {
                docid,
                target: &mention.target_title,
                mention: &mention.display_text,
                left_context: mention.left_context.join(" "),
                right_context: mention.right_context.join(" "),
                left_complete: mention.left_complete(),
                right_complete: mention.right_complete(),
            })?;
        }

        self.next_docid += 1;
        Ok(docid)
    }

    pub(crate) fn finish(mut self) -> Result<usize, CorpusWriterError> {
        self.documents.flush()?;
        self.mentions.flush()?;
        Ok(self.next_docid)
    }
}

/// Headers go out up front so an empty corpus is still a readable table.
fn csv_with_headers(path: &Path, headers: &[&str]) -> Result<Writer<File>, CorpusWriterError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(headers)?;
    Ok(writer)
}

#[cfg(test)]
mod tests_corpus_writer {
    use super::*;
    use crate::ingest::pipeline::wikipedia::{ExtractionSettings, WikiMarkupProcessor};
    use crate::test_data::{SOFIA_SUMMIT, SOFIA_SUMMIT_TITLE, SOFIA_SUMMIT_URL};

    fn sofia_summit() -> Document {
        WikiMarkupProcessor::new(ExtractionSettings::default())
            .transduce(SOFIA_SUMMIT_TITLE, SOFIA_SUMMIT_URL, SOFIA_SUMMIT)
            .unwrap()
    }

    #[test]
    fn writes_documents_mentions_and_text() {
        let directory = tempfile::tempdir().unwrap();
        let document = sofia_summit();

        let mut writer = CorpusWriter::new(directory.path()).unwrap();
        assert_eq!(writer.write(&document).unwrap(), 0);
        assert_eq!(writer.write(&document).unwrap(), 1);
        assert_eq!(writer.finish().unwrap(), 2);

        let text = fs::read_to_string(directory.path().join("text").join("1.txt")).unwrap();
        assert_eq!(text, document.text);

        let mut documents = csv::Reader::from_path(directory.path().join(DOCUMENTS_FILE)).unwrap();
        let headers: Vec<_> = documents.headers().unwrap().iter().collect();
        assert_eq!(headers, ["docid", "title", "url", "summary", "mention_count"]);
        let rows: Vec<_> = documents.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], SOFIA_SUMMIT_TITLE);
        assert_eq!(&rows[0][3], document.entity.summary);
        assert_eq!(&rows[0][4], document.mentions.len().to_string());

        let mut mentions = csv::Reader::from_path(directory.path().join(MENTIONS_FILE)).unwrap();
        let rows: Vec<_> = mentions.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2 * document.mentions.len());
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[0][1], "Bulgaria");
        assert_eq!(&rows[0][2], "Bulgarian");
        assert_eq!(&rows[0][6], "true");
    }

    #[test]
    fn empty_corpus_still_creates_files() {
        let directory = tempfile::tempdir().unwrap();
        let writer = CorpusWriter::new(directory.path()).unwrap();
        assert_eq!(writer.finish().unwrap(), 0);

        let mut documents = csv::Reader::from_path(directory.path().join(DOCUMENTS_FILE)).unwrap();
        let headers: Vec<_> = documents.headers().unwrap().iter().collect();
        assert_eq!(headers, DOCUMENT_HEADERS);
        assert_eq!(documents.records().count(), 0);

        let mut mentions = csv::Reader::from_path(directory.path().join(MENTIONS_FILE)).unwrap();
        let headers: Vec<_> = mentions.headers().unwrap().iter().collect();
        assert_eq!(headers, MENTION_HEADERS);
        assert_eq!(mentions.records().count(), 0);

        assert!(directory.path().join(TEXT_DIRECTORY).is_dir());
    }
}
