use std::{
    ffi::OsStr,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use bzip2::read::MultiBzDecoder;
use flate2::read::GzDecoder;
use parse_mediawiki_dump_reboot::{schema::Namespace, Page};
use url::Url;

use crate::ingest::pipeline::error::WikipediaDumpReaderError;

const READ_BUFFER_CAPACITY: usize = 2 * 1024 * 1024;
const WIKITEXT_FORMAT: &str = "text/x-wiki";
const WIKITEXT_MODEL: &str = "wikitext";
const REDIRECT_MARKERS: [&str; 2] = ["#redirect", "#пренасочване"];
// left unescaped in article urls, alongside what urlencoding never escapes
const URL_SAFE: &str = ";@$!*(),/:";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ArticlePage {
    pub(crate) title: String,
    pub(crate) url: String,
    pub(crate) markup: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SkipReason {
    NoText,
    Namespace,
    NotWikitext,
    Redirect,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoText => write!(f, "no text"),
            SkipReason::Namespace => write!(f, "not in the main namespace"),
            SkipReason::NotWikitext => write!(f, "not wikitext"),
            SkipReason::Redirect => write!(f, "redirect"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum PageOutcome {
    Article(ArticlePage),
    Skipped { title: String, reason: SkipReason },
}

pub(crate) struct WikipediaDumpReader {
    base_url: Url,
}

impl WikipediaDumpReader {
    pub(crate) fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Stream every page of a dump, classified. Reading stops at the first
    /// malformed entry.
    pub(crate) fn pages<'a>(
        &'a self,
        wiki_xml: &Path,
    ) -> Result<impl Iterator<Item = PageOutcome> + 'a, WikipediaDumpReaderError> {
        log::info!("Reading {}", wiki_xml.display());
        let source = open_dump(wiki_xml)?;
        let pages = parse_mediawiki_dump_reboot::parse(source).map_while(|page| match page {
            Ok(page) => Some(self.classify(page)),
            Err(e) => {
                log::warn!("Stopped reading dump: {e}");
                None
            }
        });
        Ok(pages)
    }

    pub(crate) fn classify(&self, page: Page) -> PageOutcome {
        let Page {
            title,
            text,
            namespace,
            format,
            model,
            ..
        } = page;
        let reason = if text.trim().is_empty() {
            Some(SkipReason::NoText)
        } else if namespace != Namespace::Main {
            Some(SkipReason::Namespace)
        } else if format.is_some_and(|format| format != WIKITEXT_FORMAT)
            || model.is_some_and(|model| model != WIKITEXT_MODEL)
        {
            Some(SkipReason::NotWikitext)
        } else if is_redirect(&text) {
            Some(SkipReason::Redirect)
        } else {
            None
        };

        match reason {
            Some(reason) => PageOutcome::Skipped { title, reason },
            None => PageOutcome::Article(ArticlePage {
                url: article_url(&self.base_url, &title),
                title,
                markup: text,
            }),
        }
    }
}

fn open_dump(wiki_xml: &Path) -> Result<Box<dyn BufRead>, WikipediaDumpReaderError> {
    let file = File::open(wiki_xml)
        .map_err(|e| WikipediaDumpReaderError::ErrorReadingDump(wiki_xml.to_path_buf(), e))?;
    let extension = wiki_xml
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_lowercase);
    let reader: Box<dyn Read> = match extension.as_deref() {
        Some("xml") => Box::new(file),
        Some("bz2") => Box::new(MultiBzDecoder::new(file)),
        Some("gz") => Box::new(GzDecoder::new(file)),
        _ => {
            return Err(WikipediaDumpReaderError::UnsupportedExtension(
                wiki_xml.to_path_buf(),
            ))
        }
    };
    Ok(Box::new(BufReader::with_capacity(READ_BUFFER_CAPACITY, reader)))
}

fn is_redirect(text: &str) -> bool {
    let start: String = text.trim_start().chars().take(16).collect();
    let start = start.to_lowercase();
    REDIRECT_MARKERS
        .iter()
        .any(|marker| start.starts_with(marker))
}

/// Page address the way Wikipedia writes it: spaces become underscores and
/// everything outside the unreserved and `URL_SAFE` characters is %-encoded.
pub(crate) fn article_url(base_url: &Url, title: &str) -> String {
    let mut url = base_url.as_str().to_string();
    let mut buffer = [0u8; 4];
    for c in title.replace(' ', "_").chars() {
        if URL_SAFE.contains(c) {
            url.push(c);
        } else {
            url.push_str(&urlencoding::encode(c.encode_utf8(&mut buffer)));
        }
    }
    url
}

#[cfg(test)]
mod tests_wikipedia_dump_reader {
    use std::io::Write;

    use flate2::{write::GzEncoder, Compression};

    use super::*;
    use crate::test_data::{dump_xml, BULGARIAN_WIKIPEDIA, SOFIA_SUMMIT_TITLE};

    fn reader() -> WikipediaDumpReader {
        WikipediaDumpReader::new(Url::parse(BULGARIAN_WIKIPEDIA).unwrap())
    }

    fn outcomes(reader: &WikipediaDumpReader, path: &Path) -> Vec<PageOutcome> {
        reader.pages(path).unwrap().collect()
    }

    fn skip_reasons(outcomes: &[PageOutcome]) -> Vec<SkipReason> {
        outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                PageOutcome::Skipped { reason, .. } => Some(*reason),
                PageOutcome::Article(_) => None,
            })
            .collect()
    }

    #[test]
    fn article_urls_follow_wikipedia_encoding() {
        let base = Url::parse(BULGARIAN_WIKIPEDIA).unwrap();
        assert_eq!(
            article_url(&base, "Sofia (city), Bulgaria"),
            "https://bg.wikipedia.org/wiki/Sofia_(city),_Bulgaria"
        );
        assert_eq!(
            article_url(&base, "AT&T 100%"),
            "https://bg.wikipedia.org/wiki/AT%26T_100%25"
        );
        assert_eq!(
            article_url(&base, "София"),
            "https://bg.wikipedia.org/wiki/%D0%A1%D0%BE%D1%84%D0%B8%D1%8F"
        );
    }

    #[test]
    fn redirects_are_recognised_in_both_languages() {
        assert!(is_redirect("#REDIRECT [[Sofia]]"));
        assert!(is_redirect("  #redirect[[Sofia]]"));
        assert!(is_redirect("#ПРЕНАСОЧВАНЕ [[София]]"));
        assert!(!is_redirect("Sofia #REDIRECT"));
    }

    #[test]
    fn plain_xml_pages_are_classified() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("bgwiki-pages-articles.xml");
        std::fs::write(&path, dump_xml()).unwrap();

        let reader = reader();
        let outcomes = outcomes(&reader, &path);
        assert_eq!(outcomes.len(), 5);

        let PageOutcome::Article(article) = &outcomes[0] else {
            panic!("expected an article, got {:?}", outcomes[0]);
        };
        assert_eq!(article.title, SOFIA_SUMMIT_TITLE);
        assert_eq!(
            article.url,
            "https://bg.wikipedia.org/wiki/Summit_opens_in_Sofia"
        );
        assert!(article.markup.contains("{{nowrap|3&nbsp;km}}"));

        assert_eq!(
            skip_reasons(&outcomes),
            [SkipReason::Redirect, SkipReason::Namespace, SkipReason::NoText]
        );
    }

    #[test]
    fn gzip_dumps_are_decompressed() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("bgwiki-pages-articles.xml.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(dump_xml().as_bytes()).unwrap();
        encoder.finish().unwrap();

        assert_eq!(outcomes(&reader(), &path).len(), 5);
    }

    #[test]
    fn bzip2_dumps_are_decompressed() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("bgwiki-pages-articles.xml.bz2");
        let mut encoder =
            bzip2::write::BzEncoder::new(File::create(&path).unwrap(), bzip2::Compression::best());
        encoder.write_all(dump_xml().as_bytes()).unwrap();
        encoder.finish().unwrap();

        assert_eq!(outcomes(&reader(), &path).len(), 5);
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("dump.json");
        std::fs::write(&path, "{}").unwrap();

        assert!(matches!(
            reader().pages(&path).map(|_| ()),
            Err(WikipediaDumpReaderError::UnsupportedExtension(_))
        ));
    }
}
