use regex::Regex;

const DISPLAYTITLE_REGEX: &str = r"\{\{DISPLAYTITLE.*?\}\}\s*";
const BOLD_PAIR_REGEX: &str = r"([^'])'''([^']+)'''([^'])";
const ITALIC_MARKER_REGEX: &str = r"''";
const TOC_REGEX: &str = r"__TOC__\s*";
const SPACES_BEFORE_NEWLINE: &str = r" *\n";
const TWO_OR_MORE_NEWLINES: &str = r"\n\n\n*";
const WORD_REGEX: &str = r"\w+";
const NUMERIC_ENTITY_REGEX: &str = r"&#(?:[xX]([0-9a-fA-F]+)|([0-9]+));";

#[derive(Clone)]
pub(crate) struct Regexes {
    pub(crate) displaytitle: Regex,
    pub(crate) bold_pair: Regex,
    pub(crate) italic_marker: Regex,
    pub(crate) toc: Regex,
    pub(crate) spaces_before_newline: Regex,
    pub(crate) newlines: Regex,
    pub(crate) word: Regex,
    pub(crate) numeric_entity: Regex,
}

impl Regexes {
    pub(crate) fn new() -> Regexes {
        Regexes {
            displaytitle: Regex::new(DISPLAYTITLE_REGEX).unwrap(),
            bold_pair: Regex::new(BOLD_PAIR_REGEX).unwrap(),
            italic_marker: Regex::new(ITALIC_MARKER_REGEX).unwrap(),
            toc: Regex::new(TOC_REGEX).unwrap(),
            spaces_before_newline: Regex::new(SPACES_BEFORE_NEWLINE).unwrap(),
            newlines: Regex::new(TWO_OR_MORE_NEWLINES).unwrap(),
            word: Regex::new(WORD_REGEX).unwrap(),
            numeric_entity: Regex::new(NUMERIC_ENTITY_REGEX).unwrap(),
        }
    }

    /// Word-character runs of `text`, in order.
    pub(crate) fn words<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.word.find_iter(text).map(|m| m.as_str()).collect()
    }
}

impl Default for Regexes {
    fn default() -> Self {
        Self::new()
    }
}
