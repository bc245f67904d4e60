use std::fmt::Display;

use super::wikipedia::MentionRecord;

/// What the corpus knows about an article without reading it.
#[derive(Default, Clone, Debug, PartialEq)]
pub(crate) struct EntityRecord {
    pub(crate) title: String,
    pub(crate) url: String,
    pub(crate) summary: String,
}

#[derive(Default, Clone, Debug)]
pub(crate) struct Document {
    pub(crate) title: String,
    pub(crate) url: String,
    pub(crate) text: String,
    pub(crate) mentions: Vec<MentionRecord>,
    pub(crate) entity: EntityRecord,
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}\n\n{}", self.title, self.url, self.text)
    }
}
