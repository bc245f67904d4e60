mod assemble;
mod entities;
mod mention;
mod nodes;
mod preprocess;
mod regexes;
mod summary;
mod tags;
mod templates;
mod tree;

pub(super) use assemble::{assemble, Assembly};
pub(super) use entities::normalize_entities_and_comments;
pub(crate) use mention::MentionRecord;
pub(super) use nodes::build_tree;
pub(super) use preprocess::preprocess;
pub(crate) use regexes::Regexes;
pub(super) use summary::summarize;
pub(super) use tags::rewrite_tags;
pub(super) use templates::resolve_templates;
pub(crate) use tree::NodeKind;
