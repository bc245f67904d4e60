use parse_wiki_text::{DefinitionListItem, ListItem, Node, Parameter};
use regex::Captures;

use super::{
    assemble::is_media,
    tags::DROPPED_TAGS,
    tree::{MarkupTree, NodeId, ParsedNode},
    Regexes,
};

const PARAGRAPH_BREAK: &str = "\n\n";
const LINE_BREAK: &str = "\n";
const DEFAULT_MEDIA_NAMESPACE: &str = "File";

/// Copy a `parse_wiki_text` node list into an arena the transducer can edit.
///
/// `source` is the text the nodes were parsed from. The parser swallows the
/// newlines around block markup, so they are recovered from the gaps between
/// node spans.
pub(crate) fn build_tree(source: &str, nodes: &[Node<'_>], regexes: &Regexes) -> MarkupTree {
    let mut builder = TreeBuilder {
        source,
        regexes,
        tree: MarkupTree::new(),
    };
    builder.push_nodes(nodes, None);
    builder.tree
}

struct TreeBuilder<'a> {
    source: &'a str,
    regexes: &'a Regexes,
    tree: MarkupTree,
}

impl<'a> TreeBuilder<'a> {
    fn push_nodes(&mut self, nodes: &[Node<'_>], parent: Option<NodeId>) {
        let mut index = 0;
        let mut previous_end = None;
        while index < nodes.len() {
            let node = &nodes[index];
            if let Some(end) = previous_end {
                let (start, _) = span(node);
                let gap = self.source.get(end..start).unwrap_or_default();
                match gap.matches('\n').count() {
                    0 => {}
                    1 => self.line_break(parent, LINE_BREAK),
                    _ => self.line_break(parent, PARAGRAPH_BREAK),
                }
            }
            let mut last = node;
            match node {
                // html tags come out of the parser flat; fold each pair into one tag
                Node::StartTag { name, .. } => {
                    let id = self.tree.push(
                        ParsedNode::Tag {
                            name: name.to_lowercase(),
                        },
                        parent,
                    );
                    if let Some(end) = matching_end_tag(nodes, index, name) {
                        self.push_nodes(&nodes[index + 1..end], Some(id));
                        index = end;
                        last = &nodes[end];
                    }
                }
                node => self.push_node(node, parent),
            }
            previous_end = Some(span(last).1);
            index += 1;
        }
    }

    fn push_node(&mut self, node: &Node<'_>, parent: Option<NodeId>) {
        match node {
            Node::Text { value, .. } => self.push_text(value, parent),
            Node::ParagraphBreak { .. } => {
                self.tree
                    .push(ParsedNode::Text(PARAGRAPH_BREAK.to_string()), parent);
            }
            Node::CharacterEntity { character, .. } => {
                self.tree.push(ParsedNode::HtmlEntity(*character), parent);
            }
            Node::Comment { .. } => {
                self.tree.push(ParsedNode::Comment, parent);
            }
            Node::Template {
                name, parameters, ..
            } => {
                let id = self.tree.push(
                    ParsedNode::Template {
                        name: plain_text(name),
                    },
                    parent,
                );
                self.push_parameters(parameters, id);
            }
            Node::Heading { nodes, .. } => {
                let id = self.tree.push(ParsedNode::Heading, parent);
                self.push_nodes(nodes, Some(id));
            }
            Node::Link { target, text, .. } => {
                let id = self.tree.push(
                    ParsedNode::InternalLink {
                        target: target.to_string(),
                    },
                    parent,
                );
                self.push_nodes(text, Some(id));
            }
            Node::Image { target, .. } => {
                self.tree.push(
                    ParsedNode::InternalLink {
                        target: media_target(target),
                    },
                    parent,
                );
            }
            Node::Tag { name, nodes, .. } => {
                let id = self.tree.push(
                    ParsedNode::Tag {
                        name: name.to_lowercase(),
                    },
                    parent,
                );
                self.push_nodes(nodes, Some(id));
            }
            Node::Table { .. } => {
                self.tree.push(
                    ParsedNode::Tag {
                        name: "table".to_string(),
                    },
                    parent,
                );
                self.line_break(parent, LINE_BREAK);
            }
            Node::Preformatted { nodes, .. } => {
                self.line_break(parent, LINE_BREAK);
                let id = self.tree.push(
                    ParsedNode::Tag {
                        name: "pre".to_string(),
                    },
                    parent,
                );
                self.push_nodes(nodes, Some(id));
                self.line_break(parent, LINE_BREAK);
            }
            Node::UnorderedList { items, .. } | Node::OrderedList { items, .. } => {
                self.line_break(parent, LINE_BREAK);
                for ListItem { nodes, .. } in items {
                    self.push_list_item("li", nodes, parent);
                }
            }
            Node::DefinitionList { items, .. } => {
                self.line_break(parent, LINE_BREAK);
                for DefinitionListItem { nodes, .. } in items {
                    self.push_list_item("dd", nodes, parent);
                }
            }
            Node::ExternalLink { nodes, .. } => {
                // "[http://example.org label]": keep the label only
                let link = plain_text(nodes);
                if let Some((_, label)) = link.split_once(' ') {
                    self.tree.push(ParsedNode::Text(label.to_string()), parent);
                }
            }
            Node::StartTag { .. } | Node::EndTag { .. } => {}
            Node::Bold { .. }
            | Node::BoldItalic { .. }
            | Node::Italic { .. }
            | Node::Category { .. }
            | Node::HorizontalDivider { .. }
            | Node::MagicWord { .. }
            | Node::Parameter { .. }
            | Node::Redirect { .. } => {}
        }
    }

    /// Numeric character references are left in the text by the parser;
    /// split them out as entities.
    fn push_text(&mut self, value: &str, parent: Option<NodeId>) {
        let regexes = self.regexes;
        let mut copied = 0;
        for captures in regexes.numeric_entity.captures_iter(value) {
            let (Some(reference), Some(character)) = (captures.get(0), referenced_char(&captures))
            else {
                continue;
            };
            if reference.start() > copied {
                self.tree.push(
                    ParsedNode::Text(value[copied..reference.start()].to_string()),
                    parent,
                );
            }
            self.tree.push(ParsedNode::HtmlEntity(character), parent);
            copied = reference.end();
        }
        if copied < value.len() {
            self.tree
                .push(ParsedNode::Text(value[copied..].to_string()), parent);
        }
    }

    /// End the current line unless the last sibling that will survive tag
    /// rewriting already did. Nothing is pushed at the start of a parent.
    fn line_break(&mut self, parent: Option<NodeId>, line_break: &str) {
        let siblings = match parent {
            Some(id) => self.tree.children(id),
            None => self.tree.roots(),
        };
        let previous = siblings
            .iter()
            .rev()
            .copied()
            .find(|id| !vanishes(self.tree.node(*id)));
        let Some(previous) = previous else {
            return;
        };
        if matches!(self.tree.node(previous), ParsedNode::Text(value) if value.ends_with(line_break)) {
            return;
        }
        self.tree
            .push(ParsedNode::Text(line_break.to_string()), parent);
    }

    fn push_parameters(&mut self, parameters: &[Parameter<'_>], template: NodeId) {
        for Parameter { name, value, .. } in parameters {
            let id = self.tree.push(
                ParsedNode::Parameter {
                    name: name.as_deref().map(plain_text),
                },
                Some(template),
            );
            self.push_nodes(value, Some(id));
        }
    }

    fn push_list_item(&mut self, tag: &str, nodes: &[Node<'_>], parent: Option<NodeId>) {
        let id = self.tree.push(
            ParsedNode::Tag {
                name: tag.to_string(),
            },
            parent,
        );
        self.push_nodes(nodes, Some(id));
        self.tree
            .push(ParsedNode::Text(LINE_BREAK.to_string()), parent);
    }
}

/// Nodes the later passes delete without leaving text behind.
fn vanishes(node: &ParsedNode) -> bool {
    match node {
        ParsedNode::Tag { name } => DROPPED_TAGS.contains(&name.as_str()),
        ParsedNode::Comment => true,
        _ => false,
    }
}

fn matching_end_tag(nodes: &[Node<'_>], start: usize, name: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, node) in nodes[start + 1..].iter().enumerate() {
        match node {
            Node::StartTag { name: other, .. } if other.eq_ignore_ascii_case(name) => depth += 1,
            Node::EndTag { name: other, .. } if other.eq_ignore_ascii_case(name) => {
                if depth == 0 {
                    return Some(start + 1 + offset);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

fn referenced_char(captures: &Captures<'_>) -> Option<char> {
    let code = match (captures.get(1), captures.get(2)) {
        (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok()?,
        (None, Some(decimal)) => decimal.as_str().parse().ok()?,
        (None, None) => return None,
    };
    char::from_u32(code)
}

/// Byte range of a node in the text it was parsed from.
fn span(node: &Node<'_>) -> (usize, usize) {
    match node {
        Node::Bold { start, end, .. }
        | Node::BoldItalic { start, end, .. }
        | Node::Category { start, end, .. }
        | Node::CharacterEntity { start, end, .. }
        | Node::Comment { start, end, .. }
        | Node::DefinitionList { start, end, .. }
        | Node::EndTag { start, end, .. }
        | Node::ExternalLink { start, end, .. }
        | Node::Heading { start, end, .. }
        | Node::HorizontalDivider { start, end, .. }
        | Node::Image { start, end, .. }
        | Node::Italic { start, end, .. }
        | Node::Link { start, end, .. }
        | Node::MagicWord { start, end, .. }
        | Node::OrderedList { start, end, .. }
        | Node::ParagraphBreak { start, end, .. }
        | Node::Parameter { start, end, .. }
        | Node::Preformatted { start, end, .. }
        | Node::Redirect { start, end, .. }
        | Node::StartTag { start, end, .. }
        | Node::Table { start, end, .. }
        | Node::Tag { start, end, .. }
        | Node::Template { start, end, .. }
        | Node::Text { start, end, .. }
        | Node::UnorderedList { start, end, .. } => (*start, *end),
    }
}

/// Image targets always carry a media namespace, whatever alias was used.
fn media_target(target: &str) -> String {
    if is_media(target) {
        target.to_string()
    } else {
        format!("{DEFAULT_MEDIA_NAMESPACE}:{target}")
    }
}

/// Text content of a node list, for template and parameter names.
fn plain_text(nodes: &[Node<'_>]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text { value, .. } => out.push_str(value),
            Node::CharacterEntity { character, .. } => out.push(*character),
            _ => {}
        }
    }
    out
}
