use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

pub(crate) type NodeId = usize;

/// The closed set of node kinds the transducer works with.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ParsedNode {
    Text(String),
    Template { name: String },
    /// Child of a `Template`; `name` is `None` for positional parameters.
    Parameter { name: Option<String> },
    Heading,
    InternalLink { target: String },
    Tag { name: String },
    HtmlEntity(char),
    Comment,
}

impl ParsedNode {
    pub(crate) fn kind(&self) -> NodeKind {
        match self {
            ParsedNode::Text(_) => NodeKind::Text,
            ParsedNode::Template { .. } => NodeKind::Template,
            ParsedNode::Parameter { .. } => NodeKind::Parameter,
            ParsedNode::Heading => NodeKind::Heading,
            ParsedNode::InternalLink { .. } => NodeKind::InternalLink,
            ParsedNode::Tag { .. } => NodeKind::Tag,
            ParsedNode::HtmlEntity(_) => NodeKind::HtmlEntity,
            ParsedNode::Comment => NodeKind::Comment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    Text,
    Template,
    Parameter,
    Heading,
    InternalLink,
    Tag,
    HtmlEntity,
    Comment,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            NodeKind::Text => "text",
            NodeKind::Template => "template",
            NodeKind::Parameter => "parameter",
            NodeKind::Heading => "heading",
            NodeKind::InternalLink => "internal link",
            NodeKind::Tag => "tag",
            NodeKind::HtmlEntity => "html entity",
            NodeKind::Comment => "comment",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent {
    Root,
    Node(NodeId),
    Detached,
}

#[derive(Debug, Clone)]
struct Slot {
    node: ParsedNode,
    parent: Parent,
    children: Vec<NodeId>,
    removed: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum TreeError {
    /// The node, or one of its ancestors, was removed earlier in the pass.
    Detached(NodeId),
}

impl Error for TreeError {}
impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TreeError::Detached(id) => write!(f, "MarkupTree: node {id} is not attached"),
        }
    }
}

/// Arena holding one article's markup tree.
///
/// Nodes are never freed while the tree lives: removal tombstones the node and
/// replacement re-parents the substitutes, so ids taken from a snapshot stay
/// valid and can be checked with [`MarkupTree::is_attached`].
#[derive(Debug, Default, Clone)]
pub(crate) struct MarkupTree {
    slots: Vec<Slot>,
    roots: Vec<NodeId>,
}

impl MarkupTree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Allocate a node and append it to `parent`, or to the top level.
    pub(crate) fn push(&mut self, node: ParsedNode, parent: Option<NodeId>) -> NodeId {
        let id = self.slots.len();
        let (parent, siblings) = match parent {
            Some(p) => (Parent::Node(p), &mut self.slots[p].children),
            None => (Parent::Root, &mut self.roots),
        };
        siblings.push(id);
        self.slots.push(Slot {
            node,
            parent,
            children: vec![],
            removed: false,
        });
        id
    }

    /// Allocate a node that is not yet part of the tree.
    pub(crate) fn alloc(&mut self, node: ParsedNode) -> NodeId {
        let id = self.slots.len();
        self.slots.push(Slot {
            node,
            parent: Parent::Detached,
            children: vec![],
            removed: false,
        });
        id
    }

    pub(crate) fn node(&self, id: NodeId) -> &ParsedNode {
        &self.slots[id].node
    }

    pub(crate) fn children(&self, id: NodeId) -> &[NodeId] {
        &self.slots[id].children
    }

    pub(crate) fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub(crate) fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            let slot = &self.slots[current];
            if slot.removed {
                return false;
            }
            match slot.parent {
                Parent::Root => return true,
                Parent::Detached => return false,
                Parent::Node(p) => current = p,
            }
        }
    }

    /// Snapshot, in document order, of every attached node of `kind`.
    ///
    /// When `recursive` is false only top-level nodes are considered.
    pub(crate) fn filter(&self, kind: NodeKind, recursive: bool) -> Vec<NodeId> {
        let mut found = vec![];
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let slot = &self.slots[id];
            if slot.node.kind() == kind {
                found.push(id);
            }
            if recursive {
                stack.extend(slot.children.iter().rev());
            }
        }
        found
    }

    pub(crate) fn remove(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.splice(id, vec![])
    }

    /// Put `replacement` where `id` was. The replacement nodes may be
    /// descendants of `id` or freshly allocated ones.
    pub(crate) fn replace(&mut self, id: NodeId, replacement: Vec<NodeId>) -> Result<(), TreeError> {
        self.splice(id, replacement)
    }

    pub(crate) fn insert_before(&mut self, id: NodeId, node: ParsedNode) -> Result<NodeId, TreeError> {
        self.insert_at(id, node, 0)
    }

    pub(crate) fn insert_after(&mut self, id: NodeId, node: ParsedNode) -> Result<NodeId, TreeError> {
        self.insert_at(id, node, 1)
    }

    fn insert_at(&mut self, id: NodeId, node: ParsedNode, offset: usize) -> Result<NodeId, TreeError> {
        if !self.is_attached(id) {
            return Err(TreeError::Detached(id));
        }
        let parent = self.slots[id].parent;
        let new_id = self.alloc(node);
        self.slots[new_id].parent = parent;
        let siblings = self.siblings_mut(parent);
        let position = siblings
            .iter()
            .position(|sibling| *sibling == id)
            .ok_or(TreeError::Detached(id))?;
        siblings.insert(position + offset, new_id);
        Ok(new_id)
    }

    fn splice(&mut self, id: NodeId, replacement: Vec<NodeId>) -> Result<(), TreeError> {
        if !self.is_attached(id) {
            return Err(TreeError::Detached(id));
        }
        let parent = self.slots[id].parent;
        let siblings = self.siblings_mut(parent);
        let position = siblings
            .iter()
            .position(|sibling| *sibling == id)
            .ok_or(TreeError::Detached(id))?;
        siblings.splice(position..=position, replacement.iter().copied());

        for moved in replacement {
            // a node is listed under exactly one parent
            if let Parent::Node(old) = self.slots[moved].parent {
                self.slots[old].children.retain(|child| *child != moved);
            }
            self.slots[moved].parent = parent;
        }
        self.slots[id].removed = true;
        Ok(())
    }

    fn siblings_mut(&mut self, parent: Parent) -> &mut Vec<NodeId> {
        match parent {
            Parent::Node(p) => &mut self.slots[p].children,
            Parent::Root | Parent::Detached => &mut self.roots,
        }
    }

    /// Positional and named parameters of a template, in source order.
    pub(crate) fn parameters(&self, template: NodeId) -> Vec<(Option<&str>, NodeId)> {
        self.children(template)
            .iter()
            .filter_map(|id| match self.node(*id) {
                ParsedNode::Parameter { name } => Some((name.as_deref(), *id)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn positional_parameters(&self, template: NodeId) -> Vec<NodeId> {
        self.parameters(template)
            .into_iter()
            .filter_map(|(name, id)| name.is_none().then_some(id))
            .collect()
    }

    /// Plain rendering of a subtree, used for template names, parameter
    /// values and heading titles.
    pub(crate) fn text_of(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.render_into(id, &mut out);
        out
    }

    pub(crate) fn text_of_children(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.render_into(*child, &mut out);
        }
        out
    }

    fn render_into(&self, id: NodeId, out: &mut String) {
        match self.node(id) {
            ParsedNode::Text(value) => out.push_str(value),
            ParsedNode::HtmlEntity(character) => out.push(*character),
            ParsedNode::Comment => {}
            ParsedNode::Template { .. } => {}
            ParsedNode::InternalLink { target } => {
                let text = self.text_of_children(id);
                if text.is_empty() {
                    out.push_str(target)
                } else {
                    out.push_str(&text)
                }
            }
            ParsedNode::Parameter { .. } | ParsedNode::Heading | ParsedNode::Tag { .. } => {
                for child in self.children(id) {
                    self.render_into(*child, out);
                }
            }
        }
    }
}
