use super::tree::{MarkupTree, NodeKind, ParsedNode};

/// Tags without a sensible plain-text representation.
pub(crate) const DROPPED_TAGS: [&str; 5] = ["mapframe", "table", "blockquote", "div", "gallery"];

/// Remove the tags in [`DROPPED_TAGS`] and replace every other tag with its
/// contents.
pub(crate) fn rewrite_tags(tree: &mut MarkupTree) {
    for id in tree.filter(NodeKind::Tag, true) {
        let ParsedNode::Tag { name } = tree.node(id) else {
            continue;
        };
        let dropped = DROPPED_TAGS.contains(&name.to_lowercase().as_str());
        let result = if dropped {
            log::debug!("removing tag [{name}]");
            tree.remove(id)
        } else {
            log::debug!("replacing tag [{name}] with its contents");
            let contents = tree.children(id).to_vec();
            tree.replace(id, contents)
        };
        if let Err(e) = result {
            // parent went away earlier in this pass
            log::trace!("{e}");
        }
    }
}
