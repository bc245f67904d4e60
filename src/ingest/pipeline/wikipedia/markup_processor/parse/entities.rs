use super::tree::{MarkupTree, NodeKind, ParsedNode};

/// Replace HTML entities with the character they stand for and strip comments.
pub(crate) fn normalize_entities_and_comments(tree: &mut MarkupTree) {
    for id in tree.filter(NodeKind::HtmlEntity, true) {
        let ParsedNode::HtmlEntity(character) = *tree.node(id) else {
            continue;
        };
        log::trace!("replacing html entity with [{character}]");
        let text = tree.alloc(ParsedNode::Text(character.to_string()));
        if let Err(e) = tree.replace(id, vec![text]) {
            log::trace!("{e}");
        }
    }

    for id in tree.filter(NodeKind::Comment, true) {
        if let Err(e) = tree.remove(id) {
            log::trace!("{e}");
        }
    }
}

#[cfg(test)]
mod tests_normalize_entities {
    use super::*;

    #[test]
    fn entities_become_text_and_comments_vanish() {
        let mut tree = MarkupTree::new();
        tree.push(ParsedNode::Text("5".into()), None);
        tree.push(ParsedNode::HtmlEntity('\u{a0}'), None);
        tree.push(ParsedNode::Text("km".into()), None);
        tree.push(ParsedNode::Comment, None);
        let link = tree.push(ParsedNode::InternalLink { target: "AT&T".into() }, None);
        tree.push(ParsedNode::HtmlEntity('&'), Some(link));

        normalize_entities_and_comments(&mut tree);

        assert!(tree.filter(NodeKind::HtmlEntity, true).is_empty());
        assert!(tree.filter(NodeKind::Comment, true).is_empty());
        let text: String = tree.roots().iter().map(|id| tree.text_of(*id)).collect();
        assert_eq!(text, "5\u{a0}km&");
        assert!(matches!(tree.node(tree.children(link)[0]), ParsedNode::Text(t) if t == "&"));
    }
}
