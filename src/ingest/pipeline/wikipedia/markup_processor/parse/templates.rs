use super::{
    super::WikiMarkupProcessingError,
    tree::{MarkupTree, NodeId, NodeKind, ParsedNode, TreeError},
};

pub(crate) const TRANSLATED_QUOTE: &str = "translated quote";
pub(crate) const TRANSLATION_NOTE: &str = "translation note";
pub(crate) const NOWRAP: &str = "nowrap";
pub(crate) const WIKTIONARY: &str = "wikt";
pub(crate) const FEET_TO_METERS: &str = "ft to m";
pub(crate) const MILES_TO_KILOMETERS: &str = "mi to km";
pub(crate) const DATE: &str = "date";
pub(crate) const WIKIPEDIA_LINK: &str = "w";
pub(crate) const HAVE_YOUR_SAY: [&str; 2] = ["hys", "haveyoursay"];

const METERS_PER_FOOT: f64 = 0.3048;
const KILOMETERS_PER_MILE: f64 = 1.60934;
const NBSP: char = '\u{a0}';

/// Lower-cased, trimmed name used for dispatch.
pub(crate) fn template_name(tree: &MarkupTree, id: NodeId) -> Option<String> {
    match tree.node(id) {
        ParsedNode::Template { name } => Some(name.trim().to_lowercase()),
        _ => None,
    }
}

/// Templates the assembler turns into output.
pub(crate) fn is_deferred(name: &str) -> bool {
    name == DATE || name == WIKIPEDIA_LINK || HAVE_YOUR_SAY.contains(&name)
}

/// Rewrite the handful of templates with a text form, keep the ones the
/// assembler needs, and remove everything else.
pub(crate) fn resolve_templates(tree: &mut MarkupTree) -> Result<(), WikiMarkupProcessingError> {
    for id in tree.filter(NodeKind::Template, true) {
        if !tree.is_attached(id) {
            continue;
        }
        let Some(name) = template_name(tree, id) else {
            continue;
        };
        if let Err(e) = resolve_template(tree, id, &name)? {
            log::trace!("{e}");
        }
    }
    Ok(())
}

/// The outer result carries malformed-template errors; the inner one the
/// expected failure of touching a node that is no longer in the tree.
fn resolve_template(
    tree: &mut MarkupTree,
    id: NodeId,
    name: &str,
) -> Result<Result<(), TreeError>, WikiMarkupProcessingError> {
    let result = match name {
        TRANSLATED_QUOTE => {
            let value = parameter_value(tree, id, name, Position::Last)?;
            log::debug!("replacing translated quote with [\"{}\"]", rendered(tree, &value));
            tree.insert_before(id, ParsedNode::Text("\"".to_string()))
                .and_then(|_| tree.insert_after(id, ParsedNode::Text("\"".to_string())))
                .and_then(|_| tree.replace(id, value))
        }
        TRANSLATION_NOTE | NOWRAP => {
            let value = parameter_value(tree, id, name, Position::First)?;
            log::debug!("replacing {name} with [{}]", rendered(tree, &value));
            tree.replace(id, value)
        }
        WIKTIONARY => {
            let value = parameter_value(tree, id, name, Position::Last)?;
            log::debug!("replacing {name} with [{}]", rendered(tree, &value));
            tree.replace(id, value)
        }
        FEET_TO_METERS => {
            let feet = numeric_parameter(tree, id, name)?;
            let replacement = feet_to_meters(feet);
            log::debug!("replacing {name} with [{replacement}]");
            let text = tree.alloc(ParsedNode::Text(replacement));
            tree.replace(id, vec![text])
        }
        MILES_TO_KILOMETERS => {
            let miles = numeric_parameter(tree, id, name)?;
            let replacement = miles_to_kilometers(miles);
            log::debug!("replacing {name} with [{replacement}]");
            let text = tree.alloc(ParsedNode::Text(replacement));
            tree.replace(id, vec![text])
        }
        deferred if is_deferred(deferred) => Ok(()),
        _ => {
            log::debug!("removing template {name}");
            tree.remove(id)
        }
    };
    Ok(result)
}

pub(crate) fn feet_to_meters(feet: f64) -> String {
    let meters = feet * METERS_PER_FOOT;
    format!("{feet:.0}{NBSP}feet ({meters:.1}{NBSP}m)")
}

pub(crate) fn miles_to_kilometers(miles: f64) -> String {
    let kilometers = miles * KILOMETERS_PER_MILE;
    format!("{miles:.0}{NBSP}miles ({kilometers:.0}{NBSP}km)")
}

enum Position {
    First,
    Last,
}

fn parameter_value(
    tree: &MarkupTree,
    id: NodeId,
    name: &str,
    position: Position,
) -> Result<Vec<NodeId>, WikiMarkupProcessingError> {
    let parameters = tree.parameters(id);
    let parameter = match position {
        Position::First => parameters.first(),
        Position::Last => parameters.last(),
    };
    parameter
        .map(|(_, parameter)| tree.children(*parameter).to_vec())
        .ok_or_else(|| WikiMarkupProcessingError::MissingParameter(name.to_string()))
}

fn numeric_parameter(tree: &MarkupTree, id: NodeId, name: &str) -> Result<f64, WikiMarkupProcessingError> {
    let (_, parameter) = tree
        .parameters(id)
        .first()
        .copied()
        .ok_or_else(|| WikiMarkupProcessingError::MissingParameter(name.to_string()))?;
    let value = tree.text_of(parameter);
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| WikiMarkupProcessingError::InvalidNumber {
            template: name.to_string(),
            value,
        })
}

fn rendered(tree: &MarkupTree, nodes: &[NodeId]) -> String {
    nodes.iter().map(|id| tree.text_of(*id)).collect()
}

/// Title and display text of a `{{w|...}}` template. Only positional
/// parameters count; the last one is the text when there are at least two.
pub(crate) fn wikipedia_link(
    tree: &MarkupTree,
    id: NodeId,
) -> Result<(String, String), WikiMarkupProcessingError> {
    let positional = tree.positional_parameters(id);
    let first = positional
        .first()
        .ok_or_else(|| WikiMarkupProcessingError::MissingParameter(WIKIPEDIA_LINK.to_string()))?;
    let title = tree.text_of(*first);
    let text = match positional.as_slice() {
        [_, .., last] => tree.text_of(*last),
        _ => title.clone(),
    };
    Ok((title, text))
}
