use super::Regexes;

/// Text-level corrections for markup the tree parser mishandles.
///
/// Bold markers are removed as balanced pairs so an italic word followed by a
/// possessive (`''Mirror'''s`) keeps its apostrophe. Italic markers are then
/// removed one by one since they are often left unterminated.
pub(crate) fn preprocess(markup: &str, regexes: &Regexes) -> String {
    let markup = regexes.displaytitle.replace_all(markup, "");
    let markup = regexes.bold_pair.replace_all(&markup, "${1}${2}${3}");
    let markup = regexes.italic_marker.replace_all(&markup, "");
    let markup = regexes.toc.replace_all(&markup, "");
    markup.into_owned()
}
