const SUMMARY_FALLBACK_CHARS: usize = 20;

/// Short description of an article: its text up to the first full stop, or
/// the first few characters when there is none.
pub(crate) fn summarize(text: &str) -> String {
    let text = text.trim();
    match text.split_once('.') {
        Some((first_sentence, _)) => first_sentence.to_string(),
        None => text.chars().take(SUMMARY_FALLBACK_CHARS).collect(),
    }
}
