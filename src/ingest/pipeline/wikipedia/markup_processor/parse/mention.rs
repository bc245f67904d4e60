use super::Regexes;

pub(crate) const CONTEXT_WINDOW: usize = 5;
/// A context is complete when it has more than this many tokens.
pub(crate) const COMPLETE_CONTEXT: usize = 3;

/// A link met while assembling an article, with the words around it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MentionRecord {
    pub(crate) target_title: String,
    pub(crate) display_text: String,
    pub(crate) left_context: Vec<String>,
    pub(crate) right_context: Vec<String>,
    /// Character offset into the final text where the right context starts.
    right_offset: usize,
}

impl MentionRecord {
    /// Must be called before `display_text` is appended to `output`.
    pub(crate) fn new(
        target_title: String,
        display_text: String,
        output: &str,
        regexes: &Regexes,
    ) -> Self {
        let words = regexes.words(output);
        let left_context = words[words.len().saturating_sub(CONTEXT_WINDOW)..]
            .iter()
            .map(|word| word.to_string())
            .collect();
        let right_offset = output.chars().count() + 1 + display_text.chars().count();
        Self {
            target_title,
            display_text,
            left_context,
            right_context: vec![],
            right_offset,
        }
    }

    /// Read the right context out of the finished article text.
    pub(crate) fn finalize(&mut self, text: &str, regexes: &Regexes) {
        let rest = match text.char_indices().nth(self.right_offset) {
            Some((byte, _)) => &text[byte..],
            None => "",
        };
        self.right_context = regexes
            .words(rest)
            .into_iter()
            .take(CONTEXT_WINDOW)
            .map(str::to_string)
            .collect();
    }

    pub(crate) fn left_complete(&self) -> bool {
        self.left_context.len() > COMPLETE_CONTEXT
    }

    pub(crate) fn right_complete(&self) -> bool {
        self.right_context.len() > COMPLETE_CONTEXT
    }
}

impl std::fmt::Display for MentionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.left_context.join(" "),
            self.target_title,
            self.right_context.join(" ")
        )
    }
}

#[cfg(test)]
mod tests_mention_record {
    use super::*;

    #[test]
    fn left_context_keeps_last_five_words() {
        let regexes = Regexes::new();
        let output = "One, two; three four -- five six seven ";
        let mention = MentionRecord::new("Eight".into(), "eight".into(), output, &regexes);

        assert_eq!(mention.left_context, ["three", "four", "five", "six", "seven"]);
        assert!(mention.left_complete());
    }

    #[test]
    fn right_context_skips_one_character_after_the_link() {
        let regexes = Regexes::new();
        let before = "Sofia is the ";
        let mut mention = MentionRecord::new("Bulgaria".into(), "Bulgarian".into(), before, &regexes);
        let text = format!("{before}Bulgarian capital. It has many old churches.\n\n");

        mention.finalize(&text, &regexes);

        assert_eq!(mention.right_context, ["capital", "It", "has", "many", "old"]);
        assert!(mention.right_complete());
        assert_eq!(mention.left_context, ["Sofia", "is", "the"]);
        assert!(!mention.left_complete());
    }

    #[test]
    fn offsets_count_characters_not_bytes() {
        let regexes = Regexes::new();
        let before = "Столицата на ";
        let mut mention = MentionRecord::new("България".into(), "България".into(), before, &regexes);
        let text = format!("{before}България е София.\n\n");

        mention.finalize(&text, &regexes);

        assert_eq!(mention.right_context, ["е", "София"]);
        assert_eq!(mention.left_context, ["Столицата", "на"]);
    }

    #[test]
    fn offset_past_the_end_gives_empty_context() {
        let regexes = Regexes::new();
        let mut mention = MentionRecord::new("A".into(), "A".into(), "x ", &regexes);
        mention.finalize("x", &regexes);
        assert!(mention.right_context.is_empty());
        assert!(!mention.right_complete());
    }
}
