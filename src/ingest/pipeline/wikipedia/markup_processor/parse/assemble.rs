use chrono::NaiveDate;

use super::{
    super::WikiMarkupProcessingError,
    mention::MentionRecord,
    templates::{self, template_name, wikipedia_link},
    tree::{MarkupTree, NodeId, ParsedNode},
    Regexes,
};

/// Headings that mark the end of article content.
pub(crate) const STOP_HEADINGS: [&str; 3] = ["interviews", "related news", "sources"];
/// Link namespaces that point at media rather than articles.
pub(crate) const MEDIA_NAMESPACES: [&str; 6] = ["file", "image", "media", "файл", "картинка", "медия"];

const DATE_FORMAT: &str = "%B %d, %Y";
const PARAGRAPH_BREAK: &str = "\n\n";

/// Text and mentions of one article.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Assembly {
    pub(crate) text: String,
    pub(crate) mentions: Vec<MentionRecord>,
}

enum Step {
    Continue,
    Stop,
}

struct Assembler<'a> {
    tree: &'a MarkupTree,
    regexes: &'a Regexes,
    output: String,
    mentions: Vec<MentionRecord>,
}

/// Walk the top-level nodes once, building the article text and recording a
/// mention for every article link. Right contexts are read from the finished
/// text because whitespace normalization keeps rewriting the buffer.
pub(crate) fn assemble(tree: &MarkupTree, regexes: &Regexes) -> Result<Assembly, WikiMarkupProcessingError> {
    let mut assembler = Assembler {
        tree,
        regexes,
        output: String::new(),
        mentions: vec![],
    };
    for id in tree.roots() {
        if let Step::Stop = assembler.visit(*id)? {
            break;
        }
    }
    Ok(assembler.finish())
}

impl<'a> Assembler<'a> {
    fn visit(&mut self, id: NodeId) -> Result<Step, WikiMarkupProcessingError> {
        let tree = self.tree;
        match tree.node(id) {
            ParsedNode::Template { .. } => self.template(id),
            ParsedNode::Heading => Ok(self.heading(id)),
            ParsedNode::Text(value) => {
                log::trace!("encoding text: [{value}]");
                self.text(value);
                Ok(Step::Continue)
            }
            ParsedNode::InternalLink { target } => {
                self.link(id, target);
                Ok(Step::Continue)
            }
            other => Err(WikiMarkupProcessingError::UnexpectedNode(other.kind())),
        }
    }

    fn template(&mut self, id: NodeId) -> Result<Step, WikiMarkupProcessingError> {
        let name = template_name(self.tree, id).unwrap_or_default();
        match name.as_str() {
            templates::DATE => {
                self.date(id)?;
                Ok(Step::Continue)
            }
            templates::WIKIPEDIA_LINK => {
                let (title, text) = wikipedia_link(self.tree, id)?;
                log::debug!("encoding w: [{title}] as [{text}]");
                self.output.push_str(&text);
                Ok(Step::Continue)
            }
            hys if templates::HAVE_YOUR_SAY.contains(&hys) => Ok(Step::Stop),
            _ => Err(WikiMarkupProcessingError::UnexpectedTemplate(name.clone())),
        }
    }

    fn date(&mut self, id: NodeId) -> Result<(), WikiMarkupProcessingError> {
        let tree = self.tree;
        let parameters = tree.parameters(id);
        let [(_, parameter)] = parameters.as_slice() else {
            return Err(WikiMarkupProcessingError::TemplateArity {
                template: templates::DATE.to_string(),
                expected: 1,
                found: parameters.len(),
            });
        };
        let date = tree.text_of(*parameter).trim().to_string();
        log::debug!("encoding date: [{date}]");

        let preceding = self.output.trim_end();
        if !preceding.is_empty() {
            return Err(WikiMarkupProcessingError::DateNotFirst(preceding.to_string()));
        }
        let weekday = NaiveDate::parse_from_str(&date, DATE_FORMAT)
            .map_err(|e| WikiMarkupProcessingError::InvalidDate(date.clone(), e))?
            .format("%A, ");

        self.output = format!("{weekday}{date}{PARAGRAPH_BREAK}");
        Ok(())
    }

    fn heading(&mut self, id: NodeId) -> Step {
        let title = self.tree.text_of_children(id);
        let title = title.trim();
        if STOP_HEADINGS.contains(&title.to_lowercase().as_str()) {
            log::debug!("heading [{title}] ends the article");
            return Step::Stop;
        }
        log::trace!("encoding heading: [{title}]");
        let output = self.output.trim_end();
        self.output = format!("{output}{PARAGRAPH_BREAK}{title}{PARAGRAPH_BREAK}");
        Step::Continue
    }

    fn text(&mut self, value: &str) {
        self.output.push_str(value);
        let output = self
            .regexes
            .spaces_before_newline
            .replace_all(&self.output, "\n")
            .into_owned();
        self.output = self
            .regexes
            .newlines
            .replace_all(&output, PARAGRAPH_BREAK)
            .into_owned();
    }

    fn link(&mut self, id: NodeId, target: &str) {
        if is_media(target) {
            log::trace!("skipping media link [{target}]");
            return;
        }
        let text = self.tree.text_of_children(id);
        let display = if text.is_empty() { target.to_string() } else { text };
        log::trace!("encoding link: [{target}] as [{display}]");

        let mention = MentionRecord::new(target.to_string(), display.clone(), &self.output, self.regexes);
        self.mentions.push(mention);
        self.output.push_str(&display);
    }

    fn finish(self) -> Assembly {
        let Assembler {
            regexes,
            output,
            mut mentions,
            ..
        } = self;
        let text = format!("{}{PARAGRAPH_BREAK}", output.trim_end());
        for mention in mentions.iter_mut() {
            mention.finalize(&text, regexes);
        }
        Assembly { text, mentions }
    }
}

pub(crate) fn is_media(target: &str) -> bool {
    target
        .split_once(':')
        .map(|(namespace, _)| namespace.trim().to_lowercase())
        .is_some_and(|namespace| MEDIA_NAMESPACES.contains(&namespace.as_str()))
}

#[cfg(test)]
mod tests_assemble {
    use super::*;

    struct Builder {
        tree: MarkupTree,
    }

    impl Builder {
        fn new() -> Self {
            Self {
                tree: MarkupTree::new(),
            }
        }
        fn text(mut self, value: &str) -> Self {
            self.tree.push(ParsedNode::Text(value.into()), None);
            self
        }
        fn link(mut self, target: &str, text: Option<&str>) -> Self {
            let id = self.tree.push(ParsedNode::InternalLink { target: target.into() }, None);
            if let Some(text) = text {
                self.tree.push(ParsedNode::Text(text.into()), Some(id));
            }
            self
        }
        fn heading(mut self, title: &str) -> Self {
            let id = self.tree.push(ParsedNode::Heading, None);
            self.tree.push(ParsedNode::Text(title.into()), Some(id));
            self
        }
        fn template(mut self, name: &str, params: &[(Option<&str>, &str)]) -> Self {
            let id = self.tree.push(ParsedNode::Template { name: name.into() }, None);
            for (param_name, value) in params {
                let param = self.tree.push(
                    ParsedNode::Parameter {
                        name: param_name.map(str::to_string),
                    },
                    Some(id),
                );
                self.tree.push(ParsedNode::Text(value.to_string()), Some(param));
            }
            self
        }
        fn assemble(self) -> Result<Assembly, WikiMarkupProcessingError> {
            assemble(&self.tree, &Regexes::new())
        }
    }

    #[test]
    fn date_opens_the_article_with_weekday() {
        let assembly = Builder::new()
            .text("\n")
            .template("date", &[(None, "January 15, 2018")])
            .text("Sofia hosted the summit.")
            .assemble()
            .unwrap();

        assert_eq!(assembly.text, "Monday, January 15, 2018\n\nSofia hosted the summit.\n\n");
    }

    #[test]
    fn date_after_content_is_rejected() {
        let error = Builder::new()
            .text("Intro")
            .template("date", &[(None, "January 15, 2018")])
            .assemble()
            .unwrap_err();
        assert!(matches!(error, WikiMarkupProcessingError::DateNotFirst(_)));
    }

    #[test]
    fn date_needs_exactly_one_parameter() {
        let error = Builder::new()
            .template("date", &[(None, "January 15"), (None, "2018")])
            .assemble()
            .unwrap_err();
        assert!(matches!(
            error,
            WikiMarkupProcessingError::TemplateArity { found: 2, .. }
        ));

        let error = Builder::new()
            .template("date", &[(None, "15/01/2018")])
            .assemble()
            .unwrap_err();
        assert!(matches!(error, WikiMarkupProcessingError::InvalidDate(..)));
    }

    #[test]
    fn sources_heading_truncates_text_and_mentions() {
        let assembly = Builder::new()
            .text("Sofia is the ")
            .link("Bulgaria", Some("Bulgarian"))
            .text(" capital.")
            .heading(" SOURCES ")
            .text("Reported by ")
            .link("Reuters", None)
            .assemble()
            .unwrap();

        assert_eq!(assembly.text, "Sofia is the Bulgarian capital.\n\n");
        assert_eq!(assembly.mentions.len(), 1);
        assert_eq!(assembly.mentions[0].target_title, "Bulgaria");
    }

    #[test]
    fn other_headings_become_paragraphs() {
        let assembly = Builder::new()
            .text("First part.   ")
            .heading(" History ")
            .text("Second part.")
            .assemble()
            .unwrap();

        assert_eq!(assembly.text, "First part.\n\nHistory\n\nSecond part.\n\n");
    }

    #[test]
    fn media_links_leave_no_trace() {
        let assembly = Builder::new()
            .text("A photo ")
            .link("File:Example.jpg", Some("thumb|A caption"))
            .text("here.")
            .assemble()
            .unwrap();

        assert_eq!(assembly.text, "A photo here.\n\n");
        assert!(assembly.mentions.is_empty());
    }

    #[test]
    fn have_your_say_stops_the_article() {
        let assembly = Builder::new()
            .text("Paragraph text.  \n\n\n")
            .template("hys", &[])
            .text("Ignored.")
            .link("Ignored", None)
            .assemble()
            .unwrap();

        assert_eq!(assembly.text, "Paragraph text.\n\n");
        assert!(assembly.mentions.is_empty());
    }

    #[test]
    fn wikipedia_link_template_appends_display_text() {
        let assembly = Builder::new()
            .text("Talks in ")
            .template("w", &[(None, "Sofia"), (None, "the capital")])
            .text(" and ")
            .template("W", &[(None, "Plovdiv")])
            .text(".")
            .assemble()
            .unwrap();

        assert_eq!(assembly.text, "Talks in the capital and Plovdiv.\n\n");
        assert!(assembly.mentions.is_empty());
    }

    #[test]
    fn unresolved_template_is_fatal() {
        let error = Builder::new()
            .template("cite web", &[])
            .assemble()
            .unwrap_err();
        assert!(matches!(error, WikiMarkupProcessingError::UnexpectedTemplate(name) if name == "cite web"));
    }

    #[test]
    fn leftover_tag_is_fatal() {
        let mut tree = MarkupTree::new();
        tree.push(ParsedNode::Tag { name: "span".into() }, None);
        let error = assemble(&tree, &Regexes::new()).unwrap_err();
        assert!(matches!(error, WikiMarkupProcessingError::UnexpectedNode(_)));
    }

    #[test]
    fn mentions_carry_context_in_order() {
        let assembly = Builder::new()
            .text("The summit in ")
            .link("Sofia", None)
            .text(" was opened by the president of ")
            .link("Bulgaria", None)
            .text(" on a cold and windy Monday morning.")
            .assemble()
            .unwrap();

        let targets: Vec<_> = assembly.mentions.iter().map(|m| m.target_title.as_str()).collect();
        assert_eq!(targets, ["Sofia", "Bulgaria"]);

        let sofia = &assembly.mentions[0];
        assert_eq!(sofia.left_context, ["The", "summit", "in"]);
        assert_eq!(sofia.right_context, ["was", "opened", "by", "the", "president"]);

        let bulgaria = &assembly.mentions[1];
        assert_eq!(bulgaria.left_context, ["opened", "by", "the", "president", "of"]);
        assert_eq!(bulgaria.right_context, ["on", "a", "cold", "and", "windy"]);

        for mention in &assembly.mentions {
            assert!(mention.left_context.len() <= 5);
            assert!(mention.right_context.len() <= 5);
        }
    }

    #[test]
    fn text_normalization_applies_to_whole_buffer() {
        let assembly = Builder::new()
            .text("a  \n")
            .text("\n\n\nb")
            .assemble()
            .unwrap();
        assert_eq!(assembly.text, "a\n\nb\n\n");
    }
}
