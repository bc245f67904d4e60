pub(crate) const BULGARIAN_WIKIPEDIA: &str = "https://bg.wikipedia.org/wiki/";

pub(crate) const SOFIA_SUMMIT_TITLE: &str = "Summit opens in Sofia";
pub(crate) const SOFIA_SUMMIT_URL: &str = "https://bg.wikipedia.org/wiki/Summit_opens_in_Sofia";
pub(crate) const SOFIA_SUMMIT: &str = r#"{{DISPLAYTITLE:Summit opens in ''Sofia''}}
{{date|January 15, 2018}}
Sofia is the [[Bulgaria|Bulgarian]] capital. On Monday the summit opened at the [[National Assembly of Bulgaria|National Assembly]], about {{nowrap|3&nbsp;km}} from the '''old''' town.<ref>{{cite web|url=http://example.org|title=Report}}</ref>

[[File:Sofia skyline.jpg|thumb|A caption about the skyline]]
<!-- editors: check the distance -->
Delegates later travelled {{mi to km|90}} to [[Plovdiv]] for the second ''session'' of talks.

== Sources ==
* Coverage of the summit by [[Reuters]].
"#;

pub(crate) const BROKEN_DATE_TITLE: &str = "Broken date";
pub(crate) const BROKEN_DATE: &str = "Intro text.\n{{date|January 15, 2018}}";

const REDIRECT: &str = "#REDIRECT [[Summit opens in Sofia]]";
const TALK_PAGE: &str = "Discussion of [[Sofia]].";

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn page_xml(id: usize, title: &str, namespace: i32, text: &str) -> String {
    format!(
        r#"  <page>
    <title>{title}</title>
    <ns>{namespace}</ns>
    <id>{id}</id>
    <revision>
      <id>{id}</id>
      <model>wikitext</model>
      <format>text/x-wiki</format>
      <text xml:space="preserve">{text}</text>
    </revision>
  </page>
"#,
        title = escape_xml(title),
        text = escape_xml(text),
    )
}

/// A small dump: two articles, a redirect, a talk page and an empty page.
pub(crate) fn dump_xml() -> String {
    let pages = [
        page_xml(1, SOFIA_SUMMIT_TITLE, 0, SOFIA_SUMMIT),
        page_xml(2, "Sofia summit", 0, REDIRECT),
        page_xml(3, "Беседа:Summit opens in Sofia", 1, TALK_PAGE),
        page_xml(4, BROKEN_DATE_TITLE, 0, BROKEN_DATE),
        page_xml(5, "Empty", 0, ""),
    ];
    format!(
        r#"<mediawiki xmlns="http://www.mediawiki.org/xml/export-0.10/" version="0.10" xml:lang="bg">
{}</mediawiki>
"#,
        pages.concat()
    )
}
