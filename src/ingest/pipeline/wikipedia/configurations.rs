use parse_wiki_text::ConfigurationSource;

// Bulgarian Wikipedia, with the English aliases the site also accepts.
pub(crate) const WIKIPEDIA_CONFIGURATION: &ConfigurationSource<'static> = &ConfigurationSource {
    category_namespaces: &["category", "категория"],
    extension_tags: &[
        "categorytree",
        "ce",
        "charinsert",
        "chem",
        "gallery",
        "graph",
        "hiero",
        "imagemap",
        "indicator",
        "inputbox",
        "mapframe",
        "maplink",
        "math",
        "nowiki",
        "poem",
        "pre",
        "ref",
        "references",
        "score",
        "section",
        "source",
        "syntaxhighlight",
        "templatedata",
        "templatestyles",
        "timeline",
    ],
    file_namespaces: &["file", "image", "файл", "картинка"],
    link_trail: "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyzабвгдежзийклмнопрстуфхцчшщъьюя",
    magic_words: &[
        "DISAMBIG",
        "EXPECTUNUSEDCATEGORY",
        "FORCETOC",
        "HIDDENCAT",
        "INDEX",
        "NEWSECTIONLINK",
        "NOCC",
        "NOCOLLABORATIONHUBTOC",
        "NOCONTENTCONVERT",
        "NOEDITSECTION",
        "NOGALLERY",
        "NOGLOBAL",
        "NOINDEX",
        "NONEWSECTIONLINK",
        "NOTC",
        "NOTITLECONVERT",
        "NOTOC",
        "STATICREDIRECT",
        "TOC",
    ],
    protocols: &[
        "//",
        "bitcoin:",
        "ftp://",
        "ftps://",
        "geo:",
        "git://",
        "gopher://",
        "http://",
        "https://",
        "irc://",
        "ircs://",
        "magnet:",
        "mailto:",
        "mms://",
        "news:",
        "nntp://",
        "redis://",
        "sftp://",
        "sip:",
        "sips:",
        "sms:",
        "ssh://",
        "svn://",
        "tel:",
        "telnet://",
        "urn:",
        "worldwind://",
        "xmpp:",
    ],
    redirect_magic_words: &["REDIRECT"],
};
