//! Text sanitization policies for attribute values.
//!
//! Values typed by merchants or scraped from supplier feeds are cleaned
//! before they are put into a payload. Each field picks one of four
//! [`TextPolicy`] variants; rich text fields pick theirs through
//! [`rich_text_policy`] from the configuration's `html_enabled` flag.
//!
//! HTML entities are always decoded before cleaning, so text that arrives
//! escaped (`&lt;b&gt;`) is judged by the same rules as raw markup.
//!
//! # Example
//!
//! ```rust
//! use prestashop_mapper::sanitize::{sanitize, TextPolicy};
//!
//! assert_eq!(sanitize("<p>Red {wine}</p>", TextPolicy::Plain), "Red wine");
//! assert_eq!(
//!     sanitize("<b>bold</b><script>x()</script>", TextPolicy::Restricted),
//!     "<b>bold</b>"
//! );
//! ```

use std::collections::{HashMap, HashSet};

use ammonia::{Builder, UrlRelative};

/// Characters removed from plain text after markup is stripped.
pub const PLAIN_TEXT_FORBIDDEN: &[char] = &['<', '>', ';', '=', '#', '{', '}'];

const RESTRICTED_TAGS: &[&str] = &["b", "em", "i", "strong", "u"];

const RELAXED_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdo", "blockquote", "br", "caption", "cite", "code", "col", "colgroup",
    "dd", "del", "dfn", "dl", "dt", "em", "figcaption", "figure", "h1", "h2", "h3", "h4", "h5",
    "h6", "hgroup", "i", "img", "ins", "kbd", "li", "mark", "ol", "p", "pre", "q", "rp", "rt",
    "ruby", "s", "samp", "small", "strike", "strong", "sub", "sup", "table", "tbody", "td",
    "tfoot", "th", "thead", "time", "tr", "u", "ul", "var", "wbr",
];

const RELAXED_TAG_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["href"]),
    ("blockquote", &["cite"]),
    ("col", &["span", "width"]),
    ("colgroup", &["span", "width"]),
    ("del", &["cite", "datetime"]),
    ("img", &["align", "alt", "height", "src", "width"]),
    ("ins", &["cite", "datetime"]),
    ("ol", &["start", "reversed", "type"]),
    ("q", &["cite"]),
    ("table", &["summary", "width"]),
    ("td", &["abbr", "axis", "colspan", "rowspan", "width"]),
    ("th", &["abbr", "axis", "colspan", "rowspan", "scope", "width"]),
    ("time", &["datetime", "pubdate"]),
    ("ul", &["type"]),
];

const GENERIC_ATTRIBUTES: &[&str] = &["dir", "lang", "title"];

const URL_SCHEMES: &[&str] = &["ftp", "http", "https", "mailto"];

/// A named HTML cleaning policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextPolicy {
    /// No markup at all; also drops `< > ; = # { }`.
    Plain,
    /// Minimal inline formatting (`b`, `em`, `i`, `strong`, `u`).
    Restricted,
    /// Broad formatting: headings, lists, tables, links and images. No embeds.
    Relaxed,
    /// [`Relaxed`](Self::Relaxed) plus `iframe` elements with a `src`.
    Iframed,
}

impl TextPolicy {
    /// Returns the policy name as used in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Restricted => "restricted",
            Self::Relaxed => "relaxed",
            Self::Iframed => "iframed",
        }
    }

    fn builder(self) -> Builder<'static> {
        let mut builder = Builder::empty();
        builder
            .clean_content_tags(HashSet::from(["script", "style"]))
            .link_rel(None);

        match self {
            Self::Plain => {}
            Self::Restricted => {
                builder.tags(RESTRICTED_TAGS.iter().copied().collect());
            }
            Self::Relaxed | Self::Iframed => {
                let mut tags: HashSet<&'static str> = RELAXED_TAGS.iter().copied().collect();
                let mut tag_attributes: HashMap<&'static str, HashSet<&'static str>> =
                    RELAXED_TAG_ATTRIBUTES
                        .iter()
                        .map(|(tag, attributes)| (*tag, attributes.iter().copied().collect()))
                        .collect();

                if self == Self::Iframed {
                    tags.insert("iframe");
                    tag_attributes.insert("iframe", HashSet::from(["src"]));
                }

                builder
                    .tags(tags)
                    .tag_attributes(tag_attributes)
                    .generic_attributes(GENERIC_ATTRIBUTES.iter().copied().collect())
                    .url_schemes(URL_SCHEMES.iter().copied().collect())
                    .url_relative(UrlRelative::PassThrough);
            }
        }

        builder
    }
}

/// Picks the policy for rich text fields.
///
/// Frames are only allowed when the shop owner enabled HTML content.
#[must_use]
pub const fn rich_text_policy(html_enabled: bool) -> TextPolicy {
    if html_enabled {
        TextPolicy::Iframed
    } else {
        TextPolicy::Relaxed
    }
}

/// Decodes HTML entities (`&amp;`, `&lt;`, `&#39;`, ...).
#[must_use]
pub fn unescape(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

/// Decodes entities until nothing is left to decode, so `&amp;lt;` ends up
/// as `<` rather than `&lt;`.
fn unescape_fully(input: &str) -> String {
    let mut current = unescape(input);
    loop {
        let decoded = unescape(&current);
        if decoded == current {
            return current;
        }
        current = decoded;
    }
}

/// Cleans `input` according to `policy`.
///
/// Entities are decoded repeatedly before cleaning, so markup hidden behind
/// several layers of escaping is cleaned like raw markup. Applying the same
/// policy twice gives the same result as applying it once.
#[must_use]
pub fn sanitize(input: &str, policy: TextPolicy) -> String {
    let unescaped = unescape_fully(input);
    let cleaned = policy.builder().clean(&unescaped).to_string();

    match policy {
        TextPolicy::Plain => {
            // Markup is gone; turn the serializer's escapes back into text.
            let mut text = unescape_fully(&cleaned);
            text.retain(|c| !PLAIN_TEXT_FORBIDDEN.contains(&c));
            text
        }
        _ => cleaned,
    }
}

/// Returns at most the first `chars` characters of `input`.
#[must_use]
pub fn truncate(input: &str, chars: usize) -> String {
    input.chars().take(chars).collect()
}
