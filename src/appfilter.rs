//! Appfilter manifest parsing.
//!
//! An appfilter is a flat XML document whose interesting content is a list of
//! self-closing `<item component=".." drawable=".." name=".."/>` elements.
//! Only those elements are extracted; everything else (calendar entries,
//! scale hints, comments) is ignored. Attributes are kept optional here so
//! that incomplete records surface as a [`MalformedRecord`] error when the
//! snapshot is built instead of being silently dropped.
//!
//! [`MalformedRecord`]: crate::error::ReleaseError::MalformedRecord

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

/// A raw `<item>` element as it appeared in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppfilterItem {
    /// 1-based line on which the element starts
    pub line: usize,
    pub component: Option<String>,
    pub drawable: Option<String>,
    pub name: Option<String>,
    /// The element text, used in error messages
    pub raw: String,
}

fn item_regex() -> &'static Regex {
    static ITEM_RE: OnceLock<Regex> = OnceLock::new();
    // Quoted values may legally contain '>', so they are consumed whole.
    ITEM_RE.get_or_init(|| {
        Regex::new(r#"<item\b((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
            .expect("appfilter item regex should compile")
    })
}

fn attribute_regex() -> &'static Regex {
    static ATTRIBUTE_RE: OnceLock<Regex> = OnceLock::new();
    ATTRIBUTE_RE.get_or_init(|| {
        Regex::new(r#"([A-Za-z_][\w:.-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("appfilter attribute regex should compile")
    })
}

fn comment_regex() -> &'static Regex {
    static COMMENT_RE: OnceLock<Regex> = OnceLock::new();
    COMMENT_RE
        .get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("xml comment regex should compile"))
}

/// Extracts every `<item>` element from an appfilter document.
///
/// Items are returned in document order. Items inside XML comments are
/// skipped.
pub fn parse_appfilter(xml: &str) -> Vec<AppfilterItem> {
    let comments: Vec<Range<usize>> = comment_regex()
        .find_iter(xml)
        .map(|m| m.range())
        .collect();

    let mut items = Vec::new();
    let mut line = 1;
    let mut scanned = 0;

    for captures in item_regex().captures_iter(xml) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        if comments.iter().any(|range| range.contains(&whole.start())) {
            continue;
        }

        line += xml[scanned..whole.start()].matches('\n').count();
        scanned = whole.start();

        let mut item = AppfilterItem {
            line,
            component: None,
            drawable: None,
            name: None,
            raw: whole.as_str().to_string(),
        };

        for attribute in attribute_regex().captures_iter(&captures[1]) {
            let value = attribute
                .get(2)
                .or_else(|| attribute.get(3))
                .map(|m| unescape(m.as_str()));
            match &attribute[1] {
                "component" => item.component = value,
                "drawable" => item.drawable = value,
                "name" => item.name = value,
                _ => {}
            }
        }

        items.push(item);
    }

    items
}

/// Resolves the five predefined XML entities.
fn unescape(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }

    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
