//! Block-level transforms: headings, rules, quotes, lists and paragraphs.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#+)[ \t]+(.+?)[ \t]*$").unwrap());

static RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(?:-{3,}|\*{3,}|_{3,})[ \t]*$").unwrap());

static UNORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*[-*][ \t]+(.*)$").unwrap());

static ORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*\d+[.)][ \t]+(.*)$").unwrap());

static BLANK_LINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());

/// Blocks starting with one of these tags are not wrapped in `<p>`.
static BLOCK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^<(?:h[1-6]|p|ul|ol|li|blockquote|hr|img)\b").unwrap()
});

/// Convert `#` lines to `<h1>`..`<h6>`. More than six `#` still yields `<h6>`.
pub(crate) fn headings(text: &str) -> Cow<'_, str> {
    HEADING_RE.replace_all(text, |caps: &Captures| {
        let level = caps[1].len().min(6);
        format!("<h{level}>{}</h{level}>", &caps[2])
    })
}

pub(crate) fn horizontal_rules(text: &str) -> Cow<'_, str> {
    RULE_RE.replace_all(text, "<hr />")
}

/// Merge runs of `>` lines into `<blockquote>` and runs of list items into
/// `<ul>`/`<ol>`. Other lines are kept as-is.
pub(crate) fn scan_blocks(text: &str) -> String {
    scan(text, true)
}

/// Merge runs of `>` lines into `<blockquote>`, leaving everything else alone.
pub(crate) fn merge_quotes(text: &str) -> String {
    scan(text, false)
}

fn scan(text: &str, with_lists: bool) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut cursor = 0;

    while cursor < lines.len() {
        let (quoted, next) = take_run(&lines, cursor, quote_body);
        if !quoted.is_empty() {
            out.push(format!("<blockquote>{}</blockquote>", quoted.join("\n")));
            cursor = next;
            continue;
        }

        if with_lists {
            let (items, next) = take_run(&lines, cursor, unordered_item);
            if !items.is_empty() {
                out.push(list("ul", &items));
                cursor = next;
                continue;
            }

            let (items, next) = take_run(&lines, cursor, ordered_item);
            if !items.is_empty() {
                out.push(list("ol", &items));
                cursor = next;
                continue;
            }
        }

        out.push(lines[cursor].to_owned());
        cursor += 1;
    }

    out.join("\n")
}

/// Collect consecutive lines accepted by `matcher`, starting at `start`.
///
/// Returns the extracted bodies and the index of the first rejected line.
fn take_run<'a>(
    lines: &[&'a str],
    start: usize,
    matcher: fn(&'a str) -> Option<&'a str>,
) -> (Vec<&'a str>, usize) {
    let bodies: Vec<&'a str> = lines[start..].iter().copied().map_while(matcher).collect();
    let next = start + bodies.len();
    (bodies, next)
}

fn quote_body(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches([' ', '\t']).strip_prefix('>')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

fn unordered_item(line: &str) -> Option<&str> {
    item_body(&UNORDERED_ITEM_RE, line)
}

fn ordered_item(line: &str) -> Option<&str> {
    item_body(&ORDERED_ITEM_RE, line)
}

fn item_body<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line)
        .map(|caps| caps.get(1).map_or("", |m| m.as_str()))
}

fn list(tag: &str, items: &[&str]) -> String {
    let mut out = format!("<{tag}>");
    for item in items {
        out.push_str("<li>");
        out.push_str(item);
        out.push_str("</li>");
    }
    out.push_str(&format!("</{tag}>"));
    out
}

/// Split on blank lines and wrap every block that is not already a block
/// element in `<p>`, turning single newlines into `<br />`.
pub(crate) fn wrap_paragraphs(text: &str) -> String {
    BLANK_LINES_RE
        .split(text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            if BLOCK_TAG_RE.is_match(block) {
                block.to_owned()
            } else {
                format!("<p>{}</p>", block.replace('\n', "<br />"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
