//! Mode selection and the two rendering pipelines.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::{blocks, inline};

/// Opening block-level tag left behind by the rich-text editor.
static BLOCK_HTML_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(?:p|div|h[1-6]|ul|ol|li)\b[^>]*>").unwrap());

/// How [`render`] treats its input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Input already contains block-level HTML; only inline syntax and
    /// `>` quote lines are converted.
    Passthrough,
    /// Input is plain markdown and goes through the full block pipeline.
    Markdown,
}

/// Decide which pipeline [`render`] will use for `input`.
///
/// # Examples
///
/// ```
/// use pressroom_markdown::{RenderMode, detect_mode};
///
/// assert_eq!(detect_mode("<p>Hi</p>"), RenderMode::Passthrough);
/// assert_eq!(detect_mode("<DIV class=\"x\">Hi</DIV>"), RenderMode::Passthrough);
/// assert_eq!(detect_mode("**Hi**"), RenderMode::Markdown);
/// ```
pub fn detect_mode(input: &str) -> RenderMode {
    if BLOCK_HTML_RE.is_match(input) {
        RenderMode::Passthrough
    } else {
        RenderMode::Markdown
    }
}

/// Render editorial markdown (or editor-produced HTML) to HTML.
///
/// Empty input yields an empty string. Unrecognized syntax is kept as
/// literal text inside paragraphs.
pub fn render(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let text = normalize_newlines(input);
    match detect_mode(&text) {
        RenderMode::Passthrough => render_passthrough(&text),
        RenderMode::Markdown => render_markdown(&text),
    }
}

/// [`render`] for optional CMS fields. `None` yields an empty string.
pub fn render_option(input: Option<&str>) -> String {
    input.map(render).unwrap_or_default()
}

fn normalize_newlines(input: &str) -> Cow<'_, str> {
    if input.contains('\r') {
        Cow::Owned(input.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(input)
    }
}

fn render_passthrough(text: &str) -> String {
    let html = inline::emphasis(text);
    let html = inline::links(&html);

    if text.to_ascii_lowercase().contains("<blockquote") {
        html.into_owned()
    } else {
        blocks::merge_quotes(&html)
    }
}

fn render_markdown(text: &str) -> String {
    // Each step relies on the output shape of the previous one.
    let html = inline::images(text);
    let html = inline::links(&html);
    let html = blocks::headings(&html);
    let html = blocks::horizontal_rules(&html);
    let html = blocks::scan_blocks(&html);
    let html = inline::emphasis(&html);
    blocks::wrap_paragraphs(&html)
}
