//! Inline substitutions: images, links and emphasis.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `![alt](url)`
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());

/// `[label](url)`
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());

/// Escape double quotes for use inside a double-quoted attribute value.
///
/// `<`, `>` and `&` are left untouched.
///
/// # Examples
///
/// ```
/// use pressroom_markdown::escape_attr;
///
/// assert_eq!(escape_attr(r#"say "hi""#), "say &quot;hi&quot;");
/// assert_eq!(escape_attr("a < b"), "a < b");
/// ```
pub fn escape_attr(value: &str) -> Cow<'_, str> {
    if value.contains('"') {
        Cow::Owned(value.replace('"', "&quot;"))
    } else {
        Cow::Borrowed(value)
    }
}

/// Replace `![alt](url)` with `<img>` tags.
pub(crate) fn images(text: &str) -> Cow<'_, str> {
    IMAGE_RE.replace_all(text, |caps: &Captures| {
        format!(
            r#"<img src="{}" alt="{}" />"#,
            escape_attr(caps[2].trim()),
            escape_attr(&caps[1])
        )
    })
}

/// Replace `[label](url)` with anchors opening in a new tab.
pub(crate) fn links(text: &str) -> Cow<'_, str> {
    LINK_RE.replace_all(text, |caps: &Captures| {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape_attr(caps[2].trim()),
            &caps[1]
        )
    })
}

/// Apply bold, then italic.
///
/// Neither pattern is nesting-aware: `*a **b** c*` is not rendered as
/// italic text containing bold.
pub(crate) fn emphasis(text: &str) -> String {
    let bold = BOLD_RE.replace_all(text, "<strong>$1</strong>");
    ITALIC_RE.replace_all(&bold, "<em>$1</em>").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_attr_borrows_without_quotes() {
        assert!(matches!(escape_attr("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_image_basic() {
        assert_eq!(
            images("![Cover](https://cdn.example.com/a.png)"),
            r#"<img src="https://cdn.example.com/a.png" alt="Cover" />"#
        );
    }

    #[test]
    fn test_image_empty_alt() {
        assert_eq!(images("![](/a.png)"), r#"<img src="/a.png" alt="" />"#);
    }

    #[test]
    fn test_image_escapes_quotes_in_alt_and_src() {
        assert_eq!(
            images(r#"![the "best"](/a"b.png)"#),
            r#"<img src="/a&quot;b.png" alt="the &quot;best&quot;" />"#
        );
    }

    #[test]
    fn test_link_basic() {
        assert_eq!(
            links("see [docs](https://example.com)"),
            r#"see <a href="https://example.com" target="_blank" rel="noopener noreferrer">docs</a>"#
        );
    }

    #[test]
    fn test_link_label_is_not_escaped() {
        let html = links(r#"[say "hi"](/x)"#);
        assert!(html.contains(r#">say "hi"</a>"#));
    }

    #[test]
    fn test_link_requires_label() {
        assert_eq!(links("[](/x)"), "[](/x)");
    }

    #[test]
    fn test_image_inside_link() {
        let with_images = images("[![logo](/l.png)](/home)");
        let html = links(&with_images);
        assert_eq!(
            html,
            r#"<a href="/home" target="_blank" rel="noopener noreferrer"><img src="/l.png" alt="logo" /></a>"#
        );
    }

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(
            emphasis("**bold** and *italic*"),
            "<strong>bold</strong> and <em>italic</em>"
        );
    }

    #[test]
    fn test_emphasis_is_minimal() {
        assert_eq!(emphasis("*a* *b*"), "<em>a</em> <em>b</em>");
    }

    #[test]
    fn test_emphasis_does_not_cross_lines() {
        assert_eq!(emphasis("*a\nb*"), "*a\nb*");
    }

    #[test]
    fn test_nested_emphasis() {
        assert_eq!(
            emphasis("*a **b** c*"),
            "<em>a <strong>b</strong> c</em>"
        );
        assert_eq!(
            emphasis("**a *b* c**"),
            "<strong>a <em>b</em> c</strong>"
        );
    }

    #[test]
    fn test_triple_markers_produce_misnested_tags() {
        assert_eq!(emphasis("***x***"), "<strong><em>x</strong></em>");
    }

    #[test]
    fn test_unmatched_marker_left_alone() {
        assert_eq!(emphasis("5 * 3"), "5 * 3");
    }
}
