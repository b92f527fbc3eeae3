//! Lightweight markdown-to-HTML rendering for editorial content.
//!
//! The CMS stores body text either as a constrained markdown dialect or as
//! HTML fragments emitted by its rich-text editor. [`render`] accepts both:
//!
//! - Input containing block-level HTML ([`RenderMode::Passthrough`]) only gets
//!   inline substitutions (emphasis, links) and `>` quote lines converted.
//! - Anything else ([`RenderMode::Markdown`]) goes through the full pipeline:
//!   images, links, headings, rules, quotes, lists, emphasis and paragraphs.
//!
//! Only interpolated `href`/`src`/`alt` values are escaped, and only for
//! double quotes. The output is meant for trusted editorial content and is
//! not a sanitizer.
//!
//! # Example
//!
//! ```
//! use pressroom_markdown::render;
//!
//! let html = render("# Hello\n\n**Bold** text");
//! assert_eq!(html, "<h1>Hello</h1>\n<p><strong>Bold</strong> text</p>");
//! ```

mod blocks;
mod inline;
mod renderer;

pub use inline::escape_attr;
pub use renderer::{RenderMode, detect_mode, render, render_option};
