//! Blog Markdown rendering
//!
//! A deliberately small, line-oriented dialect: every input line becomes at
//! most one HTML element. Headings and list items are emitted as escaped
//! text; paragraph lines get inline rewriting for bold, italic and links
//! and are emitted as-is, since post content is trusted admin input.
//!
//! ```
//! use galin_site::services::markdown::MarkdownRenderer;
//!
//! let html = MarkdownRenderer::new().render("# Hello\n\nSome **bold** text.");
//! assert_eq!(html, "<h1>Hello</h1>\n<p>Some <strong>bold</strong> text.</p>");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s").expect("valid regex"));
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("valid regex"));
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("valid regex"));

/// One rendered line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(u8, String),
    ListItem(String),
    /// Already-rewritten inline HTML
    Paragraph(String),
}

impl Block {
    pub fn to_html(&self) -> String {
        match self {
            Block::Heading(level, text) => format!("<h{level}>{}</h{level}>", escape_html(text)),
            Block::ListItem(text) => format!("<li>{}</li>", escape_html(text)),
            Block::Paragraph(html) => format!("<p>{html}</p>"),
        }
    }
}

/// Line-oriented Markdown renderer for blog posts
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render `content` to HTML, one element per non-empty line
    pub fn render(&self, content: &str) -> String {
        self.blocks(content)
            .iter()
            .map(Block::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Classify each line; empty lines produce no block
    pub fn blocks(&self, content: &str) -> Vec<Block> {
        content
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter_map(render_line)
            .collect()
    }
}

fn render_line(line: &str) -> Option<Block> {
    if let Some(text) = line.strip_prefix("# ") {
        return Some(Block::Heading(1, text.to_string()));
    }
    if let Some(text) = line.strip_prefix("## ") {
        return Some(Block::Heading(2, text.to_string()));
    }
    if let Some(text) = line.strip_prefix("### ") {
        return Some(Block::Heading(3, text.to_string()));
    }
    if let Some(text) = line.strip_prefix("- ") {
        return Some(Block::ListItem(text.to_string()));
    }
    if ORDERED_ITEM.is_match(line) {
        let text = match line.find(' ') {
            Some(pos) => &line[pos + 1..],
            None => line,
        };
        return Some(Block::ListItem(text.to_string()));
    }
    if line.is_empty() {
        return None;
    }
    Some(Block::Paragraph(render_inline(line)))
}

/// Bold, then italic, then links
pub fn render_inline(text: &str) -> String {
    let text = BOLD.replace_all(text, "<strong>$1</strong>");
    let text = ITALIC.replace_all(&text, "<em>$1</em>");
    LINK.replace_all(&text, r#"<a href="$2">$1</a>"#).into_owned()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn render(s: &str) -> String {
        MarkdownRenderer::new().render(s)
    }

    #[test]
    fn test_headings() {
        assert_eq!(render("# One"), "<h1>One</h1>");
        assert_eq!(render("## Two"), "<h2>Two</h2>");
        assert_eq!(render("### Three"), "<h3>Three</h3>");
        assert_eq!(render("#### Four"), "<p>#### Four</p>");
    }

    #[test]
    fn test_list_items() {
        assert_eq!(render("- apples"), "<li>apples</li>");
        assert_eq!(render("12. Pick a topic"), "<li>Pick a topic</li>");
        assert_eq!(render("3.no space"), "<p>3.no space</p>");
    }

    #[test]
    fn test_inline_rewrites() {
        assert_eq!(
            render("Be **bold** and *brave*"),
            "<p>Be <strong>bold</strong> and <em>brave</em></p>"
        );
        assert_eq!(
            render("See [our team](/about/team) today"),
            r#"<p>See <a href="/about/team">our team</a> today</p>"#
        );
    }

    #[test]
    fn test_links_are_non_greedy() {
        assert_eq!(
            render_inline("[a](1) and [b](2)"),
            r#"<a href="1">a</a> and <a href="2">b</a>"#
        );
    }

    #[test]
    fn test_empty_lines_dropped_and_crlf() {
        assert_eq!(render("# T\r\n\r\nbody\r\n"), "<h1>T</h1>\n<p>body</p>");
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_heading_text_is_escaped() {
        assert_eq!(render("# A <b> & C"), "<h1>A &lt;b&gt; &amp; C</h1>");
    }

    proptest! {
        #[test]
        fn property_one_block_per_non_empty_line(lines in prop::collection::vec("[a-z #*-]{0,12}", 0..20)) {
            let content = lines.join("\n");
            let expected = lines.iter().filter(|l| !l.is_empty()).count();
            prop_assert_eq!(MarkdownRenderer::new().blocks(&content).len(), expected);
        }

        #[test]
        fn property_plain_text_becomes_paragraph(text in "[A-Za-z][A-Za-z ,.]{0,40}") {
            prop_assert_eq!(render(&text), format!("<p>{}</p>", text));
        }
    }
}
