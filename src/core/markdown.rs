//! Markdown to HTML conversion for export
//!
//! Raw inline and block HTML in the source is escaped to text instead of
//! passed through, so exported pages carry only markup produced by the
//! renderer itself.

use pulldown_cmark::{html::push_html, Event, Options, Parser};

fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Convert markdown to an HTML fragment
pub fn to_html(text: &str) -> String {
    let parser = Parser::new_ext(text, options());
    let events = parser.map(|event| match event {
        // Neutralize author-supplied HTML; push_html escapes text events
        Event::Html(html) => Event::Text(html),
        Event::InlineHtml(html) => Event::Text(html),
        other => other,
    });

    let mut out = String::new();
    push_html(&mut out, events);
    out
}

/// Wrap a converted fragment into a standalone HTML page
pub fn export_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        body
    )
}

/// Filesystem-safe name for an exported document
pub fn slug(name: &str) -> String {
    let re = regex_lite::Regex::new(r"[^A-Za-z0-9]+").unwrap();
    let slug = re
        .replace_all(name, "-")
        .trim_matches('-')
        .to_lowercase();
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_emphasis() {
        let html = to_html("# Title\n\nsome *emphasis*");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn test_extensions_enabled() {
        let html = to_html("~~gone~~\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_raw_html_is_neutralized() {
        let html = to_html("before <script>alert(1)</script> after");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_raw_block_html_is_neutralized() {
        let html = to_html("<div onclick=\"x()\">\nhi\n</div>\n");
        assert!(!html.contains("<div"));
    }

    #[test]
    fn test_export_page_escapes_title() {
        let page = export_page("a <b> & c", "<p>hi</p>\n");
        assert!(page.contains("<title>a &lt;b&gt; &amp; c</title>"));
        assert!(page.contains("<p>hi</p>"));
        assert!(page.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("My First Note!"), "my-first-note");
        assert_eq!(slug("  ---  "), "untitled");
        assert_eq!(slug("Notes 2024/01"), "notes-2024-01");
    }
}
