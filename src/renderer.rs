//! Markdown rendering for generated content.
//!
//! Two targets share one parser: styled ratatui lines for the terminal and an
//! HTML document for export. Raw HTML in the model output is never passed
//! through; it is shown as literal text in both targets.

use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const INDIGO: Color = Color::Rgb(129, 140, 248);
const SLATE: Color = Color::Rgb(203, 213, 225);
const CODE: Color = Color::Rgb(209, 154, 102);
const RULE_WIDTH: usize = 40;

fn parser(markdown: &str) -> Parser<'_> {
    Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH)
}

/// Renders Markdown into styled terminal lines.
pub fn render_lines(markdown: &str) -> Vec<Line<'static>> {
    let mut renderer = LineRenderer::default();
    for event in parser(markdown) {
        renderer.handle(event);
    }
    renderer.finish()
}

/// Renders Markdown into HTML with any embedded HTML escaped and unsafe link
/// or image targets replaced by `#`.
pub fn render_html(markdown: &str) -> String {
    let events = parser(markdown).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    });
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

/// Relative targets and `http`, `https` and `mailto` URLs are kept.
fn is_safe_url(url: &str) -> bool {
    let url = url.trim();
    match url.find([':', '/', '?', '#']) {
        Some(idx) if url[idx..].starts_with(':') => {
            let scheme = url[..idx].to_ascii_lowercase();
            matches!(scheme.as_str(), "http" | "https" | "mailto")
        }
        _ => true,
    }
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&url) {
        url
    } else {
        log::warn!("Dropping unsafe link target in HTML export: {}", url);
        CowStr::Borrowed("#")
    }
}

/// Wraps rendered HTML in a standalone page.
pub fn html_document(title: &str, markdown: &str) -> String {
    let mut escaped_title = String::new();
    for c in title.chars() {
        match c {
            '&' => escaped_title.push_str("&amp;"),
            '<' => escaped_title.push_str("&lt;"),
            '>' => escaped_title.push_str("&gt;"),
            '"' => escaped_title.push_str("&quot;"),
            _ => escaped_title.push(c),
        }
    }
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n\
         <style>\nbody{{font-family:sans-serif;max-width:48rem;margin:2rem auto;color:#475569;line-height:1.75}}\n\
         h2{{color:#312e81;border-bottom:1px solid #f1f5f9;padding-bottom:.5rem;margin-top:2.5rem}}\n\
         ul{{list-style:none;padding-left:0}}\nli::before{{content:\"• \";color:#6366f1}}\n\
         strong{{color:#0f172a}}\n\
         blockquote{{border-left:4px solid #6366f1;padding-left:1rem;font-style:italic;background:#f8fafc}}\n\
         </style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escaped_title,
        render_html(markdown)
    )
}

#[derive(Default)]
struct LineRenderer {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    styles: Vec<Style>,
    lists: Vec<Option<u64>>,
    item_prefix: Option<Span<'static>>,
    quote_depth: usize,
    in_code_block: bool,
}

impl LineRenderer {
    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, patch: Style) {
        let next = self.style().patch(patch);
        self.styles.push(next);
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    fn blank(&mut self) {
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn flush(&mut self) {
        if self.spans.is_empty() && self.item_prefix.is_none() {
            return;
        }

        let mut line = Vec::new();
        for _ in 0..self.quote_depth {
            line.push(Span::styled("▎ ", Style::default().fg(INDIGO)));
        }
        if !self.lists.is_empty() {
            line.push(Span::raw("  ".repeat(self.lists.len() - 1)));
            match self.item_prefix.take() {
                Some(prefix) => line.push(prefix),
                None => line.push(Span::raw("  ")),
            }
        }
        line.append(&mut self.spans);
        self.lines.push(Line::from(line));
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(text),
            Event::Code(code) => {
                let style = self.style().fg(CODE);
                self.spans.push(Span::styled(code.into_string(), style));
            }
            Event::Html(raw) => {
                let style = self.style();
                for raw_line in raw.lines() {
                    self.spans.push(Span::styled(raw_line.to_string(), style));
                    self.flush();
                }
            }
            Event::InlineHtml(raw) => self.text(raw),
            Event::SoftBreak => {
                let style = self.style();
                self.spans.push(Span::styled(" ", style));
            }
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.blank();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(RULE_WIDTH),
                    Style::default().fg(Color::DarkGray),
                )));
                self.lines.push(Line::default());
            }
            _ => {}
        }
    }

    fn text(&mut self, text: CowStr<'_>) {
        if self.in_code_block {
            let style = Style::default().fg(CODE);
            for code_line in text.lines() {
                self.spans.push(Span::styled(format!("  {}", code_line), style));
                self.flush();
            }
            return;
        }
        let style = self.style();
        self.spans.push(Span::styled(text.into_string(), style));
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {}
            Tag::HtmlBlock => self.flush(),
            Tag::Heading { level, .. } => {
                self.flush();
                self.blank();
                let style = match level {
                    HeadingLevel::H1 => Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                    HeadingLevel::H2 => Style::default().fg(INDIGO).add_modifier(Modifier::BOLD),
                    _ => Style::default().fg(SLATE).add_modifier(Modifier::BOLD),
                };
                self.push_style(style);
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.quote_depth += 1;
                self.push_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(_) => {
                self.flush();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let prefix = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let prefix = Span::styled(format!("{}. ", n), Style::default().fg(INDIGO));
                        *n += 1;
                        prefix
                    }
                    _ => Span::styled("• ", Style::default().fg(INDIGO)),
                };
                self.item_prefix = Some(prefix);
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { .. } => self.push_style(
                Style::default()
                    .fg(INDIGO)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Heading(level) => {
                self.flush();
                self.pop_style();
                if level == HeadingLevel::H2 {
                    self.lines.push(Line::from(Span::styled(
                        "─".repeat(RULE_WIDTH),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
                self.lines.push(Line::default());
            }
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.pop_style();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank();
            }
            TagEnd::CodeBlock => {
                self.flush();
                self.in_code_block = false;
                self.blank();
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::HtmlBlock => {
                self.flush();
                self.blank();
            }
            TagEnd::Item => self.flush(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link => {
                self.pop_style()
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn texts(markdown: &str) -> Vec<String> {
        render_lines(markdown).iter().map(line_text).collect()
    }

    #[test]
    fn test_heading_and_bullets() {
        let lines = render_lines("## Hook\n- x\n- y");
        let text: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(text[0], "Hook");
        assert_eq!(text[1], "─".repeat(RULE_WIDTH));
        assert_eq!(text[2], "");
        assert_eq!(text[3], "• x");
        assert_eq!(text[4], "• y");

        let heading_style = lines[0].spans[0].style;
        assert_eq!(heading_style.fg, Some(INDIGO));
        assert!(heading_style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_ordered_list_numbers_items() {
        assert_eq!(texts("3. a\n4. b"), vec!["3. a", "4. b"]);
    }

    #[test]
    fn test_strong_is_bold() {
        let lines = render_lines("Say **this** now");
        let strong = lines[0]
            .spans
            .iter()
            .find(|s| s.content == "this")
            .expect("strong span");
        assert!(strong.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(line_text(&lines[0]), "Say this now");
    }

    #[test]
    fn test_blockquote_is_prefixed_and_italic() {
        let lines = render_lines("> Quote me");
        assert_eq!(line_text(&lines[0]), "▎ Quote me");
        assert!(lines[0].spans[1].style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_raw_html_is_literal_text() {
        let text = texts("<script>alert(1)</script>\n\nok");
        assert_eq!(text, vec!["<script>alert(1)</script>", "", "ok"]);
    }

    #[test]
    fn test_html_export_escapes_raw_html() {
        let out = render_html("## Hook\n\n<img src=x onerror=alert(1)>\n\nHi <b>there</b>");
        assert!(out.contains("<h2>Hook</h2>"));
        assert!(!out.contains("<img"));
        assert!(out.contains("&lt;img"));
        assert!(!out.contains("<b>"));
    }

    #[test]
    fn test_html_export_neutralises_script_links() {
        let out = render_html(
            "## Call To Action\n\n[Click me](javascript:alert(document.cookie)) \
             [again](JavaScript:void(0)) ![pixel](data:image/svg+xml;base64,AAAA)",
        );
        assert!(!out.to_lowercase().contains("javascript:"));
        assert!(!out.contains("data:"));
        assert!(out.contains("<a href=\"#\">Click me</a>"));
        assert!(out.contains("<img src=\"#\""));
    }

    #[test]
    fn test_html_export_keeps_web_and_relative_links() {
        let out = render_html(
            "[site](https://example.com/a?b=c) [mail](mailto:hi@example.com) \
             [docs](/guide#setup) [plain](http://example.com)",
        );
        assert!(out.contains("href=\"https://example.com/a?b=c\""));
        assert!(out.contains("href=\"mailto:hi@example.com\""));
        assert!(out.contains("href=\"/guide#setup\""));
        assert!(out.contains("href=\"http://example.com\""));
    }

    #[test]
    fn test_html_document_escapes_title() {
        let doc = html_document("A <b> & C", "- x");
        assert!(doc.contains("<title>A &lt;b&gt; &amp; C</title>"));
        assert!(doc.contains("<li>x</li>"));
    }
}
