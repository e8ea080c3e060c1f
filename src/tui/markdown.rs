//! Markdown → ratatui `Text` renderer for backend answers.
//!
//! Walks `pulldown_cmark` events and emits styled `Line`/`Span` values.
//! Covers what RAG answers actually contain: paragraphs, headings, emphasis,
//! inline code, fenced code blocks (highlighted via syntect), lists, and
//! links. Tables and images are skipped.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const CODE_BAR: &str = "▍";

/// Parse markdown into styled `Text` with the given base foreground color.
///
/// Returns owned text (`'static`) so callers aren't constrained by input lifetime.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let parser = Parser::new_ext(content, Options::ENABLE_STRIKETHROUGH);
    let mut renderer = Renderer::new(base_fg);
    for event in parser {
        renderer.handle(event);
    }
    renderer.text
}

struct Renderer {
    text: Text<'static>,
    base_fg: Color,
    /// Inline style stack; styles compose via `patch` so nested bold+italic works.
    styles: Vec<Style>,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    lists: Vec<Option<u64>>,
    /// Active syntect highlighter while inside a fenced block with a known language.
    highlighter: Option<HighlightLines<'static>>,
    /// Inside a code block with no usable language token.
    plain_code: bool,
    /// Pending link URL, emitted after the link text closes.
    link_url: Option<String>,
    /// Separate the next block from the previous one with a blank line.
    pending_blank: bool,
}

impl Renderer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            styles: vec![],
            lists: vec![],
            highlighter: None,
            plain_code: false,
            link_url: None,
            pending_blank: false,
        }
    }

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn start_block(&mut self) {
        if self.pending_blank {
            self.text.lines.push(Line::default());
            self.pending_blank = false;
        }
    }

    fn append_span(&mut self, span: Span<'static>) {
        match self.text.lines.last_mut() {
            Some(line) => line.push_span(span),
            None => self.text.lines.push(Line::from(vec![span])),
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.emit_text(t),
            Event::Code(c) => self.append_span(Span::styled(
                format!("`{c}`"),
                self.style().fg(Color::Yellow),
            )),
            Event::SoftBreak => self.append_span(Span::raw(" ")),
            Event::HardBreak => self.text.lines.push(Line::default()),
            Event::Rule => {
                self.start_block();
                self.text.lines.push(Line::from(Span::styled(
                    "─".repeat(32),
                    Style::default().fg(Color::DarkGray),
                )));
                self.pending_blank = true;
            }
            _ => {} // HTML, footnotes, math — skip
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.start_block();
                self.text.lines.push(Line::default());
            }
            Tag::Heading { level, .. } => {
                self.start_block();
                let style = heading_style(level);
                self.text.lines.push(Line::from(Span::styled(
                    format!("{} ", "#".repeat(heading_depth(level))),
                    style,
                )));
                self.push_style(style);
            }
            Tag::BlockQuote(_) => {
                self.start_block();
                self.push_style(
                    Style::default()
                        .fg(self.base_fg)
                        .add_modifier(Modifier::DIM | Modifier::ITALIC),
                );
            }
            Tag::CodeBlock(kind) => {
                self.start_block();
                let lang = match &kind {
                    CodeBlockKind::Fenced(l) => l.as_ref(),
                    CodeBlockKind::Indented => "",
                };
                if !lang.is_empty() {
                    self.text.lines.push(Line::from(Span::styled(
                        format!("{CODE_BAR}{lang}"),
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::BOLD),
                    )));
                    if let Some(syn) = SYNTAX_SET.find_syntax_by_token(lang) {
                        let theme = &THEME_SET.themes["base16-ocean.dark"];
                        self.highlighter = Some(HighlightLines::new(syn, theme));
                    }
                }
                if self.highlighter.is_none() {
                    self.plain_code = true;
                }
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.start_block();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.text.lines.push(Line::default());
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let m = format!("{indent}{n}. ");
                        *n += 1;
                        m
                    }
                    _ => format!("{indent}- "),
                };
                self.append_span(Span::styled(marker, Style::default().fg(Color::DarkGray)));
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {} // Tables, images, definitions — skip
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.pending_blank = true,
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.pending_blank = true;
            }
            TagEnd::BlockQuote(_) => {
                self.styles.pop();
                self.pending_blank = true;
            }
            TagEnd::CodeBlock => {
                self.highlighter = None;
                self.plain_code = false;
                self.pending_blank = true;
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.pending_blank = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::Link => {
                self.styles.pop();
                if let Some(url) = self.link_url.take() {
                    self.append_span(Span::styled(
                        format!(" ({url})"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            _ => {}
        }
    }

    fn emit_text(&mut self, cow: CowStr<'_>) {
        // Tabs render zero-width in ratatui
        let text = cow.replace('\t', "    ");

        if let Some(mut hl) = self.highlighter.take() {
            for line in LinesWithEndings::from(&text) {
                let mut spans = vec![Span::styled(
                    CODE_BAR,
                    Style::default().fg(Color::DarkGray),
                )];
                if let Ok(ranges) = hl.highlight_line(line, &SYNTAX_SET) {
                    for (hl_style, frag) in ranges {
                        let content = frag.trim_end_matches('\n');
                        if content.is_empty() {
                            continue;
                        }
                        let fg = Color::Rgb(
                            hl_style.foreground.r,
                            hl_style.foreground.g,
                            hl_style.foreground.b,
                        );
                        spans.push(Span::styled(
                            content.to_string(),
                            Style::default().fg(fg),
                        ));
                    }
                }
                self.text.lines.push(Line::from(spans));
            }
            self.highlighter = Some(hl);
            return;
        }

        if self.plain_code {
            for line in text.lines() {
                self.text.lines.push(Line::from(vec![
                    Span::styled(CODE_BAR, Style::default().fg(Color::DarkGray)),
                    Span::styled(line.to_string(), Style::default().fg(Color::Gray)),
                ]));
            }
            return;
        }

        self.append_span(Span::styled(text.to_string(), self.style()));
    }
}

fn heading_depth(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn heading_style(level: HeadingLevel) -> Style {
    let base = Style::default().add_modifier(Modifier::BOLD);
    match level {
        HeadingLevel::H1 => base.fg(Color::Magenta),
        HeadingLevel::H2 => base.fg(Color::Blue),
        _ => base.fg(Color::Cyan),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_plain_paragraph() {
        let text = render("just an answer", Color::White);
        assert_eq!(plain(&text), vec!["just an answer"]);
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        let text = render("first\n\nsecond", Color::White);
        assert_eq!(plain(&text), vec!["first", "", "second"]);
    }

    #[test]
    fn test_heading_prefix() {
        let text = render("## Sources", Color::White);
        assert_eq!(plain(&text), vec!["## Sources"]);
    }

    #[test]
    fn test_unordered_list_markers() {
        let text = render("- one\n- two", Color::White);
        assert_eq!(plain(&text), vec!["- one", "- two"]);
    }

    #[test]
    fn test_ordered_list_increments() {
        let text = render("1. a\n2. b\n3. c", Color::White);
        assert_eq!(plain(&text), vec!["1. a", "2. b", "3. c"]);
    }

    #[test]
    fn test_inline_code_is_backticked() {
        let text = render("call `upload` first", Color::White);
        assert_eq!(plain(&text), vec!["call `upload` first"]);
    }

    #[test]
    fn test_fenced_code_block_lines_carry_bar() {
        let text = render("```\nlet x = 1;\n```", Color::White);
        let lines = plain(&text);
        assert_eq!(lines, vec![format!("{CODE_BAR}let x = 1;")]);
    }

    #[test]
    fn test_link_appends_url() {
        let text = render("[docs](https://example.com)", Color::White);
        assert_eq!(plain(&text), vec!["docs (https://example.com)"]);
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        let text = render("", Color::White);
        assert!(text.lines.is_empty());
    }
}
