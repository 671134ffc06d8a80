use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};
use tracing::warn;

// Initialize syntax highlighting resources once
static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

pub const DEFAULT_SYNTAX_THEME: &str = "base16-ocean.dark";

/// Markdown rendering switches.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Render single newlines inside a paragraph as `<br />`.
    pub line_breaks: bool,
    /// GitHub flavored extensions: tables, strikethrough, task lists, footnotes.
    pub gfm: bool,
    /// syntect theme for fenced code. `None` disables highlighting.
    pub syntax_theme: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_breaks: true,
            gfm: true,
            syntax_theme: Some(DEFAULT_SYNTAX_THEME.to_string()),
        }
    }
}

impl RenderOptions {
    fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES
        } else {
            Options::empty()
        }
    }

    fn theme(&self) -> Option<&'static Theme> {
        let name = self.syntax_theme.as_deref()?;
        match THEME_SET.themes.get(name) {
            Some(theme) => Some(theme),
            None => {
                warn!(theme = name, "unknown syntax theme, using default");
                THEME_SET.themes.get(DEFAULT_SYNTAX_THEME)
            }
        }
    }
}

/// Render a markdown body to HTML.
///
/// Raw HTML in the source is passed through untouched. Content is expected
/// to come from the site's own maintainers.
pub fn render_markdown(content: &str, options: &RenderOptions) -> String {
    let parser = Parser::new_ext(content, options.parser_options());
    let theme = options.theme();

    let events: Vec<Event> = parser.collect();
    let mut processed_events = Vec::with_capacity(events.len());
    let mut i = 0;

    while i < events.len() {
        match &events[i] {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang))) => {
                // Collect all text events until the end of the code block
                let mut code_content = String::new();
                i += 1;

                while i < events.len() {
                    match &events[i] {
                        Event::End(TagEnd::CodeBlock) => break,
                        Event::Text(text) => code_content.push_str(text),
                        _ => {}
                    }
                    i += 1;
                }

                let highlighted = highlight_code(&code_content, lang, theme);
                processed_events.push(Event::Html(highlighted.into()));
            }
            Event::SoftBreak if options.line_breaks => processed_events.push(Event::HardBreak),
            event => processed_events.push(event.clone()),
        }
        i += 1;
    }

    let mut out = String::new();
    html::push_html(&mut out, processed_events.into_iter());
    out
}

fn highlight_code(code: &str, info: &str, theme: Option<&Theme>) -> String {
    let lang = info
        .split(|c: char| c.is_whitespace() || c == ',')
        .next()
        .unwrap_or_default();

    let highlighted = theme.zip(find_syntax(lang)).and_then(|(theme, syntax)| {
        highlighted_html_for_string(code, &SYNTAX_SET, syntax, theme).ok()
    });

    highlighted.unwrap_or_else(|| plain_code_block(code, lang))
}

fn find_syntax(lang: &str) -> Option<&'static SyntaxReference> {
    if lang.is_empty() {
        return None;
    }

    SYNTAX_SET.find_syntax_by_token(lang).or_else(|| {
        // Fallback mappings for languages the default set lacks
        match lang {
            "ts" | "tsx" | "typescript" | "jsx" => SYNTAX_SET.find_syntax_by_name("JavaScript"),
            "toml" => SYNTAX_SET.find_syntax_by_name("YAML"),
            "csharp" | "cs" => SYNTAX_SET.find_syntax_by_name("C#"),
            _ => None,
        }
    })
}

fn plain_code_block(code: &str, lang: &str) -> String {
    if lang.is_empty() {
        format!("<pre><code>{}</code></pre>\n", html_escape::encode_text(code))
    } else {
        format!(
            "<pre><code class=\"language-{}\">{}</code></pre>\n",
            html_escape::encode_double_quoted_attribute(lang),
            html_escape::encode_text(code)
        )
    }
}
