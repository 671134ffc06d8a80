//! Leading `---` metadata block parsing.
//!
//! Only the `title` key is read. Every other line in the block is ignored.

use std::sync::LazyLock;

use regex::Regex;

static BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A---\n((?s:.*?))\n---\n((?s:.*))\z").expect("frontmatter block pattern is valid")
});
static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^title:\s*(.+)$").expect("title pattern is valid"));

/// A markdown file split into its metadata and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter<'a> {
    pub title: Option<String>,
    pub body: &'a str,
}

/// Split `content` into an optional title and the markdown body.
///
/// Content without a complete leading block is returned whole as the body.
pub fn parse(content: &str) -> Frontmatter<'_> {
    let Some(caps) = BLOCK.captures(content) else {
        return Frontmatter {
            title: None,
            body: content,
        };
    };

    let block = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());

    Frontmatter {
        title: title_from_block(block),
        body,
    }
}

fn title_from_block(block: &str) -> Option<String> {
    let raw = TITLE.captures(block)?.get(1)?.as_str();
    let title: String = raw.chars().filter(|c| !matches!(c, '"' | '\'')).collect();
    let title = title.trim_end();

    (!title.is_empty()).then(|| title.to_string())
}
