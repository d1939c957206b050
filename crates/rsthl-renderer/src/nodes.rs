//! Document tree produced by the parser and consumed by the HTML writer.
//!
//! The tree is deliberately small: block [`Node`]s own their children, and
//! inline content is a flat list of [`Inline`]s since reStructuredText inline
//! markup does not nest.

use std::fmt;

/// A parsed document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    /// Document title promoted from a lone top-level section.
    pub title: Option<Title>,
    /// Document subtitle promoted from a lone second-level section.
    pub subtitle: Option<Title>,
    /// Top-level body elements.
    pub children: Vec<Node>,
    /// Every system message reported while processing the document.
    pub messages: Vec<SystemMessage>,
}

impl Document {
    /// Plain-text title, if one was promoted.
    #[must_use]
    pub fn title_text(&self) -> Option<String> {
        self.title.as_ref().map(|t| plain_text(&t.inlines))
    }

    /// Messages at or above the given level.
    pub fn messages_at_least(&self, level: Level) -> impl Iterator<Item = &SystemMessage> {
        self.messages.iter().filter(move |m| m.level >= level)
    }
}

/// Document title or subtitle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Title {
    /// Anchor id carried over from the promoted section.
    pub id: String,
    /// Title content.
    pub inlines: Vec<Inline>,
}

/// Block-level element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Section(Section),
    Paragraph(Vec<Inline>),
    BulletList(Vec<Vec<Node>>),
    EnumeratedList(EnumeratedList),
    DefinitionList(Vec<DefinitionItem>),
    LiteralBlock(LiteralBlock),
    BlockQuote(Vec<Node>),
    Admonition(Admonition),
    /// Comment text, rendered as an HTML comment.
    Comment(String),
    Target(Target),
    Transition,
    SystemMessage(SystemMessage),
}

/// Section with its title and body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    /// Unique anchor id, assigned by the ids transform.
    pub id: String,
    /// Nesting depth, starting at 1 for top-level sections.
    pub level: usize,
    pub title: Vec<Inline>,
    /// Source line of the title (1-indexed).
    pub line: usize,
    pub children: Vec<Node>,
}

impl Section {
    /// Reference name of the section title (implicit hyperlink target).
    #[must_use]
    pub fn refname(&self) -> String {
        normalize_name(&plain_text(&self.title))
    }
}

/// Enumeration style of an ordered list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnumStyle {
    Arabic,
    LowerAlpha,
    UpperAlpha,
}

impl EnumStyle {
    /// CSS class used by the HTML writer.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Arabic => "arabic",
            Self::LowerAlpha => "loweralpha",
            Self::UpperAlpha => "upperalpha",
        }
    }
}

/// Ordered list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumeratedList {
    pub style: EnumStyle,
    /// Ordinal of the first item.
    pub start: usize,
    pub items: Vec<Vec<Node>>,
}

/// Term and definition pair of a definition list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefinitionItem {
    pub term: Vec<Inline>,
    pub definition: Vec<Node>,
}

/// Preformatted block.
///
/// Code blocks are literal blocks whose children are classified spans.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LiteralBlock {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub children: Vec<Inline>,
}

impl LiteralBlock {
    /// Unclassified literal block holding `text`.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            id: None,
            classes: Vec::new(),
            children: vec![Inline::Text(text.into())],
        }
    }
}

/// Admonition such as `note` or `warning`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Admonition {
    /// Directive name, used as CSS class.
    pub kind: String,
    /// Displayed title (e.g., "Note").
    pub title: String,
    pub children: Vec<Node>,
}

/// Explicit hyperlink target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    /// Normalized reference name.
    pub name: String,
    /// External URI, or `None` for an internal target.
    pub refuri: Option<String>,
    /// Anchor id for internal targets.
    pub id: String,
}

/// Inline element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Emphasis(String),
    Strong(String),
    Literal(String),
    TitleReference(String),
    Reference(Reference),
    /// Text wrapped in a `<span>` carrying CSS classes.
    Span { classes: Vec<String>, text: String },
    /// Markup that could not be processed; rendered verbatim and flagged.
    Problematic(String),
}

impl Inline {
    /// Text node.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Span from a space-separated class string.
    ///
    /// An empty class gives a span without classes, written as bare text.
    #[must_use]
    pub fn span(class: &str, text: impl Into<String>) -> Self {
        Self::Span {
            classes: class.split_whitespace().map(str::to_owned).collect(),
            text: text.into(),
        }
    }

    /// Text content without markup.
    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(s)
            | Self::Emphasis(s)
            | Self::Strong(s)
            | Self::Literal(s)
            | Self::TitleReference(s)
            | Self::Problematic(s) => s,
            Self::Reference(r) => &r.text,
            Self::Span { text, .. } => text,
        }
    }
}

/// Hyperlink reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    /// Link text.
    pub text: String,
    pub target: RefTarget,
}

/// Where a reference points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefTarget {
    /// External URI.
    Uri(String),
    /// Anchor id inside the document.
    Internal(String),
    /// Reference name not yet resolved.
    Name(String),
}

/// Concatenated text of inline content.
#[must_use]
pub fn plain_text(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::as_text).collect()
}

/// Normalize a reference name: lowercase with collapsed whitespace.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Severity of a system message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Info = 1,
    Warning = 2,
    Error = 3,
    Severe = 4,
}

impl Level {
    /// Upper-case level name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Severe => "SEVERE",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name(), *self as u8)
    }
}

/// Diagnostic produced while processing a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemMessage {
    pub level: Level,
    /// Source line (1-indexed), or 0 when the position is unknown.
    pub line: usize,
    pub message: String,
    /// Offending source text, when useful for display.
    pub literal: Option<String>,
}

impl SystemMessage {
    #[must_use]
    pub fn new(level: Level, line: usize, message: impl Into<String>) -> Self {
        Self {
            level,
            line,
            message: message.into(),
            literal: None,
        }
    }

    #[must_use]
    pub fn info(line: usize, message: impl Into<String>) -> Self {
        Self::new(Level::Info, line, message)
    }

    #[must_use]
    pub fn warning(line: usize, message: impl Into<String>) -> Self {
        Self::new(Level::Warning, line, message)
    }

    #[must_use]
    pub fn error(line: usize, message: impl Into<String>) -> Self {
        Self::new(Level::Error, line, message)
    }

    #[must_use]
    pub fn severe(line: usize, message: impl Into<String>) -> Self {
        Self::new(Level::Severe, line, message)
    }

    /// Attach the offending source text.
    #[must_use]
    pub fn with_literal(mut self, literal: impl Into<String>) -> Self {
        self.literal = Some(literal.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_with_empty_class_keeps_node() {
        assert_eq!(
            Inline::span("", "x = 1"),
            Inline::Span {
                classes: Vec::new(),
                text: "x = 1".to_owned(),
            }
        );
        assert_eq!(Inline::span("", "x = 1").as_text(), "x = 1");
    }

    #[test]
    fn test_span_splits_long_class_names() {
        assert_eq!(
            Inline::span("keyword namespace", "import"),
            Inline::Span {
                classes: vec!["keyword".to_owned(), "namespace".to_owned()],
                text: "import".to_owned(),
            }
        );
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Python   Docs "), "python docs");
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Warning.to_string(), "WARNING/2");
        assert_eq!(Level::Severe.to_string(), "SEVERE/4");
        assert!(Level::Error > Level::Warning);
    }

    #[test]
    fn test_plain_text() {
        let inlines = vec![
            Inline::text("See "),
            Inline::Strong("this".to_owned()),
            Inline::Literal(" code".to_owned()),
        ];
        assert_eq!(plain_text(&inlines), "See this code");
    }
}
