//! HTML writer.
//!
//! Produces XHTML in the layout of the docutils `html4css1` writer: sections
//! are `<div class="section">` wrappers, simple lists are compacted and
//! system messages are rendered where they occur.

use std::fmt::Write;

use crate::nodes::{Document, Inline, Level, Node, RefTarget, SystemMessage};
use crate::util::escape_html;

/// Built-in page skeleton, in template syntax.
pub const DEFAULT_TEMPLATE: &str = "\
<?xml version=\"1.0\" encoding=\"utf-8\" ?>
<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">
<html xmlns=\"http://www.w3.org/1999/xhtml\" xml:lang=\"%(language)s\" lang=\"%(language)s\">
<head>
<meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\" />
%(generator)s<title>%(title)s</title>
%(stylesheet)s</head>
<body>
%(body)s</body>
</html>
";

/// Template error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("Unknown template placeholder: %({0})s")]
    UnknownPlaceholder(String),
    #[error("Unterminated template placeholder at byte {0}")]
    Unterminated(usize),
}

/// Stylesheet reference in the page head.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stylesheet {
    /// Linked by URL: `<link rel="stylesheet">`.
    Link(String),
    /// CSS text inlined in a `<style>` element.
    Embedded(String),
}

/// Writer settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlSettings {
    pub stylesheets: Vec<Stylesheet>,
    /// Page template; `None` uses [`DEFAULT_TEMPLATE`].
    pub template: Option<String>,
    /// Overrides the `<title>` text.
    pub title: Option<String>,
    /// Heading level of top-level sections (1-6).
    pub initial_header_level: u8,
    pub language: String,
    /// Lowest level of system messages rendered into the body; `None`
    /// renders none.
    pub report_level: Option<Level>,
    /// Content of the generator meta tag.
    pub generator: String,
}

impl Default for HtmlSettings {
    fn default() -> Self {
        Self {
            stylesheets: Vec::new(),
            template: None,
            title: None,
            initial_header_level: 2,
            language: "en".to_owned(),
            report_level: Some(Level::Warning),
            generator: concat!("rsthl ", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

/// Rendered document fragments, usable as template placeholders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HtmlParts {
    /// Escaped plain-text title for `<title>`.
    pub title: String,
    /// Title heading (`<h1 class="title">`), empty without a title.
    pub html_title: String,
    /// `<link>` and `<style>` elements.
    pub stylesheet: String,
    /// The `<div class="document">` element.
    pub body: String,
    /// Generator meta tag.
    pub generator: String,
    pub language: String,
}

impl HtmlParts {
    /// Look up a part by placeholder name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        Some(match name {
            "title" => &self.title,
            "html_title" => &self.html_title,
            "stylesheet" => &self.stylesheet,
            "body" => &self.body,
            "generator" => &self.generator,
            "language" => &self.language,
            _ => return None,
        })
    }

    /// Fill a template with these parts.
    ///
    /// `%(name)s` is replaced by the named part and `%%` by a literal `%`.
    /// Any other `%` is copied through.
    pub fn fill(&self, template: &str) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(template.len() + self.body.len());
        let mut rest = template;
        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            if let Some(tail) = after.strip_prefix('%') {
                out.push('%');
                rest = tail;
            } else if let Some(inner) = after.strip_prefix('(') {
                let offset = template.len() - rest.len() + pos;
                let close = inner.find(")s").ok_or(TemplateError::Unterminated(offset))?;
                let name = &inner[..close];
                let value = self
                    .get(name)
                    .ok_or_else(|| TemplateError::UnknownPlaceholder(name.to_owned()))?;
                out.push_str(value);
                rest = &inner[close + 2..];
            } else {
                out.push('%');
                rest = after;
            }
        }
        out.push_str(rest);
        Ok(out)
    }
}

/// Serializes documents to HTML.
pub struct HtmlWriter<'a> {
    settings: &'a HtmlSettings,
}

impl<'a> HtmlWriter<'a> {
    #[must_use]
    pub fn new(settings: &'a HtmlSettings) -> Self {
        Self { settings }
    }

    /// Render the document into parts.
    #[must_use]
    pub fn parts(&self, document: &Document) -> HtmlParts {
        let title_text = self
            .settings
            .title
            .clone()
            .or_else(|| document.title_text())
            .unwrap_or_default();

        let mut html_title = String::new();
        if let Some(title) = &document.title {
            html_title.push_str("<h1 class=\"title\">");
            self.inlines(&mut html_title, &title.inlines);
            html_title.push_str("</h1>\n");
        }

        let mut body = String::with_capacity(4096);
        match &document.title {
            Some(title) => {
                let _ = writeln!(body, "<div class=\"document\" id=\"{}\">", escape_html(&title.id));
            }
            None => body.push_str("<div class=\"document\">\n"),
        }
        body.push_str(&html_title);
        if let Some(subtitle) = &document.subtitle {
            let _ = write!(
                body,
                "<h2 class=\"subtitle\" id=\"{}\">",
                escape_html(&subtitle.id)
            );
            self.inlines(&mut body, &subtitle.inlines);
            body.push_str("</h2>\n");
        }
        self.nodes(&mut body, &document.children, 1);
        body.push_str("</div>\n");

        HtmlParts {
            title: escape_html(&title_text),
            html_title,
            stylesheet: self.stylesheets(),
            body,
            generator: format!(
                "<meta name=\"generator\" content=\"{}\" />\n",
                escape_html(&self.settings.generator)
            ),
            language: escape_html(&self.settings.language),
        }
    }

    /// Render a complete page through the configured template.
    pub fn page(&self, document: &Document) -> Result<String, TemplateError> {
        let template = self.settings.template.as_deref().unwrap_or(DEFAULT_TEMPLATE);
        self.parts(document).fill(template)
    }

    fn stylesheets(&self) -> String {
        let mut out = String::new();
        for stylesheet in &self.settings.stylesheets {
            match stylesheet {
                Stylesheet::Link(href) => {
                    let _ = writeln!(
                        out,
                        "<link rel=\"stylesheet\" href=\"{}\" type=\"text/css\" />",
                        escape_html(href)
                    );
                }
                Stylesheet::Embedded(css) => {
                    out.push_str("<style type=\"text/css\">\n");
                    out.push_str(css.trim_end());
                    out.push_str("\n</style>\n");
                }
            }
        }
        out
    }

    fn heading_level(&self, depth: usize) -> usize {
        (usize::from(self.settings.initial_header_level) + depth - 1).min(6)
    }

    fn nodes(&self, out: &mut String, nodes: &[Node], depth: usize) {
        for node in nodes {
            self.node(out, node, depth);
        }
    }

    fn node(&self, out: &mut String, node: &Node, depth: usize) {
        match node {
            Node::Section(section) => {
                let level = self.heading_level(depth);
                let _ = writeln!(
                    out,
                    "<div class=\"section\" id=\"{}\">",
                    escape_html(&section.id)
                );
                let _ = write!(out, "<h{level}>");
                self.inlines(out, &section.title);
                let _ = writeln!(out, "</h{level}>");
                self.nodes(out, &section.children, depth + 1);
                out.push_str("</div>\n");
            }
            Node::Paragraph(inlines) => {
                out.push_str("<p>");
                self.inlines(out, inlines);
                out.push_str("</p>\n");
            }
            Node::BulletList(items) => {
                let simple = is_simple(items);
                out.push_str(if simple { "<ul class=\"simple\">\n" } else { "<ul>\n" });
                self.list_items(out, items, simple, depth);
                out.push_str("</ul>\n");
            }
            Node::EnumeratedList(list) => {
                let simple = is_simple(&list.items);
                let _ = write!(
                    out,
                    "<ol class=\"{}{}\"",
                    list.style.class(),
                    if simple { " simple" } else { "" }
                );
                if list.start != 1 {
                    let _ = write!(out, " start=\"{}\"", list.start);
                }
                out.push_str(">\n");
                self.list_items(out, &list.items, simple, depth);
                out.push_str("</ol>\n");
            }
            Node::DefinitionList(items) => {
                out.push_str("<dl class=\"docutils\">\n");
                for item in items {
                    out.push_str("<dt>");
                    self.inlines(out, &item.term);
                    out.push_str("</dt>\n<dd>");
                    self.nodes(out, &item.definition, depth);
                    out.push_str("</dd>\n");
                }
                out.push_str("</dl>\n");
            }
            Node::LiteralBlock(block) => {
                out.push_str("<pre class=\"literal-block");
                for class in &block.classes {
                    out.push(' ');
                    out.push_str(&escape_html(class));
                }
                out.push('"');
                if let Some(id) = &block.id {
                    let _ = write!(out, " id=\"{}\"", escape_html(id));
                }
                out.push('>');
                self.inlines(out, &block.children);
                out.push_str("</pre>\n");
            }
            Node::BlockQuote(children) => {
                out.push_str("<blockquote>\n");
                self.nodes(out, children, depth);
                out.push_str("</blockquote>\n");
            }
            Node::Admonition(admonition) => {
                let _ = writeln!(
                    out,
                    "<div class=\"admonition {}\">\n<p class=\"admonition-title\">{}</p>",
                    escape_html(&admonition.kind),
                    escape_html(&admonition.title)
                );
                self.nodes(out, &admonition.children, depth);
                out.push_str("</div>\n");
            }
            Node::Comment(text) => {
                let _ = writeln!(out, "<!-- {} -->", text.replace("--", "- -"));
            }
            Node::Target(target) => {
                if target.refuri.is_none() {
                    let _ = writeln!(
                        out,
                        "<span class=\"target\" id=\"{}\"></span>",
                        escape_html(&target.id)
                    );
                }
            }
            Node::Transition => out.push_str("<hr class=\"docutils\" />\n"),
            Node::SystemMessage(message) => self.system_message(out, message),
        }
    }

    fn list_items(&self, out: &mut String, items: &[Vec<Node>], simple: bool, depth: usize) {
        for item in items {
            out.push_str("<li>");
            match (simple, item.as_slice()) {
                (true, [Node::Paragraph(inlines)]) => self.inlines(out, inlines),
                _ => self.nodes(out, item, depth),
            }
            out.push_str("</li>\n");
        }
    }

    fn system_message(&self, out: &mut String, message: &SystemMessage) {
        if self.settings.report_level.is_none_or(|level| message.level < level) {
            return;
        }
        out.push_str("<div class=\"system-message\">\n");
        let _ = write!(
            out,
            "<p class=\"system-message-title\">System Message: {}",
            message.level
        );
        if message.line > 0 {
            let _ = write!(out, " (line {})", message.line);
        }
        out.push_str("</p>\n");
        let _ = writeln!(out, "<p>{}</p>", escape_html(&message.message));
        if let Some(literal) = &message.literal {
            let _ = writeln!(out, "<pre class=\"literal-block\">{}</pre>", escape_html(literal));
        }
        out.push_str("</div>\n");
    }

    fn inlines(&self, out: &mut String, inlines: &[Inline]) {
        for inline in inlines {
            match inline {
                Inline::Text(text) => out.push_str(&escape_html(text)),
                Inline::Emphasis(text) => {
                    let _ = write!(out, "<em>{}</em>", escape_html(text));
                }
                Inline::Strong(text) => {
                    let _ = write!(out, "<strong>{}</strong>", escape_html(text));
                }
                Inline::Literal(text) => {
                    let _ = write!(out, "<code class=\"docutils literal\">{}</code>", escape_html(text));
                }
                Inline::TitleReference(text) => {
                    let _ = write!(out, "<cite>{}</cite>", escape_html(text));
                }
                Inline::Reference(reference) => match &reference.target {
                    RefTarget::Uri(uri) => {
                        let _ = write!(
                            out,
                            "<a class=\"reference external\" href=\"{}\">{}</a>",
                            escape_html(uri),
                            escape_html(&reference.text)
                        );
                    }
                    RefTarget::Internal(id) => {
                        let _ = write!(
                            out,
                            "<a class=\"reference internal\" href=\"#{}\">{}</a>",
                            escape_html(id),
                            escape_html(&reference.text)
                        );
                    }
                    RefTarget::Name(_) => out.push_str(&escape_html(&reference.text)),
                },
                Inline::Span { classes, text } if classes.is_empty() => {
                    out.push_str(&escape_html(text));
                }
                Inline::Span { classes, text } => {
                    let _ = write!(
                        out,
                        "<span class=\"{}\">{}</span>",
                        escape_html(&classes.join(" ")),
                        escape_html(text)
                    );
                }
                Inline::Problematic(text) => {
                    let _ = write!(out, "<span class=\"problematic\">{}</span>", escape_html(text));
                }
            }
        }
    }
}

/// A list is simple when every item is empty or a single paragraph.
fn is_simple(items: &[Vec<Node>]) -> bool {
    items
        .iter()
        .all(|item| matches!(item.as_slice(), [] | [Node::Paragraph(_)]))
}
