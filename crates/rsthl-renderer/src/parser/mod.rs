//! reStructuredText parser.
//!
//! Line-oriented recursive descent: the body parser classifies each
//! unindented line (explicit markup, section title, transition, list item,
//! definition term, paragraph) and recurses into indented blocks with the
//! indentation stripped. Section titles are collected flat and folded into
//! nested [`Section`]s afterwards.

mod block;
mod inline;

use crate::directive::{DirectiveRegistry, RawDirective};
use crate::nodes::{
    DefinitionItem, Document, EnumeratedList, Inline, Level, LiteralBlock, Node, Section,
    SystemMessage, Target, normalize_name,
};
use crate::util::{expand_tabs, slugify};

use block::{
    Adornment, Enumerator, adornment, bullet, dedent, directive_name, enumerator,
    indented_block_end, strip_literal_marker,
};

pub(crate) use inline::parse_inline;

/// Source line with its 1-indexed line number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Line {
    pub number: usize,
    pub text: String,
}

impl Line {
    pub(crate) fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of leading spaces.
    pub(crate) fn indent(&self) -> usize {
        self.text.len() - self.text.trim_start_matches(' ').len()
    }
}

/// Split source text into lines: BOM stripped, tabs expanded, trailing
/// whitespace removed.
fn source_lines(source: &str) -> Vec<Line> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    source
        .lines()
        .enumerate()
        .map(|(i, text)| Line::new(i + 1, expand_tabs(text).trim_end()))
        .collect()
}

/// Parse a document.
///
/// The result is untransformed: titles are not promoted, section ids are
/// unset and references are unresolved. See [`crate::transforms`].
pub fn parse(source: &str, registry: &DirectiveRegistry) -> Document {
    let lines = source_lines(source);
    let mut parser = Parser::new(registry);
    let elements = parser.parse_elements(&lines, true);
    let children = fold_sections(elements);
    tracing::debug!(
        lines = lines.len(),
        messages = parser.messages.len(),
        "Parsed document"
    );
    Document {
        title: None,
        subtitle: None,
        children,
        messages: parser.messages,
    }
}

/// Body element or section title, before sections are folded.
enum Element {
    Node(Node),
    Title {
        level: usize,
        title: Vec<Inline>,
        line: usize,
    },
}

/// Fold flat title markers into nested sections.
fn fold_sections(elements: Vec<Element>) -> Vec<Node> {
    fn close(stack: &mut Vec<Section>, root: &mut Vec<Node>) {
        if let Some(section) = stack.pop() {
            match stack.last_mut() {
                Some(parent) => parent.children.push(Node::Section(section)),
                None => root.push(Node::Section(section)),
            }
        }
    }

    let mut root = Vec::new();
    let mut stack: Vec<Section> = Vec::new();

    for element in elements {
        match element {
            Element::Node(node) => match stack.last_mut() {
                Some(section) => section.children.push(node),
                None => root.push(node),
            },
            Element::Title { level, title, line } => {
                while stack.len() >= level {
                    close(&mut stack, &mut root);
                }
                stack.push(Section {
                    id: String::new(),
                    level,
                    title,
                    line,
                    children: Vec::new(),
                });
            }
        }
    }
    while !stack.is_empty() {
        close(&mut stack, &mut root);
    }

    root
}

/// Body parser state shared across nested blocks.
pub(crate) struct Parser<'r> {
    registry: &'r DirectiveRegistry,
    messages: Vec<SystemMessage>,
    /// Title styles in order of first appearance; index + 1 is the level.
    styles: Vec<Adornment>,
    /// Level of the most recent section title.
    depth: usize,
}

impl<'r> Parser<'r> {
    pub(crate) fn new(registry: &'r DirectiveRegistry) -> Self {
        Self {
            registry,
            messages: Vec::new(),
            styles: Vec::new(),
            depth: 0,
        }
    }

    pub(crate) fn into_messages(self) -> Vec<SystemMessage> {
        self.messages
    }

    /// Parse lines as body elements (no sections).
    pub(crate) fn parse_body(&mut self, lines: &[Line]) -> Vec<Node> {
        self.parse_elements(lines, false)
            .into_iter()
            .filter_map(|element| match element {
                Element::Node(node) => Some(node),
                Element::Title { .. } => None,
            })
            .collect()
    }

    /// Record a message; messages of warning level and above also appear in
    /// the document tree.
    fn report(&mut self, out: &mut Vec<Element>, message: SystemMessage) {
        if message.level >= Level::Warning {
            out.push(Element::Node(Node::SystemMessage(message.clone())));
        }
        self.messages.push(message);
    }

    fn inline(&mut self, text: &str, line: usize, out: &mut Vec<Element>) -> Vec<Inline> {
        let mut messages = Vec::new();
        let inlines = parse_inline(text, line, &mut messages);
        for message in messages {
            self.report(out, message);
        }
        inlines
    }

    fn parse_elements(&mut self, lines: &[Line], sections: bool) -> Vec<Element> {
        let mut out = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = &lines[i];
            if line.is_blank() {
                i += 1;
                continue;
            }

            if line.indent() > 0 {
                i = self.block_quote(lines, i, &mut out);
                continue;
            }

            if line.text == ".." || line.text.starts_with(".. ") {
                i = self.explicit_markup(lines, i, &mut out);
                continue;
            }

            if let Some(next) = self.section_title(lines, i, sections, &mut out) {
                i = next;
                continue;
            }

            if let Some(next) = self.transition(lines, i, &mut out) {
                i = next;
                continue;
            }

            if let Some((marker, _)) = bullet(&line.text) {
                i = self.bullet_list(lines, i, marker, &mut out);
                continue;
            }

            if let Some(first) = enumerator(&line.text) {
                i = self.enumerated_list(lines, i, first, &mut out);
                continue;
            }

            if is_definition_term(lines, i) {
                i = self.definition_list(lines, i, &mut out);
                continue;
            }

            i = self.paragraph(lines, i, &mut out);
        }

        out
    }

    fn block_quote(&mut self, lines: &[Line], start: usize, out: &mut Vec<Element>) -> usize {
        let end = indented_block_end(lines, start);
        let body = dedent(&lines[start..end]);
        let children = self.parse_body(&body);
        out.push(Element::Node(Node::BlockQuote(children)));
        end
    }

    fn explicit_markup(&mut self, lines: &[Line], start: usize, out: &mut Vec<Element>) -> usize {
        let end = indented_block_end(lines, start + 1);
        let first = &lines[start];
        let rest = first.text.get(3..).unwrap_or("").trim();
        let body = dedent(&lines[start + 1..end]);
        let block_text = lines[start..end]
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        if let Some(target) = rest.strip_prefix('_')
            && !target.starts_with('_')
            && let Some(node) = parse_target(target, &body)
        {
            out.push(Element::Node(node));
            return end;
        }

        if let Some((name, argument_text)) = directive_name(rest) {
            let raw = RawDirective {
                name: name.to_owned(),
                argument_text: argument_text.to_owned(),
                lines: body,
                line: first.number,
                block_text,
            };
            let nodes = self.registry.dispatch(&raw, &mut self.messages);
            out.extend(nodes.into_iter().map(Element::Node));
            return end;
        }

        let mut comment = rest.to_owned();
        for line in &body {
            comment.push('\n');
            comment.push_str(&line.text);
        }
        out.push(Element::Node(Node::Comment(comment.trim().to_owned())));
        end
    }

    /// Recognize a section title at `start`, returning the next line index.
    fn section_title(
        &mut self,
        lines: &[Line],
        start: usize,
        sections: bool,
        out: &mut Vec<Element>,
    ) -> Option<usize> {
        let line = &lines[start];
        let (style, title, next) = if let Some(over) = adornment(&line.text)
            && let (Some(text), Some(under)) = (lines.get(start + 1), lines.get(start + 2))
            && !text.is_blank()
            && adornment(&under.text) == Some(over)
        {
            (
                Adornment {
                    ch: over,
                    overline: true,
                },
                text.text.trim().to_owned(),
                start + 3,
            )
        } else if adornment(&line.text).is_none()
            && let Some(under) = lines.get(start + 1)
            && let Some(ch) = adornment(&under.text)
        {
            let width = line.text.chars().count();
            let length = under.text.chars().count();
            if length < width {
                if length < 4 {
                    return None;
                }
                self.report(
                    out,
                    SystemMessage::warning(under.number, "Title underline too short.")
                        .with_literal(format!("{}\n{}", line.text, under.text)),
                );
            }
            (
                Adornment {
                    ch,
                    overline: false,
                },
                line.text.clone(),
                start + 2,
            )
        } else {
            return None;
        };

        if !sections {
            let literal = lines[start..next]
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            self.report(
                out,
                SystemMessage::severe(line.number, "Unexpected section title.").with_literal(literal),
            );
            return Some(next);
        }

        let level = match self.styles.iter().position(|s| *s == style) {
            Some(index) => index + 1,
            None => {
                self.styles.push(style);
                self.styles.len()
            }
        };
        if level > self.depth + 1 {
            self.report(
                out,
                SystemMessage::severe(line.number, "Title level inconsistent:").with_literal(title),
            );
            return Some(next);
        }
        self.depth = level;

        let inlines = self.inline(&title, line.number, out);
        out.push(Element::Title {
            level,
            title: inlines,
            line: line.number,
        });
        Some(next)
    }

    fn transition(&mut self, lines: &[Line], start: usize, out: &mut Vec<Element>) -> Option<usize> {
        let line = &lines[start];
        adornment(&line.text)?;
        if line.text.len() < 4 {
            return None;
        }
        let blank_before = start == 0 || lines[start - 1].is_blank();
        let blank_after = lines.get(start + 1).is_none_or(Line::is_blank);
        if !(blank_before && blank_after) {
            return None;
        }
        out.push(Element::Node(Node::Transition));
        Some(start + 1)
    }

    /// Collect one list item starting at `start` whose body is indented by `width`.
    fn list_item(&mut self, lines: &[Line], start: usize, width: usize) -> (Vec<Node>, usize) {
        let mut end = start + 1;
        while end < lines.len() && (lines[end].is_blank() || lines[end].indent() >= width) {
            end += 1;
        }
        while end > start + 1 && lines[end - 1].is_blank() {
            end -= 1;
        }

        let first = &lines[start];
        let mut body = vec![Line::new(
            first.number,
            first.text.get(width..).unwrap_or("").trim_start(),
        )];
        body.extend(
            lines[start + 1..end]
                .iter()
                .map(|l| Line::new(l.number, l.text.get(width..).unwrap_or(""))),
        );
        (self.parse_body(&body), end)
    }

    fn bullet_list(
        &mut self,
        lines: &[Line],
        start: usize,
        marker: char,
        out: &mut Vec<Element>,
    ) -> usize {
        let mut items = Vec::new();
        let mut i = start;
        loop {
            let width = bullet(&lines[i].text).map_or(2, |(_, w)| w);
            let (item, end) = self.list_item(lines, i, width);
            items.push(item);
            let next = skip_blank(lines, end);
            match lines.get(next) {
                Some(l) if l.indent() == 0 && bullet(&l.text).is_some_and(|(m, _)| m == marker) => {
                    i = next;
                }
                _ => {
                    i = end;
                    break;
                }
            }
        }
        out.push(Element::Node(Node::BulletList(items)));
        i
    }

    fn enumerated_list(
        &mut self,
        lines: &[Line],
        start: usize,
        first: Enumerator,
        out: &mut Vec<Element>,
    ) -> usize {
        let style = first.style;
        let begin = first.ordinal.unwrap_or(1);
        let mut expected = begin;
        let mut items = Vec::new();
        let mut i = start;
        let mut width = first.width;
        loop {
            let (item, end) = self.list_item(lines, i, width);
            items.push(item);
            expected += 1;
            let next = skip_blank(lines, end);
            let continues = lines.get(next).and_then(|l| {
                (l.indent() == 0)
                    .then(|| enumerator(&l.text))
                    .flatten()
                    .filter(|e| {
                        e.format == first.format
                            && (e.ordinal.is_none()
                                || (e.style == style && e.ordinal == Some(expected)))
                    })
            });
            match continues {
                Some(e) => {
                    width = e.width;
                    i = next;
                }
                None => {
                    i = end;
                    break;
                }
            }
        }
        out.push(Element::Node(Node::EnumeratedList(EnumeratedList {
            style,
            start: begin,
            items,
        })));
        i
    }

    fn definition_list(&mut self, lines: &[Line], start: usize, out: &mut Vec<Element>) -> usize {
        let mut items = Vec::new();
        let mut i = start;
        loop {
            let term_line = &lines[i];
            let end = indented_block_end(lines, i + 1);
            let body = dedent(&lines[i + 1..end]);
            let mut messages = Vec::new();
            let term = parse_inline(&term_line.text, term_line.number, &mut messages);
            self.messages.extend(messages);
            let definition = self.parse_body(&body);
            items.push(DefinitionItem { term, definition });

            let next = skip_blank(lines, end);
            if next < lines.len() && is_definition_term(lines, next) {
                i = next;
            } else {
                i = end;
                break;
            }
        }
        out.push(Element::Node(Node::DefinitionList(items)));
        i
    }

    fn paragraph(&mut self, lines: &[Line], start: usize, out: &mut Vec<Element>) -> usize {
        let mut end = start;
        while end < lines.len() && !lines[end].is_blank() && lines[end].indent() == 0 {
            end += 1;
        }
        let text = lines[start..end]
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let (text, literal) = strip_literal_marker(&text);

        if let Some(text) = text {
            let inlines = self.inline(&text, lines[start].number, out);
            out.push(Element::Node(Node::Paragraph(inlines)));
        }

        if literal {
            let next = skip_blank(lines, end);
            if lines.get(next).is_some_and(|l| l.indent() > 0) {
                let block_end = indented_block_end(lines, next);
                let text = dedent(&lines[next..block_end])
                    .iter()
                    .map(|l| l.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n");
                out.push(Element::Node(Node::LiteralBlock(LiteralBlock::plain(text))));
                return block_end;
            }
            let line = lines[end - 1].number + 1;
            self.report(
                out,
                SystemMessage::warning(line, "Literal block expected; none found."),
            );
        } else if lines.get(end).is_some_and(|l| !l.is_blank() && l.indent() > 0) {
            self.report(
                out,
                SystemMessage::error(lines[end].number, "Unexpected indentation."),
            );
        }

        end
    }
}

/// Index of the first non-blank line at or after `start`.
fn skip_blank(lines: &[Line], start: usize) -> usize {
    let mut i = start;
    while i < lines.len() && lines[i].is_blank() {
        i += 1;
    }
    i
}

/// A one-line term immediately followed by an indented definition.
fn is_definition_term(lines: &[Line], i: usize) -> bool {
    let line = &lines[i];
    !line.is_blank()
        && line.indent() == 0
        && lines
            .get(i + 1)
            .is_some_and(|next| !next.is_blank() && next.indent() > 0)
}

/// Parse the text after `.. _` into a target node.
fn parse_target(text: &str, continuation: &[Line]) -> Option<Node> {
    let (name, rest) = if let Some(quoted) = text.strip_prefix('`') {
        let close = quoted.find("`:")?;
        (&quoted[..close], &quoted[close + 2..])
    } else {
        let colon = text
            .char_indices()
            .find(|&(i, c)| {
                c == ':'
                    && !text[..i].ends_with('\\')
                    && text[i + 1..].chars().next().is_none_or(char::is_whitespace)
            })
            .map(|(i, _)| i)?;
        (&text[..colon], &text[colon + 1..])
    };

    let mut uri: String = rest.split_whitespace().collect();
    for line in continuation {
        uri.extend(line.text.split_whitespace());
    }
    let name = normalize_name(&name.replace('\\', ""));
    let id = slugify(&name);

    Some(Node::Target(Target {
        name,
        refuri: (!uri.is_empty()).then_some(uri),
        id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{EnumStyle, RefTarget, Reference, plain_text};
    use pretty_assertions::assert_eq;

    fn parse_str(source: &str) -> Document {
        parse(source, &DirectiveRegistry::new().with_admonitions())
    }

    fn para(text: &str) -> Node {
        Node::Paragraph(vec![Inline::text(text)])
    }

    #[test]
    fn test_paragraphs() {
        let doc = parse_str("First line\nsecond line.\n\nAnother paragraph.\n");
        assert_eq!(
            doc.children,
            vec![para("First line\nsecond line."), para("Another paragraph.")]
        );
        assert!(doc.messages.is_empty());
    }

    #[test]
    fn test_sections_nest_by_style_order() {
        let doc = parse_str(
            "Top\n===\n\nIntro.\n\nChild\n-----\n\nBody.\n\nSibling\n=======\n",
        );
        assert_eq!(doc.children.len(), 2);
        let Node::Section(top) = &doc.children[0] else {
            panic!("expected section");
        };
        assert_eq!(top.level, 1);
        assert_eq!(plain_text(&top.title), "Top");
        assert_eq!(top.children.len(), 2);
        let Node::Section(child) = &top.children[1] else {
            panic!("expected nested section");
        };
        assert_eq!(child.level, 2);
        assert_eq!(child.children, vec![para("Body.")]);
        let Node::Section(sibling) = &doc.children[1] else {
            panic!("expected section");
        };
        assert_eq!(plain_text(&sibling.title), "Sibling");
    }

    #[test]
    fn test_overline_title() {
        let doc = parse_str("=======\n Title\n=======\n\nText.\n");
        let Node::Section(section) = &doc.children[0] else {
            panic!("expected section");
        };
        assert_eq!(plain_text(&section.title), "Title");
    }

    #[test]
    fn test_inconsistent_title_level() {
        let doc = parse_str("A\n=\n\nB\n-\n\nC\n=\n\nD\n~\n");
        let severe: Vec<_> = doc
            .messages
            .iter()
            .filter(|m| m.level == Level::Severe)
            .collect();
        assert_eq!(severe.len(), 1);
        assert_eq!(severe[0].message, "Title level inconsistent:");
        assert_eq!(severe[0].line, 10);
    }

    #[test]
    fn test_short_underline_warns() {
        let doc = parse_str("Long title here\n=====\n");
        assert_eq!(doc.messages[0].message, "Title underline too short.");
        assert!(matches!(doc.children[1], Node::Section(_)));
    }

    #[test]
    fn test_transition() {
        let doc = parse_str("Before.\n\n----------\n\nAfter.\n");
        assert_eq!(doc.children, vec![para("Before."), Node::Transition, para("After.")]);
    }

    #[test]
    fn test_bullet_list() {
        let doc = parse_str("- one\n- two\n  continued\n\n- three\n");
        assert_eq!(
            doc.children,
            vec![Node::BulletList(vec![
                vec![para("one")],
                vec![para("two\ncontinued")],
                vec![para("three")],
            ])]
        );
    }

    #[test]
    fn test_enumerated_list() {
        let doc = parse_str("3. three\n4. four\n\na) alpha\nb) beta\n");
        assert_eq!(
            doc.children,
            vec![
                Node::EnumeratedList(EnumeratedList {
                    style: EnumStyle::Arabic,
                    start: 3,
                    items: vec![vec![para("three")], vec![para("four")]],
                }),
                Node::EnumeratedList(EnumeratedList {
                    style: EnumStyle::LowerAlpha,
                    start: 1,
                    items: vec![vec![para("alpha")], vec![para("beta")]],
                }),
            ]
        );
    }

    #[test]
    fn test_auto_enumerated_list() {
        let doc = parse_str("#. first\n#. second\n");
        let Node::EnumeratedList(list) = &doc.children[0] else {
            panic!("expected enumerated list");
        };
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.start, 1);
    }

    #[test]
    fn test_definition_list() {
        let doc = parse_str("term\n   Definition.\nother\n   More.\n");
        assert_eq!(
            doc.children,
            vec![Node::DefinitionList(vec![
                DefinitionItem {
                    term: vec![Inline::text("term")],
                    definition: vec![para("Definition.")],
                },
                DefinitionItem {
                    term: vec![Inline::text("other")],
                    definition: vec![para("More.")],
                },
            ])]
        );
    }

    #[test]
    fn test_literal_block_forms() {
        let doc = parse_str("Example::\n\n    code\n      indented\n\nAfter.\n");
        assert_eq!(
            doc.children,
            vec![
                para("Example:"),
                Node::LiteralBlock(LiteralBlock::plain("code\n  indented")),
                para("After."),
            ]
        );

        let doc = parse_str("Example ::\n\n    code\n");
        assert_eq!(doc.children[0], para("Example"));

        let doc = parse_str("::\n\n    code\n");
        assert_eq!(
            doc.children,
            vec![Node::LiteralBlock(LiteralBlock::plain("code"))]
        );
    }

    #[test]
    fn test_literal_block_missing() {
        let doc = parse_str("Example::\n\nNot indented.\n");
        assert_eq!(doc.messages[0].message, "Literal block expected; none found.");
        assert_eq!(doc.messages[0].level, Level::Warning);
        assert_eq!(doc.messages[0].line, 2);
    }

    #[test]
    fn test_block_quote() {
        let doc = parse_str("Text.\n\n    Quoted.\n");
        assert_eq!(
            doc.children,
            vec![para("Text."), Node::BlockQuote(vec![para("Quoted.")])]
        );
    }

    #[test]
    fn test_unexpected_indentation() {
        let doc = parse_str("Line one\nline two\n    indented\n");
        assert_eq!(doc.messages[0].message, "Unexpected indentation.");
        assert_eq!(doc.messages[0].line, 3);
    }

    #[test]
    fn test_comment() {
        let doc = parse_str(".. This is a comment\n   spanning lines.\n\nText.\n");
        assert_eq!(
            doc.children,
            vec![
                Node::Comment("This is a comment\nspanning lines.".to_owned()),
                para("Text."),
            ]
        );
    }

    #[test]
    fn test_targets() {
        let doc = parse_str(".. _Python: https://www.python.org/\n.. _`my anchor`:\n");
        assert_eq!(
            doc.children,
            vec![
                Node::Target(Target {
                    name: "python".to_owned(),
                    refuri: Some("https://www.python.org/".to_owned()),
                    id: "python".to_owned(),
                }),
                Node::Target(Target {
                    name: "my anchor".to_owned(),
                    refuri: None,
                    id: "my-anchor".to_owned(),
                }),
            ]
        );
    }

    #[test]
    fn test_admonition_parses_nested_body() {
        let doc = parse_str(".. note:: Remember this.\n\n   - item\n");
        let Node::Admonition(note) = &doc.children[0] else {
            panic!("expected admonition, got {:?}", doc.children);
        };
        assert_eq!(note.kind, "note");
        assert_eq!(
            note.children,
            vec![para("Remember this."), Node::BulletList(vec![vec![para("item")]])]
        );
    }

    #[test]
    fn test_section_in_directive_is_severe() {
        let doc = parse_str(".. note::\n\n   Title\n   =====\n");
        assert!(
            doc.messages
                .iter()
                .any(|m| m.level == Level::Severe && m.message == "Unexpected section title.")
        );
    }

    #[test]
    fn test_unknown_directive() {
        let doc = parse_str(".. frobnicate:: now\n");
        assert_eq!(doc.messages[0].message, "Unknown directive type \"frobnicate\".");
        assert!(matches!(doc.children[0], Node::SystemMessage(_)));
    }

    #[test]
    fn test_inline_markup_in_paragraph() {
        let doc = parse_str("See `docs <https://example.com>`_ and *this*.\n");
        assert_eq!(
            doc.children,
            vec![Node::Paragraph(vec![
                Inline::text("See "),
                Inline::Reference(Reference {
                    text: "docs".to_owned(),
                    target: RefTarget::Uri("https://example.com".to_owned()),
                }),
                Inline::text(" and "),
                Inline::Emphasis("this".to_owned()),
                Inline::text("."),
            ])]
        );
    }

    #[test]
    fn test_tabs_and_bom() {
        let doc = parse_str("\u{feff}Text::\n\n\tcode\n");
        assert_eq!(doc.children[0], para("Text:"));
        assert_eq!(
            doc.children[1],
            Node::LiteralBlock(LiteralBlock::plain("code"))
        );
    }
}
