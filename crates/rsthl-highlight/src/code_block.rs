//! The `code-block` directive.

use rsthl_renderer::directive::{
    ArgumentSpec, ContentSpec, Directive, DirectiveCall, DirectiveContext, DirectiveError,
};
use rsthl_renderer::{Inline, LiteralBlock, Node, normalize_name, slugify};

use crate::highlighter::Highlighter;
use crate::token::ClassifiedToken;

/// Class of line number spans.
const LINE_NUMBER_CLASS: &str = "ln";

/// Directive rendering its content as a highlighted literal block.
///
/// ```text
/// .. code-block:: python
///    :number-lines: 10
///
///    import os
/// ```
pub struct CodeBlockDirective {
    highlighter: Highlighter,
}

impl CodeBlockDirective {
    #[must_use]
    pub fn new(highlighter: Highlighter) -> Self {
        Self { highlighter }
    }
}

impl Directive for CodeBlockDirective {
    fn name(&self) -> &'static str {
        "code-block"
    }

    fn aliases(&self) -> &[&'static str] {
        &["code", "sourcecode"]
    }

    fn arguments(&self) -> ArgumentSpec {
        ArgumentSpec::new(1, 0, true)
    }

    fn options(&self) -> &[&'static str] {
        &["number-lines", "class", "name"]
    }

    fn content(&self) -> ContentSpec {
        ContentSpec::Required
    }

    fn run(
        &self,
        call: &DirectiveCall,
        _ctx: &mut DirectiveContext<'_>,
    ) -> Result<Vec<Node>, DirectiveError> {
        let language = call.arguments[0].as_str();
        let line_count = call.content.len();
        let first_line = call
            .option("number-lines")
            .map(|value| first_line_number(value, line_count))
            .transpose()?;

        let mut classes = vec!["code-block".to_owned(), language.to_owned()];
        if let Some(value) = call.option("class") {
            classes.extend(class_names(value)?);
        }
        let id = call
            .option("name")
            .map(|name| slugify(&normalize_name(name)))
            .filter(|id| !id.is_empty());

        let code = call.content_text();
        let tokens = self.highlighter.classify(language, &code);
        let children = match first_line {
            Some(start) => number_lines(tokens, start, line_count),
            None => tokens.map(|t| Inline::span(t.class, t.text)).collect(),
        };

        tracing::trace!(language, line = call.line, spans = children.len(), "Rendered code block");
        Ok(vec![Node::LiteralBlock(LiteralBlock {
            id,
            classes,
            children,
        })])
    }
}

/// First line number from a `:number-lines:` value; empty means 1.
///
/// The numbers of all `line_count` lines must fit in a `usize`.
fn first_line_number(value: &str, line_count: usize) -> Result<usize, DirectiveError> {
    let invalid = |reason: String| DirectiveError::InvalidOptionValue {
        name: "number-lines".to_owned(),
        value: value.to_owned(),
        reason,
    };
    if value.is_empty() {
        return Ok(1);
    }
    let start: usize = value
        .parse()
        .map_err(|err: std::num::ParseIntError| invalid(err.to_string()))?;
    if start.checked_add(line_count).is_none() {
        return Err(invalid(format!(
            "line numbers from {start} over {line_count} lines are out of range"
        )));
    }
    Ok(start)
}

/// CSS classes from a `:class:` value.
fn class_names(value: &str) -> Result<Vec<String>, DirectiveError> {
    value
        .split_whitespace()
        .map(|name| {
            let class = slugify(name);
            if class.is_empty() {
                Err(DirectiveError::InvalidOptionValue {
                    name: "class".to_owned(),
                    value: value.to_owned(),
                    reason: format!("cannot make \"{name}\" into a class name"),
                })
            } else {
                Ok(class)
            }
        })
        .collect()
}

/// Spans split at line ends, each line prefixed with its number.
fn number_lines(
    tokens: impl Iterator<Item = ClassifiedToken>,
    start: usize,
    line_count: usize,
) -> Vec<Inline> {
    let last = start + line_count.saturating_sub(1);
    let width = last.to_string().len();
    let mut line = start;
    let mut at_line_start = true;
    let mut children = Vec::new();

    for token in tokens {
        for piece in token.text.split_inclusive('\n') {
            if at_line_start {
                children.push(Inline::span(LINE_NUMBER_CLASS, format!("{line:>width$} ")));
                line += 1;
            }
            children.push(Inline::span(token.class, piece));
            at_line_start = piece.ends_with('\n');
        }
    }

    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::LexerRegistry;
    use pretty_assertions::assert_eq;
    use rsthl_renderer::{DirectiveRegistry, Level, Publisher};

    fn registry() -> DirectiveRegistry {
        DirectiveRegistry::new().with(CodeBlockDirective::new(Highlighter::new(
            LexerRegistry::defaults(),
        )))
    }

    fn body(source: &str) -> (String, Vec<(Level, String)>) {
        let registry = registry();
        let output = Publisher::new(&registry).publish(source).unwrap();
        let messages = output
            .messages
            .into_iter()
            .map(|m| (m.level, m.message))
            .collect();
        (output.html, messages)
    }

    fn block(document: &rsthl_renderer::Document) -> &LiteralBlock {
        document
            .children
            .iter()
            .find_map(|node| match node {
                Node::LiteralBlock(block) => Some(block),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_python_block_html() {
        let (html, messages) = body(".. code-block:: python\n\n   import os\n");
        assert!(messages.is_empty(), "{messages:?}");
        assert!(html.contains("<pre class=\"literal-block code-block python\">"));
        assert!(html.contains("<span class=\"kn\">import</span>"));
    }

    #[test]
    fn test_aliases() {
        for name in ["code", "sourcecode"] {
            let (html, _) = body(&format!(".. {name}:: python\n\n   import os\n"));
            assert!(html.contains("code-block python"), "{name}");
        }
    }

    #[test]
    fn test_unknown_language_is_plain() {
        let registry = registry();
        let document = Publisher::new(&registry)
            .document(".. code-block:: nonexistent-lang-xyz\n\n   a\n   b\n");
        let block = block(&document);
        assert_eq!(block.classes, vec!["code-block", "nonexistent-lang-xyz"]);
        assert_eq!(block.children, vec![Inline::span("", "a\nb")]);
    }

    #[test]
    fn test_text_block_reconstructs() {
        let registry = registry();
        let document =
            Publisher::new(&registry).document(".. code-block:: text\n\n   a\n   b\n   c\n");
        assert_eq!(rsthl_renderer::plain_text(&block(&document).children), "a\nb\nc");
    }

    #[test]
    fn test_degraded_block_is_verbatim() {
        let registry = DirectiveRegistry::new()
            .with(CodeBlockDirective::new(Highlighter::unavailable()));
        let document = Publisher::new(&registry).document(".. code-block:: python\n\n   x = <1>\n");
        assert_eq!(block(&document).children, vec![Inline::span("", "x = <1>")]);

        let output = Publisher::new(&registry)
            .publish(".. code-block:: python\n\n   x = <1>\n")
            .unwrap();
        assert!(output.html.contains(
            "<pre class=\"literal-block code-block python\">x = &lt;1&gt;</pre>"
        ));
    }

    #[test]
    fn test_empty_body_is_reported() {
        let (_, messages) = body(".. code-block:: python\n\nAfter.\n");
        assert_eq!(
            messages,
            vec![(
                Level::Error,
                "Content block expected for the \"code-block\" directive; none found."
                    .to_owned()
            )]
        );
    }

    #[test]
    fn test_missing_language_is_reported() {
        let (_, messages) = body(".. code-block::\n\n   x\n");
        assert_eq!(
            messages,
            vec![(
                Level::Error,
                "Error in \"code-block\" directive:\n1 argument(s) required, 0 supplied."
                    .to_owned()
            )]
        );
    }

    #[test]
    fn test_class_and_name_options() {
        let registry = registry();
        let document = Publisher::new(&registry).document(
            ".. code-block:: text\n   :class: Wide Dark\n   :name: Main Loop\n\n   x\n",
        );
        let block = block(&document);
        assert_eq!(block.classes, vec!["code-block", "text", "wide", "dark"]);
        assert_eq!(block.id.as_deref(), Some("main-loop"));
    }

    #[test]
    fn test_number_lines() {
        let registry = registry();
        let document = Publisher::new(&registry)
            .document(".. code-block:: text\n   :number-lines: 9\n\n   a\n   b\n");
        assert_eq!(
            block(&document).children,
            vec![
                Inline::span("ln", " 9 "),
                Inline::span("", "a\n"),
                Inline::span("ln", "10 "),
                Inline::span("", "b"),
            ]
        );
    }

    #[test]
    fn test_number_lines_default_start() {
        let tokens = vec![ClassifiedToken {
            class: "",
            text: "x\ny".to_owned(),
        }];
        assert_eq!(
            number_lines(tokens.into_iter(), 1, 2),
            vec![
                Inline::span("ln", "1 "),
                Inline::span("", "x\n"),
                Inline::span("ln", "2 "),
                Inline::span("", "y"),
            ]
        );
    }

    #[test]
    fn test_invalid_number_lines() {
        let (_, messages) = body(".. code-block:: text\n   :number-lines: ten\n\n   x\n");
        assert_eq!(messages.len(), 1);
        assert!(
            messages[0]
                .1
                .starts_with("Error in \"code-block\" directive:\ninvalid option value: (option: \"number-lines\"; value: 'ten')")
        );
    }

    #[test]
    fn test_number_lines_out_of_range() {
        let source = ".. code-block:: text\n   :number-lines: 18446744073709551615\n\n   a\n   b\n";
        let (html, messages) = body(source);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, Level::Error);
        assert!(messages[0].1.starts_with(
            "Error in \"code-block\" directive:\ninvalid option value: (option: \"number-lines\"; value: '18446744073709551615')"
        ));
        assert!(!html.contains("<pre class=\"literal-block code-block text\">"));
    }

    #[test]
    fn test_first_line_number_bounds() {
        assert_eq!(first_line_number("", 3), Ok(1));
        assert_eq!(first_line_number("7", 3), Ok(7));
        assert_eq!(first_line_number(&(usize::MAX - 3).to_string(), 3), Ok(usize::MAX - 3));
        assert!(first_line_number(&(usize::MAX - 2).to_string(), 3).is_err());
    }
}
