//! Directive processing context.

use crate::nodes::{Node, SystemMessage};
use crate::parser::{Line, Parser};

use super::DirectiveRegistry;

/// Context handed to [`Directive::run`](super::Directive::run).
///
/// Gives handlers access to nested parsing (for directives whose content is
/// itself reStructuredText) and to the message log of the document.
pub struct DirectiveContext<'a> {
    /// Line number where the directive appears (1-indexed).
    pub line: usize,
    registry: &'a DirectiveRegistry,
    messages: &'a mut Vec<SystemMessage>,
}

impl<'a> DirectiveContext<'a> {
    pub(crate) fn new(
        line: usize,
        registry: &'a DirectiveRegistry,
        messages: &'a mut Vec<SystemMessage>,
    ) -> Self {
        Self {
            line,
            registry,
            messages,
        }
    }

    /// Parse directive content as body elements.
    ///
    /// `offset` is the source line of the first content line. Section titles
    /// are not allowed in nested content and are reported as severe errors.
    pub fn parse_nested(&mut self, content: &[String], offset: usize) -> Vec<Node> {
        let lines: Vec<Line> = content
            .iter()
            .enumerate()
            .map(|(i, text)| Line::new(offset + i, text.as_str()))
            .collect();
        let mut parser = Parser::new(self.registry);
        let nodes = parser.parse_body(&lines);
        self.messages.extend(parser.into_messages());
        nodes
    }
}
