//! Standard admonition directives (`note`, `warning`, ...).

use crate::nodes::{Admonition, Node};

use super::{ContentSpec, Directive, DirectiveCall, DirectiveContext, DirectiveError};

/// Admonition kinds and their displayed titles.
const KINDS: &[(&str, &str)] = &[
    ("attention", "Attention!"),
    ("caution", "Caution!"),
    ("danger", "!DANGER!"),
    ("error", "Error"),
    ("hint", "Hint"),
    ("important", "Important"),
    ("note", "Note"),
    ("tip", "Tip"),
    ("warning", "Warning"),
];

/// Admonition directive whose body is parsed as nested body elements.
pub struct AdmonitionDirective {
    kind: &'static str,
    title: &'static str,
}

impl AdmonitionDirective {
    /// Handler for one admonition kind, or `None` if the kind is unknown.
    #[must_use]
    pub fn new(kind: &str) -> Option<Self> {
        KINDS
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|&(kind, title)| Self { kind, title })
    }

    /// Handlers for every standard admonition.
    pub fn all() -> impl Iterator<Item = Self> {
        KINDS.iter().map(|&(kind, title)| Self { kind, title })
    }
}

impl Directive for AdmonitionDirective {
    fn name(&self) -> &str {
        self.kind
    }

    fn content(&self) -> ContentSpec {
        ContentSpec::Required
    }

    fn run(
        &self,
        call: &DirectiveCall,
        ctx: &mut DirectiveContext<'_>,
    ) -> Result<Vec<Node>, DirectiveError> {
        let children = ctx.parse_nested(&call.content, call.content_offset);
        Ok(vec![Node::Admonition(Admonition {
            kind: self.kind.to_owned(),
            title: self.title.to_owned(),
            children,
        })])
    }
}
