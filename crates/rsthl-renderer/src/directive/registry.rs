//! Directive trait and registry.

use crate::nodes::{Node, SystemMessage};

use super::{AdmonitionDirective, DirectiveCall, DirectiveContext, DirectiveError, RawDirective};

/// Positional argument syntax of a directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArgumentSpec {
    /// Number of required arguments.
    pub required: usize,
    /// Number of optional arguments.
    pub optional: usize,
    /// Whether the final argument may contain whitespace.
    pub final_whitespace: bool,
}

impl ArgumentSpec {
    /// No arguments accepted.
    pub const NONE: Self = Self::new(0, 0, false);

    #[must_use]
    pub const fn new(required: usize, optional: usize, final_whitespace: bool) -> Self {
        Self {
            required,
            optional,
            final_whitespace,
        }
    }

    /// Whether any argument is accepted at all.
    #[must_use]
    pub const fn accepts_arguments(&self) -> bool {
        self.required + self.optional > 0
    }
}

/// Whether a directive accepts a content block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentSpec {
    Forbidden,
    Optional,
    Required,
}

/// Handler for a named directive.
///
/// Handlers are immutable during parsing and may be invoked any number of
/// times per document; each invocation gets its own [`DirectiveCall`].
pub trait Directive: Send {
    /// Directive name (e.g., "code-block", "note").
    fn name(&self) -> &str;

    /// Alternative names dispatching to this handler.
    fn aliases(&self) -> &[&'static str] {
        &[]
    }

    /// Positional argument syntax. Default: no arguments.
    fn arguments(&self) -> ArgumentSpec {
        ArgumentSpec::NONE
    }

    /// Recognized option names. Default: none.
    fn options(&self) -> &[&'static str] {
        &[]
    }

    /// Content block requirement. Default: optional.
    fn content(&self) -> ContentSpec {
        ContentSpec::Optional
    }

    /// Run the directive and return the nodes replacing it.
    fn run(
        &self,
        call: &DirectiveCall,
        ctx: &mut DirectiveContext<'_>,
    ) -> Result<Vec<Node>, DirectiveError>;
}

/// Explicit table of directive handlers used by one parse.
///
/// Lookup is case-insensitive. When several handlers claim the same name,
/// the one registered last wins.
#[derive(Default)]
pub struct DirectiveRegistry {
    handlers: Vec<Box<dyn Directive>>,
}

impl DirectiveRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler.
    #[must_use]
    pub fn with<D: Directive + 'static>(mut self, handler: D) -> Self {
        self.register(handler);
        self
    }

    /// Register a handler in place.
    pub fn register<D: Directive + 'static>(&mut self, handler: D) {
        self.handlers.push(Box::new(handler));
    }

    /// Register the standard admonitions (`note`, `warning`, ...).
    #[must_use]
    pub fn with_admonitions(mut self) -> Self {
        for handler in AdmonitionDirective::all() {
            self.register(handler);
        }
        self
    }

    /// Find the handler for a directive name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Directive> {
        let name = name.to_lowercase();
        self.handlers
            .iter()
            .rev()
            .find(|h| h.name() == name || h.aliases().contains(&name.as_str()))
            .map(|h| &**h)
    }

    /// Validate and run a directive block, reporting failures as messages.
    pub(crate) fn dispatch(
        &self,
        raw: &RawDirective,
        messages: &mut Vec<SystemMessage>,
    ) -> Vec<Node> {
        let Some(handler) = self.get(&raw.name) else {
            tracing::debug!(name = %raw.name, line = raw.line, "Unknown directive");
            return vec![report(
                messages,
                SystemMessage::error(
                    raw.line,
                    format!("Unknown directive type \"{}\".", raw.name),
                )
                .with_literal(raw.block_text.clone()),
            )];
        };

        let result = DirectiveCall::parse(raw, handler).and_then(|call| {
            let mut ctx = DirectiveContext::new(raw.line, self, messages);
            handler.run(&call, &mut ctx)
        });

        match result {
            Ok(nodes) => nodes,
            Err(err) => {
                let name = raw.name.to_lowercase();
                vec![report(
                    messages,
                    SystemMessage::error(raw.line, err.report_message(&name))
                        .with_literal(raw.block_text.clone()),
                )]
            }
        }
    }
}

/// Log a message and return the node standing in for the failed directive.
fn report(messages: &mut Vec<SystemMessage>, message: SystemMessage) -> Node {
    messages.push(message.clone());
    Node::SystemMessage(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{Inline, Level};
    use crate::parser::Line;

    struct Upper;

    impl Directive for Upper {
        fn name(&self) -> &'static str {
            "upper"
        }

        fn aliases(&self) -> &[&'static str] {
            &["shout"]
        }

        fn arguments(&self) -> ArgumentSpec {
            ArgumentSpec::new(1, 0, true)
        }

        fn run(
            &self,
            call: &DirectiveCall,
            _ctx: &mut DirectiveContext<'_>,
        ) -> Result<Vec<Node>, DirectiveError> {
            Ok(vec![Node::Paragraph(vec![Inline::text(
                call.arguments[0].to_uppercase(),
            )])])
        }
    }

    fn raw(name: &str, argument_text: &str) -> RawDirective {
        RawDirective {
            name: name.to_owned(),
            argument_text: argument_text.to_owned(),
            lines: Vec::<Line>::new(),
            line: 3,
            block_text: format!(".. {name}:: {argument_text}"),
        }
    }

    #[test]
    fn test_dispatch_by_name_and_alias() {
        let registry = DirectiveRegistry::new().with(Upper);
        let mut messages = Vec::new();

        for name in ["upper", "SHOUT"] {
            let nodes = registry.dispatch(&raw(name, "hi"), &mut messages);
            assert_eq!(nodes, vec![Node::Paragraph(vec![Inline::text("HI")])]);
        }
        assert!(messages.is_empty());
    }

    #[test]
    fn test_unknown_directive_reports_error() {
        let registry = DirectiveRegistry::new();
        let mut messages = Vec::new();

        let nodes = registry.dispatch(&raw("bogus", "x"), &mut messages);

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].level, Level::Error);
        assert_eq!(messages[0].message, "Unknown directive type \"bogus\".");
        assert_eq!(messages[0].literal.as_deref(), Some(".. bogus:: x"));
        assert_eq!(nodes, vec![Node::SystemMessage(messages[0].clone())]);
    }

    #[test]
    fn test_validation_error_reports_error() {
        let registry = DirectiveRegistry::new().with(Upper);
        let mut messages = Vec::new();

        registry.dispatch(&raw("upper", ""), &mut messages);

        assert_eq!(
            messages[0].message,
            "Error in \"upper\" directive:\n1 argument(s) required, 0 supplied."
        );
        assert_eq!(messages[0].line, 3);
    }

    #[test]
    fn test_last_registration_wins() {
        struct Quiet;
        impl Directive for Quiet {
            fn name(&self) -> &'static str {
                "upper"
            }
            fn run(
                &self,
                _call: &DirectiveCall,
                _ctx: &mut DirectiveContext<'_>,
            ) -> Result<Vec<Node>, DirectiveError> {
                Ok(Vec::new())
            }
        }

        let registry = DirectiveRegistry::new().with(Upper).with(Quiet);
        let nodes = registry.dispatch(&raw("upper", ""), &mut Vec::new());
        assert!(nodes.is_empty());
    }
}
