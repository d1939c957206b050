//! Pluggable directives for reStructuredText explicit markup.
//!
//! A directive is an explicit markup block of the form:
//!
//! ```text
//! .. name:: arguments
//!    :option: value
//!
//!    content
//! ```
//!
//! # Architecture
//!
//! Handlers implement [`Directive`] and are registered on a
//! [`DirectiveRegistry`], which is passed explicitly to the parser (there is no
//! process-wide table). The registry owns the generic part of directive
//! processing:
//!
//! 1. **Splitting** the block into arguments, options and content according
//!    to the handler's [`ArgumentSpec`], [`Directive::options`] and
//!    [`ContentSpec`].
//! 2. **Validation**, reported as system messages with the usual wording
//!    (`Error in "name" directive: ...`).
//! 3. **Dispatch** to [`Directive::run`], which returns document nodes.
//!
//! # Example
//!
//! ```
//! use rsthl_renderer::directive::{
//!     ArgumentSpec, Directive, DirectiveCall, DirectiveContext, DirectiveError,
//!     DirectiveRegistry,
//! };
//! use rsthl_renderer::{Inline, Node};
//!
//! struct RubricDirective;
//!
//! impl Directive for RubricDirective {
//!     fn name(&self) -> &str { "rubric" }
//!
//!     fn arguments(&self) -> ArgumentSpec { ArgumentSpec::new(1, 0, true) }
//!
//!     fn run(
//!         &self,
//!         call: &DirectiveCall,
//!         _ctx: &mut DirectiveContext<'_>,
//!     ) -> Result<Vec<Node>, DirectiveError> {
//!         Ok(vec![Node::Paragraph(vec![Inline::Strong(call.arguments[0].clone())])])
//!     }
//! }
//!
//! let registry = DirectiveRegistry::new().with(RubricDirective);
//! assert!(registry.get("rubric").is_some());
//! ```

mod admonition;
mod call;
mod context;
mod error;
mod registry;

pub use admonition::AdmonitionDirective;
pub use call::DirectiveCall;
pub(crate) use call::RawDirective;
pub use context::DirectiveContext;
pub use error::DirectiveError;
pub use registry::{ArgumentSpec, ContentSpec, Directive, DirectiveRegistry};
