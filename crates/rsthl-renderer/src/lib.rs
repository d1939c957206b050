//! reStructuredText to HTML conversion with pluggable directives.
//!
//! This crate provides the document pipeline: a parser for a practical
//! subset of reStructuredText, tree [`transforms`], and an XHTML writer in
//! the docutils `html4css1` layout.
//!
//! # Architecture
//!
//! - [`parser::parse`] turns source text into a [`Document`] tree; explicit
//!   markup blocks are dispatched through a [`DirectiveRegistry`].
//! - [`transforms::apply`] promotes the document title, assigns section ids
//!   and resolves hyperlink references.
//! - [`HtmlWriter`] serializes the tree into [`HtmlParts`] and fills the page
//!   template.
//!
//! [`Publisher`] runs all three. Problems in the document never fail the
//! pipeline; they are collected as [`SystemMessage`]s.
//!
//! # Example
//!
//! ```
//! use rsthl_renderer::{DirectiveRegistry, Publisher};
//!
//! let registry = DirectiveRegistry::new().with_admonitions();
//! let output = Publisher::new(&registry)
//!     .publish("Hello\n=====\n\n**Bold** text\n")
//!     .unwrap();
//!
//! assert_eq!(output.title.as_deref(), Some("Hello"));
//! assert!(output.html.contains("<strong>Bold</strong>"));
//! ```

pub mod directive;
mod html;
mod nodes;
pub mod parser;
mod publish;
pub mod transforms;
mod util;

pub use directive::{Directive, DirectiveCall, DirectiveContext, DirectiveError, DirectiveRegistry};
pub use html::{DEFAULT_TEMPLATE, HtmlParts, HtmlSettings, HtmlWriter, Stylesheet, TemplateError};
pub use nodes::{
    Admonition, DefinitionItem, Document, EnumStyle, EnumeratedList, Inline, Level, LiteralBlock,
    Node, RefTarget, Reference, Section, SystemMessage, Target, Title, normalize_name, plain_text,
};
pub use publish::{PublishError, PublishOutput, PublishSettings, Publisher};
pub use util::{escape_html, slugify};
