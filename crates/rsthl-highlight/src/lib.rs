//! Syntax highlighting for reStructuredText code blocks.
//!
//! Code is lexed by a [`LexerRegistry`] (syntect grammars), adjacent tokens of
//! the same type are merged ([`merge_tokens`]), and each merged token is
//! mapped to a CSS class ([`TokenType::class`]). [`CodeBlockDirective`] wires
//! this into the document pipeline of `rsthl-renderer`.
//!
//! # Example
//!
//! ```
//! use rsthl_highlight::{CodeBlockDirective, Highlighter, LexerRegistry};
//! use rsthl_renderer::{DirectiveRegistry, Publisher};
//!
//! let directives = DirectiveRegistry::new()
//!     .with(CodeBlockDirective::new(Highlighter::new(LexerRegistry::defaults())));
//! let output = Publisher::new(&directives)
//!     .publish(".. code-block:: python\n\n   import os\n")
//!     .unwrap();
//!
//! assert!(output.html.contains("<span class=\"kn\">import</span>"));
//! ```

mod code_block;
mod error;
mod highlighter;
mod lexer;
mod merge;
mod token;

pub use code_block::CodeBlockDirective;
pub use error::HighlightError;
pub use highlighter::{Classified, Highlighter, Lexed};
pub use lexer::{Lexer, LexerRegistry, SyntaxSource};
pub use merge::{MergeExt, MergeTokens, merge_tokens};
pub use token::{ClassifiedToken, Token, TokenNames, TokenType};

/// Stylesheet for short token class names.
pub const DEFAULT_STYLESHEET: &str = include_str!("highlight.css");
