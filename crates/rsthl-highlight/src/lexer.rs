//! Lexer registry backed by syntect grammars.

use std::path::PathBuf;

use syntect::parsing::{ParseState, Scope, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::HighlightError;
use crate::token::{Token, TokenType};

/// Language names that always select the plain-text lexer.
const PLAIN_TEXT: &[&str] = &["text", "none", "plain", "plaintext"];

/// Common lexer names mapped to syntect tokens (extension or syntax name).
const ALIASES: &[(&str, &str)] = &[
    ("python3", "py"),
    ("py3", "py"),
    ("bash", "sh"),
    ("shell", "sh"),
    ("console", "sh"),
    ("zsh", "sh"),
    ("c++", "cpp"),
    ("javascript", "js"),
    ("typescript", "ts"),
    ("csharp", "cs"),
    ("c#", "cs"),
    ("rust", "rs"),
    ("golang", "go"),
    ("ruby", "rb"),
    ("perl", "pl"),
    ("yml", "yaml"),
    ("html+jinja", "html"),
    ("xml", "xml"),
    ("rst", "rst"),
    ("restructuredtext", "rst"),
];

/// Scope prefixes and the token types they select, most specific first.
const SCOPES: &[(&str, TokenType)] = &[
    ("comment.block.documentation", TokenType::StringDoc),
    ("comment.line", TokenType::CommentSingle),
    ("comment.block", TokenType::CommentMultiline),
    ("comment", TokenType::Comment),
    ("string.regexp", TokenType::StringRegex),
    ("string.interpolated", TokenType::StringInterpol),
    ("string.quoted.single", TokenType::StringSingle),
    ("string.quoted.double", TokenType::StringDouble),
    ("string", TokenType::String),
    ("constant.character.escape", TokenType::StringEscape),
    ("constant.character", TokenType::StringChar),
    ("constant.numeric.integer.hexadecimal", TokenType::NumberHex),
    ("constant.numeric.integer", TokenType::NumberInteger),
    ("constant.numeric.float", TokenType::NumberFloat),
    ("constant.numeric", TokenType::Number),
    ("constant.language", TokenType::KeywordConstant),
    ("constant.other.symbol", TokenType::StringSymbol),
    ("constant", TokenType::NameConstant),
    ("keyword.control.import", TokenType::KeywordNamespace),
    ("keyword.operator.word", TokenType::OperatorWord),
    ("keyword.operator", TokenType::Operator),
    ("keyword.declaration", TokenType::KeywordDeclaration),
    ("keyword", TokenType::Keyword),
    ("storage.type.function", TokenType::Keyword),
    ("storage.type.class", TokenType::Keyword),
    ("storage.type", TokenType::KeywordType),
    ("storage.modifier", TokenType::KeywordDeclaration),
    ("storage", TokenType::Keyword),
    ("entity.name.function", TokenType::NameFunction),
    ("entity.name.class", TokenType::NameClass),
    ("entity.name.type", TokenType::NameClass),
    ("entity.name.struct", TokenType::NameClass),
    ("entity.name.enum", TokenType::NameClass),
    ("entity.name.namespace", TokenType::NameNamespace),
    ("entity.name.tag", TokenType::NameTag),
    ("entity.name.label", TokenType::NameLabel),
    ("entity.name.constant", TokenType::NameConstant),
    ("entity.name.decorator", TokenType::NameDecorator),
    ("entity.name", TokenType::Name),
    ("entity.other.attribute-name", TokenType::NameAttribute),
    ("entity.other.inherited-class", TokenType::NameClass),
    ("support.function", TokenType::NameBuiltin),
    ("support.type.exception", TokenType::NameException),
    ("support.type", TokenType::NameBuiltin),
    ("support.class", TokenType::NameClass),
    ("support.constant", TokenType::NameConstant),
    ("support", TokenType::NameBuiltin),
    ("variable.language", TokenType::NameBuiltinPseudo),
    ("variable.function", TokenType::NameFunction),
    ("variable.other.constant", TokenType::NameConstant),
    ("variable.parameter", TokenType::Name),
    ("variable.other", TokenType::Name),
    ("variable", TokenType::NameVariable),
    ("meta.preprocessor", TokenType::CommentPreproc),
    ("meta.annotation", TokenType::NameDecorator),
    ("markup.heading", TokenType::GenericHeading),
    ("markup.inserted", TokenType::GenericInserted),
    ("markup.deleted", TokenType::GenericDeleted),
    ("markup.bold", TokenType::GenericStrong),
    ("markup.italic", TokenType::GenericEmph),
    ("markup.raw", TokenType::Literal),
    ("markup", TokenType::Generic),
    ("invalid", TokenType::Error),
];

/// Where grammars are loaded from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SyntaxSource {
    /// Grammars bundled with syntect.
    #[default]
    Defaults,
    /// Bundled grammars extended with `.sublime-syntax` files from a folder.
    Directory(PathBuf),
}

/// Set of available lexers.
pub struct LexerRegistry {
    syntaxes: SyntaxSet,
}

impl LexerRegistry {
    /// Load grammars.
    pub fn load(source: &SyntaxSource) -> Result<Self, HighlightError> {
        let syntaxes = match source {
            SyntaxSource::Defaults => SyntaxSet::load_defaults_newlines(),
            SyntaxSource::Directory(path) => {
                let mut builder = SyntaxSet::load_defaults_newlines().into_builder();
                builder
                    .add_from_folder(path, true)
                    .map_err(|source| HighlightError::Load {
                        path: path.clone(),
                        source,
                    })?;
                builder.build()
            }
        };
        tracing::debug!(grammars = syntaxes.syntaxes().len(), "Loaded lexer grammars");
        Ok(Self { syntaxes })
    }

    /// Registry with syntect's bundled grammars.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Find the lexer registered for a language name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Lexer<'_>> {
        let name = name.trim().to_lowercase();
        if PLAIN_TEXT.contains(&name.as_str()) {
            return Some(self.plain_text());
        }
        let token = ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map_or(name.as_str(), |(_, token)| token);
        self.syntaxes
            .find_syntax_by_token(token)
            .map(|syntax| Lexer {
                syntax,
                syntaxes: &self.syntaxes,
            })
    }

    /// Lexer for a language name, falling back to plain text.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Lexer<'_> {
        self.find(name).unwrap_or_else(|| {
            tracing::debug!(language = name, "Unknown language, using plain text");
            self.plain_text()
        })
    }

    /// The plain-text lexer, which is always present.
    #[must_use]
    pub fn plain_text(&self) -> Lexer<'_> {
        Lexer {
            syntax: self.syntaxes.find_syntax_plain_text(),
            syntaxes: &self.syntaxes,
        }
    }

    /// Grammar names with the file extensions they are registered for,
    /// sorted by name.
    pub fn languages(&self) -> Vec<(&str, &[String])> {
        let mut languages: Vec<_> = self
            .syntaxes
            .syntaxes()
            .iter()
            .map(|s| (s.name.as_str(), s.file_extensions.as_slice()))
            .collect();
        languages.sort_by_key(|(name, _)| name.to_lowercase());
        languages
    }
}

/// A resolved language grammar.
#[derive(Clone, Copy)]
pub struct Lexer<'a> {
    syntax: &'a SyntaxReference,
    syntaxes: &'a SyntaxSet,
}

impl Lexer<'_> {
    /// Grammar name (e.g., "Python", "Plain Text").
    #[must_use]
    pub fn name(&self) -> &str {
        &self.syntax.name
    }

    /// Split `code` into tokens in source order.
    ///
    /// Token texts concatenate to `code` exactly.
    pub fn tokenize(&self, code: &str) -> Result<Vec<Token<TokenType>>, HighlightError> {
        let mut state = ParseState::new(self.syntax);
        let mut stack = ScopeStack::new();
        let mut tokens = Vec::new();

        for line in LinesWithEndings::from(code) {
            let ops = state.parse_line(line, self.syntaxes)?;
            let mut start = 0;
            for (index, op) in ops {
                if index > start {
                    tokens.push(Token::new(token_type(stack.as_slice()), &line[start..index]));
                    start = index;
                }
                stack.apply(&op)?;
            }
            if start < line.len() {
                tokens.push(Token::new(token_type(stack.as_slice()), &line[start..]));
            }
        }

        Ok(tokens)
    }
}

/// Token type of a scope stack.
///
/// Scopes are scanned innermost first and the first specific mapping wins.
/// Punctuation scopes only decide when nothing encloses them, so string
/// quotes and comment markers stay part of their string or comment.
fn token_type(stack: &[Scope]) -> TokenType {
    let mut punctuation = false;
    for scope in stack.iter().rev() {
        let name = scope.build_string();
        if is_scope(&name, "punctuation") {
            punctuation = true;
            continue;
        }
        if let Some(&(_, token_type)) = SCOPES.iter().find(|(prefix, _)| is_scope(&name, prefix)) {
            return token_type;
        }
    }
    if punctuation {
        TokenType::Punctuation
    } else {
        TokenType::Text
    }
}

/// Whether `scope` equals `prefix` or extends it by whole atoms.
fn is_scope(scope: &str, prefix: &str) -> bool {
    scope
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}
