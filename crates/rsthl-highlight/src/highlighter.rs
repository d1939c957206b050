//! Lex, merge and classify code for the `code-block` directive.

use std::iter::FusedIterator;
use std::vec;

use crate::lexer::LexerRegistry;
use crate::merge::{MergeExt, MergeTokens};
use crate::token::{ClassifiedToken, Token, TokenNames, TokenType};

/// Outcome of lexing a code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lexed {
    /// Tokens in source order.
    Tokenized(Vec<Token<TokenType>>),
    /// Lexing was not possible; the original code.
    Degraded(String),
}

/// Turns code into classified tokens.
///
/// Owns its lexer registry so a directive holding it can live in a
/// [`DirectiveRegistry`](rsthl_renderer::DirectiveRegistry).
pub struct Highlighter {
    registry: Option<LexerRegistry>,
    token_names: TokenNames,
}

impl Highlighter {
    #[must_use]
    pub fn new(registry: LexerRegistry) -> Self {
        Self {
            registry: Some(registry),
            token_names: TokenNames::default(),
        }
    }

    /// Highlighter without lexing capability; every block is degraded.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            registry: None,
            token_names: TokenNames::default(),
        }
    }

    #[must_use]
    pub fn with_token_names(mut self, token_names: TokenNames) -> Self {
        self.token_names = token_names;
        self
    }

    /// Lex `code` with the lexer for `language`.
    ///
    /// Unknown languages use the plain-text lexer.
    pub fn lex(&self, language: &str, code: &str) -> Lexed {
        let Some(registry) = &self.registry else {
            return Lexed::Degraded(code.to_owned());
        };
        if self.token_names == TokenNames::None {
            return Lexed::Degraded(code.to_owned());
        }

        let lexer = registry.resolve(language);
        match lexer.tokenize(code) {
            Ok(tokens) => {
                tracing::trace!(
                    language,
                    lexer = lexer.name(),
                    tokens = tokens.len(),
                    "Tokenized code"
                );
                Lexed::Tokenized(tokens)
            }
            Err(err) => {
                tracing::warn!(language, lexer = lexer.name(), error = %err, "Lexing failed, emitting code verbatim");
                Lexed::Degraded(code.to_owned())
            }
        }
    }

    /// Classified tokens for `code`, merged by token type.
    pub fn classify(&self, language: &str, code: &str) -> Classified {
        let state = match self.lex(language, code) {
            Lexed::Tokenized(tokens) => State::Tokens(tokens.into_iter().merged()),
            Lexed::Degraded(text) => State::Degraded(Some(text)),
        };
        Classified {
            state,
            token_names: self.token_names,
        }
    }
}

/// Iterator over classified tokens, created by [`Highlighter::classify`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Classified {
    state: State,
    token_names: TokenNames,
}

enum State {
    Tokens(MergeTokens<vec::IntoIter<Token<TokenType>>, TokenType>),
    Degraded(Option<String>),
}

impl Iterator for Classified {
    type Item = ClassifiedToken;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            State::Tokens(tokens) => tokens.next().map(|token| ClassifiedToken {
                class: token.tag.class(self.token_names),
                text: token.text,
            }),
            State::Degraded(text) => text.take().map(|text| ClassifiedToken { class: "", text }),
        }
    }
}

impl FusedIterator for Classified {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn highlighter() -> Highlighter {
        Highlighter::new(LexerRegistry::defaults())
    }

    fn joined(tokens: &[ClassifiedToken]) -> String {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_unknown_language_matches_text() {
        let highlighter = highlighter();
        for code in ["a", "a\nb\nc", "def f(): pass\n"] {
            let unknown: Vec<_> = highlighter.classify("nonexistent-lang-xyz", code).collect();
            let text: Vec<_> = highlighter.classify("text", code).collect();
            assert_eq!(unknown, text);
        }
    }

    proptest! {
        #[test]
        fn test_unavailable_yields_single_verbatim_token(language in "[a-z]{0,8}", code in "\\PC*") {
            let tokens: Vec<_> = Highlighter::unavailable().classify(&language, &code).collect();
            prop_assert_eq!(
                tokens,
                vec![ClassifiedToken {
                    class: "",
                    text: code.clone()
                }]
            );
        }

        #[test]
        fn test_token_names_none_covers_content(code in "\\PC*") {
            let tokens: Vec<_> = highlighter()
                .with_token_names(TokenNames::None)
                .classify("python", &code)
                .collect();
            prop_assert_eq!(tokens.len(), 1);
            prop_assert_eq!(&tokens[0].text, &code);
        }
    }

    #[test]
    fn test_token_names_none_degrades() {
        let highlighter = highlighter().with_token_names(TokenNames::None);
        assert_eq!(
            highlighter.lex("python", "import os"),
            Lexed::Degraded("import os".to_owned())
        );
    }

    #[test]
    fn test_text_reconstructs_lines() {
        let tokens: Vec<_> = highlighter().classify("text", "a\nb\nc").collect();
        assert_eq!(joined(&tokens), "a\nb\nc");
        assert!(tokens.iter().all(|t| t.class.is_empty()));
    }

    #[test]
    fn test_python_is_classified_and_lossless() {
        let code = "import os\n\ndef main():\n    return os.getcwd()\n";
        let tokens: Vec<_> = highlighter().classify("python", code).collect();

        assert_eq!(joined(&tokens), code);
        assert!(tokens.contains(&ClassifiedToken {
            class: "kn",
            text: "import".to_owned()
        }));
        assert!(tokens.windows(2).all(|pair| pair[0].class != pair[1].class));
    }

    #[test]
    fn test_long_token_names() {
        let tokens: Vec<_> = highlighter()
            .with_token_names(TokenNames::Long)
            .classify("python", "import os")
            .collect();
        assert_eq!(tokens[0].class, "keyword namespace");
    }

    #[test]
    fn test_lex_text_is_tokenized() {
        assert!(matches!(
            highlighter().lex("text", "a"),
            Lexed::Tokenized(tokens) if tokens == vec![Token::new(TokenType::Text, "a")]
        ));
    }
}
