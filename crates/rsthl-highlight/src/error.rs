use std::path::PathBuf;

use syntect::LoadingError;
use syntect::parsing::{ParsingError, ScopeError};

/// Highlighting error.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    #[error("Failed to load grammars from {path}")]
    Load {
        path: PathBuf,
        #[source]
        source: LoadingError,
    },

    #[error("Failed to tokenize code: {0}")]
    Parse(#[from] ParsingError),

    #[error("Failed to track scopes: {0:?}")]
    Scope(ScopeError),
}

impl From<ScopeError> for HighlightError {
    fn from(err: ScopeError) -> Self {
        Self::Scope(err)
    }
}
