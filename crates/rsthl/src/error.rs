//! CLI error types.

use std::path::PathBuf;

use rsthl_config::ConfigError;
use rsthl_highlight::HighlightError;
use rsthl_renderer::PublishError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Highlight(#[from] HighlightError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error("{count} system message(s) at warning level or above (strict mode)")]
    Strict { count: usize },
}
