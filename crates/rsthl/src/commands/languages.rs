//! `--list-languages` implementation.

use std::io::Write;

use rsthl_highlight::LexerRegistry;

use crate::error::CliError;

/// Write one line per grammar: name and the tokens selecting it.
pub(crate) fn list_languages(registry: &LexerRegistry, out: &mut impl Write) -> Result<(), CliError> {
    for (name, extensions) in registry.languages() {
        if extensions.is_empty() {
            writeln!(out, "{name}")?;
        } else {
            writeln!(out, "{name}: {}", extensions.join(", "))?;
        }
    }
    Ok(())
}
