//! Colored terminal output utilities.

use console::{Style, Term};
use rsthl_renderer::{Level, SystemMessage};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    yellow: Style,
    red: Style,
    red_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            red_bold: Style::new().red().bold(),
        }
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a system message, styled by level.
    pub(crate) fn system_message(&self, source: &str, message: &SystemMessage) {
        let line = format_message(source, message);
        let styled = match message.level {
            Level::Info => line,
            Level::Warning => self.yellow.apply_to(line).to_string(),
            Level::Error => self.red.apply_to(line).to_string(),
            Level::Severe => self.red_bold.apply_to(line).to_string(),
        };
        let _ = self.term.write_line(&styled);
    }
}

/// `source:line: (LEVEL/n) message`; the line is left empty when unknown.
pub(crate) fn format_message(source: &str, message: &SystemMessage) -> String {
    let line = if message.line == 0 {
        String::new()
    } else {
        message.line.to_string()
    };
    format!("{source}:{line}: ({}) {}", message.level, message.message)
}
