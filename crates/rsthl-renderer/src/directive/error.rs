//! Directive validation and execution errors.

/// Error raised while validating or running a directive.
///
/// The registry turns these into `Error`-level system messages; they never
/// abort document processing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    #[error("{required} argument(s) required, {supplied} supplied.")]
    TooFewArguments { required: usize, supplied: usize },

    #[error("maximum {max} argument(s) allowed, {supplied} supplied.")]
    TooManyArguments { max: usize, supplied: usize },

    #[error("no content permitted.")]
    ContentNotPermitted,

    #[error("Content block expected for the \"{0}\" directive; none found.")]
    MissingContent(String),

    #[error("unknown option: \"{0}\".")]
    UnknownOption(String),

    #[error("duplicate option \"{0}\".")]
    DuplicateOption(String),

    #[error("invalid option block.")]
    InvalidOptionBlock,

    #[error("invalid option value: (option: \"{name}\"; value: '{value}')\n{reason}")]
    InvalidOptionValue {
        name: String,
        value: String,
        reason: String,
    },
}

impl DirectiveError {
    /// Full message reported for the directive `name`.
    #[must_use]
    pub fn report_message(&self, name: &str) -> String {
        match self {
            Self::MissingContent(_) => self.to_string(),
            _ => format!("Error in \"{name}\" directive:\n{self}"),
        }
    }
}
