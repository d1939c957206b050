//! Splitting a directive block into arguments, options and content.

use std::collections::HashMap;

use crate::parser::Line;

use super::{ArgumentSpec, ContentSpec, Directive, DirectiveError};

/// Directive block as recognized by the parser, before validation.
#[derive(Debug, Clone)]
pub(crate) struct RawDirective {
    /// Directive name as written (matched case-insensitively).
    pub name: String,
    /// Text following `::` on the first line.
    pub argument_text: String,
    /// Lines following the first line, dedented.
    pub lines: Vec<Line>,
    /// Line of the explicit markup start (1-indexed).
    pub line: usize,
    /// Whole block as written, for error reports.
    pub block_text: String,
}

/// Validated directive invocation passed to [`Directive::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveCall {
    /// Directive name, lowercased.
    pub name: String,
    /// Positional arguments.
    pub arguments: Vec<String>,
    /// Options from the field list; flags map to an empty string.
    pub options: HashMap<String, String>,
    /// Content lines, with the directive indentation removed.
    pub content: Vec<String>,
    /// Source line of the first content line.
    pub content_offset: usize,
    /// Source line of the directive start.
    pub line: usize,
}

impl DirectiveCall {
    /// Get an option value by name.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    /// Content joined with newlines.
    #[must_use]
    pub fn content_text(&self) -> String {
        self.content.join("\n")
    }

    /// Split and validate a raw block against the handler's declared syntax.
    pub(crate) fn parse(raw: &RawDirective, handler: &dyn Directive) -> Result<Self, DirectiveError> {
        let spec = handler.arguments();
        let known_options = handler.options();
        let has_header = spec.accepts_arguments() || !known_options.is_empty();

        let mut argument_text = raw.argument_text.trim().to_owned();
        let mut options = HashMap::new();
        let mut content_lines: Vec<&Line> = Vec::new();
        let mut inline_content = None;

        if has_header {
            let header_end = raw
                .lines
                .iter()
                .position(Line::is_blank)
                .unwrap_or(raw.lines.len());
            let header = &raw.lines[..header_end];
            let options_start = header
                .iter()
                .position(|l| l.text.starts_with(':'))
                .unwrap_or(header.len());
            for line in &header[..options_start] {
                if !argument_text.is_empty() {
                    argument_text.push(' ');
                }
                argument_text.push_str(line.text.trim());
            }
            let option_lines: Vec<&str> = header[options_start..]
                .iter()
                .map(|l| l.text.as_str())
                .collect();
            options = parse_options(&option_lines, known_options)?;
            content_lines.extend(raw.lines[header_end..].iter());
        } else {
            if !argument_text.is_empty() {
                inline_content = Some(std::mem::take(&mut argument_text));
            }
            content_lines.extend(raw.lines.iter());
        }

        let arguments = split_arguments(&argument_text, &spec)?;

        // Trim blank lines around the content; a blank separating inline
        // content from the body is kept.
        while inline_content.is_none() && content_lines.first().is_some_and(|l| l.is_blank()) {
            content_lines.remove(0);
        }
        while content_lines.last().is_some_and(|l| l.is_blank()) {
            content_lines.pop();
        }

        let (content, content_offset) = match inline_content {
            Some(first) => {
                let mut content = vec![first];
                content.extend(content_lines.iter().map(|l| l.text.clone()));
                (content, raw.line)
            }
            None => (
                content_lines.iter().map(|l| l.text.clone()).collect(),
                content_lines.first().map_or(raw.line + 1, |l| l.number),
            ),
        };

        let name = raw.name.to_lowercase();
        match handler.content() {
            ContentSpec::Forbidden if !content.is_empty() => {
                return Err(DirectiveError::ContentNotPermitted);
            }
            ContentSpec::Required if content.is_empty() => {
                return Err(DirectiveError::MissingContent(name));
            }
            _ => {}
        }

        Ok(Self {
            name,
            arguments,
            options,
            content,
            content_offset,
            line: raw.line,
        })
    }
}

/// Split argument text into positional arguments.
fn split_arguments(text: &str, spec: &ArgumentSpec) -> Result<Vec<String>, DirectiveError> {
    let max = spec.required + spec.optional;
    let arguments: Vec<String> = if text.is_empty() {
        Vec::new()
    } else if spec.final_whitespace && max > 0 {
        let mut parts = Vec::new();
        let mut rest = text.trim();
        while parts.len() + 1 < max {
            match rest.split_once(char::is_whitespace) {
                Some((head, tail)) => {
                    parts.push(head.to_owned());
                    rest = tail.trim_start();
                }
                None => break,
            }
        }
        if !rest.is_empty() {
            parts.push(rest.to_owned());
        }
        parts
    } else {
        text.split_whitespace().map(str::to_owned).collect()
    };

    if arguments.len() < spec.required {
        return Err(DirectiveError::TooFewArguments {
            required: spec.required,
            supplied: arguments.len(),
        });
    }
    if arguments.len() > max {
        return Err(DirectiveError::TooManyArguments {
            max,
            supplied: arguments.len(),
        });
    }
    Ok(arguments)
}

/// Parse a `:name: value` field list into options.
fn parse_options(
    lines: &[&str],
    known: &[&str],
) -> Result<HashMap<String, String>, DirectiveError> {
    let mut options: HashMap<String, String> = HashMap::new();
    let mut current: Option<String> = None;

    for line in lines {
        if let Some(rest) = line.strip_prefix(':') {
            let (name, value) = rest
                .split_once(':')
                .ok_or(DirectiveError::InvalidOptionBlock)?;
            let name = name.trim().to_lowercase();
            if !known.contains(&name.as_str()) {
                return Err(DirectiveError::UnknownOption(name));
            }
            if options.contains_key(&name) {
                return Err(DirectiveError::DuplicateOption(name));
            }
            options.insert(name.clone(), value.trim().to_owned());
            current = Some(name);
        } else if line.starts_with(char::is_whitespace) {
            // Continuation of the previous option value.
            let name = current.as_ref().ok_or(DirectiveError::InvalidOptionBlock)?;
            if let Some(value) = options.get_mut(name) {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(line.trim());
            }
        } else {
            return Err(DirectiveError::InvalidOptionBlock);
        }
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::DirectiveContext;
    use crate::nodes::Node;

    struct Probe {
        arguments: ArgumentSpec,
        content: ContentSpec,
    }

    impl Directive for Probe {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn arguments(&self) -> ArgumentSpec {
            self.arguments
        }

        fn options(&self) -> &[&'static str] {
            &["class", "number-lines"]
        }

        fn content(&self) -> ContentSpec {
            self.content
        }

        fn run(
            &self,
            _call: &DirectiveCall,
            _ctx: &mut DirectiveContext<'_>,
        ) -> Result<Vec<Node>, DirectiveError> {
            Ok(Vec::new())
        }
    }

    fn probe(required: usize, optional: usize, final_whitespace: bool) -> Probe {
        Probe {
            arguments: ArgumentSpec::new(required, optional, final_whitespace),
            content: ContentSpec::Optional,
        }
    }

    fn raw(argument_text: &str, lines: &[&str]) -> RawDirective {
        RawDirective {
            name: "Probe".to_owned(),
            argument_text: argument_text.to_owned(),
            lines: lines
                .iter()
                .enumerate()
                .map(|(i, text)| Line::new(i + 2, *text))
                .collect(),
            line: 1,
            block_text: String::new(),
        }
    }

    #[test]
    fn test_arguments_options_and_content() {
        let call = DirectiveCall::parse(
            &raw("python", &[":number-lines: 3", ":class: wide", "", "import os", "", "x = 1"]),
            &probe(1, 0, true),
        )
        .unwrap();

        assert_eq!(call.name, "probe");
        assert_eq!(call.arguments, vec!["python"]);
        assert_eq!(call.option("number-lines"), Some("3"));
        assert_eq!(call.option("class"), Some("wide"));
        assert_eq!(call.content, vec!["import os", "", "x = 1"]);
        assert_eq!(call.content_offset, 5);
        assert_eq!(call.content_text(), "import os\n\nx = 1");
    }

    #[test]
    fn test_final_argument_keeps_whitespace() {
        let call = DirectiveCall::parse(&raw("some lang", &[]), &probe(1, 0, true)).unwrap();
        assert_eq!(call.arguments, vec!["some lang"]);
    }

    #[test]
    fn test_argument_continues_on_next_header_line() {
        let call =
            DirectiveCall::parse(&raw("first", &["second", "", "body"]), &probe(1, 0, true))
                .unwrap();
        assert_eq!(call.arguments, vec!["first second"]);
        assert_eq!(call.content, vec!["body"]);
    }

    #[test]
    fn test_missing_required_argument() {
        let err = DirectiveCall::parse(&raw("", &["", "body"]), &probe(1, 0, true)).unwrap_err();
        assert_eq!(
            err,
            DirectiveError::TooFewArguments {
                required: 1,
                supplied: 0
            }
        );
    }

    #[test]
    fn test_too_many_arguments() {
        let err = DirectiveCall::parse(&raw("a b", &[]), &probe(1, 0, false)).unwrap_err();
        assert_eq!(
            err,
            DirectiveError::TooManyArguments {
                max: 1,
                supplied: 2
            }
        );
    }

    #[test]
    fn test_unknown_option() {
        let err =
            DirectiveCall::parse(&raw("python", &[":linenos:"]), &probe(1, 0, true)).unwrap_err();
        assert_eq!(err, DirectiveError::UnknownOption("linenos".to_owned()));
    }

    #[test]
    fn test_flag_option_is_empty_string() {
        let call =
            DirectiveCall::parse(&raw("python", &[":number-lines:"]), &probe(1, 0, true)).unwrap();
        assert_eq!(call.option("number-lines"), Some(""));
    }

    struct Note;

    impl Directive for Note {
        fn name(&self) -> &'static str {
            "note"
        }

        fn content(&self) -> ContentSpec {
            ContentSpec::Required
        }

        fn run(
            &self,
            _call: &DirectiveCall,
            _ctx: &mut DirectiveContext<'_>,
        ) -> Result<Vec<Node>, DirectiveError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_no_header_puts_first_line_into_content() {
        let raw = RawDirective {
            name: "note".to_owned(),
            argument_text: "Inline text.".to_owned(),
            lines: vec![Line::new(2, "More text.")],
            line: 1,
            block_text: String::new(),
        };
        let call = DirectiveCall::parse(&raw, &Note).unwrap();
        assert!(call.arguments.is_empty());
        assert_eq!(call.content, vec!["Inline text.", "More text."]);
        assert_eq!(call.content_offset, 1);
    }

    #[test]
    fn test_required_content_missing() {
        let handler = Probe {
            arguments: ArgumentSpec::new(1, 0, true),
            content: ContentSpec::Required,
        };
        let err = DirectiveCall::parse(&raw("python", &[]), &handler).unwrap_err();
        assert_eq!(err, DirectiveError::MissingContent("probe".to_owned()));
    }

    #[test]
    fn test_forbidden_content() {
        let handler = Probe {
            arguments: ArgumentSpec::new(1, 0, true),
            content: ContentSpec::Forbidden,
        };
        let err = DirectiveCall::parse(&raw("x", &["", "body"]), &handler).unwrap_err();
        assert_eq!(err, DirectiveError::ContentNotPermitted);
    }
}
