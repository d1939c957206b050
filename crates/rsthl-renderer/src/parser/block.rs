//! Line classifiers for block-level constructs.

use crate::nodes::EnumStyle;

use super::Line;

/// Characters allowed in section adornments and transitions.
const ADORNMENT_CHARS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Bullet characters.
const BULLETS: &str = "*+-";

/// Section title style: adornment character and whether an overline is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Adornment {
    pub ch: char,
    pub overline: bool,
}

/// Enumerator formatting: `1.`, `1)` or `(1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum EnumFormat {
    Period,
    Paren,
    Parens,
}

/// Parsed list enumerator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Enumerator {
    pub style: EnumStyle,
    pub format: EnumFormat,
    /// Ordinal value; `None` for the auto-enumerator `#`.
    pub ordinal: Option<usize>,
    /// Column where the item body starts.
    pub width: usize,
}

/// Adornment character if the line consists of one repeated punctuation character.
pub(super) fn adornment(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let first = chars.next()?;
    if !ADORNMENT_CHARS.contains(first) {
        return None;
    }
    chars.all(|c| c == first).then_some(first)
}

/// Bullet character and body column of a bullet list item.
pub(super) fn bullet(text: &str) -> Option<(char, usize)> {
    let mut chars = text.chars();
    let marker = chars.next()?;
    if !BULLETS.contains(marker) {
        return None;
    }
    let rest = chars.as_str();
    if rest.is_empty() {
        return Some((marker, 2));
    }
    if !rest.starts_with(' ') {
        return None;
    }
    let spaces = rest.len() - rest.trim_start_matches(' ').len();
    Some((marker, 1 + spaces))
}

/// Parse an enumerator at the start of a line.
pub(super) fn enumerator(text: &str) -> Option<Enumerator> {
    let (open, body) = match text.strip_prefix('(') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let token_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '#'))
        .unwrap_or(body.len());
    let token = &body[..token_len];
    let (style, ordinal) = if token == "#" {
        (EnumStyle::Arabic, None)
    } else if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        (EnumStyle::Arabic, Some(token.parse().ok()?))
    } else if let &[b] = token.as_bytes() {
        match b {
            b'a'..=b'z' => (EnumStyle::LowerAlpha, Some(usize::from(b - b'a') + 1)),
            b'A'..=b'Z' => (EnumStyle::UpperAlpha, Some(usize::from(b - b'A') + 1)),
            _ => return None,
        }
    } else {
        return None;
    };

    let after = &body[token_len..];
    let (format, rest) = match (open, after.chars().next()) {
        (true, Some(')')) => (EnumFormat::Parens, &after[1..]),
        (false, Some(')')) => (EnumFormat::Paren, &after[1..]),
        (false, Some('.')) => (EnumFormat::Period, &after[1..]),
        _ => return None,
    };

    let marker_len = text.len() - rest.len();
    let width = if rest.is_empty() {
        marker_len + 1
    } else if rest.starts_with(' ') {
        marker_len + rest.len() - rest.trim_start_matches(' ').len()
    } else {
        return None;
    };

    Some(Enumerator {
        style,
        format,
        ordinal,
        width,
    })
}

/// End of the indented block starting at `start`, excluding trailing blank lines.
pub(super) fn indented_block_end(lines: &[Line], start: usize) -> usize {
    let mut end = start;
    while end < lines.len() && (lines[end].is_blank() || lines[end].indent() > 0) {
        end += 1;
    }
    while end > start && lines[end - 1].is_blank() {
        end -= 1;
    }
    end
}

/// Remove the common indentation of non-blank lines.
pub(super) fn dedent(lines: &[Line]) -> Vec<Line> {
    let indent = lines
        .iter()
        .filter(|l| !l.is_blank())
        .map(Line::indent)
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| Line::new(l.number, l.text.get(indent..).unwrap_or("")))
        .collect()
}

/// Split `name:: arguments` into the directive name and argument text.
pub(super) fn directive_name(text: &str) -> Option<(&str, &str)> {
    let (name, rest) = text.split_once("::")?;
    let valid = !name.is_empty()
        && name.starts_with(|c: char| c.is_alphanumeric())
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '+' | ':' | '.'));
    if !valid || !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
        return None;
    }
    Some((name, rest.trim()))
}

/// Strip a trailing `::` literal-block marker from paragraph text.
///
/// Returns the remaining paragraph text (`None` when the marker stood alone)
/// and whether a literal block should follow.
pub(super) fn strip_literal_marker(text: &str) -> (Option<String>, bool) {
    if text.trim() == "::" {
        return (None, true);
    }
    let Some(stripped) = text.strip_suffix("::") else {
        return (Some(text.to_owned()), false);
    };
    if stripped.ends_with(char::is_whitespace) {
        (Some(stripped.trim_end().to_owned()), true)
    } else {
        (Some(format!("{stripped}:")), true)
    }
}
