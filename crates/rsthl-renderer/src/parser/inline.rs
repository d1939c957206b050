//! Inline markup recognition.
//!
//! Start-strings must follow whitespace, the start of the text or opening
//! punctuation, and must be followed by non-whitespace. End-strings must
//! follow non-whitespace and be followed by whitespace, the end of the
//! text or closing punctuation.

use crate::nodes::{Inline, RefTarget, Reference, SystemMessage, normalize_name};

/// Characters allowed before an inline markup start-string.
const START_PRECEDING: &str = "-:/'\"<([{";

/// Characters allowed after an inline markup end-string.
const END_FOLLOWING: &str = "-.,:;!?\\/'\")]}>";

/// URI schemes recognized as standalone hyperlinks.
const SCHEMES: &[&str] = &["https://", "http://", "ftp://", "mailto:"];

/// Parse inline markup in `text`, which starts at source line `line`.
pub(crate) fn parse_inline(
    text: &str,
    line: usize,
    messages: &mut Vec<SystemMessage>,
) -> Vec<Inline> {
    InlineParser {
        chars: text.chars().collect(),
        pos: 0,
        buf: String::new(),
        out: Vec::new(),
        line,
        messages,
    }
    .run()
}

struct InlineParser<'m> {
    chars: Vec<char>,
    pos: usize,
    buf: String,
    out: Vec<Inline>,
    line: usize,
    messages: &'m mut Vec<SystemMessage>,
}

impl InlineParser<'_> {
    fn run(mut self) -> Vec<Inline> {
        while self.pos < self.chars.len() {
            let c = self.chars[self.pos];
            if c == '\\' {
                self.escape();
                continue;
            }
            if self.at_start_boundary()
                && (self.literal()
                    || self.strong()
                    || self.emphasis()
                    || self.interpreted()
                    || self.standalone_uri())
            {
                continue;
            }
            if c == '_' && self.simple_reference() {
                continue;
            }
            self.buf.push(c);
            self.pos += 1;
        }
        self.flush();
        self.out
    }

    fn flush(&mut self) {
        if !self.buf.is_empty() {
            self.out.push(Inline::Text(std::mem::take(&mut self.buf)));
        }
    }

    fn push(&mut self, inline: Inline) {
        self.flush();
        self.out.push(inline);
    }

    fn starts_with(&self, at: usize, s: &str) -> bool {
        let mut i = at;
        for c in s.chars() {
            if self.chars.get(i) != Some(&c) {
                return false;
            }
            i += 1;
        }
        true
    }

    fn at_start_boundary(&self) -> bool {
        self.pos == 0 || {
            let prev = self.chars[self.pos - 1];
            prev.is_whitespace() || START_PRECEDING.contains(prev)
        }
    }

    /// Whether the start-string of length `len` is followed by non-whitespace.
    fn start_followed_by_text(&self, len: usize) -> bool {
        self.chars
            .get(self.pos + len)
            .is_some_and(|c| !c.is_whitespace())
    }

    fn end_boundary(&self, at: usize) -> bool {
        self.chars
            .get(at)
            .is_none_or(|&c| c.is_whitespace() || END_FOLLOWING.contains(c))
    }

    /// Find an end-string starting at or after `from`.
    fn find_end(&self, from: usize, end: &str, escapes: bool) -> Option<usize> {
        let len = end.chars().count();
        (from + 1..self.chars.len()).find(|&j| {
            self.starts_with(j, end)
                && !self.chars[j - 1].is_whitespace()
                && !(escapes && self.chars[j - 1] == '\\')
                && self.end_boundary(j + len)
        })
    }

    fn collect(&self, from: usize, to: usize) -> String {
        self.chars[from..to].iter().collect()
    }

    /// Report an unmatched start-string and emit it as problematic text.
    fn unterminated(&mut self, start: &str, kind: &str) -> bool {
        self.messages.push(SystemMessage::warning(
            self.line,
            format!("Inline {kind} start-string without end-string."),
        ));
        self.push(Inline::Problematic(start.to_owned()));
        self.pos += start.chars().count();
        true
    }

    fn escape(&mut self) {
        match self.chars.get(self.pos + 1) {
            Some(c) if c.is_whitespace() => {}
            Some(&c) => self.buf.push(c),
            None => self.buf.push('\\'),
        }
        self.pos += 2;
    }

    fn literal(&mut self) -> bool {
        if !self.starts_with(self.pos, "``") || !self.start_followed_by_text(2) {
            return false;
        }
        let from = self.pos + 2;
        match self.find_end(from, "``", false) {
            Some(end) => {
                let text = self.collect(from, end);
                self.push(Inline::Literal(text));
                self.pos = end + 2;
                true
            }
            None => self.unterminated("``", "literal"),
        }
    }

    fn strong(&mut self) -> bool {
        if !self.starts_with(self.pos, "**") || !self.start_followed_by_text(2) {
            return false;
        }
        let from = self.pos + 2;
        match self.find_end(from, "**", true) {
            Some(end) => {
                let text = unescape(&self.collect(from, end));
                self.push(Inline::Strong(text));
                self.pos = end + 2;
                true
            }
            None => self.unterminated("**", "strong"),
        }
    }

    fn emphasis(&mut self) -> bool {
        if !self.starts_with(self.pos, "*") || !self.start_followed_by_text(1) {
            return false;
        }
        let from = self.pos + 1;
        match self.find_end(from, "*", true) {
            Some(end) => {
                let text = unescape(&self.collect(from, end));
                self.push(Inline::Emphasis(text));
                self.pos = end + 1;
                true
            }
            None => self.unterminated("*", "emphasis"),
        }
    }

    /// Interpreted text (`` `title` ``) or phrase reference (`` `text`_ ``).
    fn interpreted(&mut self) -> bool {
        if !self.starts_with(self.pos, "`")
            || self.starts_with(self.pos, "``")
            || !self.start_followed_by_text(1)
        {
            return false;
        }
        let from = self.pos + 1;
        let found = (from + 1..self.chars.len()).find_map(|j| {
            let prev = self.chars[j - 1];
            if self.chars[j] != '`' || prev.is_whitespace() || prev == '\\' {
                return None;
            }
            let mut after = j + 1;
            while after < self.chars.len() && after - j <= 2 && self.chars[after] == '_' {
                after += 1;
            }
            self.end_boundary(after).then_some((j, after))
        });

        let Some((end, after)) = found else {
            return self.unterminated("`", "interpreted text or phrase reference");
        };
        let content = self.collect(from, end);
        if after > end + 1 {
            let reference = phrase_reference(&content);
            self.push(Inline::Reference(reference));
        } else {
            self.push(Inline::TitleReference(unescape(&content)));
        }
        self.pos = after;
        true
    }

    fn standalone_uri(&mut self) -> bool {
        let Some(scheme) = SCHEMES.iter().find(|s| self.starts_with(self.pos, s)) else {
            return false;
        };
        let mut end = self.pos;
        while end < self.chars.len()
            && !self.chars[end].is_whitespace()
            && !matches!(self.chars[end], '<' | '>' | '"' | '`')
        {
            end += 1;
        }
        while end > self.pos
            && matches!(
                self.chars[end - 1],
                '.' | ',' | ';' | ':' | '!' | '?' | ')' | '\'' | '"'
            )
        {
            end -= 1;
        }
        if end - self.pos <= scheme.len() {
            return false;
        }
        let uri = self.collect(self.pos, end);
        self.push(Inline::Reference(Reference {
            text: uri.clone(),
            target: RefTarget::Uri(uri),
        }));
        self.pos = end;
        true
    }

    /// `word_` reference; the word is taken from the end of the text buffer.
    fn simple_reference(&mut self) -> bool {
        let mut after = self.pos + 1;
        if self.chars.get(after) == Some(&'_') {
            after += 1;
        }
        if !self.end_boundary(after) {
            return false;
        }

        let word_start = {
            let indices: Vec<(usize, char)> = self.buf.char_indices().collect();
            let mut start = indices.len();
            while start > 0 {
                let c = indices[start - 1].1;
                if c.is_alphanumeric() || matches!(c, '-' | '.' | '_' | '+' | ':') {
                    start -= 1;
                } else {
                    break;
                }
            }
            while start < indices.len() && !indices[start].1.is_alphanumeric() {
                start += 1;
            }
            if start == indices.len() {
                return false;
            }
            if start > 0 {
                let prev = indices[start - 1].1;
                if !(prev.is_whitespace() || START_PRECEDING.contains(prev)) {
                    return false;
                }
            }
            indices[start].0
        };
        if !self.buf[word_start..]
            .chars()
            .last()
            .is_some_and(char::is_alphanumeric)
        {
            return false;
        }

        let word = self.buf.split_off(word_start);
        self.push(Inline::Reference(Reference {
            target: RefTarget::Name(normalize_name(&word)),
            text: word,
        }));
        self.pos = after;
        true
    }
}

/// Build a reference from phrase text, handling an embedded `<uri>`.
fn phrase_reference(content: &str) -> Reference {
    if let Some(inner) = content.strip_suffix('>')
        && let Some(open) = inner.rfind('<')
        && (open == 0 || inner[..open].ends_with(char::is_whitespace))
    {
        let uri: String = inner[open + 1..].split_whitespace().collect();
        let text = unescape(inner[..open].trim());
        let text = if text.is_empty() { uri.clone() } else { text };
        let target = match uri.strip_suffix('_') {
            Some(name) if !name.ends_with('\\') => RefTarget::Name(normalize_name(name)),
            _ => RefTarget::Uri(uri),
        };
        return Reference { text, target };
    }

    let text = unescape(content);
    Reference {
        target: RefTarget::Name(normalize_name(&text)),
        text,
    }
}

/// Remove backslash escapes.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) if next.is_whitespace() => {}
                Some(next) => out.push(next),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::Level;
    use pretty_assertions::assert_eq;

    fn inline(text: &str) -> Vec<Inline> {
        let mut messages = Vec::new();
        let result = parse_inline(text, 1, &mut messages);
        assert!(messages.is_empty(), "unexpected messages: {messages:?}");
        result
    }

    fn text(s: &str) -> Inline {
        Inline::text(s)
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(inline("just text"), vec![text("just text")]);
    }

    #[test]
    fn test_emphasis_strong_literal() {
        assert_eq!(
            inline("*em* **strong** ``code``"),
            vec![
                Inline::Emphasis("em".to_owned()),
                text(" "),
                Inline::Strong("strong".to_owned()),
                text(" "),
                Inline::Literal("code".to_owned()),
            ]
        );
    }

    #[test]
    fn test_markup_requires_boundaries() {
        assert_eq!(inline("2 * 3 * 4"), vec![text("2 * 3 * 4")]);
        assert_eq!(inline("a*b*c"), vec![text("a*b*c")]);
    }

    #[test]
    fn test_literal_keeps_backslashes() {
        assert_eq!(
            inline(r"``C:\path``"),
            vec![Inline::Literal(r"C:\path".to_owned())]
        );
    }

    #[test]
    fn test_escapes() {
        assert_eq!(inline(r"\*not emphasis\*"), vec![text("*not emphasis*")]);
    }

    #[test]
    fn test_title_reference() {
        assert_eq!(
            inline("Read `The Book`."),
            vec![
                text("Read "),
                Inline::TitleReference("The Book".to_owned()),
                text("."),
            ]
        );
    }

    #[test]
    fn test_phrase_and_embedded_references() {
        assert_eq!(
            inline("`Some Section`_ and `site <https://example.org/>`_"),
            vec![
                Inline::Reference(Reference {
                    text: "Some Section".to_owned(),
                    target: RefTarget::Name("some section".to_owned()),
                }),
                text(" and "),
                Inline::Reference(Reference {
                    text: "site".to_owned(),
                    target: RefTarget::Uri("https://example.org/".to_owned()),
                }),
            ]
        );
    }

    #[test]
    fn test_embedded_alias() {
        assert_eq!(
            inline("`docs <Python_>`_"),
            vec![Inline::Reference(Reference {
                text: "docs".to_owned(),
                target: RefTarget::Name("python".to_owned()),
            })]
        );
    }

    #[test]
    fn test_simple_reference() {
        assert_eq!(
            inline("see Python_, please"),
            vec![
                text("see "),
                Inline::Reference(Reference {
                    text: "Python".to_owned(),
                    target: RefTarget::Name("python".to_owned()),
                }),
                text(", please"),
            ]
        );
        assert_eq!(inline("snake_case stays"), vec![text("snake_case stays")]);
    }

    #[test]
    fn test_standalone_uri() {
        assert_eq!(
            inline("Visit https://example.com/a."),
            vec![
                text("Visit "),
                Inline::Reference(Reference {
                    text: "https://example.com/a".to_owned(),
                    target: RefTarget::Uri("https://example.com/a".to_owned()),
                }),
                text("."),
            ]
        );
    }

    #[test]
    fn test_unterminated_emphasis() {
        let mut messages = Vec::new();
        let result = parse_inline("an *open start", 4, &mut messages);
        assert_eq!(
            result,
            vec![
                text("an "),
                Inline::Problematic("*".to_owned()),
                text("open start"),
            ]
        );
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].level, Level::Warning);
        assert_eq!(messages[0].line, 4);
        assert_eq!(
            messages[0].message,
            "Inline emphasis start-string without end-string."
        );
    }

    #[test]
    fn test_unterminated_literal() {
        let mut messages = Vec::new();
        parse_inline("``open", 1, &mut messages);
        assert_eq!(
            messages[0].message,
            "Inline literal start-string without end-string."
        );
    }
}
