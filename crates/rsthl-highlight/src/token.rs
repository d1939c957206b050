//! Tokens and the token type to CSS class table.

/// Lexical token: a type tag and the source text it covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<T> {
    pub tag: T,
    pub text: String,
}

impl<T> Token<T> {
    pub fn new(tag: T, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
        }
    }
}

/// Token with its tag replaced by a CSS class.
///
/// An empty class means the text is emitted without a wrapping span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifiedToken {
    pub class: &'static str,
    pub text: String,
}

/// CSS class naming scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TokenNames {
    /// Short classes (`kn`, `s2`, ...).
    #[default]
    Short,
    /// Hierarchy path classes (`keyword namespace`).
    Long,
    /// No lexing; code is emitted verbatim.
    None,
}

/// Token type hierarchy.
///
/// Variant names spell the path below the root, e.g. `KeywordNamespace` is
/// `Keyword.Namespace`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenType {
    Text,
    Whitespace,
    Error,
    Other,

    Keyword,
    KeywordConstant,
    KeywordDeclaration,
    KeywordNamespace,
    KeywordPseudo,
    KeywordReserved,
    KeywordType,

    Name,
    NameAttribute,
    NameBuiltin,
    NameBuiltinPseudo,
    NameClass,
    NameConstant,
    NameDecorator,
    NameEntity,
    NameException,
    NameFunction,
    NameLabel,
    NameNamespace,
    NameTag,
    NameVariable,

    Literal,
    String,
    StringChar,
    StringDoc,
    StringDouble,
    StringEscape,
    StringInterpol,
    StringRegex,
    StringSingle,
    StringSymbol,
    Number,
    NumberFloat,
    NumberHex,
    NumberInteger,

    Operator,
    OperatorWord,
    Punctuation,

    Comment,
    CommentMultiline,
    CommentPreproc,
    CommentSingle,
    CommentSpecial,

    Generic,
    GenericDeleted,
    GenericEmph,
    GenericError,
    GenericHeading,
    GenericInserted,
    GenericOutput,
    GenericPrompt,
    GenericStrong,
    GenericSubheading,
    GenericTraceback,
}

impl TokenType {
    /// Short and long CSS classes.
    ///
    /// Long classes are the lowercase hierarchy path; the root and `Text`
    /// components are left out since they are unstyled.
    #[must_use]
    pub const fn classes(self) -> (&'static str, &'static str) {
        match self {
            Self::Text => ("", ""),
            Self::Whitespace => ("w", "whitespace"),
            Self::Error => ("err", "error"),
            Self::Other => ("x", "other"),

            Self::Keyword => ("k", "keyword"),
            Self::KeywordConstant => ("kc", "keyword constant"),
            Self::KeywordDeclaration => ("kd", "keyword declaration"),
            Self::KeywordNamespace => ("kn", "keyword namespace"),
            Self::KeywordPseudo => ("kp", "keyword pseudo"),
            Self::KeywordReserved => ("kr", "keyword reserved"),
            Self::KeywordType => ("kt", "keyword type"),

            Self::Name => ("n", "name"),
            Self::NameAttribute => ("na", "name attribute"),
            Self::NameBuiltin => ("nb", "name builtin"),
            Self::NameBuiltinPseudo => ("bp", "name builtin pseudo"),
            Self::NameClass => ("nc", "name class"),
            Self::NameConstant => ("no", "name constant"),
            Self::NameDecorator => ("nd", "name decorator"),
            Self::NameEntity => ("ni", "name entity"),
            Self::NameException => ("ne", "name exception"),
            Self::NameFunction => ("nf", "name function"),
            Self::NameLabel => ("nl", "name label"),
            Self::NameNamespace => ("nn", "name namespace"),
            Self::NameTag => ("nt", "name tag"),
            Self::NameVariable => ("nv", "name variable"),

            Self::Literal => ("l", "literal"),
            Self::String => ("s", "literal string"),
            Self::StringChar => ("sc", "literal string char"),
            Self::StringDoc => ("sd", "literal string doc"),
            Self::StringDouble => ("s2", "literal string double"),
            Self::StringEscape => ("se", "literal string escape"),
            Self::StringInterpol => ("si", "literal string interpol"),
            Self::StringRegex => ("sr", "literal string regex"),
            Self::StringSingle => ("s1", "literal string single"),
            Self::StringSymbol => ("ss", "literal string symbol"),
            Self::Number => ("m", "literal number"),
            Self::NumberFloat => ("mf", "literal number float"),
            Self::NumberHex => ("mh", "literal number hex"),
            Self::NumberInteger => ("mi", "literal number integer"),

            Self::Operator => ("o", "operator"),
            Self::OperatorWord => ("ow", "operator word"),
            Self::Punctuation => ("p", "punctuation"),

            Self::Comment => ("c", "comment"),
            Self::CommentMultiline => ("cm", "comment multiline"),
            Self::CommentPreproc => ("cp", "comment preproc"),
            Self::CommentSingle => ("c1", "comment single"),
            Self::CommentSpecial => ("cs", "comment special"),

            Self::Generic => ("g", "generic"),
            Self::GenericDeleted => ("gd", "generic deleted"),
            Self::GenericEmph => ("ge", "generic emph"),
            Self::GenericError => ("gr", "generic error"),
            Self::GenericHeading => ("gh", "generic heading"),
            Self::GenericInserted => ("gi", "generic inserted"),
            Self::GenericOutput => ("go", "generic output"),
            Self::GenericPrompt => ("gp", "generic prompt"),
            Self::GenericStrong => ("gs", "generic strong"),
            Self::GenericSubheading => ("gu", "generic subheading"),
            Self::GenericTraceback => ("gt", "generic traceback"),
        }
    }

    /// CSS class under the given naming scheme.
    #[must_use]
    pub const fn class(self, names: TokenNames) -> &'static str {
        match names {
            TokenNames::Short => self.classes().0,
            TokenNames::Long => self.classes().1,
            TokenNames::None => "",
        }
    }
}
