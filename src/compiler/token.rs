use std::fmt::Display;

use serde::Serialize;

/// The classified kind of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) enum TokenKind {
    Reserved,
    Identifier,
    Numeric,
    String,
    National,
    Boolean,
    HexString,
    Symbol,
    FigurativeLiteral,
    IntrinsicFunction,
    Device,
    Eof,
}

impl TokenKind {
    /// Returns whether tokens of this kind compare by exact lexeme.
    /// Literals keep their case; everything else is compared folded.
    pub fn is_case_sensitive(self) -> bool {
        matches!(
            self,
            TokenKind::String | TokenKind::National | TokenKind::Boolean | TokenKind::HexString
        )
    }
}

/// The context tag attached to a token during classification.
///
/// The analyzer dispatches on these rather than on raw lexemes wherever a
/// whole family of keywords behaves the same (e.g. "skip to the next clause
/// keyword" during error recovery).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) enum TokenContext {
    None,
    IsClause,
    IsStatement,
    IsDevice,
    IsFigurative,
    IsSymbol,
    IsEof,
}

/// A single classified COBOL token.
///
/// Tokens are value records held in one shared buffer for the whole
/// compilation; the analyzer and the copybook expander reference them by
/// index, never by pointer, so in-place splicing is safe.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Token {
    /// The source text of the token, as written.
    pub lexeme: String,

    /// The classified kind of the token.
    pub kind: TokenKind,

    /// The context tag of the token.
    pub context: TokenContext,

    /// 1-based source line. The EOF token carries a sentinel of -5.
    pub line: i32,

    /// 1-based source column. The EOF token carries a sentinel of -5.
    pub column: i32,

    /// Index into the compilation's file list, for diagnostics.
    pub file_index: usize,
}

impl Token {
    /// Creates a new token record.
    pub fn new(
        lexeme: impl Into<String>,
        kind: TokenKind,
        context: TokenContext,
        line: i32,
        column: i32,
        file_index: usize,
    ) -> Self {
        Token {
            lexeme: lexeme.into(),
            kind,
            context,
            line,
            column,
            file_index,
        }
    }

    /// Creates the end-of-file sentinel token.
    /// Exactly one of these terminates every token buffer.
    pub fn eof() -> Self {
        Token {
            lexeme: String::new(),
            kind: TokenKind::Eof,
            context: TokenContext::IsEof,
            line: -5,
            column: -5,
            file_index: 0,
        }
    }

    /// Returns whether this is the end-of-file sentinel.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Case-insensitive lexeme comparison against a literal.
    pub fn is(&self, lexeme: &str) -> bool {
        self.lexeme.eq_ignore_ascii_case(lexeme)
    }

    /// Case-insensitive comparison against any of the given literals.
    pub fn is_any(&self, lexemes: &[&str]) -> bool {
        lexemes.iter().any(|l| self.is(l))
    }
}

impl PartialEq for Token {
    /// Tokens compare by lexeme: exact for literals, ASCII case-folded for
    /// reserved words and identifiers.
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind {
            return false;
        }
        if self.kind.is_case_sensitive() {
            self.lexeme == other.lexeme
        } else {
            self.lexeme.eq_ignore_ascii_case(&other.lexeme)
        }
    }
}

impl Eq for Token {}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_eof() {
            write!(f, "end of file")
        } else {
            write!(f, "{}", self.lexeme)
        }
    }
}
