use serde::Serialize;

use super::token::Token;

/**
 * Structured diagnostics produced by the front-end.
 *
 * Diagnostics are values collected into a sink, never unwound through the
 * call stack; every analyzer rule keeps going after reporting. Rendering
 * (source excerpts, carets, color) belongs to the CLI layer.
 */

/// How bad a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub(crate) enum Severity {
    /// The analyzer recovered fully; compilation can still succeed.
    Recovery,
    /// Analysis continues, but the compilation is unsuccessful.
    Error,
    /// The pipeline cannot continue past this.
    Fatal,
}

/// Stable numeric codes for diagnostics.
#[rustfmt::skip]
pub(crate) mod codes {
    pub const UNTERMINATED_STRING: u16   = 10;
    pub const INVALID_CHARACTER: u16     = 11;
    pub const MISSING_PERIOD: u16        = 25;
    pub const DUPLICATE_GLOBAL: u16      = 30;
    pub const DUPLICATE_FILE_ENTRY: u16  = 31;
    pub const UNEXPECTED_TOKEN: u16      = 35;
    pub const NO_ALTERNATIVE: u16        = 36;
    pub const PROTOTYPE_CONFLICT: u16    = 40;
    pub const INITIAL_RECURSIVE: u16     = 41;
    pub const LEVEL_OUT_OF_ORDER: u16    = 50;
    pub const PICTURE_FORBIDDEN: u16     = 60;
    pub const PICTURE_REQUIRED: u16      = 61;
    pub const VALUE_FORBIDDEN: u16       = 62;
    pub const RENAMES_WITH_PICTURE: u16  = 63;
    pub const GROUP_WITH_PICTURE: u16    = 64;
    pub const BAD_VALUE_LITERAL: u16     = 70;
    pub const MISSING_RETURNING: u16     = 102;
    pub const MISSING_USING_NAME: u16    = 105;
    pub const PROTOTYPE_WITH_BODY: u16   = 110;
    pub const BAD_END_MARKER: u16        = 115;
    pub const COPYBOOK_NOT_FOUND: u16    = 120;
}

/// One structured diagnostic record.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Diag {
    pub severity: Severity,
    pub code: u16,

    /// One-line headline describing the problem.
    pub headline: String,

    /// Anchor position: owning file index and 1-based line/column.
    pub file_index: usize,
    pub line: i32,
    pub column: i32,

    /// Width of the offending lexeme, for caret underlining.
    pub width: usize,

    /// Explanatory notes shown below the excerpt.
    pub notes: Vec<String>,

    /// A concrete fix, where one is known.
    pub suggestion: Option<String>,
}

impl Diag {
    fn new(severity: Severity, code: u16, headline: impl Into<String>) -> Self {
        Diag {
            severity,
            code,
            headline: headline.into(),
            file_index: 0,
            line: -5,
            column: -5,
            width: 0,
            notes: Vec::new(),
            suggestion: None,
        }
    }

    pub fn recovery(code: u16, headline: impl Into<String>) -> Self {
        Self::new(Severity::Recovery, code, headline)
    }

    pub fn error(code: u16, headline: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, headline)
    }

    pub fn fatal(code: u16, headline: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, code, headline)
    }

    /// Anchors the diagnostic at an explicit source position.
    pub fn at(mut self, file_index: usize, line: i32, column: i32, width: usize) -> Self {
        self.file_index = file_index;
        self.line = line;
        self.column = column;
        self.width = width;
        self
    }

    /// Anchors the diagnostic at the given token.
    pub fn at_token(self, token: &Token) -> Self {
        let width = token.lexeme.chars().count().max(1);
        self.at(token.file_index, token.line, token.column, width)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Sink for diagnostics produced across the whole pipeline.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    records: Vec<Diag>,

    /// Count of records at severity Error or above.
    error_count: usize,

    /// When set, analyzer rules skip symbol-table mutations so a resolution
    /// pass can re-walk the stream without double-registration.
    pub resolution_pass: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn report(&mut self, diag: Diag) {
        if diag.severity >= Severity::Error {
            self.error_count += 1;
        }
        self.records.push(diag);
    }

    /// Number of diagnostics at severity Error or above.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Whether compilation has been error-free so far.
    pub fn is_clean(&self) -> bool {
        self.error_count == 0
    }

    /// All records, in the order analysis produced them.
    pub fn records(&self) -> &[Diag] {
        &self.records
    }
}
