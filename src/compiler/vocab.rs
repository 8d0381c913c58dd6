use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::token::{TokenContext, TokenKind};

/**
 * Process-wide vocabulary tables for token classification.
 *
 * All tables are keyed by the upper-cased lexeme and are initialized once on
 * first use, never mutated afterwards.
 */

/// Reserved words of the dialect. Figurative constants and device names are
/// deliberately not listed here; they live in the context table and classify
/// to their own token kinds.
#[rustfmt::skip]
const RESERVED_WORDS: &[&str] = &[
    // A
    "ACCEPT", "ACCESS", "ACTIVE-CLASS", "ADD", "ADDRESS", "ADVANCING", "AFTER",
    "ALIGNED", "ALL", "ALLOCATE", "ALPHABET", "ALPHABETIC", "ALPHABETIC-LOWER",
    "ALPHABETIC-UPPER", "ALPHANUMERIC", "ALPHANUMERIC-EDITED", "ALSO", "ALTER",
    "ALTERNATE", "AND", "ANY", "ANYCASE", "ARE", "AREA", "AREAS", "AS",
    "ASCENDING", "ASSIGN", "AT",
    // B
    "B-AND", "B-NOT", "B-OR", "B-SHIFT-L", "B-SHIFT-LC", "B-SHIFT-R",
    "B-SHIFT-RC", "B-XOR", "BASED", "BEFORE", "BINARY", "BINARY-CHAR",
    "BINARY-DOUBLE", "BINARY-LONG", "BINARY-SHORT", "BIT", "BLANK", "BLOCK",
    "BOOLEAN", "BOTTOM", "BY",
    // C
    "CALL", "CANCEL", "CF", "CH", "CHARACTER", "CHARACTERS", "CLASS",
    "CLASS-ID", "CLOSE", "CODE", "CODE-SET", "COL", "COLLATING", "COLS",
    "COLUMN", "COLUMNS", "COMMA", "COMMIT", "COMMON", "COMP", "COMP-1",
    "COMP-2", "COMP-3", "COMP-4", "COMP-5", "COMPUTATIONAL", "COMPUTATIONAL-1",
    "COMPUTATIONAL-2", "COMPUTATIONAL-3", "COMPUTATIONAL-4", "COMPUTATIONAL-5",
    "COMPUTE", "CONDITION", "CONFIGURATION", "CONSTANT", "CONTAINS", "CONTENT",
    "CONTINUE", "CONTROL", "CONTROLS", "CONVERTING", "COPY", "CORR",
    "CORRESPONDING", "COUNT", "CRT", "CURRENCY", "CURSOR",
    // D
    "DATA", "DATA-POINTER", "DATE", "DAY", "DAY-OF-WEEK", "DE",
    "DECIMAL-POINT", "DECLARATIVES", "DEFAULT", "DELETE", "DELIMITED",
    "DELIMITER", "DEPENDING", "DESCENDING", "DESTINATION", "DETAIL", "DISABLE",
    "DISPLAY", "DIVIDE", "DIVISION", "DOWN", "DUPLICATES", "DYNAMIC",
    // E
    "EC", "ELSE", "EMI", "ENABLE", "END", "END-ACCEPT", "END-ADD", "END-CALL",
    "END-COMPUTE", "END-DELETE", "END-DISPLAY", "END-DIVIDE", "END-EVALUATE",
    "END-IF", "END-MULTIPLY", "END-OF-PAGE", "END-PERFORM", "END-READ",
    "END-RECEIVE", "END-RETURN", "END-REWRITE", "END-SEARCH", "END-START",
    "END-STRING", "END-SUBTRACT", "END-UNSTRING", "END-WRITE", "ENTRY",
    "ENVIRONMENT", "EOP", "EQUAL", "ERROR", "EVALUATE", "EXCEPTION",
    "EXCEPTION-OBJECT", "EXCLUSIVE-OR", "EXIT", "EXPANDS", "EXTEND",
    "EXTERNAL",
    // F
    "FACTORY", "FALSE", "FD", "FILE", "FILE-CONTROL", "FILLER", "FINAL",
    "FINALLY", "FIRST", "FLOAT-BINARY-128", "FLOAT-BINARY-32",
    "FLOAT-BINARY-64", "FLOAT-DECIMAL-16", "FLOAT-DECIMAL-34",
    "FLOAT-EXTENDED", "FLOAT-INFINITY", "FLOAT-LONG", "FLOAT-NOT-A-NUMBER",
    "FLOAT-SHORT", "FOOTING", "FOR", "FORMAT", "FREE", "FROM", "FUNCTION",
    "FUNCTION-ID", "FUNCTION-POINTER",
    // G
    "GENERATE", "GET", "GIVING", "GLOBAL", "GO", "GOBACK", "GREATER", "GROUP",
    "GROUP-USAGE",
    // H
    "HEADING",
    // I
    "I-O", "I-O-CONTROL", "IDENTIFICATION", "IF", "IN", "INDEX", "INDEXED",
    "INDICATE", "INHERITS", "INITIAL", "INITIALIZE", "INITIATE", "INPUT",
    "INPUT-OUTPUT", "INSPECT", "INSTALLATION", "INTERFACE", "INTERFACE-ID",
    "INTO", "INTRINSIC", "INVALID", "INVOKE", "IS",
    // J
    "JUSTIFIED",
    // K
    "KEY",
    // L
    "LAST", "LEADING", "LEFT", "LENGTH", "LESS", "LIMIT", "LIMITS", "LINAGE",
    "LINAGE-COUNTER", "LINE", "LINE-COUNTER", "LINES", "LINKAGE",
    "LOCAL-STORAGE", "LOCALE", "LOCATION", "LOCK",
    // M
    "MERGE", "MESSAGE-TAG", "METHOD", "METHOD-ID", "MINUS", "MODE", "MOVE",
    "MULTIPLY",
    // N
    "NATIONAL", "NATIONAL-EDITED", "NATIVE", "NEGATIVE", "NESTED", "NEXT",
    "NO", "NOT", "NUMBER", "NUMERIC", "NUMERIC-EDITED",
    // O
    "OBJECT", "OBJECT-COMPUTER", "OBJECT-REFERENCE", "OCCURS", "OF", "OFF",
    "OMITTED", "ON", "OPEN", "OPTIONAL", "OPTIONS", "OR", "ORDER",
    "ORGANIZATION", "OTHER", "OUTPUT", "OVERFLOW", "OVERRIDE",
    // P
    "PACKED-DECIMAL", "PADDING", "PAGE", "PAGE-COUNTER", "PERFORM", "PF", "PH",
    "PIC", "PICTURE", "PLUS", "POINTER", "POSITION", "POSITIVE", "PRESENT",
    "PRINTING", "PROCEDURE", "PROCEED", "PROGRAM", "PROGRAM-ID",
    "PROGRAM-POINTER", "PROPERTY", "PROTOTYPE", "PURGE",
    // Q
    "QUEUE",
    // R
    "RAISE", "RAISING", "RANDOM", "RD", "READ", "RECEIVE", "RECORD",
    "RECORDS", "RECURSIVE", "REDEFINES", "REEL", "REFERENCE", "REFERENCES",
    "RELATIVE", "RELEASE", "REMAINDER", "REMOVAL", "RENAMES", "REPLACE",
    "REPLACING", "REPORT", "REPORTING", "REPORTS", "REPOSITORY", "RESERVE",
    "RESET", "RESUME", "RETRY", "RETURN", "RETURNING", "REWIND", "REWRITE",
    "RF", "RH", "RIGHT", "ROLLBACK", "ROUNDED", "RUN",
    // S
    "SAME", "SCREEN", "SD", "SEARCH", "SECTION", "SECURE", "SEGMENT",
    "SELECT", "SELF", "SEND", "SENTENCE", "SEPARATE", "SEQUENCE",
    "SEQUENTIAL", "SET", "SHARING", "SIGN", "SIZE", "SORT", "SORT-MERGE",
    "SOURCE", "SOURCE-COMPUTER", "SOURCES", "SPECIAL-NAMES", "STANDARD",
    "STANDARD-1", "STANDARD-2", "START", "STATUS", "STOP", "STRING", "STRONG",
    "SUB-QUEUE-1", "SUB-QUEUE-2", "SUB-QUEUE-3", "SUBTRACT", "SUM", "SUPER",
    "SUPPRESS", "SYMBOLIC", "SYNC", "SYNCHRONIZED", "SYSTEM-DEFAULT",
    // T
    "TABLE", "TALLYING", "TERMINAL", "TERMINATE", "TEST", "THAN", "THEN",
    "THROUGH", "THRU", "TIME", "TIMES", "TO", "TOP", "TRAILING", "TRUE",
    "TYPE", "TYPEDEF",
    // U
    "UNIT", "UNIVERSAL", "UNLOCK", "UNSTRING", "UNTIL", "UP", "UPON", "USAGE",
    "USE", "USER-DEFAULT", "USING",
    // V
    "VAL-STATUS", "VALID", "VALIDATE", "VALIDATE-STATUS", "VALUE", "VALUES",
    "VARYING",
    // W
    "WHEN", "WITH", "WORKING-STORAGE", "WRITE",
    // X
    "XOR",
];

/// Keywords that open a DATA DIVISION or FILE-CONTROL clause.
#[rustfmt::skip]
const CLAUSE_WORDS: &[&str] = &[
    "ACCESS", "ALIGNED", "ALTERNATE", "ANY", "ASCENDING", "ASSIGN", "BASED",
    "BLANK", "BLOCK", "CODE-SET", "COLLATING", "CONSTANT", "DEPENDING",
    "DESCENDING", "DYNAMIC", "EXTERNAL", "GLOBAL", "GROUP-USAGE", "INDEXED",
    "JUSTIFIED", "LINAGE", "LOCK", "OCCURS", "ORGANIZATION", "PADDING", "PIC",
    "PICTURE", "PROPERTY", "RECORD", "REDEFINES", "RELATIVE", "RENAMES",
    "RESERVE", "SAME", "SEQUENCE", "SHARING", "SIGN", "STATUS", "SYNC",
    "SYNCHRONIZED", "TYPE", "TYPEDEF", "USAGE", "VALUE", "VALUES", "VARYING",
];

/// Keywords that begin a PROCEDURE DIVISION statement.
#[rustfmt::skip]
const STATEMENT_WORDS: &[&str] = &[
    "ACCEPT", "ADD", "ALLOCATE", "ALTER", "CALL", "CANCEL", "CLOSE", "COMMIT",
    "COMPUTE", "CONTINUE", "DELETE", "DISABLE", "DISPLAY", "DIVIDE", "ENABLE",
    "EVALUATE", "EXIT", "FREE", "GENERATE", "GO", "GOBACK", "IF",
    "INITIALIZE", "INITIATE", "INSPECT", "INVOKE", "MERGE", "MOVE",
    "MULTIPLY", "OPEN", "PERFORM", "PURGE", "RAISE", "READ", "RECEIVE",
    "RELEASE", "RESUME", "RETURN", "REWRITE", "ROLLBACK", "SEARCH", "SEND",
    "SET", "SORT", "START", "STOP", "STRING", "SUBTRACT", "SUPPRESS",
    "TERMINATE", "UNLOCK", "UNSTRING", "VALIDATE", "WRITE",
];

/// Device names usable in ACCEPT/DISPLAY `UPON`/`FROM` phrases and
/// SPECIAL-NAMES.
#[rustfmt::skip]
const DEVICE_WORDS: &[&str] = &[
    "ALTERNATE-CONSOLE", "CONSOLE", "PRINTER", "STDERR", "STDIN", "STDOUT",
    "SYSIN", "SYSIPT", "SYSLIST", "SYSLST", "SYSOUT", "SYSPCH", "SYSPUNCH",
];

/// Figurative constants.
#[rustfmt::skip]
const FIGURATIVE_WORDS: &[&str] = &[
    "HIGH-VALUE", "HIGH-VALUES", "LOW-VALUE", "LOW-VALUES", "NULL", "NULLS",
    "QUOTE", "QUOTES", "SPACE", "SPACES", "ZERO", "ZEROES", "ZEROS",
];

/// Intrinsic function names, referenced via `FUNCTION name` or registered
/// through `REPOSITORY. FUNCTION ... INTRINSIC`.
#[rustfmt::skip]
const INTRINSIC_WORDS: &[&str] = &[
    "ABS", "ACOS", "ANNUITY", "ASIN", "ATAN", "BASECONVERT",
    "BOOLEAN-OF-INTEGER", "BYTE-LENGTH", "CHAR", "CHAR-NATIONAL",
    "COMBINED-DATETIME", "CONCAT", "CONCATENATE", "CONVERT", "COS",
    "CURRENT-DATE", "DATE-OF-INTEGER", "DATE-TO-YYYYMMDD", "DAY-OF-INTEGER",
    "DAY-TO-YYYYDDD", "DISPLAY-OF", "E", "EXCEPTION-FILE",
    "EXCEPTION-FILE-N", "EXCEPTION-LOCATION", "EXCEPTION-LOCATION-N",
    "EXCEPTION-STATEMENT", "EXCEPTION-STATUS", "EXP", "EXP10", "FACTORIAL",
    "FIND-STRING", "FORMATTED-CURRENT-DATE", "FORMATTED-DATE",
    "FORMATTED-DATETIME", "FORMATTED-TIME", "FRACTION-PART",
    "HIGHEST-ALGEBRAIC", "INTEGER", "INTEGER-OF-BOOLEAN", "INTEGER-OF-DATE",
    "INTEGER-OF-DAY", "INTEGER-OF-FORMATTED-DATE", "INTEGER-PART", "LENGTH",
    "LOCALE-COMPARE", "LOCALE-DATE", "LOCALE-TIME",
    "LOCALE-TIME-FROM-SECONDS", "LOG", "LOG10", "LOWER-CASE",
    "LOWEST-ALGEBRAIC", "MAX", "MEAN", "MEDIAN", "MIDRANGE", "MIN", "MOD",
    "MODULE-NAME", "NATIONAL-OF", "NUMVAL", "NUMVAL-C", "NUMVAL-F", "ORD",
    "ORD-MAX", "ORD-MIN", "PI", "PRESENT-VALUE", "RANGE", "REM", "REVERSE",
    "SECONDS-FROM-FORMATTED-TIME", "SECONDS-PAST-MIDNIGHT", "SIN",
    "SMALLEST-ALGEBRAIC", "SQRT", "STANDARD-COMPARE", "STANDARD-DEVIATION",
    "SUBSTITUTE", "TAN", "TEST-DATE-YYYYMMDD", "TEST-DAY-YYYYDDD",
    "TEST-FORMATTED-DATETIME", "TEST-NUMVAL", "TEST-NUMVAL-C",
    "TEST-NUMVAL-F", "TRIM", "UPPER-CASE", "VARIANCE", "WHEN-COMPILED",
    "YEAR-TO-YYYY",
];

/// Membership set for reserved words.
static RESERVED: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| RESERVED_WORDS.iter().copied().collect());

/// Membership set for intrinsic function names.
static INTRINSICS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| INTRINSIC_WORDS.iter().copied().collect());

/// Context tags for keywords that carry one. A keyword can only own a single
/// tag; the four source lists are disjoint by construction.
static CONTEXT: LazyLock<HashMap<&'static str, TokenContext>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for word in CLAUSE_WORDS {
        map.insert(*word, TokenContext::IsClause);
    }
    for word in STATEMENT_WORDS {
        map.insert(*word, TokenContext::IsStatement);
    }
    for word in DEVICE_WORDS {
        map.insert(*word, TokenContext::IsDevice);
    }
    for word in FIGURATIVE_WORDS {
        map.insert(*word, TokenContext::IsFigurative);
    }
    map
});

/// Returns whether the given lexeme is a reserved word.
pub(crate) fn is_reserved(word: &str) -> bool {
    RESERVED.contains(word.to_ascii_uppercase().as_str())
}

/// Returns whether the given lexeme names an intrinsic function.
pub(crate) fn is_intrinsic(word: &str) -> bool {
    INTRINSICS.contains(word.to_ascii_uppercase().as_str())
}

/// Returns the context tag for the given lexeme, if it has one.
pub(crate) fn context_of(word: &str) -> Option<TokenContext> {
    CONTEXT.get(word.to_ascii_uppercase().as_str()).copied()
}

/// Classifies a lexed word into its token kind and context tag.
///
/// Lookup order: reserved set, then the context table for device and
/// figurative words, then the intrinsic set. Anything left is a
/// user-defined identifier.
pub(crate) fn classify_word(word: &str) -> (TokenKind, TokenContext) {
    let context = context_of(word).unwrap_or(TokenContext::None);

    if is_reserved(word) {
        (TokenKind::Reserved, context)
    } else if context == TokenContext::IsDevice {
        (TokenKind::Device, context)
    } else if context == TokenContext::IsFigurative {
        (TokenKind::FigurativeLiteral, context)
    } else if is_intrinsic(word) {
        (TokenKind::IntrinsicFunction, TokenContext::None)
    } else {
        (TokenKind::Identifier, TokenContext::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_words_classify_as_reserved() {
        for word in RESERVED_WORDS {
            let (kind, context) = classify_word(word);
            assert_eq!(kind, TokenKind::Reserved, "word: {word}");
            assert_eq!(context, context_of(word).unwrap_or(TokenContext::None));
        }
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify_word("perform"), classify_word("PERFORM"));
        assert_eq!(classify_word("Zero"), classify_word("ZERO"));
        assert_eq!(classify_word("ws-total"), classify_word("WS-TOTAL"));
    }

    #[test]
    fn devices_and_figuratives_have_own_kinds() {
        assert_eq!(
            classify_word("CONSOLE"),
            (TokenKind::Device, TokenContext::IsDevice)
        );
        assert_eq!(
            classify_word("SPACES"),
            (TokenKind::FigurativeLiteral, TokenContext::IsFigurative)
        );
    }

    #[test]
    fn intrinsics_are_not_identifiers() {
        assert_eq!(
            classify_word("CURRENT-DATE"),
            (TokenKind::IntrinsicFunction, TokenContext::None)
        );
        assert_eq!(classify_word("MY-VAR").0, TokenKind::Identifier);
    }

    #[test]
    fn context_lists_are_disjoint_from_each_other() {
        // A keyword may carry at most one tag; overlapping lists would let
        // insertion order decide the winner.
        let mut seen = HashSet::new();
        for word in CLAUSE_WORDS
            .iter()
            .chain(STATEMENT_WORDS)
            .chain(DEVICE_WORDS)
            .chain(FIGURATIVE_WORDS)
        {
            assert!(seen.insert(*word), "duplicate context entry: {word}");
        }
    }
}
