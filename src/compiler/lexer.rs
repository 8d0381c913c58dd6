use logos::Logos;

use super::diag::{codes, Diag, Diagnostics};
use super::token::{Token, TokenContext, TokenKind};
use super::vocab;

/// Raw lexical shapes recognized on a normalized line.
///
/// Classification into the vocabulary-driven kinds happens after the raw
/// match: a `Word` might be a reserved word, an intrinsic function, a device
/// name, a figurative constant, or a plain identifier.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    #[regex(r#"[Nn]"[^"]*""#)]
    #[regex(r#"[Nn]'[^']*'"#)]
    National,

    #[regex(r#"[Bb]"[^"]*""#)]
    #[regex(r#"[Bb]'[^']*'"#)]
    Boolean,

    #[regex(r#"[Xx]"[^"]*""#)]
    #[regex(r#"[Xx]'[^']*'"#)]
    Hex,

    #[regex(r#""[^"]*""#)]
    #[regex(r#"'[^']*'"#)]
    Str,

    // A quote that never closes runs to the end of the line.
    #[regex(r#""[^"]*"#, priority = 1)]
    #[regex(r#"'[^']*"#, priority = 1)]
    UnterminatedStr,

    #[regex(r"[+-]?[0-9]+(\.[0-9]+)?([Ee][+-]?[0-9]+)?")]
    Number,

    #[regex(r"[a-zA-Z][a-zA-Z0-9_-]*")]
    Word,

    // ">>" alone and ">>WORD" directive heads both land here.
    #[regex(r">>[a-zA-Z0-9-]*")]
    DirectiveWord,

    #[token("**")]
    #[token("::")]
    #[token("<>")]
    #[token(">=")]
    #[token("<=")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("=")]
    #[token("/")]
    #[token("$")]
    #[token(",")]
    #[token(";")]
    #[token(".")]
    #[token("(")]
    #[token(")")]
    #[token(">")]
    #[token("<")]
    #[token("&")]
    #[token("_")]
    Symbol,

    #[regex(r"[ \t\f]+", logos::skip)]
    Whitespace,
}

/// Lexes one normalized line, appending classified tokens to the shared
/// buffer. Never fails; malformed input becomes diagnostics plus the best
/// available token so analysis can continue.
pub(crate) fn lex_line(
    line: &str,
    line_number: u32,
    file_index: usize,
    tokens: &mut Vec<Token>,
    diags: &mut Diagnostics,
) {
    let mut lexer = RawToken::lexer(line);
    while let Some(result) = lexer.next() {
        let lexeme = lexer.slice();
        let line_no = line_number as i32;
        let column = (lexer.span().start + 1) as i32;

        let raw = match result {
            Ok(raw) => raw,
            Err(()) => {
                diags.report(
                    Diag::recovery(
                        codes::INVALID_CHARACTER,
                        format!("Unrecognized character '{lexeme}' in source text."),
                    )
                    .at(file_index, line_no, column, lexeme.chars().count().max(1)),
                );
                continue;
            }
        };

        let (kind, context) = match raw {
            RawToken::National => (TokenKind::National, TokenContext::None),
            RawToken::Boolean => (TokenKind::Boolean, TokenContext::None),
            RawToken::Hex => (TokenKind::HexString, TokenContext::None),
            RawToken::Str => (TokenKind::String, TokenContext::None),
            RawToken::UnterminatedStr => {
                diags.report(
                    Diag::error(
                        codes::UNTERMINATED_STRING,
                        "String literal is missing its closing quote.",
                    )
                    .at(file_index, line_no, column, lexeme.chars().count())
                    .with_suggestion(format!(
                        "Close the literal: {}{}",
                        lexeme,
                        lexeme.chars().next().unwrap_or('"')
                    )),
                );
                (TokenKind::String, TokenContext::None)
            }
            RawToken::Number => (TokenKind::Numeric, TokenContext::None),
            RawToken::Word => vocab::classify_word(lexeme),
            RawToken::DirectiveWord | RawToken::Symbol => {
                (TokenKind::Symbol, TokenContext::IsSymbol)
            }
            RawToken::Whitespace => unreachable!(),
        };

        tokens.push(Token::new(lexeme, kind, context, line_no, column, file_index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(line: &str) -> (Vec<Token>, Diagnostics) {
        let mut tokens = Vec::new();
        let mut diags = Diagnostics::new();
        lex_line(line, 1, 0, &mut tokens, &mut diags);
        (tokens, diags)
    }

    #[test]
    fn words_split_on_whitespace_and_symbols() {
        let (tokens, diags) = lex("MOVE WS-TOTAL TO WS-OUT.");
        assert!(diags.is_clean());
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["MOVE", "WS-TOTAL", "TO", "WS-OUT", "."]);
        assert_eq!(tokens[0].kind, TokenKind::Reserved);
        assert_eq!(tokens[0].context, TokenContext::IsStatement);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn literal_prefixes_are_recognized() {
        let (tokens, _) = lex(r#"N"abc" B"1010" X"FF" "plain" 'single'"#);
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::National,
                TokenKind::Boolean,
                TokenKind::HexString,
                TokenKind::String,
                TokenKind::String,
            ]
        );
    }

    #[test]
    fn unterminated_string_reports_and_recovers() {
        let (tokens, diags) = lex(r#"DISPLAY "oops"#);
        assert_eq!(diags.error_count(), 1);
        assert_eq!(diags.records()[0].code, codes::UNTERMINATED_STRING);
        // The broken literal still reaches the stream.
        assert_eq!(tokens.last().unwrap().kind, TokenKind::String);
    }

    #[test]
    fn numerics_cover_signs_decimals_and_exponents() {
        let (tokens, _) = lex("01 -2.5 +3E10 4.25E-2");
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Numeric));
        assert_eq!(tokens[0].lexeme, "01");
        assert_eq!(tokens[3].lexeme, "4.25E-2");
    }

    #[test]
    fn sentence_period_is_not_swallowed_by_a_number() {
        let (tokens, _) = lex("ADD 1 TO X.");
        let last = tokens.last().unwrap();
        assert_eq!(last.lexeme, ".");
        assert_eq!(last.kind, TokenKind::Symbol);
    }

    #[test]
    fn columns_are_one_based() {
        let (tokens, _) = lex("  STOP RUN");
        assert_eq!(tokens[0].column, 3);
        assert_eq!(tokens[1].column, 8);
    }

    #[test]
    fn two_char_symbols_lex_as_one_token() {
        let (tokens, _) = lex("A >= B ** C :: D <> E");
        let symbols: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Symbol)
            .map(|t| t.lexeme.as_str())
            .collect();
        assert_eq!(symbols, vec![">=", "**", "::", "<>"]);
    }
}
