use crate::compiler::diag::{codes, Diag};
use crate::compiler::symbols::FileEntry;
use crate::compiler::token::TokenKind;

use super::{Analyzer, Anchor, Scope};

/**
 * ENVIRONMENT DIVISION rules: the REPOSITORY paragraph and FILE-CONTROL.
 */

impl<'a> Analyzer<'a> {
    pub(super) fn environment_division(&mut self) {
        self.scope = Scope::EnvironmentDivision;
        self.advance();
        self.expected("DIVISION");
        self.expect_period();

        if self.cur_is("CONFIGURATION") {
            self.advance();
            self.expected("SECTION");
            self.expect_period();
            if self.cur_is("REPOSITORY") {
                self.repository_paragraph();
            }
        }

        if self.cur_is("INPUT-OUTPUT") {
            self.advance();
            self.expected("SECTION");
            self.expect_period();
            if self.cur_is("FILE-CONTROL") {
                self.file_control();
            }
            if self.cur_is("I-O-CONTROL") {
                self.io_control();
            }
        }
    }

    /// REPOSITORY. declares every external CLASS / INTERFACE / FUNCTION /
    /// PROGRAM / PROPERTY name the unit references.
    fn repository_paragraph(&mut self) {
        self.scope = Scope::Repository;
        self.advance();
        self.expect_period();

        loop {
            if self.cur_is_any(&["CLASS", "INTERFACE", "PROGRAM", "PROPERTY"]) {
                self.advance();
                self.repository_name();
            } else if self.cur_is("FUNCTION") {
                self.advance();
                // FUNCTION ALL INTRINSIC imports the whole intrinsic set.
                if self.optional("ALL") {
                    self.expected("INTRINSIC");
                } else {
                    self.repository_function_name();
                    self.optional("INTRINSIC");
                }
            } else {
                break;
            }
        }

        self.expect_period();
    }

    /// One repository declaration: `name [AS "extern"] [EXPANDS name
    /// [USING name...]]`.
    fn repository_name(&mut self) {
        let Some(name_tok) = self.identifier() else {
            self.anchor_point(&[
                Anchor::Lexeme("CLASS"),
                Anchor::Lexeme("INTERFACE"),
                Anchor::Lexeme("FUNCTION"),
                Anchor::Lexeme("PROGRAM"),
                Anchor::Lexeme("PROPERTY"),
                Anchor::Lexeme("."),
            ]);
            return;
        };

        self.with_signature(|sig| sig.using.push(name_tok.lexeme.clone()));

        if self.optional("AS") {
            if self.cur_kind(TokenKind::String) {
                self.advance();
            } else {
                self.diags.report(
                    Diag::error(
                        codes::UNEXPECTED_TOKEN,
                        format!(
                            "Expected a string literal after AS, instead found '{}'.",
                            self.current()
                        ),
                    )
                    .at_token(self.lookahead(-1)),
                );
            }
        }

        if self.optional("EXPANDS") {
            self.identifier();
            if self.optional("USING") {
                let mut count = 0;
                while self.cur_kind(TokenKind::Identifier) {
                    self.advance();
                    count += 1;
                }
                if count == 0 {
                    self.diags.report(
                        Diag::error(
                            codes::MISSING_USING_NAME,
                            "EXPANDS ... USING must name at least one parameter.",
                        )
                        .at_token(self.lookahead(-1)),
                    );
                }
            }
        }
    }

    /// A FUNCTION repository entry may name either a user function or an
    /// intrinsic; both lex differently, so accept either kind.
    fn repository_function_name(&mut self) {
        if self.cur_kind(TokenKind::Identifier) || self.cur_kind(TokenKind::IntrinsicFunction) {
            let name = self.consume();
            self.with_signature(|sig| sig.using.push(name.lexeme.clone()));
            if self.optional("AS") && self.cur_kind(TokenKind::String) {
                self.advance();
            }
        } else {
            self.diags.report(
                Diag::error(
                    codes::UNEXPECTED_TOKEN,
                    format!(
                        "Expected a function name, instead found '{}'.",
                        self.current()
                    ),
                )
                .at_token(self.current()),
            );
            self.anchor_point(&[
                Anchor::Lexeme("CLASS"),
                Anchor::Lexeme("INTERFACE"),
                Anchor::Lexeme("FUNCTION"),
                Anchor::Lexeme("PROGRAM"),
                Anchor::Lexeme("PROPERTY"),
                Anchor::Lexeme("."),
            ]);
        }
    }

    /// FILE-CONTROL. with one or more SELECT entries.
    fn file_control(&mut self) {
        self.scope = Scope::FileControl;
        self.advance();
        self.expect_period();

        while self.cur_is("SELECT") {
            self.select_entry();
        }
    }

    /// SELECT [OPTIONAL] file-name ASSIGN [TO] target... followed by the
    /// clause tail, closed by a period. Registers a file entry on the
    /// current unit's signature.
    fn select_entry(&mut self) {
        self.advance();
        self.optional("OPTIONAL");

        let Some(name_tok) = self.identifier() else {
            self.anchor_point(&[
                Anchor::Lexeme("SELECT"),
                Anchor::Lexeme("I-O-CONTROL"),
                Anchor::Lexeme("."),
                Anchor::Lexeme("DATA"),
            ]);
            self.optional(".");
            return;
        };

        let mut entry = FileEntry {
            name: name_tok.lexeme.clone(),
            assign_to: Vec::new(),
        };

        while !self.cur_is(".") && !self.current().is_eof() && !self.cur_is("SELECT") {
            if self.cur_is("ASSIGN") {
                self.advance();
                self.optional("TO");
                while self.cur_kind(TokenKind::Identifier)
                    || self.cur_kind(TokenKind::String)
                    || self.cur_kind(TokenKind::Device)
                {
                    entry.assign_to.push(self.consume().lexeme);
                }
                if entry.assign_to.is_empty() {
                    self.diags.report(
                        Diag::error(
                            codes::UNEXPECTED_TOKEN,
                            "ASSIGN must name at least one target.",
                        )
                        .at_token(self.lookahead(-1)),
                    );
                }
            } else {
                // The remaining SELECT clauses (ORGANIZATION, ACCESS MODE,
                // FILE STATUS, LOCK MODE, ...) are validated for shape only.
                self.advance();
            }
        }
        self.expect_period();

        if self.diags.resolution_pass {
            return;
        }
        let qualified = self.qualified_name();
        let mut duplicate = false;
        if let Some(sig) = self.symbols.global_mut(&qualified) {
            duplicate = sig.add_file_entry(entry).is_err();
        }
        if duplicate {
            self.diags.report(
                Diag::error(
                    codes::DUPLICATE_FILE_ENTRY,
                    format!(
                        "File '{}' is selected more than once in this unit.",
                        name_tok.lexeme
                    ),
                )
                .at_token(&name_tok),
            );
        }
    }

    /// I-O-CONTROL. entries are validated for shape only.
    fn io_control(&mut self) {
        self.advance();
        self.expect_period();

        while self.cur_is_any(&["SAME", "APPLY", "MULTIPLE"]) {
            self.anchor_point(&[Anchor::Lexeme(".")]);
            self.expect_period();
        }
    }
}
