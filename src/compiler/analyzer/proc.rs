use crate::compiler::diag::{codes, Diag};
use crate::compiler::symbols::{Parameter, UnitKind};
use crate::compiler::token::{TokenContext, TokenKind};

use super::{Analyzer, Anchor, Scope};

/**
 * PROCEDURE DIVISION rules: the USING/RETURNING header, declaratives, and
 * the statement body driver. Individual statements live in `stat`.
 */

impl<'a> Analyzer<'a> {
    pub(super) fn procedure_division(&mut self) {
        self.scope = Scope::ProcedureDivision;
        self.advance();
        self.expected("DIVISION");

        if self.cur_is("USING") {
            self.using_phrase();
        }

        let kind = self.current_kind();
        if self.cur_is("RETURNING") {
            self.advance();
            if let Some(tok) = self.identifier() {
                self.with_signature(move |sig| sig.returning = Some(tok.lexeme));
            }
        } else if matches!(
            kind,
            Some(UnitKind::Function) | Some(UnitKind::FunctionPrototype)
        ) {
            self.diags.report(
                Diag::error(
                    codes::MISSING_RETURNING,
                    "A function must declare a RETURNING item.",
                )
                .at_token(self.lookahead(-1))
                .with_suggestion("Add 'RETURNING item-name' to the PROCEDURE DIVISION header."),
            );
        }
        self.expect_period();

        if kind.is_some_and(UnitKind::is_prototype) {
            self.prototype_body();
            return;
        }

        if self.cur_is("DECLARATIVES") {
            self.declaratives();
        }
        self.statement_body();
    }

    /// USING with alternating BY REFERENCE / BY VALUE groups; each parameter
    /// may be OPTIONAL. Parameters append to the unit's signature.
    fn using_phrase(&mut self) {
        self.advance();
        let mut by_reference = true;

        loop {
            if self.optional("BY") {
                if let Some(word) = self.choice(&["REFERENCE", "VALUE"]) {
                    by_reference = word == "REFERENCE";
                }
            } else if self.optional("REFERENCE") {
                by_reference = true;
            } else if self.optional("VALUE") {
                by_reference = false;
            }

            let optional_param = self.optional("OPTIONAL");

            if self.cur_kind(TokenKind::Identifier) {
                let tok = self.consume();
                let param = Parameter {
                    name: tok.lexeme,
                    by_reference,
                    optional: optional_param,
                };
                self.with_signature(move |sig| sig.parameters.push(param));
            } else {
                self.diags.report(
                    Diag::error(
                        codes::MISSING_USING_NAME,
                        format!(
                            "The USING phrase requires a parameter name, instead found '{}'.",
                            self.current()
                        ),
                    )
                    .at_token(self.lookahead(-1)),
                );
                break;
            }

            let more = self.cur_is_any(&["BY", "REFERENCE", "VALUE", "OPTIONAL"])
                || self.cur_kind(TokenKind::Identifier);
            if !more {
                break;
            }
        }
    }

    /// Prototype bodies must stay empty; anything else anchors to END.
    fn prototype_body(&mut self) {
        if self.cur_is("END") || self.current().is_eof() {
            return;
        }
        self.diags.report(
            Diag::error(
                codes::PROTOTYPE_WITH_BODY,
                "A prototype must not contain statements, sections or paragraphs.",
            )
            .at_token(self.current())
            .with_note("Prototypes declare an interface only; the body lives in the implementing unit."),
        );
        self.anchor_point(&[Anchor::Lexeme("END")]);
    }

    /// DECLARATIVES ... END DECLARATIVES.
    fn declaratives(&mut self) {
        self.advance();
        self.expect_period();

        while !self.cur_is("END") && !self.current().is_eof() {
            if self.cur_kind(TokenKind::Identifier) && self.lookahead(1).is("SECTION") {
                self.advance();
                self.advance();
                self.expect_period();
                if self.cur_is("USE") {
                    self.use_statement();
                }
            } else if self.cur_context(TokenContext::IsStatement) {
                self.statement();
                self.optional(".");
            } else if self.cur_kind(TokenKind::Identifier) && self.lookahead(1).is(".") {
                // Paragraph header.
                self.advance();
                self.advance();
            } else {
                self.advance();
            }
        }

        self.expected("END");
        self.expected("DECLARATIVES");
        self.expect_period();
    }

    /// USE [GLOBAL] AFTER [STANDARD] ERROR/EXCEPTION PROCEDURE [ON] names.
    fn use_statement(&mut self) {
        self.advance();
        self.optional("GLOBAL");
        self.expected("AFTER");
        self.optional("STANDARD");
        self.choice(&["ERROR", "EXCEPTION"]);
        self.expected("PROCEDURE");
        self.optional("ON");
        while self.cur_kind(TokenKind::Identifier)
            || self.cur_is_any(&["INPUT", "OUTPUT", "I-O", "EXTEND"])
        {
            self.advance();
        }
        self.expect_period();
    }

    /// Drives sentences, paragraph and section headers until the unit ends.
    pub(super) fn statement_body(&mut self) {
        loop {
            if self.current().is_eof() {
                return;
            }
            if self.cur_is("END")
                && self.lookahead(1).is_any(&[
                    "PROGRAM",
                    "FUNCTION",
                    "CLASS",
                    "INTERFACE",
                    "METHOD",
                    "FACTORY",
                    "OBJECT",
                ])
            {
                return;
            }
            if self.cur_is_any(&[
                "IDENTIFICATION",
                "ID",
                "PROGRAM-ID",
                "FUNCTION-ID",
                "CLASS-ID",
                "INTERFACE-ID",
                "METHOD-ID",
            ]) {
                return;
            }

            if self.cur_context(TokenContext::IsStatement) {
                self.statement();
                self.optional(".");
            } else if self.cur_kind(TokenKind::Identifier) && self.lookahead(1).is("SECTION") {
                self.advance();
                self.advance();
                self.expect_period();
            } else if self.cur_kind(TokenKind::Identifier) && self.lookahead(1).is(".") {
                // Paragraph header.
                self.advance();
                self.advance();
            } else {
                self.diags.report(
                    Diag::error(
                        codes::UNEXPECTED_TOKEN,
                        format!(
                            "Expected the beginning of a statement, instead found '{}'.",
                            self.current()
                        ),
                    )
                    .at_token(self.current())
                    .with_note(format!("While analyzing the {}.", self.scope)),
                );
                self.recover_to_statement();
            }
        }
    }

    /// Skips to the next plausible sentence boundary after a stray token.
    fn recover_to_statement(&mut self) {
        loop {
            let tok = self.current();
            if tok.is_eof()
                || tok.context == TokenContext::IsStatement
                || tok.is_any(&[
                    ".",
                    "END",
                    "IDENTIFICATION",
                    "PROGRAM-ID",
                    "FUNCTION-ID",
                    "CLASS-ID",
                    "INTERFACE-ID",
                    "METHOD-ID",
                ])
            {
                break;
            }
            self.advance();
        }
        self.optional(".");
    }
}
