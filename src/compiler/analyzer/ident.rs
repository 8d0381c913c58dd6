use crate::compiler::diag::{codes, Diag};
use crate::compiler::symbols::{SourceUnitSignature, UnitKind};
use crate::compiler::token::TokenKind;

use super::{Analyzer, Anchor, Scope};

/**
 * IDENTIFICATION DIVISION rules: the -ID paragraphs, nested
 * factory/object/method units, and END markers.
 */

const ID_PARAGRAPHS: &[&str] = &["PROGRAM-ID", "FUNCTION-ID", "CLASS-ID", "INTERFACE-ID"];

impl<'a> Analyzer<'a> {
    /// Analyzes one whole source unit: the -ID paragraph, its divisions and
    /// the END marker.
    pub(super) fn source_unit(&mut self) {
        // The IDENTIFICATION DIVISION header itself is optional.
        if self.cur_is("IDENTIFICATION") || self.cur_is("ID") {
            self.advance();
            self.expected("DIVISION");
            self.expect_period();
        }

        let kind = if self.cur_is("PROGRAM-ID") {
            self.program_id()
        } else if self.cur_is("FUNCTION-ID") {
            self.function_id()
        } else if self.cur_is("CLASS-ID") {
            self.class_id()
        } else if self.cur_is("INTERFACE-ID") {
            self.interface_id()
        } else {
            self.choice(ID_PARAGRAPHS);
            self.anchor_point(&[
                Anchor::Lexeme("PROGRAM-ID"),
                Anchor::Lexeme("FUNCTION-ID"),
                Anchor::Lexeme("CLASS-ID"),
                Anchor::Lexeme("INTERFACE-ID"),
                Anchor::Lexeme("IDENTIFICATION"),
            ]);
            return;
        };

        if self.cur_is("ENVIRONMENT") {
            self.environment_division();
        }
        if self.cur_is("DATA") {
            self.data_division();
        }

        match kind {
            UnitKind::Class => self.factory_object(),
            UnitKind::Interface => self.interface_body(),
            _ => {
                if self.cur_is("PROCEDURE") {
                    self.procedure_division();
                }
            }
        }

        self.end_marker();
    }

    /// PROGRAM-ID. name [AS "extern"] [IS COMMON/INITIAL/RECURSIVE/PROTOTYPE
    /// [PROGRAM]].
    fn program_id(&mut self) -> UnitKind {
        self.scope = Scope::ProgramId;
        self.advance();
        self.expect_period();

        let Some(name_tok) = self.identifier() else {
            self.anchor_point(&[Anchor::Lexeme(".")]);
            self.optional(".");
            return UnitKind::Program;
        };

        let mut sig = SourceUnitSignature::new(name_tok.lexeme.clone(), UnitKind::Program);
        self.external_name_phrase(&mut sig);

        self.optional("IS");
        loop {
            if self.optional("COMMON") {
                sig.is_common = true;
            } else if self.optional("INITIAL") {
                sig.is_initial = true;
            } else if self.optional("RECURSIVE") {
                sig.is_recursive = true;
            } else if self.optional("PROTOTYPE") {
                sig.is_prototype = true;
            } else {
                break;
            }
        }
        self.optional("PROGRAM");

        if sig.is_prototype && (sig.is_common || sig.is_initial || sig.is_recursive) {
            self.diags.report(
                Diag::error(
                    codes::PROTOTYPE_CONFLICT,
                    "PROTOTYPE cannot be combined with COMMON, INITIAL or RECURSIVE.",
                )
                .at_token(&name_tok)
                .with_note("A prototype declares an interface only; activation attributes do not apply."),
            );
        }
        if sig.is_initial && sig.is_recursive {
            self.diags.report(
                Diag::error(
                    codes::INITIAL_RECURSIVE,
                    "INITIAL and RECURSIVE are mutually exclusive.",
                )
                .at_token(&name_tok),
            );
        }

        let kind = if sig.is_prototype {
            UnitKind::ProgramPrototype
        } else {
            UnitKind::Program
        };
        sig.kind = kind;

        self.push_unit(&name_tok.lexeme, kind);
        self.register_unit(&name_tok, sig);
        self.expect_period();
        kind
    }

    /// FUNCTION-ID. name [AS "extern"] [IS PROTOTYPE].
    fn function_id(&mut self) -> UnitKind {
        self.scope = Scope::FunctionId;
        self.advance();
        self.expect_period();

        let Some(name_tok) = self.identifier() else {
            self.anchor_point(&[Anchor::Lexeme(".")]);
            self.optional(".");
            return UnitKind::Function;
        };

        let mut sig = SourceUnitSignature::new(name_tok.lexeme.clone(), UnitKind::Function);
        self.external_name_phrase(&mut sig);

        self.optional("IS");
        if self.optional("PROTOTYPE") {
            sig.is_prototype = true;
        }

        let kind = if sig.is_prototype {
            UnitKind::FunctionPrototype
        } else {
            UnitKind::Function
        };
        sig.kind = kind;

        self.push_unit(&name_tok.lexeme, kind);
        self.register_unit(&name_tok, sig);
        self.expect_period();
        kind
    }

    /// CLASS-ID. name [AS "extern"] [IS FINAL] [INHERITS FROM names]
    /// [USING names].
    fn class_id(&mut self) -> UnitKind {
        self.scope = Scope::ClassId;
        self.advance();
        self.expect_period();

        let Some(name_tok) = self.identifier() else {
            self.anchor_point(&[Anchor::Lexeme(".")]);
            self.optional(".");
            return UnitKind::Class;
        };

        let mut sig = SourceUnitSignature::new(name_tok.lexeme.clone(), UnitKind::Class);
        self.external_name_phrase(&mut sig);

        self.optional("IS");
        if self.optional("FINAL") {
            sig.is_final = true;
        }
        self.inherits_phrase(&mut sig);
        self.using_names_phrase(&mut sig);

        self.push_unit(&name_tok.lexeme, UnitKind::Class);
        self.register_unit(&name_tok, sig);
        self.expect_period();
        UnitKind::Class
    }

    /// INTERFACE-ID. name [AS "extern"] [INHERITS FROM names] [USING names].
    fn interface_id(&mut self) -> UnitKind {
        self.scope = Scope::InterfaceId;
        self.advance();
        self.expect_period();

        let Some(name_tok) = self.identifier() else {
            self.anchor_point(&[Anchor::Lexeme(".")]);
            self.optional(".");
            return UnitKind::Interface;
        };

        let mut sig = SourceUnitSignature::new(name_tok.lexeme.clone(), UnitKind::Interface);
        self.external_name_phrase(&mut sig);
        self.inherits_phrase(&mut sig);
        self.using_names_phrase(&mut sig);

        self.push_unit(&name_tok.lexeme, UnitKind::Interface);
        self.register_unit(&name_tok, sig);
        self.expect_period();
        UnitKind::Interface
    }

    /// METHOD-ID. name [AS "extern"] [OVERRIDE] [IS FINAL]., or the
    /// GET/SET PROPERTY forms. Interface methods are prototypes.
    pub(super) fn method(&mut self, in_interface: bool) {
        self.scope = Scope::MethodId;
        self.advance();
        self.expect_period();

        let (name_tok, kind) = if self.cur_is("GET") || self.cur_is("SET") {
            let accessor = self.consume();
            let kind = if accessor.is("GET") {
                UnitKind::MethodGetter
            } else {
                UnitKind::MethodSetter
            };
            self.expected("PROPERTY");
            let Some(name_tok) = self.identifier() else {
                self.anchor_point(&[Anchor::Lexeme(".")]);
                self.optional(".");
                return;
            };
            (name_tok, kind)
        } else {
            let Some(name_tok) = self.identifier() else {
                self.anchor_point(&[Anchor::Lexeme(".")]);
                self.optional(".");
                return;
            };
            let kind = if in_interface {
                UnitKind::MethodPrototype
            } else {
                UnitKind::Method
            };
            (name_tok, kind)
        };

        let mut sig = SourceUnitSignature::new(name_tok.lexeme.clone(), kind);
        self.external_name_phrase(&mut sig);
        self.optional("OVERRIDE");
        self.optional("IS");
        if self.optional("FINAL") {
            sig.is_final = true;
        }

        self.push_unit(&name_tok.lexeme, kind);
        self.register_unit(&name_tok, sig);
        self.expect_period();

        if self.cur_is("ENVIRONMENT") {
            self.environment_division();
        }
        if self.cur_is("DATA") {
            self.data_division();
        }
        if self.cur_is("PROCEDURE") {
            self.procedure_division();
        }
        self.end_marker();
    }

    /// The FACTORY and OBJECT definitions of a class, in order.
    fn factory_object(&mut self) {
        if self.cur_is("FACTORY") {
            self.factory_or_object(UnitKind::Factory);
        }
        if self.cur_is("OBJECT") {
            self.factory_or_object(UnitKind::Object);
        }
    }

    fn factory_or_object(&mut self, kind: UnitKind) {
        let marker_tok = self.consume();
        self.expect_period();

        let name = marker_tok.lexeme.to_ascii_uppercase();
        self.push_unit(&name, kind);
        self.register_unit(&marker_tok, SourceUnitSignature::new(&name, kind));

        if self.cur_is("ENVIRONMENT") {
            self.environment_division();
        }
        if self.cur_is("DATA") {
            self.data_division();
        }
        if self.cur_is("PROCEDURE") {
            self.advance();
            self.expected("DIVISION");
            self.expect_period();
            while self.cur_is("METHOD-ID") {
                self.method(false);
            }
        }

        self.end_marker();
    }

    /// An interface's PROCEDURE DIVISION holds method prototypes only.
    fn interface_body(&mut self) {
        if self.cur_is("PROCEDURE") {
            self.advance();
            self.expected("DIVISION");
            self.expect_period();
            while self.cur_is("METHOD-ID") {
                self.method(true);
            }
        }
    }

    /// Closes the innermost unit: `END <KIND> [name].`, or EOF for an
    /// outermost program. Always pops exactly one unit.
    pub(super) fn end_marker(&mut self) {
        let Some(kind) = self.current_kind() else {
            return;
        };
        let unit_name = self.unit_names.last().cloned().unwrap_or_default();

        if self.current().is_eof() {
            // EOF is an accepted terminator for the outermost program only.
            if !(kind == UnitKind::Program && self.unit_names.len() == 1) {
                self.diags.report(
                    Diag::error(
                        codes::BAD_END_MARKER,
                        format!(
                            "Missing 'END {} {}.' before the end of the source.",
                            kind.end_marker_word(),
                            unit_name
                        ),
                    )
                    .at_token(self.lookahead(-1)),
                );
            }
            self.pop_unit();
            return;
        }

        if !self.cur_is("END") {
            self.diags.report(
                Diag::error(
                    codes::BAD_END_MARKER,
                    format!(
                        "Expected 'END {} {}.' to close this source unit.",
                        kind.end_marker_word(),
                        unit_name
                    ),
                )
                .at_token(self.current()),
            );
            self.pop_unit();
            return;
        }
        self.advance();

        if !self.optional(kind.end_marker_word()) {
            self.diags.report(
                Diag::error(
                    codes::BAD_END_MARKER,
                    format!(
                        "END marker names the wrong unit kind; expected 'END {}'.",
                        kind.end_marker_word()
                    ),
                )
                .at_token(self.current()),
            );
            // Step over a mismatched kind word so the name check still runs.
            if self.cur_is_any(&[
                "PROGRAM",
                "FUNCTION",
                "CLASS",
                "INTERFACE",
                "METHOD",
                "FACTORY",
                "OBJECT",
            ]) {
                self.advance();
            }
        }

        // FACTORY and OBJECT markers carry no name.
        if !matches!(kind, UnitKind::Factory | UnitKind::Object)
            && self.cur_kind(TokenKind::Identifier)
        {
            let marker_name = self.consume();
            if !marker_name.is(&unit_name) {
                self.diags.report(
                    Diag::recovery(
                        codes::BAD_END_MARKER,
                        format!(
                            "END marker names '{}', but the open unit is '{}'.",
                            marker_name.lexeme, unit_name
                        ),
                    )
                    .at_token(&marker_name),
                );
            }
        }

        self.expect_period();
        self.pop_unit();
    }

    /// `AS "external-name"`.
    fn external_name_phrase(&mut self, sig: &mut SourceUnitSignature) {
        if !self.optional("AS") {
            return;
        }
        if self.cur_kind(TokenKind::String) {
            sig.external_name = Some(self.consume().lexeme);
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

    /// `INHERITS [FROM] name...`.
    fn inherits_phrase(&mut self, sig: &mut SourceUnitSignature) {
        if !self.optional("INHERITS") {
            return;
        }
        self.optional("FROM");
        while self.cur_kind(TokenKind::Identifier) {
            sig.inherits.push(self.consume().lexeme);
        }
        if sig.inherits.is_empty() {
            self.diags.report(
                Diag::error(
                    codes::UNEXPECTED_TOKEN,
                    "INHERITS must name at least one class or interface.",
                )
                .at_token(self.lookahead(-1)),
            );
        }
    }

    /// `USING name...` on a CLASS-ID or INTERFACE-ID paragraph.
    fn using_names_phrase(&mut self, sig: &mut SourceUnitSignature) {
        if !self.optional("USING") {
            return;
        }
        while self.cur_kind(TokenKind::Identifier) {
            sig.using.push(self.consume().lexeme);
        }
        if sig.using.is_empty() {
            self.diags.report(
                Diag::error(
                    codes::MISSING_USING_NAME,
                    "USING must name at least one parameter.",
                )
                .at_token(self.lookahead(-1)),
            );
        }
    }
}
