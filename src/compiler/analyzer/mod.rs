/**
 * The analyzer: a recursive-descent walk over the shared token buffer.
 *
 * Every rule is non-failing by contract. On a mismatch a rule either
 * refuses to consume (small recoverable slips like a missing period) or
 * reports and skips forward to a synchronization token via `anchor_point`.
 * Errors are values in the diagnostic sink, never unwinds.
 */
use std::fmt::Display;

use super::diag::{codes, Diag, Diagnostics};
use super::symbols::{SourceUnitSignature, SymbolTable, UnitKind};
use super::token::{Token, TokenContext, TokenKind};

mod data;
mod env;
mod ident;
mod proc;
mod stat;

/// The section of the grammar the analyzer is currently inside, for
/// diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    ProgramId,
    FunctionId,
    ClassId,
    InterfaceId,
    MethodId,
    EnvironmentDivision,
    Repository,
    DataDivision,
    WorkingStorage,
    LocalStorage,
    LinkageSection,
    FileControl,
    ProcedureDivision,
}

impl Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Scope::ProgramId => "PROGRAM-ID paragraph",
            Scope::FunctionId => "FUNCTION-ID paragraph",
            Scope::ClassId => "CLASS-ID paragraph",
            Scope::InterfaceId => "INTERFACE-ID paragraph",
            Scope::MethodId => "METHOD-ID paragraph",
            Scope::EnvironmentDivision => "ENVIRONMENT DIVISION",
            Scope::Repository => "REPOSITORY paragraph",
            Scope::DataDivision => "DATA DIVISION",
            Scope::WorkingStorage => "WORKING-STORAGE SECTION",
            Scope::LocalStorage => "LOCAL-STORAGE SECTION",
            Scope::LinkageSection => "LINKAGE SECTION",
            Scope::FileControl => "FILE-CONTROL paragraph",
            Scope::ProcedureDivision => "PROCEDURE DIVISION",
        };
        f.write_str(name)
    }
}

/// One member of an `anchor_point` synchronization set.
pub(crate) enum Anchor<'s> {
    /// A lexeme, compared case-insensitively.
    Lexeme(&'s str),
    /// Any token carrying the given context tag.
    Context(TokenContext),
}

/// The recursive-descent analyzer over one compilation's token buffer.
pub(crate) struct Analyzer<'a> {
    tokens: &'a [Token],
    pos: usize,
    symbols: &'a mut SymbolTable,
    diags: &'a mut Diagnostics,

    /// Names of the enclosing source units, outermost first.
    unit_names: Vec<String>,
    /// Kinds of the enclosing source units, parallel to `unit_names`.
    unit_kinds: Vec<UnitKind>,
    /// Open level numbers of the record entry being analyzed.
    level_stack: Vec<u32>,
    /// Grammar section currently being analyzed.
    scope: Scope,
}

impl<'a> Analyzer<'a> {
    pub fn new(
        tokens: &'a [Token],
        symbols: &'a mut SymbolTable,
        diags: &'a mut Diagnostics,
    ) -> Self {
        Analyzer {
            tokens,
            pos: 0,
            symbols,
            diags,
            unit_names: Vec::new(),
            unit_kinds: Vec::new(),
            level_stack: Vec::new(),
            scope: Scope::ProgramId,
        }
    }

    /// Analyzes source-unit definitions until the EOF token.
    pub fn run(&mut self) {
        while !self.current().is_eof() {
            let before = self.pos;
            self.source_unit();

            // A top-level rule that refused to consume anything would spin
            // forever; force progress.
            if self.pos == before && !self.current().is_eof() {
                self.advance();
            }
        }
    }

    //////////////////////
    // Token operators. //
    //////////////////////

    /// The token under the cursor. Clamps at the trailing EOF token.
    pub(super) fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Reads `offset` positions away from the cursor, clamping at both ends
    /// of the buffer. `lookahead(-1)` is the previously consumed token.
    pub(super) fn lookahead(&self, offset: isize) -> &Token {
        let idx = (self.pos as isize + offset).clamp(0, self.tokens.len() as isize - 1);
        &self.tokens[idx as usize]
    }

    /// Moves the cursor forward one token, never past EOF.
    pub(super) fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    /// Clones the current token and advances past it.
    pub(super) fn consume(&mut self) -> Token {
        let tok = self.current().clone();
        self.advance();
        tok
    }

    /// Index of the cursor in the shared buffer, for clause declarations.
    pub(super) fn position(&self) -> usize {
        self.pos
    }

    pub(super) fn cur_is(&self, lexeme: &str) -> bool {
        self.current().is(lexeme)
    }

    pub(super) fn cur_is_any(&self, lexemes: &[&str]) -> bool {
        self.current().is_any(lexemes)
    }

    pub(super) fn cur_kind(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    pub(super) fn cur_context(&self, context: TokenContext) -> bool {
        self.current().context == context
    }

    /// Requires the current token to match the literal. On a match the token
    /// is consumed; on a mismatch an error is anchored at the previously
    /// consumed token and the cursor does not move.
    pub(super) fn expected(&mut self, lexeme: &str) -> bool {
        if self.cur_is(lexeme) {
            self.advance();
            return true;
        }
        let diag = Diag::error(
            codes::UNEXPECTED_TOKEN,
            format!("Expected '{}', instead found '{}'.", lexeme, self.current()),
        )
        .at_token(self.lookahead(-1))
        .with_note(format!("While analyzing the {}.", self.scope));
        self.diags.report(diag);
        false
    }

    /// Consumes the current token if it matches the literal; no-op otherwise.
    pub(super) fn optional(&mut self, lexeme: &str) -> bool {
        if self.cur_is(lexeme) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it matches any of the literals.
    pub(super) fn optional_any(&mut self, lexemes: &[&str]) -> bool {
        if self.cur_is_any(lexemes) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Requires one of the alternatives. Returns the upper-cased lexeme of
    /// the consumed token, or reports an error naming every alternative and
    /// leaves the cursor in place.
    pub(super) fn choice(&mut self, alternatives: &[&str]) -> Option<String> {
        if self.cur_is_any(alternatives) {
            return Some(self.consume().lexeme.to_ascii_uppercase());
        }
        let diag = Diag::error(
            codes::NO_ALTERNATIVE,
            format!(
                "Expected one of {}, instead found '{}'.",
                alternatives.join(", "),
                self.current()
            ),
        )
        .at_token(self.current())
        .with_note(format!("While analyzing the {}.", self.scope));
        self.diags.report(diag);
        None
    }

    /// Error-recovery primitive: advances until a token matching any member
    /// of the anchor set (or EOF). Used after a fatal rule mismatch to
    /// resume at the next plausible boundary.
    pub(super) fn anchor_point(&mut self, anchors: &[Anchor]) {
        loop {
            let tok = self.current();
            if tok.is_eof() {
                return;
            }
            let hit = anchors.iter().any(|anchor| match anchor {
                Anchor::Lexeme(lexeme) => tok.is(lexeme),
                Anchor::Context(context) => tok.context == *context,
            });
            if hit {
                return;
            }
            self.advance();
        }
    }

    /// Consumes a separator period, or reports a recoverable slip without
    /// consuming anything.
    pub(super) fn expect_period(&mut self) {
        if self.cur_is(".") {
            self.advance();
            return;
        }
        let diag = Diag::recovery(
            codes::MISSING_PERIOD,
            format!(
                "Missing separator period after '{}'.",
                self.lookahead(-1)
            ),
        )
        .at_token(self.lookahead(-1))
        .with_suggestion("Insert a '.' to end the construct.");
        self.diags.report(diag);
    }

    /// Consumes and returns a user-defined word. Reports when the current
    /// token cannot name anything.
    pub(super) fn identifier(&mut self) -> Option<Token> {
        if self.cur_kind(TokenKind::Identifier) {
            return Some(self.consume());
        }
        let diag = Diag::error(
            codes::UNEXPECTED_TOKEN,
            format!("Expected an identifier, instead found '{}'.", self.current()),
        )
        .at_token(self.current())
        .with_note(format!("While analyzing the {}.", self.scope));
        self.diags.report(diag);
        None
    }

    ///////////////////////////
    // Shared unit plumbing. //
    ///////////////////////////

    /// The fully-qualified name of the innermost open unit.
    pub(super) fn qualified_name(&self) -> String {
        self.unit_names.join("->")
    }

    /// The kind of the innermost open unit.
    pub(super) fn current_kind(&self) -> Option<UnitKind> {
        self.unit_kinds.last().copied()
    }

    /// Pushes a nested unit onto the name/kind stacks.
    pub(super) fn push_unit(&mut self, name: impl Into<String>, kind: UnitKind) {
        self.unit_names.push(name.into());
        self.unit_kinds.push(kind);
    }

    /// Pops one unit from the stacks. Locals are dropped with the outermost
    /// unit; globals persist across the whole compilation.
    pub(super) fn pop_unit(&mut self) {
        self.unit_names.pop();
        self.unit_kinds.pop();
        if self.unit_names.is_empty() {
            self.symbols.clear_locals();
        }
    }

    /// Registers the signature of the innermost unit under its
    /// fully-qualified name. Duplicates report and leave the original.
    pub(super) fn register_unit(&mut self, name_tok: &Token, signature: SourceUnitSignature) {
        if self.diags.resolution_pass {
            return;
        }
        let qualified = self.qualified_name();
        if self.symbols.add_global(&qualified, signature).is_err() {
            let diag = Diag::error(
                codes::DUPLICATE_GLOBAL,
                format!("Duplicate definition of '{}'.", qualified),
            )
            .at_token(name_tok)
            .with_note("Every source unit must have a unique fully-qualified name.");
            self.diags.report(diag);
        }
    }

    /// Applies a mutation to the innermost unit's registered signature.
    pub(super) fn with_signature(&mut self, f: impl FnOnce(&mut SourceUnitSignature)) {
        if self.diags.resolution_pass {
            return;
        }
        let qualified = self.qualified_name();
        if let Some(sig) = self.symbols.global_mut(&qualified) {
            f(sig);
        }
    }
}
