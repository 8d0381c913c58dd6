use crate::compiler::diag::{codes, Diag};
use crate::compiler::symbols::{Clause, DataEntry, DataSection, UsageType};
use crate::compiler::token::{Token, TokenContext, TokenKind};

use super::{Analyzer, Scope};

/**
 * DATA DIVISION rules.
 *
 * Each entry consumes clauses until its separator period, recording a bit
 * and the opening token index for every clause seen. Clause-combination
 * rules run after the whole record closes, once group/elementary status is
 * known.
 */

impl<'a> Analyzer<'a> {
    pub(super) fn data_division(&mut self) {
        self.scope = Scope::DataDivision;
        self.advance();
        self.expected("DIVISION");
        self.expect_period();

        loop {
            if self.cur_is("WORKING-STORAGE") {
                self.storage_section(DataSection::WorkingStorage, Scope::WorkingStorage);
            } else if self.cur_is("LOCAL-STORAGE") {
                self.storage_section(DataSection::LocalStorage, Scope::LocalStorage);
            } else if self.cur_is("LINKAGE") {
                self.storage_section(DataSection::Linkage, Scope::LinkageSection);
            } else {
                break;
            }
        }
    }

    fn storage_section(&mut self, section: DataSection, scope: Scope) {
        self.scope = scope;
        self.advance();
        self.expected("SECTION");
        self.expect_period();
        self.level_stack.clear();

        while self.cur_kind(TokenKind::Numeric) {
            self.data_entry(section);
        }
    }

    /// Dispatches one entry by its leading level number.
    fn data_entry(&mut self, section: DataSection) {
        let level = parse_level(self.current());

        if level == Some(77) {
            if let Some((_, index)) = self.base_entry(section) {
                self.validate_entry(index);
            }
            self.level_stack.clear();
        } else if self.lookahead(2).is("CONSTANT") {
            self.constant_entry(section);
        } else {
            self.record_entry(section);
        }
    }

    /// A record entry: the leading 01 item plus every child until the level
    /// stack drains. Group items are discovered when their first child
    /// arrives; validation runs once the record is closed.
    fn record_entry(&mut self, section: DataSection) {
        let mut parsed: Vec<usize> = Vec::new();
        // Chain of open (level, arena index) pairs, outermost first.
        let mut chain: Vec<(u32, usize)> = Vec::new();

        loop {
            let Some(level) = parse_level(self.current()) else {
                self.diags.report(
                    Diag::error(
                        codes::LEVEL_OUT_OF_ORDER,
                        format!("'{}' is not a valid level number.", self.current()),
                    )
                    .at_token(self.current()),
                );
                self.advance();
                break;
            };

            // A new record or a 77 entry closes this one.
            if !chain.is_empty() && (level == 1 || level == 77) {
                break;
            }

            let Some((level, index)) = self.base_entry(section) else {
                break;
            };
            parsed.push(index);

            match level {
                66 => {
                    // RENAMES entries attach to the record itself.
                    if let Some(&(_, root)) = chain.first() {
                        self.symbols.entry_mut(index).parent = Some(root);
                    }
                }
                88 => {
                    // Condition-names attach to the item directly above.
                    if let Some(&(_, above)) = chain.last() {
                        self.symbols.entry_mut(index).parent = Some(above);
                    }
                }
                _ => {
                    while chain.last().is_some_and(|&(open, _)| open >= level) {
                        chain.pop();
                    }
                    if let Some(&(_, parent)) = chain.last() {
                        self.symbols.entry_mut(parent).is_group = true;
                        self.symbols.entry_mut(index).parent = Some(parent);
                    }
                    chain.push((level, index));
                }
            }

            if !self.cur_kind(TokenKind::Numeric) {
                break;
            }
            if self.level_stack.is_empty() && parse_level(self.current()) != Some(1) {
                break;
            }
        }

        // The record is closed; the stack must drain with it.
        self.level_stack.clear();
        for index in parsed {
            self.validate_entry(index);
        }
    }

    /// One base entry: level, data-name, clauses, period. Returns the level
    /// and arena index of the registered entry.
    fn base_entry(&mut self, section: DataSection) -> Option<(u32, usize)> {
        let level_tok = self.consume();
        let level = match parse_level(&level_tok) {
            Some(level) => level,
            None => {
                self.diags.report(
                    Diag::error(
                        codes::LEVEL_OUT_OF_ORDER,
                        format!("'{}' is not a valid level number.", level_tok.lexeme),
                    )
                    .at_token(&level_tok)
                    .with_note("Level numbers are 1-49, 66, 77, 78 and 88."),
                );
                66 // neutral: no stack interaction
            }
        };
        self.check_level_number(level, &level_tok);

        // An entry without a data-name is an anonymous FILLER.
        let name_tok = if self.cur_kind(TokenKind::Identifier) || self.cur_is("FILLER") {
            self.consume()
        } else {
            let mut filler = self.current().clone();
            filler.lexeme = "FILLER".into();
            filler.kind = TokenKind::Reserved;
            filler
        };

        let mut entry = DataEntry::new(name_tok, level, section);
        if level == 78 {
            entry.is_constant = true;
        }

        while !self.cur_is(".") && !self.current().is_eof() {
            // A plausible next entry here means the period was forgotten.
            if self.cur_kind(TokenKind::Numeric)
                && parse_level(self.current()).is_some()
                && (self.lookahead(1).kind == TokenKind::Identifier
                    || self.lookahead(1).is("FILLER"))
            {
                break;
            }
            if self.cur_is_any(&[
                "WORKING-STORAGE",
                "LOCAL-STORAGE",
                "LINKAGE",
                "PROCEDURE",
                "END",
            ]) {
                break;
            }

            let before = self.position();
            self.data_clause(&mut entry);
            if self.position() == before {
                self.diags.report(
                    Diag::error(
                        codes::UNEXPECTED_TOKEN,
                        format!("'{}' is not a known data description clause.", self.current()),
                    )
                    .at_token(self.current()),
                );
                self.advance();
            }
        }
        self.expect_period();

        if self.diags.resolution_pass {
            return None;
        }

        // Root-level items must be unique inside one unit; subordinate names
        // may repeat and disambiguate through OF qualification.
        if matches!(level, 1 | 77)
            && !entry.name().eq_ignore_ascii_case("FILLER")
            && self
                .symbols
                .local_all(entry.name())
                .any(|existing| matches!(existing.level, 1 | 77))
        {
            self.diags.report(
                Diag::error(
                    codes::DUPLICATE_GLOBAL,
                    format!("Duplicate root-level definition of '{}'.", entry.name()),
                )
                .at_token(&entry.token)
                .with_note("01 and 77 entries share one namespace within a source unit."),
            );
        }

        let index = self.symbols.add_local(entry);
        Some((level, index))
    }

    /// `01 name CONSTANT [AS] literal.` or `CONSTANT FROM name.`
    fn constant_entry(&mut self, section: DataSection) {
        let level_tok = self.consume();
        let level = parse_level(&level_tok).unwrap_or(1);

        let Some(name_tok) = self.identifier() else {
            self.anchor_point(&[super::Anchor::Lexeme(".")]);
            self.optional(".");
            return;
        };

        let mut entry = DataEntry::new(name_tok, level, section);
        entry.is_constant = true;
        entry.declare_clause(Clause::ConstantRecord, self.position());

        self.expected("CONSTANT");
        if self.optional("FROM") {
            self.identifier();
        } else {
            self.optional("AS");
            if is_literal(self.current()) {
                self.advance();
            } else {
                self.diags.report(
                    Diag::error(
                        codes::BAD_VALUE_LITERAL,
                        format!(
                            "Expected a literal for the constant, instead found '{}'.",
                            self.current()
                        ),
                    )
                    .at_token(self.current()),
                );
            }
        }
        self.expect_period();

        if !self.diags.resolution_pass {
            self.symbols.add_local(entry);
        }
    }

    /// Level-number stack discipline: 1 pushes, 2-49 push when increasing
    /// and pop back to their own level otherwise, 66/77/78/88 never touch
    /// the stack.
    fn check_level_number(&mut self, level: u32, tok: &Token) {
        match level {
            1 => self.level_stack.push(1),
            2..=49 => {
                let Some(&top) = self.level_stack.last() else {
                    self.diags.report(
                        Diag::error(
                            codes::LEVEL_OUT_OF_ORDER,
                            format!("Level {level} entry appears outside a record."),
                        )
                        .at_token(tok)
                        .with_note("Subordinate levels need an open 01 record entry."),
                    );
                    self.level_stack.push(level);
                    return;
                };
                if level > top {
                    self.level_stack.push(level);
                } else {
                    while self.level_stack.last().is_some_and(|&t| t > level) {
                        self.level_stack.pop();
                    }
                    if self.level_stack.last() != Some(&level) {
                        self.diags.report(
                            Diag::error(
                                codes::LEVEL_OUT_OF_ORDER,
                                format!(
                                    "Level {level} does not match any enclosing group level."
                                ),
                            )
                            .at_token(tok),
                        );
                        self.level_stack.push(level);
                    }
                }
            }
            66 | 77 | 78 | 88 => {}
            _ => {
                self.diags.report(
                    Diag::error(
                        codes::LEVEL_OUT_OF_ORDER,
                        format!("'{level}' is not a valid level number."),
                    )
                    .at_token(tok),
                );
            }
        }
    }

    ///////////////////////
    // Clause recognizers.
    ///////////////////////

    /// Recognizes one clause at the cursor, recording its bit and opening
    /// token index. Leaves the cursor untouched when nothing matches.
    fn data_clause(&mut self, entry: &mut DataEntry) {
        let opening = self.position();

        if self.cur_is_any(&["PIC", "PICTURE"]) {
            entry.declare_clause(Clause::Picture, opening);
            self.picture_clause();
        } else if self.cur_is("USAGE") {
            entry.declare_clause(Clause::Usage, opening);
            self.advance();
            self.optional("IS");
            entry.usage = self.usage_type();
        } else if self.cur_is_any(&[
            "COMP",
            "COMP-1",
            "COMP-2",
            "COMP-3",
            "COMP-4",
            "COMP-5",
            "COMPUTATIONAL",
            "COMPUTATIONAL-1",
            "COMPUTATIONAL-2",
            "COMPUTATIONAL-3",
            "COMPUTATIONAL-4",
            "COMPUTATIONAL-5",
            "BINARY",
            "PACKED-DECIMAL",
            "INDEX",
            "POINTER",
        ]) {
            // The USAGE keyword itself is optional.
            entry.declare_clause(Clause::Usage, opening);
            entry.usage = self.usage_type();
        } else if self.cur_is_any(&["VALUE", "VALUES"]) {
            entry.declare_clause(Clause::Value, opening);
            self.value_clause();
        } else if self.cur_is("OCCURS") {
            entry.declare_clause(Clause::Occurs, opening);
            self.occurs_clause();
        } else if self.cur_is("REDEFINES") {
            entry.declare_clause(Clause::Redefines, opening);
            self.advance();
            self.identifier();
        } else if self.cur_is("RENAMES") {
            entry.declare_clause(Clause::Renames, opening);
            self.advance();
            self.identifier();
            if self.optional_any(&["THROUGH", "THRU"]) {
                self.identifier();
            }
        } else if self.cur_is("TYPEDEF") {
            entry.declare_clause(Clause::Typedef, opening);
            self.advance();
            self.optional("STRONG");
        } else if self.cur_is("EXTERNAL") {
            entry.declare_clause(Clause::External, opening);
            self.advance();
            if self.optional("AS") {
                if self.cur_kind(TokenKind::String) {
                    entry.external_name = Some(self.consume().lexeme);
                } else {
                    self.diags.report(
                        Diag::error(
                            codes::UNEXPECTED_TOKEN,
                            "EXTERNAL AS requires a string literal.",
                        )
                        .at_token(self.lookahead(-1)),
                    );
                }
            }
        } else if self.cur_is("GLOBAL") {
            entry.declare_clause(Clause::Global, opening);
            self.advance();
        } else if self.cur_is("DYNAMIC") {
            entry.declare_clause(Clause::Dynamic, opening);
            self.advance();
            self.optional("LENGTH");
            if self.optional("LIMIT") {
                self.optional("IS");
                if self.cur_kind(TokenKind::Numeric) {
                    self.advance();
                } else {
                    self.diags.report(
                        Diag::error(
                            codes::UNEXPECTED_TOKEN,
                            "DYNAMIC LENGTH LIMIT requires a numeric literal.",
                        )
                        .at_token(self.lookahead(-1)),
                    );
                }
            }
        } else if self.cur_is("BLANK") {
            entry.declare_clause(Clause::Blank, opening);
            self.advance();
            self.optional("WHEN");
            self.optional_any(&["ZERO", "ZEROS", "ZEROES"]);
        } else if self.cur_is_any(&["JUSTIFIED", "JUST"]) {
            entry.declare_clause(Clause::Justified, opening);
            self.advance();
            self.optional("RIGHT");
        } else if self.cur_is_any(&["SYNCHRONIZED", "SYNC"]) {
            entry.declare_clause(Clause::Synchronized, opening);
            self.advance();
            self.optional_any(&["LEFT", "RIGHT"]);
        } else if self.cur_is("ALIGNED") {
            entry.declare_clause(Clause::Aligned, opening);
            self.advance();
        } else if self.cur_is("ANY") {
            entry.declare_clause(Clause::AnyLength, opening);
            self.advance();
            self.expected("LENGTH");
        } else if self.cur_is("BASED") {
            entry.declare_clause(Clause::Based, opening);
            self.advance();
        } else if self.cur_is("GROUP-USAGE") {
            entry.declare_clause(Clause::GroupUsage, opening);
            self.advance();
            self.optional("IS");
            self.choice(&["BIT", "NATIONAL"]);
        } else if self.cur_is("PROPERTY") {
            entry.declare_clause(Clause::Property, opening);
            self.advance();
            if self.optional("WITH") || self.cur_is("NO") {
                self.expected("NO");
                self.choice(&["GET", "SET"]);
            }
            self.optional("IS");
            self.optional("FINAL");
        } else if self.cur_is("CONSTANT") {
            entry.declare_clause(Clause::ConstantRecord, opening);
            entry.is_constant = true;
            self.advance();
            self.optional("RECORD");
        } else if self.cur_is("SAME") {
            entry.declare_clause(Clause::SameAs, opening);
            self.advance();
            self.expected("AS");
            self.identifier();
        } else if self.cur_is("TYPE") {
            entry.declare_clause(Clause::Type, opening);
            self.advance();
            self.identifier();
        } else if self.cur_is("IS") && self.lookahead(1).is_any(&["TYPEDEF", "GLOBAL", "EXTERNAL"])
        {
            // Leading IS of a following clause.
            self.advance();
        }
    }

    /// PIC/PICTURE [IS] character-string, with `(n)` repetition counts.
    fn picture_clause(&mut self) {
        let keyword_tok = self.consume();
        self.optional("IS");

        let mut picture = String::new();
        loop {
            let tok = self.current();
            // A level number opening the next entry is not a picture part,
            // even though it looks like one after a forgotten period.
            if parse_level(tok).is_some()
                && (self.lookahead(1).kind == TokenKind::Identifier
                    || self.lookahead(1).is("FILLER"))
            {
                break;
            }
            let is_part = match tok.kind {
                TokenKind::Numeric => tok.lexeme.chars().all(|c| c.is_ascii_digit()),
                TokenKind::Identifier => tok
                    .lexeme
                    .chars()
                    .all(|c| "ABEGNPSVXZ09".contains(c.to_ascii_uppercase())),
                _ => false,
            };
            if !is_part {
                break;
            }
            picture.push_str(&self.consume().lexeme.to_ascii_uppercase());

            while self.cur_is("(") {
                self.advance();
                if self.cur_kind(TokenKind::Numeric) {
                    picture.push('(');
                    picture.push_str(&self.consume().lexeme);
                    picture.push(')');
                } else {
                    self.diags.report(
                        Diag::error(
                            codes::UNEXPECTED_TOKEN,
                            "A repetition count must be a number.",
                        )
                        .at_token(self.current()),
                    );
                }
                self.expected(")");
            }
        }

        if picture.is_empty() {
            self.diags.report(
                Diag::error(
                    codes::UNEXPECTED_TOKEN,
                    "PICTURE clause is missing its character-string.",
                )
                .at_token(&keyword_tok),
            );
            // Resume at the next clause keyword or the entry's period.
            self.anchor_point(&[
                super::Anchor::Lexeme("."),
                super::Anchor::Context(TokenContext::IsClause),
            ]);
            return;
        }

        // An implied decimal point only combines with numeric pictures.
        if let Some(v_at) = picture.find('V') {
            let head = &picture[..v_at];
            let numeric_head = head.starts_with('9') || head.starts_with("S9");
            if !numeric_head {
                self.diags.report(
                    Diag::error(
                        codes::UNEXPECTED_TOKEN,
                        format!("'{picture}' places V after a non-numeric picture."),
                    )
                    .at_token(&keyword_tok)
                    .with_note("V requires a 9 or S9 picture to its left."),
                );
            }
        }
    }

    /// Maps the usage keyword(s) at the cursor to a UsageType.
    fn usage_type(&mut self) -> Option<UsageType> {
        let lexeme = self.current().lexeme.to_ascii_uppercase();
        let usage = match lexeme.as_str() {
            "BINARY" => UsageType::Binary,
            "BINARY-CHAR" => UsageType::BinaryChar,
            "BINARY-SHORT" => UsageType::BinaryShort,
            "BINARY-LONG" => UsageType::BinaryLong,
            "BINARY-DOUBLE" => UsageType::BinaryDouble,
            "BIT" => UsageType::Bit,
            "COMP" | "COMPUTATIONAL" | "COMP-4" | "COMPUTATIONAL-4" => UsageType::Computational,
            "COMP-1" | "COMPUTATIONAL-1" | "FLOAT-SHORT" => UsageType::FloatShort,
            "COMP-2" | "COMPUTATIONAL-2" | "FLOAT-LONG" => UsageType::FloatLong,
            "COMP-3" | "COMPUTATIONAL-3" | "PACKED-DECIMAL" => UsageType::PackedDecimal,
            "COMP-5" | "COMPUTATIONAL-5" => UsageType::Binary,
            "DISPLAY" => UsageType::Display,
            "FLOAT-BINARY-32" => UsageType::FloatBinary32,
            "FLOAT-BINARY-64" => UsageType::FloatBinary64,
            "FLOAT-BINARY-128" => UsageType::FloatBinary128,
            "FLOAT-DECIMAL-16" => UsageType::FloatDecimal16,
            "FLOAT-DECIMAL-34" => UsageType::FloatDecimal34,
            "FLOAT-EXTENDED" => UsageType::FloatExtended,
            "INDEX" => UsageType::Index,
            "MESSAGE-TAG" => UsageType::MessageTag,
            "NATIONAL" => UsageType::National,
            "OBJECT" => {
                self.advance();
                self.expected("REFERENCE");
                if self.cur_kind(TokenKind::Identifier) || self.cur_is("ACTIVE-CLASS") {
                    self.advance();
                }
                return Some(UsageType::ObjectReference);
            }
            "POINTER" => {
                self.advance();
                self.optional("TO");
                if self.cur_kind(TokenKind::Identifier) {
                    self.advance();
                }
                return Some(UsageType::DataPointer);
            }
            "FUNCTION-POINTER" => {
                self.advance();
                self.optional("TO");
                if self.cur_kind(TokenKind::Identifier) {
                    self.advance();
                }
                return Some(UsageType::FunctionPointer);
            }
            "PROGRAM-POINTER" => {
                self.advance();
                self.optional("TO");
                if self.cur_kind(TokenKind::Identifier) {
                    self.advance();
                }
                return Some(UsageType::ProgramPointer);
            }
            _ => {
                self.diags.report(
                    Diag::error(
                        codes::UNEXPECTED_TOKEN,
                        format!("'{}' is not a recognized USAGE.", self.current()),
                    )
                    .at_token(self.current()),
                );
                return None;
            }
        };
        self.advance();
        Some(usage)
    }

    /// VALUE [IS] / VALUES [ARE] literal [THRU literal]...
    fn value_clause(&mut self) {
        let keyword_tok = self.consume();
        self.optional("IS");
        self.optional("ARE");

        let mut any = false;
        loop {
            if is_literal(self.current()) {
                self.advance();
                any = true;
                if self.optional_any(&["THROUGH", "THRU"]) {
                    continue;
                }
                if is_literal(self.current()) {
                    continue;
                }
            }
            break;
        }

        if !any {
            self.diags.report(
                Diag::error(codes::BAD_VALUE_LITERAL, "VALUE requires a literal.")
                    .at_token(&keyword_tok),
            );
        }
    }

    /// OCCURS [m TO] n [TIMES] [DEPENDING ON name] [keys] [INDEXED BY ...].
    fn occurs_clause(&mut self) {
        self.advance();

        if self.cur_kind(TokenKind::Numeric) {
            self.advance();
            if self.optional("TO") {
                if self.cur_kind(TokenKind::Numeric) {
                    self.advance();
                } else {
                    self.diags.report(
                        Diag::error(
                            codes::UNEXPECTED_TOKEN,
                            "OCCURS m TO n requires an upper bound.",
                        )
                        .at_token(self.current()),
                    );
                }
            }
        } else {
            self.diags.report(
                Diag::error(codes::UNEXPECTED_TOKEN, "OCCURS requires a repetition count.")
                    .at_token(self.current()),
            );
        }
        self.optional("TIMES");

        if self.optional("DEPENDING") {
            self.optional("ON");
            self.identifier();
        }
        while self.cur_is_any(&["ASCENDING", "DESCENDING"]) {
            self.advance();
            self.optional("KEY");
            self.optional("IS");
            while self.cur_kind(TokenKind::Identifier) {
                self.advance();
            }
        }
        if self.optional("INDEXED") {
            self.optional("BY");
            while self.cur_kind(TokenKind::Identifier) {
                self.advance();
            }
        }
    }

    //////////////////////////////
    // Clause combination rules.
    //////////////////////////////

    /// Runs the cross-clause checks once an entry's group/elementary status
    /// is final.
    fn validate_entry(&mut self, index: usize) {
        let entry = self.symbols.entry(index);
        let name = entry.name().to_string();
        let anchor = entry.token.clone();
        let level = entry.level;
        let usage = entry.usage;
        let is_group = entry.is_group;
        let is_constant = entry.is_constant;
        let has_picture = entry.has_clause(Clause::Picture);
        let has_value = entry.has_clause(Clause::Value);
        let has_renames = entry.has_clause(Clause::Renames);
        let exempt_from_picture = entry.has_clause(Clause::AnyLength)
            || entry.has_clause(Clause::SameAs)
            || entry.has_clause(Clause::Type)
            || entry.has_clause(Clause::GroupUsage)
            || entry.has_clause(Clause::ConstantRecord);
        let value_kind = self.value_literal_kind(index);

        if let Some(usage) = usage {
            if usage.forbids_picture() && has_picture {
                self.diags.report(
                    Diag::error(
                        codes::PICTURE_FORBIDDEN,
                        format!("PICTURE cannot be used with USAGE {usage:?}."),
                    )
                    .at_token(&anchor)
                    .with_note("This usage fully determines the item's representation."),
                );
            }
            if usage.forbids_value() && has_value {
                self.diags.report(
                    Diag::error(
                        codes::VALUE_FORBIDDEN,
                        format!("VALUE cannot be used with USAGE {usage:?}."),
                    )
                    .at_token(&anchor),
                );
            }
        }

        if is_group && has_picture {
            self.diags.report(
                Diag::error(
                    codes::GROUP_WITH_PICTURE,
                    format!("Group item '{name}' cannot carry a PICTURE clause."),
                )
                .at_token(&anchor),
            );
        }

        if has_renames && has_picture {
            self.diags.report(
                Diag::error(
                    codes::RENAMES_WITH_PICTURE,
                    "RENAMES entries cannot carry a PICTURE clause.",
                )
                .at_token(&anchor),
            );
        }

        // An elementary item needs a PICTURE unless the usage fixes the
        // representation or a string-like VALUE implies one.
        let usage_fixes_layout = usage.is_some_and(|u| u.forbids_picture());
        let value_implies_layout = matches!(
            value_kind,
            Some(TokenKind::String) | Some(TokenKind::Boolean) | Some(TokenKind::National)
        );
        if !is_group
            && !has_picture
            && !usage_fixes_layout
            && !value_implies_layout
            && !is_constant
            && !has_renames
            && !exempt_from_picture
            && !matches!(level, 66 | 88)
        {
            self.diags.report(
                Diag::error(
                    codes::PICTURE_REQUIRED,
                    format!("Elementary item '{name}' has no PICTURE clause."),
                )
                .at_token(&anchor)
                .with_suggestion("Add a PICTURE clause, or a USAGE that fixes the layout."),
            );
        }
    }

    /// Lazily re-scans the token span of an entry's VALUE clause for the
    /// literal's kind.
    fn value_literal_kind(&self, index: usize) -> Option<TokenKind> {
        let opening = self.symbols.entry(index).clause_declaration(Clause::Value)?;
        self.tokens
            .iter()
            .skip(opening)
            .take(4)
            .find(|tok| is_literal(tok))
            .map(|tok| tok.kind)
    }
}

/// Parses a token as a data-entry level number.
fn parse_level(tok: &Token) -> Option<u32> {
    if tok.kind != TokenKind::Numeric {
        return None;
    }
    let level: u32 = tok.lexeme.parse().ok()?;
    matches!(level, 1..=49 | 66 | 77 | 78 | 88).then_some(level)
}

/// Whether a token can be a VALUE/CONSTANT literal.
fn is_literal(tok: &Token) -> bool {
    matches!(
        tok.kind,
        TokenKind::Numeric
            | TokenKind::String
            | TokenKind::National
            | TokenKind::Boolean
            | TokenKind::HexString
            | TokenKind::FigurativeLiteral
    )
}
