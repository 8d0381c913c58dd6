use crate::compiler::diag::{codes, Diag};
use crate::compiler::token::{TokenContext, TokenKind};

use super::Analyzer;

/**
 * PROCEDURE DIVISION statements.
 *
 * Each rule consumes its keyword, operands, optional phrases and scope
 * terminator. Conditional handler phrases (ON SIZE ERROR, AT END, INVALID
 * KEY, ON EXCEPTION, ON OVERFLOW and their NOT forms) carry imperative
 * statement bodies of their own.
 */

impl<'a> Analyzer<'a> {
    /// Dispatches on the statement keyword under the cursor. Only called
    /// when the current token carries the IsStatement context.
    pub(super) fn statement(&mut self) {
        match self.current().lexeme.to_ascii_uppercase().as_str() {
            "ACCEPT" => self.accept_statement(),
            "ADD" => self.add_subtract_statement("TO"),
            "SUBTRACT" => self.add_subtract_statement("FROM"),
            "ALLOCATE" => self.allocate_statement(),
            "ALTER" => self.alter_statement(),
            "CALL" => self.call_statement(),
            "CANCEL" => self.simple_operands_statement(),
            "CLOSE" => self.close_statement(),
            "COMMIT" | "ROLLBACK" => {
                self.advance();
            }
            "COMPUTE" => self.compute_statement(),
            "CONTINUE" => {
                self.advance();
            }
            "DELETE" => self.delete_statement(),
            "DISPLAY" => self.display_statement(),
            "DIVIDE" => self.divide_statement(),
            "EVALUATE" => self.evaluate_statement(),
            "EXIT" => self.exit_statement(),
            "FREE" | "VALIDATE" => self.simple_operands_statement(),
            "GENERATE" | "INITIATE" | "TERMINATE" => self.simple_operands_statement(),
            "GO" => self.go_statement(),
            "GOBACK" => self.goback_statement(),
            "IF" => self.if_statement(),
            "INITIALIZE" => self.tail_statement(),
            "INSPECT" => self.tail_statement(),
            "INVOKE" => self.invoke_statement(),
            "MERGE" | "SORT" => self.tail_statement(),
            "MOVE" => self.move_statement(),
            "MULTIPLY" => self.multiply_statement(),
            "OPEN" => self.open_statement(),
            "PERFORM" => self.perform_statement(),
            "PURGE" | "SEND" | "RECEIVE" | "ENABLE" | "DISABLE" => self.tail_statement(),
            "RAISE" => self.raise_statement(),
            "READ" => self.read_statement(),
            "RELEASE" => self.release_statement(),
            "RESUME" => self.resume_statement(),
            "RETURN" => self.return_statement(),
            "REWRITE" => self.rewrite_statement(),
            "SEARCH" => self.search_statement(),
            "SET" => self.tail_statement(),
            "START" => self.start_statement(),
            "STOP" => self.stop_statement(),
            "STRING" => self.string_statement(),
            "UNSTRING" => self.unstring_statement(),
            "SUPPRESS" => {
                self.advance();
                self.optional("PRINTING");
            }
            "UNLOCK" => self.unlock_statement(),
            "WRITE" => self.write_statement(),
            _ => {
                // A statement keyword the dialect tags but this analyzer has
                // no dedicated rule for; validate its shape generically.
                self.tail_statement();
            }
        }
    }

    /// Statements inside a conditional phrase or inline block: keep going
    /// while statement keywords follow.
    pub(super) fn imperative_statements(&mut self) {
        while self.cur_context(TokenContext::IsStatement) {
            self.statement();
        }
    }

    ///////////////
    // Operands. //
    ///////////////

    /// Consumes one operand: a literal, a figurative constant, an intrinsic
    /// function reference, or an identifier with qualification and
    /// subscripts. Returns false without consuming when nothing matches.
    pub(super) fn operand(&mut self) -> bool {
        // ALL "x" repeats a literal.
        if self.cur_is("ALL") && is_literal_kind(self.lookahead(1).kind) {
            self.advance();
            self.advance();
            return true;
        }

        if is_literal_kind(self.current().kind) {
            self.advance();
            return true;
        }

        if self.cur_is("FUNCTION") {
            self.advance();
            if self.cur_kind(TokenKind::IntrinsicFunction) || self.cur_kind(TokenKind::Identifier)
            {
                self.advance();
            } else {
                self.diags.report(
                    Diag::error(
                        codes::UNEXPECTED_TOKEN,
                        format!("Expected a function name, instead found '{}'.", self.current()),
                    )
                    .at_token(self.lookahead(-1)),
                );
            }
            self.skip_parenthesized();
            return true;
        }

        if self.cur_kind(TokenKind::IntrinsicFunction) {
            self.advance();
            self.skip_parenthesized();
            return true;
        }

        if self.cur_kind(TokenKind::Identifier)
            || self.cur_kind(TokenKind::Device)
            || self.cur_is_any(&["SELF", "SUPER", "EXCEPTION-OBJECT", "ADDRESS", "LENGTH"])
        {
            if self.optional("ADDRESS") {
                self.optional("OF");
            } else if self.optional("LENGTH") {
                self.optional("OF");
            }
            self.advance();
            // Qualification: item OF group [OF record]...
            while self.cur_is_any(&["OF", "IN"]) {
                if self.lookahead(1).kind != TokenKind::Identifier {
                    break;
                }
                self.advance();
                self.advance();
            }
            // Subscripts and reference modification.
            self.skip_parenthesized();
            return true;
        }

        false
    }

    /// Consumes a whitespace- or comma-separated operand list.
    fn operand_list(&mut self) -> usize {
        let mut count = 0;
        while self.operand() {
            count += 1;
            self.optional(",");
        }
        count
    }

    /// Requires at least one operand.
    fn required_operands(&mut self) {
        if self.operand_list() == 0 {
            self.diags.report(
                Diag::error(
                    codes::UNEXPECTED_TOKEN,
                    format!(
                        "Expected at least one operand, instead found '{}'.",
                        self.current()
                    ),
                )
                .at_token(self.lookahead(-1)),
            );
        }
    }

    /// Skips balanced parentheses (subscripts, refmods, argument lists).
    fn skip_parenthesized(&mut self) {
        while self.cur_is("(") {
            let mut depth = 0usize;
            loop {
                if self.current().is_eof() {
                    return;
                }
                if self.cur_is("(") {
                    depth += 1;
                } else if self.cur_is(")") {
                    depth -= 1;
                    self.advance();
                    if depth == 0 {
                        break;
                    }
                    continue;
                }
                self.advance();
            }
        }
    }

    /// Validates a condition for shape: operands, comparisons and
    /// connectives pass through until a structural boundary.
    fn condition(&mut self) {
        loop {
            let tok = self.current();
            if tok.is_eof()
                || tok.context == TokenContext::IsStatement
                || tok.is_any(&["THEN", "ELSE", "WHEN", "ALSO", "."])
                || tok.is("END")
                || tok.lexeme.to_ascii_uppercase().starts_with("END-")
            {
                return;
            }
            self.advance();
        }
    }

    /// Generic tail: consumes operands and option words until a sentence
    /// boundary. Used by statements whose option phrases carry no handler
    /// bodies.
    fn statement_tail(&mut self) {
        loop {
            let tok = self.current();
            if tok.is_eof()
                || tok.context == TokenContext::IsStatement
                || tok.is_any(&["ELSE", "WHEN", "."])
                || tok.is("END")
                || tok.lexeme.to_ascii_uppercase().starts_with("END-")
            {
                return;
            }
            self.advance();
        }
    }

    /// keyword + operand tail; the shape shared by CANCEL, FREE, VALIDATE,
    /// GENERATE, INITIATE and TERMINATE.
    fn simple_operands_statement(&mut self) {
        self.advance();
        self.required_operands();
    }

    /// keyword + free-form option tail (SET, SORT, INSPECT, ...).
    fn tail_statement(&mut self) {
        self.advance();
        self.statement_tail();
    }

    ///////////////////////////
    // Conditional phrases.  //
    ///////////////////////////

    /// [NOT] [ON] SIZE ERROR imperative...
    fn size_error_phrases(&mut self) {
        loop {
            let negated = self.cur_is("NOT")
                && (self.lookahead(1).is("SIZE")
                    || (self.lookahead(1).is("ON") && self.lookahead(2).is("SIZE")));
            let direct = self.cur_is("SIZE") || (self.cur_is("ON") && self.lookahead(1).is("SIZE"));
            if !negated && !direct {
                return;
            }
            self.optional("NOT");
            self.optional("ON");
            self.expected("SIZE");
            self.expected("ERROR");
            self.imperative_statements();
        }
    }

    /// [NOT] AT END imperative...
    fn at_end_phrases(&mut self) {
        loop {
            let negated =
                self.cur_is("NOT") && self.lookahead(1).is("AT") && self.lookahead(2).is("END");
            let direct = self.cur_is("AT") && self.lookahead(1).is("END");
            if !negated && !direct {
                return;
            }
            self.optional("NOT");
            self.optional("AT");
            self.expected("END");
            self.imperative_statements();
        }
    }

    /// [NOT] INVALID [KEY] imperative...
    fn invalid_key_phrases(&mut self) {
        loop {
            let negated = self.cur_is("NOT") && self.lookahead(1).is("INVALID");
            if !negated && !self.cur_is("INVALID") {
                return;
            }
            self.optional("NOT");
            self.expected("INVALID");
            self.optional("KEY");
            self.imperative_statements();
        }
    }

    /// [NOT] [ON] EXCEPTION imperative...
    fn exception_phrases(&mut self) {
        loop {
            let negated = self.cur_is("NOT")
                && (self.lookahead(1).is("EXCEPTION")
                    || (self.lookahead(1).is("ON") && self.lookahead(2).is("EXCEPTION")));
            let direct =
                self.cur_is("EXCEPTION") || (self.cur_is("ON") && self.lookahead(1).is("EXCEPTION"));
            if !negated && !direct {
                return;
            }
            self.optional("NOT");
            self.optional("ON");
            self.expected("EXCEPTION");
            self.imperative_statements();
        }
    }

    /// [NOT] [ON] OVERFLOW imperative...
    fn overflow_phrases(&mut self) {
        loop {
            let negated = self.cur_is("NOT")
                && (self.lookahead(1).is("OVERFLOW")
                    || (self.lookahead(1).is("ON") && self.lookahead(2).is("OVERFLOW")));
            let direct =
                self.cur_is("OVERFLOW") || (self.cur_is("ON") && self.lookahead(1).is("OVERFLOW"));
            if !negated && !direct {
                return;
            }
            self.optional("NOT");
            self.optional("ON");
            self.expected("OVERFLOW");
            self.imperative_statements();
        }
    }

    //////////////////////////
    // Individual statements.
    //////////////////////////

    /// ACCEPT item [FROM source] [exception] [END-ACCEPT].
    fn accept_statement(&mut self) {
        self.advance();
        self.required_operands();
        if self.optional("FROM") {
            if self.cur_is_any(&["DATE", "DAY", "DAY-OF-WEEK", "TIME"]) {
                self.advance();
                self.optional_any(&["YYYYMMDD", "YYYYDDD"]);
            } else if !self.operand() {
                self.diags.report(
                    Diag::error(
                        codes::UNEXPECTED_TOKEN,
                        "ACCEPT FROM requires a device or temporal source.",
                    )
                    .at_token(self.lookahead(-1)),
                );
            }
        }
        self.exception_phrases();
        self.optional("END-ACCEPT");
    }

    /// ADD/SUBTRACT sources TO/FROM targets [GIVING targets] [ROUNDED]
    /// [size error] [END-ADD/END-SUBTRACT].
    fn add_subtract_statement(&mut self, separator: &str) {
        let keyword = self.consume();
        self.optional_any(&["CORRESPONDING", "CORR"]);
        self.required_operands();
        self.expected(separator);
        self.required_operands();
        if self.optional("GIVING") {
            self.required_operands();
        }
        self.optional("ROUNDED");
        self.size_error_phrases();
        self.optional(&format!("END-{}", keyword.lexeme.to_ascii_uppercase()));
    }

    /// MULTIPLY a BY b [GIVING c...] [ROUNDED] [size error] [END-MULTIPLY].
    fn multiply_statement(&mut self) {
        self.advance();
        self.required_operands();
        self.expected("BY");
        self.required_operands();
        if self.optional("GIVING") {
            self.required_operands();
        }
        self.optional("ROUNDED");
        self.size_error_phrases();
        self.optional("END-MULTIPLY");
    }

    /// DIVIDE a INTO/BY b [GIVING c] [REMAINDER d] [size error] [END-DIVIDE].
    fn divide_statement(&mut self) {
        self.advance();
        self.required_operands();
        let connective = self.choice(&["INTO", "BY"]);
        self.required_operands();
        let giving = self.optional("GIVING");
        if giving {
            self.required_operands();
        }
        if self.optional("REMAINDER") {
            self.required_operands();
        }
        // DIVIDE a BY b with no GIVING has nowhere to store the quotient.
        if connective.as_deref() == Some("BY") && !giving {
            self.diags.report(
                Diag::error(
                    codes::UNEXPECTED_TOKEN,
                    "DIVIDE ... BY requires a GIVING phrase.",
                )
                .at_token(self.lookahead(-1))
                .with_suggestion("Use DIVIDE b INTO a, or add GIVING."),
            );
        }
        self.optional("ROUNDED");
        self.size_error_phrases();
        self.optional("END-DIVIDE");
    }

    /// COMPUTE targets [ROUNDED] = expression [size error] [END-COMPUTE].
    fn compute_statement(&mut self) {
        self.advance();
        self.required_operands();
        self.optional("ROUNDED");
        self.expected("=");
        // The arithmetic expression is validated for shape.
        loop {
            let tok = self.current();
            if tok.is_eof()
                || tok.context == TokenContext::IsStatement
                || tok.is_any(&["NOT", "ON", "SIZE", ".", "END-COMPUTE", "ELSE", "WHEN"])
                || tok.is("END")
            {
                break;
            }
            self.advance();
        }
        self.size_error_phrases();
        self.optional("END-COMPUTE");
    }

    /// MOVE [CORRESPONDING] source TO targets.
    fn move_statement(&mut self) {
        self.advance();
        self.optional_any(&["CORRESPONDING", "CORR"]);
        if !self.operand() {
            self.diags.report(
                Diag::error(
                    codes::UNEXPECTED_TOKEN,
                    format!("MOVE requires a source, instead found '{}'.", self.current()),
                )
                .at_token(self.lookahead(-1)),
            );
        }
        self.expected("TO");
        self.required_operands();
    }

    /// DISPLAY operands [UPON device] [WITH NO ADVANCING] [exception]
    /// [END-DISPLAY].
    fn display_statement(&mut self) {
        self.advance();
        self.required_operands();
        if self.optional("UPON") {
            if self.cur_kind(TokenKind::Device) || self.cur_kind(TokenKind::Identifier) {
                self.advance();
            } else {
                self.diags.report(
                    Diag::error(codes::UNEXPECTED_TOKEN, "UPON requires a device name.")
                        .at_token(self.lookahead(-1)),
                );
            }
        }
        if self.optional("WITH") || self.cur_is("NO") {
            self.expected("NO");
            self.expected("ADVANCING");
        }
        self.exception_phrases();
        self.optional("END-DISPLAY");
    }

    /// CALL target [USING args] [RETURNING item] [exception] [END-CALL].
    fn call_statement(&mut self) {
        self.advance();
        if !self.operand() {
            self.diags.report(
                Diag::error(codes::UNEXPECTED_TOKEN, "CALL requires a callee.")
                    .at_token(self.lookahead(-1)),
            );
        }
        if self.optional("USING") {
            loop {
                if self.optional("BY") {
                    self.choice(&["REFERENCE", "CONTENT", "VALUE"]);
                } else {
                    self.optional_any(&["REFERENCE", "CONTENT", "VALUE"]);
                }
                if self.optional("OMITTED") {
                    // placeholder argument
                } else if !self.operand() {
                    break;
                }
                self.optional(",");
                let more = self.cur_is_any(&["BY", "REFERENCE", "CONTENT", "VALUE", "OMITTED"])
                    || self.cur_kind(TokenKind::Identifier)
                    || is_literal_kind(self.current().kind);
                if !more {
                    break;
                }
            }
        }
        if self.optional("RETURNING") {
            self.identifier();
        }
        self.exception_phrases();
        self.optional("END-CALL");
    }

    /// INVOKE object method [USING args] [RETURNING item] [END-INVOKE].
    fn invoke_statement(&mut self) {
        self.advance();
        if !self.operand() {
            self.diags.report(
                Diag::error(codes::UNEXPECTED_TOKEN, "INVOKE requires an object reference.")
                    .at_token(self.lookahead(-1)),
            );
        }
        // The method is named by an identifier or a literal.
        if !self.operand() {
            self.diags.report(
                Diag::error(codes::UNEXPECTED_TOKEN, "INVOKE requires a method name.")
                    .at_token(self.lookahead(-1)),
            );
        }
        if self.optional("USING") {
            self.operand_list();
        }
        if self.optional("RETURNING") {
            self.identifier();
        }
        self.exception_phrases();
        self.optional("END-INVOKE");
    }

    /// IF condition [THEN] statements [ELSE statements] [END-IF].
    fn if_statement(&mut self) {
        self.advance();
        self.condition();
        self.optional("THEN");
        self.imperative_statements();
        if self.optional("ELSE") {
            self.imperative_statements();
        }
        self.optional("END-IF");
    }

    /// EVALUATE subjects WHEN selections... [WHEN OTHER ...] END-EVALUATE.
    fn evaluate_statement(&mut self) {
        self.advance();
        self.condition();
        while self.optional("ALSO") {
            self.condition();
        }

        while self.cur_is("WHEN") {
            self.advance();
            if !self.optional("OTHER") {
                self.condition();
                while self.optional("ALSO") {
                    self.condition();
                }
            }
            self.imperative_statements();
        }
        self.expected("END-EVALUATE");
    }

    /// PERFORM: out-of-line (paragraph [THRU paragraph] options) or inline
    /// (options statements END-PERFORM).
    fn perform_statement(&mut self) {
        self.advance();

        // An identifier followed by TIMES is a repetition count, not a
        // paragraph name.
        if self.cur_kind(TokenKind::Identifier) && !self.lookahead(1).is("TIMES") {
            self.advance();
            if self.optional_any(&["THROUGH", "THRU"]) {
                self.identifier();
            }
            self.perform_options();
        } else {
            self.perform_options();
            self.imperative_statements();
            self.expected("END-PERFORM");
        }
    }

    /// [WITH TEST BEFORE/AFTER] [n TIMES | UNTIL cond | VARYING ...].
    fn perform_options(&mut self) {
        if self.optional("WITH") || self.cur_is("TEST") {
            self.expected("TEST");
            self.choice(&["BEFORE", "AFTER"]);
        }

        if self.cur_kind(TokenKind::Numeric) || self.cur_kind(TokenKind::Identifier) {
            // n TIMES — only when TIMES actually follows; a lone identifier
            // here would be an inline PERFORM's first operand misread.
            if self.lookahead(1).is("TIMES") {
                self.advance();
                self.advance();
            }
        }
        if self.optional("UNTIL") {
            self.optional("EXIT");
            self.condition();
        }
        if self.optional("VARYING") {
            self.operand();
            self.expected("FROM");
            self.operand();
            self.expected("BY");
            self.operand();
            self.expected("UNTIL");
            self.condition();
            while self.optional("AFTER") {
                self.operand();
                self.expected("FROM");
                self.operand();
                self.expected("BY");
                self.operand();
                self.expected("UNTIL");
                self.condition();
            }
        }
    }

    /// OPEN (INPUT|OUTPUT|I-O|EXTEND) files...
    fn open_statement(&mut self) {
        self.advance();
        loop {
            if self.choice(&["INPUT", "OUTPUT", "I-O", "EXTEND"]).is_none() {
                break;
            }
            self.optional("SHARING");
            self.required_operands();
            if !self.cur_is_any(&["INPUT", "OUTPUT", "I-O", "EXTEND"]) {
                break;
            }
        }
    }

    /// CLOSE (file [WITH LOCK | REEL | UNIT])...
    fn close_statement(&mut self) {
        self.advance();
        loop {
            if !self.operand() {
                break;
            }
            if self.optional("WITH") || self.cur_is("LOCK") {
                self.optional("LOCK");
            }
            self.optional_any(&["REEL", "UNIT"]);
        }
    }

    /// READ file [NEXT|PREVIOUS] [RECORD] [INTO item] [KEY [IS] item]
    /// [at end / invalid key] [END-READ].
    fn read_statement(&mut self) {
        self.advance();
        self.identifier();
        self.optional_any(&["NEXT", "PREVIOUS"]);
        self.optional("RECORD");
        if self.optional("INTO") {
            self.operand();
        }
        if self.optional("KEY") {
            self.optional("IS");
            self.operand();
        }
        self.at_end_phrases();
        self.invalid_key_phrases();
        self.optional("END-READ");
    }

    /// WRITE record [FROM item] [BEFORE|AFTER ADVANCING ...] [invalid key /
    /// at end-of-page] [END-WRITE].
    fn write_statement(&mut self) {
        self.advance();
        self.identifier();
        if self.optional("FROM") {
            self.operand();
        }
        if self.cur_is_any(&["BEFORE", "AFTER"]) {
            self.advance();
            self.optional("ADVANCING");
            if !self.optional("PAGE") {
                self.operand();
                self.optional_any(&["LINE", "LINES"]);
            }
        }
        self.invalid_key_phrases();
        self.optional("END-WRITE");
    }

    /// REWRITE record [FROM item] [invalid key] [END-REWRITE].
    fn rewrite_statement(&mut self) {
        self.advance();
        self.identifier();
        if self.optional("FROM") {
            self.operand();
        }
        self.invalid_key_phrases();
        self.optional("END-REWRITE");
    }

    /// DELETE file [RECORD] [invalid key] [END-DELETE].
    fn delete_statement(&mut self) {
        self.advance();
        self.identifier();
        self.optional("RECORD");
        self.invalid_key_phrases();
        self.optional("END-DELETE");
    }

    /// START file [FIRST|LAST|KEY comparison item] [invalid key]
    /// [END-START].
    fn start_statement(&mut self) {
        self.advance();
        self.identifier();
        self.optional_any(&["FIRST", "LAST"]);
        if self.optional("KEY") {
            self.optional("IS");
            // comparison operator(s) then the key item
            while self.cur_is_any(&["=", ">", "<", ">=", "<=", "EQUAL", "GREATER", "LESS", "THAN", "OR", "TO", "NOT"])
            {
                self.advance();
            }
            self.operand();
        }
        self.invalid_key_phrases();
        self.optional("END-START");
    }

    /// RETURN file [RECORD] [INTO item] [at end] [END-RETURN].
    fn return_statement(&mut self) {
        self.advance();
        self.identifier();
        self.optional("RECORD");
        if self.optional("INTO") {
            self.operand();
        }
        self.at_end_phrases();
        self.optional("END-RETURN");
    }

    /// RELEASE record [FROM item].
    fn release_statement(&mut self) {
        self.advance();
        self.identifier();
        if self.optional("FROM") {
            self.operand();
        }
    }

    /// SEARCH table [VARYING item] [at end] WHEN... [END-SEARCH].
    fn search_statement(&mut self) {
        self.advance();
        self.optional("ALL");
        self.identifier();
        if self.optional("VARYING") {
            self.operand();
        }
        self.at_end_phrases();
        while self.cur_is("WHEN") {
            self.advance();
            self.condition();
            if self.cur_is("NEXT") {
                self.advance();
                self.expected("SENTENCE");
            } else {
                self.imperative_statements();
            }
        }
        self.optional("END-SEARCH");
    }

    /// STRING sources [DELIMITED BY item|SIZE]... INTO target
    /// [WITH POINTER item] [overflow] [END-STRING].
    fn string_statement(&mut self) {
        self.advance();
        loop {
            if !self.operand() {
                break;
            }
            while self.operand() {}
            if self.optional("DELIMITED") {
                self.optional("BY");
                if !self.optional("SIZE") {
                    self.operand();
                }
            } else {
                break;
            }
        }
        self.expected("INTO");
        self.identifier();
        if self.optional("WITH") || self.cur_is("POINTER") {
            self.expected("POINTER");
            self.operand();
        }
        self.overflow_phrases();
        self.optional("END-STRING");
    }

    /// UNSTRING source [DELIMITED BY items [OR items]] INTO targets
    /// [POINTER/TALLYING] [overflow] [END-UNSTRING].
    fn unstring_statement(&mut self) {
        self.advance();
        self.identifier();
        if self.optional("DELIMITED") {
            self.optional("BY");
            self.optional("ALL");
            self.operand();
            while self.optional("OR") {
                self.optional("ALL");
                self.operand();
            }
        }
        self.expected("INTO");
        loop {
            if !self.operand() {
                break;
            }
            if self.optional("DELIMITER") {
                self.optional("IN");
                self.operand();
            }
            if self.optional("COUNT") {
                self.optional("IN");
                self.operand();
            }
            self.optional(",");
        }
        if self.optional("WITH") || self.cur_is("POINTER") {
            self.expected("POINTER");
            self.operand();
        }
        if self.optional("TALLYING") {
            self.optional("IN");
            self.operand();
        }
        self.overflow_phrases();
        self.optional("END-UNSTRING");
    }

    /// GO [TO] paragraph [DEPENDING [ON] item].
    fn go_statement(&mut self) {
        self.advance();
        self.optional("TO");
        self.required_operands();
        if self.optional("DEPENDING") {
            self.optional("ON");
            self.operand();
        }
    }

    /// GOBACK [RAISING item].
    fn goback_statement(&mut self) {
        self.advance();
        if self.optional("RAISING") {
            self.optional("EXCEPTION");
            self.operand();
        }
    }

    /// RAISE [EXCEPTION] exception-name.
    fn raise_statement(&mut self) {
        self.advance();
        self.optional("EXCEPTION");
        if !self.operand() {
            self.diags.report(
                Diag::error(codes::UNEXPECTED_TOKEN, "RAISE requires an exception name.")
                    .at_token(self.lookahead(-1)),
            );
        }
    }

    /// RESUME [AT] (NEXT STATEMENT | paragraph).
    fn resume_statement(&mut self) {
        self.advance();
        self.optional("AT");
        if self.optional("NEXT") {
            self.expected("STATEMENT");
        } else {
            self.operand();
        }
    }

    /// EXIT [PROGRAM|FUNCTION|METHOD|PARAGRAPH|SECTION|PERFORM [CYCLE]].
    fn exit_statement(&mut self) {
        self.advance();
        if self.optional("PERFORM") {
            self.optional("CYCLE");
        } else if self.optional_any(&["PROGRAM", "FUNCTION", "METHOD", "PARAGRAPH", "SECTION"]) {
            if self.optional("RAISING") {
                self.optional("EXCEPTION");
                self.operand();
            }
        }
    }

    /// STOP RUN [WITH status] | STOP literal.
    fn stop_statement(&mut self) {
        self.advance();
        if self.optional("RUN") {
            if self.optional("WITH") || self.cur_is_any(&["NORMAL", "ERROR"]) {
                self.optional_any(&["NORMAL", "ERROR"]);
                self.optional("STATUS");
                self.operand();
            }
        } else if !self.operand() {
            self.diags.report(
                Diag::error(
                    codes::UNEXPECTED_TOKEN,
                    "STOP requires RUN or a literal to display.",
                )
                .at_token(self.lookahead(-1)),
            );
        }
    }

    /// ALTER paragraph TO [PROCEED TO] paragraph.
    fn alter_statement(&mut self) {
        self.advance();
        self.identifier();
        self.expected("TO");
        if self.optional("PROCEED") {
            self.expected("TO");
        }
        self.identifier();
    }

    /// ALLOCATE item [CHARACTERS] [INITIALIZED] [RETURNING pointer].
    fn allocate_statement(&mut self) {
        self.advance();
        self.required_operands();
        self.optional("CHARACTERS");
        self.optional("INITIALIZED");
        if self.optional("RETURNING") {
            self.identifier();
        }
    }

    /// UNLOCK file [RECORD|RECORDS].
    fn unlock_statement(&mut self) {
        self.advance();
        self.identifier();
        self.optional_any(&["RECORD", "RECORDS"]);
    }
}

fn is_literal_kind(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Numeric
            | TokenKind::String
            | TokenKind::National
            | TokenKind::Boolean
            | TokenKind::HexString
            | TokenKind::FigurativeLiteral
    )
}
