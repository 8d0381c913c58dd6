use crate::compiler::symbols::UnitKind;
use crate::compiler::token::TokenKind;
use crate::tests::common::CheckTestRunner;

#[test]
fn trivial_program_analyzes_clean() {
    CheckTestRunner::new("trivial_program")
        .source(
            r#"       IDENTIFICATION DIVISION.
       PROGRAM-ID. HELLO.
       PROCEDURE DIVISION.
           DISPLAY "Hi".
           STOP RUN.
       END PROGRAM HELLO.
"#,
        )
        .expect_clean()
        .run_with(|comp| {
            let sig = comp
                .symbols
                .global("HELLO")
                .expect("HELLO should be registered");
            assert_eq!(sig.kind, UnitKind::Program);

            // The token list ends `... END PROGRAM HELLO . EOF`.
            let tail: Vec<&str> = comp.tokens[comp.tokens.len() - 5..]
                .iter()
                .map(|t| t.lexeme.as_str())
                .collect();
            assert_eq!(tail, vec!["END", "PROGRAM", "HELLO", ".", ""]);
            assert!(comp.tokens.last().unwrap().is_eof());
        });
}

#[test]
fn token_list_has_exactly_one_eof_at_the_end() {
    let sources = [
        "",
        "\n\n\n",
        "       IDENTIFICATION DIVISION.\n       PROGRAM-ID. P.\n       END PROGRAM P.\n",
    ];
    for (idx, source) in sources.into_iter().enumerate() {
        let name: &'static str = ["eof_empty", "eof_blank", "eof_program"][idx];
        CheckTestRunner::new(name).source(source).run_with(|comp| {
            let eofs = comp
                .tokens
                .iter()
                .filter(|t| t.kind == TokenKind::Eof)
                .count();
            assert_eq!(eofs, 1);
            assert!(comp.tokens.last().unwrap().is_eof());
        });
    }
}

#[test]
fn eof_token_carries_sentinel_position() {
    CheckTestRunner::new("eof_sentinel")
        .source("       IDENTIFICATION DIVISION.\n       PROGRAM-ID. P.\n       END PROGRAM P.\n")
        .expect_clean()
        .run_with(|comp| {
            let eof = comp.tokens.last().unwrap();
            assert_eq!((eof.line, eof.column), (-5, -5));
        });
}

#[test]
fn two_programs_in_one_file() {
    CheckTestRunner::new("two_programs")
        .source(
            r#"       IDENTIFICATION DIVISION.
       PROGRAM-ID. FIRST-PROG.
       PROCEDURE DIVISION.
           GOBACK.
       END PROGRAM FIRST-PROG.
       IDENTIFICATION DIVISION.
       PROGRAM-ID. SECOND-PROG.
       PROCEDURE DIVISION.
           GOBACK.
       END PROGRAM SECOND-PROG.
"#,
        )
        .expect_clean()
        .run_with(|comp| {
            assert!(comp.symbols.global_exists("FIRST-PROG"));
            assert!(comp.symbols.global_exists("SECOND-PROG"));
        });
}

#[test]
fn workspace_files_follow_the_entry_point() {
    CheckTestRunner::new("workspace_files")
        .source(
            "       IDENTIFICATION DIVISION.\n       PROGRAM-ID. MAIN-PROG.\n       END PROGRAM MAIN-PROG.\n",
        )
        .extra_source(
            "other.cob",
            "       IDENTIFICATION DIVISION.\n       PROGRAM-ID. OTHER-PROG.\n       END PROGRAM OTHER-PROG.\n",
        )
        .expect_clean()
        .run_with(|comp| {
            assert!(comp.symbols.global_exists("MAIN-PROG"));
            assert!(comp.symbols.global_exists("OTHER-PROG"));

            // Tokens from the second file carry its file index, and the
            // concatenation preserves program order.
            let other = comp
                .tokens
                .iter()
                .find(|t| t.is("OTHER-PROG"))
                .expect("token from workspace file");
            assert_eq!(other.file_index, 1);
            let main_pos = comp.tokens.iter().position(|t| t.is("MAIN-PROG")).unwrap();
            let other_pos = comp.tokens.iter().position(|t| t.is("OTHER-PROG")).unwrap();
            assert!(main_pos < other_pos);
        });
}

#[test]
fn missing_entry_point_is_fatal() {
    // The runner always registers main.cob, so point the config elsewhere.
    use crate::compiler::Compilation;
    use crate::config::CompileConfig;
    use crate::tests::common::MemorySource;

    let provider = MemorySource::new();
    let mut config = CompileConfig::for_source(Default::default());
    config.entry_point = "nope.cob".into();
    let mut compilation = Compilation::new(&provider, config);
    assert!(compilation.run().is_err());
}
