use crate::compiler::token::TokenKind;
use crate::tests::common::CheckTestRunner;

#[test]
fn copy_statement_splices_copybook_tokens_in_place() {
    CheckTestRunner::new("copy_basic")
        .source(
            r#"       IDENTIFICATION DIVISION.
       PROGRAM-ID. COPYTEST.
       PROCEDURE DIVISION.
           DISPLAY "before".
           COPY BOOK1.
           DISPLAY "after".
       END PROGRAM COPYTEST.
"#,
        )
        .copybook("BOOK1.cob", "           MOVE 1 TO X.\n")
        .expect_clean()
        .run_with(|comp| {
            // No COPY reserved word survives expansion.
            assert!(!comp
                .tokens
                .iter()
                .any(|t| t.kind == TokenKind::Reserved && t.is("COPY")));

            // The copybook tokens sit between the two DISPLAY statements.
            let before = comp.tokens.iter().position(|t| t.is("\"before\"")).unwrap();
            let move_pos = comp.tokens.iter().position(|t| t.is("MOVE")).unwrap();
            let after = comp.tokens.iter().position(|t| t.is("\"after\"")).unwrap();
            assert!(before < move_pos && move_pos < after);

            // Spliced tokens remember their own file for diagnostics.
            assert_ne!(comp.tokens[move_pos].file_index, 0);
        });
}

#[test]
fn nested_copybooks_expand_fully() {
    CheckTestRunner::new("copy_nested")
        .source(
            r#"       IDENTIFICATION DIVISION.
       PROGRAM-ID. NESTED.
       PROCEDURE DIVISION.
           COPY OUTER.
       END PROGRAM NESTED.
"#,
        )
        .copybook("OUTER.cob", "           COPY INNER.\n")
        .copybook("INNER.cob", "           CONTINUE.\n")
        .expect_clean()
        .run_with(|comp| {
            assert!(!comp.tokens.iter().any(|t| t.is("COPY")));
            assert!(comp.tokens.iter().any(|t| t.is("CONTINUE")));
        });
}

#[test]
fn copybook_name_matches_case_insensitively() {
    CheckTestRunner::new("copy_case")
        .source(
            r#"       IDENTIFICATION DIVISION.
       PROGRAM-ID. CASETEST.
       PROCEDURE DIVISION.
           COPY book1.
       END PROGRAM CASETEST.
"#,
        )
        .copybook("BOOK1.cob", "           CONTINUE.\n")
        .expect_clean()
        .run();
}

#[test]
fn missing_copybook_terminates_the_pipeline() {
    CheckTestRunner::new("copy_missing")
        .source(
            r#"       IDENTIFICATION DIVISION.
       PROGRAM-ID. MISSING.
       PROCEDURE DIVISION.
           COPY NOWHERE.
       END PROGRAM MISSING.
"#,
        )
        .expect_fatal()
        .run();
}

#[test]
fn self_including_copybook_terminates_the_pipeline() {
    CheckTestRunner::new("copy_cycle")
        .source(
            r#"       IDENTIFICATION DIVISION.
       PROGRAM-ID. CYCLE-TEST.
       PROCEDURE DIVISION.
           COPY LOOPY.
       END PROGRAM CYCLE-TEST.
"#,
        )
        .copybook("LOOPY.cob", "           COPY LOOPY.\n")
        .expect_fatal()
        .run();
}

#[test]
fn expansion_without_copy_is_identity() {
    use crate::compiler::{copybook, Compilation};
    use crate::config::CompileConfig;
    use crate::tests::common::MemorySource;

    let mut provider = MemorySource::new();
    provider.insert(
        "main.cob",
        "       IDENTIFICATION DIVISION.\n       PROGRAM-ID. IDEM.\n       END PROGRAM IDEM.\n",
    );
    let config = CompileConfig::for_source(Default::default());
    let mut compilation = Compilation::new(&provider, config);
    compilation.run().unwrap();

    let before = compilation.tokens.clone();
    copybook::expand(&mut compilation).unwrap();
    assert_eq!(before, compilation.tokens);
}
