use crate::compiler::diag::codes;
use crate::compiler::symbols::{Clause, UsageType};
use crate::tests::common::CheckTestRunner;

fn program_with_storage(storage: &'static str) -> &'static str {
    // Tests share this shape so often it is worth the leak.
    Box::leak(
        format!(
            "       IDENTIFICATION DIVISION.\n       PROGRAM-ID. DATATEST.\n       DATA DIVISION.\n       WORKING-STORAGE SECTION.\n{storage}       END PROGRAM DATATEST.\n"
        )
        .into_boxed_str(),
    )
}

#[test]
fn duplicate_root_level_item_reports_once() {
    CheckTestRunner::new("duplicate_root_level")
        .source(program_with_storage(
            "       01 X PIC 9(4).\n       01 X PIC 9(4).\n",
        ))
        .expect_diagnostic(codes::DUPLICATE_GLOBAL)
        .run_with(|comp| {
            let dups = comp
                .diags
                .records()
                .iter()
                .filter(|d| d.code == codes::DUPLICATE_GLOBAL)
                .count();
            assert_eq!(dups, 1);
            // Both entries still land in the table.
            assert_eq!(comp.symbols.local_all("X").count(), 2);
        });
}

#[test]
fn usage_index_forbids_picture() {
    CheckTestRunner::new("usage_index_picture")
        .source(program_with_storage(
            "       01 G.\n       05 P USAGE INDEX PIC 9(4).\n",
        ))
        .expect_diagnostic(codes::PICTURE_FORBIDDEN)
        .run_with(|comp| {
            // The item is still registered despite the conflict.
            let entry = comp.symbols.local_first("P").unwrap();
            assert_eq!(entry.usage, Some(UsageType::Index));
            assert!(entry.has_clause(Clause::Picture));
        });
}

#[test]
fn pointer_usage_forbids_value() {
    CheckTestRunner::new("pointer_value")
        .source(program_with_storage(
            "       01 PTR USAGE POINTER VALUE 5.\n",
        ))
        .expect_diagnostic(codes::VALUE_FORBIDDEN)
        .run();
}

#[test]
fn group_items_cannot_carry_a_picture() {
    CheckTestRunner::new("group_picture")
        .source(program_with_storage(
            "       01 G PIC X(4).\n       05 CHILD PIC X.\n",
        ))
        .expect_diagnostic(codes::GROUP_WITH_PICTURE)
        .run();
}

#[test]
fn elementary_items_need_a_picture() {
    CheckTestRunner::new("picture_required")
        .source(program_with_storage("       01 BARE.\n       01 OK PIC X.\n"))
        .expect_diagnostic(codes::PICTURE_REQUIRED)
        .run();
}

#[test]
fn string_value_substitutes_for_a_picture() {
    CheckTestRunner::new("value_implies_layout")
        .source(program_with_storage("       01 GREETING VALUE \"Hello\".\n"))
        .expect_clean()
        .run();
}

#[test]
fn renames_forbids_picture() {
    CheckTestRunner::new("renames_picture")
        .source(program_with_storage(
            "       01 REC.\n       05 A PIC X.\n       05 B PIC X.\n       66 ALIAS RENAMES A THRU B PIC X.\n",
        ))
        .expect_diagnostic(codes::RENAMES_WITH_PICTURE)
        .run();
}

#[test]
fn level_numbers_must_match_an_open_group() {
    CheckTestRunner::new("level_mismatch")
        .source(program_with_storage(
            "       01 A.\n       05 B PIC X.\n       07 C PIC X.\n       06 D PIC X.\n",
        ))
        .expect_diagnostic(codes::LEVEL_OUT_OF_ORDER)
        .run();
}

#[test]
fn record_hierarchy_tracks_parents_and_groups() {
    CheckTestRunner::new("record_hierarchy")
        .source(program_with_storage(
            "       01 REC.\n       05 HEAD PIC X(2).\n       05 BODY.\n       10 INNER PIC 9.\n       05 TAIL PIC X.\n",
        ))
        .expect_clean()
        .run_with(|comp| {
            let rec = comp.symbols.local_first("REC").unwrap();
            assert!(rec.is_group);
            assert!(rec.parent.is_none());

            let body = comp.symbols.local_first("BODY").unwrap();
            assert!(body.is_group);

            let inner = comp.symbols.local_first("INNER").unwrap();
            let parent = comp.symbols.entry(inner.parent.unwrap());
            assert_eq!(parent.name(), "BODY");

            let tail = comp.symbols.local_first("TAIL").unwrap();
            let parent = comp.symbols.entry(tail.parent.unwrap());
            assert_eq!(parent.name(), "REC");
        });
}

#[test]
fn level_77_items_stand_alone() {
    CheckTestRunner::new("level_77")
        .source(program_with_storage(
            "       77 COUNTER PIC 9(4) VALUE 0.\n       77 LIMITER PIC 9(4).\n",
        ))
        .expect_clean()
        .run_with(|comp| {
            let counter = comp.symbols.local_first("COUNTER").unwrap();
            assert_eq!(counter.level, 77);
            assert!(counter.parent.is_none());
            assert!(!counter.is_group);
        });
}

#[test]
fn condition_names_attach_to_their_item() {
    CheckTestRunner::new("level_88")
        .source(program_with_storage(
            "       01 FLAG PIC 9.\n       88 FLAG-ON VALUE 1.\n       88 FLAG-OFF VALUE 0.\n",
        ))
        .expect_clean()
        .run_with(|comp| {
            let on = comp.symbols.local_first("FLAG-ON").unwrap();
            let parent = comp.symbols.entry(on.parent.unwrap());
            assert_eq!(parent.name(), "FLAG");
        });
}

#[test]
fn constants_register_with_the_flag_set() {
    CheckTestRunner::new("constant_entry")
        .source(program_with_storage(
            "       01 MAX-RETRIES CONSTANT AS 5.\n       78 TIMEOUT VALUE 30.\n",
        ))
        .expect_clean()
        .run_with(|comp| {
            assert!(comp.symbols.local_first("MAX-RETRIES").unwrap().is_constant);
            assert!(comp.symbols.local_first("TIMEOUT").unwrap().is_constant);
        });
}

#[test]
fn typedef_strong_and_dynamic_length_parse() {
    CheckTestRunner::new("typedef_dynamic")
        .source(program_with_storage(
            "       01 KILOMETERS TYPEDEF STRONG PIC 9(6).\n       01 BUF DYNAMIC LENGTH LIMIT 1024 PIC X.\n",
        ))
        .expect_clean()
        .run_with(|comp| {
            let td = comp.symbols.local_first("KILOMETERS").unwrap();
            assert!(td.has_clause(Clause::Typedef));
            let buf = comp.symbols.local_first("BUF").unwrap();
            assert!(buf.has_clause(Clause::Dynamic));
        });
}

#[test]
fn clause_declarations_allow_payload_rescan() {
    CheckTestRunner::new("clause_rescan")
        .source(program_with_storage("       01 ITEM PIC S9(4)V9(2) VALUE 0.\n"))
        .expect_clean()
        .run_with(|comp| {
            let item = comp.symbols.local_first("ITEM").unwrap();
            let opening = item.clause_declaration(Clause::Picture).unwrap();
            assert!(comp.tokens[opening].is("PIC"));
            let value_at = item.clause_declaration(Clause::Value).unwrap();
            assert!(comp.tokens[value_at].is("VALUE"));
        });
}
