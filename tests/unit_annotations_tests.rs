//! # Annotation Parser Unit Tests / 注解解析器单元测试
//!
//! Covers run declaration, key assignment, override and re-declaration
//! behavior, and the rejection of keys for undeclared runs.
//!
//! 覆盖运行声明、键赋值、覆盖与重新声明行为，以及对未声明运行的键的拒绝。

use script_runner::core::annotations::{RawRunRecord, parse_annotations};
use script_runner::core::error::MetadataError;

const SCRIPT: &str = "TC_TEST.py";

fn parse(text: &str) -> Vec<RawRunRecord> {
    parse_annotations(text, SCRIPT).expect("annotations should parse")
}

#[cfg(test)]
mod declaration_tests {
    use super::*;

    #[test]
    fn test_declared_runs_in_declaration_order() {
        let records = parse("# test-runner-runs: run1 run2 run3\n");

        let names: Vec<_> = records.iter().map(|r| r.run_name().unwrap()).collect();
        assert_eq!(names, vec!["run1", "run2", "run3"]);
    }

    #[test]
    fn test_implicit_keys_are_injected() {
        let records = parse("# test-runner-runs: run1\n");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].run_name(), Some("run1"));
        assert_eq!(records[0].script_path(), Some(SCRIPT));
        assert_eq!(records[0].len(), 2);
    }

    #[test]
    fn test_no_declaration_yields_empty() {
        let records = parse("import os\n# just a comment\nprint('hi')\n");
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_declaration_line_declares_nothing() {
        let records = parse("# test-runner-runs:\n");
        assert!(records.is_empty());
    }

    #[test]
    fn test_declarations_across_lines_accumulate() {
        let records = parse("# test-runner-runs: run1\n# test-runner-runs: run2\n");

        let names: Vec<_> = records.iter().map(|r| r.run_name().unwrap()).collect();
        assert_eq!(names, vec!["run1", "run2"]);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let text = "    #   test-runner-runs:   run1 \n\t# test-runner-run/run1/app:  my-app  \n";
        let records = parse(text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("app"), Some("my-app"));
    }

    #[test]
    fn test_non_comment_lines_are_ignored() {
        let text = "test-runner-runs: run1\n// test-runner-runs: run2\n";
        assert!(parse(text).is_empty());
    }
}

#[cfg(test)]
mod key_assignment_tests {
    use super::*;

    #[test]
    fn test_value_keeps_interior_whitespace() {
        let text = "# test-runner-runs: run1\n\
                    # test-runner-run/run1/app-args: --discriminator 1234   --KVS kvs1\n";
        let records = parse(text);

        assert_eq!(
            records[0].get("app-args"),
            Some("--discriminator 1234   --KVS kvs1")
        );
    }

    #[test]
    fn test_last_write_wins() {
        let text = "# test-runner-runs: run1\n\
                    # test-runner-run/run1/KVS: a\n\
                    # test-runner-run/run1/KVS: b\n";
        let records = parse(text);

        assert_eq!(records[0].get("KVS"), Some("b"));
    }

    #[test]
    fn test_keys_are_scoped_per_run() {
        let text = "# test-runner-runs: run1 run2\n\
                    # test-runner-run/run1/app: first\n\
                    # test-runner-run/run2/app: second\n";
        let records = parse(text);

        assert_eq!(records[0].get("app"), Some("first"));
        assert_eq!(records[1].get("app"), Some("second"));
    }

    #[test]
    fn test_key_with_invalid_characters_is_ignored() {
        let text = "# test-runner-runs: run1\n# test-runner-run/run1/bad.key: value\n";
        let records = parse(text);

        assert_eq!(records[0].get("bad.key"), None);
        assert_eq!(records[0].len(), 2);
    }

    #[test]
    fn test_legacy_line_without_key_is_ignored() {
        let text = "# test-runner-runs: run1\n\
                    # test-runner-run/run1: app/all-clusters discriminator passcode\n";
        let records = parse(text);

        assert_eq!(records[0].len(), 2);
    }

    #[test]
    fn test_placeholders_are_kept_raw() {
        let text = "# test-runner-runs: run1\n# test-runner-run/run1/app: ${APP}\n";
        let records = parse(text);

        assert_eq!(records[0].get("app"), Some("${APP}"));
    }
}

#[cfg(test)]
mod redeclaration_tests {
    use super::*;

    #[test]
    fn test_redeclaration_clears_accumulated_keys() {
        let text = "# test-runner-runs: run1\n\
                    # test-runner-run/run1/app: first\n\
                    # test-runner-run/run1/KVS: kvs1\n\
                    # test-runner-runs: run1\n\
                    # test-runner-run/run1/app: second\n";
        let records = parse(text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("app"), Some("second"));
        assert_eq!(records[0].get("KVS"), None);
    }

    #[test]
    fn test_redeclaration_keeps_first_position() {
        let text = "# test-runner-runs: run1 run2\n# test-runner-runs: run1\n";
        let records = parse(text);

        let names: Vec<_> = records.iter().map(|r| r.run_name().unwrap()).collect();
        assert_eq!(names, vec!["run1", "run2"]);
    }

    #[test]
    fn test_redeclaration_leaves_other_runs_untouched() {
        let text = "# test-runner-runs: run1 run2\n\
                    # test-runner-run/run2/app: kept\n\
                    # test-runner-runs: run1\n";
        let records = parse(text);

        assert_eq!(records[1].get("app"), Some("kept"));
    }
}

#[cfg(test)]
mod undeclared_run_tests {
    use super::*;

    #[test]
    fn test_key_for_undeclared_run_rejects_script() {
        let text = "# test-runner-runs: run1\n\
                    \n\
                    # test-runner-run/run9/app: value\n";
        let err = parse_annotations(text, SCRIPT).unwrap_err();

        match err {
            MetadataError::UndeclaredRun { run, key, line } => {
                assert_eq!(run, "run9");
                assert_eq!(key, "app");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_key_before_declaration_is_undeclared() {
        let text = "# test-runner-run/run1/app: value\n# test-runner-runs: run1\n";
        let err = parse_annotations(text, SCRIPT).unwrap_err();

        assert!(matches!(err, MetadataError::UndeclaredRun { line: 1, .. }));
        assert!(err.to_string().contains("run1"));
    }
}
