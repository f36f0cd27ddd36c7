//! CLI integration tests for sift commands.
//!
//! Compile tests pass `--json` so documents can be compared exactly; the
//! remaining tests focus on exit codes and key phrases.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get a sift command.
fn sift() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("sift").unwrap()
}

/// Helper to run `sift` with HOME isolated to the provided directory.
fn sift_with_home(home: &Path) -> Command {
    let mut cmd = sift();
    cmd.env("HOME", home);
    cmd
}

/// Runs `sift compile --json` with the given arguments and parses stdout.
fn compile_json(dir: &Path, args: &[&str]) -> Value {
    let assert = sift_with_home(dir)
        .current_dir(dir)
        .arg("compile")
        .arg("--json")
        .args(args)
        .assert()
        .success();
    serde_json::from_slice(&assert.get_output().stdout).unwrap()
}

mod compile {
    use super::*;

    #[test]
    fn text_only_matches_catch_all() {
        let dir = temp_dir();
        assert_eq!(
            compile_json(dir.path(), &["foo"]),
            json!({ "match": { "_all": "foo" } })
        );
    }

    #[test]
    fn compact_output_is_one_line() {
        let dir = temp_dir();
        sift_with_home(dir.path())
            .current_dir(dir.path())
            .args(["compile", "--json", "foo"])
            .assert()
            .success()
            .stdout("{\"match\":{\"_all\":\"foo\"}}\n");
    }

    #[test]
    fn empty_text_matches_all() {
        let dir = temp_dir();
        assert_eq!(compile_json(dir.path(), &[]), json!({ "match_all": {} }));
    }

    #[test]
    fn multiple_fields() {
        let dir = temp_dir();
        assert_eq!(
            compile_json(dir.path(), &["foo", "-o", r#"{"on": ["name", "description"]}"#]),
            json!({ "multi_match": { "query": "foo", "fields": ["name", "description"] } })
        );
    }

    #[test]
    fn only_with_list_is_filtered_terms() {
        let dir = temp_dir();
        assert_eq!(
            compile_json(
                dir.path(),
                &["foo", "-o", r#"{"only": {"status": ["published", "rejected"]}}"#]
            ),
            json!({
                "filtered": {
                    "query": { "match": { "_all": "foo" } },
                    "filter": { "terms": { "status": ["published", "rejected"] } }
                }
            })
        );
    }

    #[test]
    fn boost_by_wraps_function_score() {
        let dir = temp_dir();
        assert_eq!(
            compile_json(dir.path(), &["foo", "-o", r#"{"boost_by": "contents_count"}"#]),
            json!({
                "function_score": {
                    "query": { "match": { "_all": "foo" } },
                    "field_value_factor": { "field": "contents_count", "modifier": "ln2p" }
                }
            })
        );
    }

    #[test]
    fn options_file() {
        let dir = temp_dir();
        let path = dir.path().join("options.json");
        fs::write(&path, r#"{"except": {"company": {"id": 1}}}"#).unwrap();

        assert_eq!(
            compile_json(dir.path(), &["foo", "-f", path.to_str().unwrap()]),
            json!({
                "filtered": {
                    "query": { "match": { "_all": "foo" } },
                    "filter": { "not": { "term": { "company.id": 1 } } }
                }
            })
        );
    }

    #[test]
    fn options_from_stdin() {
        let dir = temp_dir();
        let assert = sift_with_home(dir.path())
            .current_dir(dir.path())
            .args(["compile", "--json", "foo", "-f", "-"])
            .write_stdin(r#"{"on": "name"}"#)
            .assert()
            .success();
        let doc: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
        assert_eq!(doc, json!({ "match": { "name": "foo" } }));
    }

    #[test]
    fn aggregations_build_search_body() {
        let dir = temp_dir();
        assert_eq!(
            compile_json(dir.path(), &["foo", "-a", "max:top_price:price"]),
            json!({
                "query": { "match": { "_all": "foo" } },
                "aggs": { "top_price": { "max": { "field": "price" } } }
            })
        );
    }

    #[test]
    fn invalid_on_fails_with_hint() {
        let dir = temp_dir();
        sift_with_home(dir.path())
            .current_dir(dir.path())
            .args(["compile", "foo", "-o", r#"{"on": {"name": true}}"#])
            .assert()
            .failure()
            .stderr(predicate::str::contains("hint:"));
    }

    #[test]
    fn malformed_json_fails() {
        let dir = temp_dir();
        sift_with_home(dir.path())
            .current_dir(dir.path())
            .args(["compile", "foo", "-o", "{on:"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to parse options"));
    }

    #[test]
    fn unknown_aggregation_kind_is_usage_error() {
        let dir = temp_dir();
        sift_with_home(dir.path())
            .current_dir(dir.path())
            .args(["compile", "foo", "-a", "median:m:price"])
            .assert()
            .failure();
    }

    #[test]
    fn config_changes_catch_all_field() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".sift.toml"),
            "[compile]\ncatch_all_field = \"body\"\n",
        )
        .unwrap();

        assert_eq!(
            compile_json(dir.path(), &["foo"]),
            json!({ "match": { "body": "foo" } })
        );
    }

    #[test]
    fn reject_precedence_refuses_two_boosts() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".sift.toml"),
            "[compile]\nboost_precedence = \"reject\"\n",
        )
        .unwrap();

        sift_with_home(dir.path())
            .current_dir(dir.path())
            .args([
                "compile",
                "foo",
                "-o",
                r#"{"boost_by": "views", "boost_where": {"featured": true}}"#,
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("conflicting boost options"));
    }

    #[test]
    fn explain_prints_tree_and_conditions() {
        let dir = temp_dir();
        sift_with_home(dir.path())
            .current_dir(dir.path())
            .args([
                "compile",
                "--no-color",
                "--explain",
                "foo",
                "-o",
                r#"{"only": {"status": "published"}}"#,
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Filtered"))
            .stdout(predicate::str::contains("status"))
            .stdout(predicate::str::contains("term"));
    }

    #[test]
    fn invalid_config_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join(".sift.toml"), "[compile\n").unwrap();

        sift_with_home(dir.path())
            .current_dir(dir.path())
            .args(["compile", "foo"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let home = temp_dir();
        let dir = temp_dir();

        sift_with_home(home.path())
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration written:"));

        let contents = fs::read_to_string(dir.path().join(".sift.toml")).unwrap();
        assert!(contents.contains("# [compile]"));
    }

    #[test]
    fn fails_if_config_exists() {
        let dir = temp_dir();
        fs::write(dir.path().join(".sift.toml"), "existing").unwrap();

        sift_with_home(dir.path())
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("--force"));
    }

    #[test]
    fn force_overwrites_existing() {
        let home = temp_dir();
        let dir = temp_dir();
        fs::write(dir.path().join(".sift.toml"), "old content").unwrap();

        sift_with_home(home.path())
            .current_dir(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let contents = fs::read_to_string(dir.path().join(".sift.toml")).unwrap();
        assert!(contents.contains("# [compile]"));
    }

    #[test]
    fn global_writes_to_home() {
        let home = temp_dir();
        let dir = temp_dir();

        sift_with_home(home.path())
            .current_dir(dir.path())
            .args(["init", "--global"])
            .assert()
            .success();

        assert!(home.path().join(".sift.toml").exists());
        assert!(!dir.path().join(".sift.toml").exists());
    }
}

mod config {
    use super::*;

    #[test]
    fn shows_effective_settings() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".sift.toml"),
            "[compile]\nboost_factor = 50\n",
        )
        .unwrap();

        sift_with_home(dir.path())
            .current_dir(dir.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("boost_factor = 50"))
            .stdout(predicate::str::contains("catch_all_field = \"_all\""));
    }
}

mod status {
    use super::*;

    #[test]
    fn succeeds_without_config() {
        let dir = temp_dir();
        sift_with_home(dir.path())
            .current_dir(dir.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("sift init"));
    }

    #[test]
    fn lists_config_file() {
        let dir = temp_dir();
        fs::write(dir.path().join(".sift.toml"), "root = true\n").unwrap();

        sift_with_home(dir.path())
            .current_dir(dir.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains(".sift.toml"));
    }

    #[test]
    fn fails_on_warnings() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".sift.toml"),
            "[compile]\nboost_modifier = \"triple\"\n",
        )
        .unwrap();

        sift_with_home(dir.path())
            .current_dir(dir.path())
            .arg("status")
            .assert()
            .failure()
            .stdout(predicate::str::contains("triple"));
    }
}
