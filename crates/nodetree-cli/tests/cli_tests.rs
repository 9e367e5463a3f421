//! Integration tests for the `nodetree` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to run the actual binary:
//! loading from files and stdin, both print formats, re-saving, and the
//! failure paths for unreadable, malformed and undecodable input.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn nodetree() -> Command {
    let mut cmd = Command::cargo_bin("nodetree").unwrap();
    cmd.env_remove("NODETREE_LOG");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading and printing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn prints_loaded_tree() {
    let path = fixture("sample.xml");
    nodetree()
        .args(["-i", path.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Tree loaded from file '{}':",
            path
        )))
        .stdout(predicate::str::contains(
            "--{ INT(5)\n\t--{ STRING(hello)\n\t--{ REAL(3.14)\n\t\t--{ STRING(nested)\n",
        ));
}

#[test]
fn reads_stdin_when_input_omitted() {
    nodetree()
        .write_stdin(r#"<node type="0" val="from stdin"/>"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tree loaded from file '<stdin>':"))
        .stdout(predicate::str::contains("--{ STRING(from stdin)"));
}

#[test]
fn dash_reads_stdin() {
    nodetree()
        .args(["-i", "-"])
        .write_stdin(r#"<node type="1" val="9"/>"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("--{ INT(9)"));
}

#[test]
fn empty_document_is_an_empty_tree() {
    nodetree()
        .write_stdin("<?xml version=\"1.0\"?>\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(empty tree)"));
}

#[test]
fn json_format() {
    let output = nodetree()
        .args(["-i", fixture("sample.xml").as_str(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json_start = stdout.find('{').expect("JSON body in output");
    let value: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    assert_eq!(value["kind"], "Integer");
    assert_eq!(value["value"], 5);
    assert_eq!(value["children"][0]["value"], "hello");
    assert_eq!(value["children"][1]["children"][0]["value"], "nested");
}

// ─────────────────────────────────────────────────────────────────────────────
// Saving
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn saves_identical_document() {
    let output_path = std::env::temp_dir().join("nodetree-cli-test-save.xml");
    let _ = std::fs::remove_file(&output_path);

    nodetree()
        .args([
            "-i",
            fixture("sample.xml").as_str(),
            "-o",
            output_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tree saved to file"));

    let saved = std::fs::read_to_string(&output_path).expect("output file must exist");
    let original = std::fs::read_to_string(fixture("sample.xml")).unwrap();
    assert_eq!(saved, original);
    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn saves_compact_document() {
    let output_path = std::env::temp_dir().join("nodetree-cli-test-compact.xml");
    let _ = std::fs::remove_file(&output_path);

    nodetree()
        .args(["-o", output_path.to_str().unwrap(), "--indent", "0"])
        .write_stdin(r#"<node type="1" val="1"><node type="0" val="a"/></node>"#)
        .assert()
        .success();

    let saved = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(
        saved,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><node type=\"1\" val=\"1\"><node type=\"0\" val=\"a\"/></node>\n"
    );
    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn unwritable_output_fails() {
    nodetree()
        .args([
            "-i",
            fixture("sample.xml").as_str(),
            "-o",
            "/nonexistent-dir/nodetree/out.xml",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to write file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Failures
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn missing_input_file_fails() {
    nodetree()
        .args(["-i", "/nonexistent/tree.xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to load document '/nonexistent/tree.xml'",
        ))
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn malformed_markup_fails_to_load() {
    nodetree()
        .write_stdin(r#"<node type="0" val="x">"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load document"));
}

#[test]
fn malformed_file_fails_to_load() {
    let path = std::env::temp_dir().join("nodetree-cli-test-malformed.xml");
    std::fs::write(&path, "<node type=\"0\" val=\"x\"></other>").unwrap();

    nodetree()
        .args(["-i", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load document"))
        .stderr(predicate::str::contains("markup parse error"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn control_character_in_value_fails_to_save() {
    let output_path = std::env::temp_dir().join("nodetree-cli-test-unrepresentable.xml");
    let _ = std::fs::remove_file(&output_path);

    nodetree()
        .args(["-o", output_path.to_str().unwrap()])
        .write_stdin("<node type=\"0\" val=\"a\u{1}b\"/>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to write file"))
        .stderr(predicate::str::contains("not representable in XML 1.0"));
    assert!(!output_path.exists());
}

#[test]
fn corrupt_value_fails_to_decode() {
    nodetree()
        .args(["-i", fixture("corrupt.xml").as_str()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Tree loaded").not())
        .stderr(predicate::str::contains("Failed to decode tree"));
}

#[test]
fn unknown_kind_fails_to_decode() {
    nodetree()
        .args(["-i", fixture("unknown_kind.xml").as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode tree"))
        .stderr(predicate::str::contains("kind tag 7"));
}

#[test]
fn unknown_format_is_rejected() {
    nodetree()
        .args(["-i", fixture("sample.xml").as_str(), "--format", "yaml"])
        .assert()
        .failure();
}
