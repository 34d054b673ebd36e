// End-to-end tests for `mgrid build` / `mgrid validate`.
// Run with: cargo test -p matchgrid-cli --test build_tests

use std::path::Path;
use std::process::Command;

fn mgrid() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mgrid"))
}

fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

const CONFIG: &str = r#"
name = "human-plant"

[[comparisons]]
id = "name-match"

[[comparisons]]
id = "email-match"

[input]
file = "matches.csv"

[output]
file = "table.csv"
"#;

const MATCHES: &str = "\
left_id,right_id,comparison_id
H1,P1,name-match
H1,P1,email-match
H2,P2,name-match
";

#[test]
fn build_writes_table_next_to_config() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "hp.table.toml", CONFIG);
    write(dir.path(), "matches.csv", MATCHES);

    let out = mgrid()
        .arg("build")
        .arg(dir.path().join("hp.table.toml"))
        .output()
        .unwrap();

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let table = std::fs::read_to_string(dir.path().join("table.csv")).unwrap();
    assert_eq!(table, "Human id,Plant id,name-match,email-match\nH1,P1,1,1\nH2,P2,1,0\n");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("2 pair(s) from 3 record(s)"));
}

#[test]
fn build_json_summary_and_output_override() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "hp.table.toml", CONFIG);
    write(dir.path(), "matches.csv", MATCHES);
    let target = dir.path().join("elsewhere.csv");

    let out = mgrid()
        .arg("build")
        .arg(dir.path().join("hp.table.toml"))
        .arg("--output")
        .arg(&target)
        .arg("--json")
        .output()
        .unwrap();

    assert!(out.status.success());
    assert!(target.exists());
    assert!(!dir.path().join("table.csv").exists());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["config_name"], "human-plant");
    assert_eq!(report["pairs"], 2);
    assert_eq!(report["records_stacked"], 3);
    assert_eq!(report["comparison_hits"]["name-match"], 2);
}

#[test]
fn unknown_comparison_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "hp.table.toml", CONFIG);
    write(
        dir.path(),
        "matches.csv",
        "left_id,right_id,comparison_id\nH1,P1,zip-match\n",
    );

    let out = mgrid()
        .arg("build")
        .arg(dir.path().join("hp.table.toml"))
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(63));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("record 1: unknown comparison: 'zip-match'"));
    assert!(stderr.contains("hint:"));
}

#[test]
fn skip_policy_builds_anyway() {
    let dir = tempfile::tempdir().unwrap();
    let config = CONFIG.replace(
        "name = \"human-plant\"\n",
        "name = \"human-plant\"\n\n[table]\nunknown_comparison = \"skip\"\n",
    );
    write(dir.path(), "hp.table.toml", &config);
    write(
        dir.path(),
        "matches.csv",
        "left_id,right_id,comparison_id\nH1,P1,zip-match\nH1,P1,email-match\n",
    );

    let out = mgrid()
        .arg("build")
        .arg(dir.path().join("hp.table.toml"))
        .output()
        .unwrap();

    assert!(out.status.success());
    let table = std::fs::read_to_string(dir.path().join("table.csv")).unwrap();
    assert_eq!(table, "Human id,Plant id,name-match,email-match\nH1,P1,0,1\n");
}

#[test]
fn missing_column_is_input_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "hp.table.toml", CONFIG);
    write(dir.path(), "matches.csv", "left,right,method\nH1,P1,name-match\n");

    let out = mgrid()
        .arg("build")
        .arg(dir.path().join("hp.table.toml"))
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(61));
}

#[test]
fn no_output_destination_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = CONFIG.replace("[output]\nfile = \"table.csv\"\n", "");
    write(dir.path(), "hp.table.toml", &config);
    write(dir.path(), "matches.csv", MATCHES);

    let out = mgrid()
        .arg("build")
        .arg(dir.path().join("hp.table.toml"))
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn validate_accepts_and_rejects() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "ok.table.toml", CONFIG);
    write(
        dir.path(),
        "dup.table.toml",
        "name = \"dup\"\n[[comparisons]]\nid = \"a\"\n[[comparisons]]\nid = \"a\"\n",
    );

    let ok = mgrid()
        .arg("validate")
        .arg(dir.path().join("ok.table.toml"))
        .output()
        .unwrap();
    assert!(ok.status.success());

    let bad = mgrid()
        .arg("validate")
        .arg(dir.path().join("dup.table.toml"))
        .output()
        .unwrap();
    assert_eq!(bad.status.code(), Some(60));
}

#[test]
fn failed_build_keeps_previous_table() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "hp.table.toml", CONFIG);
    write(dir.path(), "matches.csv", MATCHES);

    let good = mgrid()
        .arg("build")
        .arg(dir.path().join("hp.table.toml"))
        .output()
        .unwrap();
    assert!(good.status.success());
    let before = std::fs::read_to_string(dir.path().join("table.csv")).unwrap();

    write(
        dir.path(),
        "matches.csv",
        "left_id,right_id,comparison_id\nH3,P3,name-match\nH3,P3,typo\n",
    );
    let bad = mgrid()
        .arg("build")
        .arg(dir.path().join("hp.table.toml"))
        .output()
        .unwrap();
    assert_eq!(bad.status.code(), Some(63));

    let after = std::fs::read_to_string(dir.path().join("table.csv")).unwrap();
    assert_eq!(after, before);
    assert!(!dir.path().join("table.csv.tmp").exists());
}
