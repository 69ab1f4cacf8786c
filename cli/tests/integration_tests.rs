use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

use tempfile::TempDir;

/// Schema with an `add` verb (read/verbose/count) and a bare `list` verb.
fn write_schema(dir: &TempDir) -> PathBuf {
    let yaml = r#"version: "1.0"
verbs:
  - name: add
    options:
      - name: read
        short: r
        kind: string
        aliases: [input]
      - name: verbose
        short: v
        kind: bool
        default: false
      - name: count
        short: c
        kind: integer
        settings: { min: 0, max: 20 }
  - name: list
"#;
    let path = dir.path().join("schema.yaml");
    fs::write(&path, yaml).expect("failed to write schema");
    path
}

fn run(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_argot"))
        .args(args)
        .output()
        .expect("failed to run argot")
}

fn parse(schema: &Path, extra: &[&str], argv: &[&str]) -> Output {
    let schema = schema.to_str().unwrap();
    let mut args = vec!["parse", "--schema", schema];
    args.extend_from_slice(extra);
    args.push("--");
    args.extend_from_slice(argv);
    run(&args)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_reports_verb_and_option_counts() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir);

    let output = run(&["check", "--schema", schema.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("2 verb(s), 3 option(s)"));
}

#[test]
fn check_rejects_duplicate_option_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(
        &path,
        r#"version: "1.0"
verbs:
  - name: add
    options:
      - name: read
      - name: READ
"#,
    )
    .unwrap();

    let output = run(&["check", "--schema", path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid schema"));
}

#[test]
fn check_accepts_json_documents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schema.json");
    fs::write(
        &path,
        r#"{"version": "1.0", "verbs": [{"name": "sync", "options": [{"name": "dry-run", "kind": "bool"}]}]}"#,
    )
    .unwrap();

    let output = run(&["check", "--schema", path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("1 verb(s), 1 option(s)"));
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_standard_syntax_prints_resolved_values() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir);

    let output = parse(
        &schema,
        &[],
        &["add", "--read", "notes.txt", "--verbose", "true", "--count", "10"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("read (string) = notes.txt"));
    assert!(text.contains("verbose (bool) = true"));
    assert!(text.contains("count (integer) = 10"));
}

#[test]
fn parse_natural_syntax_as_json() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir);

    let output = parse(
        &schema,
        &["--format", "json"],
        &["add", "where", "read", "is", "notes.txt", "verbose", "is", "true"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json[0]["success"], true);
    assert_eq!(json[0]["args"]["verb"], "add");
    assert_eq!(json[0]["args"]["options"][0]["name"], "read");
    assert_eq!(json[0]["args"]["options"][0]["value"], "notes.txt");
    assert_eq!(json[0]["args"]["options"][1]["value"], true);
}

#[test]
fn parse_splits_groups_and_fails_if_any_group_fails() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir);

    let output = parse(
        &schema,
        &["--format", "json"],
        &["list", "&", "add", "--count", "25"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("1 of 2 group(s) failed"));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json[0]["success"], true);
    assert_eq!(json[1]["success"], false);
    assert_eq!(json[1]["error_kind"], "settings_violation");
}

#[test]
fn parse_unknown_verb_suggests_correction() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir);

    let output = parse(&schema, &[], &["ad", "--verbose", "true"]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("error: unknown verb 'ad'. Did you mean 'add'?"));
}

#[test]
fn parse_uses_prefixes_from_config() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir);
    let config = dir.path().join("config.yaml");
    fs::write(&config, "long_prefix: '++'\nshort_prefix: '+'\n").unwrap();

    let output = parse(
        &schema,
        &["--config", config.to_str().unwrap()],
        &["add", "++input", "a.txt", "+c", "3"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("read (string) = a.txt"));
    assert!(text.contains("count (integer) = 3"));
}

#[test]
fn parse_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir);
    let config = dir.path().join("config.yaml");
    fs::write(&config, "long_prefix: '-'\n").unwrap();

    let output = parse(&schema, &["--config", config.to_str().unwrap()], &["list"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load config"));
}

// ---------------------------------------------------------------------------
// suggest
// ---------------------------------------------------------------------------

#[test]
fn suggest_verb_names() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir);

    let output = run(&["suggest", "--schema", schema.to_str().unwrap(), "lsit"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("list\t"));
}

#[test]
fn suggest_option_names_of_verb() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir);

    let output = run(&[
        "suggest",
        "--schema",
        schema.to_str().unwrap(),
        "--verb",
        "add",
        "verbsoe",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("verbose\t"));
}

#[test]
fn suggest_reports_when_nothing_is_close() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir);

    let output = run(&["suggest", "--schema", schema.to_str().unwrap(), "xyz"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No suggestions for 'xyz'."));
}
