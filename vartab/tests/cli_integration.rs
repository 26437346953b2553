//! Integration tests for vartab CLI

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::tempdir;

fn cargo_run_args(args: &[&str]) -> Vec<String> {
    let mut cmd_args: Vec<String> = ["run", "-q", "-p", "vartab", "--"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    cmd_args.extend(args.iter().map(|s| s.to_string()));
    cmd_args
}

fn run_vartab(args: &[&str]) -> (String, String, bool) {
    let output = Command::new("cargo")
        .args(cargo_run_args(args))
        .current_dir(env!("CARGO_MANIFEST_DIR").to_string() + "/..")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

fn run_vartab_with_stdin(args: &[&str], input: &str) -> (String, String, bool) {
    run_vartab_piped(args, input.as_bytes(), &[])
}

fn run_vartab_piped(
    args: &[&str],
    input: &[u8],
    envs: &[(&str, &str)],
) -> (String, String, bool) {
    let mut child = Command::new("cargo")
        .args(cargo_run_args(args))
        .current_dir(env!("CARGO_MANIFEST_DIR").to_string() + "/..")
        .env_remove("RUST_LOG")
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input)
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait on command");
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

const RECORDS: &str = r#"{"Uploaded_variation": "rs1", "Location": "1:100", "Allele": "A", "IMPACT": "HIGH", "SIFT": ["tolerated", 0.5]}

{"Uploaded_variation": "rs2", "Location": "2:200", "SYMBOL": "BRCA2", "CADD_PHRED": 23.1}
"#;

fn data_lines(stdout: &str) -> Vec<&str> {
    stdout.lines().filter(|l| !l.starts_with('#')).collect()
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_vartab(&["--help"]);

    assert!(success);
    assert!(stdout.contains("vartab"));
    assert!(stdout.contains("--flag"));
    assert!(stdout.contains("--no-header"));
    assert!(stdout.contains("format"));
    assert!(stdout.contains("fields"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_vartab(&["--version"]);

    assert!(success);
    assert!(stdout.contains("vartab"));
}

#[test]
fn test_format_file_with_header() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("records.jsonl");
    fs::write(&input, RECORDS).unwrap();

    let (stdout, _, success) = run_vartab(&["format", input.to_str().unwrap(), "--flag", "sift"]);

    assert!(success);
    assert!(stdout.starts_with("## VARTAB v"));
    assert!(stdout.contains("## Output produced at "));
    assert!(stdout.contains("## Column descriptions:"));
    assert!(stdout.contains("## Extra column keys:"));
    assert!(stdout.contains("## SIFT : SIFT prediction and/or score"));
    assert!(stdout.contains("#Uploaded_variation\tLocation\tAllele\tGene"));

    let lines = data_lines(&stdout);
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "rs1\t1:100\tA\t-\t-\t-\t-\t-\t-\t-\t-\t-\t-\tIMPACT=HIGH;SIFT=tolerated,0.5"
    );
    for line in &lines {
        assert_eq!(line.split('\t').count(), 14);
    }
}

#[test]
fn test_format_stdin_default_command() {
    let (stdout, _, success) = run_vartab_with_stdin(&["--no-header", "--flag", "symbol"], RECORDS);

    assert!(success);
    assert!(!stdout.contains("##"));
    let lines = data_lines(&stdout);
    assert_eq!(lines.len(), 2);
    // CADD_PHRED is not a candidate, so it sorts after SYMBOL
    assert!(lines[1].ends_with("\tSYMBOL=BRCA2;CADD_PHRED=23.1"));
    assert!(lines[1].starts_with("rs2\t2:200\t-\t"));
}

#[test]
fn test_format_plugin_and_custom_headers() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("records.jsonl");
    fs::write(&input, RECORDS).unwrap();
    let plugin = dir.path().join("cadd.json");
    fs::write(&plugin, r#"{"CADD_PHRED": "PHRED-like scaled CADD score"}"#).unwrap();

    let plugin_arg = format!("CADD={}", plugin.display());
    let (stdout, _, success) = run_vartab(&[
        "format",
        input.to_str().unwrap(),
        "--plugin",
        &plugin_arg,
        "--custom",
        "ClinVar=clinvar.vcf.gz:exact:CLNSIG",
    ]);

    assert!(success);
    let plugin_pos = stdout.find("## CADD_PHRED : PHRED-like scaled CADD score").unwrap();
    let custom_pos = stdout.find("## ClinVar : clinvar.vcf.gz (exact)").unwrap();
    assert!(plugin_pos < custom_pos);
    assert!(stdout.contains("## ClinVar_CLNSIG : CLNSIG field from clinvar.vcf.gz"));
}

#[test]
fn test_format_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("run.json");
    fs::write(&config, r#"{"flags": ["hgvs"]}"#).unwrap();

    let (stdout, _, success) = run_vartab(&["fields", "--config", config.to_str().unwrap()]);

    assert!(success);
    assert!(stdout.contains("HGVSc"));
    assert!(stdout.contains("HGVS coding sequence name"));
    assert!(!stdout.contains("SIFT"));
}

#[test]
fn test_invalid_record() {
    let (_, stderr, success) =
        run_vartab_with_stdin(&["--no-header"], "{\"Allele\": \"A\"}\n{\"DOMAINS\": {\"Pfam\": 1}}\n");

    assert!(!success);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("line 2"));
    assert!(stderr.contains("DOMAINS"));
}

#[test]
fn test_invalid_utf8_reports_line() {
    let (_, stderr, success) =
        run_vartab_piped(&["--no-header"], b"{\"Allele\": \"A\"}\n{\"SYMBOL\": \"\xff\xfe\"}\n", &[]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("line 2"));
}

#[test]
fn test_rust_log_enables_debug_events() {
    let record = "{\"Allele\": \"A\"}\n";

    let (_, stderr, success) = run_vartab_piped(&["--no-header"], record.as_bytes(), &[]);
    assert!(success);
    assert!(!stderr.contains("Formatted records"));

    let (_, stderr, success) =
        run_vartab_piped(&["--no-header"], record.as_bytes(), &[("RUST_LOG", "debug")]);
    assert!(success);
    assert!(stderr.contains("Formatted records"));
}

#[test]
fn test_invalid_path() {
    let (_, stderr, success) = run_vartab(&["format", "/nonexistent/records.jsonl"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_invalid_custom_spec() {
    let (_, stderr, success) = run_vartab_with_stdin(&["--custom", "ClinVar"], "");

    assert!(!success);
    assert!(stderr.contains("invalid custom track"));
}

// ============================================================================
// fields / flags command tests
// ============================================================================

#[test]
fn test_fields_default() {
    let (stdout, _, success) = run_vartab(&["fields"]);

    assert!(success);
    let names: Vec<&str> = stdout
        .lines()
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(names, vec!["IMPACT", "DISTANCE", "STRAND", "FLAGS"]);
}

#[test]
fn test_fields_json_output() {
    let (stdout, _, success) = run_vartab(&["fields", "--flag", "sift,polyphen", "--output", "json"]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed["columns"][0]["name"], "Uploaded_variation");
    let extra: Vec<&str> = parsed["extra"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["name"].as_str().unwrap())
        .collect();
    assert_eq!(extra[4..], ["SIFT", "PolyPhen"]);
    assert!(parsed["providers"].as_array().unwrap().is_empty());
}

#[test]
fn test_flags_listing() {
    let (stdout, _, success) = run_vartab(&["flags"]);

    assert!(success);
    assert!(stdout.lines().any(|l| l.starts_with("symbol") && l.contains("SYMBOL, SYMBOL_SOURCE, HGNC_ID")));
}
